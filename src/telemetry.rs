use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;

/// Install a `fmt` subscriber filtered by `RUST_LOG`, with `INFO` added on top.
///
/// Events are written to stderr; stdout carries the binary's CSV output.
///
/// Returns `false` if a global subscriber was already set, in which case nothing changes.
pub fn init() -> bool {
    subscriber(std::io::stderr).try_init().is_ok()
}

fn subscriber<W>(writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(writer)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing::info;

    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_events_go_to_the_configured_writer() {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&buffer);
        let subscriber = subscriber(move || Capture(Arc::clone(&sink)));
        tracing::subscriber::with_default(subscriber, || info!("Built trajectory"));
        let text = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(text.contains("Built trajectory"), "{text}");
    }

    #[test]
    fn test_second_init_is_harmless() {
        init();
        assert!(!init());
    }
}
