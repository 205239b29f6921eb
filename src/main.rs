use anyhow::Context;
use tracing::{info, warn};

use tread::settings::DEFAULT_CONFIG_PATH;
use tread::{DirectParams, Settings, Trajectory, telemetry};

const USAGE: &str = "usage: tread <omega_start> <omega_end> <middle_time> <start_speed> \
                     <cruise_speed> <end_speed> <delta_theta> [samples]";

fn parse_args(args: &[String]) -> anyhow::Result<(DirectParams, usize)> {
    if args.len() != 7 && args.len() != 8 {
        anyhow::bail!(USAGE);
    }
    let mut values = [0.0; 7];
    for (value, arg) in values.iter_mut().zip(args) {
        *value = arg
            .parse()
            .with_context(|| format!("`{arg}` is not a number\n{USAGE}"))?;
    }
    let samples = match args.get(7) {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("`{arg}` is not a sample count\n{USAGE}"))?,
        None => 11,
    };
    let [w1, w2, middle, s0, cruise, end, delta] = values;
    Ok((DirectParams::new(w1, w2, middle, s0, cruise, end, delta), samples))
}

fn main() -> anyhow::Result<()> {
    telemetry::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (params, samples) = parse_args(&args)?;

    let settings = match Settings::load(DEFAULT_CONFIG_PATH) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Falling back to built-in defaults: {:#}", e);
            Settings::default()
        }
    };
    let config = settings.profile_config()?;

    let trajectory = Trajectory::direct(&params, &config).with_context(|| format!("{params}"))?;
    info!("Built {}", trajectory);

    println!("time,x,y,heading,speed,omega,left_speed,right_speed");
    for s in trajectory.samples(samples) {
        println!(
            "{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6}",
            s.time,
            s.position.x,
            s.position.y,
            s.heading,
            s.speed,
            s.omega,
            s.wheel_speeds.left,
            s.wheel_speeds.right
        );
    }
    Ok(())
}
