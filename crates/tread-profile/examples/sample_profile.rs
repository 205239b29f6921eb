use tread_profile::*;

fn main() {
    let params = DirectParams::new(1.35, 1.15, 0.2, 0.0, 20.0, 20.0, std::f64::consts::FRAC_PI_3);
    let config = ProfileConfig::default();
    let num_samples = 11;

    println!("Planning profile...");
    println!("  Limits:     {}", config.limits());
    println!("  Wheel Base: {}", config.wheel_base());
    println!("  Parameters: {}", params);

    let plan = match params.plan(config.limits()) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("Parameters rejected: {}", e);
            return;
        }
    };
    println!("  Segments:");
    for segment in plan.segments().iter().filter(|s| s.duration > 0.0) {
        println!("    {}", segment);
    }

    match Trajectory::direct(&params, &config) {
        Ok(trajectory) => {
            println!("\nSampling {}...", trajectory);
            for sample in trajectory.samples(num_samples) {
                println!(
                    "t = {:.3} s: center {} heading {:.4} rad, wheels {}",
                    sample.time, sample.position, sample.heading, sample.wheel_speeds
                );
            }
            println!("\nWheel distances: {}", trajectory.wheel_distances(trajectory.duration()));
        }
        Err(e) => eprintln!("Failed to build trajectory: {:?}", e),
    }
}
