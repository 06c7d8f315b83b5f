use clap::Parser;
use flock_sim_core::{Flock, FlockConfig, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Headless flocking demo: drives the simulation like a render loop would,
/// one update per frame, and reports flock statistics instead of drawing.
#[derive(Parser, Debug)]
#[command(name = "flock-sim-demo")]
#[command(about = "Headless boids flocking simulation demo", long_about = None)]
struct Args {
    /// Number of agents in the flock
    #[arg(short, long, default_value_t = 100)]
    count: usize,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Half-width of the square the flock spawns on (at z = 0)
    #[arg(long, default_value_t = 5.0)]
    spread: f32,

    /// RNG seed for the spawn layout
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Report statistics every this many frames
    #[arg(short, long, default_value_t = 60)]
    report_interval: u64,

    /// Override the speed limit
    #[arg(long)]
    max_speed: Option<f32>,

    /// Override the separation radius
    #[arg(long)]
    separation_radius: Option<f32>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = FlockConfig::default();
    if let Some(max_speed) = args.max_speed {
        config.max_speed = max_speed;
    }
    if let Some(separation_radius) = args.separation_radius {
        config.separation_radius = separation_radius;
    }

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut flock = match Flock::with_random_layout(args.count, args.spread, &mut rng, config) {
        Ok(flock) => flock,
        Err(error) => {
            eprintln!("failed to build flock: {error}");
            std::process::exit(1);
        }
    };

    println!("=== Flock Simulation Demo ===");
    println!(
        "{} agents, {} frames, seed {}, spawn spread {}",
        args.count, args.frames, args.seed, args.spread
    );

    report(&flock);
    for _ in 0..args.frames {
        flock.update();
        if args.report_interval > 0 && flock.frame() % args.report_interval == 0 {
            report(&flock);
        }
    }
    if args.report_interval == 0 || flock.frame() % args.report_interval != 0 {
        report(&flock);
    }
}

/// Print one line of flock statistics: centroid, how far the flock has
/// spread around it, and the mean speed.
fn report(flock: &Flock) {
    let count = flock.len() as f32;

    let mut centroid = Vec3::ZERO;
    for agent in flock.agents() {
        centroid = centroid + agent.position();
    }
    centroid = centroid / count;

    let mut max_radius = 0.0_f32;
    let mut mean_speed = 0.0_f32;
    for agent in flock.agents() {
        max_radius = max_radius.max(agent.position().distance(centroid));
        mean_speed += agent.velocity().length();
    }
    mean_speed /= count;

    println!(
        "frame {:>5}  centroid ({:+7.2}, {:+7.2}, {:+7.2})  radius {:6.2}  mean speed {:.3}",
        flock.frame(),
        centroid.x,
        centroid.y,
        centroid.z,
        max_radius,
        mean_speed
    );
}
