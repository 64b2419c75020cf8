use std::{fs::File, io::BufWriter, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "routeglide", version)]
struct Cli {
    /// Log verbosity on stderr (`-v` debug, `-vv` trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the SVG path data and arc length of the curve through a waypoint list.
    Path(PathArgs),
    /// Run a scenario on a simulated frame clock.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct PathArgs {
    /// Waypoints as space-separated `x,y` pairs.
    #[arg(long)]
    points: String,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input scenario JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Simulated frame rate.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Write every frame's render snapshot as JSON.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Path(args) => cmd_path(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_points(s: &str) -> anyhow::Result<Vec<routeglide::Point>> {
    s.split_whitespace()
        .map(|pair| {
            let (x, y) = pair
                .split_once(',')
                .with_context(|| format!("waypoint '{pair}' is not an x,y pair"))?;
            let x: f64 = x
                .trim()
                .parse()
                .with_context(|| format!("parse x of '{pair}'"))?;
            let y: f64 = y
                .trim()
                .parse()
                .with_context(|| format!("parse y of '{pair}'"))?;
            Ok(routeglide::Point::new(x, y))
        })
        .collect()
}

fn cmd_path(args: PathArgs) -> anyhow::Result<()> {
    let points = parse_points(&args.points)?;
    if points.len() > routeglide::MAX_WAYPOINTS {
        anyhow::bail!(
            "{} waypoints given, a route holds at most {}",
            points.len(),
            routeglide::MAX_WAYPOINTS
        );
    }

    let Some(curve) = routeglide::PathBuilder::build(&points) else {
        anyhow::bail!("a route needs at least 2 waypoints (got {})", points.len());
    };
    println!("{}", curve.svg_path_data());
    println!("length {:.3}", curve.total_length());
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let scenario = routeglide::Scenario::from_path(&args.in_path)
        .with_context(|| format!("load scenario '{}'", args.in_path.display()))?;
    let fps = routeglide::Fps::new(args.fps, 1)?;
    let trace = scenario.simulate(fps)?;

    for t in &trace.auxiliary_ms {
        eprintln!("auxiliary start at {t:.1} ms");
    }
    for t in &trace.transitions {
        eprintln!("{:>9.1} ms  {:?}", t.time_ms, t.state);
    }
    eprintln!("{} frames", trace.frames.len());

    if let Some(out) = &args.out {
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let f = File::create(out).with_context(|| format!("create '{}'", out.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(f), &trace)
            .with_context(|| format!("write trace '{}'", out.display()))?;
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}
