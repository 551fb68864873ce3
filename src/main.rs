//! Roto Bounce headless runner
//!
//! Loads settings, runs the simulation for the configured duration and
//! optionally writes every frame as JSON lines for an external renderer.
//!
//! Usage: roto-bounce [SETTINGS.json] [--record OUT.jsonl] [--stride N] [--print-config]

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

use roto_bounce::sim::tick;
use roto_bounce::{Recording, SimConfig};

#[derive(Debug, Default)]
struct Args {
    settings: Option<PathBuf>,
    record: Option<PathBuf>,
    stride: u64,
    print_config: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        stride: 1,
        ..Default::default()
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--record" => {
                let path = iter.next().ok_or("--record needs a file path")?;
                args.record = Some(PathBuf::from(path));
            }
            "--stride" => {
                let n = iter.next().ok_or("--stride needs a number")?;
                args.stride = n.parse().map_err(|_| format!("invalid stride: {n}"))?;
            }
            "--print-config" => args.print_config = true,
            flag if flag.starts_with("--") => return Err(format!("unknown flag: {flag}")),
            path => {
                if args.settings.is_some() {
                    return Err(format!("unexpected argument: {path}"));
                }
                args.settings = Some(PathBuf::from(path));
            }
        }
    }
    Ok(args)
}

fn run(args: Args) -> roto_bounce::Result<()> {
    let config = match &args.settings {
        Some(path) => SimConfig::load(path)?,
        None => {
            log::info!("No settings file given, using the reference scenario");
            SimConfig::default()
        }
    };

    if args.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let mut sim = config.build()?;
    let total = config.total_steps();
    log::info!(
        "Running {} steps: {} container ({} vertices), ball radius {}, {} rad/step",
        total,
        config.shape.as_str(),
        sim.polygon().len(),
        sim.ball().radius,
        sim.angular_velocity()
    );

    let mut recording = args.record.as_ref().map(|_| Recording::with_stride(args.stride));
    for _ in 0..total {
        let report = tick(&mut sim);
        if let Some(recording) = recording.as_mut() {
            recording.record(&sim, &report);
        }
    }

    let stats = sim.stats();
    log::info!(
        "Done: {} steps, {} edge collisions, {} recentres",
        stats.steps,
        stats.collisions,
        stats.recentres
    );
    if stats.recentres > 0 {
        log::warn!(
            "Ball escaped {} times; lower the speed or rotation rate",
            stats.recentres
        );
    }
    log::info!(
        "Final ball position {:?}, speed {:.4}",
        sim.ball().pos,
        sim.ball().speed()
    );

    if let (Some(path), Some(recording)) = (&args.record, &recording) {
        let file = File::create(path)?;
        recording.write_json_lines(BufWriter::new(file))?;
        log::info!("Recording saved to {}", path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            log::error!("{msg}");
            eprintln!("Usage: roto-bounce [SETTINGS.json] [--record OUT.jsonl] [--stride N] [--print-config]");
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
