use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use sync_latency::{
    app::App,
    cli::{Cli, Command, InputArgs, PlotArgs, RecordArgs},
    config::PlotConfig,
    recorder::{self, RecordOptions},
    report, series, ui, MeasurementSeries, Primitive,
};
use tracing_subscriber::EnvFilter;

fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn load_inputs(args: &InputArgs) -> Result<(PlotConfig, Vec<(Primitive, MeasurementSeries)>)> {
    let config = PlotConfig::resolve(args.config.as_deref(), args.overrides())?;

    let mut loaded = Vec::with_capacity(2);
    for (primitive, path) in [(Primitive::Mutex, &args.mutex), (Primitive::Semaphore, &args.semaphore)] {
        let data = series::load(path).with_context(|| format!("loading {} capture", primitive))?;
        loaded.push((primitive, data));
    }
    Ok((config, loaded))
}

fn run_report(args: &InputArgs) -> Result<()> {
    let (config, loaded) = load_inputs(args)?;
    let pairs: Vec<_> = loaded.iter().map(|(p, s)| (*p, s)).collect();
    print!("{}", report::render(&pairs, &config)?);
    Ok(())
}

fn run_plot(args: &PlotArgs) -> Result<()> {
    let (config, loaded) = load_inputs(&args.input)?;
    let app = App::new(loaded, config, args.view.into())?;
    ui::run(app).context("terminal UI failed")?;
    Ok(())
}

fn run_record(args: &RecordArgs) -> Result<()> {
    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed))
            .context("installing Ctrl-C handler")?;
    }

    let options = RecordOptions {
        duration: Duration::from_secs(args.duration),
        interval: Duration::from_micros(args.interval_us),
    };

    let mut recorded = Vec::with_capacity(2);
    for primitive in Primitive::ALL {
        println!("Measuring {} latencies for {} seconds...", primitive.label().to_uppercase(), args.duration);
        let data = recorder::measure(primitive, &options, &stop);
        recorder::save(&data, args.out_dir.join(primitive.file_name()))?;
        recorded.push((primitive, data));
    }

    // An interrupted run can leave a primitive without samples
    let pairs: Vec<_> = recorded
        .iter()
        .filter(|(_, s)| !s.is_empty())
        .map(|(p, s)| (*p, s))
        .collect();
    print!("{}", report::render(&pairs, &PlotConfig::default())?);
    println!(
        "\nTemporal data saved to {} and {}",
        args.out_dir.join(Primitive::Mutex.file_name()).display(),
        args.out_dir.join(Primitive::Semaphore.file_name()).display()
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match &cli.command {
        Command::Plot(args) => run_plot(args),
        Command::Report(args) => run_report(args),
        Command::Record(args) => run_record(args),
    }
}
