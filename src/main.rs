use anyhow::{Context, Result};
use clap::Parser;
use drivelab::{
    analysis::Analyzer,
    config::Config,
    engine::Generator,
    render::{BitmapSink, NullSink, PlotStyle, RenderSink},
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Time span of the generated data in seconds.
    #[arg(long)]
    duration: Option<f64>,

    /// Number of generated records.
    #[arg(long)]
    points: Option<usize>,

    /// Seed of the noise generator.
    #[arg(long)]
    seed: Option<u64>,

    /// Directory of the rendered plots.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Skip rendering the plots.
    #[arg(long)]
    no_plots: bool,
}

impl CLI {
    fn resolve_config(&self) -> Result<Config> {
        let mut cfg = match &self.config {
            Some(file) => {
                Config::from_file(file).with_context(|| format!("failed to load {file:?}"))?
            }
            None => Config::default(),
        };

        if let Some(duration) = self.duration {
            cfg.duration = duration;
        }
        if let Some(points) = self.points {
            cfg.points = points;
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        if let Some(out_dir) = &self.out_dir {
            cfg.output.dir = out_dir.clone();
        }
        if self.no_plots {
            cfg.output.plots = false;
        }

        cfg.validate().context("failed to validate config")?;
        Ok(cfg)
    }
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let cfg = args.resolve_config()?;
    log::info!("{cfg:#?}");

    if cfg.output.plots {
        let mut sink = BitmapSink::new(&cfg.output.dir, PlotStyle::default());
        quick_demo(&cfg, &mut sink)?;
    } else {
        quick_demo(&cfg, &mut NullSink)?;
    }

    Ok(())
}

fn quick_demo<S: RenderSink>(cfg: &Config, sink: &mut S) -> Result<Analyzer> {
    println!("=== Drive Integration Demo ===\n");

    let generator = match cfg.seed {
        Some(seed) => Generator::from_seed(seed),
        None => Generator::from_os_rng().context("failed to construct generator")?,
    };
    let mut analyzer = Analyzer::new(generator);

    println!("Generating sample drive data...");
    let data = analyzer
        .generate_sample_data(cfg.duration, cfg.points)
        .context("failed to generate sample data")?;
    println!("Generated {} data points", data.len());

    println!("\nAnalyzing data...");
    let results = analyzer.analyze_data().context("failed to analyze data")?;
    println!("{results}");

    println!("\nCreating visualizations...");
    analyzer
        .plot_velocity(sink, None)
        .context("failed to plot velocity")?;
    analyzer
        .plot_comprehensive(sink, None)
        .context("failed to plot overview")?;

    Ok(analyzer)
}
