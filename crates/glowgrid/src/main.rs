mod cli;
mod run_flag;
mod show;
mod sink;

use std::path::Path;

use clap::Parser;
use color_eyre::eyre::{OptionExt, WrapErr};
use glowgrid_animations::FrameLoop;
use glowgrid_config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, PlayArgs};
use crate::run_flag::RunFlag;
use crate::sink::{LogSink, TerminalSink, quit_requested};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    match cli.command.unwrap_or_default() {
        Command::Play(args) => {
            let mut config = load_config(cli.config.as_deref())?;
            args.apply(&mut config);
            config.validate()?;
            init_tracing(if args.headless { "info" } else { "warn" });
            play(&config, &args)
        }
        Command::Stop => {
            let config = load_config(cli.config.as_deref())?;
            let path = config
                .show
                .run_flag
                .ok_or_eyre("no run flag is configured")?;
            RunFlag::new(&path)
                .lower()
                .wrap_err_with(|| format!("cannot remove {}", path.display()))?;
            println!("stopped show at {}", path.display());
            Ok(())
        }
        Command::Config { save } => {
            let config = load_config(cli.config.as_deref())?;
            print!("{}", config.to_toml()?);
            if save {
                let path = match cli.config {
                    Some(path) => path,
                    None => Config::default_path().ok_or_eyre("no config directory")?,
                };
                config.save(&path)?;
                eprintln!("saved to {}", path.display());
            }
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> color_eyre::Result<Config> {
    Config::load(path).wrap_err("cannot load configuration")
}

/// Log to stderr, filtered by `RUST_LOG` or `default`.
fn init_tracing(default: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn play(config: &Config, args: &PlayArgs) -> color_eyre::Result<()> {
    let run_flag = config.show.run_flag.as_ref().map(RunFlag::new);
    if let Some(flag) = &run_flag {
        flag.raise()
            .wrap_err_with(|| format!("cannot create run flag {}", flag.path().display()))?;
    }
    let lowered = || run_flag.as_ref().is_some_and(|flag| !flag.is_raised());

    let seed = config.show.seed.unwrap_or_else(|| fastrand::u64(..));
    info!(seed, "seeding animations");
    let mut rng = fastrand::Rng::with_seed(seed);

    let frame_loop = FrameLoop::new(show::renderer(config), config.frame_interval())?;

    let summary = if args.headless {
        let mut sink = LogSink::default();
        let result = show::play(config, &frame_loop, &mut rng, &mut sink, || Ok(lowered()));
        info!(frames = sink.frames(), "headless sink closed");
        result
    } else {
        let mut sink = TerminalSink::new(ratatui::init());
        let result = show::play(config, &frame_loop, &mut rng, &mut sink, || {
            Ok(lowered() || quit_requested()?)
        });
        ratatui::restore();
        result
    };

    if let Some(flag) = &run_flag {
        flag.lower()?;
    }
    let summary = summary?;
    info!(
        animations = summary.animations,
        frames = summary.frames,
        cancelled = summary.cancelled,
        "show finished"
    );
    Ok(())
}
