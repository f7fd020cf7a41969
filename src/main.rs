#[macro_use]
extern crate tracing;

use std::env;
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use directories::ProjectDirs;
use miette::Report;
use smithay::utils::{Point, Size};
use taskview::animation::Clock;
use taskview::headless::HeadlessHost;
use taskview::host::{MonitorId, WorkspaceId};
use taskview::layout::ViewStage;
use taskview::manager::Manager;
use taskview::utils::transform_from_code;
use taskview_config::Config;
use tracing_subscriber::EnvFilter;

const MONITOR: MonitorId = MonitorId(0);

#[derive(Parser)]
#[command(name = "taskview")]
#[command(about = "Workspace overview layout tools")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the config file and report errors
    Validate {
        /// Path to the config file, defaults to the user config directory
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the overview slots of a synthetic monitor
    Layout {
        /// Path to the config file, the defaults are used if unset
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Monitor mode size in pixels, e.g. 1920x1080
        #[arg(long)]
        size: ModeSize,
        #[arg(long, default_value_t = 1.)]
        scale: f64,
        /// Output transform code, 0 to 7
        #[arg(long, default_value_t = 0)]
        transform: u8,
        /// Comma-separated workspace ids on the monitor
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true, required = true)]
        workspaces: Vec<i64>,
        #[arg(long, value_enum, default_value_t = Stage::Open)]
        stage: Stage,
        /// Print the overview status as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Stage {
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy)]
struct ModeSize {
    w: f64,
    h: f64,
}

impl FromStr for ModeSize {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once('x')
            .ok_or_else(|| anyhow!("expected WIDTHxHEIGHT, got {s:?}"))?;
        let w: f64 = w.trim().parse().context("invalid width")?;
        let h: f64 = h.trim().parse().context("invalid height")?;
        if w <= 0. || h <= 0. {
            bail!("mode size must be positive, got {s:?}");
        }
        Ok(Self { w, h })
    }
}

fn main() -> anyhow::Result<()> {
    let directives = env::var("RUST_LOG").unwrap_or_else(|_| "taskview=debug".to_owned());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config } => {
            let path = match config {
                Some(path) => path,
                None => default_config_path()?,
            };

            load_config(&path);
            info!("config is valid");
            Ok(())
        }
        Commands::Layout {
            config,
            size,
            scale,
            transform,
            workspaces,
            stage,
            json,
        } => {
            let config = match config {
                Some(path) => load_config(&path),
                None => Config::default(),
            };
            print_layout(&config, size, scale, transform, &workspaces, stage, json)
        }
    }
}

fn default_config_path() -> anyhow::Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "taskview")
        .context("couldn't find the home directory to look for the config in")?;
    Ok(dirs.config_dir().join("config.kdl"))
}

/// Loads the config, printing the diagnostic and exiting on failure.
fn load_config(path: &Path) -> Config {
    let res = Config::load(path)
        .map_err(|err: Report| err.wrap_err(format!("couldn't load the config from {path:?}")));
    match res {
        Ok(config) => config,
        Err(err) => {
            error!("{err:?}");
            process::exit(1);
        }
    }
}

fn print_layout(
    config: &Config,
    size: ModeSize,
    scale: f64,
    transform: u8,
    workspaces: &[i64],
    stage: Stage,
    json: bool,
) -> anyhow::Result<()> {
    let Some(transform) = transform_from_code(transform) else {
        bail!("invalid transform {transform}, expected 0 to 7");
    };
    if scale <= 0. {
        bail!("scale must be positive, got {scale}");
    }

    let mut host = HeadlessHost::new();
    host.add_monitor(
        MONITOR,
        Point::from((0., 0.)),
        Size::from((size.w, size.h)),
        scale,
        transform,
    );
    for id in workspaces {
        host.add_workspace(WorkspaceId(*id), MONITOR);
    }

    let mut manager = Manager::new(Clock::with_time(Duration::ZERO), config);
    manager.reset(&host);

    let stage = match stage {
        Stage::Closed => ViewStage::Closed,
        Stage::Open => {
            manager.show_all(&mut host)?;
            ViewStage::Opened
        }
    };

    let Some(view) = manager.view_for_monitor_mut(MONITOR) else {
        bail!("no overview for the synthetic monitor");
    };
    view.refresh_layout(&host, stage)?;

    if json {
        let status = manager.status();
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    let Some(view) = manager.view_for_monitor(MONITOR) else {
        bail!("no overview for the synthetic monitor");
    };
    println!("layout: {}", view.layout_name());
    for slot in view.slots().iter() {
        let pending = if slot.pending { "*" } else { "" };
        let r = slot.rect;
        println!(
            "{}{pending}: ({}, {}) {:.1},{:.1} {:.1}x{:.1}",
            slot.id, slot.column, slot.row, r.loc.x, r.loc.y, r.size.w, r.size.h
        );
    }
    Ok(())
}
