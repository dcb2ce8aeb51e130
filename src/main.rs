// src/main.rs
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use nview::config::Config;
use nview::error::{NviewError, Result};
use nview::io::{load_ground_states, load_levels};
use nview::model::IsotopeLevels;
use nview::rendering::{detailed_level_scheme, export_svg, simplified_level_scheme};
use nview::utils::{logger, report};

/// Lays out the level scheme of one nuclide and writes it as JSON or SVG.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Level table (CSV with z, n, symbol, energy, jp, half_life, unit_hl).
    #[arg(long, value_name = "CSV")]
    levels: PathBuf,
    /// Ground-state table (CSV with z, n, symbol, sn, sp, ...).
    #[arg(long = "ground-states", value_name = "CSV")]
    ground_states: PathBuf,
    /// Proton number of the nuclide to show. Defaults to the first one in the table.
    #[arg(long, requires = "n")]
    z: Option<u32>,
    /// Neutron number of the nuclide to show.
    #[arg(long, requires = "z")]
    n: Option<u32>,
    /// Number of excitation groups.
    #[arg(long, value_name = "K", value_parser = clap::value_parser!(u32).range(1..))]
    clusters: Option<u32>,
    /// Most levels drawn in the simplified scheme.
    #[arg(long = "max-levels", value_name = "M")]
    max_levels: Option<usize>,
    /// Draw every level without capping or excitation bands.
    #[arg(long)]
    detailed: bool,
    /// Write the scheme as an SVG image.
    #[arg(long, value_name = "FILE")]
    svg: Option<PathBuf>,
    /// Write the scene JSON to a file instead of stdout.
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,
    /// Print a text summary of the nuclide to stderr.
    #[arg(long)]
    summary: bool,
    /// Log debug output.
    #[arg(short, long)]
    verbose: bool,
}

fn select(isotopes: Vec<IsotopeLevels>, z: Option<u32>, n: Option<u32>) -> Result<IsotopeLevels> {
    match (z, n) {
        (Some(z), Some(n)) => isotopes
            .into_iter()
            .find(|i| i.nuclide.z == z && i.nuclide.n == n)
            .ok_or(NviewError::MissingNuclide { z, n }),
        _ => isotopes.into_iter().next().ok_or(NviewError::EmptyLevelTable),
    }
}

fn run(cli: Cli) -> Result<()> {
    // 1. Settings, with command-line overrides
    let (mut config, status) = Config::load();
    log::debug!("{}", status);
    if let Some(k) = cli.clusters {
        config.layout.cluster_count = k as usize;
    }
    if let Some(m) = cli.max_levels {
        config.layout.max_levels = m;
    }

    // 2. Data
    let ground_states = load_ground_states(&cli.ground_states)?;
    let isotope = select(load_levels(&cli.levels)?, cli.z, cli.n)?;
    log::info!("Laying out {} ({} levels)", isotope.nuclide.name(), isotope.levels.len());

    if cli.summary {
        let gs = ground_states.get(isotope.nuclide.z, isotope.nuclide.n);
        eprint!("{}", report::level_summary(&isotope, gs));
    }

    // 3. Scene
    let scene = if cli.detailed {
        detailed_level_scheme(&ground_states, &isotope, &config.layout, &config.style)
    } else {
        simplified_level_scheme(&ground_states, &isotope, &config.layout, &config.style)
    };

    // 4. Outputs
    if let Some(path) = &cli.svg {
        export_svg(&scene, path, &config.export)?;
    }
    match &cli.json {
        Some(path) => {
            let file = std::io::BufWriter::new(std::fs::File::create(path)?);
            serde_json::to_writer_pretty(file, &scene)?;
            log::info!("Scene written to {:?}", path);
        }
        None if cli.svg.is_none() => {
            let mut out = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut out, &scene)?;
            writeln!(out)?;
        }
        None => {}
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    if let Err(e) = logger::init(level) {
        eprintln!("Logger already set: {}", e);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
