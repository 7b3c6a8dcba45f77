use anyhow::{Context, Error};
use clap::Parser;
use herald_core::logging::{init_logging, shutdown_logging};
use herald_core::scenario::{Replay, Scenario, StepReport};
use herald_core::scene::RegistryOp;
use herald_core::settings::Settings;
use std::path::{Path, PathBuf};

/// Replay a navigation bar scenario and print the bar after every step.
#[derive(Parser, Debug)]
#[command(name = "herald", version, about)]
struct Cli {
    /// Scenario file (TOML)
    scenario: PathBuf,

    /// Settings file with logging and theme sections
    #[arg(long, default_value = "Settings.toml")]
    settings: PathBuf,

    /// Also print every registry write
    #[arg(long)]
    journal: bool,
}

fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    let settings = Settings::load(&cli.settings)
        .with_context(|| format!("can't load settings from {}", cli.settings.display()))?;
    let base = cli
        .settings
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let session = init_logging(&settings.logging, base)?;

    let result = run(&cli, settings);
    if let Err(err) = &result {
        tracing::error!(error = ?err, "replay failed");
    }

    shutdown_logging(session);
    result
}

fn run(cli: &Cli, settings: Settings) -> Result<(), Error> {
    let span = tracing::info_span!("replay", scenario = %cli.scenario.display());
    let _entered = span.enter();

    let scenario = Scenario::load(&cli.scenario)?;
    tracing::info!(steps = scenario.steps.len(), journal = cli.journal, "scenario loaded");

    let mut replay = if cli.journal {
        Replay::with_journal(settings.theme)
    } else {
        Replay::new(settings.theme)
    };
    let reports = replay.run(&scenario)?;

    for (index, report) in reports.iter().enumerate() {
        print_report(index + 1, report);
    }

    if cli.journal {
        println!("registry journal:");
        for op in replay.stack().registry().journal() {
            match op {
                RegistryOp::Set(route, payload) => {
                    println!("  set   {route} {}", serde_json::to_string(&payload)?)
                }
                RegistryOp::Clear(route) => println!("  clear {route}"),
            }
        }
    }

    Ok(())
}

fn print_report(number: usize, report: &StepReport) {
    let route = report
        .active_route
        .as_ref()
        .map(|route| route.to_string())
        .unwrap_or_else(|| "-".to_string());

    println!(
        "{number:>3}. {} [route: {route}, writes: {}]",
        report.step, report.writes
    );

    if report.frame.is_empty() {
        println!("     (no navigation bar)");
    }

    for line in report.frame.lines() {
        println!("     {line}");
    }
}
