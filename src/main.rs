use std::path::PathBuf;

use trash_sweep::cli::Cli;
use trash_sweep::platform;
use trash_sweep::report::{ConsoleObserver, Severity, SweepObserver, DRY_RUN_NOTE};
use trash_sweep::Sweeper;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_normalized();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.thresholds()?;
    let mut observer = ConsoleObserver::new();

    let roots: Vec<PathBuf> = if cli.roots.is_empty() {
        match platform::discover_trash_roots(&mut observer) {
            Ok(roots) => roots,
            Err(e) => {
                observer.diagnostic(Severity::Warning, &e.to_string());
                Vec::new()
            }
        }
    } else {
        cli.roots.clone()
    };

    let sweeper = Sweeper::new(config.clone());
    let result = sweeper.sweep_all(roots, &mut observer);

    println!("\n");
    println!("{}", result.display_status());

    if !config.destroy {
        println!("\n{}", DRY_RUN_NOTE);
    }
    Ok(())
}
