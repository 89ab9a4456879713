//! cellname CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use cellname_cli::{Args, Outcome, error_adapter::to_reportable};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    // Usage errors exit with 1 like every other failure; --help and --version exit with 0
    let args = Args::try_parse().unwrap_or_else(|err| {
        let code = if err.use_stderr() { 1 } else { 0 };
        let _ = err.print();
        process::exit(code);
    });

    // Initialize the logger with the specified log level
    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting cellname");
    debug!(args:?; "Parsed arguments");

    // Run the application
    match cellname_cli::run(&args) {
        Ok(Outcome::Written(path)) => {
            println!("Written cleaned SVG to: {}", path.display());
        }
        Ok(Outcome::DryRun(assignments)) => {
            for assignment in &assignments {
                println!("{} -> {}", assignment.cell_id(), assignment.id());
            }
        }
        Err(err) => {
            let reporter = miette::GraphicalReportHandler::new();
            let mut writer = String::new();
            reporter
                .render_report(&mut writer, &to_reportable(&err))
                .expect("Writing to String buffer is infallible");

            // The diagnostic must reach the user even with logging turned off
            if log::max_level() == LevelFilter::Off {
                eprintln!("{writer}");
            } else {
                error!("{writer}");
            }
            process::exit(1);
        }
    }

    info!("Completed successfully");
}
