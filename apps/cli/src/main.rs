mod args;
mod config;
mod dirs;
mod logging;
mod report;

use std::io;
use std::time::Duration;

use co2_app::{AppError, AppPaths, AppState, Snapshot, ensure_app_data_dir};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = args::parse_args().map_err(|err| {
        eprintln!("{err}");
        args::print_help();
        io::Error::new(io::ErrorKind::InvalidInput, "invalid arguments")
    })?;
    logging::init_tracing(args.verbose);

    let config = config::load_or_create().map_err(io::Error::other)?;
    if config.created {
        info!("created config at {}", config.paths.file.display());
    }

    let data_dir = dirs::resolve_data_dir(args.data_dir.clone()).map_err(io::Error::other)?;
    if data_dir.matched_existing {
        info!("using existing data dir: {}", data_dir.dir.display());
    } else {
        info!("using data dir: {}", data_dir.dir.display());
    }

    let mut tracker_config = config.config.tracker.clone();
    if let Some(secs) = args.interval_secs {
        tracker_config.sample_interval_secs = secs;
    }

    let paths = AppPaths::new(data_dir.dir);
    ensure_app_data_dir(&paths).map_err(|err| io::Error::other(err.to_string()))?;
    let app_state = AppState::new(paths, tracker_config);
    let tracker = app_state
        .open_system_tracker()
        .map_err(|err| io::Error::other(format!("failed to start tracker: {}", err)))?;

    if let Some(pct) = args.target_pct {
        if let Err(err) = tracker.set_personal_target(pct) {
            eprintln!("{err}");
            std::process::exit(2);
        }
        println!("Personal reduction target set to {}%.", pct);
        print_snapshot(&tracker.get_snapshot(), args.json)?;
        return Ok(());
    }

    if let Some(code) = args.reset_code.as_deref() {
        match tracker.reset(code) {
            Ok(()) => println!("Reset successful! All tracked usage has been erased."),
            Err(AppError::ResetAuth) => {
                eprintln!("Incorrect code. Reset canceled.");
                std::process::exit(2);
            }
            Err(err) => return Err(io::Error::other(err.to_string()).into()),
        }
        return Ok(());
    }

    if args.once {
        print_snapshot(&tracker.get_snapshot(), args.json)?;
        return Ok(());
    }

    let tasks = tracker.start();
    let report_every = Duration::from_secs(config.config.report_interval_secs.max(1));
    let mut ticker = tokio::time::interval(report_every);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(err) = print_snapshot(&tracker.get_snapshot(), args.json) {
                    warn!("failed to print snapshot: {}", err);
                }
            }
            _ = &mut shutdown => {
                info!("shutting down");
                break;
            }
        }
    }

    tasks.shutdown();
    Ok(())
}

fn print_snapshot(snapshot: &Snapshot, json: bool) -> Result<(), AppError> {
    if json {
        println!("{}", snapshot.to_json()?);
    } else {
        println!("{}\n", report::render(snapshot));
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for ctrl-c: {}", err);
        std::future::pending::<()>().await;
    }
}
