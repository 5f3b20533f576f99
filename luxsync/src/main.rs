use anyhow::Result;

use luxsync::engine::Engine;
use luxsync::logging::init_logging;
use luxsync::settings::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = match Settings::new() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            print_config_help();
            std::process::exit(1);
        }
    };

    if let Err(e) = settings.validate() {
        eprintln!("Configuration validation failed: {}", e);
        print_config_help();
        std::process::exit(1);
    }

    let foreground = !settings.app.start_in_background;
    let log_path = init_logging(foreground)?;
    tracing::info!("luxsync starting, logging to {}", log_path.display());

    let handle = Engine::from_settings(&settings)?.spawn();

    let printer = if foreground {
        let mut observations = handle.observations();
        Some(tokio::spawn(async move {
            loop {
                println!("status: {}", observations.borrow_and_update().display());
                if observations.changed().await.is_err() {
                    break;
                }
            }
        }))
    } else {
        None
    };

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");

    if let Some(printer) = printer {
        printer.abort();
    }
    handle.abort();

    Ok(())
}

fn print_config_help() {
    eprintln!("\nPlease create a luxsync.toml file (or set LUXSYNC_CONFIG) with:");
    eprintln!("\n[zoho]");
    eprintln!("client_id = \"...\"");
    eprintln!("client_secret = \"...\"");
    eprintln!("refresh_token = \"...\"");
    eprintln!("\n[luxafor]");
    eprintln!("user_id = \"...\"");
    eprintln!("\n[app]");
    eprintln!("start_in_background = false  # optional");
}
