use anyhow::{Context, Result};
use clap::Parser;
use task_server::{
    config::Config,
    ensure_database_directory, init_telemetry, initialize_app,
    telemetry::{log_shutdown_info, log_startup_info, report_error},
    App,
};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "tasks-server")]
#[command(about = "Family task tracking server")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CONFIG_FILE")]
    config: Option<String>,

    /// Database URL override
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Listen address override
    #[arg(long, env = "LISTEN_ADDR")]
    listen_addr: Option<String>,

    /// Port override
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level override
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;

    if let Some(ref database_url) = cli.database_url {
        config.database.url = Some(database_url.clone());
    }

    if let Some(ref listen_addr) = cli.listen_addr {
        config.server.listen_addr = listen_addr.clone();
    }

    if let Some(port) = cli.port {
        config.server.port = port;
    }

    if let Some(ref log_level) = cli.log_level {
        config.logging.level = log_level.clone();
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let config = load_config(&cli).context("Failed to load configuration")?;

    init_telemetry(&config.logging).context("Failed to initialize telemetry")?;

    if let Err(e) = config.validate() {
        error!(error = %e, "Configuration validation failed");
        std::process::exit(1);
    }

    log_startup_info(&config);

    ensure_database_directory(&config.database_url())
        .context("Failed to create database directory")?;

    // No database, nothing to serve
    let App { repository, server } = match initialize_app(&config).await {
        Ok(app) => app,
        Err(e) => {
            report_error(&e, "startup");
            std::process::exit(2);
        }
    };

    let mut running = match server.start(&config.server_address()).await {
        Ok(running) => running,
        Err(e) => {
            error!(error = %e, address = %config.server_address(), "Failed to start listener");
            repository.database().close().await;
            std::process::exit(3);
        }
    };

    let outcome = tokio::select! {
        failure = running.failed() => Err(failure),
        signal = tokio::signal::ctrl_c() => {
            match signal {
                Ok(()) => info!("Received interrupt, initiating graceful shutdown"),
                Err(e) => warn!(error = %e, "Failed to listen for interrupt, shutting down"),
            }
            Ok(())
        }
    };

    log_shutdown_info(&config);

    if let Err(e) = running.stop(config.shutdown_timeout()).await {
        warn!(error = %e, "Listener did not stop cleanly");
    }

    repository.database().close().await;

    if let Err(e) = outcome {
        error!(error = %e, "Task server failed");
        std::process::exit(3);
    }

    info!("Task server shut down cleanly");
    Ok(())
}
