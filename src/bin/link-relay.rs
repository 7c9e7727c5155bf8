use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use link_relay::credentials;
use link_relay::server;
use link_relay::utils::config_loader;
use link_relay::utils::logging;
use link_relay::utils::logging::LogLevel;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "link-relay.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Read args, load YAML config
    // -------------------------------

    let args = Args::parse();
    let service_config = config_loader::run(&args.config).await?;
    logging::run(&service_config, args.log_level).await?;

    // -------------------------------
    // 2. Initialize credentials once
    //
    // A failed extraction is tolerated: the server still starts and
    // answers every request with the missing-configuration error until
    // restarted with a working artifact.
    // -------------------------------

    let provider = credentials::build_provider(&service_config.credentials);
    let creds = match provider.credentials() {
        Ok(creds) => {
            info!(v = creds.v, "credentials initialized");
            Some(creds)
        }
        Err(e) => {
            error!("could not initialize credentials: {e}");
            None
        }
    };

    // -------------------------------
    // 3. Start HTTP server
    // -------------------------------

    info!("Link relay starting...");
    server::server::start(&service_config.settings, creds).await
}
