//! Serve command - run the upload web server.

use clap::Args;
use console::style;
use tracing::info;

use encom_server::AppState;

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Interface to bind (overrides config and ENCOM_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config and ENCOM_PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

pub async fn run(args: ServeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = super::load_config(config_path)?;

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    println!(
        "{} Serving invoice converter on http://{}",
        style("ℹ").blue(),
        config.bind_addr()
    );
    info!("Extraction anchor {:?}, sheet {:?}", config.extraction.anchor, config.export.sheet_name);

    let state = AppState::from_config(&config);
    encom_server::serve(&config.server, state).await?;

    Ok(())
}
