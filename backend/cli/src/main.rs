mod demo;
mod image_input;
mod terminal_output;

use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use oravision_config::{redact, OravisionConfig};
use oravision_core::FeatureKind;
use oravision_gateway::{GatewayState, start_server};
use oravision_logging::init_logger;
use oravision_responder::OraClient;
use oravision_understanding::VisionAdapter;

#[derive(Parser)]
#[command(name = "oravision")]
#[command(about = "Oravision: image analysis with natural-language answers")]
#[command(version)]
struct Cli {
    /// Never call the vision service; answer from fixture analyses
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
        /// Address to bind the HTTP server to
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Analyze an image and print the result as JSON
    Analyze {
        /// URL, data: URL, or local image file
        image: String,
        /// Detection features, e.g. LABEL_DETECTION,TEXT_DETECTION
        #[arg(short, long, value_delimiter = ',')]
        features: Vec<String>,
    },
    /// Analyze an image and answer a question about it
    Ask {
        /// URL, data: URL, or local image file
        image: String,
        query: String,
        #[arg(short, long, value_delimiter = ',')]
        features: Vec<String>,
    },
    /// Run the bundled sample questions end to end
    Demo,
    /// Query the health endpoint of a running server
    Status {
        /// Base URL of the server; defaults to the configured port on localhost
        #[arg(long)]
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = OravisionConfig::from_env();
    init_logger(&config.logging.level, config.logging.log_dir.as_deref());

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, bind } => {
            let mut config = config;
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(bind) = bind {
                config.server.bind_address = bind;
            }
            run_server(config, cli.offline).await?;
        }
        Commands::Analyze { image, features } => {
            let vision = vision_adapter(&config, cli.offline)?;
            let features = FeatureKind::parse_list(&features)?;
            let image = image_input::resolve(&image)?;
            let result = vision.analyze(&image, &features).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Ask { image, query, features } => {
            let vision = vision_adapter(&config, cli.offline)?;
            let ora = OraClient::simulated(&config.ora);
            let features = FeatureKind::parse_list(&features)?;
            let image = image_input::resolve(&image)?;
            let analysis = vision.analyze(&image, &features).await?;
            let answer = ora.ask(&analysis, &query).await;
            match answer.text() {
                Some(text) => println!("{text}"),
                None => terminal_output::note_error(answer.error_message().unwrap_or("no answer")),
            }
        }
        Commands::Demo => {
            let vision = vision_adapter(&config, cli.offline)?;
            let ora = OraClient::simulated(&config.ora);
            demo::run(&vision, &ora).await?;
        }
        Commands::Status { url } => {
            let base = url.unwrap_or_else(|| format!("http://127.0.0.1:{}", config.server.port));
            check_status(&base).await?;
        }
    }

    Ok(())
}

fn vision_adapter(config: &OravisionConfig, offline: bool) -> Result<VisionAdapter> {
    if offline {
        info!("Offline mode, serving fixture analyses");
        return Ok(VisionAdapter::fixtures_only());
    }
    Ok(VisionAdapter::from_config(&config.vision)?)
}

/// Bare IPv4 or IPv6 address plus port; `::` binds all IPv6 interfaces.
fn bind_addr(bind: &str, port: u16) -> Result<SocketAddr> {
    let ip: IpAddr = bind
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .parse()
        .with_context(|| format!("invalid bind address {bind}"))?;
    Ok(SocketAddr::new(ip, port))
}

async fn run_server(config: OravisionConfig, offline: bool) -> Result<()> {
    let addr = bind_addr(&config.server.bind_address, config.server.port)?;
    info!(
        addr = %addr,
        ora_url = %config.ora.api_url,
        "Starting Oravision"
    );

    debug!(config = %redact(&config), "Effective configuration");

    let vision = vision_adapter(&config, offline)?;
    let state = GatewayState::new(vision, OraClient::simulated(&config.ora));
    start_server(addr, state).await
}

async fn check_status(base: &str) -> Result<()> {
    let url = format!("{}/api/health", base.trim_end_matches('/'));
    match reqwest::get(&url).await {
        Ok(resp) if resp.status().is_success() => {
            let body: serde_json::Value = resp.json().await?;
            terminal_output::note_success(&format!("Oravision is running at {base}"));
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Ok(resp) => {
            terminal_output::note_warn(&format!("{url} answered with {}", resp.status()));
        }
        Err(_) => {
            terminal_output::note_error(&format!("Oravision is not running at {base}"));
        }
    }
    Ok(())
}
