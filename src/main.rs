use actix_web::{middleware, web, App, HttpServer};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::sync::Arc;

mod conditions;
mod config;
mod error;
mod geocoding;
mod handlers;
mod models;
mod network;
mod service;
mod weather;

#[cfg(test)]
mod testing;

use crate::config::Config;
use crate::error::AppError;
use crate::geocoding::GeocodingClient;
use crate::service::WeatherService;
use crate::weather::ArchiveClient;

#[derive(Parser, Debug)]
#[command(author, version, about = "Historic Weather - daily weather lookup by date and place")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the web server
    Serve {
        /// Overrides PORT
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Look up one date/location and print the JSON result
    Lookup {
        #[arg(short, long)]
        date: String,
        #[arg(short, long)]
        location: String,
    },
    /// Print the host's LAN IPv4 address
    LanIp,
}

#[derive(Clone)]
pub struct AppState {
    pub service: WeatherService,
}

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;

    match cli.command {
        Some(Commands::Serve { port }) => {
            if let Some(port) = port {
                config.port = port;
            }
            let service = build_service(&config)?;
            start_server(&config, service).await?;
        }
        Some(Commands::Lookup { date, location }) => {
            let service = build_service(&config)?;
            let weather = service.get_weather(&date, &location).await?;
            println!("{}", serde_json::to_string_pretty(&weather)?);
        }
        Some(Commands::LanIp) => match network::lan_ipv4()? {
            Some(ip) => println!("{}", ip),
            None => println!("No LAN IP found"),
        },
        None => {
            let service = build_service(&config)?;
            start_server(&config, service).await?;
        }
    }

    Ok(())
}

fn build_service(config: &Config) -> Result<WeatherService, AppError> {
    let client = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()
        .map_err(|e| AppError::Http(format!("Failed to build HTTP client: {}", e)))?;

    Ok(WeatherService::new(
        Arc::new(GeocodingClient::new(client.clone(), config.geocoding_url.clone())),
        Arc::new(ArchiveClient::new(client, config.archive_url.clone())),
    ))
}

async fn start_server(config: &Config, service: WeatherService) -> Result<(), AppError> {
    info!("🚀 Historic Weather starting...");

    let host = match network::lan_ipv4()? {
        Some(ip) => ip.to_string(),
        None => {
            warn!("⚠️  No LAN IP found, serving on all interfaces only");
            "0.0.0.0".to_string()
        }
    };

    let app_state = AppState { service };

    let (server, port) = bind_with_retry(config.port, config.port_attempts, |port| {
        info!("🌐 Trying to start server on host {}, port {}", host, port);
        let state = app_state.clone();
        HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(state.clone()))
                .wrap(handlers::cors_headers())
                .wrap(middleware::Logger::default())
                .configure(handlers::configure_routes)
        })
        .bind(("0.0.0.0", port))
    })?;

    info!("✅ Listening on http://{}:{}", host, port);
    server.run().await?;

    Ok(())
}

/// Tries `attempts` consecutive ports starting at `start`, returning the first
/// successful bind and the port it landed on.
fn bind_with_retry<T, F>(start: u16, attempts: u16, mut bind: F) -> Result<(T, u16), AppError>
where
    F: FnMut(u16) -> std::io::Result<T>,
{
    let mut port = start;
    let mut remaining = attempts.max(1);

    loop {
        match bind(port) {
            Ok(bound) => return Ok((bound, port)),
            Err(e) => {
                warn!("❌ Port {} in use or failed: {}", port, e);
                remaining -= 1;
                if remaining == 0 {
                    return Err(AppError::Io(e));
                }
                port = port.checked_add(1).ok_or_else(|| {
                    AppError::Config(format!("No ports left above {} to try", port))
                })?;
            }
        }
    }
}
