// ABOUTME: Server binary for the meal plan generation service
// ABOUTME: Loads environment configuration, initializes logging, and serves HTTP until shutdown
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Meal Plan Server Binary
//!
//! Starts the HTTP API. All settings come from the environment; the flags
//! below override the bind address.

use anyhow::Result;
use clap::Parser;
use mealplan_server::{config::ServerConfig, logging, server::MealPlanServer};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "mealplan-server")]
#[command(about = "Meal plan generation API backed by an OpenAI-compatible model")]
pub struct Args {
    /// Override bind host
    #[arg(long)]
    host: Option<String>,

    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    info!("Starting meal plan server");
    info!("{}", config.summary());

    let server = MealPlanServer::from_config(config).await?;
    if let Err(e) = server.run().await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    Ok(())
}
