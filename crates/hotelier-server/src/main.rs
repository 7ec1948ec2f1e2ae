//! Hotelier operator binary — schema migrations and hotel inspection.

use std::process::ExitCode;

use chrono::Utc;
use hotelier_core::models::hotel::Hotel;
use hotelier_core::repository::HotelRepository;
use hotelier_core::service::SubscriptionSummary;
use hotelier_core::{HotelierError, HotelierResult};
use hotelier_db::DbManager;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::config::{Command, ServerConfig};

mod config;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShowOutput {
    hotel: Hotel,
    subscription: SubscriptionSummary,
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => e.exit(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "hotelier failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ServerConfig) -> HotelierResult<()> {
    let db = DbManager::connect(&config.db()).await?;

    match config.command {
        Command::Migrate => {
            db.migrate().await?;
            info!("Schema is up to date");
        }
        Command::Show { id } => show(&db, id).await?,
    }
    Ok(())
}

async fn show(db: &DbManager, id: Uuid) -> HotelierResult<()> {
    let hotel = db.hotels().get_by_id(id).await?;
    let subscription = SubscriptionSummary::of(&hotel, Utc::now());
    let output = serde_json::to_string_pretty(&ShowOutput {
        hotel,
        subscription,
    })
    .map_err(|e| HotelierError::Internal(e.to_string()))?;
    println!("{output}");
    Ok(())
}
