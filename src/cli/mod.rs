//! CLI module for Multiverse Atlas
//!
//! Provides subcommands:
//! - `serve`: HTTP API server
//! - `index`: embed characters into the search index
//! - `search`: run a semantic query against the index
//! - `cache`: sweep expired or clear all cached upstream responses

pub mod cache;
pub mod index;
pub mod search;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Multiverse Atlas - Rick and Morty API aggregation and semantic search
#[derive(Parser)]
#[command(name = "multiverse-atlas")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Index characters for semantic search
    Index(index::IndexArgs),

    /// Search indexed characters by meaning
    Search(search::SearchArgs),

    /// Maintain the upstream response cache
    Cache(cache::CacheArgs),
}

/// Loads `.env`, then configuration, then installs logging
pub(crate) fn bootstrap() -> AppConfig {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration, using defaults: {}", e);
        AppConfig::default()
    });
    logging::init_logging(&logging::LoggingConfig::from(&config.logging));

    config
}
