//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};
use tally_core::Config;

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_encrypt: bool,
    static_dir: Option<&Path>,
    config: &Config,
) -> Result<()> {
    println!("🚀 Starting Tally web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }
    if !config.server.allowed_origins.is_empty() {
        println!(
            "   🌐 Allowed origins: {}",
            config.server.allowed_origins.join(", ")
        );
    }
    if no_encrypt {
        println!("   ⚠️  Encryption DISABLED (--no-encrypt)");
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(db_path, no_encrypt)?;

    let server_config = tally_server::ServerConfig {
        allowed_origins: config.server.allowed_origins.clone(),
        trend_months: config.reports.trend_months,
    };

    let static_dir_str = static_dir
        .map(|p| {
            p.to_str()
                .context("static_dir path must be valid UTF-8")
        })
        .transpose()?;
    tally_server::serve_with_config(db, host, port, static_dir_str, server_config).await?;

    Ok(())
}
