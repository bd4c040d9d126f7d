//! NetBox Sync
//!
//! Reads the JSON invocation payload from the file named by `SYNC_INPUT`
//! (stdin when unset) and the NMS inventory snapshot from `NMS_SNAPSHOT`,
//! then reconciles the configured device group into NetBox.

use anyhow::{Context, bail};
use nms_source::SnapshotSource;
use std::env;
use std::io::Read;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting NetBox Sync");

    let input = match env::var("SYNC_INPUT") {
        Ok(path) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read sync input {}", path))?,
        Err(_) => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("failed to read sync input from stdin")?;
            input
        }
    };

    let snapshot_path = env::var("NMS_SNAPSHOT")
        .context("NMS_SNAPSHOT environment variable is required")?;
    let source = SnapshotSource::from_path(&snapshot_path)
        .await
        .with_context(|| format!("failed to load NMS snapshot {}", snapshot_path))?;

    if !netbox_sync::run(&input, &source).await? {
        bail!("sync finished with errors");
    }

    info!("NetBox Sync finished");
    Ok(())
}
