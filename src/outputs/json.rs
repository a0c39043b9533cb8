//! JSON output for the view layer.
//!
//! Pages go to stdout by default so the driver composes with other tools;
//! logs are written to stderr and never mix with the document.

use crate::models::Page;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument};

/// Serialize `page` as JSON.
pub fn page_to_json(page: &Page, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(page)
    } else {
        serde_json::to_string(page)
    }
}

/// Write `page` to `output`, or to stdout when no path is given.
///
/// The parent directory of `output` is created if it does not exist.
#[instrument(level = "info", skip(page))]
pub async fn write_page(page: &Page, output: Option<&str>, pretty: bool) -> Result<(), Box<dyn Error>> {
    let json = page_to_json(page, pretty)?;

    match output {
        Some(path) => {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).await?;
                }
            }
            fs::write(path, json).await?;
            info!(%path, "Wrote page JSON");
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(json.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}
