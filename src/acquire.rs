use crate::error::{DeviceListError, Result};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Build the download client. Certificate checks are off: the feed is public, non-sensitive data.
pub fn build_client(timeout: Option<Duration>) -> reqwest::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().danger_accept_invalid_certs(true);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// GET `url` and return the body as UTF-8 text.
#[instrument(skip(client))]
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String> {
    let fetch_err = |source: reqwest::Error| DeviceListError::Fetch {
        url: url.to_string(),
        source,
    };

    let resp = client.get(url).send().await.map_err(fetch_err)?;
    let status = resp.status();
    if !status.is_success() {
        return Err(DeviceListError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let bytes = resp.bytes().await.map_err(fetch_err)?;
    debug!("Downloaded {} bytes", bytes.len());
    String::from_utf8(bytes.to_vec()).map_err(|source| DeviceListError::Decode {
        url: url.to_string(),
        source,
    })
}

/// Read a local CSV export as raw bytes; decoding is left to the CSV reader.
///
/// Missing files are reported before any open is attempted.
#[instrument(skip(path), fields(path = %path.display()))]
pub async fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    if !tokio::fs::try_exists(path).await? {
        return Err(DeviceListError::NotFound(path.to_path_buf()));
    }
    let bytes = tokio::fs::read(path).await?;
    info!("Read {} bytes from disk", bytes.len());
    Ok(bytes)
}
