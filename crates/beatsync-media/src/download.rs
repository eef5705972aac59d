//! Streaming HTTP download of generated media.
//!
//! Provider output is fetched as a byte stream and copied straight to disk,
//! never buffered whole in memory. A failed transfer leaves nothing behind.

use futures_util::StreamExt;
use reqwest::Client;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::error::{MediaError, MediaResult};

/// Stream a remote file to `dest`, returning the number of bytes written.
///
/// On any failure the partial file at `dest` is removed before the error is
/// returned.
pub async fn fetch_to_file(
    client: &Client,
    url: &str,
    dest: impl AsRef<Path>,
) -> MediaResult<u64> {
    let dest = dest.as_ref();

    match stream_to_file(client, url, dest).await {
        Ok(bytes) => {
            info!(
                url = %url,
                dest = %dest.display(),
                size_mb = bytes as f64 / (1024.0 * 1024.0),
                "Downloaded media"
            );
            Ok(bytes)
        }
        Err(e) => {
            if dest.exists() {
                if let Err(rm) = tokio::fs::remove_file(dest).await {
                    warn!(
                        dest = %dest.display(),
                        error = %rm,
                        "Failed to remove partial download"
                    );
                }
            }
            Err(e)
        }
    }
}

async fn stream_to_file(client: &Client, url: &str, dest: &Path) -> MediaResult<u64> {
    debug!(url = %url, "Opening download stream");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| MediaError::download_failed(format!("request failed: {e}")))?;

    if !response.status().is_success() {
        return Err(MediaError::download_failed(format!(
            "source responded with {}",
            response.status()
        )));
    }

    let mut file = File::create(dest).await?;
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk =
            chunk.map_err(|e| MediaError::download_failed(format!("stream interrupted: {e}")))?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    file.flush().await?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_streams_body_to_disk() {
        let server = MockServer::start().await;
        let body = vec![7u8; 64 * 1024];
        Mock::given(method("GET"))
            .and(path("/clip.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("clip.mp4");
        let client = Client::new();

        let written = fetch_to_file(&client, &format!("{}/clip.mp4", server.uri()), &dest)
            .await
            .unwrap();

        assert_eq!(written, body.len() as u64);
        assert_eq!(tokio::fs::read(&dest).await.unwrap(), body);
    }

    #[tokio::test]
    async fn test_failed_download_removes_partial_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/clip.mp4"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("clip.mp4");
        tokio::fs::write(&dest, b"stale partial data").await.unwrap();

        let client = Client::new();
        let err = fetch_to_file(&client, &format!("{}/clip.mp4", server.uri()), &dest)
            .await
            .unwrap_err();

        assert!(matches!(err, MediaError::DownloadFailed { .. }));
        assert!(!dest.exists(), "partial file must be removed");
    }

    #[tokio::test]
    async fn test_unreachable_source_is_download_error() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("clip.mp4");
        let client = Client::new();

        let err = fetch_to_file(&client, "http://127.0.0.1:1/clip.mp4", &dest)
            .await
            .unwrap_err();

        assert!(matches!(err, MediaError::DownloadFailed { .. }));
        assert!(!dest.exists());
    }
}
