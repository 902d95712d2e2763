//! HTTP retrieval of source workbooks.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Method, Request, Response};
use tracing::debug;

/// Seam for HTTP execution so downloads can be stubbed in tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}

/// Plain `reqwest`-backed client for unauthenticated downloads.
pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new() -> Self {
        Self(reqwest::Client::new())
    }
}

impl Default for BasicClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: Request) -> reqwest::Result<Response> {
        self.0.execute(req).await
    }
}

/// Downloads the workbook at `url` and returns its raw bytes. Non-success
/// status codes are errors.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = Request::new(Method::GET, url.parse()?);
    let resp = client.execute(req).await?.error_for_status()?;
    let bytes = resp.bytes().await?;

    debug!(url, bytes = bytes.len(), "Workbook downloaded");
    Ok(bytes.to_vec())
}
