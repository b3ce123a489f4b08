//! Notebook retrieval over HTTP.
//!
//! [`HttpClient`] is the seam between the pipeline and the network; the
//! production implementation is a blocking `reqwest` client.

use reqwest::blocking::Client;

use crate::diagnostics::Diagnostics;
use crate::error::{Result, ViewerError};
use crate::options::FetchOptions;

/// A completed HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub text: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Minimal HTTP client used by the fetcher.
pub trait HttpClient {
    /// Issue one GET request. Transport failures map to
    /// [`ViewerError::Network`]; the status is returned as-is.
    fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// Blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: Client,
}

impl ReqwestClient {
    /// Build a client from fetch options.
    pub fn new(options: &FetchOptions) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = options.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &options.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        if options.no_proxy {
            builder = builder.no_proxy();
        }
        let inner = builder
            .build()
            .map_err(|e| ViewerError::ClientSetup(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        let network_error = |e: reqwest::Error| ViewerError::Network {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.inner.get(url).send().map_err(network_error)?;
        let status = response.status().as_u16();
        let text = response.text().map_err(network_error)?;

        Ok(HttpResponse { status, text })
    }
}

/// Fetch the notebook text at `url`.
///
/// The URL scheme is not checked. There is exactly one request and no retry;
/// a non-success status fails with [`ViewerError::HttpStatus`].
pub fn fetch_notebook<C: HttpClient + ?Sized>(
    client: &C,
    url: &str,
    diag: &mut Diagnostics,
) -> Result<String> {
    diag.info(format!("Fetching URL: {}", url));

    let response = client.get(url)?;
    if !response.is_success() {
        return Err(ViewerError::HttpStatus {
            url: url.to_string(),
            status: response.status,
        });
    }

    diag.debug(format!(
        "Fetched {} bytes from {}",
        response.text.len(),
        url
    ));
    Ok(response.text)
}
