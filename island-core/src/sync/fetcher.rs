// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Conditional HTTP fetcher
//!
//! Issues GET requests carrying `If-None-Match` when a validation tag is
//! known, and classifies the response as fresh content or "not modified".

use reqwest::header::{ETAG, IF_NONE_MATCH};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

use super::config::SyncConfig;

/// Outcome of a conditional GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conditional {
    /// 304: the tagged content is still current.
    NotModified,
    /// 2xx with a body and the tag to store for it, if any.
    Fresh {
        body: Vec<u8>,
        etag: Option<String>,
    },
}

/// Fetches resources from the content host
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    max_content_size: u64,
}

impl HttpFetcher {
    /// Create a new fetcher from config
    pub fn new(config: &SyncConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(format!(
            "SwiftIsland/{}",
            option_env!("CARGO_PKG_VERSION").unwrap_or("0.1.0")
        ));

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(proxy_url) = &config.proxy_url {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        Ok(Self {
            client: builder.build()?,
            max_content_size: config.max_content_size,
        })
    }

    /// GET `url`, sending `etag` as `If-None-Match` when present.
    pub async fn get_with_etag(
        &self,
        url: &Url,
        etag: Option<&str>,
    ) -> Result<Conditional, FetchError> {
        let mut request = self.client.get(url.clone());
        if let Some(etag) = etag {
            request = request.header(IF_NONE_MATCH, etag);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_MODIFIED {
            return Ok(Conditional::NotModified);
        }
        if !status.is_success() {
            return Err(FetchError::HttpError(status.as_u16()));
        }

        // Check content length before downloading
        if let Some(len) = response.content_length() {
            if len > self.max_content_size {
                return Err(FetchError::TooLarge {
                    size: len,
                    max: self.max_content_size,
                });
            }
        }

        let etag = response
            .headers()
            .get(ETAG)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?
            .to_vec();

        if body.len() as u64 > self.max_content_size {
            return Err(FetchError::TooLarge {
                size: body.len() as u64,
                max: self.max_content_size,
            });
        }

        Ok(Conditional::Fresh { body, etag })
    }
}

/// Errors that can occur during fetching
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP error with status code
    #[error("HTTP error: {0}")]
    HttpError(u16),

    /// Network/request error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Response body could not be read
    #[error("Unreadable body: {0}")]
    Body(String),

    /// Content too large
    #[error("Content too large: {size} bytes (max {max})")]
    TooLarge {
        /// Actual size in bytes
        size: u64,
        /// Maximum allowed size in bytes
        max: u64,
    },
}
