use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Proxy;
use thiserror::Error;

use crate::model::Record;

pub const DEFAULT_SOURCE_URL: &str =
    "https://geektrust.s3-ap-southeast-1.amazonaws.com/adminui-problem/members.json";

#[derive(Clone, Debug)]
pub enum RecordSource {
    Url(String),
    FilePath(String),
    Inline(Vec<Record>),
}

#[derive(Clone, Debug, Default)]
pub struct FetchOptions {
    // None waits on the transport for as long as it takes
    pub timeout_seconds: Option<usize>,
    pub proxy: Option<String>,
    pub header: Option<String>,
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to setup proxy: {proxy}: {source}")]
    ProxySetup {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid header '{header}', expected 'Key: Value'")]
    InvalidHeader { header: String },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read records file: {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed records payload from {origin}: {source}")]
    Decode {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

// one-shot fetch; no retry, no cancellation
pub async fn fetch_all(
    source: &RecordSource,
    options: &FetchOptions,
) -> Result<Vec<Record>, SourceError> {
    match source {
        RecordSource::Inline(records) => Ok(records.clone()),
        RecordSource::FilePath(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| SourceError::FileRead {
                    path: path.clone(),
                    source,
                })?;
            decode_records(&raw, path)
        }
        RecordSource::Url(url) => {
            let client = build_client(options)?;
            tracing::info!(url = %url, "fetching records");
            let response = client
                .get(url)
                .send()
                .await
                .map_err(|source| SourceError::Request {
                    url: url.clone(),
                    source,
                })?;
            let status = response.status();
            if !status.is_success() {
                return Err(SourceError::Status {
                    url: url.clone(),
                    status: status.as_u16(),
                });
            }
            let body = response
                .text()
                .await
                .map_err(|source| SourceError::Request {
                    url: url.clone(),
                    source,
                })?;
            decode_records(&body, url)
        }
    }
}

pub fn decode_records(raw: &str, origin: &str) -> Result<Vec<Record>, SourceError> {
    serde_json::from_str::<Vec<Record>>(raw).map_err(|source| SourceError::Decode {
        origin: origin.to_string(),
        source,
    })
}

fn build_client(options: &FetchOptions) -> Result<reqwest::Client, SourceError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        reqwest::header::USER_AGENT,
        HeaderValue::from_static(concat!("adminlist/", env!("CARGO_PKG_VERSION"))),
    );
    if let Some(raw) = options.header.as_deref().filter(|h| !h.trim().is_empty()) {
        let (name, value) = parse_header(raw)?;
        headers.insert(name, value);
    }

    let mut builder = reqwest::Client::builder().default_headers(headers);
    if let Some(secs) = options.timeout_seconds.filter(|s| *s > 0) {
        builder = builder.timeout(Duration::from_secs(secs as u64));
    }
    if let Some(proxy) = options.proxy.as_deref().filter(|p| !p.trim().is_empty()) {
        let proxy_cfg = Proxy::all(proxy).map_err(|source| SourceError::ProxySetup {
            proxy: proxy.to_string(),
            source,
        })?;
        builder = builder.proxy(proxy_cfg);
    }
    builder
        .build()
        .map_err(|source| SourceError::HttpClientBuild { source })
}

fn parse_header(raw: &str) -> Result<(HeaderName, HeaderValue), SourceError> {
    let invalid = || SourceError::InvalidHeader {
        header: raw.to_string(),
    };
    let (name, value) = raw.split_once(':').ok_or_else(invalid)?;
    let name = HeaderName::from_bytes(name.trim().as_bytes()).map_err(|_| invalid())?;
    let value = HeaderValue::from_str(value.trim()).map_err(|_| invalid())?;
    Ok((name, value))
}
