use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

use crate::controller::{ListController, Notifier};
use crate::model::Record;
use crate::source::{self, FetchOptions, RecordSource, SourceError};

#[derive(Clone, Debug)]
pub struct Options {
    pub source: RecordSource,
    pub timeout_seconds: Option<usize>,
    pub proxy: Option<String>,
    pub header: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            source: RecordSource::Url(source::DEFAULT_SOURCE_URL.to_string()),
            timeout_seconds: None,
            proxy: None,
            header: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("no record source provided (url and input_file are both empty)")]
    NoSource,

    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    #[error(transparent)]
    Source(#[from] SourceError),
}

#[derive(Clone, Debug)]
pub struct FetchReport {
    pub elapsed: Duration,
    pub records: Vec<Record>,
}

#[derive(Clone, Debug)]
pub struct Runner {
    options: Options,
}

impl Runner {
    pub fn new(options: Options) -> Result<Self, RunnerError> {
        match &options.source {
            RecordSource::Url(url) => {
                if url.trim().is_empty() {
                    return Err(RunnerError::NoSource);
                }
                reqwest::Url::parse(url.trim())
                    .map_err(|_| RunnerError::InvalidUrl { url: url.clone() })?;
            }
            RecordSource::FilePath(path) => {
                if path.trim().is_empty() {
                    return Err(RunnerError::NoSource);
                }
            }
            RecordSource::Inline(_) => {}
        }
        Ok(Self { options })
    }

    pub async fn fetch(&self) -> Result<FetchReport, RunnerError> {
        let started_at = Instant::now();
        let fetch_options = FetchOptions {
            timeout_seconds: self.options.timeout_seconds,
            proxy: self.options.proxy.clone(),
            header: self.options.header.clone(),
        };
        let records = source::fetch_all(&self.options.source, &fetch_options).await?;
        Ok(FetchReport {
            elapsed: started_at.elapsed(),
            records,
        })
    }

    /// Runs the single startup fetch and hands back a controller that is
    /// either ready or in its terminal failed state.
    pub async fn load<N: Notifier>(&self, notifier: N) -> ListController<N> {
        let mut controller = ListController::new(notifier);
        let result = self.fetch().await.map(|report| {
            tracing::debug!(elapsed_ms = report.elapsed.as_millis() as u64, "fetch finished");
            report.records
        });
        controller.finish_load(result);
        controller
    }
}
