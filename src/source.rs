//! Raw data sources.
//!
//! The analysis only needs the raw text of one night file. A
//! [`SourceLocator`] turns a user-supplied locator into that text.
//! [`FileSourceLocator`] reads local files or standard input,
//! [`HttpSourceLocator`] downloads a single `.dat` URL, and
//! [`RoutingSourceLocator`] picks between them by scheme.

use crate::constants::{HTTP_TIMEOUT_SECS, REMOTE_SCHEMES, STDIN_LOCATOR};
use crate::error::{Result, SqmError};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

/// Resolves a locator into the raw text of a data file
pub trait SourceLocator {
    fn fetch(&self, locator: &str) -> impl Future<Output = Result<String>> + Send;
}

/// True for `http://` and `https://` locators (scheme is case-insensitive)
pub fn is_remote_locator(locator: &str) -> bool {
    REMOTE_SCHEMES.iter().any(|scheme| {
        locator
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

fn content_preview(content: &str) -> String {
    content.chars().take(200).collect()
}

/// Reads `.dat` files from the local filesystem, or stdin for `-`
#[derive(Debug, Clone, Default)]
pub struct FileSourceLocator {
    base_dir: Option<PathBuf>,
}

impl FileSourceLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative locators against `base_dir`
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    fn resolve_path(&self, locator: &str) -> PathBuf {
        let path = Path::new(locator);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    async fn read_stdin() -> Result<String> {
        let mut content = String::new();
        tokio::io::stdin()
            .read_to_string(&mut content)
            .await
            .map_err(|e| SqmError::io("Failed to read data from standard input", e))?;
        Ok(content)
    }
}

impl SourceLocator for FileSourceLocator {
    async fn fetch(&self, locator: &str) -> Result<String> {
        if locator == STDIN_LOCATOR {
            debug!("Reading series from standard input");
            return Self::read_stdin().await;
        }

        let path = self.resolve_path(locator);
        if !path.is_file() {
            return Err(SqmError::file_not_found(&path));
        }

        let content = fs::read_to_string(&path).await.map_err(|e| {
            SqmError::io(format!("Failed to read file {}", path.display()), e)
        })?;

        info!("Read {} bytes from {}", content.len(), path.display());
        debug!("Content preview: {}", content_preview(&content));

        Ok(content)
    }
}

/// Downloads a data file with a plain GET
#[derive(Debug, Clone)]
pub struct HttpSourceLocator {
    client: reqwest::Client,
}

impl HttpSourceLocator {
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("sqm-processor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SqmError::configuration(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl SourceLocator for HttpSourceLocator {
    async fn fetch(&self, locator: &str) -> Result<String> {
        if !is_remote_locator(locator) {
            return Err(SqmError::source_not_found(locator));
        }

        debug!("Requesting {}", locator);
        let response = self
            .client
            .get(locator)
            .send()
            .await
            .map_err(|e| SqmError::network(locator, e))?;

        let status = response.status();
        debug!("Status code: {}", status);
        if !status.is_success() {
            return Err(SqmError::HttpStatus {
                locator: locator.to_string(),
                status: status.as_u16(),
            });
        }

        let content = response
            .text()
            .await
            .map_err(|e| SqmError::network(locator, e))?;

        info!("Downloaded {} bytes from {}", content.len(), locator);
        debug!("Response preview: {}", content_preview(&content));

        Ok(content)
    }
}

/// Sends URLs to [`HttpSourceLocator`] and everything else to [`FileSourceLocator`]
#[derive(Debug, Clone)]
pub struct RoutingSourceLocator {
    files: FileSourceLocator,
    http: HttpSourceLocator,
}

impl RoutingSourceLocator {
    pub fn new() -> Result<Self> {
        Ok(Self {
            files: FileSourceLocator::new(),
            http: HttpSourceLocator::new()?,
        })
    }

    pub fn with_locators(files: FileSourceLocator, http: HttpSourceLocator) -> Self {
        Self { files, http }
    }
}

impl SourceLocator for RoutingSourceLocator {
    async fn fetch(&self, locator: &str) -> Result<String> {
        if is_remote_locator(locator) {
            self.http.fetch(locator).await
        } else {
            self.files.fetch(locator).await
        }
    }
}
