use std::time::Duration;

use log::{debug, info, warn};
use reqwest::StatusCode;

use crate::{
    error::{Result, StoreErr},
    retry::RetryPolicy,
};

/// Identifies the remote artifact: (bucket, key). Fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub bucket: String,
    pub key: String,
}

impl ObjectRef {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

/// The get-object capability the loader depends on. Kept as a trait so
/// tests can drive the load state machine with in-process fakes.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetches a named object into memory.
    ///
    /// # Arguments
    /// * `object` - The (bucket, key) pair to fetch.
    ///
    /// # Returns
    /// The object's bytes, or a `StoreErr` once the retry budget is spent.
    async fn fetch(&self, object: &ObjectRef) -> Result<Vec<u8>>;
}

/// Connection and retry tuning for the HTTP client.
///
/// Timeouts are deliberately low: a multi-gigabyte artifact needs
/// resilience to transient stalls, not slow-start patience. The read
/// timeout bounds silence between chunks, not the whole download.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub pool_size: usize,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            pool_size: 40,
            connect_timeout: Duration::from_secs(3),
            read_timeout: Duration::from_secs(3),
            retry: RetryPolicy::default(),
        }
    }
}

/// Blob store client speaking plain path-style HTTP:
/// `GET {endpoint}/{bucket}/{key}`.
pub struct HttpObjectStore {
    client: reqwest::Client,
    endpoint: String,
    retry: RetryPolicy,
}

impl HttpObjectStore {
    /// Creates a new client against the given store endpoint.
    ///
    /// # Arguments
    /// * `endpoint` - Base URL of the object store.
    /// * `config` - Connection pool, timeout and retry settings.
    ///
    /// # Returns
    /// A ready client, or the underlying builder error.
    pub fn new(endpoint: impl Into<String>, config: StoreConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(config.pool_size)
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .build()?;

        let mut endpoint = endpoint.into();
        while endpoint.ends_with('/') {
            endpoint.pop();
        }

        Ok(Self {
            client,
            endpoint,
            retry: config.retry,
        })
    }

    fn object_url(&self, object: &ObjectRef) -> String {
        format!("{}/{}/{}", self.endpoint, object.bucket, object.key)
    }

    async fn fetch_once(&self, url: &str, object: &ObjectRef) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(StoreErr::NoSuchObject {
                bucket: object.bucket.clone(),
                key: object.key.clone(),
            });
        }
        if !status.is_success() {
            return Err(StoreErr::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

/// Transient failures are worth another attempt; a missing object or a
/// plain client error is not.
fn is_retryable(err: &StoreErr) -> bool {
    match err {
        StoreErr::Request(_) => true,
        StoreErr::Status { status } => *status >= 500 || *status == 429,
        StoreErr::NoSuchObject { .. } => false,
        StoreErr::Unavailable { .. } => false,
    }
}

#[async_trait::async_trait]
impl ObjectStore for HttpObjectStore {
    async fn fetch(&self, object: &ObjectRef) -> Result<Vec<u8>> {
        let url = self.object_url(object);
        let mut attempt = 0;

        loop {
            match self.fetch_once(&url, object).await {
                Ok(bytes) => {
                    if attempt > 0 {
                        info!(attempt = attempt; "object fetch recovered");
                    }
                    debug!("fetched {} ({} bytes)", url, bytes.len());
                    return Ok(bytes);
                }
                Err(err) if !is_retryable(&err) => return Err(err),
                Err(err) => {
                    attempt += 1;
                    if attempt >= self.retry.max_attempts.get() {
                        return Err(StoreErr::Unavailable {
                            attempts: attempt,
                            source: Box::new(err),
                        });
                    }

                    let delay = self.retry.delay_for(attempt - 1);
                    warn!(
                        attempt = attempt,
                        delay_ms = delay.as_millis() as u64;
                        "object fetch failed, backing off: {err}"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_url_strips_trailing_slashes() {
        let store =
            HttpObjectStore::new("http://store.local:9000///", StoreConfig::default()).unwrap();
        let object = ObjectRef::new("bank-term-deposit-1", "models/best_model.bin");

        assert_eq!(
            store.object_url(&object),
            "http://store.local:9000/bank-term-deposit-1/models/best_model.bin"
        );
    }

    #[test]
    fn test_retryability_classification() {
        assert!(is_retryable(&StoreErr::Status { status: 500 }));
        assert!(is_retryable(&StoreErr::Status { status: 429 }));
        assert!(!is_retryable(&StoreErr::Status { status: 403 }));
        assert!(!is_retryable(&StoreErr::NoSuchObject {
            bucket: "b".into(),
            key: "k".into(),
        }));
    }
}
