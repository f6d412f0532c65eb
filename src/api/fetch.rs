use log::{debug, warn};
use reqwest::header::CACHE_CONTROL;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::client::ApiClient;
use crate::error::{BoardError, Result};

/// Outcome of a backend read.
///
/// `Unavailable` covers every failure mode (transport, HTTP status, body
/// parse) and is distinct from a `Value` that happens to be empty.
/// Serializes as `null` when unavailable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Fetched<T> {
    Unavailable,
    Value(T),
}

impl<T> Fetched<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    pub fn as_ref(&self) -> Fetched<&T> {
        match self {
            Self::Unavailable => Fetched::Unavailable,
            Self::Value(value) => Fetched::Value(value),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Fetched<U> {
        match self {
            Self::Unavailable => Fetched::Unavailable,
            Self::Value(value) => Fetched::Value(f(value)),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Unavailable => None,
            Self::Value(value) => Some(value),
        }
    }
}

impl ApiClient {
    /// GET `path` and decode the JSON body. Never fails: any error is logged
    /// and reported as [`Fetched::Unavailable`].
    pub async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Fetched<T> {
        match self.try_fetch(path).await {
            Ok(value) => Fetched::Value(value),
            Err(e) => {
                warn!("Backend data unavailable for {path}: {e}");
                Fetched::Unavailable
            }
        }
    }

    async fn try_fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(BoardError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
