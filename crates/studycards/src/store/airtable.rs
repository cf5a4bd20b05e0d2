//! HTTP remote store for an Airtable-style hosted table.
//!
//! All requests are table-scoped and authenticated with the API key passed
//! as the `api_key` query parameter. A request only succeeds on HTTP 200
//! with a body of the expected shape.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{DeleteReceipt, ListQuery, RemoteStore};
use crate::card::{CardFields, CardId, FieldsPatch, StudyCard};
use crate::config::RemoteConfig;
use crate::error::{Error, Result};

/// Remote store speaking the Airtable REST API.
#[derive(Clone)]
pub struct AirtableStore {
    client: Client,
    table_url: Url,
    api_key: String,
}

impl std::fmt::Debug for AirtableStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AirtableStore")
            .field("table_url", &self.table_url.as_str())
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Body of a list response.
#[derive(Debug, Deserialize)]
struct ListResponse {
    records: Vec<StudyCard>,
}

/// Body of a create or patch request.
#[derive(Debug, Serialize)]
struct FieldsBody<'a, T: Serialize> {
    fields: &'a T,
}

impl AirtableStore {
    /// Build a store from the remote configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured, the base URL is
    /// invalid, or the HTTP client cannot be built.
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or(Error::MissingApiKey)?;
        let table_url = table_url(&config.base_url, &config.base_id, &config.table)?;

        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.timeout().min(Duration::from_secs(30)))
            .build()?;

        debug!("Remote table at {}", table_url);
        Ok(Self {
            client,
            table_url,
            api_key,
        })
    }

    /// The table endpoint, without credentials.
    #[must_use]
    pub fn table_url(&self) -> &Url {
        &self.table_url
    }

    /// The endpoint for a single record.
    #[must_use]
    pub fn record_url(&self, id: &CardId) -> Url {
        let mut url = self.table_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id.as_str());
        }
        url
    }

    async fn read<T: DeserializeOwned>(
        operation: &'static str,
        response: reqwest::Response,
    ) -> Result<T> {
        check_status(operation, response.status())?;
        let body = response.text().await?;
        trace!("{operation} response body: {body}");
        decode(operation, &body)
    }
}

/// Join the base URL, base id and table name into a table endpoint.
///
/// Each part is pushed as its own path segment so names with spaces are
/// percent-encoded.
///
/// # Errors
///
/// Returns a validation error if the base URL cannot be parsed or cannot
/// carry a path.
pub fn table_url(base_url: &str, base_id: &str, table: &str) -> Result<Url> {
    let mut url = Url::parse(base_url).map_err(|e| Error::ConfigValidation {
        message: format!("invalid base_url {base_url:?}: {e}"),
    })?;
    url.path_segments_mut()
        .map_err(|()| Error::ConfigValidation {
            message: format!("base_url {base_url:?} cannot have a path"),
        })?
        .pop_if_empty()
        .push(base_id)
        .push(table);
    Ok(url)
}

fn check_status(operation: &'static str, status: StatusCode) -> Result<()> {
    if status == StatusCode::OK {
        Ok(())
    } else {
        Err(Error::UnexpectedStatus {
            operation,
            status: status.as_u16(),
        })
    }
}

fn decode<T: DeserializeOwned>(operation: &'static str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| Error::malformed(operation, e.to_string()))
}

#[async_trait::async_trait]
impl RemoteStore for AirtableStore {
    async fn list(&self, query: &ListQuery) -> Result<Vec<StudyCard>> {
        let mut params = vec![
            ("maxRecords", query.max_records.to_string()),
            ("api_key", self.api_key.clone()),
        ];
        if let Some(view) = &query.view {
            params.push(("view", view.clone()));
        }

        let response = self
            .client
            .get(self.table_url.clone())
            .query(&params)
            .send()
            .await?;
        let body: ListResponse = Self::read("list", response).await?;
        debug!("Listed {} records", body.records.len());
        Ok(body.records)
    }

    async fn create(&self, fields: &CardFields) -> Result<StudyCard> {
        let response = self
            .client
            .post(self.table_url.clone())
            .query(&[("api_key", &self.api_key)])
            .json(&FieldsBody { fields })
            .send()
            .await?;
        Self::read("create", response).await
    }

    async fn patch(&self, id: &CardId, fields: &FieldsPatch) -> Result<StudyCard> {
        let response = self
            .client
            .patch(self.record_url(id))
            .query(&[("api_key", &self.api_key)])
            .json(&FieldsBody { fields })
            .send()
            .await?;
        Self::read("patch", response).await
    }

    async fn delete(&self, id: &CardId) -> Result<DeleteReceipt> {
        let response = self
            .client
            .delete(self.record_url(id))
            .query(&[("api_key", &self.api_key)])
            .send()
            .await?;
        Self::read("delete", response).await
    }
}
