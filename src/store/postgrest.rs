//! Record store backed by a hosted Postgres REST endpoint (PostgREST).
//!
//! Tables are exposed under `{url}/rest/v1/{table}`. Reads use PostgREST's
//! query-string filter grammar (`column=gt.value`, `order=column.asc`) and
//! inserts ask for the stored representation back.

use super::{Filter, Order, RecordStore, Row, StoreError};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info_span, Instrument};

/// Connection settings for [`PostgrestStore`].
#[derive(Clone)]
pub struct PostgrestConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`
    pub url: String,
    /// Privileged key sent as both `apikey` and bearer token
    pub service_role_key: String,
    /// Per-request timeout
    pub timeout: Duration,
}

/// PostgREST client over `reqwest`.
#[derive(Clone)]
pub struct PostgrestStore {
    client: reqwest::Client,
    base_url: String,
    service_role_key: String,
}

impl PostgrestStore {
    /// Builds the HTTP client for `config`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Transport` if the HTTP client cannot be built.
    pub fn new(config: PostgrestConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("pet-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            service_role_key: config.service_role_key,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
    }
}

#[async_trait::async_trait]
impl RecordStore for PostgrestStore {
    async fn query(
        &self,
        table: &str,
        filter: Filter,
        order: Order,
    ) -> Result<Vec<Row>, StoreError> {
        let condition = format!("{}.{}", filter.op, filter_literal(&filter.value));
        let direction = if order.ascending { "asc" } else { "desc" };
        let ordering = format!("{}.{}", order.field, direction);

        let request = self.authorize(self.client.get(self.table_url(table))).query(&[
            ("select", "*"),
            (filter.field.as_str(), condition.as_str()),
            ("order", ordering.as_str()),
        ]);

        let span = info_span!("store_query", table = %table, filter = %filter.field);
        async move {
            debug!("Querying {} where {} {}", table, filter.field, condition);
            let response = request.send().await?;
            read_rows(response).await
        }
        .instrument(span)
        .await
    }

    async fn insert(&self, table: &str, row: Row) -> Result<Vec<Row>, StoreError> {
        let request = self
            .authorize(self.client.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(&[row]);

        let span = info_span!("store_insert", table = %table);
        async move {
            debug!("Inserting row into {}", table);
            let response = request.send().await?;
            read_rows(response).await
        }
        .instrument(span)
        .await
    }

    fn name(&self) -> &str {
        "postgrest"
    }
}

/// Filter operands go into the query string unquoted.
fn filter_literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

async fn read_rows(response: Response) -> Result<Vec<Row>, StoreError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await?;
        return Err(StoreError::Api {
            status: status.as_u16(),
            message: error_message(status, &body),
        });
    }

    Ok(response.json::<Vec<Row>>().await?)
}

/// PostgREST reports failures as `{"message": ..., "code": ..., ...}`;
/// anything else falls back to the body text, then the status line.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .or_else(|| {
            let text = body.trim();
            (!text.is_empty()).then(|| text.to_string())
        })
        .unwrap_or_else(|| status.to_string())
}
