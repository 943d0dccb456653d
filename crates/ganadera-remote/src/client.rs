//! # PostgREST Client
//!
//! [`TableStore`] over HTTPS against a Supabase project.
//!
//! ## Request Shape
//! ```text
//! GET  {base}/rest/v1/socios?select=*&activo=eq.true&order=nombre.asc
//! POST {base}/rest/v1/registros          body: [ {row} ]
//!      Prefer: return=representation     → [ {inserted row} ] or []
//!
//! Every request carries:
//!   apikey: <anon key>
//!   Authorization: Bearer <anon key>
//! ```

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Endpoint;
use crate::error::{ConfigError, RemoteError, RemoteResult, ServiceErrorBody};
use crate::query::{SelectQuery, Table};
use crate::store::TableStore;

/// HTTP implementation of [`TableStore`].
#[derive(Debug, Clone)]
pub struct RestClient {
    http: Client,
    endpoint: Endpoint,
}

impl RestClient {
    /// Builds the HTTP client with the auth headers baked in.
    pub fn new(endpoint: Endpoint) -> RemoteResult<Self> {
        let invalid_key = || ConfigError::InvalidValue {
            key: crate::config::ENV_ANON_KEY.to_string(),
            value: "<redacted>".to_string(),
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(&endpoint.anon_key).map_err(|_| invalid_key())?,
        );
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", endpoint.anon_key))
            .map_err(|_| invalid_key())?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = endpoint.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        debug!(base_url = %endpoint.base_url, "PostgREST client ready");
        Ok(RestClient { http, endpoint })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    async fn read_rows(table: Table, response: Response) -> RemoteResult<Vec<Value>> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            let body = serde_json::from_str::<ServiceErrorBody>(&text).unwrap_or_else(|_| {
                ServiceErrorBody {
                    message: if text.trim().is_empty() {
                        status.to_string()
                    } else {
                        text.clone()
                    },
                    ..Default::default()
                }
            });
            warn!(%table, status = status.as_u16(), code = ?body.code, message = %body.message, "Service returned an error");
            return Err(RemoteError::from_body(status.as_u16(), body));
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str::<Value>(&text)? {
            Value::Array(rows) => Ok(rows),
            Value::Null => Ok(Vec::new()),
            row @ Value::Object(_) => Ok(vec![row]),
            other => Err(RemoteError::decode(
                table.name(),
                format!("expected rows, got {other}"),
            )),
        }
    }
}

#[async_trait]
impl TableStore for RestClient {
    async fn select(&self, table: Table, query: &SelectQuery) -> RemoteResult<Vec<Value>> {
        let mut url = self.endpoint.table_url(table.name())?;
        url.query_pairs_mut().extend_pairs(query.to_query_pairs());

        debug!(%table, query = url.query().unwrap_or(""), "Select");
        let response = self.http.get(url).send().await?;
        let rows = Self::read_rows(table, response).await?;
        debug!(%table, count = rows.len(), "Select returned rows");
        Ok(rows)
    }

    async fn insert(&self, table: Table, row: Value) -> RemoteResult<Vec<Value>> {
        let url = self.endpoint.table_url(table.name())?;

        debug!(%table, "Insert");
        let response = self
            .http
            .post(url)
            .header("Prefer", "return=representation")
            .json(&[row])
            .send()
            .await?;
        Self::read_rows(table, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RemoteConfig;

    #[test]
    fn test_client_builds_from_endpoint() {
        let endpoint = RemoteConfig {
            url: Some("https://abc.supabase.co".to_string()),
            anon_key: Some("anon-key".to_string()),
            request_timeout_secs: Some(5),
        }
        .validate()
        .unwrap();

        let client = RestClient::new(endpoint).unwrap();
        assert_eq!(client.endpoint().anon_key, "anon-key");
    }

    #[test]
    fn test_rejects_key_with_newline() {
        let endpoint = Endpoint {
            base_url: url::Url::parse("https://abc.supabase.co").unwrap(),
            anon_key: "bad\nkey".to_string(),
            request_timeout: None,
        };
        assert!(matches!(
            RestClient::new(endpoint),
            Err(RemoteError::Config(ConfigError::InvalidValue { .. }))
        ));
    }
}
