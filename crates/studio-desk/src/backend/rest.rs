use std::marker::PhantomData;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use super::{BackendError, Table};
use crate::config::BackendConfig;
use crate::model::{Record, RecordId};

/// Shared HTTP client for the hosted database's REST interface.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    schema: String,
}

impl RestClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        schema: impl Into<String>,
    ) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("studio-desk/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            schema: schema.into(),
        })
    }

    pub fn from_config(config: &BackendConfig) -> Result<Option<Self>, BackendError> {
        config
            .url
            .as_ref()
            .map(|url| Self::new(url.clone(), config.api_key.clone(), config.schema.clone()))
            .transpose()
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        let mut builder = self
            .http
            .request(method, url)
            .header("Accept-Profile", &self.schema)
            .header("Content-Profile", &self.schema);
        if let Some(key) = &self.api_key {
            builder = builder.header("apikey", key).bearer_auth(key);
        }
        builder
    }

    async fn rows<T: DeserializeOwned>(
        &self,
        table: &str,
        builder: RequestBuilder,
    ) -> Result<Vec<T>, BackendError> {
        let response = builder.send().await?;
        let body = checked(table, response).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

async fn checked(table: &str, response: Response) -> Result<String, BackendError> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        return Ok(body);
    }

    warn!(table, status = status.as_u16(), "backend request failed");
    match status {
        StatusCode::NOT_FOUND => Err(BackendError::NotFound),
        StatusCode::CONFLICT => Err(BackendError::Conflict),
        _ => Err(BackendError::Status {
            status: status.as_u16(),
            body,
        }),
    }
}

fn id_filter(id: RecordId) -> [(&'static str, String); 1] {
    [("id", format!("eq.{id}"))]
}

/// [`Table`] backed by `{base_url}/rest/v1/{table}`.
pub struct RestTable<T> {
    client: RestClient,
    _rows: PhantomData<fn() -> T>,
}

impl<T> RestTable<T> {
    pub fn new(client: RestClient) -> Self {
        Self {
            client,
            _rows: PhantomData,
        }
    }
}

impl<T: Record> RestTable<T> {
    fn write<B: Serialize + ?Sized>(&self, method: Method, body: &B) -> RequestBuilder {
        self.client
            .request(method, T::TABLE)
            .header("Prefer", "return=representation")
            .json(body)
    }
}

#[async_trait]
impl<T: Record> Table<T> for RestTable<T> {
    async fn list(&self) -> Result<Vec<T>, BackendError> {
        let builder = self
            .client
            .request(Method::GET, T::TABLE)
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        self.client.rows(T::TABLE, builder).await
    }

    async fn get(&self, id: RecordId) -> Result<Option<T>, BackendError> {
        let builder = self
            .client
            .request(Method::GET, T::TABLE)
            .query(&[("select", "*")])
            .query(&id_filter(id));
        let rows: Vec<T> = self.client.rows(T::TABLE, builder).await?;
        Ok(rows.into_iter().next())
    }

    async fn insert(&self, record: T) -> Result<T, BackendError> {
        let builder = self.write(Method::POST, &record);
        let rows: Vec<T> = self.client.rows(T::TABLE, builder).await?;
        Ok(rows.into_iter().next().unwrap_or(record))
    }

    async fn insert_many(&self, records: Vec<T>) -> Result<Vec<T>, BackendError> {
        if records.is_empty() {
            return Ok(records);
        }
        let builder = self.write(Method::POST, records.as_slice());
        self.client.rows(T::TABLE, builder).await
    }

    async fn update(&self, record: T) -> Result<T, BackendError> {
        let builder = self
            .write(Method::PATCH, &record)
            .query(&id_filter(record.id()));
        let rows: Vec<T> = self.client.rows(T::TABLE, builder).await?;
        rows.into_iter().next().ok_or(BackendError::NotFound)
    }

    async fn delete(&self, id: RecordId) -> Result<(), BackendError> {
        let builder = self
            .client
            .request(Method::DELETE, T::TABLE)
            .header("Prefer", "return=representation")
            .query(&id_filter(id));
        let rows: Vec<serde_json::Value> = self.client.rows(T::TABLE, builder).await?;
        if rows.is_empty() {
            Err(BackendError::NotFound)
        } else {
            Ok(())
        }
    }
}
