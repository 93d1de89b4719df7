//! services/client/src/adapters/http.rs
//!
//! This module contains the HTTP adapter for the VERA backend.
//! It implements the `LegalBackendService` port from the `core` crate.

use std::time::Duration;

use async_trait::async_trait;
use legal_assistant_core::domain::{
    DocumentRecord, HealthRecord, QueryRequest, QueryResult, UploadReceipt, UploadRequest,
};
use legal_assistant_core::ports::{LegalBackendService, PortError, PortResult};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use super::protocol::{
    error_message_from_body, DocumentsBody, HealthBody, QueryBody, QueryResponseBody, UploadBody,
};

const QUERY_PATH: &str = "/api/v1/query";
const HEALTH_PATH: &str = "/api/v1/health";
const DOCUMENTS_PATH: &str = "/api/v1/documents";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `LegalBackendService` over the backend's REST API.
#[derive(Clone)]
pub struct HttpBackendAdapter {
    client: Client,
    base_url: String,
}

impl HttpBackendAdapter {
    /// Creates a new `HttpBackendAdapter` whose every request carries `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a request and decodes a 2xx JSON body.
    ///
    /// Non-2xx responses become `PortError::Backend` with the body's
    /// `message`/`detail` when present.
    async fn send<T: DeserializeOwned>(
        &self,
        label: &str,
        request: RequestBuilder,
    ) -> PortResult<T> {
        debug!("[API Request] {}", label);
        let response = request.send().await.map_err(|e| {
            error!("[API Request Error] {}: {}", label, e);
            transport_error(e)
        })?;

        let status = response.status();
        debug!("[API Response] {} - Status: {}", label, status);
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message_from_body(&body).unwrap_or_else(|| {
                format!("Request failed with status code {}", status.as_u16())
            });
            error!("[API Response Error] {}: {}", label, message);
            return Err(PortError::Backend(message));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| PortError::Decode(e.to_string()))
    }
}

fn transport_error(e: reqwest::Error) -> PortError {
    if e.is_timeout() {
        PortError::Timeout
    } else {
        PortError::Transport(e.to_string())
    }
}

//=========================================================================================
// `LegalBackendService` Trait Implementation
//=========================================================================================

#[async_trait]
impl LegalBackendService for HttpBackendAdapter {
    async fn query(&self, request: &QueryRequest) -> PortResult<QueryResult> {
        let builder = self
            .client
            .post(self.url(QUERY_PATH))
            .json(&QueryBody::from(request));
        let body: QueryResponseBody = self.send("POST /api/v1/query", builder).await?;
        body.to_domain()
    }

    async fn health(&self) -> PortResult<HealthRecord> {
        let builder = self.client.get(self.url(HEALTH_PATH));
        let body: HealthBody = self.send("GET /api/v1/health", builder).await?;
        Ok(body.to_domain())
    }

    async fn upload_document(&self, request: UploadRequest) -> PortResult<UploadReceipt> {
        let part = Part::bytes(request.file.bytes.to_vec()).file_name(request.file.file_name);
        let form = Form::new()
            .part("file", part)
            .text("domain", request.domain);
        let builder = self.client.post(self.url(DOCUMENTS_PATH)).multipart(form);
        let body: UploadBody = self.send("POST /api/v1/documents", builder).await?;
        body.to_domain()
    }

    async fn list_documents(&self) -> PortResult<Vec<DocumentRecord>> {
        let builder = self.client.get(self.url(DOCUMENTS_PATH));
        let body: DocumentsBody = self.send("GET /api/v1/documents", builder).await?;
        body.to_domain()
    }
}
