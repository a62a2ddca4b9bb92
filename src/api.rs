//! REST client for saved forms and their answers.
//!
//! DESIGN
//! ======
//! The backend wraps every list in a paginated envelope (`data` plus
//! `metadata`). Single resources come back bare. A fetched form's
//! `elements` are plain `FormElement`s; hydrating a session is the caller's
//! job (`FormSession::setup_elements`).

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::element::FormElement;
use crate::error::FormError;
use crate::responses::ResponseStore;

pub const FORMS_PATH: &str = "/v1/forms";
pub const ANSWERS_PATH: &str = "/v1/answers";

#[must_use]
pub fn form_endpoint(id: &str) -> String {
    format!("{FORMS_PATH}/{id}")
}

#[must_use]
pub fn answer_endpoint(id: &str) -> String {
    format!("{ANSWERS_PATH}/{id}")
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Query parameters accepted by the list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub last_page: u32,
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub has_previous_page: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub metadata: PageMetadata,
}

/// A saved form as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormEntity {
    pub id: String,
    #[serde(default, alias = "name", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub elements: Vec<FormElement>,
}

/// One submitted set of answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEntity {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_id: Option<String>,
    #[serde(default)]
    pub responses: ResponseStore,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from `config`: base URL, bearer token and timeouts.
    ///
    /// # Errors
    ///
    /// Fails if the token is not a valid header value or the HTTP client
    /// cannot be built.
    pub fn new(config: &Config) -> Result<Self, FormError> {
        let http = reqwest::Client::builder()
            .default_headers(auth_headers(config.api_token.as_deref())?)
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()?;
        Ok(Self { http, base_url: config.api_base_url.trim_end_matches('/').to_owned() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// # Errors
    ///
    /// Transport failures, non-success statuses and undecodable bodies.
    pub async fn list_forms(&self, query: &ListQuery) -> Result<Page<FormEntity>, FormError> {
        self.get_json(FORMS_PATH, Some(query)).await
    }

    /// # Errors
    ///
    /// Transport failures, non-success statuses and undecodable bodies.
    pub async fn fetch_form(&self, id: &str) -> Result<FormEntity, FormError> {
        self.get_json(&form_endpoint(id), None).await
    }

    /// # Errors
    ///
    /// Transport failures, non-success statuses and undecodable bodies.
    pub async fn list_answers(&self, query: &ListQuery) -> Result<Page<AnswerEntity>, FormError> {
        self.get_json(ANSWERS_PATH, Some(query)).await
    }

    /// # Errors
    ///
    /// Transport failures, non-success statuses and undecodable bodies.
    pub async fn fetch_answer(&self, id: &str) -> Result<AnswerEntity, FormError> {
        self.get_json(&answer_endpoint(id), None).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: Option<&ListQuery>) -> Result<T, FormError> {
        let url = self.url(path);
        debug!(%url, "api get");

        let request = self.http.get(&url);
        let request = if let Some(query) = query { request.query(query) } else { request };

        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        if !(200..300).contains(&status) {
            warn!(%url, status, "api request rejected");
            return Err(FormError::ApiResponse { status, body: text });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

/// Default headers for every request: `Authorization: Bearer <token>` when a
/// token is configured.
pub(crate) fn auth_headers(token: Option<&str>) -> Result<HeaderMap, FormError> {
    let mut headers = HeaderMap::new();
    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}
