//! HTTP client for the collection lookup endpoints.

use std::future::Future;

use reqwest::Url;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};

use crate::candidate::{Candidate, CandidateId};
use crate::config::LookupSettings;
use crate::envelope;
use crate::error::{LookupError, Result};
use crate::source::LookupSource;

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("crm-search-select/", env!("CARGO_PKG_VERSION"));

/// Lookup client for one backend collection.
#[derive(Debug, Clone)]
pub struct HttpLookupClient {
    client: reqwest::Client,
    collection_url: Url,
}

impl HttpLookupClient {
    /// Creates a client from settings, forwarding the bearer token if set.
    pub fn new(settings: &LookupSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        if let Some(token) = settings.auth_token.as_deref() {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| LookupError::InvalidConfig(format!("invalid auth token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout())
            .build()
            .map_err(|e| LookupError::Network(format!("failed to create HTTP client: {e}")))?;

        Self::with_client(client, settings)
    }

    /// Creates a client around an HTTP client supplied by the application.
    ///
    /// The supplied client is used as-is; its headers and timeouts take the
    /// place of the ones derived from `settings`.
    pub fn with_client(client: reqwest::Client, settings: &LookupSettings) -> Result<Self> {
        Ok(Self {
            client,
            collection_url: settings.collection_url()?,
        })
    }

    /// URL of the collection endpoint.
    pub fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    /// URL for `GET <collection>/?search=<text>`.
    pub fn search_url(&self, text: &str) -> Url {
        let mut url = self.collection_url.clone();
        url.query_pairs_mut().append_pair("search", text);
        url
    }

    /// URL for `GET <collection>/<id>`.
    pub fn record_url(&self, id: &CandidateId) -> Result<Url> {
        let mut url = self.collection_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                LookupError::InvalidConfig(format!(
                    "{} cannot carry path segments",
                    self.collection_url
                ))
            })?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }

    /// Sends a GET request and checks the status code.
    async fn get(&self, url: Url) -> Result<reqwest::Response> {
        tracing::debug!(%url, "Sending lookup request");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

impl LookupSource for HttpLookupClient {
    fn search(&self, text: &str) -> impl Future<Output = Result<Vec<Candidate>>> + Send {
        let url = self.search_url(text);
        async move {
            let response = self.get(url).await?;
            let body = response.bytes().await?;
            let candidates = envelope::parse_list(&body)?;

            tracing::debug!(count = candidates.len(), "Lookup returned candidates");
            Ok(candidates)
        }
    }

    fn fetch_by_id(&self, id: &CandidateId) -> impl Future<Output = Result<Candidate>> + Send {
        async move {
            let url = self.record_url(id)?;
            let response = match self.get(url).await {
                Err(LookupError::Status { status: 404, .. }) => {
                    return Err(LookupError::NotFound(id.to_string()));
                }
                other => other?,
            };
            let body = response.bytes().await?;
            envelope::parse_record(&body)
        }
    }
}
