use async_trait::async_trait;
use anyhow::bail;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use talent_core::{
    classify, Outcome, SavedCandidatesResponse, SearchRequest, SearchResponse, TalentApi,
    ToggleSaveResponse,
};
use tracing::{debug, warn};

use crate::app_config::AppConfig;

/// reqwest-backed [`TalentApi`] that attaches the bearer token to every call
pub struct HttpClient {
    client: Client,
    api_url: Url,
    token: Option<String>,
}

impl HttpClient {
    pub fn new(api_url: &str, token: Option<String>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("talent-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let api_url = Url::parse(api_url)?;
        if api_url.cannot_be_a_base() {
            bail!("API URL {} cannot carry a path", api_url);
        }

        Ok(Self {
            client,
            api_url,
            token,
        })
    }

    pub fn from_config(config: &AppConfig, token: Option<String>) -> anyhow::Result<Self> {
        Self::new(&config.api_url, token)
    }

    /// API URL with the given path segments appended, each percent-encoded
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Status and body of a call, or the transport error as text
    async fn exchange(&self, request: RequestBuilder) -> Result<(u16, Vec<u8>), String> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| e.to_string())?;

        debug!(status, bytes = body.len(), "Received response");
        Ok((status, body.to_vec()))
    }

    async fn call<T: DeserializeOwned>(&self, request: RequestBuilder) -> Outcome<T> {
        match self.exchange(request).await {
            Ok((status, body)) => classify(status, &body),
            Err(reason) => {
                warn!(%reason, "Request failed in transport");
                Outcome::TransportFailure(reason)
            }
        }
    }

    /// Check the token against the authenticated health endpoint
    pub async fn verify_token(&self) -> Outcome<()> {
        let request = self.client.get(self.url(&["health", "auth"]));

        match self.exchange(request).await {
            Ok((200, _)) => Outcome::Ok(()),
            Ok((status, body)) => classify::<()>(status, &body),
            Err(reason) => {
                warn!(%reason, "Token check failed in transport");
                Outcome::TransportFailure(reason)
            }
        }
    }
}

#[async_trait]
impl TalentApi for HttpClient {
    async fn search(&self, request: &SearchRequest) -> Outcome<SearchResponse> {
        debug!(query = %request.query, page = request.page, ai = request.is_ai_search, "POST /search");
        self.call(self.client.post(self.url(&["search"])).json(request))
            .await
    }

    async fn toggle_save(&self, candidate_id: &str) -> Outcome<ToggleSaveResponse> {
        debug!(candidate_id, "POST /candidates/{{id}}/save");
        self.call(
            self.client
                .post(self.url(&["candidates", candidate_id, "save"])),
        )
        .await
    }

    async fn saved_candidates(&self) -> Outcome<SavedCandidatesResponse> {
        debug!("GET /candidates/saved");
        self.call(self.client.get(self.url(&["candidates", "saved"])))
            .await
    }
}
