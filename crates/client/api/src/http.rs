//! reqwest-backed [`GameApi`] implementation.
use async_trait::async_trait;
use combat_core::{CombatActionKind, CombatState};
use reqwest::{RequestBuilder, Url};
use serde::{Serialize, de::DeserializeOwned};

use crate::config::ApiConfig;
use crate::error::{ApiError, Result};
use crate::traits::GameApi;
use crate::types::{
    CombatActionRequest, CombatActionResponse, EnergyStatus, NpcBattleResult, WorldTime,
};

/// Game server client speaking JSON over HTTP.
#[derive(Clone, Debug)]
pub struct HttpGameApi {
    base_url: Url,
    token: Option<String>,
    http_client: reqwest::Client,
}

impl HttpGameApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(config.base_url.clone()));
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            base_url,
            token: config.token.clone(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL from path segments, escaping each one.
    ///
    /// A path prefix on the base URL (e.g. `https://host/game/`) is preserved.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T>(&self, segments: &[&str]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments);
        let request = self.http_client.get(url.clone());
        self.send(url, request).await
    }

    async fn post_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments);
        let request = self.http_client.post(url.clone()).json(body);
        self.send(url, request).await
    }

    async fn send<T>(&self, url: Url, request: RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let endpoint = url.path().to_string();
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        tracing::trace!(%endpoint, "sending request");

        let response = request.send().await.map_err(|source| {
            if source.is_timeout() {
                ApiError::Timeout {
                    endpoint: endpoint.clone(),
                }
            } else {
                ApiError::Network {
                    endpoint: endpoint.clone(),
                    source,
                }
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| ApiError::Network {
            endpoint: endpoint.clone(),
            source,
        })?;

        if !status.is_success() {
            let message = error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());
            tracing::debug!(%endpoint, status = status.as_u16(), %message, "request rejected");
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|source| {
            tracing::warn!(%endpoint, raw = %body, "failed to decode response");
            ApiError::Decode { endpoint, source }
        })
    }
}

#[async_trait]
impl GameApi for HttpGameApi {
    async fn fetch_combat(&self, challenge_id: &str) -> Result<CombatState> {
        self.get_json(&["api", "challenges", challenge_id, "combat"])
            .await
    }

    async fn submit_combat_action(
        &self,
        challenge_id: &str,
        action: CombatActionKind,
    ) -> Result<CombatActionResponse> {
        self.post_json(
            &["api", "challenges", challenge_id, "combat-action"],
            &CombatActionRequest { action },
        )
        .await
    }

    async fn fetch_world_time(&self) -> Result<WorldTime> {
        self.get_json(&["api", "world-time"]).await
    }

    async fn fetch_energy(&self) -> Result<EnergyStatus> {
        self.get_json(&["api", "energy"]).await
    }

    async fn fight_npc(&self, npc_id: &str) -> Result<NpcBattleResult> {
        self.post_json(&["api", "npcs", npc_id, "battle"], &serde_json::json!({}))
            .await
    }
}

/// Extract a human-readable message from an error response body.
///
/// Accepts `{"message": ".."}`, `{"error": ".."}` or plain text.
fn error_message(body: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: Option<String>,
        error: Option<String>,
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<ErrorBody>(trimmed) {
        Ok(parsed) => parsed
            .message
            .or(parsed.error)
            .filter(|message| !message.is_empty()),
        Err(_) => Some(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpGameApi {
        HttpGameApi::new(&ApiConfig::new(base)).unwrap()
    }

    #[test]
    fn endpoint_joins_segments() {
        let api = api("http://localhost:5000");
        assert_eq!(
            api.endpoint(&["api", "challenges", "42", "combat"]).as_str(),
            "http://localhost:5000/api/challenges/42/combat"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let api = api("https://example.com/game/");
        assert_eq!(
            api.endpoint(&["api", "world-time"]).as_str(),
            "https://example.com/game/api/world-time"
        );
    }

    #[test]
    fn endpoint_escapes_ids() {
        let api = api("http://localhost:5000");
        assert_eq!(
            api.endpoint(&["api", "npcs", "cave troll/2", "battle"]).path(),
            "/api/npcs/cave%20troll%2F2/battle"
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        let error = HttpGameApi::new(&ApiConfig::new("not a url")).unwrap_err();
        assert!(matches!(error, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn error_message_prefers_json_fields() {
        assert_eq!(
            error_message(r#"{"message":"Not your turn"}"#).as_deref(),
            Some("Not your turn")
        );
        assert_eq!(
            error_message(r#"{"error":"Challenge not found"}"#).as_deref(),
            Some("Challenge not found")
        );
        assert_eq!(error_message("Bad Gateway").as_deref(), Some("Bad Gateway"));
        assert_eq!(error_message("   "), None);
        assert_eq!(error_message(r#"{"message":""}"#), None);
    }
}
