//! Live reply gateway
//!
//! One HTTP POST per conversation turn. Failures of any kind (transport,
//! non-2xx, malformed body) are not retried; they degrade into the fixed
//! apology reply so the conversation continues with a visible turn.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use shopvoice_core::{GatewayMode, HistoryEntry, Product, ReplyGateway, ReplyResult};

use crate::GatewayError;

/// Gateway backed by a configured reply endpoint
pub struct LiveGateway {
    client: Client,
    endpoint: String,
    shop: String,
    access_key: Option<String>,
}

impl LiveGateway {
    /// Create a live gateway.
    pub fn new(
        endpoint: impl Into<String>,
        shop: impl Into<String>,
        access_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Configuration(format!("http client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            shop: shop.into(),
            access_key,
        })
    }

    /// Execute the single request for one turn
    async fn request(
        &self,
        message: &str,
        history: &[HistoryEntry],
    ) -> Result<ReplyResult, GatewayError> {
        let body = ReplyRequest {
            shop: &self.shop,
            message,
            history,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.access_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status.as_u16()));
        }

        let body: ReplyBody = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        if body.text.trim().is_empty() {
            return Err(GatewayError::InvalidResponse(
                "reply body carried no text".to_string(),
            ));
        }

        Ok(body.into())
    }
}

#[async_trait]
impl ReplyGateway for LiveGateway {
    async fn send(&self, message: &str, history: &[HistoryEntry]) -> ReplyResult {
        match self.request(message, history).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "reply endpoint failed, degrading to apology");
                ReplyResult::apology()
            }
        }
    }

    fn mode(&self) -> GatewayMode {
        GatewayMode::Live
    }
}

/// Wire request body
#[derive(Debug, Serialize)]
struct ReplyRequest<'a> {
    shop: &'a str,
    message: &'a str,
    history: &'a [HistoryEntry],
}

/// Wire response body
#[derive(Debug, Deserialize)]
struct ReplyBody {
    text: String,
    #[serde(default)]
    speech_url: Option<String>,
    #[serde(default)]
    avatar_video_url: Option<String>,
    #[serde(default)]
    recommended_products: Vec<WireProduct>,
    #[serde(default)]
    expression: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireProduct {
    id: String,
    title: String,
    price: String,
    #[serde(default)]
    handle: Option<String>,
    #[serde(default)]
    variant_id: Option<String>,
}

impl From<ReplyBody> for ReplyResult {
    fn from(body: ReplyBody) -> Self {
        ReplyResult {
            text: body.text,
            speech_url: body.speech_url,
            avatar_video_url: body.avatar_video_url,
            recommended_items: body
                .recommended_products
                .into_iter()
                .map(|p| Product {
                    id: p.id,
                    title: p.title,
                    price: p.price,
                    handle: p.handle,
                    variant_id: p.variant_id,
                })
                .collect(),
            expression: body.expression,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopvoice_core::{Sender, APOLOGY_REPLY};

    fn unreachable_gateway() -> LiveGateway {
        // port 1 on localhost refuses connections immediately
        LiveGateway::new(
            "http://127.0.0.1:1/v1/chat",
            "acme-audio",
            Some("test-key".to_string()),
            Duration::from_secs(2),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_network_failure_degrades_to_apology() {
        let gateway = unreachable_gateway();
        let history = vec![HistoryEntry::new(Sender::User, "earlier question")];

        let reply = gateway.send("do you have headphones?", &history).await;

        assert_eq!(reply.text, APOLOGY_REPLY);
        assert!(reply.recommended_items.is_empty());
        assert!(reply.speech_url.is_none());
        assert!(reply.avatar_video_url.is_none());
    }

    #[test]
    fn test_request_body_shape() {
        let history = vec![
            HistoryEntry::new(Sender::User, "hi"),
            HistoryEntry::new(Sender::Assistant, "hello!"),
        ];
        let body = ReplyRequest {
            shop: "acme-audio",
            message: "any deals?",
            history: &history,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["shop"], "acme-audio");
        assert_eq!(json["message"], "any deals?");
        assert_eq!(json["history"][0]["role"], "user");
        assert_eq!(json["history"][1]["role"], "assistant");
    }

    #[test]
    fn test_reply_body_decoding() {
        let body: ReplyBody = serde_json::from_str(
            r#"{
                "text": "Check these out",
                "speech_url": "https://cdn.example.com/r.mp3",
                "recommended_products": [
                    {"id": "p1", "title": "Headphones", "price": "$129.99", "variant_id": "v42"}
                ],
                "expression": "excited"
            }"#,
        )
        .unwrap();

        let reply: ReplyResult = body.into();
        assert_eq!(reply.text, "Check these out");
        assert_eq!(reply.speech_url.as_deref(), Some("https://cdn.example.com/r.mp3"));
        assert!(reply.avatar_video_url.is_none());
        assert_eq!(reply.recommended_items.len(), 1);
        assert_eq!(reply.recommended_items[0].variant_id.as_deref(), Some("v42"));
    }

    #[test]
    fn test_empty_text_is_invalid() {
        let body: ReplyBody = serde_json::from_str(r#"{"text": "   "}"#).unwrap();
        assert!(body.text.trim().is_empty());
    }
}
