//! Reply gateway response types

use serde::{Deserialize, Serialize};

/// Fixed local reply used when the live endpoint fails or misbehaves.
///
/// The conversation continues normally from this turn; the failure is
/// never surfaced as a crash and never retried automatically.
pub const APOLOGY_REPLY: &str =
    "Sorry, I'm having trouble answering right now. Please try again in a moment.";

/// The reply gateway's response shape
///
/// Playback of a reply is attempted in strict priority order:
/// `speech_url`, then `avatar_video_url`, then on-device synthesis of
/// `text`, each step falling through to the next on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyResult {
    /// Assistant-facing message, always present
    pub text: String,
    /// Remote audio clip to play verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speech_url: Option<String>,
    /// Remote talking-head video with embedded lip-sync audio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_video_url: Option<String>,
    /// Purchasable items surfaced alongside the reply
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommended_items: Vec<Product>,
    /// Mood tag consumed only by presentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
}

impl ReplyResult {
    /// Create a text-only reply
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            speech_url: None,
            avatar_video_url: None,
            recommended_items: Vec::new(),
            expression: None,
        }
    }

    /// The synthetic degraded reply for gateway failures
    pub fn apology() -> Self {
        Self::text(APOLOGY_REPLY)
    }

    pub fn with_speech_url(mut self, url: impl Into<String>) -> Self {
        self.speech_url = Some(url.into());
        self
    }

    pub fn with_avatar_video_url(mut self, url: impl Into<String>) -> Self {
        self.avatar_video_url = Some(url.into());
        self
    }

    pub fn with_recommended_items(mut self, items: Vec<Product>) -> Self {
        self.recommended_items = items;
        self
    }

    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = Some(expression.into());
        self
    }

    /// Whether any product cards should accompany this reply
    pub fn has_recommendations(&self) -> bool {
        !self.recommended_items.is_empty()
    }
}

/// A purchasable item surfaced alongside a reply
///
/// Sourced entirely from the gateway; the widget never persists or
/// mutates catalog data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog id
    pub id: String,
    /// Display title
    pub title: String,
    /// Display price string (already formatted, e.g. "$129.99")
    pub price: String,
    /// Navigation target for the product page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    /// Cart-line identifier for direct add-to-cart
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price: price.into(),
            handle: None,
            variant_id: None,
        }
    }

    pub fn with_handle(mut self, handle: impl Into<String>) -> Self {
        self.handle = Some(handle.into());
        self
    }

    pub fn with_variant_id(mut self, variant_id: impl Into<String>) -> Self {
        self.variant_id = Some(variant_id.into());
        self
    }

    /// The storefront side effect selecting this product triggers.
    ///
    /// Direct cart adds win over navigation when both are possible;
    /// products carrying neither identifier are display-only.
    pub fn cart_action(&self) -> Option<CartAction> {
        if let Some(variant_id) = &self.variant_id {
            return Some(CartAction::AddToCart {
                variant_id: variant_id.clone(),
            });
        }
        self.handle.as_ref().map(|handle| CartAction::ViewProduct {
            handle: handle.clone(),
        })
    }
}

/// Storefront side effect derived from a recommended product.
///
/// Executing the action (cart-add request, page navigation) is the
/// storefront's concern; the core only describes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CartAction {
    AddToCart { variant_id: String },
    ViewProduct { handle: String },
}
