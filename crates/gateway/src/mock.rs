//! Mock reply gateway
//!
//! Deterministic keyword-driven simulation of the reply service, used
//! when no endpoint is configured. Indistinguishable in interface shape
//! from live mode; an artificial delay emulates endpoint latency so UI
//! states (typing indicator, send lockout) can be exercised offline.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;

use shopvoice_core::{GatewayMode, HistoryEntry, Product, ReplyGateway, ReplyResult};

/// Generic replies for messages matching no catalog keyword
pub const FILLER_REPLIES: [&str; 4] = [
    "That's a great question! Could you tell me a little more about what you're looking for?",
    "I can help with product picks, orders and store info. What would you like to know?",
    "Happy to help! Are you browsing for yourself or looking for a gift?",
    "Let me know what you're after and I'll see what we have in stock.",
];

/// One keyword-triggered canned pairing
struct CatalogEntry {
    keywords: &'static [&'static str],
    reply: &'static str,
    product: fn() -> Product,
}

static CATALOG: Lazy<Vec<CatalogEntry>> = Lazy::new(|| {
    vec![
        CatalogEntry {
            keywords: &["headphone", "headset"],
            reply: "You'll love these - our best-selling over-ears with active noise cancelling.",
            product: || {
                Product::new("mock-hp-01", "Premium Wireless Headphones", "$129.99")
                    .with_handle("premium-wireless-headphones")
                    .with_variant_id("44519234567")
            },
        },
        CatalogEntry {
            keywords: &["speaker"],
            reply: "This portable speaker punches well above its size, and it's waterproof.",
            product: || {
                Product::new("mock-sp-01", "Portable Bluetooth Speaker", "$89.99")
                    .with_handle("portable-bluetooth-speaker")
                    .with_variant_id("44519234601")
            },
        },
        CatalogEntry {
            keywords: &["watch", "tracker"],
            reply: "Our fitness watch tracks heart rate, sleep and workouts for a full week per charge.",
            product: || {
                Product::new("mock-fw-01", "Fitness Smart Watch", "$199.99")
                    .with_handle("fitness-smart-watch")
                    .with_variant_id("44519234688")
            },
        },
        CatalogEntry {
            keywords: &["earbud", "airpod"],
            reply: "These true-wireless earbuds are tiny, punchy and come with a charging case.",
            product: || {
                Product::new("mock-eb-01", "True Wireless Earbuds", "$74.99")
                    .with_handle("true-wireless-earbuds")
                    .with_variant_id("44519234712")
            },
        },
    ]
});

/// Local simulated responder
pub struct MockGateway {
    latency: Duration,
    filler_cursor: AtomicUsize,
}

impl MockGateway {
    /// Create a mock gateway with the given artificial latency.
    ///
    /// Tests pass `Duration::ZERO`; deployments keep a few hundred
    /// milliseconds so the typing indicator is visible.
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            filler_cursor: AtomicUsize::new(0),
        }
    }

    /// Match a lower-cased message against the catalog table
    fn match_catalog(message: &str) -> Option<&'static CatalogEntry> {
        CATALOG
            .iter()
            .find(|entry| entry.keywords.iter().any(|kw| message.contains(kw)))
    }

    /// Next filler reply; a rotating cursor stands in for randomness so
    /// runs are reproducible
    fn next_filler(&self) -> &'static str {
        let idx = self.filler_cursor.fetch_add(1, Ordering::Relaxed);
        FILLER_REPLIES[idx % FILLER_REPLIES.len()]
    }
}

#[async_trait]
impl ReplyGateway for MockGateway {
    async fn send(&self, message: &str, _history: &[HistoryEntry]) -> ReplyResult {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let lowered = message.to_lowercase();
        match Self::match_catalog(&lowered) {
            Some(entry) => {
                tracing::debug!(keyword_match = true, "mock reply with recommendation");
                ReplyResult::text(entry.reply)
                    .with_recommended_items(vec![(entry.product)()])
                    .with_expression("excited")
            }
            None => ReplyResult::text(self.next_filler()),
        }
    }

    fn mode(&self) -> GatewayMode {
        GatewayMode::Mock
    }
}
