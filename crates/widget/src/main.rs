//! Headless widget demo
//!
//! Drives the orchestration core from stdin, acting as a minimal
//! presentation layer: it submits typed lines and renders replies and
//! recommendations as text. With no endpoint configured it runs against
//! the mock gateway, which is the point - the full submission path is
//! exercised offline.
//!
//! Usage: `shopvoice-demo [settings.toml]`

use std::io::Write as _;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use shopvoice_config::{load_settings, PersonaCatalog};
use shopvoice_gateway::build_gateway;
use shopvoice_speech::{NullSpeechInput, NullSpeechOutput};
use shopvoice_widget::{gateway_options, MemoryPreferenceStore, SubmitOutcome, WidgetController};

#[tokio::main]
async fn main() -> shopvoice_core::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings_path = std::env::args().nth(1);
    let settings = load_settings(settings_path.as_deref())?;

    let gateway = build_gateway(&gateway_options(&settings))?;
    let widget = WidgetController::new(
        &settings,
        PersonaCatalog::builtin(),
        gateway,
        Arc::new(NullSpeechInput),
        Arc::new(NullSpeechOutput),
        Arc::new(MemoryPreferenceStore::new()),
    );

    widget.set_open(true);
    let persona = widget.current_persona();
    println!("{} ({} mode)", persona.greeting, widget.gateway_mode());
    println!("Type a message, or 'quit' to exit.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("you> ");
        let _ = std::io::stdout().flush();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            _ => break,
        };
        if line.trim() == "quit" {
            break;
        }

        match widget.submit(&line).await {
            Ok(SubmitOutcome::Replied(reply)) => {
                println!("{}> {}", widget.current_persona().display_name, reply.text);
                for product in &reply.recommended_items {
                    println!("      * {} - {}", product.title, product.price);
                }
            }
            Ok(SubmitOutcome::Ignored) => {}
            Err(e) => tracing::warn!(error = %e, "submission failed"),
        }
    }

    Ok(())
}
