//! Speech input adapter
//!
//! Wraps the host's dictation capability into a single-shot
//! `Idle -> Listening -> Idle` state machine with start/stop/result/error
//! events. No continuous recognition: a successful capture emits exactly
//! one transcript and returns to idle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};

use shopvoice_core::{Error, Result, SpeechInputProvider};

/// Events emitted by the adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechInputEvent {
    /// Capture started; the widget shows the listening indicator
    Started,
    /// Exactly one per successful utterance; routed into the same
    /// submission path as typed input
    Transcript(String),
    /// Capture ended without a transcript (user cancel or silence)
    Stopped,
    /// Non-fatal recognition failure; the adapter is idle again and no
    /// retry happens automatically
    Error(String),
}

/// Single-shot dictation adapter
///
/// At most one recognition session exists per adapter. `start` while
/// listening is a no-op; `stop` while idle is a no-op.
pub struct SpeechInput {
    provider: Arc<dyn SpeechInputProvider>,
    listening: Arc<AtomicBool>,
    cancel_tx: Mutex<Option<watch::Sender<bool>>>,
    event_tx: mpsc::Sender<SpeechInputEvent>,
}

impl SpeechInput {
    /// Create the adapter and the event stream its session tasks feed.
    pub fn new(
        provider: Arc<dyn SpeechInputProvider>,
    ) -> (Self, mpsc::Receiver<SpeechInputEvent>) {
        let (event_tx, event_rx) = mpsc::channel(16);
        (
            Self {
                provider,
                listening: Arc::new(AtomicBool::new(false)),
                cancel_tx: Mutex::new(None),
                event_tx,
            },
            event_rx,
        )
    }

    /// Whether a capture session is currently active
    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::Acquire)
    }

    /// Begin a single-shot capture.
    ///
    /// Fails with [`Error::UnsupportedCapability`] when the host exposes
    /// no dictation capability; the caller surfaces this to the user and
    /// the adapter stays idle. Every other failure mode (device,
    /// permission, network) is reported through the event stream instead,
    /// since it can strike mid-capture just as well as up front.
    pub async fn start(&self) -> Result<()> {
        if !self.provider.is_available() {
            return Err(Error::UnsupportedCapability(format!(
                "{} exposes no dictation capability",
                self.provider.provider_name()
            )));
        }

        // claim the single session slot; a second start while listening
        // is a no-op, not an error
        if self
            .listening
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("start() while listening ignored");
            return Ok(());
        }

        let mut session = match self.provider.open_session().await {
            Ok(session) => session,
            Err(e) => {
                self.listening.store(false, Ordering::Release);
                if matches!(e, Error::UnsupportedCapability(_)) {
                    return Err(e);
                }
                tracing::warn!(error = %e, "recognition session failed to open");
                let _ = self.event_tx.send(SpeechInputEvent::Error(e.to_string())).await;
                return Ok(());
            }
        };

        let (cancel_tx, mut cancel_rx) = watch::channel(false);
        *self.cancel_tx.lock() = Some(cancel_tx);

        let listening = Arc::clone(&self.listening);
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            let _ = event_tx.send(SpeechInputEvent::Started).await;

            let outcome = tokio::select! {
                biased;
                _ = cancel_rx.changed() => None,
                result = session.transcript() => Some(result),
            };

            let event = match outcome {
                None => {
                    session.cancel().await;
                    SpeechInputEvent::Stopped
                }
                Some(Ok(Some(text))) => SpeechInputEvent::Transcript(text),
                Some(Ok(None)) => SpeechInputEvent::Stopped,
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "recognition failed");
                    SpeechInputEvent::Error(e.to_string())
                }
            };

            listening.store(false, Ordering::Release);
            let _ = event_tx.send(event).await;
        });

        Ok(())
    }

    /// Cancel the active capture without emitting a transcript.
    /// Idempotent: stopping while idle is a no-op.
    pub fn stop(&self) {
        if !self.is_listening() {
            return;
        }
        if let Some(cancel) = self.cancel_tx.lock().take() {
            let _ = cancel.send(true);
        }
    }
}
