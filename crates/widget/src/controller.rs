//! Widget controller
//!
//! Top-level state machine coordinating open/closed, listening, typing,
//! mute and persona selection, and wiring user actions to the
//! conversation store, the reply gateway and the speech subsystem.
//! Presentation layers subscribe to the emitted [`WidgetEvent`] stream
//! and never reach into the core.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::sync::{broadcast, mpsc};

use shopvoice_config::{PersonaCatalog, Settings};
use shopvoice_core::{
    pref_keys, Error, GatewayMode, Persona, PreferenceStore, ReplyGateway, ReplyResult, Result,
    SpeechInputProvider, SpeechOutputProvider, Turn, TurnCategory,
};
use shopvoice_speech::{OutputChain, SpeechInput, SpeechInputEvent};

use crate::state::WidgetState;
use crate::store::{Appended, ConversationStore};

/// Events emitted for presentation layers
#[derive(Debug, Clone)]
pub enum WidgetEvent {
    /// Any state flag changed; carries the full snapshot
    StateChanged(WidgetState),
    /// A turn was appended; the transcript should re-render and scroll
    /// to the latest entry
    TurnAppended(Turn),
    /// A new submission started; stale product cards must disappear
    RecommendationsCleared,
    /// The gateway reply for the current submission arrived
    ReplyReceived(ReplyResult),
    /// Non-fatal speech failure worth surfacing (e.g. mic permission)
    SpeechError(String),
}

/// What a call to [`WidgetController::submit`] did
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Empty input or a pending duplicate; nothing happened
    Ignored,
    /// The exchange completed with this reply
    Replied(ReplyResult),
}

/// Top-level widget state machine
pub struct WidgetController {
    personas: PersonaCatalog,
    store: ConversationStore,
    state: RwLock<WidgetState>,
    gateway: Arc<dyn ReplyGateway>,
    input: SpeechInput,
    speech_events: Mutex<Option<mpsc::Receiver<SpeechInputEvent>>>,
    chain: Arc<OutputChain>,
    voice_replies: bool,
    prefs: Arc<dyn PreferenceStore>,
    event_tx: broadcast::Sender<WidgetEvent>,
}

impl WidgetController {
    /// Assemble a widget instance.
    ///
    /// All collaborators are resolved here, once: the gateway strategy,
    /// the speech providers and the preference store are fixed for the
    /// widget's lifetime. Durable preferences are read now; absent keys
    /// fall back to the settings defaults.
    pub fn new(
        settings: &Settings,
        personas: PersonaCatalog,
        gateway: Arc<dyn ReplyGateway>,
        input_provider: Arc<dyn SpeechInputProvider>,
        output_provider: Arc<dyn SpeechOutputProvider>,
        prefs: Arc<dyn PreferenceStore>,
    ) -> Arc<Self> {
        let (event_tx, _) = broadcast::channel(100);
        let (input, speech_events) = SpeechInput::new(input_provider);
        let chain = Arc::new(OutputChain::new(output_provider));

        let muted = read_bool(&*prefs, pref_keys::MUTED, settings.widget.default_muted);
        let open = read_bool(&*prefs, pref_keys::OPEN, settings.widget.default_open);
        let persona_id = prefs
            .get(pref_keys::PERSONA)
            .unwrap_or_else(|| settings.widget.default_persona.clone());
        // a stored id that left the catalog falls back to the default
        let persona_id = personas.resolve(&persona_id).id.clone();

        chain.set_muted(muted);

        let mut state = WidgetState::new(persona_id);
        state.is_open = open;
        state.is_muted = muted;

        tracing::debug!(
            gateway = %gateway.mode(),
            open,
            muted,
            persona = %state.selected_persona,
            "widget assembled"
        );

        Arc::new(Self {
            personas,
            store: ConversationStore::new(),
            state: RwLock::new(state),
            gateway,
            input,
            speech_events: Mutex::new(Some(speech_events)),
            chain,
            voice_replies: settings.speech.voice_replies,
            prefs,
            event_tx,
        })
    }

    /// Subscribe to widget events
    pub fn subscribe(&self) -> broadcast::Receiver<WidgetEvent> {
        self.event_tx.subscribe()
    }

    /// Current state snapshot
    pub fn state(&self) -> WidgetState {
        self.state.read().clone()
    }

    /// The conversation log
    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// Which gateway strategy this instance runs against
    pub fn gateway_mode(&self) -> GatewayMode {
        self.gateway.mode()
    }

    /// The persona driving voice and presentation right now
    pub fn current_persona(&self) -> Persona {
        let id = self.state.read().selected_persona.clone();
        self.personas.resolve(&id).clone()
    }

    /// Submit one conversation turn, typed or recognized.
    ///
    /// Empty or whitespace-only input is a silent no-op. A submission
    /// while a reply is in flight fails with [`Error::ReplyInFlight`];
    /// the single-in-flight rule is enforced here, not left to the UI.
    /// The user turn is appended before the gateway call is issued and
    /// the assistant turn only after that call resolves, so store order
    /// always equals submission-initiation order.
    pub async fn submit(&self, text: &str) -> Result<SubmitOutcome> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(SubmitOutcome::Ignored);
        }

        {
            let mut state = self.state.write();
            if state.is_typing {
                return Err(Error::ReplyInFlight);
            }
            state.is_typing = true;
            // stale recommendations must never linger once a new
            // question is asked
            state.last_reply = None;
        }
        self.emit(WidgetEvent::RecommendationsCleared);

        // history sent along excludes the message itself
        let history = self.store.snapshot_as_history();

        let user_turn = Turn::user(text);
        match self.store.append(user_turn.clone()) {
            Ok(Appended::Appended) => {
                self.emit(WidgetEvent::TurnAppended(user_turn));
                self.emit_state();
            }
            Ok(Appended::Deduplicated) => {
                self.clear_typing();
                return Ok(SubmitOutcome::Ignored);
            }
            Err(e) => {
                self.clear_typing();
                return Err(e);
            }
        }

        let reply = self.gateway.send(text, &history).await;

        // typing clears on every path; a failed append below must not
        // leave the indicator stuck
        {
            let mut state = self.state.write();
            state.is_typing = false;
            state.last_reply = Some(reply.clone());
        }
        self.emit_state();

        let mut assistant_turn = Turn::assistant(&reply.text).with_category(
            if reply.has_recommendations() {
                TurnCategory::Store
            } else {
                TurnCategory::General
            },
        );
        if let Some(url) = &reply.speech_url {
            assistant_turn = assistant_turn.with_audio_url(url);
        }
        self.store.append(assistant_turn.clone())?;
        self.emit(WidgetEvent::TurnAppended(assistant_turn));
        self.emit(WidgetEvent::ReplyReceived(reply.clone()));

        // voicing is fire-and-forget; the transcript already shows the text
        if self.voice_replies {
            let chain = Arc::clone(&self.chain);
            let voice = self.current_persona().voice;
            let voiced = reply.clone();
            tokio::spawn(async move {
                let played = chain.speak(&voiced, &voice).await;
                tracing::debug!(?played, "reply playback dispatched");
            });
        }

        Ok(SubmitOutcome::Replied(reply))
    }

    /// Begin a single-shot dictation capture.
    ///
    /// Surfaces [`Error::UnsupportedCapability`] so the host can alert
    /// the user; every other failure arrives as a [`WidgetEvent`].
    pub async fn start_listening(&self) -> Result<()> {
        self.input.start().await
    }

    /// Cancel the active capture, if any
    pub fn stop_listening(&self) {
        self.input.stop();
    }

    /// Consume the speech event stream, feeding transcripts into the
    /// submission path. Call once; returns `None` on later calls.
    pub fn spawn_speech_loop(self: Arc<Self>) -> Option<tokio::task::JoinHandle<()>> {
        let mut events = self.speech_events.lock().take()?;
        let controller = self;
        Some(tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                controller.handle_speech_event(event).await;
            }
        }))
    }

    /// Apply one speech input event
    pub async fn handle_speech_event(&self, event: SpeechInputEvent) {
        match event {
            SpeechInputEvent::Started => {
                self.state.write().is_listening = true;
                self.emit_state();
            }
            SpeechInputEvent::Transcript(text) => {
                self.state.write().is_listening = false;
                self.emit_state();
                match self.submit(&text).await {
                    Ok(_) => {}
                    Err(Error::ReplyInFlight) => {
                        tracing::debug!("transcript dropped, reply already in flight");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "voice submission failed");
                    }
                }
            }
            SpeechInputEvent::Stopped => {
                self.state.write().is_listening = false;
                self.emit_state();
            }
            SpeechInputEvent::Error(message) => {
                self.state.write().is_listening = false;
                self.emit_state();
                self.emit(WidgetEvent::SpeechError(message));
            }
        }
    }

    /// Open or close the widget panel
    pub fn set_open(&self, open: bool) {
        self.state.write().is_open = open;
        self.write_pref(pref_keys::OPEN, bool_str(open));
        self.emit_state();
    }

    /// Toggle the panel; returns the new value
    pub fn toggle_open(&self) -> bool {
        let open = {
            let mut state = self.state.write();
            state.is_open = !state.is_open;
            state.is_open
        };
        self.write_pref(pref_keys::OPEN, bool_str(open));
        self.emit_state();
        open
    }

    /// Mute or unmute speech output.
    ///
    /// Takes effect immediately: muting stops in-flight playback, the
    /// transcript is never rewritten, and unmuting resumes nothing.
    pub fn set_muted(&self, muted: bool) {
        self.chain.set_muted(muted);
        self.state.write().is_muted = muted;
        self.write_pref(pref_keys::MUTED, bool_str(muted));
        self.emit_state();
    }

    /// Select a different persona.
    ///
    /// Conversation history is untouched; only the visual identity and
    /// the voice parameters of subsequent output change.
    pub fn select_persona(&self, id: &str) -> Result<()> {
        if self.personas.get(id).is_none() {
            return Err(Error::UnknownPersona(id.to_string()));
        }
        self.state.write().selected_persona = id.to_string();
        self.write_pref(pref_keys::PERSONA, id);
        self.emit_state();
        Ok(())
    }

    fn clear_typing(&self) {
        self.state.write().is_typing = false;
        self.emit_state();
    }

    fn emit(&self, event: WidgetEvent) {
        let _ = self.event_tx.send(event);
    }

    fn emit_state(&self) {
        self.emit(WidgetEvent::StateChanged(self.state()));
    }

    fn write_pref(&self, key: &str, value: &str) {
        if let Err(e) = self.prefs.set(key, value) {
            // preferences are convenience, never worth failing the action
            tracing::warn!(error = %e, key, "preference write failed");
        }
    }
}

fn read_bool(prefs: &dyn PreferenceStore, key: &str, default: bool) -> bool {
    match prefs.get(key).as_deref() {
        Some("true") => true,
        Some("false") => false,
        _ => default,
    }
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
