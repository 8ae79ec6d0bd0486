//! One user's chat session: the Idle → Sending → (Idle | Failed) cycle.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use coach_core::{
    Conversation, ConversationTurn, CompletionRequest, GenerationError, Identity,
    PromptFingerprint, TextGenerator,
};
use tokio::sync::RwLock;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::aggregator::HealthContextAggregator;
use crate::conversation::ConversationStore;
use crate::error::{CoachError, FailureKind};
use crate::observer::SessionObserver;
use crate::prompt::PromptBuilder;

/// Predefined shortcut messages offered next to the input field.
pub const QUICK_PROMPTS: [&str; 4] = [
    "Suggest a workout for today",
    "What should I eat for dinner?",
    "Help me sleep better",
    "I'm feeling stressed",
];

const GREETING_BODY: &str =
    "I'm your AI health coach. Ask me anything about workouts, nutrition, sleep, or stress management.";

/// Where a session is in its request cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing in flight.
    Idle,
    /// An exchange is in flight; the assistant is "typing".
    Sending,
    /// The last exchange failed. Nothing was persisted.
    Failed { kind: FailureKind, message: String },
}

impl SessionState {
    pub fn is_sending(&self) -> bool {
        matches!(self, SessionState::Sending)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SessionState::Failed { .. })
    }
}

/// Result of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The exchange completed and was persisted; carries the reply.
    Replied(String),
    /// Nothing was sent.
    Ignored(IgnoreReason),
}

/// Why a submission was not sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Another exchange is already in flight.
    Busy,
    /// The message was empty or whitespace.
    EmptyMessage,
    /// No quick prompt at that index.
    UnknownQuickPrompt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    /// The input field; cleared on success if still unchanged.
    Input,
    /// A shortcut or direct text; the input field is left alone.
    Direct,
}

#[derive(Debug)]
struct SessionInner {
    state: SessionState,
    input: String,
    conversation: Option<Conversation>,
    /// The in-flight user message, shown before it is persisted.
    pending: Option<ConversationTurn>,
}

/// Collaborators a session is assembled from.
pub(crate) struct SessionParts {
    pub identity: Identity,
    pub today: NaiveDate,
    pub conversation: Option<Conversation>,
    pub aggregator: HealthContextAggregator,
    pub conversations: ConversationStore,
    pub prompts: PromptBuilder,
    pub generator: Arc<dyn TextGenerator>,
    pub observer: Arc<dyn SessionObserver>,
    pub generation_timeout: Option<Duration>,
}

/// A chat session scoped to one authenticated user.
///
/// At most one exchange is in flight at a time: submitting while Sending is
/// a no-op. `today` is fixed when the session opens.
pub struct ChatSession {
    identity: Identity,
    today: NaiveDate,
    aggregator: HealthContextAggregator,
    conversations: ConversationStore,
    prompts: PromptBuilder,
    generator: Arc<dyn TextGenerator>,
    observer: Arc<dyn SessionObserver>,
    generation_timeout: Option<Duration>,
    inner: RwLock<SessionInner>,
}

impl ChatSession {
    pub(crate) fn new(parts: SessionParts) -> Self {
        Self {
            identity: parts.identity,
            today: parts.today,
            aggregator: parts.aggregator,
            conversations: parts.conversations,
            prompts: parts.prompts,
            generator: parts.generator,
            observer: parts.observer,
            generation_timeout: parts.generation_timeout,
            inner: RwLock::new(SessionInner {
                state: SessionState::Idle,
                input: String::new(),
                conversation: parts.conversation,
                pending: None,
            }),
        }
    }

    /// The user this session acts for.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// The calendar date the session treats as "today".
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub async fn state(&self) -> SessionState {
        self.inner.read().await.state.clone()
    }

    /// Whether the assistant typing indicator should show.
    pub async fn is_typing(&self) -> bool {
        self.inner.read().await.state.is_sending()
    }

    pub async fn input(&self) -> String {
        self.inner.read().await.input.clone()
    }

    pub async fn set_input(&self, text: impl Into<String>) {
        self.inner.write().await.input = text.into();
    }

    /// The persisted conversation, if one exists yet.
    pub async fn conversation(&self) -> Option<Conversation> {
        self.inner.read().await.conversation.clone()
    }

    /// Persisted turns followed by the in-flight user message, if any.
    pub async fn visible_turns(&self) -> Vec<ConversationTurn> {
        let inner = self.inner.read().await;
        let mut turns = inner
            .conversation
            .as_ref()
            .map(|c| c.messages.clone())
            .unwrap_or_default();
        turns.extend(inner.pending.iter().cloned());
        turns
    }

    /// Welcome text for an empty conversation.
    pub fn greeting(&self) -> String {
        let name = self.identity.first_name().unwrap_or("there");
        format!("Hi, {name}!\n{GREETING_BODY}")
    }

    /// The shortcut messages offered to the user.
    pub fn quick_prompts(&self) -> &'static [&'static str] {
        &QUICK_PROMPTS
    }

    /// Send the current input field.
    ///
    /// On success the input is cleared unless it was edited while sending;
    /// on failure it is kept so the user can resubmit.
    pub async fn submit(&self) -> Result<SubmitOutcome, CoachError> {
        let text = self.inner.read().await.input.clone();
        self.send(text, Source::Input).await
    }

    /// Send `text` without touching the input field.
    pub async fn submit_text(&self, text: impl Into<String>) -> Result<SubmitOutcome, CoachError> {
        self.send(text.into(), Source::Direct).await
    }

    /// Send one of the [`QUICK_PROMPTS`].
    pub async fn submit_quick_prompt(&self, index: usize) -> Result<SubmitOutcome, CoachError> {
        match QUICK_PROMPTS.get(index) {
            Some(prompt) => self.send((*prompt).to_string(), Source::Direct).await,
            None => Ok(SubmitOutcome::Ignored(IgnoreReason::UnknownQuickPrompt)),
        }
    }

    /// Leave the Failed state without sending anything.
    pub async fn dismiss_error(&self) {
        let dismissed = {
            let mut inner = self.inner.write().await;
            if inner.state.is_failed() {
                inner.state = SessionState::Idle;
                true
            } else {
                false
            }
        };
        if dismissed {
            self.observer
                .state_changed(&self.identity.id, &SessionState::Idle)
                .await;
        }
    }

    /// Re-read the active conversation from the store.
    ///
    /// Returns `false` without reading while an exchange is in flight.
    pub async fn reload(&self) -> Result<bool, CoachError> {
        if self.is_typing().await {
            return Ok(false);
        }

        let loaded = self
            .conversations
            .load(&self.identity.id)
            .await
            .map_err(CoachError::Load)?;

        let mut inner = self.inner.write().await;
        if inner.state.is_sending() {
            return Ok(false);
        }
        inner.conversation = loaded.clone();
        drop(inner);

        if let Some(conversation) = &loaded {
            self.observer
                .conversation_updated(&self.identity.id, conversation)
                .await;
        }
        Ok(true)
    }

    async fn send(&self, text: String, source: Source) -> Result<SubmitOutcome, CoachError> {
        let owner = self.identity.id.as_str();

        let conversation = {
            let mut inner = self.inner.write().await;
            if inner.state.is_sending() {
                debug!("Ignoring submission from {} while sending", owner);
                return Ok(SubmitOutcome::Ignored(IgnoreReason::Busy));
            }
            if text.trim().is_empty() {
                return Ok(SubmitOutcome::Ignored(IgnoreReason::EmptyMessage));
            }
            inner.state = SessionState::Sending;
            inner.pending = Some(ConversationTurn::user(text.as_str()));
            inner.conversation.clone()
        };

        info!("Sending coach message from {}: {} chars", owner, text.len());
        self.observer
            .state_changed(owner, &SessionState::Sending)
            .await;

        let result = self.exchange(&text, conversation.as_ref()).await;

        let mut inner = self.inner.write().await;
        inner.pending = None;
        match result {
            Ok(saved) => {
                let reply = saved
                    .last_turn()
                    .map(|turn| turn.content.clone())
                    .unwrap_or_default();
                inner.state = SessionState::Idle;
                inner.conversation = Some(saved.clone());
                if source == Source::Input && inner.input == text {
                    inner.input.clear();
                }
                drop(inner);

                self.observer.conversation_updated(owner, &saved).await;
                self.observer
                    .state_changed(owner, &SessionState::Idle)
                    .await;
                Ok(SubmitOutcome::Replied(reply))
            }
            Err(e) => {
                let state = SessionState::Failed {
                    kind: e.kind(),
                    message: e.to_string(),
                };
                inner.state = state.clone();
                drop(inner);

                warn!("Coach exchange for {} failed: {}", owner, e);
                self.observer.state_changed(owner, &state).await;
                Err(e)
            }
        }
    }

    /// Aggregate, prompt, generate, persist. Nothing is written unless every
    /// earlier step succeeded.
    async fn exchange(
        &self,
        text: &str,
        conversation: Option<&Conversation>,
    ) -> Result<Conversation, CoachError> {
        let snapshot = self.aggregator.aggregate(&self.identity, self.today).await?;
        let context_summary = snapshot.render();

        let history = conversation.map(|c| c.messages.as_slice()).unwrap_or(&[]);
        let prompt = self.prompts.build(&snapshot, history, text);
        let fingerprint = PromptFingerprint::of(&prompt);
        info!(
            "Built prompt {} ({} chars, {} history turns)",
            fingerprint.short(),
            prompt.len(),
            history.len()
        );
        debug!("Prompt {}:\n{}", fingerprint.short(), prompt);

        let reply = self.generate(prompt).await?;
        info!(
            "Generated reply for prompt {}: {} chars",
            fingerprint.short(),
            reply.len()
        );

        self.conversations
            .append_exchange(
                &self.identity.id,
                conversation,
                text,
                &reply,
                &context_summary,
                self.today,
            )
            .await
    }

    async fn generate(&self, prompt: String) -> Result<String, GenerationError> {
        let request = CompletionRequest::text(prompt);
        let completion = match self.generation_timeout {
            Some(limit) => timeout(limit, self.generator.complete(request))
                .await
                .map_err(|_| GenerationError::Timeout(limit))??,
            None => self.generator.complete(request).await?,
        };

        if completion.is_blank() {
            return Err(GenerationError::EmptyReply);
        }
        Ok(completion.into_text())
    }
}
