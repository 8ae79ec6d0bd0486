//! Session factory.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use coach_core::{Identity, IdentityProvider, TextGenerator};
use tracing::info;

use crate::aggregator::HealthContextAggregator;
use crate::config::CoachConfig;
use crate::conversation::ConversationStore;
use crate::error::CoachError;
use crate::observer::{NoOpObserver, SessionObserver};
use crate::prompt::PromptBuilder;
use crate::session::{ChatSession, SessionParts};
use crate::store::EntityStore;

/// Opens chat sessions over a shared store and generator.
#[derive(Clone)]
pub struct Coach {
    store: Arc<dyn EntityStore>,
    generator: Arc<dyn TextGenerator>,
    observer: Arc<dyn SessionObserver>,
    config: CoachConfig,
}

impl Coach {
    /// Create a coach with the given collaborators.
    pub fn new(
        store: Arc<dyn EntityStore>,
        generator: Arc<dyn TextGenerator>,
        config: CoachConfig,
    ) -> Self {
        Self {
            store,
            generator,
            observer: Arc::new(NoOpObserver),
            config,
        }
    }

    /// Notify `observer` of state changes in every session opened afterwards.
    pub fn with_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &CoachConfig {
        &self.config
    }

    /// Resolve the signed-in user and open a session for today.
    pub async fn open_session(
        &self,
        identity: &dyn IdentityProvider,
    ) -> Result<ChatSession, CoachError> {
        let identity = identity.who_am_i().await?;
        self.open_session_for(identity, Local::now().date_naive())
            .await
    }

    /// Open a session for `identity`, treating `today` as the current date.
    pub async fn open_session_for(
        &self,
        identity: Identity,
        today: NaiveDate,
    ) -> Result<ChatSession, CoachError> {
        let conversations = ConversationStore::new(self.store.clone(), self.config.persist_retries);
        let conversation = conversations
            .load(&identity.id)
            .await
            .map_err(CoachError::Load)?;

        info!(
            "Opened coach session for {} on {} ({} stored turns, generator: {})",
            identity.id,
            today,
            conversation.as_ref().map_or(0, |c| c.turn_count()),
            self.generator.name()
        );

        Ok(ChatSession::new(SessionParts {
            identity,
            today,
            conversation,
            aggregator: HealthContextAggregator::new(self.store.clone()),
            conversations,
            prompts: PromptBuilder::new(self.config.assistant_name.clone()),
            generator: self.generator.clone(),
            observer: self.observer.clone(),
            generation_timeout: self.config.generation_timeout.filter(|t| !t.is_zero()),
        }))
    }
}
