//! Conversation orchestration
//!
//! One stateless pass per request: log the user turn, replay the session's
//! running context and the global prompt into the completion call, then
//! persist the assistant turn and the recomposed context. Every failure is
//! folded into a [`ChatOutcome`] variant; nothing propagates past
//! [`ChatRelay::handle`].

use std::sync::Arc;

use crate::completion::CompletionService;
use crate::context::{self, ContextManager};
use crate::error::{CompletionError, Result};
use crate::message::{ChatMessage, Role};
use crate::persistence::Store;
use crate::prompt::PromptManager;

/// Result of one conversational turn.
///
/// The transport layer renders each variant into a user-facing string;
/// the variants are the only error-discrimination mechanism exposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    /// Assistant produced a reply; exchange log and context were updated
    Reply(String),
    /// Upstream answered non-success; carries the upstream body verbatim
    UpstreamError(String),
    /// Upstream answered success with no usable content
    Empty,
    /// Store, network, or decode failure caught at the orchestrator boundary
    Internal(String),
}

/// Orchestrates one request against the store and the completion service
#[derive(Clone)]
pub struct ChatRelay {
    store: Store,
    context: ContextManager,
    prompt: PromptManager,
    completion: Arc<dyn CompletionService>,
}

impl ChatRelay {
    pub fn new(store: Store, completion: Arc<dyn CompletionService>) -> Self {
        let context = ContextManager::new(store.clone());
        let prompt = PromptManager::new(store.clone());
        Self {
            store,
            context,
            prompt,
            completion,
        }
    }

    /// Handle one user message for a session.
    ///
    /// Never returns an error: internal faults become
    /// [`ChatOutcome::Internal`] so a business failure cannot turn into a
    /// transport failure upstream.
    pub async fn handle(&self, session_id: &str, text: &str) -> ChatOutcome {
        match self.run_turn(session_id, text).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(session_id, error = %e, "chat turn failed");
                ChatOutcome::Internal(e.to_string())
            }
        }
    }

    async fn run_turn(&self, session_id: &str, text: &str) -> Result<ChatOutcome> {
        // The user turn is logged before anything can fail downstream, so
        // it survives upstream errors and empty completions.
        self.store
            .open()?
            .append_exchange(session_id, Role::User, text)?;

        let existing = self.context.get(session_id)?;
        let system_prompt = self.prompt.current()?;

        let messages = vec![
            ChatMessage::system(system_prompt),
            ChatMessage::system(format!(
                "Contexto da conversa até agora:\n{}",
                existing
            )),
            ChatMessage::user(text),
        ];

        let reply = match self.completion.complete(&messages).await {
            Ok(content) => content.trim().to_string(),
            Err(CompletionError::Upstream { status, body }) => {
                tracing::warn!(session_id, status, "completion API returned an error");
                return Ok(ChatOutcome::UpstreamError(body));
            }
            Err(e) => return Err(e.into()),
        };

        if reply.is_empty() {
            return Ok(ChatOutcome::Empty);
        }

        self.store
            .open()?
            .append_exchange(session_id, Role::Assistant, &reply)?;

        // Read-then-replace: concurrent turns on the same session race here
        // and the last writer wins.
        let updated = context::compose(&existing, text, &reply);
        self.context.replace(session_id, &updated)?;

        Ok(ChatOutcome::Reply(reply))
    }

    /// Session context, exposed for the read-only endpoint
    pub fn context(&self) -> &ContextManager {
        &self.context
    }

    /// Global prompt manager, exposed for the prompt endpoints
    pub fn prompt(&self) -> &PromptManager {
        &self.prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageKind;
    use async_trait::async_trait;

    struct FixedReply(&'static str);

    #[async_trait]
    impl CompletionService for FixedReply {
        async fn complete(&self, _messages: &[ChatMessage]) -> std::result::Result<String, CompletionError> {
            Ok(self.0.to_string())
        }
    }

    struct UpstreamFailure(&'static str);

    #[async_trait]
    impl CompletionService for UpstreamFailure {
        async fn complete(&self, _messages: &[ChatMessage]) -> std::result::Result<String, CompletionError> {
            Err(CompletionError::Upstream {
                status: 500,
                body: self.0.to_string(),
            })
        }
    }

    struct Unreachable;

    #[async_trait]
    impl CompletionService for Unreachable {
        async fn complete(&self, _messages: &[ChatMessage]) -> std::result::Result<String, CompletionError> {
            Err(CompletionError::Request("connection refused".to_string()))
        }
    }

    fn relay_with(completion: Arc<dyn CompletionService>) -> (tempfile::TempDir, Store, ChatRelay) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("conversas.db")).unwrap();
        let relay = ChatRelay::new(store.clone(), completion);
        (dir, store, relay)
    }

    #[tokio::test]
    async fn test_successful_turn_persists_everything() {
        let (_dir, store, relay) = relay_with(Arc::new(FixedReply("hi there")));

        let outcome = relay.handle("s1", "hello").await;
        assert_eq!(outcome, ChatOutcome::Reply("hi there".to_string()));

        let repo = store.open().unwrap();
        let log = repo.messages_by_kind("s1", MessageKind::Exchange).unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].role, Role::User);
        assert_eq!(log[0].content, "hello");
        assert_eq!(log[1].role, Role::Assistant);
        assert_eq!(log[1].content, "hi there");

        assert_eq!(
            repo.context("s1").unwrap(),
            Some("Usuário: hello\nAssistente: hi there".to_string())
        );
    }

    #[tokio::test]
    async fn test_context_accumulates_across_turns() {
        let (_dir, store, relay) = relay_with(Arc::new(FixedReply("ok")));

        relay.handle("s1", "primeira").await;
        relay.handle("s1", "segunda").await;

        let repo = store.open().unwrap();
        assert_eq!(
            repo.context("s1").unwrap(),
            Some(
                "Usuário: primeira\nAssistente: ok\nUsuário: segunda\nAssistente: ok".to_string()
            )
        );
        // Still exactly one context row
        let rows = repo.messages_by_kind("s1", MessageKind::Context).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_upstream_failure_keeps_user_turn_only() {
        let (_dir, store, relay) = relay_with(Arc::new(UpstreamFailure("oops")));

        let outcome = relay.handle("s1", "hello").await;
        assert_eq!(outcome, ChatOutcome::UpstreamError("oops".to_string()));

        let repo = store.open().unwrap();
        let log = repo.messages_by_kind("s1", MessageKind::Exchange).unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].role, Role::User);
        assert!(repo.context("s1").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_blank_completion_is_empty_outcome() {
        let (_dir, store, relay) = relay_with(Arc::new(FixedReply("  \n ")));

        let outcome = relay.handle("s1", "hello").await;
        assert_eq!(outcome, ChatOutcome::Empty);

        let repo = store.open().unwrap();
        assert_eq!(
            repo.messages_by_kind("s1", MessageKind::Exchange)
                .unwrap()
                .len(),
            1
        );
        assert!(repo.context("s1").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_internal() {
        let (_dir, _store, relay) = relay_with(Arc::new(Unreachable));

        match relay.handle("s1", "hello").await {
            ChatOutcome::Internal(detail) => assert!(detail.contains("connection refused")),
            other => panic!("expected internal fault, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reply_is_trimmed() {
        let (_dir, _store, relay) = relay_with(Arc::new(FixedReply("  hi there \n")));

        let outcome = relay.handle("s1", "hello").await;
        assert_eq!(outcome, ChatOutcome::Reply("hi there".to_string()));
    }

    #[tokio::test]
    async fn test_prompt_is_seeded_during_first_turn() {
        let (_dir, store, relay) = relay_with(Arc::new(FixedReply("ok")));

        relay.handle("s1", "hello").await;

        let stored = store
            .open()
            .unwrap()
            .get_setting(crate::prompt::SYSTEM_PROMPT_KEY)
            .unwrap();
        assert_eq!(stored, Some(crate::prompt::DEFAULT_SYSTEM_PROMPT.to_string()));
    }
}
