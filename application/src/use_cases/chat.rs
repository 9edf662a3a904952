//! Chat orchestration use case.
//!
//! [`ChatOrchestrator`] funnels both submission triggers (typed input and a
//! history selection) through one state machine:
//!
//! 1. Refuse the submission if a request is already in flight
//! 2. Record typed queries in the [`HistoryStore`] (selections skip this)
//! 3. Ask the [`CompletionGateway`]
//! 4. On success append question + answer to the [`ConversationLog`] and clear
//!    the input buffer; on failure keep the buffer and remember the error
//!
//! Nothing that goes wrong here ends the session: completion errors become a
//! user-visible message on the request state, storage errors become warnings.

use crate::ports::completion_gateway::{CompletionError, CompletionGateway};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::history_store::HistoryStore;
use askline_domain::util::truncate_str;
use askline_domain::{ConversationLog, HistoryList, QueryRecord, RequestState};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors returned by [`ChatOrchestrator::submit`].
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("A request is already in flight")]
    InFlight,

    #[error("No history entry #{0}")]
    UnknownHistoryEntry(usize),

    #[error(transparent)]
    Completion(#[from] CompletionError),
}

/// Where a submission came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Text entered by the user; recorded in history
    Typed(String),
    /// A previous query picked from history; not re-recorded
    History(QueryRecord),
}

/// Result of a submission that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input, nothing happened
    Ignored,
    /// The exchange was appended to the conversation log
    Answered { question: String, answer: String },
}

#[derive(Default)]
struct ChatState {
    request: RequestState,
    log: ConversationLog,
    input: String,
    warning: Option<String>,
}

/// Use case wiring history, completion and the conversation log together.
pub struct ChatOrchestrator {
    gateway: Arc<dyn CompletionGateway>,
    history: Mutex<HistoryStore>,
    state: Mutex<ChatState>,
    progress: Arc<dyn ProgressNotifier>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ChatOrchestrator {
    pub fn new(gateway: Arc<dyn CompletionGateway>, history: HistoryStore) -> Self {
        Self {
            gateway,
            history: Mutex::new(history),
            state: Mutex::new(ChatState::default()),
            progress: Arc::new(NoProgress),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a progress notifier.
    pub fn with_progress(mut self, progress: Arc<dyn ProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Model identifier of the underlying gateway
    pub fn model(&self) -> &str {
        self.gateway.model()
    }

    // ==================== Input buffer ====================

    /// Replace the input buffer
    pub fn set_input(&self, text: impl Into<String>) {
        self.lock_state().input = text.into();
    }

    /// Current input buffer
    pub fn input(&self) -> String {
        self.lock_state().input.clone()
    }

    /// Submit the input buffer as typed text.
    ///
    /// After a failure the buffer still holds the failed query, so calling
    /// this again retries it.
    pub async fn submit_input(&self) -> Result<SubmitOutcome, SubmitError> {
        let text = self.input();
        self.submit(Submission::Typed(text)).await
    }

    /// Submit the history entry at `index` (0-based) without re-recording it
    pub async fn select_history(&self, index: usize) -> Result<SubmitOutcome, SubmitError> {
        let record = self
            .lock_history()
            .entries()
            .get(index)
            .cloned()
            .ok_or(SubmitError::UnknownHistoryEntry(index))?;
        self.submit(Submission::History(record)).await
    }

    // ==================== Submission ====================

    /// Run one submission through the state machine.
    pub async fn submit(&self, submission: Submission) -> Result<SubmitOutcome, SubmitError> {
        let (question, typed) = match submission {
            Submission::Typed(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Ok(SubmitOutcome::Ignored);
                }
                (trimmed.to_string(), true)
            }
            Submission::History(record) => (record.into_string(), false),
        };

        if !self.lock_state().request.begin() {
            debug!("Rejecting submission while a request is in flight");
            return Err(SubmitError::InFlight);
        }

        if typed {
            let persisted = self.lock_history().add(&question);
            if let Err(e) = persisted {
                self.warn_storage(&e);
            }
        }

        info!(
            "Submitting query ({} bytes) to {}: {}",
            question.len(),
            self.gateway.model(),
            truncate_str(&question, 80)
        );
        self.conversation_logger.log(ConversationEvent::new(
            "query_submitted",
            serde_json::json!({
                "source": if typed { "typed" } else { "history" },
                "model": self.gateway.model(),
                "bytes": question.len(),
            }),
        ));

        self.progress.on_request_start(&question);
        let started = Instant::now();
        let result = self.gateway.ask(&question).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        self.progress.on_request_end(result.is_ok());

        match result {
            Ok(answer) => {
                {
                    let mut state = self.lock_state();
                    state.log.record_exchange(question.clone(), answer.clone());
                    state.input.clear();
                    state.request.succeed();
                }
                debug!("Answer received ({} bytes, {} ms)", answer.len(), elapsed_ms);
                self.conversation_logger.log(ConversationEvent::new(
                    "answer_received",
                    serde_json::json!({
                        "bytes": answer.len(),
                        "elapsed_ms": elapsed_ms,
                    }),
                ));
                Ok(SubmitOutcome::Answered { question, answer })
            }
            Err(e) => {
                warn!("Completion request failed: {}", e);
                self.lock_state().request.fail(e.user_message());
                self.conversation_logger.log(ConversationEvent::new(
                    "request_failed",
                    serde_json::json!({
                        "kind": e.kind(),
                        "elapsed_ms": elapsed_ms,
                    }),
                ));
                Err(SubmitError::Completion(e))
            }
        }
    }

    // ==================== State accessors ====================

    /// Snapshot of the request lifecycle state
    pub fn request_state(&self) -> RequestState {
        self.lock_state().request.clone()
    }

    /// User-visible message of the last failed request, if any
    pub fn error(&self) -> Option<String> {
        self.lock_state().request.error().map(str::to_string)
    }

    /// Snapshot of the conversation log
    pub fn conversation(&self) -> ConversationLog {
        self.lock_state().log.clone()
    }

    /// Pending storage warning, cleared on read
    pub fn take_warning(&self) -> Option<String> {
        self.lock_state().warning.take()
    }

    // ==================== History ====================

    pub fn history(&self) -> HistoryList {
        self.lock_history().entries().clone()
    }

    /// Remove a history entry; storage failures become a warning.
    pub fn remove_history(&self, query: &str) -> HistoryList {
        let result = self.lock_history().remove(query);
        self.absorb_storage(result)
    }

    /// Clear the history; storage failures become a warning.
    pub fn clear_history(&self) -> HistoryList {
        let result = self.lock_history().clear();
        let list = self.absorb_storage(result);
        self.conversation_logger
            .log(ConversationEvent::new("history_cleared", serde_json::json!({})));
        list
    }

    fn absorb_storage(
        &self,
        result: Result<HistoryList, crate::ports::storage::StorageError>,
    ) -> HistoryList {
        match result {
            Ok(list) => list,
            Err(e) => {
                self.warn_storage(&e);
                self.history()
            }
        }
    }

    fn warn_storage(&self, error: &crate::ports::storage::StorageError) {
        warn!("History storage failed: {}", error);
        self.lock_state().warning = Some(format!(
            "History will not be saved for this session: {error}"
        ));
    }

    fn lock_state(&self) -> MutexGuard<'_, ChatState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_history(&self) -> MutexGuard<'_, HistoryStore> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::storage::{KeyValueStorage, MemoryStorage, StorageError};
    use askline_domain::ConversationEntry;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use tokio::sync::Notify;

    // ==================== Test Mocks ====================

    struct MockGateway {
        responses: Mutex<VecDeque<Result<String, CompletionError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl MockGateway {
        fn new(responses: Vec<Result<String, CompletionError>>) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from(responses)),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionGateway for MockGateway {
        async fn ask(&self, message: &str) -> Result<String, CompletionError> {
            self.calls.lock().unwrap().push(message.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(CompletionError::Network("no more responses".to_string())))
        }

        fn model(&self) -> &str {
            "mock-model"
        }
    }

    /// Gateway that parks every request until released.
    struct BlockingGateway {
        release: Notify,
    }

    #[async_trait]
    impl CompletionGateway for BlockingGateway {
        async fn ask(&self, _message: &str) -> Result<String, CompletionError> {
            self.release.notified().await;
            Ok("released".to_string())
        }

        fn model(&self) -> &str {
            "blocking-model"
        }
    }

    struct FailingStorage;

    impl KeyValueStorage for FailingStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk full".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk full".to_string()))
        }

        fn clear(&self) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk full".to_string()))
        }
    }

    fn orchestrator(gateway: Arc<dyn CompletionGateway>) -> ChatOrchestrator {
        ChatOrchestrator::new(gateway, HistoryStore::load(Arc::new(MemoryStorage::new())))
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_successful_exchange_appends_two_entries() {
        let gateway = Arc::new(MockGateway::new(vec![Ok("4".to_string())]));
        let chat = orchestrator(gateway.clone());

        let outcome = chat.submit(Submission::Typed("2+2=".to_string())).await.unwrap();

        assert_eq!(
            outcome,
            SubmitOutcome::Answered {
                question: "2+2=".to_string(),
                answer: "4".to_string(),
            }
        );
        assert_eq!(
            chat.conversation().entries(),
            &[
                ConversationEntry::question("2+2="),
                ConversationEntry::answer("4"),
            ]
        );
        assert_eq!(gateway.calls(), vec!["2+2=".to_string()]);
        assert_eq!(chat.request_state(), RequestState::Idle);
    }

    #[tokio::test]
    async fn test_failure_leaves_log_unchanged() {
        let gateway = Arc::new(MockGateway::new(vec![
            Ok("first answer".to_string()),
            Err(CompletionError::Network("HTTP 500 Internal Server Error".to_string())),
        ]));
        let chat = orchestrator(gateway);

        chat.submit(Submission::Typed("first".to_string())).await.unwrap();
        let before = chat.conversation().len();

        let err = chat
            .submit(Submission::Typed("second".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitError::Completion(CompletionError::Network(_))));
        assert_eq!(chat.conversation().len(), before);
        assert!(matches!(chat.request_state(), RequestState::Failed(_)));
        assert!(chat.error().unwrap().contains("Failed to get answer"));
    }

    #[tokio::test]
    async fn test_next_submit_clears_previous_error() {
        let gateway = Arc::new(MockGateway::new(vec![
            Err(CompletionError::Timeout(std::time::Duration::from_secs(30))),
            Ok("ok".to_string()),
        ]));
        let chat = orchestrator(gateway);

        assert!(chat.submit(Submission::Typed("q".to_string())).await.is_err());
        assert!(chat.error().is_some());

        chat.submit(Submission::Typed("q".to_string())).await.unwrap();
        assert_eq!(chat.error(), None);
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let gateway = Arc::new(MockGateway::new(vec![]));
        let chat = orchestrator(gateway.clone());

        let outcome = chat.submit(Submission::Typed("   ".to_string())).await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Ignored);
        assert!(gateway.calls().is_empty());
        assert!(chat.history().is_empty());
        assert_eq!(chat.request_state(), RequestState::Idle);
    }

    #[tokio::test]
    async fn test_typed_query_is_recorded_normalized() {
        let gateway = Arc::new(MockGateway::new(vec![Ok("hi".to_string())]));
        let chat = orchestrator(gateway.clone());

        chat.submit(Submission::Typed(" hello world ".to_string()))
            .await
            .unwrap();

        assert_eq!(chat.history().get(0).unwrap(), "Hello world");
        // The request carries the text as typed, only trimmed.
        assert_eq!(gateway.calls(), vec!["hello world".to_string()]);
    }

    #[tokio::test]
    async fn test_history_selection_does_not_re_add() {
        let gateway = Arc::new(MockGateway::new(vec![
            Ok("a".to_string()),
            Ok("b".to_string()),
            Ok("c".to_string()),
        ]));
        let chat = orchestrator(gateway.clone());

        chat.submit(Submission::Typed("alpha".to_string())).await.unwrap();
        chat.submit(Submission::Typed("beta".to_string())).await.unwrap();
        let before = chat.history();

        let outcome = chat.select_history(0).await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Answered { ref question, .. } if question == "Alpha"));
        assert_eq!(chat.history(), before);
        assert!(chat.history().is_unique());
        assert_eq!(gateway.calls().last().map(String::as_str), Some("Alpha"));
    }

    #[tokio::test]
    async fn test_select_unknown_history_entry() {
        let chat = orchestrator(Arc::new(MockGateway::new(vec![])));
        let err = chat.select_history(3).await.unwrap_err();
        assert!(matches!(err, SubmitError::UnknownHistoryEntry(3)));
        assert_eq!(chat.request_state(), RequestState::Idle);
    }

    #[tokio::test]
    async fn test_input_buffer_cleared_on_success_kept_on_failure() {
        let gateway = Arc::new(MockGateway::new(vec![
            Err(CompletionError::Network("connection refused".to_string())),
            Ok("answer".to_string()),
        ]));
        let chat = orchestrator(gateway.clone());

        chat.set_input("retry me");
        assert!(chat.submit_input().await.is_err());
        assert_eq!(chat.input(), "retry me");

        chat.submit_input().await.unwrap();
        assert_eq!(chat.input(), "");
        assert_eq!(gateway.calls().len(), 2);
        // Retried query is not duplicated in history
        assert_eq!(chat.history().len(), 1);
    }

    #[tokio::test]
    async fn test_second_submit_rejected_while_in_flight() {
        let gateway = Arc::new(BlockingGateway {
            release: Notify::new(),
        });
        let chat = Arc::new(orchestrator(gateway.clone()));

        let first = {
            let chat = chat.clone();
            tokio::spawn(async move { chat.submit(Submission::Typed("first".to_string())).await })
        };

        while !chat.request_state().is_submitting() {
            tokio::task::yield_now().await;
        }

        let second = chat.submit(Submission::Typed("second".to_string())).await;
        assert!(matches!(second, Err(SubmitError::InFlight)));

        gateway.release.notify_one();
        let outcome = first.await.unwrap().unwrap();
        assert!(matches!(outcome, SubmitOutcome::Answered { .. }));
        assert_eq!(chat.conversation().len(), 2);
        // The rejected submission left no trace in history
        assert_eq!(chat.history().len(), 1);
    }

    #[tokio::test]
    async fn test_storage_failure_is_a_warning_not_an_error() {
        let gateway = Arc::new(MockGateway::new(vec![Ok("still answered".to_string())]));
        let chat = ChatOrchestrator::new(gateway, HistoryStore::load(Arc::new(FailingStorage)));

        let outcome = chat.submit(Submission::Typed("question".to_string())).await;

        assert!(outcome.is_ok());
        assert_eq!(chat.history().len(), 1);
        assert!(chat.take_warning().unwrap().contains("disk full"));
        assert_eq!(chat.take_warning(), None);
    }

    #[tokio::test]
    async fn test_remove_and_clear_history() {
        let gateway = Arc::new(MockGateway::new(vec![Ok("1".to_string()), Ok("2".to_string())]));
        let chat = orchestrator(gateway);

        chat.submit(Submission::Typed("one".to_string())).await.unwrap();
        chat.submit(Submission::Typed("two".to_string())).await.unwrap();

        let list = chat.remove_history("One");
        assert_eq!(list.len(), 1);
        assert!(chat.clear_history().is_empty());
        assert!(chat.history().is_empty());
        // The conversation log is untouched by history edits
        assert_eq!(chat.conversation().exchange_count(), 2);
    }
}
