//! Tests for [`vbot_core::Dispatcher`]: priority order, single claimant, unhandled messages, error propagation.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use vbot_core::{
    Chat, DbotError, Dispatcher, Handler, HandlerResponse, Message, MessageContent, Result, User,
};

/// Claims messages whose kind equals `claims` and counts every call.
struct KindHandler {
    claims: &'static str,
    reply: &'static str,
    calls: AtomicUsize,
}

impl KindHandler {
    fn new(claims: &'static str, reply: &'static str) -> Arc<Self> {
        Arc::new(Self {
            claims,
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Handler for KindHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if message.content.kind() == self.claims {
            Ok(HandlerResponse::Reply(self.reply.to_string()))
        } else {
            Ok(HandlerResponse::Continue)
        }
    }
}

struct FailingHandler;

#[async_trait]
impl Handler for FailingHandler {
    async fn handle(&self, _message: &Message) -> Result<HandlerResponse> {
        Err(DbotError::Database("disk full".to_string()))
    }
}

fn message(content: MessageContent) -> Message {
    Message {
        id: "1".to_string(),
        user: User {
            id: 42,
            username: Some("alice".to_string()),
            first_name: Some("Alice".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 42,
            chat_type: "private".to_string(),
        },
        content,
        created_at: Utc::now(),
    }
}

/// **Test: First claimant wins; later handlers are not called.**
#[tokio::test]
async fn test_first_claimant_wins() {
    let command = KindHandler::new("command", "welcome");
    let text = KindHandler::new("text", "answer");
    let photo = KindHandler::new("photo", "description");
    let dispatcher = Dispatcher::new()
        .add_handler(command.clone())
        .add_handler(text.clone())
        .add_handler(photo.clone());

    let response = dispatcher
        .dispatch(&message(MessageContent::Text("Hello".to_string())))
        .await
        .unwrap();

    assert_eq!(response, HandlerResponse::Reply("answer".to_string()));
    assert_eq!(command.calls(), 1);
    assert_eq!(text.calls(), 1);
    assert_eq!(photo.calls(), 0);
}

/// **Test: Commands are routed before text.**
#[tokio::test]
async fn test_command_has_priority() {
    let command = KindHandler::new("command", "welcome");
    let text = KindHandler::new("text", "answer");
    let dispatcher = Dispatcher::new()
        .add_handler(command.clone())
        .add_handler(text.clone());

    let response = dispatcher
        .dispatch(&message(MessageContent::from_text("/start")))
        .await
        .unwrap();

    assert_eq!(response, HandlerResponse::Reply("welcome".to_string()));
    assert_eq!(text.calls(), 0);
}

/// **Test: Message nobody claims is a no-op returning Continue.**
#[tokio::test]
async fn test_unhandled_message_is_ignored() {
    let text = KindHandler::new("text", "answer");
    let dispatcher = Dispatcher::new().add_handler(text.clone());

    let response = dispatcher
        .dispatch(&message(MessageContent::Unsupported))
        .await
        .unwrap();

    assert_eq!(response, HandlerResponse::Continue);
    assert_eq!(text.calls(), 1);
}

/// **Test: Empty dispatcher ignores everything.**
#[tokio::test]
async fn test_empty_dispatcher() {
    let dispatcher = Dispatcher::new();
    assert!(dispatcher.is_empty());
    let response = dispatcher
        .dispatch(&message(MessageContent::Text("x".to_string())))
        .await
        .unwrap();
    assert_eq!(response, HandlerResponse::Continue);
}

/// **Test: Handler errors propagate to the caller.**
#[tokio::test]
async fn test_handler_error_propagates() {
    let dispatcher = Dispatcher::new().add_handler(Arc::new(FailingHandler));
    let err = dispatcher
        .dispatch(&message(MessageContent::Text("x".to_string())))
        .await
        .unwrap_err();
    assert!(matches!(err, DbotError::Database(_)));
}
