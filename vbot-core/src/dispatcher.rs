//! # Dispatcher
//!
//! Routes a message to the first handler that claims it. Handlers are tried in the order they were
//! added; the first one returning [`HandlerResponse::Reply`] ends dispatch, so at most one handler
//! handles a message. Messages nobody claims are a logged no-op.

use crate::types::{Handler, HandlerResponse, Message};
use crate::error::Result;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Ordered list of handlers; first claimant wins.
#[derive(Clone, Default)]
pub struct Dispatcher {
    handlers: Vec<Arc<dyn Handler>>,
}

impl Dispatcher {
    /// Creates an empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a handler with the lowest priority so far.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs handlers in order until one replies. Returns `Continue` when no handler claimed the message.
    #[instrument(skip(self, message))]
    pub async fn dispatch(&self, message: &Message) -> Result<HandlerResponse> {
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            message_id = %message.id,
            kind = message.content.kind(),
            "step: dispatch started"
        );

        for h in &self.handlers {
            let name = std::any::type_name_of_val(h.as_ref());
            let response = h.handle(message).await?;
            if let HandlerResponse::Reply(text) = &response {
                info!(
                    user_id = message.user.id,
                    handler = %name,
                    reply_len = text.len(),
                    "step: dispatch finished, message handled"
                );
                return Ok(response);
            }
            debug!(handler = %name, "Handler passed");
        }

        debug!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            kind = message.content.kind(),
            "Unhandled message, ignoring"
        );
        Ok(HandlerResponse::Continue)
    }
}

// Tests live in tests/dispatcher_test.rs
