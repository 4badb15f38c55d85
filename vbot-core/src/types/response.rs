//! Dispatcher result type.

/// What a handler did with a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Not this handler's message; the dispatcher tries the next one.
    Continue,
    /// Handled; carries the text that was sent back to the chat.
    Reply(String),
}
