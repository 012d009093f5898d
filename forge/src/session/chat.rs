use serde::{Deserialize, Serialize};

use crate::gateway::GatewayError;

pub const WELCOME_MESSAGE: &str =
    "Welcome to LogicForge. Describe a digital circuit, and I'll design, code, and simulate it for you.";
/// Shown while a generation is outstanding.
pub const PENDING_MESSAGE: &str = "Analyzing requirements and synthesizing circuit...";
pub const SUCCESS_MESSAGE: &str = "Design complete. Schematic, Verilog, and Simulation are ready.";

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }

    /// The chat line reporting a failed generation.
    pub fn failure(err: &GatewayError) -> Self {
        Self::assistant(format!("Error: {}", err.user_message()))
    }
}

/// The conversation shown beside the canvas.
///
/// Always starts with the welcome message, so it is never empty.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl Default for ChatLog {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(WELCOME_MESSAGE)],
        }
    }
}

impl ChatLog {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Replaces the most recent message.
    ///
    /// Concurrent generations share one slot: whichever finishes last
    /// overwrites the entry written by the others.
    pub fn replace_last(&mut self, message: ChatMessage) {
        match self.messages.last_mut() {
            Some(last) => *last = message,
            None => self.messages.push(message),
        }
    }

    #[inline]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[inline]
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_welcome() {
        let log = ChatLog::new();
        assert_eq!(log.len(), 1);
        assert_eq!(log.last().unwrap().text, WELCOME_MESSAGE);
        assert_eq!(log.last().unwrap().role, Role::Assistant);
    }

    #[test]
    fn replace_last_overwrites_placeholder() {
        let mut log = ChatLog::new();
        log.push(ChatMessage::user("full adder"));
        log.push(ChatMessage::assistant(PENDING_MESSAGE));
        log.replace_last(ChatMessage::failure(&GatewayError::MissingCredential));
        assert_eq!(log.len(), 3);
        assert_eq!(
            log.last().unwrap().text,
            "Error: API_KEY is missing. Please set it in your environment variables."
        );
    }
}
