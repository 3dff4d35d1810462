//! Outbound services: the chat-completion client and the prompts sent to it

pub mod chat_client;
pub mod prompts;

pub use chat_client::{ChatClient, ChatError, ChatMessage, ChatRequest};
