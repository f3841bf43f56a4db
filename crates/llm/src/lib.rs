pub mod provider;
pub mod providers;

pub use provider::{create_provider, LlmError, LlmProvider, Message, Role};
pub use providers::groq::GroqProvider;
pub use providers::ollama::OllamaProvider;
