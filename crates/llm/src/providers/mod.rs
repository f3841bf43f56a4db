pub mod groq;
pub mod ollama;
