//! Prompt assembly for the answer generator.

use pagecite_index::ScoredChunk;
use pagecite_llm::Message;

const INSTRUCTION: &str = "Use the following pieces of context to answer the user's question. \
If you don't know the answer, just say that you don't know, don't try to make up an answer.";

/// Combine the retrieved chunk texts and the question into a single-turn
/// chat exchange.
pub fn build_messages(context: &[ScoredChunk], question: &str) -> Vec<Message> {
    let mut system = String::from(INSTRUCTION);
    if !context.is_empty() {
        system.push_str("\n\nContext:\n");
        for (i, scored) in context.iter().enumerate() {
            if i > 0 {
                system.push_str("\n\n");
            }
            system.push_str(&scored.chunk.text);
        }
    }

    vec![Message::system(system), Message::user(question)]
}
