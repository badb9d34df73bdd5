//! Prompt text sent to the chat model

use crate::models::RelevantDocument;

pub const SYSTEM_PROMPT: &str = "You are an assistant that answers questions using the context provided.

INSTRUCTIONS:
1. Prefer the information in the provided context
2. Cite the relevant parts of the context when you use them
3. Be precise, concise and complete";

const NO_CONTEXT_INSTRUCTION: &str = "Answer the question from your general knowledge. \
Do not mention that no documents or sources were available.";

/// Numbered context blocks for every document scoring at least `min_score`.
///
/// Returns `None` when no document qualifies.
pub fn render_context(relevant_docs: &[RelevantDocument], min_score: f32) -> Option<String> {
    let blocks: Vec<String> = relevant_docs
        .iter()
        .filter(|doc| doc.score >= min_score)
        .enumerate()
        .map(|(i, doc)| {
            format!(
                "Document {} (score: {:.2}) [{}]:\n{}",
                i + 1,
                doc.score,
                doc.document.source,
                doc.document.content
            )
        })
        .collect();

    if blocks.is_empty() {
        None
    } else {
        Some(blocks.join("\n\n"))
    }
}

pub fn build_user_prompt(query: &str, relevant_docs: &[RelevantDocument], min_score: f32) -> String {
    match render_context(relevant_docs, min_score) {
        Some(context) => format!("CONTEXT:\n{}\n\nQUESTION: {}\n\nANSWER:", context, query),
        None => format!("{}\n\nQUESTION: {}\n\nANSWER:", NO_CONTEXT_INSTRUCTION, query),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Document;

    fn hit(content: &str, source: &str, score: f32) -> RelevantDocument {
        RelevantDocument {
            document: Document::new(content, source),
            score,
        }
    }

    #[test]
    fn test_context_numbered_and_filtered() {
        let docs = vec![
            hit("Rust has no GC", "rust.txt", 0.91),
            hit("Unrelated", "misc.txt", 0.42),
            hit("Qdrant is a vector DB", "qdrant.txt", 0.80),
        ];

        let context = render_context(&docs, 0.7).unwrap();
        assert_eq!(
            context,
            "Document 1 (score: 0.91) [rust.txt]:\nRust has no GC\n\n\
             Document 2 (score: 0.80) [qdrant.txt]:\nQdrant is a vector DB"
        );
    }

    #[test]
    fn test_score_equal_to_threshold_counts() {
        let docs = vec![hit("edge", "e.txt", 0.7)];
        assert!(render_context(&docs, 0.7).is_some());
    }

    #[test]
    fn test_no_qualifying_docs_falls_back_to_general_knowledge() {
        let docs = vec![hit("weak", "w.txt", 0.2)];
        let prompt = build_user_prompt("what is Rust?", &docs, 0.7);

        assert!(!prompt.contains("CONTEXT:"));
        assert!(!prompt.contains("weak"));
        assert!(prompt.contains("general knowledge"));
        assert!(prompt.contains("QUESTION: what is Rust?"));
    }

    #[test]
    fn test_prompt_with_context() {
        let docs = vec![hit("Rust has no GC", "rust.txt", 0.9)];
        let prompt = build_user_prompt("gc?", &docs, 0.5);
        assert!(prompt.starts_with("CONTEXT:\nDocument 1 (score: 0.90) [rust.txt]:"));
        assert!(prompt.ends_with("QUESTION: gc?\n\nANSWER:"));
    }
}
