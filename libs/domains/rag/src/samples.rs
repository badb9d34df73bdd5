use crate::models::Document;

/// Built-in documents indexed when the sample folder has no `.txt` files
pub fn sample_documents() -> Vec<Document> {
    vec![
        Document::new(
            "Rust is a systems programming language focused on safety, speed and concurrency. \
             Its ownership model guarantees memory safety without a garbage collector, and its \
             type system prevents data races at compile time.",
            "rust_intro.txt",
        )
        .with_metadata("topic", "rust")
        .with_metadata("kind", "sample"),
        Document::new(
            "Retrieval-Augmented Generation (RAG) combines information retrieval with text \
             generation. Relevant documents are first retrieved from a knowledge base using \
             semantic search and then passed to a language model as context, which grounds \
             the generated answer in that content.",
            "rag_intro.txt",
        )
        .with_metadata("topic", "rag")
        .with_metadata("kind", "sample"),
        Document::new(
            "Qdrant is a vector similarity search engine. It stores points made of a vector and \
             a JSON payload, supports filtering on payload fields and offers HTTP and gRPC APIs \
             for building semantic search and recommendation systems.",
            "qdrant_intro.txt",
        )
        .with_metadata("topic", "qdrant")
        .with_metadata("kind", "sample"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_samples_have_unique_ids_and_content() {
        let docs = sample_documents();
        assert_eq!(docs.len(), 3);

        let ids: HashSet<_> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
        assert!(docs.iter().all(|d| !d.content.is_empty() && d.source.ends_with(".txt")));
    }
}
