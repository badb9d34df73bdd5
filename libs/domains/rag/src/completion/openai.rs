use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::CompletionProvider;
use super::prompt::{SYSTEM_PROMPT, build_user_prompt};
use crate::error::{RagError, RagResult};
use crate::models::RelevantDocument;
use crate::openai::OpenAIConfig;

/// OpenAI chat completions provider
pub struct OpenAICompletionProvider {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAICompletionProvider {
    pub fn new(config: OpenAIConfig) -> RagResult<Self> {
        Ok(Self {
            client: config.http_client()?,
            config,
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl CompletionProvider for OpenAICompletionProvider {
    async fn complete(
        &self,
        query: &str,
        relevant_docs: &[RelevantDocument],
        min_score: f32,
    ) -> RagResult<String> {
        let user_prompt = build_user_prompt(query, relevant_docs, min_score);

        let request = ChatRequest {
            model: &self.config.chat_model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(self.config.endpoint("chat/completions"))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| RagError::Completion(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(RagError::Completion(format!(
                "OpenAI API error ({}): {}",
                status, error_text
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| RagError::Completion(format!("Invalid response: {}", e)))?;

        let answer = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| RagError::Completion("No choices returned".to_string()))?
            .message
            .content
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| RagError::Completion("Empty answer returned".to_string()))?;

        debug!(
            model = %self.config.chat_model,
            documents = relevant_docs.len(),
            answer_len = answer.len(),
            "Generated answer"
        );
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Document;
    use axum::{Json, Router, http::StatusCode, routing::post};
    use serde_json::{Value, json};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        format!("http://{}/v1", addr)
    }

    fn provider(base_url: String) -> OpenAICompletionProvider {
        OpenAICompletionProvider::new(
            OpenAIConfig::new("sk-test".to_string())
                .with_base_url(base_url)
                .with_timeout(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_complete_sends_system_and_user_messages() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["model"], "gpt-3.5-turbo");
                assert_eq!(body["max_tokens"], 1000);
                assert_eq!(body["messages"][0]["role"], "system");
                assert_eq!(body["messages"][1]["role"], "user");
                let user = body["messages"][1]["content"].as_str().unwrap().to_string();
                assert!(user.contains("Document 1 (score: 0.95) [rust.txt]"));
                Json(json!({
                    "choices": [{"message": {"role": "assistant", "content": "Rust is a language."}}]
                }))
            }),
        );

        let docs = vec![RelevantDocument {
            document: Document::new("Rust is fast", "rust.txt"),
            score: 0.95,
        }];
        let answer = provider(serve(router).await)
            .complete("what is Rust?", &docs, 0.7)
            .await
            .unwrap();
        assert_eq!(answer, "Rust is a language.");
    }

    #[tokio::test]
    async fn test_zero_choices_is_error() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(json!({"choices": []})) }),
        );

        let err = provider(serve(router).await)
            .complete("q", &[], 0.7)
            .await
            .unwrap_err();
        assert!(matches!(err, RagError::Completion(_)));
    }

    #[tokio::test]
    async fn test_null_or_blank_content_is_error() {
        for content in [Value::Null, json!(""), json!("  \n")] {
            let router = Router::new().route(
                "/v1/chat/completions",
                post(move || {
                    let content = content.clone();
                    async move { Json(json!({"choices": [{"message": {"content": content}}]})) }
                }),
            );

            let err = provider(serve(router).await)
                .complete("q", &[], 0.7)
                .await
                .unwrap_err();
            assert!(matches!(err, RagError::Completion(msg) if msg == "Empty answer returned"));
        }
    }

    #[tokio::test]
    async fn test_error_status_is_completion_error() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "rate limited") }),
        );

        let err = provider(serve(router).await)
            .complete("q", &[], 0.7)
            .await
            .unwrap_err();
        assert!(matches!(err, RagError::Completion(msg) if msg.contains("429")));
    }
}
