mod openai;
pub mod prompt;
mod provider;

pub use openai::OpenAICompletionProvider;
pub use provider::CompletionProvider;

#[cfg(test)]
pub use provider::MockCompletionProvider;
