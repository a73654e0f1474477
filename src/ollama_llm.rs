use crate::llm_client::LLMClient;
use crate::llm_types::{Token, TokenStream};
use async_trait::async_trait;
use futures::StreamExt;
use ollama_rs::{
    Ollama,
    generation::chat::{ChatMessage, ChatMessageResponseStream, request::ChatMessageRequest},
    models::ModelOptions,
};

/// Sampling temperature for every oracle call. Low enough that the
/// constrained-grammar replies stay parseable.
const TEMPERATURE: f32 = 0.3;

/// Build a chat request for the given model and messages.
fn build_request(model: &str, messages: &[ChatMessage]) -> ChatMessageRequest {
    ChatMessageRequest::new(model.to_string(), messages.to_vec())
        .options(ModelOptions::default().temperature(TEMPERATURE))
}

/// Map an Ollama response stream into a [`TokenStream`].
fn map_stream(stream: ChatMessageResponseStream) -> TokenStream {
    let mapped = stream.filter_map(|res| async {
        match res {
            Ok(resp) => {
                let tok = resp.message.content;
                tracing::trace!(%tok, "llm token");
                Some(Token { text: tok })
            }
            Err(e) => {
                tracing::error!(?e, "ollama stream error");
                None
            }
        }
    });
    Box::pin(mapped)
}

/// [`LLMClient`] implementation backed by [`Ollama`].
#[derive(Clone)]
pub struct OllamaLLM {
    client: Ollama,
    model: String,
}

impl OllamaLLM {
    /// Creates a new Ollama-backed client.
    pub fn new(client: Ollama, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Returns the configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LLMClient for OllamaLLM {
    /// Streams text fragments produced by the model in response to `messages`.
    async fn chat_stream(
        &self,
        messages: &[ChatMessage],
    ) -> Result<TokenStream, Box<dyn std::error::Error + Send + Sync>> {
        let req = build_request(&self.model, messages);
        let stream = self.client.send_chat_messages_stream(req).await?;
        Ok(map_stream(stream))
    }
}
