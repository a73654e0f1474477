//! Conversational query dispatch.
//!
//! Builds the message sequence persona -> history -> new turn, sends it to
//! the oracle, and keeps the rolling [`Conversation`] current. Streaming
//! replies append to history exactly once, after the final fragment; a
//! stream dropped early appends nothing.

use std::sync::{Arc, Mutex};

use base64::{Engine, engine::general_purpose::STANDARD as B64};
use futures::StreamExt;
use ollama_rs::generation::{chat::ChatMessage, images::Image};
use tracing::debug;

use crate::conversation::Conversation;
use crate::frame;
use crate::llm_client::LLMClient;
use crate::llm_types::TokenStream;

/// One conversational query.
#[derive(Debug, Clone)]
pub struct ChatQuery {
    /// Transcribed speech or any text query.
    pub text: String,
    /// Optional raw image bytes to include as visual context.
    pub frame: Option<Vec<u8>>,
    /// Optional persona instruction prepended as the system turn.
    pub persona: Option<String>,
    /// When false the exchange is left out of history, e.g. for passive
    /// perception snapshots that should not pollute the conversation.
    pub remember: bool,
}

impl ChatQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            frame: None,
            persona: None,
            remember: true,
        }
    }

    pub fn with_frame(mut self, bytes: Vec<u8>) -> Self {
        self.frame = Some(bytes);
        self
    }

    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = Some(persona.into());
        self
    }

    pub fn remember(mut self, remember: bool) -> Self {
        self.remember = remember;
        self
    }
}

/// Dispatches conversational queries against the oracle.
///
/// The conversation buffer is injected so callers and tests own its
/// lifetime; the dispatcher only appends completed exchanges to it.
pub struct Dispatcher {
    llm: Arc<dyn LLMClient>,
    history: Arc<Mutex<Conversation>>,
}

impl Dispatcher {
    pub fn new(llm: Arc<dyn LLMClient>, history: Arc<Mutex<Conversation>>) -> Self {
        Self { llm, history }
    }

    /// The shared conversation buffer.
    pub fn history(&self) -> Arc<Mutex<Conversation>> {
        Arc::clone(&self.history)
    }

    /// persona -> prior exchanges -> the new user turn. Frames are bounded
    /// and embedded on the new turn only; history stays text-only.
    fn build_messages(&self, query: &ChatQuery) -> anyhow::Result<Vec<ChatMessage>> {
        let mut messages = Vec::new();
        if let Some(persona) = &query.persona {
            messages.push(ChatMessage::system(persona.clone()));
        }
        messages.extend_from_slice(self.history.lock().unwrap().snapshot());
        let user = match &query.frame {
            Some(bytes) => {
                let jpeg = frame::bound_jpeg(bytes)?;
                let b64 = B64.encode(&jpeg);
                ChatMessage::user(query.text.clone()).with_images(vec![Image::from_base64(b64)])
            }
            None => ChatMessage::user(query.text.clone()),
        };
        messages.push(user);
        Ok(messages)
    }

    /// Send a query and return the complete reply text.
    pub async fn ask(&self, query: ChatQuery) -> anyhow::Result<String> {
        let messages = self.build_messages(&query)?;
        let mut stream = self
            .llm
            .chat_stream(&messages)
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        let mut reply = String::new();
        while let Some(tok) = stream.next().await {
            reply.push_str(&tok.text);
        }
        debug!(%reply, "chat reply");
        if query.remember {
            self.history.lock().unwrap().append(&query.text, &reply);
        }
        Ok(reply)
    }

    /// Send a query and stream the reply fragments as they arrive.
    ///
    /// When the stream is exhausted and the query asked to be remembered,
    /// the concatenated fragments are appended to history as the assistant
    /// turn. A consumer that stops pulling abandons the stream and nothing
    /// is retained.
    pub async fn ask_stream(&self, query: ChatQuery) -> anyhow::Result<TokenStream> {
        let messages = self.build_messages(&query)?;
        let mut inner = self
            .llm
            .chat_stream(&messages)
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        let history = Arc::clone(&self.history);
        let out = async_stream::stream! {
            let mut full = String::new();
            while let Some(tok) = inner.next().await {
                full.push_str(&tok.text);
                yield tok;
            }
            debug!(reply = %full, "chat reply streamed");
            if query.remember {
                history.lock().unwrap().append(&query.text, &full);
            }
        };
        Ok(Box::pin(out))
    }
}
