use async_trait::async_trait;
use futures::StreamExt;

use crate::llm_types::TokenStream;
use ollama_rs::generation::chat::ChatMessage;

/// Common interface for chat-based completion oracles.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Streams text fragments in response to chat messages.
    async fn chat_stream(
        &self,
        messages: &[ChatMessage],
    ) -> Result<TokenStream, Box<dyn std::error::Error + Send + Sync>>;
}

/// Collect the entire reply for `messages` into a `String`.
///
/// Equivalent to draining [`LLMClient::chat_stream`]; the concatenation of
/// the streamed fragments is the non-streaming reply.
///
/// # Examples
/// ```
/// use async_trait::async_trait;
/// use futures::stream;
/// use ollama_rs::generation::chat::ChatMessage;
/// use souschef::{LLMClient, Token, TokenStream, collect_reply};
/// struct Dummy;
/// #[async_trait]
/// impl LLMClient for Dummy {
///     async fn chat_stream(
///         &self,
///         _: &[ChatMessage],
///     ) -> Result<TokenStream, Box<dyn std::error::Error + Send + Sync>> {
///         Ok(Box::pin(stream::once(async { Token { text: "hello".into() } })))
///     }
/// }
/// # tokio_test::block_on(async {
/// let out = collect_reply(&Dummy, &[ChatMessage::user("hi".into())])
///     .await
///     .unwrap();
/// assert_eq!(out, "hello");
/// # });
/// ```
pub async fn collect_reply(
    llm: &dyn LLMClient,
    messages: &[ChatMessage],
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let mut stream = llm.chat_stream(messages).await?;
    let mut out = String::new();
    while let Some(tok) = stream.next().await {
        out.push_str(&tok.text);
    }
    tracing::debug!(%out, "llm full response");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_types::Token;
    use futures::stream;

    struct Scripted(&'static [&'static str]);

    #[async_trait]
    impl LLMClient for Scripted {
        async fn chat_stream(
            &self,
            _messages: &[ChatMessage],
        ) -> Result<TokenStream, Box<dyn std::error::Error + Send + Sync>> {
            let toks: Vec<Token> = self.0.iter().map(|t| Token { text: t.to_string() }).collect();
            Ok(Box::pin(stream::iter(toks)))
        }
    }

    #[tokio::test]
    async fn collects_all_fragments() {
        let llm = Scripted(&["hel", "lo"]);
        let msgs = [ChatMessage::user("hi".into())];
        let out = collect_reply(&llm, &msgs).await.unwrap();
        assert_eq!(out, "hello");
    }
}
