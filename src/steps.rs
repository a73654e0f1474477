use ollama_rs::generation::chat::ChatMessage;
use tracing::debug;

use crate::llm_client::{LLMClient, collect_reply};
use crate::prompt;
use crate::reply::{self, Reply};

/// Generate the ordered step list for `food`.
///
/// The oracle is asked for a JSON array of short imperative steps. A reply
/// that misses the grammar is salvaged line by line before giving up.
pub async fn generate_steps(llm: &dyn LLMClient, food: &str) -> anyhow::Result<Vec<String>> {
    let messages = [
        ChatMessage::system(prompt::STEP_LIST_INSTRUCTIONS.to_string()),
        ChatMessage::user(prompt::dish_message(food)),
    ];
    let raw = collect_reply(llm, &messages)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    debug!(%raw, "step list reply");

    let steps = match reply::parse::<Vec<String>>(&raw) {
        Reply::Structured(steps) => steps,
        Reply::RawFallback(text) => salvage_steps(&text),
        Reply::Absent => Vec::new(),
    };
    if steps.is_empty() {
        anyhow::bail!("oracle returned no steps for {food:?}");
    }
    Ok(steps)
}

/// Pull steps out of a numbered or bulleted plain-text reply.
fn salvage_steps(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            line.trim()
                .trim_start_matches(|c: char| c.is_ascii_digit())
                .trim_start_matches(['.', ')', ':', '-', '*'])
                .trim()
        })
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_types::{Token, TokenStream};
    use async_trait::async_trait;
    use futures::stream;

    struct Scripted(&'static str);

    #[async_trait]
    impl LLMClient for Scripted {
        async fn chat_stream(
            &self,
            _messages: &[ChatMessage],
        ) -> Result<TokenStream, Box<dyn std::error::Error + Send + Sync>> {
            let tok = Token {
                text: self.0.to_string(),
            };
            Ok(Box::pin(stream::once(async move { tok })))
        }
    }

    #[tokio::test]
    async fn parses_json_step_list() {
        let llm = Scripted("```json\n[\"Fill a glass with ice\", \"Pour in the coffee\"]\n```");
        let steps = generate_steps(&llm, "iced coffee").await.unwrap();
        assert_eq!(steps, vec!["Fill a glass with ice", "Pour in the coffee"]);
    }

    #[tokio::test]
    async fn salvages_numbered_lines() {
        let llm = Scripted("1. Fill a glass with ice\n2. Pour in the coffee\n");
        let steps = generate_steps(&llm, "iced coffee").await.unwrap();
        assert_eq!(steps, vec!["Fill a glass with ice", "Pour in the coffee"]);
    }

    #[tokio::test]
    async fn unusable_reply_is_an_error() {
        let llm = Scripted("none");
        assert!(generate_steps(&llm, "iced coffee").await.is_err());
    }

    #[test]
    fn salvage_skips_blank_lines_and_bullets() {
        let steps = salvage_steps("- Chop onions\n\n* Heat the pan\n");
        assert_eq!(steps, vec!["Chop onions", "Heat the pan"]);
    }
}
