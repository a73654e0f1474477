//! Advisory queries: per-step safety cautions and allergen scans.
//!
//! These calls are non-critical. A malformed reply never becomes an error:
//! caution text survives as-is with no tip, while an allergen reply that
//! does not parse degrades to "none detected", the same outcome as the
//! oracle saying `none`. Transport failures still propagate.

use std::sync::Arc;

use ollama_rs::generation::chat::ChatMessage;
use serde::Deserialize;
use tracing::debug;

use crate::llm_client::{LLMClient, collect_reply};
use crate::prompt;
use crate::reply::{self, Reply};

/// Safety note for one recipe step.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SafetyCaution {
    /// What to watch out for, five words or fewer.
    pub caution: String,
    /// Optional prevention tip, seven words or fewer.
    #[serde(default)]
    pub tip: Option<String>,
}

/// Issues the advisory queries against a completion oracle.
pub struct Advisor {
    llm: Arc<dyn LLMClient>,
}

impl Advisor {
    pub fn new(llm: Arc<dyn LLMClient>) -> Self {
        Self { llm }
    }

    async fn query(&self, instructions: &str, user: String) -> anyhow::Result<String> {
        let messages = [
            ChatMessage::system(instructions.to_string()),
            ChatMessage::user(user),
        ];
        collect_reply(self.llm.as_ref(), &messages)
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }

    /// Safety caution for a recipe step, or `None` when it is hazard-free.
    pub async fn safety_caution(&self, step: &str) -> anyhow::Result<Option<SafetyCaution>> {
        let raw = self
            .query(prompt::SAFETY_INSTRUCTIONS, prompt::step_message(step))
            .await?;
        debug!(%raw, "safety reply");
        Ok(match reply::parse::<SafetyCaution>(&raw) {
            Reply::Absent => None,
            Reply::Structured(caution) => Some(caution),
            // Keep the signal rather than discard it: the raw text becomes
            // the caution and the tip is dropped.
            Reply::RawFallback(text) => Some(SafetyCaution {
                caution: text,
                tip: None,
            }),
        })
    }

    /// Major allergens present in one step, constrained to nine categories.
    pub async fn step_allergens(&self, step: &str) -> anyhow::Result<Option<Vec<String>>> {
        let raw = self
            .query(
                prompt::STEP_ALLERGEN_INSTRUCTIONS,
                prompt::step_message(step),
            )
            .await?;
        debug!(%raw, "step allergen reply");
        Ok(allergen_list(&raw))
    }

    /// Every potentially allergenic ingredient in a whole dish or drink.
    pub async fn dish_allergens(&self, food: &str) -> anyhow::Result<Option<Vec<String>>> {
        let raw = self
            .query(
                prompt::DISH_ALLERGEN_INSTRUCTIONS,
                prompt::dish_message(food),
            )
            .await?;
        debug!(%raw, "dish allergen reply");
        Ok(allergen_list(&raw))
    }
}

/// Shared degrade policy for both allergen scans: an unparseable reply and
/// an empty array both collapse to `None`.
fn allergen_list(raw: &str) -> Option<Vec<String>> {
    match reply::parse::<Vec<String>>(raw) {
        Reply::Structured(list) if !list.is_empty() => Some(list),
        Reply::Structured(_) | Reply::Absent | Reply::RawFallback(_) => None,
    }
}
