use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::stream;
use ollama_rs::generation::chat::ChatMessage;
use souschef::{Advisor, LLMClient, SafetyCaution, Token, TokenStream};

/// Pops one scripted reply per call.
struct Replies(Mutex<VecDeque<&'static str>>);

impl Replies {
    fn new(replies: &[&'static str]) -> Arc<Self> {
        Arc::new(Self(Mutex::new(replies.iter().copied().collect())))
    }
}

#[async_trait]
impl LLMClient for Replies {
    async fn chat_stream(
        &self,
        _messages: &[ChatMessage],
    ) -> Result<TokenStream, Box<dyn std::error::Error + Send + Sync>> {
        let text = self
            .0
            .lock()
            .unwrap()
            .pop_front()
            .expect("no reply scripted")
            .to_string();
        Ok(Box::pin(stream::once(async move { Token { text } })))
    }
}

const AVOCADO_STEP: &str = "Carefully slice the avocado in half using a sharp knife";

#[tokio::test]
async fn avocado_step_end_to_end() {
    let llm = Replies::new(&[
        "{\"caution\": \"sharp knife use\", \"tip\": \"cut away from fingers\"}",
        "none",
    ]);
    let advisor = Advisor::new(llm);

    let caution = advisor.safety_caution(AVOCADO_STEP).await.unwrap();
    assert_eq!(
        caution,
        Some(SafetyCaution {
            caution: "sharp knife use".to_string(),
            tip: Some("cut away from fingers".to_string()),
        })
    );

    let allergens = advisor.step_allergens(AVOCADO_STEP).await.unwrap();
    assert_eq!(allergens, None);
}

#[tokio::test]
async fn fenced_caution_json_parses_the_same() {
    let plain = Replies::new(&["{\"caution\": \"hot oil\", \"tip\": \"stand back\"}"]);
    let fenced = Replies::new(&["```json\n{\"caution\": \"hot oil\", \"tip\": \"stand back\"}\n```"]);

    let a = Advisor::new(plain).safety_caution("fry").await.unwrap();
    let b = Advisor::new(fenced).safety_caution("fry").await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn caution_without_tip_deserializes() {
    let llm = Replies::new(&["{\"caution\": \"boiling water\"}"]);
    let caution = Advisor::new(llm).safety_caution("boil").await.unwrap().unwrap();
    assert_eq!(caution.caution, "boiling water");
    assert_eq!(caution.tip, None);
}

#[tokio::test]
async fn malformed_caution_keeps_the_raw_text() {
    let llm = Replies::new(&["watch the blender blades"]);
    let caution = Advisor::new(llm).safety_caution("blend").await.unwrap();
    assert_eq!(
        caution,
        Some(SafetyCaution {
            caution: "watch the blender blades".to_string(),
            tip: None,
        })
    );
}

#[tokio::test]
async fn none_means_hazard_free() {
    let llm = Replies::new(&["  None \n"]);
    let caution = Advisor::new(llm).safety_caution("stir").await.unwrap();
    assert_eq!(caution, None);
}

#[tokio::test]
async fn step_allergens_parse_and_degrade() {
    let llm = Replies::new(&[
        "[\"gluten\", \"dairy\"]",
        "the step may contain milk",
        "[]",
    ]);
    let advisor = Advisor::new(llm);

    assert_eq!(
        advisor.step_allergens("knead the dough").await.unwrap(),
        Some(vec!["gluten".to_string(), "dairy".to_string()])
    );
    // Malformed replies and empty arrays both read as "none detected".
    assert_eq!(advisor.step_allergens("pour milk").await.unwrap(), None);
    assert_eq!(advisor.step_allergens("add water").await.unwrap(), None);
}

#[tokio::test]
async fn dish_allergens_cover_specific_ingredients() {
    let llm = Replies::new(&["```\n[\"peanuts\", \"kiwi\"]\n```"]);
    let advisor = Advisor::new(llm);
    assert_eq!(
        advisor.dish_allergens("fruit salad").await.unwrap(),
        Some(vec!["peanuts".to_string(), "kiwi".to_string()])
    );
}
