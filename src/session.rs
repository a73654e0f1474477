//! Top-level session flow: one step list per dish, then hand the current
//! step and persona to whatever is watching the kitchen.

use async_trait::async_trait;
use tracing::info;

use crate::llm_client::LLMClient;
use crate::prompt;
use crate::steps::generate_steps;

/// External perception loop.
///
/// The watcher is told which step to look for and the persona instruction
/// that governs any oracle calls it makes. How it acquires frames or audio
/// is its own business.
#[async_trait]
pub trait StepWatcher {
    async fn watch(&mut self, step: &str, persona: &str) -> anyhow::Result<()>;
}

/// A cooking session for one dish.
///
/// The step list is generated once and immutable afterwards; index 0 is the
/// current step handed to the watcher.
pub struct Session {
    food: String,
    steps: Vec<String>,
}

impl Session {
    /// Generate the step list for `food`.
    pub async fn prepare(llm: &dyn LLMClient, food: impl Into<String>) -> anyhow::Result<Self> {
        let food = food.into();
        let steps = generate_steps(llm, &food).await?;
        info!(%food, count = steps.len(), "steps generated");
        Ok(Self { food, steps })
    }

    pub fn food(&self) -> &str {
        &self.food
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// The step the perception loop should be watching for.
    pub fn current_step(&self) -> &str {
        // prepare() rejects an empty step list.
        &self.steps[0]
    }

    /// Run the watcher against the current step.
    pub async fn run(&self, watcher: &mut dyn StepWatcher) -> anyhow::Result<()> {
        watcher.watch(self.current_step(), prompt::PERSONA).await
    }
}
