use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio_stream::StreamExt;

use crate::advisor::Advisor;
use crate::dispatcher::{ChatQuery, Dispatcher};
use crate::session::StepWatcher;

/// Step watcher that runs over a terminal instead of a camera feed.
///
/// Announces the current step and its advisories, then holds a streaming
/// chat loop until the input side closes or the user quits.
pub struct ConsoleWatcher<R, W> {
    dispatcher: Dispatcher,
    advisor: Advisor,
    input: R,
    output: W,
}

impl<R, W> ConsoleWatcher<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(dispatcher: Dispatcher, advisor: Advisor, input: R, output: W) -> Self {
        Self {
            dispatcher,
            advisor,
            input,
            output,
        }
    }

    async fn print(&mut self, text: &str) -> anyhow::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }

    async fn announce(&mut self, step: &str) -> anyhow::Result<()> {
        self.print(&format!("Watching for step: '{step}'\n")).await?;
        if let Some(caution) = self.advisor.safety_caution(step).await? {
            self.print(&format!("⚠️  {}\n", caution.caution)).await?;
            if let Some(tip) = caution.tip {
                self.print(&format!("💡 {tip}\n")).await?;
            }
        }
        if let Some(allergens) = self.advisor.step_allergens(step).await? {
            self.print(&format!("🥜 Allergens: {}\n", allergens.join(", ")))
                .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl<R, W> StepWatcher for ConsoleWatcher<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn watch(&mut self, step: &str, persona: &str) -> anyhow::Result<()> {
        self.announce(step).await?;
        loop {
            self.print("> ").await?;
            let mut line = String::new();
            if self.input.read_line(&mut line).await? == 0 {
                break;
            }
            let text = line.trim();
            if text.is_empty() || text == "quit" {
                break;
            }
            let query = ChatQuery::new(text).with_persona(persona);
            let mut stream = self.dispatcher.ask_stream(query).await?;
            while let Some(tok) = stream.next().await {
                self.print(&tok.text).await?;
            }
            self.print("\n").await?;
        }
        Ok(())
    }
}
