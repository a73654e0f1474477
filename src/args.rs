use std::path::PathBuf;

use clap::Parser;

/// Command line arguments for the souschef binary.
#[derive(Parser, Clone, Debug)]
pub struct Args {
    /// Dish or drink to prepare.
    #[arg(default_value = "iced coffee")]
    pub food: String,
    #[arg(long, default_value = "http://localhost:11434")]
    pub ollama_url: String,
    #[arg(long, default_value = "gemma3:27b")]
    pub chat_model: String,
    #[arg(long, default_value = "http://localhost:8000")]
    pub whisper_url: String,
    #[arg(long, default_value = "whisper-1")]
    pub whisper_model: String,
    /// WAV file to transcribe and ask as the opening question.
    #[arg(long)]
    pub wav: Option<PathBuf>,
    /// Image file to describe as a passive perception snapshot.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}
