//! Cooking-assistant core for the `souschef` binary.
//!
//! Chains a completion oracle (chat and vision) and a transcription oracle
//! to generate recipe steps, flag hazards and allergens per step, and hold
//! a streaming conversation with rolling history. All judgment is delegated
//! to the oracle; this crate formats prompts, parses loosely-structured
//! replies, and keeps the conversation buffer bounded.

pub mod advisor;
pub mod args;
pub mod console;
pub mod conversation;
pub mod dispatcher;
pub mod frame;
pub mod llm_client;
pub mod llm_types;
pub mod logger;
pub mod ollama_llm;
pub mod prompt;
pub mod reply;
pub mod session;
pub mod steps;
pub mod transcribe;

pub use crate::advisor::{Advisor, SafetyCaution};
pub use crate::console::ConsoleWatcher;
pub use crate::conversation::{Conversation, MAX_HISTORY};
pub use crate::dispatcher::{ChatQuery, Dispatcher};
pub use crate::llm_client::{LLMClient, collect_reply};
pub use crate::llm_types::{Token, TokenStream};
pub use crate::ollama_llm::OllamaLLM;
pub use crate::reply::Reply;
pub use crate::session::{Session, StepWatcher};
pub use crate::steps::generate_steps;
pub use crate::transcribe::{TranscribeError, Transcriber, WhisperHttp};
