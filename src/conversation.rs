use ollama_rs::generation::chat::ChatMessage;

/// Most messages kept in a [`Conversation`] (= 10 back-and-forth exchanges).
pub const MAX_HISTORY: usize = 20;

/// Rolling log of prior user/assistant exchanges.
///
/// Text only: images attached to a turn are never retained, so the payload
/// injected into later prompts stays bounded. Exchanges are appended in
/// pairs and evicted in pairs, oldest first, which keeps user/assistant
/// alignment intact by construction.
#[derive(Debug)]
pub struct Conversation {
    history: Vec<ChatMessage>,
    capacity: usize,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new(MAX_HISTORY)
    }
}

impl Conversation {
    /// Create a conversation keeping at most `capacity` messages.
    pub fn new(capacity: usize) -> Self {
        Self {
            history: Vec::new(),
            capacity,
        }
    }

    /// Append one user/assistant exchange, evicting the oldest pair when the
    /// log would exceed capacity.
    pub fn append(&mut self, user_text: impl Into<String>, assistant_text: impl Into<String>) {
        self.history.push(ChatMessage::user(user_text.into()));
        self.history.push(ChatMessage::assistant(assistant_text.into()));
        while self.history.len() > self.capacity {
            self.history.drain(..2);
        }
    }

    /// Current ordered contents, oldest first.
    pub fn snapshot(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Number of stored messages (two per exchange).
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// True when no exchange has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
