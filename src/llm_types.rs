use futures::stream::BoxStream;

/// Text fragment emitted by the completion oracle.
#[derive(Debug, Clone)]
pub struct Token {
    /// Fragment text as provided by the model.
    pub text: String,
}

/// Finite, non-restartable stream of [`Token`] values.
pub type TokenStream = BoxStream<'static, Token>;
