/// Who is writing, and with what credential.
#[derive(Clone, PartialEq, Eq)]
pub struct WriteContext {
    /// Presented to the authorizer.
    pub credential: String,
    /// Key for rate limiting.
    pub caller_id: String,
    /// Recorded on version records; the configured default when `None`.
    pub author: Option<String>,
}

impl WriteContext {
    pub fn new(credential: impl Into<String>, caller_id: impl Into<String>) -> Self {
        Self {
            credential: credential.into(),
            caller_id: caller_id.into(),
            author: None,
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

impl std::fmt::Debug for WriteContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteContext")
            .field("credential", &"<redacted>")
            .field("caller_id", &self.caller_id)
            .field("author", &self.author)
            .finish()
    }
}
