/// Shared secret the backend expects on `POST /api/pipelines/sync`.
pub struct SyncToken(String);

impl From<&str> for SyncToken {
    fn from(value: &str) -> Self {
        Self(value.trim().to_owned())
    }
}

impl SyncToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for SyncToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<redacted>")
    }
}
