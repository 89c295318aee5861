#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success,
    UnsupportedOrFailed(String),
    Cancelled,
}

impl AttemptOutcome {
    pub fn value(&self) -> &str {
        match *self {
            Self::Success => "success",
            Self::UnsupportedOrFailed(_) => "recoverable-failure",
            Self::Cancelled => "user-cancelled",
        }
    }
}
