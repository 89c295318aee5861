#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    LinkCopied,
    Cancelled,
}

impl ShareOutcome {
    pub fn message(&self) -> Option<&'static str> {
        match *self {
            Self::Shared => Some("Image shared."),
            Self::LinkCopied => Some("Link copied to clipboard."),
            Self::Cancelled => None,
        }
    }
}
