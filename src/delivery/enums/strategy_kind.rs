use super::share_outcome::ShareOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    FileShare,
    LinkShare,
    Clipboard,
}

impl StrategyKind {
    pub fn value(&self) -> &str {
        match *self {
            Self::FileShare => "file_share",
            Self::LinkShare => "link_share",
            Self::Clipboard => "clipboard",
        }
    }

    pub fn success_outcome(&self) -> ShareOutcome {
        match *self {
            Self::FileShare | Self::LinkShare => ShareOutcome::Shared,
            Self::Clipboard => ShareOutcome::LinkCopied,
        }
    }
}
