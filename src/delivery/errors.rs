#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("download proxy responded {0}")]
    Status(u16),
    #[error("download proxy returned an empty body")]
    EmptyBody,
    #[error("download proxy request failed: {0}")]
    Network(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShareError {
    #[error("share was cancelled")]
    Cancelled,
    #[error("share failed: {0}")]
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    #[error("Sharing failed, try downloading instead.")]
    DeliveryFailure,
}
