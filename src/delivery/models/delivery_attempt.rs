use crate::delivery::enums::{attempt_outcome::AttemptOutcome, strategy_kind::StrategyKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryAttempt {
    pub strategy: StrategyKind,
    pub outcome: AttemptOutcome,
}

impl DeliveryAttempt {
    pub fn error_detail(&self) -> Option<&str> {
        match &self.outcome {
            AttemptOutcome::UnsupportedOrFailed(detail) => Some(detail),
            AttemptOutcome::Success | AttemptOutcome::Cancelled => None,
        }
    }

    pub fn log(&self, index: usize) {
        match self.error_detail() {
            Some(detail) => tracing::warn!(
                index,
                strategy = self.strategy.value(),
                outcome = self.outcome.value(),
                detail,
                "delivery strategy fell through"
            ),
            None => tracing::debug!(
                index,
                strategy = self.strategy.value(),
                outcome = self.outcome.value(),
                "delivery strategy finished"
            ),
        }
    }
}
