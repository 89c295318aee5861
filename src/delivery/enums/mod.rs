pub mod attempt_outcome;
pub mod share_outcome;
pub mod strategy_kind;
