pub mod delivery_attempt;
