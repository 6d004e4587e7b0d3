//! Caller-visible state containers.

pub mod outcome_board;

pub use outcome_board::{ApplyResult, BoardSnapshot, OutcomeBoard};
