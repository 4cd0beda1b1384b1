//! AI systems (perception → decision → action)

pub mod actions;
pub mod fsm;

pub use actions::*;
pub use fsm::*;
