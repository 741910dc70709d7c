//! Rule checks.
//!
//! [`shape`] checks one candidate rule against the loaded tasks before it
//! is accepted; [`consistency`] checks the whole accepted rule set.

pub mod consistency;
pub mod shape;

pub use consistency::{find_co_run_cycle, validate_rules};
pub use shape::validate_rule;
