//! CLI library components for Data Alchemist.

pub mod logging;
pub mod session;
