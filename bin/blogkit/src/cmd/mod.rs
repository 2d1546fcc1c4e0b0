//! CLI command implementations.

pub mod check;
pub mod new;
pub mod posts;
pub mod theme;
