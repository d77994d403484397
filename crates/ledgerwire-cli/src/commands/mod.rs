//! Subcommand implementations.

pub mod decode;
pub mod encode;
pub mod field;
pub mod hash;
pub mod signing;
