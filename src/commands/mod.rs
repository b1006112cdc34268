//! Command implementations.
pub mod rename;
