//! Shared utilities.

pub mod fs;

#[cfg(test)]
pub mod testutil;
