//! Pipeline stages for `mutability`.
//!
//! `src/mutability.rs` is the stable facade; the stages and their tests
//! live here so each can be exercised in isolation.

pub(crate) mod rules;

#[cfg(test)]
pub(crate) mod tests;
