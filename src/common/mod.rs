//! Common, shared types.

pub mod state;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
