//! Candidate selection.
//!
//! [`Selector`] narrows a bucket to the eligible, unused candidates for a
//! rule; a [`SelectionStrategy`] picks one of them. [`FirstFit`] is the
//! deterministic baseline: the first candidate in roster order.

mod selector;
mod strategy;

pub use selector::Selector;
pub use strategy::{FirstFit, PickContext, Role, SeededShuffle, SelectionStrategy};
