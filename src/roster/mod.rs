//! Roster classification.
//!
//! [`classify`] turns a flat participant list into the candidate pools the
//! selector draws from. [`FamilyGraph`] carries the optional family links
//! used for `same_sex_or_family` assistants.

mod classifier;
mod family;

pub use classifier::{classify, Buckets};
pub use family::FamilyGraph;
