//! Pluggable pick policies.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::Participant;

/// Role being filled by a pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Principal,
    Assistant,
}

/// Where in the run a pick happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickContext {
    pub part_ordinal: u32,
    pub role: Role,
}

/// Chooses one candidate out of an already filtered, roster-ordered pool.
///
/// Every strategy sees the same pool the selector built, so eligibility and
/// exclusion never depend on the strategy; only the choice among eligible
/// candidates does.
///
/// # Examples
///
/// ```ignore
/// struct LastFit;
///
/// impl SelectionStrategy for LastFit {
///     fn name(&self) -> &str { "last_fit" }
///     fn pick(&self, candidates: &[&Participant], _ctx: &PickContext) -> Option<usize> {
///         candidates.len().checked_sub(1)
///     }
/// }
/// ```
pub trait SelectionStrategy: Send + Sync {
    /// Returns the name recorded in the compliance snapshot.
    fn name(&self) -> &str;

    /// Index into `candidates` of the chosen participant, or `None` when
    /// the pool is empty.
    fn pick(&self, candidates: &[&Participant], ctx: &PickContext) -> Option<usize>;
}

/// Always the first candidate in pool order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFit;

impl SelectionStrategy for FirstFit {
    fn name(&self) -> &str {
        "first_fit"
    }

    fn pick(&self, candidates: &[&Participant], _ctx: &PickContext) -> Option<usize> {
        if candidates.is_empty() {
            None
        } else {
            Some(0)
        }
    }
}

/// Uniform pick from a generator seeded by `(seed, part ordinal, role)`.
///
/// Reproducible for a fixed seed and roster order.
#[derive(Debug, Clone, Copy)]
pub struct SeededShuffle {
    seed: u64,
}

impl SeededShuffle {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn rng_for(&self, ctx: &PickContext) -> StdRng {
        let role = match ctx.role {
            Role::Principal => 0u64,
            Role::Assistant => 1u64,
        };
        let mixed = self.seed
            ^ (u64::from(ctx.part_ordinal)).wrapping_mul(0x9E37_79B9_7F4A_7C15)
            ^ role.wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
        StdRng::seed_from_u64(mixed)
    }
}

impl SelectionStrategy for SeededShuffle {
    fn name(&self) -> &str {
        "seeded_shuffle"
    }

    fn pick(&self, candidates: &[&Participant], ctx: &PickContext) -> Option<usize> {
        if candidates.is_empty() {
            return None;
        }
        Some(self.rng_for(ctx).random_range(0..candidates.len()))
    }
}
