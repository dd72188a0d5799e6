//! Token-to-expert routing demos for the Mixture-of-Experts articles.
//!
//! Two independent simulators share the assignment types here:
//! [`capacity`] shows tokens overflowing a per-expert capacity bound, and
//! [`load_balance`] shows which experts light up for each token under a
//! top-k gate.

pub mod capacity;
pub mod load_balance;

use serde::{Deserialize, Serialize};

pub use capacity::{route_sampled, route_with_preferences, CapacityConfig, CapacityResult};
pub use load_balance::{route_scored, route_uniform, LoadBalanceConfig};

/// One token's routing outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAssignment {
    /// Token index in display order.
    pub token: usize,
    /// Experts that accepted this token, ascending. Empty when dropped.
    pub experts: Vec<usize>,
    /// True when no expert accepted the token.
    pub dropped: bool,
}

impl TokenAssignment {
    /// An accepted token routed to the given experts.
    pub fn routed(token: usize, experts: Vec<usize>) -> Self {
        Self {
            token,
            experts,
            dropped: false,
        }
    }

    /// A token that overflowed every eligible expert.
    pub fn dropped(token: usize) -> Self {
        Self {
            token,
            experts: Vec::new(),
            dropped: true,
        }
    }
}
