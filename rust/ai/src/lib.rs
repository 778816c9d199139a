//! # headsup-ai: Rule-Based Decision Policies
//!
//! Strategies that plug into the engine's betting state machine through
//! [`DecisionPolicy`]. Every policy sees only the [`DecisionContext`] it is
//! handed, so any two can be seated against each other.
//!
//! ## Strategies
//!
//! - [`tight_aggressive`] - Position-aware TAG play: a fixed opening range,
//!   3-bet/4-bet ranges, c-bets and check-raises by made-hand class
//! - [`calling_station`] - Passive "fish": never folds and never raises
//!
//! ## Quick Start
//!
//! ```rust
//! use headsup_ai::create_policy;
//!
//! let tag = create_policy("tag", 42).unwrap();
//! assert_eq!(tag.name(), "tag");
//!
//! let fish = create_policy("calling-station", 42).unwrap();
//! assert_eq!(fish.name(), "fish");
//!
//! assert!(create_policy("maniac", 42).is_err());
//! ```
//!
//! [`DecisionContext`]: headsup_engine::policy::DecisionContext

use std::fmt;
use std::str::FromStr;

use headsup_engine::policy::DecisionPolicy;
use thiserror::Error;

pub mod calling_station;
pub mod tight_aggressive;

pub use calling_station::CallingStation;
pub use tight_aggressive::TightAggressive;

/// Returned for a policy name no strategy answers to.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown policy: {0} (expected one of: tag, fish)")]
pub struct UnknownPolicy(pub String);

/// The available strategies.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Strategy {
    TightAggressive,
    CallingStation,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::TightAggressive, Strategy::CallingStation];

    /// Short name used on the command line and in reports.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::TightAggressive => "tag",
            Strategy::CallingStation => "fish",
        }
    }

    /// Builds a fresh policy. `seed` drives any randomized sizing so runs
    /// replay exactly.
    pub fn build(self, seed: u64) -> Box<dyn DecisionPolicy> {
        match self {
            Strategy::TightAggressive => Box::new(TightAggressive::new(seed)),
            Strategy::CallingStation => Box::new(CallingStation::new()),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tag" | "tight-aggressive" | "tight_aggressive" => Ok(Strategy::TightAggressive),
            "fish" | "calling-station" | "calling_station" => Ok(Strategy::CallingStation),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

/// Factory for policies by name.
///
/// # Errors
///
/// [`UnknownPolicy`] when `name` matches no strategy.
pub fn create_policy(name: &str, seed: u64) -> Result<Box<dyn DecisionPolicy>, UnknownPolicy> {
    Ok(name.parse::<Strategy>()?.build(seed))
}
