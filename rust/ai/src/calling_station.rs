//! Passive calling station.
//!
//! Limps every button, calls every bet of any size on every street and
//! checks whenever it can. Never folds, never raises.

use headsup_engine::policy::{Decision, DecisionContext, DecisionPolicy};

#[derive(Debug, Clone, Default)]
pub struct CallingStation;

impl CallingStation {
    pub fn new() -> Self {
        Self
    }
}

impl DecisionPolicy for CallingStation {
    fn decide(&mut self, ctx: &DecisionContext<'_>) -> Decision {
        if ctx.to_call > 0.0 {
            Decision::call()
        } else {
            Decision::check()
        }
    }

    fn name(&self) -> &str {
        "fish"
    }
}
