//! Command handler modules for the `headsup` CLI.
//!
//! Each command lives in its own module and follows one pattern:
//!
//! - Public handler: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) passed in, never taken from globals
//! - Errors propagated via [`CliError`](crate::error::CliError); [`crate::run`]
//!   prints them and picks the exit code

pub mod cfg;
pub mod eval;
pub mod hand;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use eval::handle_eval_command;
pub use hand::handle_hand_command;
pub use sim::{SimArgs, handle_sim_command};

use std::str::FromStr;

use headsup_ai::Strategy;

use crate::config::{self, Config};
use crate::error::CliError;

/// Strategy names as typed on the command line.
pub(crate) fn parse_strategies(a: &str, b: &str) -> Result<[Strategy; 2], CliError> {
    Ok([Strategy::from_str(a)?, Strategy::from_str(b)?])
}

/// Policy seeds derive from the engine seed so one number replays a run.
pub(crate) fn policy_seeds(seed: u64) -> [u64; 2] {
    [seed.wrapping_add(1), seed.wrapping_add(2)]
}

/// Loads the layered configuration and lets `apply` override it from flags,
/// validating the final result.
pub(crate) fn resolve_config(apply: impl FnOnce(&mut Config)) -> Result<Config, CliError> {
    let mut cfg = config::load()?;
    apply(&mut cfg);
    config::validate(&cfg)?;
    Ok(cfg)
}
