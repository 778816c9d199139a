//! # headsup CLI Library
//!
//! Command-line front end for the heads-up hold'em engine: multi-hand
//! simulations between strategies, single-hand walkthroughs, a card
//! evaluator and a configuration dump.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments, dispatches to a command handler and
//! returns the process exit code.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["headsup", "sim", "--hands", "100", "--seed", "42"];
//! let code = headsup_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `sim`: Play N hands between two strategies and report statistics
//! - `hand`: Play one hand and print its action log
//! - `eval`: Evaluate 5 to 7 cards
//! - `cfg`: Display the resolved configuration and its sources

use clap::Parser;
use std::io::Write;

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exit_code;
pub mod formatters;
pub mod logging;
pub mod simulation;
pub mod ui;

use cli::{Commands, HeadsupCli};
use commands::{
    SimArgs, handle_cfg_command, handle_eval_command, handle_hand_command, handle_sim_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["sim", "hand", "eval", "cfg"];

/// Writes, or bails out of [`run`] with [`exit_code::ERROR`] when the stream
/// is gone.
macro_rules! write_or_exit {
    ($dst:expr, $($arg:tt)*) => {
        if writeln!($dst, $($arg)*).is_err() {
            return exit_code::ERROR;
        }
    };
}

/// Main entry point for the CLI application.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for any error
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["headsup", "eval", "As", "Ks", "Qs", "Js", "10s"];
/// let mut out = Vec::new();
/// let code = headsup_cli::run(args, &mut out, &mut io::stderr());
/// assert_eq!(code, 0);
/// assert!(String::from_utf8(out).unwrap().contains("Royal Flush"));
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HeadsupCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version go to stdout and succeed
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                if write!(out, "{}", e).is_err() {
                    return exit_code::ERROR;
                }
                return exit_code::SUCCESS;
            }
            write_or_exit!(err, "{}", e);
            write_or_exit!(err, "\nHeads-up Hold'em Simulator");
            write_or_exit!(err, "Usage: headsup <command> [options]\n");
            write_or_exit!(err, "Commands:");
            for c in COMMANDS {
                write_or_exit!(err, "  {}", c);
            }
            write_or_exit!(err, "\nFor full help, run: headsup --help");
            return exit_code::ERROR;
        }
    };

    let result = match cli.cmd {
        Commands::Sim {
            agent_a,
            agent_b,
            hands,
            seed,
            stack,
            small_blind,
            big_blind,
            json,
            verbose,
        } => {
            let args = SimArgs {
                agent_a,
                agent_b,
                hands,
                seed,
                stack,
                small_blind,
                big_blind,
                json,
                verbose,
            };
            handle_sim_command(&args, out, err)
        }
        Commands::Hand {
            agent_a,
            agent_b,
            seed,
        } => handle_hand_command(&agent_a, &agent_b, seed, out),
        Commands::Eval { cards, hole } => handle_eval_command(&cards, hole.as_deref(), out),
        Commands::Cfg => handle_cfg_command(out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}
