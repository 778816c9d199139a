//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "headsup",
    version,
    about = "Heads-up no-limit hold'em simulator"
)]
pub struct HeadsupCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a series of hands between two strategies and report statistics
    Sim {
        /// Strategy for agent A (tag, fish)
        #[arg(long, default_value = "tag")]
        agent_a: String,
        /// Strategy for agent B (tag, fish)
        #[arg(long, default_value = "fish")]
        agent_b: String,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        hands: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
        /// Starting stack for both agents
        #[arg(long)]
        stack: Option<f64>,
        #[arg(long)]
        small_blind: Option<f64>,
        #[arg(long)]
        big_blind: Option<f64>,
        /// Emit the result as JSON
        #[arg(long)]
        json: bool,
        /// Print one line per hand
        #[arg(long)]
        verbose: bool,
    },
    /// Play a single hand and print its action log
    Hand {
        #[arg(long, default_value = "tag")]
        agent_a: String,
        #[arg(long, default_value = "fish")]
        agent_b: String,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Evaluate 5 to 7 cards, e.g. `eval As Ks Qs Js 10s`
    Eval {
        #[arg(required = true, num_args = 1..)]
        cards: Vec<String>,
        /// The player's two hole cards; added to the cards if missing
        #[arg(long, num_args = 2, value_names = ["CARD", "CARD"])]
        hole: Option<Vec<String>>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_subcommand() {
        let commands = vec![
            vec!["headsup", "cfg"],
            vec!["headsup", "sim"],
            vec![
                "headsup", "sim", "--agent-a", "fish", "--agent-b", "tag", "--hands", "5",
                "--seed", "1", "--json",
            ],
            vec!["headsup", "hand", "--seed", "3"],
            vec!["headsup", "eval", "As", "Ks", "Qs", "Js", "10s"],
            vec!["headsup", "eval", "As", "Ks", "Qs", "Js", "10s", "--hole", "As", "Ks"],
        ];
        for argv in commands {
            assert!(HeadsupCli::try_parse_from(&argv).is_ok(), "{:?}", argv);
        }
    }

    #[test]
    fn sim_rejects_zero_hands() {
        assert!(HeadsupCli::try_parse_from(["headsup", "sim", "--hands", "0"]).is_err());
    }

    #[test]
    fn eval_hole_takes_two_cards() {
        let cli = HeadsupCli::try_parse_from([
            "headsup", "eval", "2c", "7d", "9h", "Jc", "Kd", "--hole", "Ah", "Ad",
        ])
        .unwrap();
        match cli.cmd {
            Commands::Eval { cards, hole } => {
                assert_eq!(cards.len(), 5);
                assert_eq!(hole, Some(vec!["Ah".to_string(), "Ad".to_string()]));
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(HeadsupCli::try_parse_from(["headsup", "eval", "2c", "--hole", "Ah"]).is_err());
    }
}
