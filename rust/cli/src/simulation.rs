//! Multi-hand simulation between two decision policies.
//!
//! Agent A sits in seat 0 and starts as the big blind; the button alternates
//! every hand and stacks carry over from one hand to the next. The run ends
//! after the requested number of hands or as soon as either agent has no
//! chips left.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use headsup_engine::cards::Card;
use headsup_engine::engine::Engine;
use headsup_engine::errors::EngineError;
use headsup_engine::game::TableConfig;
use headsup_engine::player::{Chips, Player, Position};
use headsup_engine::policy::DecisionPolicy;

use crate::error::CliError;

const CHIP_TOLERANCE: Chips = 1e-6;

#[derive(Debug, Clone)]
pub struct SimulationParams {
    pub hands: u32,
    pub starting_stack: Chips,
    pub table: TableConfig,
    pub seed: u64,
}

/// Counters for one agent over a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationStats {
    pub agent_name: String,
    pub hands_dealt: u32,
    pub hands_won: u32,
    pub hands_lost: u32,
    pub hands_split: u32,
    pub total_profit: Chips,
    pub showdowns_total: u32,
    pub showdowns_won: u32,
    pub vpip_hands: u32,
}

impl SimulationStats {
    pub fn new(agent_name: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            ..Self::default()
        }
    }

    /// Percentage of dealt hands won outright.
    pub fn win_rate(&self) -> f64 {
        percent(self.hands_won, self.hands_dealt)
    }

    pub fn avg_profit(&self) -> f64 {
        if self.hands_dealt == 0 {
            0.0
        } else {
            self.total_profit / f64::from(self.hands_dealt)
        }
    }

    /// Profit in big blinds per 100 hands.
    pub fn bb_per_100(&self, big_blind: Chips) -> f64 {
        if big_blind <= 0.0 {
            return 0.0;
        }
        self.avg_profit() / big_blind * 100.0
    }

    pub fn showdown_win_rate(&self) -> f64 {
        percent(self.showdowns_won, self.showdowns_total)
    }

    pub fn vpip(&self) -> f64 {
        percent(self.vpip_hands, self.hands_dealt)
    }
}

fn percent(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(whole) * 100.0
    }
}

/// One played hand. Cards use the short codes (`As`, `Td`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandSummary {
    pub hand_number: u32,
    pub winners: Vec<String>,
    pub amount_won: Chips,
    pub description: String,
    pub went_to_showdown: bool,
    pub agent_a_cards: Vec<String>,
    pub agent_b_cards: Vec<String>,
    pub board: Vec<String>,
    pub stacks_before: [Chips; 2],
    pub stacks_after: [Chips; 2],
    pub actions: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub hands_requested: u32,
    pub agent_a: SimulationStats,
    pub agent_b: SimulationStats,
    pub hands: Vec<HandSummary>,
    pub final_stacks: [Chips; 2],
    /// Why the run ended before `hands_requested`, if it did
    pub stopped_early: Option<String>,
    pub seed: u64,
    pub big_blind: Chips,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl SimulationResult {
    pub fn hands_played(&self) -> u32 {
        self.agent_a.hands_dealt
    }

    pub fn duration_seconds(&self) -> f64 {
        (self.end_time - self.start_time)
            .to_std()
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }
}

/// Seat label shown in logs and reports: the policy name plus a side marker
/// so two copies of the same strategy stay distinguishable.
pub fn agent_label(policy_name: &str, seat: usize) -> String {
    let side = if seat == 0 { 'A' } else { 'B' };
    format!("{} ({})", policy_name, side)
}

/// Runs up to `params.hands` hands between `policy_a` (seat 0) and
/// `policy_b` (seat 1).
///
/// # Errors
///
/// Invalid blinds or stack, any engine error other than an exhausted
/// stack, or a hand that creates or destroys chips.
pub fn run_simulation(
    params: &SimulationParams,
    policy_a: Box<dyn DecisionPolicy>,
    policy_b: Box<dyn DecisionPolicy>,
) -> Result<SimulationResult, CliError> {
    params.table.validate()?;
    if !(params.starting_stack > 0.0) || !params.starting_stack.is_finite() {
        return Err(CliError::Config(format!(
            "starting stack must be >0, got {}",
            params.starting_stack
        )));
    }

    let names = [
        agent_label(policy_a.name(), 0),
        agent_label(policy_b.name(), 1),
    ];
    let players = [
        Player::new(names[0].clone(), params.starting_stack, Position::BigBlind),
        Player::new(names[1].clone(), params.starting_stack, Position::Button),
    ];
    let mut engine = Engine::new(players, [policy_a, policy_b], params.table, params.seed)?;

    let mut stats = [
        SimulationStats::new(names[0].clone()),
        SimulationStats::new(names[1].clone()),
    ];
    let mut hands = Vec::with_capacity(params.hands as usize);
    let mut stopped_early = None;
    let start_time = Utc::now();

    for hand_number in 1..=params.hands {
        let before = stacks(&engine);
        let outcome = match engine.play_hand() {
            Ok(outcome) => outcome,
            Err(EngineError::StackExhausted(name)) => {
                debug!(hand_number, %name, "stopping: stack exhausted");
                stopped_early = Some(format!("{} has no chips left", name));
                break;
            }
            Err(e) => {
                warn!(hand_number, error = %e, "hand aborted");
                return Err(CliError::Engine(format!("hand {}: {}", hand_number, e)));
            }
        };
        let after = stacks(&engine);

        let total_before: Chips = before.iter().sum();
        let total_after: Chips = after.iter().sum();
        if (total_before - total_after).abs() > CHIP_TOLERANCE {
            warn!(hand_number, total_before, total_after, "chip conservation violated");
            return Err(CliError::Engine(format!(
                "hand {}: chip total changed from {:.2} to {:.2}",
                hand_number, total_before, total_after
            )));
        }

        for (seat, s) in stats.iter_mut().enumerate() {
            s.hands_dealt += 1;
            s.total_profit += after[seat] - before[seat];
            if engine.players()[seat].is_voluntary() {
                s.vpip_hands += 1;
            }
            if outcome.went_to_showdown {
                s.showdowns_total += 1;
            }
        }
        match outcome.winners.as_slice() {
            [winner] => {
                let loser = 1 - winner;
                stats[*winner].hands_won += 1;
                stats[loser].hands_lost += 1;
                if outcome.went_to_showdown {
                    stats[*winner].showdowns_won += 1;
                }
            }
            _ => {
                for s in stats.iter_mut() {
                    s.hands_split += 1;
                }
            }
        }

        debug!(
            hand_number,
            winners = ?outcome.winner_names,
            amount = outcome.amount_won,
            "hand recorded"
        );
        hands.push(HandSummary {
            hand_number,
            winners: outcome.winner_names.clone(),
            amount_won: outcome.amount_won,
            description: outcome.description.clone(),
            went_to_showdown: outcome.went_to_showdown,
            agent_a_cards: codes(outcome.hole_cards[0].as_ref().map_or(&[][..], |c| &c[..])),
            agent_b_cards: codes(outcome.hole_cards[1].as_ref().map_or(&[][..], |c| &c[..])),
            board: codes(&outcome.board),
            stacks_before: before,
            stacks_after: after,
            actions: engine.action_log().to_vec(),
        });

        engine.rotate_button();
    }

    let final_stacks = stacks(&engine);
    let [agent_a, agent_b] = stats;
    Ok(SimulationResult {
        hands_requested: params.hands,
        agent_a,
        agent_b,
        hands,
        final_stacks,
        stopped_early,
        seed: params.seed,
        big_blind: params.table.big_blind,
        start_time,
        end_time: Utc::now(),
    })
}

fn stacks(engine: &Engine) -> [Chips; 2] {
    let players = engine.players();
    [players[0].stack(), players[1].stack()]
}

fn codes(cards: &[Card]) -> Vec<String> {
    cards.iter().map(Card::code).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use headsup_engine::policy::{Decision, DecisionContext};

    struct Folder;
    impl DecisionPolicy for Folder {
        fn decide(&mut self, _: &DecisionContext<'_>) -> Decision {
            Decision::fold()
        }
        fn name(&self) -> &str {
            "folder"
        }
    }

    struct Shover;
    impl DecisionPolicy for Shover {
        fn decide(&mut self, ctx: &DecisionContext<'_>) -> Decision {
            Decision::raise_to(ctx.stack + ctx.committed)
        }
        fn name(&self) -> &str {
            "shover"
        }
    }

    fn params(hands: u32) -> SimulationParams {
        SimulationParams {
            hands,
            starting_stack: 1000.0,
            table: TableConfig::default(),
            seed: 5,
        }
    }

    #[test]
    fn derived_stats() {
        let s = SimulationStats {
            agent_name: "x".into(),
            hands_dealt: 200,
            hands_won: 50,
            hands_lost: 150,
            hands_split: 0,
            total_profit: 400.0,
            showdowns_total: 10,
            showdowns_won: 7,
            vpip_hands: 30,
        };
        assert_eq!(s.win_rate(), 25.0);
        assert_eq!(s.avg_profit(), 2.0);
        assert_eq!(s.bb_per_100(10.0), 20.0);
        assert_eq!(s.showdown_win_rate(), 70.0);
        assert_eq!(s.vpip(), 15.0);

        let empty = SimulationStats::new("y");
        assert_eq!(empty.win_rate(), 0.0);
        assert_eq!(empty.avg_profit(), 0.0);
        assert_eq!(empty.showdown_win_rate(), 0.0);
    }

    #[test]
    fn folders_trade_blinds() {
        // Preflop the button acts first and folds, so the big blind wins
        // every hand and the button alternates.
        let result = run_simulation(&params(4), Box::new(Folder), Box::new(Folder)).unwrap();
        assert_eq!(result.hands_played(), 4);
        assert_eq!(result.agent_a.hands_won, 2);
        assert_eq!(result.agent_b.hands_won, 2);
        assert_eq!(result.agent_a.total_profit, 0.0);
        assert_eq!(result.final_stacks, [1000.0, 1000.0]);
        assert_eq!(result.hands[0].winners, vec!["folder (A)".to_string()]);
        assert_eq!(result.hands[0].stacks_after, [1005.0, 995.0]);
        assert_eq!(result.hands[1].winners, vec!["folder (B)".to_string()]);
        assert_eq!(result.agent_a.vpip_hands, 0);
        assert!(result.stopped_early.is_none());
    }

    #[test]
    fn shove_fest_stops_when_a_stack_is_gone() {
        let result = run_simulation(&params(50), Box::new(Shover), Box::new(Shover)).unwrap();
        let total: Chips = result.final_stacks.iter().sum();
        assert!((total - 2000.0).abs() < 1e-6);
        if let Some(reason) = &result.stopped_early {
            assert!(reason.ends_with("has no chips left"));
            assert!(result.final_stacks.iter().any(|&s| s <= 0.0));
            assert!(result.hands_played() < 50);
        } else {
            assert_eq!(result.hands_played(), 50);
        }
        assert!(result.hands.iter().all(|h| h.went_to_showdown));
        assert!(result.agent_a.vpip_hands >= 1);
        assert!(result.agent_a.vpip_hands <= result.hands_played());
    }

    #[test]
    fn rejects_bad_params() {
        let mut p = params(1);
        p.starting_stack = 0.0;
        assert!(matches!(
            run_simulation(&p, Box::new(Folder), Box::new(Folder)),
            Err(CliError::Config(_))
        ));

        let mut p = params(1);
        p.table.small_blind = 50.0;
        assert!(matches!(
            run_simulation(&p, Box::new(Folder), Box::new(Folder)),
            Err(CliError::Config(_))
        ));
    }
}
