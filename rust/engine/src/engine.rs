use serde::{Deserialize, Serialize};
use tracing::info;

use crate::betting::{run_round, Street};
use crate::cards::{join_cards, Card};
use crate::deck::Deck;
use crate::errors::EngineError;
use crate::game::{GameState, HandPhase, TableConfig};
use crate::hand::{evaluate_with_hole, Evaluation};
use crate::player::{Chips, Player};
use crate::policy::DecisionPolicy;

/// Result of one complete hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandOutcome {
    /// Winning seat indices; two entries on a split pot
    pub winners: Vec<usize>,
    pub winner_names: Vec<String>,
    /// The whole pot, before any split
    pub amount_won: Chips,
    pub description: String,
    pub went_to_showdown: bool,
    pub board: Vec<Card>,
    pub hole_cards: [Option<[Card; 2]>; 2],
}

/// Drives heads-up hands between two seats, each with its own policy.
/// Owns the table state and the deck for the whole session.
///
/// # Examples
///
/// ```
/// use headsup_engine::engine::Engine;
/// use headsup_engine::game::TableConfig;
/// use headsup_engine::player::{Player, Position};
/// use headsup_engine::policy::{Decision, DecisionContext, DecisionPolicy};
///
/// struct Folder;
/// impl DecisionPolicy for Folder {
///     fn decide(&mut self, _: &DecisionContext<'_>) -> Decision { Decision::fold() }
///     fn name(&self) -> &str { "folder" }
/// }
///
/// let players = [
///     Player::new("bb", 1000.0, Position::BigBlind),
///     Player::new("btn", 1000.0, Position::Button),
/// ];
/// let mut engine = Engine::new(
///     players,
///     [Box::new(Folder), Box::new(Folder)],
///     TableConfig::default(),
///     42,
/// ).unwrap();
///
/// let outcome = engine.play_hand().unwrap();
/// assert_eq!(outcome.winners, vec![0]);
/// assert_eq!(outcome.amount_won, 15.0);
/// assert_eq!(outcome.description, "opponent folded");
/// ```
pub struct Engine {
    state: GameState,
    policies: [Box<dyn DecisionPolicy>; 2],
}

impl Engine {
    pub fn new(
        players: [Player; 2],
        policies: [Box<dyn DecisionPolicy>; 2],
        config: TableConfig,
        seed: u64,
    ) -> Result<Self, EngineError> {
        let state = GameState::new(players, config, Deck::new_with_seed(seed))?;
        Ok(Self { state, policies })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }
    pub fn players(&self) -> &[Player; 2] {
        self.state.players()
    }
    pub fn board(&self) -> &[Card] {
        self.state.board()
    }
    pub fn action_log(&self) -> &[String] {
        self.state.action_log()
    }
    pub fn policy_name(&self, seat: usize) -> &str {
        self.policies[seat].name()
    }

    pub fn rotate_button(&mut self) {
        self.state.rotate_button();
    }

    /// Plays one hand: blinds, hole cards, up to four betting rounds,
    /// showdown and pot award.
    ///
    /// # Errors
    ///
    /// [`EngineError::StackExhausted`] if either seat starts the hand with
    /// no chips.
    pub fn play_hand(&mut self) -> Result<HandOutcome, EngineError> {
        let state = &mut self.state;
        if let Some(busted) = state.players().iter().find(|p| p.stack() <= 0.0) {
            return Err(EngineError::StackExhausted(busted.name().to_string()));
        }
        state.reset_for_new_hand();
        state.post_blinds();
        state.deal_hole_cards()?;

        for street in [Street::Preflop, Street::Flop, Street::Turn, Street::River] {
            if street != Street::Preflop {
                state.deal_street(street)?;
            }
            let betting_closed = state
                .players()
                .iter()
                .filter(|p| p.is_active())
                .all(|p| p.is_all_in());
            if betting_closed {
                continue;
            }
            if !run_round(street, state, &mut self.policies)? {
                return Ok(self.finish_by_fold());
            }
        }

        self.showdown()
    }

    fn finish_by_fold(&mut self) -> HandOutcome {
        let state = &mut self.state;
        let winner = if state.players[0].is_active() { 0 } else { 1 };
        let amount = state.pot();
        state.award_pot(&[winner]);
        state.advance_phase(HandPhase::Complete);
        info!(winner, amount, "hand ended by fold");
        self.outcome(vec![winner], amount, "opponent folded".to_string(), false)
    }

    fn showdown(&mut self) -> Result<HandOutcome, EngineError> {
        let state = &mut self.state;
        state.advance_phase(HandPhase::Showdown);

        let mut shown: Vec<(usize, Evaluation)> = Vec::with_capacity(2);
        for seat in 0..2 {
            let player = &state.players[seat];
            if !player.is_active() {
                continue;
            }
            let hole = player.hole_cards().ok_or_else(|| {
                EngineError::InvalidHand(format!("{} has no hole cards", player.name()))
            })?;
            let mut cards = hole.to_vec();
            cards.extend_from_slice(&state.board);
            let eval = evaluate_with_hole(&cards, &hole)?;
            let line = format!(
                "{} shows {}: {}",
                player.name(),
                join_cards(&hole),
                eval.describe()
            );
            state.log(line);
            shown.push((seat, eval));
        }

        let best = shown
            .iter()
            .map(|(_, e)| &e.rank)
            .max()
            .cloned()
            .ok_or_else(|| EngineError::InvalidHand("no active player at showdown".into()))?;
        let winners: Vec<usize> = shown
            .iter()
            .filter(|(_, e)| e.rank == best)
            .map(|(s, _)| *s)
            .collect();
        let mut description = shown
            .iter()
            .find(|(s, _)| *s == winners[0])
            .map(|(_, e)| e.describe())
            .unwrap_or_default();
        if winners.len() > 1 {
            description.push_str(" (split)");
        }

        let amount = state.pot();
        state.award_pot(&winners);
        state.advance_phase(HandPhase::Complete);
        info!(?winners, amount, %description, "hand ended at showdown");
        Ok(self.outcome(winners, amount, description, true))
    }

    fn outcome(
        &self,
        winners: Vec<usize>,
        amount_won: Chips,
        description: String,
        went_to_showdown: bool,
    ) -> HandOutcome {
        let players = self.state.players();
        HandOutcome {
            winner_names: winners
                .iter()
                .map(|&s| players[s].name().to_string())
                .collect(),
            winners,
            amount_won,
            description,
            went_to_showdown,
            board: self.state.board().to_vec(),
            hole_cards: [players[0].hole_cards(), players[1].hole_cards()],
        }
    }
}
