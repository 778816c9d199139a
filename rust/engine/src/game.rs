use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::betting::Street;
use crate::cards::{join_cards, Card};
use crate::deck::Deck;
use crate::errors::EngineError;
use crate::player::{Chips, Player, Position};

/// Lifecycle of one hand. Transitions only move forward.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandPhase {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    Complete,
}

/// Blind sizes for the table.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    pub small_blind: Chips,
    pub big_blind: Chips,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: 5.0,
            big_blind: 10.0,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.small_blind > 0.0) || !(self.big_blind > 0.0) {
            return Err(EngineError::InvalidConfig(
                "blinds must be positive".to_string(),
            ));
        }
        if self.small_blind > self.big_blind {
            return Err(EngineError::InvalidConfig(format!(
                "small blind {} exceeds big blind {}",
                self.small_blind, self.big_blind
            )));
        }
        Ok(())
    }
}

/// Table state for heads-up play. Exclusively owns both seats and the deck;
/// seats are indexed 0 and 1 and keep their index across hands while
/// positions rotate.
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) players: [Player; 2],
    pub(crate) deck: Deck,
    pub(crate) board: Vec<Card>,
    pub(crate) pot: Chips,
    pub(crate) current_bet: Chips,
    pub(crate) phase: HandPhase,
    pub(crate) action_log: Vec<String>,
    pub(crate) config: TableConfig,
    pub(crate) preflop_aggressor: Option<usize>,
}

impl GameState {
    pub fn new(players: [Player; 2], config: TableConfig, deck: Deck) -> Result<Self, EngineError> {
        config.validate()?;
        if players[0].position() == players[1].position() {
            return Err(EngineError::InvalidSeating(format!(
                "both seats are {:?}; heads-up needs one button and one big blind",
                players[0].position()
            )));
        }
        Ok(Self {
            players,
            deck,
            board: Vec::with_capacity(5),
            pot: 0.0,
            current_bet: 0.0,
            phase: HandPhase::Preflop,
            action_log: Vec::new(),
            config,
            preflop_aggressor: None,
        })
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    pub fn pot(&self) -> Chips {
        self.pot
    }
    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }
    pub fn phase(&self) -> HandPhase {
        self.phase
    }
    pub fn action_log(&self) -> &[String] {
        &self.action_log
    }
    pub fn config(&self) -> TableConfig {
        self.config
    }
    pub fn deck(&self) -> &Deck {
        &self.deck
    }
    /// Seat that made the last preflop raise, if any.
    pub fn preflop_aggressor(&self) -> Option<usize> {
        self.preflop_aggressor
    }

    pub fn seat_of(&self, position: Position) -> usize {
        if self.players[0].position() == position {
            0
        } else {
            1
        }
    }

    pub fn button_index(&self) -> usize {
        self.seat_of(Position::Button)
    }

    /// Swaps the button and big blind between the two seats.
    pub fn rotate_button(&mut self) {
        for p in &mut self.players {
            p.set_position(p.position().opposite());
        }
    }

    /// Sum of stacks plus the pot. Constant over a hand.
    pub fn total_chips(&self) -> Chips {
        self.players.iter().map(Player::stack).sum::<Chips>() + self.pot
    }

    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    /// Seats that can still make decisions, in acting order for `street`:
    /// the button first preflop, the big blind first afterwards.
    pub fn action_order(&self, street: Street) -> Vec<usize> {
        let first = match street {
            Street::Preflop => Position::Button,
            _ => Position::BigBlind,
        };
        let lead = self.seat_of(first);
        [lead, 1 - lead]
            .into_iter()
            .filter(|&s| self.players[s].can_act())
            .collect()
    }

    pub(crate) fn log(&mut self, line: String) {
        trace!(target: "headsup_engine::log", "{}", line);
        self.action_log.push(line);
    }

    pub(crate) fn advance_phase(&mut self, next: HandPhase) {
        if next > self.phase {
            self.phase = next;
        }
    }

    pub fn reset_for_new_hand(&mut self) {
        self.deck.reset();
        self.deck.shuffle();
        self.board.clear();
        self.pot = 0.0;
        self.current_bet = 0.0;
        self.phase = HandPhase::Preflop;
        self.action_log.clear();
        self.preflop_aggressor = None;
        for p in &mut self.players {
            p.reset_for_new_hand();
        }
    }

    /// Button posts the small blind, the big blind posts the big blind; each
    /// posts at most its stack.
    pub fn post_blinds(&mut self) {
        let button = self.seat_of(Position::Button);
        let bb = 1 - button;
        let sb_posted = self.players[button].post_blind(self.config.small_blind);
        let bb_posted = self.players[bb].post_blind(self.config.big_blind);
        self.pot = sb_posted + bb_posted;
        self.current_bet = sb_posted.max(bb_posted);
        let line = format!("{} posts SB ${:.2}", self.players[button].name(), sb_posted);
        self.log(line);
        let line = format!("{} posts BB ${:.2}", self.players[bb].name(), bb_posted);
        self.log(line);
    }

    pub fn deal_hole_cards(&mut self) -> Result<(), EngineError> {
        for seat in 0..2 {
            let cards = self.deck.deal(2)?;
            let hole = [cards[0], cards[1]];
            self.players[seat].deal_hole(hole);
            let line = format!("Dealt to {}: {}", self.players[seat].name(), join_cards(&hole));
            self.log(line);
        }
        Ok(())
    }

    /// Burns one card and deals the board cards for `street`.
    pub fn deal_street(&mut self, street: Street) -> Result<(), EngineError> {
        let (count, label, phase) = match street {
            Street::Preflop => return Ok(()),
            Street::Flop => (3, "FLOP", HandPhase::Flop),
            Street::Turn => (1, "TURN", HandPhase::Turn),
            Street::River => (1, "RIVER", HandPhase::River),
        };
        self.deck.burn()?;
        let cards = self.deck.deal(count)?;
        self.board.extend_from_slice(&cards);
        self.advance_phase(phase);
        let line = format!("{}: {}", label, join_cards(&cards));
        self.log(line);
        Ok(())
    }

    /// Splits the pot between `winners` and zeroes it. The last winner takes
    /// any remainder so the total paid equals the pot exactly.
    pub fn award_pot(&mut self, winners: &[usize]) {
        if winners.is_empty() {
            return;
        }
        let pot = self.pot;
        let share = pot / winners.len() as f64;
        let mut paid = 0.0;
        for (i, &seat) in winners.iter().enumerate() {
            let amount = if i + 1 == winners.len() {
                pot - paid
            } else {
                share
            };
            self.players[seat].win(amount);
            paid += amount;
        }
        let line = match winners {
            [seat] => format!("{} wins ${:.2}", self.players[*seat].name(), pot),
            _ => format!(
                "{} and {} split ${:.2}",
                self.players[winners[0]].name(),
                self.players[winners[1]].name(),
                pot
            ),
        };
        self.log(line);
        self.pot = 0.0;
    }
}
