//! Card, chip and percentage formatters for terminal reports.
//!
//! Cards render with suit glyphs (`A♠`) where the terminal is expected to
//! handle them and fall back to the short codes (`As`) elsewhere.
//!
//! ```rust
//! use headsup_engine::cards::{Card, Rank, Suit};
//! use headsup_cli::formatters::{format_board, format_chips, format_signed_chips};
//!
//! let ace = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_board(&[ace]).starts_with("[A"));
//! assert_eq!(format_chips(1234.5), "$1234.50");
//! assert_eq!(format_signed_chips(-20.0), "-$20.00");
//! ```

use headsup_engine::cards::Card;
use headsup_engine::player::Chips;

/// On Windows only modern terminals (Windows Terminal, VS Code, anything
/// setting TERM_PROGRAM) are trusted with the suit glyphs.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_card(card: &Card) -> String {
    if supports_unicode() {
        card.to_string()
    } else {
        card.code()
    }
}

/// Space separated cards in brackets, `[]` when empty.
pub fn format_board(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

pub fn format_chips(amount: Chips) -> String {
    format!("${:.2}", amount)
}

/// Chip delta with an explicit sign, e.g. `+$15.00`.
pub fn format_signed_chips(amount: Chips) -> String {
    if amount < 0.0 {
        format!("-${:.2}", -amount)
    } else {
        format!("+${:.2}", amount)
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}
