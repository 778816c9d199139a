use headsup_engine::engine::Engine;
use headsup_engine::errors::EngineError;
use headsup_engine::game::TableConfig;
use headsup_engine::player::{Player, Position};
use headsup_engine::policy::{Decision, DecisionContext, DecisionPolicy};

struct Shover;
impl DecisionPolicy for Shover {
    fn decide(&mut self, ctx: &DecisionContext<'_>) -> Decision {
        Decision::raise_to(ctx.stack + ctx.committed)
    }
    fn name(&self) -> &str {
        "shover"
    }
}

#[test]
fn zero_stack_prevents_new_hand() {
    let players = [
        Player::new("alice", 0.0, Position::BigBlind),
        Player::new("bob", 1000.0, Position::Button),
    ];
    let mut eng = Engine::new(
        players,
        [Box::new(Shover), Box::new(Shover)],
        TableConfig::default(),
        1,
    )
    .unwrap();
    let err = eng.play_hand().unwrap_err();
    assert_eq!(err, EngineError::StackExhausted("alice".into()));
    assert!(eng.action_log().is_empty());
}

#[test]
fn all_in_loser_cannot_start_another_hand() {
    let players = [
        Player::new("alice", 100.0, Position::BigBlind),
        Player::new("bob", 100.0, Position::Button),
    ];
    let mut eng = Engine::new(
        players,
        [Box::new(Shover), Box::new(Shover)],
        TableConfig::default(),
        17,
    )
    .unwrap();
    let out = eng.play_hand().unwrap();
    assert!(out.went_to_showdown);
    assert_eq!(out.amount_won, 200.0);
    if out.winners.len() == 1 {
        let loser = 1 - out.winners[0];
        assert_eq!(eng.players()[loser].stack(), 0.0);
        eng.rotate_button();
        assert!(matches!(
            eng.play_hand(),
            Err(EngineError::StackExhausted(_))
        ));
    } else {
        assert_eq!(eng.players()[0].stack(), 100.0);
    }
}
