use headsup_engine::engine::Engine;
use headsup_engine::game::TableConfig;
use headsup_engine::player::{Player, Position};
use headsup_engine::policy::{Decision, DecisionContext, DecisionPolicy};

struct CheckCall;
impl DecisionPolicy for CheckCall {
    fn decide(&mut self, ctx: &DecisionContext<'_>) -> Decision {
        if ctx.to_call > 0.0 {
            Decision::call()
        } else {
            Decision::check()
        }
    }
    fn name(&self) -> &str {
        "check-call"
    }
}

fn engine(seed: u64) -> Engine {
    let players = [
        Player::new("alice", 1000.0, Position::BigBlind),
        Player::new("bob", 1000.0, Position::Button),
    ];
    Engine::new(
        players,
        [Box::new(CheckCall), Box::new(CheckCall)],
        TableConfig::default(),
        seed,
    )
    .unwrap()
}

#[test]
fn burn_cards_and_board_count_are_correct() {
    let mut eng = engine(123);
    eng.play_hand().expect("hand should complete");
    assert_eq!(eng.board().len(), 5);
    assert!(eng.players().iter().all(|p| p.hole_cards().is_some()));
    // 52 - 4 hole - 5 board - 3 burns
    assert_eq!(eng.state().deck().remaining(), 40);
}

#[test]
fn rotation_moves_the_small_blind() {
    let mut eng = engine(5);
    eng.play_hand().unwrap();
    assert_eq!(eng.action_log()[0], "bob posts SB $5.00");
    eng.rotate_button();
    eng.play_hand().unwrap();
    assert_eq!(eng.action_log()[0], "alice posts SB $5.00");
    assert_eq!(eng.action_log()[1], "bob posts BB $10.00");
    assert_eq!(eng.state().button_index(), 0);
}
