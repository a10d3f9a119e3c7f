//! Move resolution against scripted and misbehaving agents.

use agent_tictactoe::{
    Agent, AgentError, Board, Mark, Move, Outcome, ScriptedAgent, TurnError, resolve_turn,
};
use std::time::Duration;

/// Agent that never answers within a reasonable time.
struct SlowAgent;

#[async_trait::async_trait]
impl Agent for SlowAgent {
    async fn propose(&mut self, _prompt: &str) -> Result<String, AgentError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok("0 0".to_string())
    }

    fn name(&self) -> &str {
        "slow"
    }
}

fn board_after(moves: &[(usize, usize)]) -> Board {
    let mut board = Board::new();
    for &(row, col) in moves {
        board.apply_move(row, col).expect("legal setup move");
    }
    board
}

#[tokio::test]
async fn test_chatty_reply_uses_first_two_integers() {
    let mut board = board_after(&[(0, 0)]);
    let mut agent = ScriptedAgent::new("Player O", ["I think row 1 column 2 is best: 1 2"]);

    let result = resolve_turn(&mut board, &mut agent, None)
        .await
        .expect("chatty reply resolves");

    assert_eq!(*result.mv(), Move::new(1, 2));
    assert_eq!(*result.mark(), Mark::O);
    assert_eq!(board.turn(), Mark::X);
}

#[tokio::test]
async fn test_out_of_range_reply_is_invalid() {
    let mut board = board_after(&[(0, 0)]);
    let before = board.clone();
    let mut agent = ScriptedAgent::new("Player O", ["5 5"]);

    let err = resolve_turn(&mut board, &mut agent, None).await.unwrap_err();

    assert_eq!(
        err,
        TurnError::InvalidMoveProposed {
            raw_text: "5 5".to_string()
        }
    );
    assert!(err.is_recoverable());
    assert_eq!(board, before);
}

#[tokio::test]
async fn test_occupied_cell_reply_is_invalid_not_conflict() {
    let mut board = board_after(&[(0, 0)]);
    let before = board.clone();
    let mut agent = ScriptedAgent::new("Player O", ["0 0"]);

    let err = resolve_turn(&mut board, &mut agent, None).await.unwrap_err();

    assert!(matches!(err, TurnError::InvalidMoveProposed { .. }));
    assert_eq!(board, before);
}

#[tokio::test]
async fn test_finished_game_is_refused_without_prompting() {
    let mut board = board_after(&[(0, 0), (0, 1), (1, 1), (0, 2), (2, 2)]);
    assert_eq!(board.evaluate(), Outcome::Win(Mark::X));
    let before = board.clone();
    let mut agent = ScriptedAgent::new("Player O", ["1 0"]);

    let err = resolve_turn(&mut board, &mut agent, None).await.unwrap_err();

    assert_eq!(err, TurnError::GameAlreadyOver(Outcome::Win(Mark::X)));
    assert!(!err.is_recoverable());
    assert!(agent.prompts().is_empty());
    assert_eq!(agent.remaining(), 1);
    assert_eq!(board, before);
}

#[tokio::test]
async fn test_drawn_game_is_refused() {
    let mut board = Board::from_rendered(
        "| X | O | X |\n\
         | X | O | O |\n\
         | O | X | X |",
    )
    .expect("valid grid");
    let mut agent = ScriptedAgent::new("Player X", ["0 0"]);

    let err = resolve_turn(&mut board, &mut agent, None).await.unwrap_err();

    assert_eq!(err, TurnError::GameAlreadyOver(Outcome::Draw));
    assert!(agent.prompts().is_empty());
}

#[tokio::test]
async fn test_malformed_replies_never_touch_the_board() {
    let replies = [
        "",
        "center",
        "row 1",
        "-1 0",
        "1.5",
        "3 0",
        "99999999999999999999 0",
        "🤖",
    ];
    for reply in replies {
        let mut board = board_after(&[(1, 1)]);
        let before = board.clone();
        let mut agent = ScriptedAgent::new("Player O", [reply]);

        let err = resolve_turn(&mut board, &mut agent, None).await.unwrap_err();

        assert!(
            matches!(err, TurnError::InvalidMoveProposed { ref raw_text } if raw_text == reply),
            "reply {reply:?} gave {err:?}"
        );
        assert_eq!(board, before, "reply {reply:?} changed the board");
    }
}

#[tokio::test]
async fn test_timeout_is_agent_unavailable() {
    let mut board = Board::new();
    let mut agent = SlowAgent;

    let err = resolve_turn(&mut board, &mut agent, Some(Duration::from_millis(20)))
        .await
        .unwrap_err();

    assert!(matches!(err, TurnError::AgentUnavailable { ref agent, .. } if agent == "slow"));
    assert_eq!(board, Board::new());
}

#[tokio::test]
async fn test_same_board_same_prompt() {
    let mut first = board_after(&[(2, 0)]);
    let mut second = board_after(&[(2, 0)]);
    let mut a = ScriptedAgent::new("a", ["0 0"]);
    let mut b = ScriptedAgent::new("b", ["1 1"]);

    resolve_turn(&mut first, &mut a, None).await.expect("resolves");
    resolve_turn(&mut second, &mut b, None).await.expect("resolves");

    assert_eq!(a.prompts(), b.prompts());
}
