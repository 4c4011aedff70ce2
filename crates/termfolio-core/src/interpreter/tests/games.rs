use super::*;
use pretty_assertions::assert_eq;

fn in_guess_game(target: u8) -> Interpreter {
    let mut term = ann();
    term.execute("game guess");
    assert!(term.session().in_game());
    term.session.game_mode = Some(GameMode::GuessNumber {
        target,
        attempts: 0,
    });
    term
}

#[test]
fn bare_game_lists_what_is_available() {
    let mut term = ann();
    assert_eq!(
        single_output(&term.execute("game")),
        "Available games: guess, rps\nUsage: game <name>"
    );
    assert!(!term.session().in_game());
}

#[test]
fn guess_game_intercepts_until_solved() {
    let mut term = in_guess_game(42);

    assert_eq!(
        body(&term.execute("10")),
        vec![OutputRecord::output("Too low! Try higher.")]
    );
    assert_eq!(
        body(&term.execute("ls")),
        vec![OutputRecord::error("Please enter a number!")]
    );
    assert_eq!(
        body(&term.execute("42")),
        vec![
            OutputRecord::output("Correct! The number was 42."),
            OutputRecord::system("Attempts: 2"),
        ]
    );
    assert!(!term.session().in_game());
    assert_eq!(single_output(&term.execute("pwd")), "/home/ann");
}

#[test]
fn game_input_is_recorded_but_not_counted() {
    let mut term = in_guess_game(42);
    let counted = term.session().command_count;
    term.execute("50");
    term.execute("42");

    assert_eq!(term.session().command_count, counted);
    let lines: Vec<&str> = term.session().history.iter().collect();
    assert_eq!(lines, vec!["game guess", "50", "42"]);
}

#[test]
fn rps_round_ends_the_game() {
    let mut term = ann();
    term.execute("game RPS");
    assert_eq!(
        term.session().game_mode,
        Some(GameMode::RockPaperScissors)
    );

    let turn = term.execute("help");
    assert_eq!(
        body(&turn),
        vec![OutputRecord::error("Type rock, paper, or scissors!")]
    );

    let turn = term.execute("rock");
    let records = body(&turn);
    assert_eq!(records.len(), 2);
    assert!(records[0].text.starts_with("You: rock | Computer: "));
    assert!(!term.session().in_game());
}

#[test]
fn non_numeric_guess_keeps_attempts() {
    let mut term = in_guess_game(7);
    term.execute("abc");
    assert_eq!(
        term.session().game_mode,
        Some(GameMode::GuessNumber {
            target: 7,
            attempts: 0
        })
    );
}
