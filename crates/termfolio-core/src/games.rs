use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::state::OutputRecord;

pub const GUESS_MIN: u8 = 1;
pub const GUESS_MAX: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    GuessNumber { target: u8, attempts: u32 },
    RockPaperScissors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    Guess,
    Rps,
}

impl GameKind {
    pub const ALL: [GameKind; 2] = [GameKind::Guess, GameKind::Rps];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Guess => "guess",
            Self::Rps => "rps",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStep {
    pub next: Option<GameMode>,
    pub records: Vec<OutputRecord>,
}

/// Enters a game and returns its opening mode and banner.
pub fn start<R: Rng + ?Sized>(kind: GameKind, rng: &mut R) -> (GameMode, Vec<OutputRecord>) {
    match kind {
        GameKind::Guess => (
            GameMode::GuessNumber {
                target: rng.gen_range(GUESS_MIN..=GUESS_MAX),
                attempts: 0,
            },
            vec![
                OutputRecord::system("Guess the Number"),
                OutputRecord::output(format!(
                    "I'm thinking of a number between {GUESS_MIN} and {GUESS_MAX}."
                )),
            ],
        ),
        GameKind::Rps => (
            GameMode::RockPaperScissors,
            vec![
                OutputRecord::system("Rock Paper Scissors"),
                OutputRecord::output("Type rock, paper, or scissors!"),
            ],
        ),
    }
}

/// Feeds one intercepted line to the running game.
pub fn play<R: Rng + ?Sized>(mode: GameMode, input: &str, rng: &mut R) -> GameStep {
    match mode {
        GameMode::GuessNumber { target, attempts } => play_guess(target, attempts, input),
        GameMode::RockPaperScissors => play_rps(input, rng),
    }
}

/// An optionally signed run of digits. Values past `i64` saturate so they
/// still count as a guess.
fn parse_guess(input: &str) -> Option<i64> {
    let input = input.trim();
    let digits = input.strip_prefix(['+', '-']).unwrap_or(input);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let saturated = if input.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    };
    Some(input.parse::<i64>().unwrap_or(saturated))
}

fn play_guess(target: u8, attempts: u32, input: &str) -> GameStep {
    let Some(guess) = parse_guess(input) else {
        return GameStep {
            next: Some(GameMode::GuessNumber { target, attempts }),
            records: vec![OutputRecord::error("Please enter a number!")],
        };
    };

    let attempts = attempts.saturating_add(1);
    let target_value = i64::from(target);
    if guess == target_value {
        return GameStep {
            next: None,
            records: vec![
                OutputRecord::output(format!("Correct! The number was {target}.")),
                OutputRecord::system(format!("Attempts: {attempts}")),
            ],
        };
    }

    let hint = if guess < target_value {
        "Too low! Try higher."
    } else {
        "Too high! Try lower."
    };
    GameStep {
        next: Some(GameMode::GuessNumber { target, attempts }),
        records: vec![OutputRecord::output(hint)],
    }
}

fn play_rps<R: Rng + ?Sized>(input: &str, rng: &mut R) -> GameStep {
    let Ok(player) = input.parse::<Throw>() else {
        return GameStep {
            next: Some(GameMode::RockPaperScissors),
            records: vec![OutputRecord::error("Type rock, paper, or scissors!")],
        };
    };

    let computer = Throw::ALL[rng.gen_range(0..Throw::ALL.len())];
    let verdict = match player.against(computer) {
        Verdict::Win => "You win!",
        Verdict::Lose => "Computer wins!",
        Verdict::Tie => "It's a tie!",
    };
    GameStep {
        next: None,
        records: vec![
            OutputRecord::output(format!("You: {player} | Computer: {computer}")),
            OutputRecord::system(verdict),
        ],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Throw {
    Rock,
    Paper,
    Scissors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Win,
    Lose,
    Tie,
}

impl Throw {
    pub const ALL: [Throw; 3] = [Throw::Rock, Throw::Paper, Throw::Scissors];

    pub fn beats(self) -> Throw {
        match self {
            Self::Rock => Self::Scissors,
            Self::Paper => Self::Rock,
            Self::Scissors => Self::Paper,
        }
    }

    pub fn against(self, other: Throw) -> Verdict {
        if self == other {
            Verdict::Tie
        } else if self.beats() == other {
            Verdict::Win
        } else {
            Verdict::Lose
        }
    }
}

impl FromStr for Throw {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rock" => Ok(Self::Rock),
            "paper" => Ok(Self::Paper),
            "scissors" => Ok(Self::Scissors),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Throw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Rock => "rock",
            Self::Paper => "paper",
            Self::Scissors => "scissors",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn guess_target_is_always_in_range() {
        let mut rng = rng();
        for _ in 0..500 {
            let (mode, _) = start(GameKind::Guess, &mut rng);
            let GameMode::GuessNumber { target, attempts } = mode else {
                panic!("expected guess mode");
            };
            assert!((GUESS_MIN..=GUESS_MAX).contains(&target));
            assert_eq!(attempts, 0);
        }
    }

    #[test]
    fn attempts_count_only_numeric_guesses() {
        let mut rng = rng();
        let mut mode = GameMode::GuessNumber {
            target: 42,
            attempts: 0,
        };
        for input in ["abc", "10", "", "90", "4 2", "50"] {
            let step = play(mode, input, &mut rng);
            mode = step.next.expect("game continues");
        }
        assert_eq!(
            mode,
            GameMode::GuessNumber {
                target: 42,
                attempts: 3
            }
        );
    }

    #[test]
    fn oversized_integers_still_count_as_guesses() {
        let mut rng = rng();
        let mode = GameMode::GuessNumber {
            target: 42,
            attempts: 0,
        };

        let huge = play(mode, "99999999999999999999", &mut rng);
        assert_eq!(huge.records, vec![OutputRecord::output("Too high! Try lower.")]);
        let tiny = play(huge.next.expect("continues"), "-99999999999999999999", &mut rng);
        assert_eq!(tiny.records, vec![OutputRecord::output("Too low! Try higher.")]);
        assert_eq!(
            tiny.next,
            Some(GameMode::GuessNumber {
                target: 42,
                attempts: 2
            })
        );
    }

    #[test]
    fn guess_syntax_is_sign_then_digits() {
        assert_eq!(parse_guess(" +7 "), Some(7));
        assert_eq!(parse_guess("-3"), Some(-3));
        assert_eq!(parse_guess("-"), None);
        assert_eq!(parse_guess("1e3"), None);
        assert_eq!(parse_guess("--5"), None);
    }

    #[test]
    fn guess_gives_direction_then_finishes_on_target() {
        let mut rng = rng();
        let mode = GameMode::GuessNumber {
            target: 42,
            attempts: 0,
        };

        let low = play(mode, "10", &mut rng);
        assert_eq!(low.records, vec![OutputRecord::output("Too low! Try higher.")]);
        let high = play(low.next.expect("continues"), "99", &mut rng);
        assert_eq!(high.records, vec![OutputRecord::output("Too high! Try lower.")]);

        let done = play(high.next.expect("continues"), "42", &mut rng);
        assert_eq!(done.next, None);
        assert_eq!(done.records[1], OutputRecord::system("Attempts: 3"));
    }

    #[test]
    fn rps_rejects_unknown_throws_without_ending() {
        let mut rng = rng();
        let step = play(GameMode::RockPaperScissors, "lizard", &mut rng);
        assert_eq!(step.next, Some(GameMode::RockPaperScissors));
        assert_eq!(step.records.len(), 1);
    }

    #[test]
    fn rps_ends_after_one_valid_round_regardless_of_outcome() {
        let mut rng = rng();
        for input in ["rock", "PAPER", "Scissors"] {
            for _ in 0..20 {
                let step = play(GameMode::RockPaperScissors, input, &mut rng);
                assert_eq!(step.next, None);
                assert!(step.records[0].text.starts_with("You: "));
            }
        }
    }

    #[test]
    fn win_relation_is_a_cycle() {
        assert_eq!(Throw::Rock.against(Throw::Scissors), Verdict::Win);
        assert_eq!(Throw::Scissors.against(Throw::Paper), Verdict::Win);
        assert_eq!(Throw::Paper.against(Throw::Rock), Verdict::Win);
        assert_eq!(Throw::Rock.against(Throw::Paper), Verdict::Lose);
        for throw in Throw::ALL {
            assert_eq!(throw.against(throw), Verdict::Tie);
        }
    }

    #[test]
    fn game_names_parse_case_insensitively() {
        assert_eq!(GameKind::parse("GUESS"), Some(GameKind::Guess));
        assert_eq!(GameKind::parse("rps"), Some(GameKind::Rps));
        assert_eq!(GameKind::parse("chess"), None);
    }
}
