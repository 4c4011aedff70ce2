use rand::rngs::StdRng;
use rand::SeedableRng;

pub(super) use super::Interpreter;
pub(super) use super::TerminalEffect;
pub(super) use super::Turn;
pub(super) use super::WeatherTicket;
pub(super) use crate::art;
pub(super) use crate::command_registry::CommandRegistry;
pub(super) use crate::command_registry::Completion;
pub(super) use crate::config::TerminalConfig;
pub(super) use crate::games::GameMode;
pub(super) use crate::profile::profile;
pub(super) use crate::profile::Profile;
pub(super) use crate::profile::Project;
pub(super) use crate::profile::Roster;
pub(super) use crate::state::OutputKind;
pub(super) use crate::state::OutputRecord;
pub(super) use crate::weather::Conditions;
pub(super) use crate::weather::WeatherClient;
pub(super) use crate::weather::WeatherError;

mod games;
mod navigation;

fn terminal(profiles: Vec<Profile>) -> Interpreter {
    terminal_with(profiles, TerminalConfig::default())
}

fn terminal_with(profiles: Vec<Profile>, settings: TerminalConfig) -> Interpreter {
    let roster = Roster::new(profiles).expect("valid roster");
    Interpreter::with_rng(roster, settings, None, StdRng::seed_from_u64(11))
}

fn ann() -> Interpreter {
    terminal(vec![profile("ann")])
}

/// Everything a turn printed after the echoed input line.
fn body(turn: &Turn) -> Vec<OutputRecord> {
    assert_eq!(turn.records.first().map(|r| r.kind), Some(OutputKind::Input));
    turn.records[1..].to_vec()
}

fn single_output(turn: &Turn) -> String {
    let body = body(turn);
    assert_eq!(body.len(), 1, "expected one record, got {body:?}");
    body[0].text.clone()
}

fn single_error(turn: &Turn) -> String {
    let body = body(turn);
    assert_eq!(body.len(), 1, "expected one record, got {body:?}");
    assert_eq!(body[0].kind, OutputKind::Error);
    body[0].text.clone()
}

fn conditions(place: &str) -> Conditions {
    Conditions {
        place: place.to_string(),
        temperature_celsius: 19.4,
        wind_kph: 7.2,
        description: "Clear sky".to_string(),
    }
}
