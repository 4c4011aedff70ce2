use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::command_registry::CommandRegistry;
use crate::command_registry::Completion;
use crate::commands;
use crate::commands::CommandContext;
use crate::commands::Request;
use crate::config::TerminalConfig;
use crate::error::CommandError;
use crate::games;
use crate::profile::Roster;
use crate::state::OutputRecord;
use crate::state::SessionState;
use crate::vfs::VirtualFilesystem;
use crate::weather::render_conditions;
use crate::weather::Conditions;
use crate::weather::WeatherClient;
use crate::weather::WeatherError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeatherTicket(pub u64);

/// Work the host must do after a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEffect {
    /// Drop everything currently displayed. Session history is untouched.
    ClearScreen,
    /// Persist the newly active profile.
    ProfileSwitched { profile_id: String },
    /// Perform a lookup and hand the result to `complete_weather`.
    FetchWeather { ticket: WeatherTicket, city: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Turn {
    pub records: Vec<OutputRecord>,
    pub effects: Vec<TerminalEffect>,
}

pub struct Interpreter {
    roster: Roster,
    fs: VirtualFilesystem,
    session: SessionState,
    settings: TerminalConfig,
    rng: StdRng,
    started_at: Instant,
    next_ticket: u64,
    in_flight: Option<WeatherTicket>,
}

impl Interpreter {
    /// Starts a session as `initial_profile`, or the roster default when that
    /// id is absent or unknown.
    pub fn new(roster: Roster, settings: TerminalConfig, initial_profile: Option<&str>) -> Self {
        Self::with_rng(roster, settings, initial_profile, StdRng::from_entropy())
    }

    pub fn with_rng(
        roster: Roster,
        settings: TerminalConfig,
        initial_profile: Option<&str>,
        rng: StdRng,
    ) -> Self {
        let fs = VirtualFilesystem::build(&roster);
        let profile = initial_profile
            .and_then(|id| roster.get(id))
            .unwrap_or_else(|| roster.default_profile());
        let session = SessionState::new(profile, settings.history_limit);
        Self {
            roster,
            fs,
            session,
            settings,
            rng,
            started_at: Instant::now(),
            next_ticket: 1,
            in_flight: None,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn is_busy(&self) -> bool {
        self.session.busy
    }

    pub fn prompt(&self) -> String {
        format!(
            "{}@{}:{}$",
            self.session.active_profile_id, self.settings.hostname, self.session.current_directory
        )
    }

    /// Greeting shown when a terminal opens or the profile changes from outside.
    pub fn banner(&self) -> Vec<OutputRecord> {
        let name = self
            .roster
            .get(&self.session.active_profile_id)
            .map(|profile| profile.name.as_str())
            .unwrap_or(self.session.active_profile_id.as_str());
        vec![
            OutputRecord::output(crate::art::LOGO),
            OutputRecord::system(format!("Welcome to the {} terminal!", self.settings.hostname)),
            OutputRecord::system(format!("Current user: {name}")),
            OutputRecord::system("Type `help` to see available commands."),
        ]
    }

    pub fn execute(&mut self, raw: &str) -> Turn {
        let line = raw.trim();
        let mut turn = Turn::default();
        if line.is_empty() {
            return turn;
        }

        turn.records
            .push(OutputRecord::input(format!("{} {line}", self.prompt())));
        self.session.history.push(line);

        if let Some(mode) = self.session.game_mode {
            let step = games::play(mode, line, &mut self.rng);
            self.session.game_mode = step.next;
            turn.records.extend(step.records);
            return turn;
        }

        let mut tokens = line.split_whitespace();
        let head = tokens.next().unwrap_or_default().to_ascii_lowercase();
        let args: Vec<&str> = tokens.collect();

        let Some(spec) = CommandRegistry::lookup(&head) else {
            if self.settings.count_unknown_commands {
                self.session.command_count += 1;
            }
            debug!(command = %head, "unknown command");
            turn.records.push(OutputRecord::error(format!(
                "{head}: {}",
                CommandError::UnknownCommand
            )));
            return turn;
        };

        self.session.command_count += 1;
        debug!(command = spec.name, args = args.len(), "dispatching");

        let mut ctx = CommandContext {
            session: &mut self.session,
            fs: &self.fs,
            roster: &self.roster,
            settings: &self.settings,
            rng: &mut self.rng,
            started_at: self.started_at,
        };
        match commands::run(spec.id, &args, &mut ctx) {
            Ok(outcome) => {
                turn.records.extend(outcome.records);
                for request in outcome.requests {
                    let effect = self.effect_for(request);
                    turn.effects.push(effect);
                }
            }
            Err(err) => {
                debug!(command = spec.name, error = %err, "command failed");
                turn.records
                    .push(OutputRecord::error(format!("{}: {err}", spec.name)));
            }
        }
        turn
    }

    fn effect_for(&mut self, request: Request) -> TerminalEffect {
        match request {
            Request::ClearScreen => TerminalEffect::ClearScreen,
            Request::ProfileSwitched(profile_id) => TerminalEffect::ProfileSwitched { profile_id },
            Request::FetchWeather(city) => {
                let ticket = WeatherTicket(self.next_ticket);
                self.next_ticket += 1;
                self.in_flight = Some(ticket);
                self.session.busy = true;
                TerminalEffect::FetchWeather { ticket, city }
            }
        }
    }

    /// Delivers the result of a lookup started by `execute`. Always clears the
    /// busy flag for the matching ticket; results for any other ticket are
    /// dropped.
    pub fn complete_weather(
        &mut self,
        ticket: WeatherTicket,
        result: Result<Conditions, WeatherError>,
    ) -> Vec<OutputRecord> {
        if self.in_flight != Some(ticket) {
            debug!(ticket = ticket.0, "dropping stale weather result");
            return Vec::new();
        }
        self.in_flight = None;
        self.session.busy = false;

        match result {
            Ok(conditions) => {
                info!(place = %conditions.place, "weather lookup completed");
                vec![OutputRecord::output(render_conditions(&conditions))]
            }
            Err(err) => {
                warn!(error = %err, "weather lookup failed");
                let err = CommandError::from(err);
                vec![OutputRecord::error(format!(
                    "weather: {err}. (Tip: try a bigger city name)"
                ))]
            }
        }
    }

    /// Runs a line and performs any weather lookup inline. Used for scripted,
    /// non-interactive runs.
    pub fn execute_blocking(&mut self, raw: &str, client: &dyn WeatherClient) -> Turn {
        let turn = self.execute(raw);
        let mut done = Turn {
            records: turn.records,
            effects: Vec::new(),
        };
        for effect in turn.effects {
            match effect {
                TerminalEffect::FetchWeather { ticket, city } => {
                    let result = client.fetch_current_conditions(&city);
                    done.records.extend(self.complete_weather(ticket, result));
                }
                other => done.effects.push(other),
            }
        }
        done
    }

    /// Profile switch triggered from outside the command line, e.g. a picker.
    pub fn switch_profile(&mut self, profile_id: &str) -> Result<Vec<OutputRecord>, CommandError> {
        let profile = self
            .roster
            .get(profile_id)
            .ok_or_else(|| CommandError::UnknownProfile(profile_id.to_string()))?;
        self.session.switch_profile(profile);
        info!(profile = %profile_id, "switched profile");
        Ok(self.banner())
    }

    /// Back to a fresh session on the default profile. Abandons any game and
    /// forgets an in-flight lookup.
    pub fn reset(&mut self) {
        let profile = self.roster.default_profile();
        self.session = SessionState::new(profile, self.settings.history_limit);
        self.in_flight = None;
    }

    /// Completes the command name being typed. Only the first word completes.
    pub fn complete(&self, partial: &str) -> Completion {
        let partial = partial.trim_start();
        if partial.is_empty() || partial.contains(char::is_whitespace) {
            return Completion::None;
        }
        CommandRegistry::complete(partial)
    }

    pub fn history_prev(&mut self) -> Option<String> {
        self.session.history.prev().map(str::to_string)
    }

    pub fn history_next(&mut self) -> Option<String> {
        self.session.history.next().map(str::to_string)
    }
}

#[cfg(test)]
mod tests;
