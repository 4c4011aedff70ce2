use std::collections::VecDeque;

use serde::Deserialize;
use serde::Serialize;

use crate::games::GameMode;
use crate::profile::Profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    Input,
    Output,
    System,
    Error,
}

/// One line (or block) handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub kind: OutputKind,
    pub text: String,
}

impl OutputRecord {
    pub fn input(text: impl Into<String>) -> Self {
        Self {
            kind: OutputKind::Input,
            text: text.into(),
        }
    }

    pub fn output(text: impl Into<String>) -> Self {
        Self {
            kind: OutputKind::Output,
            text: text.into(),
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self {
            kind: OutputKind::System,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: OutputKind::Error,
            text: text.into(),
        }
    }
}

/// Append-only record of submitted lines plus a recall cursor.
///
/// The cursor sits at `len()` when nothing is being recalled.
#[derive(Debug, Clone)]
pub struct CommandHistory {
    entries: VecDeque<String>,
    cursor: usize,
    limit: usize,
}

impl CommandHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cursor: 0,
            limit: limit.max(1),
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        if self.entries.len() == self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(line.into());
        self.cursor = self.entries.len();
    }

    /// Steps back one entry; stays on the oldest once reached.
    pub fn prev(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        self.cursor = self.cursor.saturating_sub(1);
        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Steps forward one entry. Moving past the newest entry returns an empty
    /// line so the input box clears.
    pub fn next(&mut self) -> Option<&str> {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
            self.entries.get(self.cursor).map(String::as_str)
        } else {
            self.cursor = self.entries.len();
            Some("")
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

/// Mutable state of one interactive terminal.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub active_profile_id: String,
    pub current_directory: String,
    pub history: CommandHistory,
    pub command_count: u64,
    pub game_mode: Option<GameMode>,
    pub busy: bool,
}

impl SessionState {
    pub fn new(profile: &Profile, history_limit: usize) -> Self {
        Self {
            active_profile_id: profile.id.clone(),
            current_directory: profile.home(),
            history: CommandHistory::new(history_limit),
            command_count: 0,
            game_mode: None,
            busy: false,
        }
    }

    /// Profile and directory always move together.
    pub fn switch_profile(&mut self, profile: &Profile) {
        self.active_profile_id = profile.id.clone();
        self.current_directory = profile.home();
    }

    pub fn home(&self) -> String {
        format!("/home/{}", self.active_profile_id)
    }

    pub fn in_game(&self) -> bool {
        self.game_mode.is_some()
    }
}
