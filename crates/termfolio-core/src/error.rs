//! Error taxonomy shared by the filesystem, the roster and every command.

use thiserror::Error;

use crate::weather::WeatherError;

/// Failures of a read against the virtual filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    #[error("{0}: No such file or directory")]
    NotFound(String),
    #[error("{0}: Not a directory")]
    NotADirectory(String),
    #[error("{0}: Is a directory")]
    IsADirectory(String),
}

/// Problems with a roster document, found once at load time.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("roster is empty")]
    Empty,
    #[error("invalid profile id '{0}'")]
    InvalidId(String),
    #[error("duplicate profile id '{0}'")]
    DuplicateId(String),
    #[error("profile '{id}' has {levels} skill levels for {skills} skills")]
    SkillLevelMismatch {
        id: String,
        skills: usize,
        levels: usize,
    },
    #[error("could not parse roster: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("bad profile id pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Every way a command can fail. The interpreter renders these as a single
/// error line prefixed with the command name; none of them escape a turn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("{0}: No such file or directory")]
    NotFound(String),
    #[error("{0}: Not a directory")]
    NotADirectory(String),
    #[error("{0}: Is a directory")]
    IsADirectory(String),
    #[error("missing {operand} operand")]
    MissingOperand { operand: &'static str },
    #[error("{0}")]
    InvalidInput(String),
    #[error("unknown user: {0}")]
    UnknownProfile(String),
    #[error("command not found (try `help`)")]
    UnknownCommand,
    #[error("{0} is already in progress")]
    Busy(&'static str),
    #[error(transparent)]
    Weather(#[from] WeatherError),
}

impl CommandError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

impl From<FsError> for CommandError {
    fn from(err: FsError) -> Self {
        match err {
            FsError::NotFound(path) => Self::NotFound(path),
            FsError::NotADirectory(path) => Self::NotADirectory(path),
            FsError::IsADirectory(path) => Self::IsADirectory(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn fs_errors_keep_their_kind_across_conversion() {
        let err: CommandError = FsError::IsADirectory("/team".to_string()).into();
        assert_eq!(err, CommandError::IsADirectory("/team".to_string()));
        assert_eq!(err.to_string(), "/team: Is a directory");
    }

    #[test]
    fn missing_operand_reads_like_coreutils() {
        let err = CommandError::MissingOperand { operand: "file" };
        assert_eq!(err.to_string(), "missing file operand");
    }
}
