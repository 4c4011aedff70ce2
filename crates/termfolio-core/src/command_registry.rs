#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    Help,
    Clear,
    Whoami,
    Users,
    Su,
    Pwd,
    Ls,
    Cd,
    Cat,
    Open,
    Skills,
    Projects,
    Contact,
    Weather,
    Time,
    Game,
    Ascii,
    Neofetch,
    Joke,
    Hint,
    History,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub id: CommandId,
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub usage: &'static str,
    pub summary: &'static str,
}

impl CommandSpec {
    fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.aliases.contains(&name)
    }
}

const COMMAND_SPECS: [CommandSpec; 21] = [
    CommandSpec {
        id: CommandId::Help,
        name: "help",
        aliases: &[],
        usage: "help",
        summary: "Show this help",
    },
    CommandSpec {
        id: CommandId::Clear,
        name: "clear",
        aliases: &[],
        usage: "clear",
        summary: "Clear screen",
    },
    CommandSpec {
        id: CommandId::Whoami,
        name: "whoami",
        aliases: &["about"],
        usage: "whoami",
        summary: "Current profile",
    },
    CommandSpec {
        id: CommandId::Users,
        name: "users",
        aliases: &[],
        usage: "users",
        summary: "List user profiles",
    },
    CommandSpec {
        id: CommandId::Su,
        name: "su",
        aliases: &[],
        usage: "su <user>",
        summary: "Switch profile",
    },
    CommandSpec {
        id: CommandId::Pwd,
        name: "pwd",
        aliases: &[],
        usage: "pwd",
        summary: "Print working directory",
    },
    CommandSpec {
        id: CommandId::Ls,
        name: "ls",
        aliases: &[],
        usage: "ls [path]",
        summary: "List directory",
    },
    CommandSpec {
        id: CommandId::Cd,
        name: "cd",
        aliases: &[],
        usage: "cd <path>",
        summary: "Change directory",
    },
    CommandSpec {
        id: CommandId::Cat,
        name: "cat",
        aliases: &[],
        usage: "cat <file>",
        summary: "Read file",
    },
    CommandSpec {
        id: CommandId::Open,
        name: "open",
        aliases: &[],
        usage: "open team|projects",
        summary: "Quick open",
    },
    CommandSpec {
        id: CommandId::Skills,
        name: "skills",
        aliases: &[],
        usage: "skills",
        summary: "Tech skills",
    },
    CommandSpec {
        id: CommandId::Projects,
        name: "projects",
        aliases: &[],
        usage: "projects",
        summary: "Show projects",
    },
    CommandSpec {
        id: CommandId::Contact,
        name: "contact",
        aliases: &["links"],
        usage: "contact",
        summary: "Contact links",
    },
    CommandSpec {
        id: CommandId::Weather,
        name: "weather",
        aliases: &[],
        usage: "weather [city]",
        summary: "Live weather (Open-Meteo)",
    },
    CommandSpec {
        id: CommandId::Time,
        name: "time",
        aliases: &[],
        usage: "time",
        summary: "Current time",
    },
    CommandSpec {
        id: CommandId::Game,
        name: "game",
        aliases: &[],
        usage: "game guess|rps",
        summary: "Play games",
    },
    CommandSpec {
        id: CommandId::Ascii,
        name: "ascii",
        aliases: &[],
        usage: "ascii [logo|tux]",
        summary: "ASCII art",
    },
    CommandSpec {
        id: CommandId::Neofetch,
        name: "neofetch",
        aliases: &[],
        usage: "neofetch",
        summary: "System card",
    },
    CommandSpec {
        id: CommandId::Joke,
        name: "joke",
        aliases: &[],
        usage: "joke",
        summary: "Random joke",
    },
    CommandSpec {
        id: CommandId::Hint,
        name: "hint",
        aliases: &[],
        usage: "hint",
        summary: "A tasteful secret",
    },
    CommandSpec {
        id: CommandId::History,
        name: "history",
        aliases: &[],
        usage: "history",
        summary: "Previously entered lines",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    None,
    Single(&'static str),
    Many(Vec<&'static str>),
}

pub struct CommandRegistry;

impl CommandRegistry {
    pub fn list() -> &'static [CommandSpec] {
        &COMMAND_SPECS
    }

    pub fn get(id: CommandId) -> &'static CommandSpec {
        match COMMAND_SPECS.iter().find(|spec| spec.id == id) {
            Some(spec) => spec,
            None => unreachable!("every command id has a spec"),
        }
    }

    /// Case-insensitive lookup by name or alias.
    pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
        let name = name.to_ascii_lowercase();
        COMMAND_SPECS.iter().find(|spec| spec.answers_to(&name))
    }

    /// Every invocable name, aliases included, sorted.
    pub fn names() -> Vec<&'static str> {
        let mut names: Vec<&'static str> = COMMAND_SPECS
            .iter()
            .flat_map(|spec| std::iter::once(spec.name).chain(spec.aliases.iter().copied()))
            .collect();
        names.sort_unstable();
        names
    }

    pub fn complete(prefix: &str) -> Completion {
        let prefix = prefix.trim().to_ascii_lowercase();
        let mut matches: Vec<&'static str> = Self::names()
            .into_iter()
            .filter(|name| name.starts_with(prefix.as_str()))
            .collect();
        match matches.len() {
            0 => Completion::None,
            1 => Completion::Single(matches.remove(0)),
            _ => Completion::Many(matches),
        }
    }

    /// The `help` table: one aligned line per command.
    pub fn help_text() -> String {
        let width = COMMAND_SPECS
            .iter()
            .map(|spec| spec.usage.len())
            .max()
            .unwrap_or(0);
        COMMAND_SPECS
            .iter()
            .map(|spec| format!("{:<width$}  {}", spec.usage, spec.summary))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn lookup_folds_case_and_follows_aliases() {
        assert_eq!(CommandRegistry::lookup("LS").map(|s| s.id), Some(CommandId::Ls));
        assert_eq!(
            CommandRegistry::lookup("about").map(|s| s.id),
            Some(CommandId::Whoami)
        );
        assert_eq!(CommandRegistry::lookup("rm"), None);
    }

    #[test]
    fn every_id_resolves_to_its_own_spec() {
        for spec in CommandRegistry::list() {
            assert_eq!(CommandRegistry::get(spec.id), spec);
        }
    }

    #[test]
    fn names_are_unique() {
        let names = CommandRegistry::names();
        let mut deduped = names.clone();
        deduped.dedup();
        assert_eq!(names, deduped);
    }

    #[test]
    fn completion_distinguishes_single_and_many() {
        assert_eq!(CommandRegistry::complete("neo"), Completion::Single("neofetch"));
        assert_eq!(CommandRegistry::complete("WE"), Completion::Single("weather"));
        assert_eq!(
            CommandRegistry::complete("c"),
            Completion::Many(vec!["cat", "cd", "clear", "contact"])
        );
        assert_eq!(CommandRegistry::complete("zz"), Completion::None);
    }

    #[test]
    fn help_lists_every_command_once() {
        let help = CommandRegistry::help_text();
        assert_eq!(help.lines().count(), CommandRegistry::list().len());
        assert!(help.lines().next().is_some_and(|line| line.starts_with("help ")));
    }
}
