use std::time::Instant;

use chrono::Local;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::Rng;

use crate::art;
use crate::command_registry::CommandId;
use crate::command_registry::CommandRegistry;
use crate::config::TerminalConfig;
use crate::error::CommandError;
use crate::games;
use crate::games::GameKind;
use crate::path;
use crate::profile::Profile;
use crate::profile::Roster;
use crate::state::OutputRecord;
use crate::state::SessionState;
use crate::vfs::VirtualFilesystem;

pub(crate) struct CommandContext<'a> {
    pub session: &'a mut SessionState,
    pub fs: &'a VirtualFilesystem,
    pub roster: &'a Roster,
    pub settings: &'a TerminalConfig,
    pub rng: &'a mut StdRng,
    pub started_at: Instant,
}

impl CommandContext<'_> {
    fn profile(&self) -> Result<&Profile, CommandError> {
        self.roster
            .get(&self.session.active_profile_id)
            .ok_or_else(|| CommandError::UnknownProfile(self.session.active_profile_id.clone()))
    }

    /// Resolves a user path, expanding a leading `~` to the active home.
    fn resolve(&self, input: &str) -> String {
        let home = self.session.home();
        let expanded = match input {
            "~" => home,
            _ => match input.strip_prefix("~/") {
                Some(rest) => format!("{home}/{rest}"),
                None => input.to_string(),
            },
        };
        path::resolve(&expanded, &self.session.current_directory)
    }
}

/// Side effects a handler asks the host to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Request {
    ClearScreen,
    ProfileSwitched(String),
    FetchWeather(String),
}

#[derive(Debug, Default)]
pub(crate) struct Outcome {
    pub records: Vec<OutputRecord>,
    pub requests: Vec<Request>,
}

impl Outcome {
    fn output(text: impl Into<String>) -> Self {
        Self {
            records: vec![OutputRecord::output(text)],
            requests: Vec::new(),
        }
    }

    fn empty() -> Self {
        Self::default()
    }
}

type CommandResult = Result<Outcome, CommandError>;

pub(crate) fn run(id: CommandId, args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    match id {
        CommandId::Help => help(),
        CommandId::Clear => Ok(Outcome {
            records: Vec::new(),
            requests: vec![Request::ClearScreen],
        }),
        CommandId::Whoami => whoami(ctx),
        CommandId::Users => Ok(Outcome::output(
            ctx.roster.ids().collect::<Vec<_>>().join("  "),
        )),
        CommandId::Su => su(args, ctx),
        CommandId::Pwd => Ok(Outcome::output(ctx.session.current_directory.clone())),
        CommandId::Ls => ls(args, ctx),
        CommandId::Cd => cd(args, ctx),
        CommandId::Cat => cat(args, ctx),
        CommandId::Open => open(args, ctx),
        CommandId::Skills => skills(ctx),
        CommandId::Projects => projects(ctx),
        CommandId::Contact => contact(ctx),
        CommandId::Weather => weather(args, ctx),
        CommandId::Time => Ok(time()),
        CommandId::Game => game(args, ctx),
        CommandId::Ascii => ascii(args),
        CommandId::Neofetch => neofetch(ctx),
        CommandId::Joke => {
            let joke = art::JOKES[ctx.rng.gen_range(0..art::JOKES.len())];
            Ok(Outcome::output(joke))
        }
        CommandId::Hint => Ok(Outcome::output(
            "Try `ls /.vault`. Hidden things are only hidden from `ls` by habit.",
        )),
        CommandId::History => Ok(history(ctx)),
    }
}

fn help() -> CommandResult {
    Ok(Outcome {
        records: vec![
            OutputRecord::output(CommandRegistry::help_text()),
            OutputRecord::system("Tip: Tab completes command names, Up/Down recalls history."),
        ],
        requests: Vec::new(),
    })
}

fn whoami(ctx: &CommandContext<'_>) -> CommandResult {
    let profile = ctx.profile()?;
    Ok(Outcome::output(format!("{} — {}", profile.name, profile.role)))
}

fn su(args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    let target = args.first().copied().unwrap_or_default();
    if target.is_empty() {
        return Err(CommandError::UnknownProfile("(empty)".to_string()));
    }
    let profile = ctx
        .roster
        .get(target)
        .ok_or_else(|| CommandError::UnknownProfile(target.to_string()))?;
    ctx.session.switch_profile(profile);
    tracing::info!(profile = %profile.id, "switched profile");
    Ok(Outcome {
        records: vec![OutputRecord::system(format!("Switched to {}.", profile.id))],
        requests: vec![Request::ProfileSwitched(profile.id.clone())],
    })
}

fn ls(args: &[&str], ctx: &CommandContext<'_>) -> CommandResult {
    let target = ctx.resolve(args.first().copied().unwrap_or_default());
    let children = ctx.fs.list(&target)?;
    Ok(Outcome::output(children.join("  ")))
}

fn cd(args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    let target = match args.first().copied() {
        None | Some("~") => ctx.session.home(),
        Some(input) => ctx.resolve(input),
    };
    if !ctx.fs.exists(&target) {
        return Err(CommandError::NotFound(target));
    }
    if !ctx.fs.is_dir(&target) {
        return Err(CommandError::NotADirectory(target));
    }
    ctx.session.current_directory = target;
    Ok(Outcome::empty())
}

fn cat(args: &[&str], ctx: &CommandContext<'_>) -> CommandResult {
    let Some(input) = args.first().copied() else {
        return Err(CommandError::MissingOperand { operand: "file" });
    };
    let target = ctx.resolve(input);
    let content = ctx.fs.read(&target)?;
    Ok(Outcome::output(content.trim_end_matches('\n')))
}

fn open(args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    let target = match args.first().map(|arg| arg.to_ascii_lowercase()).as_deref() {
        Some("team") => "/team",
        Some("projects") => "/projects",
        _ => return Err(CommandError::invalid("use `open team` or `open projects`")),
    };
    cd(&[target], ctx)?;
    ls(&[], ctx)
}

fn skills(ctx: &CommandContext<'_>) -> CommandResult {
    let profile = ctx.profile()?;
    if profile.skills.is_empty() {
        return Ok(Outcome::output("No skills listed yet."));
    }
    let width = profile.skills.iter().map(|s| s.chars().count()).max().unwrap_or(0);
    let lines: Vec<String> = profile
        .leveled_skills()
        .into_iter()
        .map(|(skill, level)| match level {
            Some(level) => format!("{skill:<width$}  [{}] {level}%", skill_bar(level)),
            None => format!("• {skill}"),
        })
        .collect();
    Ok(Outcome::output(lines.join("\n")))
}

fn skill_bar(level: u8) -> String {
    let filled = usize::from(level.min(100)) / 10;
    format!("{}{}", "#".repeat(filled), "-".repeat(10 - filled))
}

fn projects(ctx: &CommandContext<'_>) -> CommandResult {
    let profile = ctx.profile()?;
    if profile.projects.is_empty() {
        return Ok(Outcome::output("No projects yet."));
    }
    let blocks: Vec<String> = profile
        .projects
        .iter()
        .map(|project| {
            let mut block = format!("{} ★ {}", project.name, project.stars);
            if !project.description.is_empty() {
                block.push_str(&format!("\n  {}", project.description));
            }
            if !project.tech.is_empty() {
                block.push_str(&format!("\n  [{}]", project.tech.join("] [")));
            }
            block
        })
        .collect();
    Ok(Outcome::output(blocks.join("\n\n")))
}

fn contact(ctx: &CommandContext<'_>) -> CommandResult {
    let profile = ctx.profile()?;
    let mut lines: Vec<String> = profile
        .links
        .iter()
        .map(|link| format!("{}: {}", link.label, link.target))
        .collect();
    if let Some(location) = profile.location() {
        lines.push(format!("Location: {location}"));
    }
    if lines.is_empty() {
        return Ok(Outcome::output("No contact details yet."));
    }
    Ok(Outcome::output(lines.join("\n")))
}

fn weather(args: &[&str], ctx: &CommandContext<'_>) -> CommandResult {
    if ctx.session.busy {
        return Err(CommandError::Busy("a lookup"));
    }
    let typed = args.join(" ");
    let city = if typed.trim().is_empty() {
        ctx.profile()?
            .city
            .clone()
            .ok_or(CommandError::MissingOperand { operand: "city" })?
    } else {
        typed.trim().to_string()
    };
    Ok(Outcome {
        records: vec![OutputRecord::system(format!("Fetching weather for {city}…"))],
        requests: vec![Request::FetchWeather(city)],
    })
}

fn time() -> Outcome {
    let local = Local::now();
    let utc = Utc::now();
    Outcome::output(format!(
        "Local: {}\nUTC:   {}",
        local.format("%Y-%m-%d %H:%M:%S %:z"),
        utc.format("%Y-%m-%d %H:%M:%S")
    ))
}

fn game(args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    let Some(kind) = args.first().and_then(|name| GameKind::parse(name)) else {
        let names: Vec<&str> = GameKind::ALL.iter().map(|kind| kind.as_str()).collect();
        return Ok(Outcome::output(format!(
            "Available games: {}\nUsage: game <name>",
            names.join(", ")
        )));
    };
    let (mode, records) = games::start(kind, &mut *ctx.rng);
    ctx.session.game_mode = Some(mode);
    tracing::debug!(game = kind.as_str(), "game started");
    Ok(Outcome {
        records,
        requests: Vec::new(),
    })
}

fn ascii(args: &[&str]) -> CommandResult {
    let name = args.first().copied().unwrap_or("logo");
    match art::named(name) {
        Some(banner) => Ok(Outcome::output(banner)),
        None => Err(CommandError::invalid(format!(
            "unknown art '{name}' (try {})",
            art::ART_NAMES.join(", ")
        ))),
    }
}

fn neofetch(ctx: &CommandContext<'_>) -> CommandResult {
    let profile = ctx.profile()?;
    let uptime = ctx.started_at.elapsed().as_secs();
    let info = [
        format!("{}@{}", profile.id, ctx.settings.hostname),
        "-".repeat(profile.id.len() + ctx.settings.hostname.len() + 1),
        format!("user:     {}", profile.id),
        format!("profile:  {} ({})", profile.name, profile.role),
        format!("cwd:      {}", ctx.session.current_directory),
        format!("uptime:   {}m {}s", uptime / 60, uptime % 60),
        format!("shell:    termfolio {}", env!("CARGO_PKG_VERSION")),
        format!("commands: {}", ctx.session.command_count),
    ];
    let art_lines: Vec<&str> = art::TUX.lines().collect();
    let art_width = art_lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let rows = art_lines.len().max(info.len());
    let mut out = Vec::with_capacity(rows);
    for row in 0..rows {
        let left = art_lines.get(row).copied().unwrap_or("");
        let right = info.get(row).map(String::as_str).unwrap_or("");
        let pad = art_width - left.chars().count();
        out.push(format!("{left}{}   {right}", " ".repeat(pad)).trim_end().to_string());
    }
    Ok(Outcome::output(out.join("\n")))
}

fn history(ctx: &CommandContext<'_>) -> Outcome {
    let lines: Vec<String> = ctx
        .session
        .history
        .iter()
        .enumerate()
        .map(|(idx, line)| format!("{:>4}  {line}", idx + 1))
        .collect();
    Outcome::output(lines.join("\n"))
}
