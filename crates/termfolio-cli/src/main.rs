mod logging;
mod settings;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use termfolio_core::interpreter::Interpreter;
use termfolio_core::interpreter::TerminalEffect;
use termfolio_core::persistence::StateStore;
use termfolio_core::state::OutputKind;
use termfolio_core::state::OutputRecord;
use termfolio_exec::open_meteo::OpenMeteoClient;
use tracing::info;

#[derive(Parser)]
#[command(name = "termfolio", version)]
#[command(about = "Browse the team portfolio through a pretend shell", long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/termfolio/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Start as this profile instead of the remembered one
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Where state.json and the log file live
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive full-screen terminal (default)
    Shell,
    /// Execute each line in order and print the output
    Run {
        #[arg(required = true)]
        lines: Vec<String>,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let data_dir = cli.data_dir.unwrap_or_else(settings::default_data_dir);
    logging::init(&data_dir);

    let config_path = cli.config.or_else(settings::default_config_path);
    let config = settings::load_config(config_path.as_deref());
    let roster = settings::load_roster(&config)?;

    let store = match StateStore::open(&data_dir) {
        Ok(store) => Some(store),
        Err(err) => {
            tracing::warn!(dir = %data_dir.display(), error = %err, "state store unavailable");
            None
        }
    };
    let initial = cli.profile.or_else(|| {
        store
            .as_ref()
            .map(|store| store.load_active_profile(&roster))
    });

    let interpreter = Interpreter::new(roster, config.terminal.clone(), initial.as_deref());
    info!(profile = %interpreter.session().active_profile_id, "session started");
    let client = OpenMeteoClient::new(&config.weather)?;

    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => ui::run(interpreter, client, store),
        Command::Run { lines } => {
            run_lines(interpreter, &client, store.as_ref(), &lines);
            Ok(())
        }
    }
}

fn run_lines(
    mut interpreter: Interpreter,
    client: &OpenMeteoClient,
    store: Option<&StateStore>,
    lines: &[String],
) {
    for line in lines {
        let turn = interpreter.execute_blocking(line, client);
        for record in &turn.records {
            print_record(record);
        }
        for effect in turn.effects {
            if let TerminalEffect::ProfileSwitched { profile_id } = effect {
                if let Some(store) = store {
                    store.save_active_profile(&profile_id);
                }
            }
        }
    }
}

fn print_record(record: &OutputRecord) {
    match record.kind {
        OutputKind::Error => eprintln!("{}", record.text),
        _ => println!("{}", record.text),
    }
}
