use std::collections::VecDeque;
use std::io;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Terminal;

use termfolio_core::command_registry::Completion;
use termfolio_core::games::GameMode;
use termfolio_core::interpreter::{Interpreter, TerminalEffect, WeatherTicket};
use termfolio_core::persistence::StateStore;
use termfolio_core::state::{OutputKind, OutputRecord};
use termfolio_core::weather::{Conditions, WeatherClient, WeatherError};

const SCROLL_PAGE: usize = 10;
/// Oldest records fall off the screen buffer past this many.
const SCREEN_LIMIT: usize = 2_000;

struct TuiGuard;

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
    }
}

pub fn run<C>(
    interpreter: Interpreter,
    client: C,
    store: Option<StateStore>,
) -> Result<(), Box<dyn std::error::Error>>
where
    C: WeatherClient + 'static,
{
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TuiGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(interpreter, store);
    run_app(&mut terminal, &mut app, Arc::new(client)).map_err(|e| e.into())
}

enum UiEvent {
    WeatherDone {
        ticket: WeatherTicket,
        result: Result<Conditions, WeatherError>,
    },
}

struct App {
    interpreter: Interpreter,
    store: Option<StateStore>,
    screen: VecDeque<OutputRecord>,
    input: String,
    /// Lines scrolled back from the bottom of the output pane.
    scroll_back: usize,
    started: Instant,
}

impl App {
    fn new(interpreter: Interpreter, store: Option<StateStore>) -> Self {
        let banner = interpreter.banner();
        let mut app = Self {
            interpreter,
            store,
            screen: VecDeque::new(),
            input: String::new(),
            scroll_back: 0,
            started: Instant::now(),
        };
        app.push_records(banner);
        app
    }

    fn push_records(&mut self, records: impl IntoIterator<Item = OutputRecord>) {
        for record in records {
            if self.screen.len() == SCREEN_LIMIT {
                self.screen.pop_front();
            }
            self.screen.push_back(record);
        }
        self.scroll_back = 0;
    }

    fn save_profile(&self, profile_id: &str) {
        if let Some(store) = &self.store {
            store.save_active_profile(profile_id);
        }
    }

    /// Ctrl-P: move to the next profile in roster order, wrapping around.
    fn cycle_profile(&mut self) {
        let ids: Vec<String> = self
            .interpreter
            .roster()
            .ids()
            .map(str::to_string)
            .collect();
        let active = &self.interpreter.session().active_profile_id;
        let next = ids
            .iter()
            .position(|id| id == active)
            .map_or(0, |idx| (idx + 1) % ids.len());
        let Some(next_id) = ids.get(next) else {
            return;
        };
        match self.interpreter.switch_profile(next_id) {
            Ok(banner) => {
                self.screen.clear();
                self.push_records(banner);
                self.save_profile(next_id);
            }
            Err(err) => self.push_records([OutputRecord::error(err.to_string())]),
        }
    }

    /// Ctrl-R: fresh session on the default profile.
    fn reset_session(&mut self) {
        self.interpreter.reset();
        self.input.clear();
        self.screen.clear();
        let banner = self.interpreter.banner();
        self.push_records(banner);
        let profile_id = self.interpreter.session().active_profile_id.clone();
        self.save_profile(&profile_id);
    }

    /// Runs the typed line and returns the lookups the caller must start.
    fn submit(&mut self) -> Vec<(WeatherTicket, String)> {
        let line = std::mem::take(&mut self.input);
        let turn = self.interpreter.execute(&line);
        self.push_records(turn.records);

        let mut lookups = Vec::new();
        for effect in turn.effects {
            match effect {
                TerminalEffect::ClearScreen => self.screen.clear(),
                TerminalEffect::ProfileSwitched { profile_id } => self.save_profile(&profile_id),
                TerminalEffect::FetchWeather { ticket, city } => lookups.push((ticket, city)),
            }
        }
        lookups
    }

    fn complete_input(&mut self) {
        match self.interpreter.complete(&self.input) {
            Completion::None => {}
            Completion::Single(name) => self.input = format!("{name} "),
            Completion::Many(names) => {
                self.push_records([OutputRecord::system(names.join("  "))]);
            }
        }
    }

    fn status_line(&self) -> String {
        let session = self.interpreter.session();
        let mut status = format!(
            " user: {} │ dir: {} │ cmds: {}",
            session.active_profile_id, session.current_directory, session.command_count
        );
        match session.game_mode {
            Some(GameMode::GuessNumber { attempts, .. }) => {
                status.push_str(&format!(" │ game: guess ({attempts} tries)"));
            }
            Some(GameMode::RockPaperScissors) => status.push_str(" │ game: rps"),
            None => {}
        }
        if self.interpreter.is_busy() {
            status.push_str(&format!(" │ {} fetching weather", self.spinner()));
        }
        status
    }

    fn spinner(&self) -> &'static str {
        let frames = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
        let idx = (self.started.elapsed().as_millis() / 100) as usize % frames.len();
        frames[idx]
    }
}

enum KeyHandlerResult {
    Continue(Vec<(WeatherTicket, String)>),
    Exit,
}

fn handle_key_event(key: KeyEvent, app: &mut App) -> KeyHandlerResult {
    if key.kind != KeyEventKind::Press {
        return KeyHandlerResult::Continue(Vec::new());
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => return KeyHandlerResult::Exit,
        KeyCode::Char('c') if ctrl => return KeyHandlerResult::Exit,
        KeyCode::Char('l') if ctrl => {
            app.screen.clear();
            app.scroll_back = 0;
        }
        KeyCode::Char('p') if ctrl => app.cycle_profile(),
        KeyCode::Char('r') if ctrl => app.reset_session(),
        KeyCode::Enter => return KeyHandlerResult::Continue(app.submit()),
        KeyCode::Up => {
            if let Some(line) = app.interpreter.history_prev() {
                app.input = line;
            }
        }
        KeyCode::Down => {
            if let Some(line) = app.interpreter.history_next() {
                app.input = line;
            }
        }
        KeyCode::Tab => app.complete_input(),
        KeyCode::PageUp => app.scroll_back = app.scroll_back.saturating_add(SCROLL_PAGE),
        KeyCode::PageDown => app.scroll_back = app.scroll_back.saturating_sub(SCROLL_PAGE),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) if !ctrl => app.input.push(c),
        _ => {}
    }
    KeyHandlerResult::Continue(Vec::new())
}

fn spawn_lookup<C>(client: &Arc<C>, tx: &mpsc::Sender<UiEvent>, ticket: WeatherTicket, city: String)
where
    C: WeatherClient + 'static,
{
    let client = Arc::clone(client);
    let tx = tx.clone();
    std::thread::spawn(move || {
        let result = client.fetch_current_conditions(&city);
        let _ = tx.send(UiEvent::WeatherDone { ticket, result });
    });
}

fn run_app<B, C>(terminal: &mut Terminal<B>, app: &mut App, client: Arc<C>) -> io::Result<()>
where
    B: Backend,
    C: WeatherClient + 'static,
{
    let (tx, rx) = mpsc::channel();

    loop {
        while let Ok(event) = rx.try_recv() {
            match event {
                UiEvent::WeatherDone { ticket, result } => {
                    let records = app.interpreter.complete_weather(ticket, result);
                    app.push_records(records);
                }
            }
        }

        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                match handle_key_event(key, app) {
                    KeyHandlerResult::Continue(lookups) => {
                        for (ticket, city) in lookups {
                            spawn_lookup(&client, &tx, ticket, city);
                        }
                    }
                    KeyHandlerResult::Exit => return Ok(()),
                }
            }
        }
    }
}

fn kind_style(kind: OutputKind) -> Style {
    match kind {
        OutputKind::Input => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        OutputKind::Output => Style::default().fg(Color::Gray),
        OutputKind::System => Style::default().fg(Color::Yellow),
        OutputKind::Error => Style::default().fg(Color::Red),
    }
}

fn screen_lines<'a>(records: impl IntoIterator<Item = &'a OutputRecord>) -> Vec<Line<'static>> {
    records
        .into_iter()
        .flat_map(|record| {
            let style = kind_style(record.kind);
            record
                .text
                .split('\n')
                .map(move |text| Line::from(Span::styled(text.to_string(), style)))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Top row to show so the pane ends `scroll_back` lines above the bottom.
fn first_visible_row(total: usize, height: usize, scroll_back: usize) -> usize {
    let bottom = total.saturating_sub(height);
    bottom.saturating_sub(scroll_back)
}

/// Column just past the typed input, inside a bordered box starting at `left`.
fn cursor_column(left: u16, prompt: &str, input: &str) -> u16 {
    let typed = prompt.chars().count() + 1 + input.chars().count();
    left.saturating_add(1)
        .saturating_add(u16::try_from(typed).unwrap_or(u16::MAX))
}

fn ui(f: &mut ratatui::Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(f.area());

    let lines = screen_lines(&app.screen);
    let height = usize::from(chunks[0].height.saturating_sub(2));
    let top = first_visible_row(lines.len(), height, app.scroll_back);
    let title = if app.scroll_back > 0 {
        format!(" termfolio (scrolled {}) ", app.scroll_back)
    } else {
        " termfolio ".to_string()
    };
    let output = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(title),
        )
        .scroll((u16::try_from(top).unwrap_or(u16::MAX), 0));
    f.render_widget(output, chunks[0]);

    let status = Paragraph::new(app.status_line())
        .style(Style::default().fg(Color::Black).bg(Color::DarkGray));
    f.render_widget(status, chunks[1]);

    let prompt = app.interpreter.prompt();
    let input = Paragraph::new(Line::from(vec![
        Span::styled(format!("{prompt} "), Style::default().fg(Color::Green)),
        Span::raw(app.input.as_str()),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(input, chunks[2]);

    let cursor_x = cursor_column(chunks[2].x, &prompt, &app.input);
    f.set_cursor_position((
        cursor_x.min(chunks[2].right().saturating_sub(2)),
        chunks[2].y + 1,
    ));
}
