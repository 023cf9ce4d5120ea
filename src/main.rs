use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use keycadence::{
    app::{App, AppState},
    app_dirs::AppDirs,
    catalog::{Difficulty, Language, Mode, PracticeText, TextCatalog},
    challenge::Challenge,
    config::{ConfigStore, FileConfigStore, Preferences},
    custom_pack::CustomPackLibrary,
    runtime::{AppEvent, CrosstermEventSource, EventSource, Runner, TICK_INTERVAL},
    store::{SessionConfig, SessionStore, TimerDuration},
    word_packs::{PackCategory, PackFilter, WordPacks},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    path::PathBuf,
    time::Instant,
};

/// typing practice in the terminal with live metrics, word packs and daily challenges
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Typing practice in the terminal: catalog texts by language, mode and difficulty, curated word packs, a daily challenge, and live WPM, accuracy and consistency."
)]
pub struct Cli {
    /// kind of text to practice
    #[clap(short = 'm', long, value_enum)]
    mode: Option<Mode>,

    /// text difficulty
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// language to pull texts from
    #[clap(short = 'l', long, value_enum)]
    language: Option<Language>,

    /// session length in seconds
    #[clap(short = 't', long, value_enum)]
    time: Option<TimerDuration>,

    /// custom prompt to use
    #[clap(short = 'p', long, conflicts_with_all = ["pack", "custom_pack", "challenge"])]
    prompt: Option<String>,

    /// practice a built-in word pack by id
    #[clap(long, conflicts_with_all = ["custom_pack", "challenge"])]
    pack: Option<String>,

    /// practice an exported custom word pack (json file)
    #[clap(long, conflicts_with = "challenge")]
    custom_pack: Option<PathBuf>,

    /// list built-in word packs, optionally of one category, and exit
    #[clap(long, value_enum, num_args = 0..=1)]
    list_packs: Option<Option<PackCategory>>,

    /// take today's challenge
    #[clap(long)]
    challenge: bool,

    /// store the given mode, difficulty, language and time as defaults
    #[clap(long)]
    save_defaults: bool,
}

impl Cli {
    /// Stored preferences with any flags applied on top
    fn session_config(&self, stored: SessionConfig) -> SessionConfig {
        SessionConfig {
            mode: self.mode.unwrap_or(stored.mode),
            difficulty: self.difficulty.unwrap_or(stored.difficulty),
            language: self.language.unwrap_or(stored.language),
            duration: self.time.unwrap_or(stored.duration),
            voice_mode: stored.voice_mode,
        }
    }

    /// Reference text fixed by the command line, if any
    fn fixed_text(&self, config: &SessionConfig) -> Result<Option<PracticeText>, Box<dyn Error>> {
        if let Some(prompt) = &self.prompt {
            return Ok(Some(PracticeText::new(
                prompt.clone(),
                config.language,
                config.mode,
                config.difficulty,
            )));
        }
        if let Some(id) = &self.pack {
            let packs = WordPacks::embedded()?;
            let Some(pack) = packs.find(id) else {
                let mut cmd = Cli::command();
                cmd.error(ErrorKind::InvalidValue, format!("unknown word pack '{id}'"))
                    .exit();
            };
            return Ok(Some(pack.practice_text()));
        }
        if let Some(path) = &self.custom_pack {
            let mut library = CustomPackLibrary::new();
            let pack = library.import_file(path)?;
            return Ok(Some(pack.practice_text()));
        }
        Ok(None)
    }
}

fn list_packs(filter: PackFilter) -> Result<(), Box<dyn Error>> {
    let packs = WordPacks::embedded()?;
    for pack in packs.filter(filter) {
        println!(
            "{:<18} {:<10} {:<8} {:>5} words  {}",
            pack.id, pack.category, pack.difficulty, pack.word_count, pack.description
        );
    }
    Ok(())
}

/// Log to a file so the alternate screen stays clean. RUST_LOG overrides the
/// default `warn` filter.
fn init_logging() {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    let file = AppDirs::log_path().and_then(|path| {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).ok()?;
        }
        OpenOptions::new().create(true).append(true).open(path).ok()
    });
    match file {
        Some(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }

    // a second init only happens in tests
    let _ = builder.try_init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging();

    if let Some(category) = cli.list_packs {
        return list_packs(category.into());
    }

    let config_store = FileConfigStore::new();
    let config = cli.session_config(config_store.load().session);
    if cli.save_defaults {
        config_store.save(&Preferences::from(&config))?;
        log::info!("saved defaults to {}", config_store.path().display());
        println!("saved defaults to {}", config_store.path().display());
    }

    let mut store = SessionStore::new(config);
    if let Some(text) = cli.fixed_text(&config)? {
        store.set_current_text(text);
    }

    let mut app = App::new(store, TextCatalog::embedded()?);
    if cli.challenge {
        app = app.with_challenge(Challenge::today()?);
    }
    if let Err(e) = app.prepare() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::InvalidValue, format!("cannot start session: {e}"))
            .exit();
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(CrosstermEventSource::new(), TICK_INTERVAL);
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitType {
    Restart,
    New,
    Quit,
}

fn start_tui<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui(app, f))?;

        let exit_type = loop {
            match runner.step() {
                AppEvent::Tick => {
                    if app.controller.is_running() {
                        app.on_tick(Instant::now());
                        terminal.draw(|f| ui(app, f))?;
                    }
                }
                AppEvent::Resize => {
                    terminal.draw(|f| ui(app, f))?;
                }
                AppEvent::Key(key) => {
                    if let Some(exit) = on_key(app, key.code, key.modifiers)? {
                        break exit;
                    }
                    terminal.draw(|f| ui(app, f))?;
                }
            }
        };

        match exit_type {
            ExitType::Restart => app.restart(),
            ExitType::New => app.new_text()?,
            ExitType::Quit => break,
        }
    }

    Ok(())
}

fn on_key(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
) -> Result<Option<ExitType>, Box<dyn Error>> {
    let exit = match code {
        KeyCode::Esc => Some(ExitType::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(ExitType::Quit),
        KeyCode::Left => Some(ExitType::Restart),
        KeyCode::Right => Some(ExitType::New),
        KeyCode::Backspace => {
            app.on_backspace();
            None
        }
        KeyCode::Char(c) => match app.state {
            AppState::Typing => {
                app.on_char(c)?;
                None
            }
            AppState::Results => match c {
                'r' => Some(ExitType::Restart),
                'n' => Some(ExitType::New),
                _ => None,
            },
        },
        _ => None,
    };
    Ok(exit)
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
