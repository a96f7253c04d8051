use clap::Parser;
use color_eyre::Result;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use std::io::stdout;
use std::path::PathBuf;
use std::sync::Arc;

mod app;
mod autocomplete;
mod config;
mod error;
mod form;
mod geocode;
#[cfg(test)]
mod test_utils;
mod users;
mod widgets;

use app::App;
use form::{ADDRESS_FIELD, NAME_FIELD};
use geocode::GeocodeClient;
use users::KnownUsers;

const LOG_FILE_NAME: &str = "placeform.log";

/// Terminal form for registering a place with geocoded address and member emails
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Register a place: geocoded address autocomplete and member email suggestions"
)]
struct Args {
    /// JSON array of known user emails offered as suggestions
    #[arg(long, value_name = "PATH")]
    users: Option<PathBuf>,

    /// Prefill the place name
    #[arg(long)]
    name: Option<String>,

    /// Prefill the address and start searching for it
    #[arg(long)]
    address: Option<String>,

    /// Number of member email fields
    #[arg(long, default_value_t = 1)]
    emails: usize,
}

fn main() -> Result<()> {
    init_logging();

    color_eyre::install()?;

    // Load config early to avoid defaults during app initialization
    let config_result = config::load_config();

    let args = Args::parse();

    // Bad user data fails here, before the terminal is taken over
    let known_users = match &args.users {
        Some(path) => KnownUsers::load(path)?,
        None => KnownUsers::default(),
    };

    let mut app = App::new(&config_result.config, Arc::new(known_users), args.emails);
    app.status = config_result.warning;

    let terminal = init_terminal()?;

    setup_geocode_worker(&mut app, &config_result.config);
    if let Some(name) = &args.name {
        app.prefill(NAME_FIELD, name);
    }
    if let Some(address) = &args.address {
        app.prefill(ADDRESS_FIELD, address);
    }

    let result = run(terminal, app);

    restore_terminal()?;
    let app = result?;

    // Output after terminal restore to prevent corruption
    if let Some(submission) = app.submission() {
        println!("{}", submission.to_json().map_err(error::PlaceformError::from)?);
    }

    log::debug!("=== PLACEFORM SESSION ENDED ===");

    Ok(())
}

/// Log to `<temp dir>/placeform.log`; DEBUG in debug builds, WARN otherwise.
/// `RUST_LOG` overrides the level.
fn init_logging() {
    use std::io::Write;

    let log_path = std::env::temp_dir().join(LOG_FILE_NAME);
    let log_file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        // Logging is best effort; stderr belongs to the terminal UI
        Err(_) => return,
    };

    let default_level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_env("RUST_LOG")
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .format(|buf, record| {
            use std::time::SystemTime;
            let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
            writeln!(
                buf,
                "[{}] [{}] {}",
                datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();

    log::debug!("=== PLACEFORM SESSION STARTED ===");
}

/// Initialize terminal with raw mode, alternate screen, and bracketed paste
fn init_terminal() -> Result<DefaultTerminal> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        let _ = disable_raw_mode();
        hook(info);
    }));

    enable_raw_mode()?;

    // If any subsequent operations fail, ensure raw mode is disabled
    match execute!(stdout(), EnterAlternateScreen, EnableBracketedPaste) {
        Ok(_) => {}
        Err(e) => {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
    }

    match ratatui::Terminal::new(ratatui::backend::CrosstermBackend::new(stdout())) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
            let _ = disable_raw_mode();
            Err(e.into())
        }
    }
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<()> {
    let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
    disable_raw_mode()?;
    Ok(())
}

fn run(mut terminal: DefaultTerminal, mut app: App) -> Result<App> {
    loop {
        if app.should_render() {
            terminal.draw(|frame| app.render(frame))?;
            app.clear_dirty();
        }

        app.handle_events()?;

        if app.should_quit() {
            break;
        }
    }

    Ok(app)
}

/// Set up the geocoder worker thread and channels
fn setup_geocode_worker(app: &mut App, config: &config::Config) {
    let (request_tx, request_rx) = std::sync::mpsc::channel();
    let (response_tx, response_rx) = std::sync::mpsc::channel();
    app.address.set_channels(request_tx, response_rx);

    geocode::worker::spawn_worker(
        GeocodeClient::from_config(&config.geocoder),
        request_rx,
        response_tx,
    );
}
