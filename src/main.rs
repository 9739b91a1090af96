mod app;
mod ui;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use app::App;
use mystery_exe::rooms::load_catalog_dir;
use mystery_exe::status::{sitemap, HealthReport};
use mystery_exe::{logging, Config, NavigationTracker, RoomCatalog, RoomNavigator};
use ui::draw_ui;

#[derive(Parser, Debug)]
#[command(name = "mystery-exe", version, about = "A passcode escape room for the terminal")]
struct Cli {
    /// Config file (defaults to ./mystery.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory of level_*.toml files to use instead of the built-in rooms
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Directory holding <code>.jpg clue images
    #[arg(long, global = true)]
    clues: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the terminal UI
    Play {
        /// Go straight to the room for this passcode
        #[arg(long)]
        passcode: Option<String>,
    },
    /// Validate a passcode and print the room it opens
    Check { passcode: String },
    /// Print the health report as JSON
    Health,
    /// Print the sitemap as JSON
    Sitemap,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::discover(cli.config.as_deref())?;
    if let Some(dir) = &cli.catalog {
        config.catalog_dir = Some(dir.clone());
    }
    if let Some(dir) = &cli.clues {
        config.clue_dir = dir.clone();
    }
    Ok(config)
}

fn load_catalog(config: &Config) -> Result<RoomCatalog> {
    let catalog = match &config.catalog_dir {
        Some(dir) => load_catalog_dir(dir)?,
        None => RoomCatalog::builtin().context("built-in room catalog is invalid")?,
    };
    Ok(catalog)
}

fn main() -> Result<ExitCode> {
    let started = Instant::now();
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let command = cli.command.unwrap_or(Command::Play { passcode: None });

    match &command {
        Command::Play { .. } => logging::init_file(&config.log_file)?,
        _ => logging::init_stderr()?,
    }

    let catalog = load_catalog(&config)?;
    info!(rooms = catalog.len(), environment = %config.environment, "catalog ready");

    match command {
        Command::Play { passcode } => {
            play(&catalog, &config, passcode.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { passcode } => Ok(check(&catalog, &passcode)),
        Command::Health => {
            let report = HealthReport::new(&catalog, &config.environment, started.elapsed());
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Sitemap => {
            let entries = sitemap(&catalog, &config.base_url);
            println!("{}", serde_json::to_string_pretty(&entries)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn check(catalog: &RoomCatalog, passcode: &str) -> ExitCode {
    let navigator = RoomNavigator::new(catalog);
    let mut tracker = NavigationTracker::new();

    match navigator.enter(passcode, &mut tracker) {
        Ok(view) => {
            let room = view.room;
            println!("ACCESS GRANTED: {} ({})", room.name, room.code);
            println!("  {}", view.breadcrumbs().join(" > "));
            println!("  {} | {}", room.clearance, room.description);
            println!("  clue: {}", room.clue_image);
            if view.is_final {
                println!("  FINAL DESTINATION REACHED");
            }
            if let (true, Some(next)) = (view.shows_next_passcode(), view.next_room) {
                println!("  next passcode: {}", next);
            }
            if let Some(hint) = view.hint() {
                println!("  hint: \"{}\"", hint);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("{}", err);
            ExitCode::FAILURE
        }
    }
}

/// What the player sees when the session dies, whether by panic or error.
fn fault_report(detail: &str) -> String {
    format!(
        "\nMystery.exe hit an unexpected fault: {detail}\n\
         Restart the program to return to the entry terminal.\n"
    )
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

fn play(catalog: &RoomCatalog, config: &Config, passcode: Option<&str>) -> Result<()> {
    // Last-resort fault boundary: put the terminal back before reporting a panic
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        error!(%info, "unexpected fault");
        default_hook(info);
        eprintln!("{}", fault_report(&info.to_string()));
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(RoomNavigator::new(catalog), config);
    if let Some(passcode) = passcode {
        app.start_session();
        app.open_room(passcode);
    }

    let result = run(&mut terminal, &mut app, catalog);
    restore_terminal();

    if let Err(err) = &result {
        error!(error = %err, "terminal session failed");
        eprintln!("{}", fault_report(&format!("{err:#}")));
    } else if app.tracker.visited_count() > 0 {
        println!(
            "\nSession closed. Explored {}% of the facility ({} rooms).\n",
            app.tracker.completion_percentage(),
            app.tracker.visited_count()
        );
    }

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    catalog: &RoomCatalog,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw_ui(f, app, catalog))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key(key);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
