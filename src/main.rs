// Defensive programming lints - prevent panics and unsafe patterns
#![deny(clippy::indexing_slicing)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::fallible_impl_from)]
#![warn(clippy::wildcard_enum_match_arm)]
#![warn(clippy::fn_params_excessive_bools)]
// Idiomatic Rust lints
#![warn(clippy::needless_return)]
#![warn(clippy::let_and_return)]
#![warn(clippy::must_use_candidate)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::map_unwrap_or)]
#![warn(clippy::explicit_iter_loop)]

mod app;
mod config;
mod logging;
mod script;
mod services;
mod ui;

use app::{App, AppMode, Focus};
use color_eyre::Result;
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use services::{CredentialStore, FileStore};
use std::{
    io,
    time::{Duration, Instant},
};

const RESULT_SCROLL_STEP: u16 = 5;

fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let config = config::Config::load()?;

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        return handle_cli_args(&args);
    }

    if let Err(error) = logging::init(&config.logging) {
        eprintln!("Logging disabled: {}", error);
    }
    tracing::info!(
        base_url = %config.server.base_url,
        endpoint = ?config.server.endpoint,
        default_mode = %config.form.default_mode,
        "configuration loaded"
    );

    let mut app = App::new(&config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "event loop failed");
        eprintln!("Error: {:?}", err);
    }
    tracing::info!("scriptdesk exiting");

    Ok(())
}

fn handle_cli_args(args: &[String]) -> Result<()> {
    let cmd = args
        .get(1)
        .ok_or_else(|| color_eyre::eyre::eyre!("No command provided"))?;
    let program_name = args.first().map_or("scriptdesk", String::as_str);

    match cmd.as_str() {
        "--help" | "-h" | "help" => print_help(program_name),
        "--version" | "-v" => println!("ScriptDesk v{}", env!("CARGO_PKG_VERSION")),
        "clear-key" => {
            let store = CredentialStore::new(FileStore::open_default()?);
            store.clear()?;
            println!("Stored API key removed.");
        }
        "config-path" => {
            println!("config: {}", config::Config::config_path()?.display());
            println!(
                "log:    {}",
                config::Config::data_dir()?
                    .join(logging::LOG_FILE_NAME)
                    .display()
            );
        }
        other => {
            eprintln!("Unknown command: {}", other);
            eprintln!("Run with --help for available commands.");
            std::process::exit(1);
        }
    }
    Ok(())
}

fn print_help(program_name: &str) {
    println!("ScriptDesk - short-form video script studio");
    println!();
    println!("Usage: {} [command]", program_name);
    println!();
    println!("Commands:");
    println!("  clear-key    - Remove the stored Gemini API key");
    println!("  config-path  - Print config and log file locations");
    println!("  --help       - Show this help");
    println!("  --version    - Show version");
    println!();
    println!("Run without arguments to start interactive mode.");
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.poll_generate_events();
        tick_loading_animation(app);
        app.clear_expired_status_toast();

        terminal.draw(|f| ui::render(f, app))?;

        if app.should_quit {
            break;
        }

        // Poll for events with a timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle KeyPress events to avoid duplicate handling
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        app.should_quit = true;
                        continue;
                    }

                    match app.mode {
                        AppMode::Form => handle_form_mode(app, key.code, key.modifiers)?,
                        AppMode::ApiSettings => {
                            handle_api_settings_mode(app, key.code, key.modifiers)
                        }
                        AppMode::Help => handle_help_mode(app, key.code),
                    }
                }
                Event::Paste(paste) => handle_paste(app, &paste),
                Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Resize(_, _) => {}
            }
        }
    }

    Ok(())
}

fn tick_loading_animation(app: &mut App) {
    if !app.lifecycle.is_loading() {
        app.loading_frame = 0;
        app.last_loading_tick = None;
        return;
    }

    let now = Instant::now();
    let should_tick = app
        .last_loading_tick
        .is_none_or(|last_tick| now.duration_since(last_tick) >= Duration::from_millis(200));

    if should_tick {
        app.loading_frame = app.loading_frame.wrapping_add(1);
        app.last_loading_tick = Some(now);
    }
}

fn handle_form_mode(app: &mut App, key_code: KeyCode, modifiers: KeyModifiers) -> Result<()> {
    let on_result = matches!(app.focus, Focus::Result(_));

    if modifiers.contains(KeyModifiers::CONTROL) {
        match key_code {
            KeyCode::Char('s') => app.submit()?,
            KeyCode::Char('k') => app.open_api_settings(),
            KeyCode::Char('y') => app.copy_all_results(),
            KeyCode::Char('r') => app.focus_results(),
            KeyCode::Char(_)
            | KeyCode::Backspace
            | KeyCode::Enter
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Up
            | KeyCode::Down
            | KeyCode::Home
            | KeyCode::End
            | KeyCode::PageUp
            | KeyCode::PageDown
            | KeyCode::Tab
            | KeyCode::BackTab
            | KeyCode::Delete
            | KeyCode::Insert
            | KeyCode::F(_)
            | KeyCode::Null
            | KeyCode::Esc
            | KeyCode::CapsLock
            | KeyCode::ScrollLock
            | KeyCode::NumLock
            | KeyCode::PrintScreen
            | KeyCode::Pause
            | KeyCode::Menu
            | KeyCode::KeypadBegin
            | KeyCode::Media(_)
            | KeyCode::Modifier(_) => {}
        }
        return Ok(());
    }

    match key_code {
        KeyCode::F(1) => app.open_help(),
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_previous(),
        KeyCode::Up if on_result => app.previous_result_field(),
        KeyCode::Down if on_result => app.next_result_field(),
        KeyCode::Up => app.focus_previous(),
        KeyCode::Down => app.focus_next(),
        KeyCode::PageUp => app.scroll_result_up(RESULT_SCROLL_STEP),
        KeyCode::PageDown => app.scroll_result_down(RESULT_SCROLL_STEP),
        KeyCode::Enter => app.form_enter()?,
        KeyCode::Char('c') if on_result => app.copy_focused_result(),
        KeyCode::Char(character) => app.add_form_char(character),
        KeyCode::Backspace => app.remove_form_char(),
        KeyCode::Delete => app.delete_form_char(),
        KeyCode::Left => app.form_horizontal(false),
        KeyCode::Right => app.form_horizontal(true),
        KeyCode::Home => app.form_home(),
        KeyCode::End => app.form_end(),
        KeyCode::Esc if on_result => app.focus = Focus::Form(script::FormField::Submit),
        KeyCode::Esc
        | KeyCode::Insert
        | KeyCode::F(_)
        | KeyCode::Null
        | KeyCode::CapsLock
        | KeyCode::ScrollLock
        | KeyCode::NumLock
        | KeyCode::PrintScreen
        | KeyCode::Pause
        | KeyCode::Menu
        | KeyCode::KeypadBegin
        | KeyCode::Media(_)
        | KeyCode::Modifier(_) => {}
    }
    Ok(())
}

fn handle_api_settings_mode(app: &mut App, key_code: KeyCode, modifiers: KeyModifiers) {
    if modifiers.contains(KeyModifiers::CONTROL) {
        if key_code == KeyCode::Char('d') {
            app.clear_api_key();
        } else if key_code == KeyCode::Char('k') {
            app.close_api_settings();
        }
        return;
    }

    match key_code {
        KeyCode::Esc => app.close_api_settings(),
        KeyCode::Enter => app.save_api_key(),
        KeyCode::Tab => app.toggle_api_key_visibility(),
        KeyCode::Char(character) => app.add_api_key_char(character),
        KeyCode::Backspace => app.remove_api_key_char(),
        KeyCode::Left
        | KeyCode::Right
        | KeyCode::Up
        | KeyCode::Down
        | KeyCode::Home
        | KeyCode::End
        | KeyCode::PageUp
        | KeyCode::PageDown
        | KeyCode::BackTab
        | KeyCode::Delete
        | KeyCode::Insert
        | KeyCode::F(_)
        | KeyCode::Null
        | KeyCode::CapsLock
        | KeyCode::ScrollLock
        | KeyCode::NumLock
        | KeyCode::PrintScreen
        | KeyCode::Pause
        | KeyCode::Menu
        | KeyCode::KeypadBegin
        | KeyCode::Media(_)
        | KeyCode::Modifier(_) => {}
    }
}

fn handle_help_mode(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q') => app.close_help(),
        KeyCode::Enter
        | KeyCode::Backspace
        | KeyCode::Up
        | KeyCode::Down
        | KeyCode::Left
        | KeyCode::Right
        | KeyCode::Home
        | KeyCode::End
        | KeyCode::PageUp
        | KeyCode::PageDown
        | KeyCode::Tab
        | KeyCode::BackTab
        | KeyCode::Delete
        | KeyCode::Insert
        | KeyCode::F(_)
        | KeyCode::Char(_)
        | KeyCode::Null
        | KeyCode::CapsLock
        | KeyCode::ScrollLock
        | KeyCode::NumLock
        | KeyCode::PrintScreen
        | KeyCode::Pause
        | KeyCode::Menu
        | KeyCode::KeypadBegin
        | KeyCode::Media(_)
        | KeyCode::Modifier(_) => {}
    }
}

fn handle_paste(app: &mut App, paste: &str) {
    if paste.is_empty() {
        return;
    }
    match app.mode {
        AppMode::Form => app.paste_into_form(paste),
        AppMode::ApiSettings => app.paste_api_key(paste),
        AppMode::Help => {}
    }
}
