//! TERMTRIS - a terminal falling-block game
//!
//! The engine lives in `game`/`board`/`piece`/`tetromino`; this binary owns
//! the terminal, the keyboard, the tick timer and high-score persistence.

mod board;
mod game;
mod input;
mod menu;
mod piece;
mod score;
mod tetromino;
mod ui;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use game::{Game, MoveKind};
use input::GameInput;
use menu::{Menu, MenuItem};
use ratatui::{backend::CrosstermBackend, Terminal};
use score::{HighScores, MAX_NAME_LEN};
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};

/// Target frame rate for drawing and input polling
const FRAME_DURATION: Duration = Duration::from_millis(16);
/// Lower clamp on the tick interval; the engine's speed decay has no floor
const MIN_TICK: Duration = Duration::from_millis(50);

/// Which view the driver is currently showing
enum Screen {
    Menu,
    HighScores,
    Help { from_game: bool },
    Playing,
    GameOver { name: Option<String>, error: Option<String> },
}

fn main() -> io::Result<()> {
    // Log to a file so the alternate screen stays clean
    let log_dir = std::env::temp_dir().join("termtris");
    let _ = std::fs::create_dir_all(&log_dir);
    let file_appender = tracing_appender::rolling::never(&log_dir, "termtris.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("termtris=debug".parse().unwrap()),
        )
        .with_ansi(false)
        .init();

    tracing::info!(log = %log_dir.join("termtris.log").display(), "starting up");

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal);

    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    if let Ok(Some(final_score)) = &result {
        println!("Thanks for playing! Final score: {}", final_score);
    }

    result.map(|_| ())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<Option<u32>> {
    let mut scores = HighScores::load();
    let mut screen = Screen::Menu;
    let mut menu = Menu::new();
    let mut game: Option<Game> = None;
    let mut last_fall = Instant::now();
    let mut last_score: Option<u32> = None;

    loop {
        terminal.draw(|frame| match &screen {
            Screen::Menu => ui::render_menu(frame, &menu, scores.best()),
            Screen::HighScores => {
                ui::render_menu(frame, &menu, scores.best());
                ui::render_high_scores(frame, &scores);
            }
            Screen::Help { from_game } => {
                match (*from_game, &game) {
                    (true, Some(game)) => ui::render_game(frame, game),
                    _ => ui::render_menu(frame, &menu, scores.best()),
                }
                ui::render_help(frame);
            }
            Screen::Playing => {
                if let Some(game) = &game {
                    ui::render_game(frame, game);
                }
            }
            Screen::GameOver { name, error } => {
                if let Some(game) = &game {
                    ui::render_game(frame, game);
                    ui::render_game_over(
                        frame,
                        game.score(),
                        name.as_deref(),
                        error.as_deref(),
                    );
                }
            }
        })?;

        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match &mut screen {
                    Screen::Menu => match key.code {
                        KeyCode::Up => menu.move_up(),
                        KeyCode::Down => menu.move_down(),
                        KeyCode::Enter => match menu.selected_item() {
                            MenuItem::NewGame => {
                                game = Some(Game::new());
                                last_fall = Instant::now();
                                screen = Screen::Playing;
                            }
                            MenuItem::HighScores => screen = Screen::HighScores,
                            MenuItem::Help => screen = Screen::Help { from_game: false },
                            MenuItem::Quit => return Ok(last_score),
                        },
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(last_score),
                        KeyCode::Char('h') => screen = Screen::Help { from_game: false },
                        _ => {}
                    },
                    Screen::HighScores => screen = Screen::Menu,
                    Screen::Help { from_game } => {
                        if *from_game {
                            last_fall = Instant::now();
                            screen = Screen::Playing;
                        } else {
                            screen = Screen::Menu;
                        }
                    }
                    Screen::Playing => {
                        if let Some(active) = game.as_mut() {
                            match input::map_game_key(key) {
                                Some(GameInput::Move(kind)) => {
                                    let outcome = active.apply_move(kind);
                                    tracing::trace!(?kind, ?outcome, "input");
                                    if let Some(next) =
                                        check_game_over(active, &scores, &mut last_score)
                                    {
                                        screen = next;
                                    }
                                }
                                Some(GameInput::Help) => {
                                    screen = Screen::Help { from_game: true };
                                }
                                Some(GameInput::Quit) => {
                                    tracing::info!("game abandoned");
                                    game = None;
                                    screen = Screen::Menu;
                                }
                                None => {}
                            }
                        }
                    }
                    Screen::GameOver { name, error } => match name {
                        Some(entry) => match key.code {
                            KeyCode::Enter => {
                                let final_score =
                                    game.as_ref().map(|g| g.score()).unwrap_or_default();
                                scores.insert(entry, final_score);
                                match scores.save() {
                                    Ok(()) => {
                                        game = None;
                                        screen = Screen::Menu;
                                    }
                                    Err(e) => {
                                        tracing::warn!(error = %e, "could not save high scores");
                                        *error = Some(e);
                                        *name = None;
                                    }
                                }
                            }
                            KeyCode::Backspace => {
                                entry.pop();
                            }
                            KeyCode::Char(c) => {
                                if !c.is_control() && entry.len() < MAX_NAME_LEN {
                                    entry.push(c);
                                }
                            }
                            _ => {}
                        },
                        None => {
                            game = None;
                            screen = Screen::Menu;
                        }
                    },
                }
            }
        }

        // Timer-driven descent
        if let Screen::Playing = screen {
            if let Some(active) = game.as_mut() {
                let interval = active.fall_interval().max(MIN_TICK);
                if last_fall.elapsed() >= interval {
                    active.apply_move(MoveKind::SoftDrop);
                    last_fall = Instant::now();
                    if let Some(next) = check_game_over(active, &scores, &mut last_score) {
                        screen = next;
                    }
                }
            }
        }
    }
}

/// After an engine call, decide whether to move to the game-over overlay
fn check_game_over(
    game: &Game,
    scores: &HighScores,
    last_score: &mut Option<u32>,
) -> Option<Screen> {
    if !game.is_game_over() {
        return None;
    }
    let final_score = game.score();
    *last_score = Some(final_score);
    tracing::info!(score = final_score, blocks = game.blocks(), "game over");
    let name = scores.qualifies(final_score).then(String::new);
    Some(Screen::GameOver { name, error: None })
}
