use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{error, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Instant;
use tokio::time::{MissedTickBehavior, interval};

use super::{Mode, NameEntry};
use crate::game::{Action, Direction, GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Renderer, View};

/// One interactive game session: the frame loop plus everything it drives
pub struct Session {
    engine: GameEngine,
    state: GameState,
    mode: Mode,
    name_entry: NameEntry,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    pending_direction: Option<Direction>,
}

impl Session {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let name_entry = NameEntry::new(config.max_name_length, config.keystroke_debounce());
        let mut engine = match seed {
            Some(seed) => GameEngine::with_seed(config, seed),
            None => GameEngine::new(config),
        };
        let state = engine.reset()?;

        Ok(Self {
            engine,
            state,
            mode: Mode::Playing,
            name_entry,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_direction: None,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut terminal = or_restore(setup_terminal, || {
            // Best effort; the setup error is the one reported
            let _ = execute!(stderr(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        })?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;
        if let Err(err) = &result {
            error!("Game loop failed: {:#}", err);
        }

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            "Session over after {} runs, high score {}",
            self.metrics.games_played, self.metrics.high_score
        );
        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // One mode handler and one redraw per frame; a late frame pushes the
        // schedule back instead of bursting to catch up
        let mut frame_timer = interval(self.engine.config().frame_duration());
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                // Game tick
                _ = frame_timer.tick() => {
                    self.tick()?;
                    self.metrics.update();
                    terminal.draw(|frame| {
                        let view = View {
                            state: &self.state,
                            mode: self.mode,
                            name: self.name_entry.as_str(),
                            metrics: &self.metrics,
                        };
                        self.renderer.render(frame, &view);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!("Quit requested");
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self.input_handler.handle_key_event(key, self.mode);
            self.apply_key_action(action, Instant::now());
        }
    }

    /// React to one key action
    pub fn apply_key_action(&mut self, action: KeyAction, now: Instant) {
        match action {
            KeyAction::Steer(dir) => {
                // Last key before the tick wins
                self.pending_direction = Some(dir);
            }
            KeyAction::NameChar(c) if self.mode == Mode::NameEntry => {
                self.name_entry.push(c, now);
            }
            KeyAction::Backspace if self.mode == Mode::NameEntry => {
                self.name_entry.backspace(now);
            }
            KeyAction::NameChar(_) | KeyAction::Backspace => {}
            KeyAction::Confirm => self.confirm_name(),
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    /// Run the handler of the current mode for one frame
    pub fn tick(&mut self) -> Result<()> {
        match self.mode {
            Mode::Playing => self.update_game(),
            // The respawned snake waits until the name is confirmed
            Mode::NameEntry => Ok(()),
        }
    }

    fn update_game(&mut self) -> Result<()> {
        let action = Action::from(self.pending_direction.take());
        let result = self.engine.step(&mut self.state, action)?;

        if result.run_ended {
            self.metrics.on_game_over(result.final_length);
            self.mode = Mode::NameEntry;
        }

        Ok(())
    }

    fn confirm_name(&mut self) {
        if self.mode != Mode::NameEntry {
            return;
        }

        match self.metrics.record_name(self.name_entry.as_str()) {
            Some(rank) => info!(
                "{:?} placed #{} with {}",
                self.name_entry.as_str(),
                rank + 1,
                self.metrics.leaderboard[rank].score
            ),
            None => info!("{:?} did not make the leaderboard", self.name_entry.as_str()),
        }

        self.mode = Mode::Playing;
        self.pending_direction = None;
        self.metrics.on_game_start();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Run `setup`, calling `restore` first if it fails
fn or_restore<T>(setup: impl FnOnce() -> Result<T>, restore: impl FnOnce()) -> Result<T> {
    let result = setup();
    if result.is_err() {
        restore();
    }
    result
}

/// Alternate screen plus a ratatui terminal on stderr; raw mode is already on
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
    let mut stderr = stderr();
    execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}
