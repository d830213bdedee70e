//! Main TUI application state and logic

use crate::program::{Algorithm, ALL_ALGORITHMS};
use crate::session::Session;
use crate::step::RunOutcome;
use crate::ui::panes::{self, RunBadge};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
    backend::Backend,
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    View,
    Trace,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::View => FocusedPane::Trace,
            FocusedPane::Trace => FocusedPane::View,
        }
    }
}

/// The main application state
pub struct App {
    /// The run session being visualized
    pub session: Session,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Trace pane scroll offset
    pub trace_scroll: usize,

    /// Events seen at the last frame (for trace auto-scroll)
    prev_steps: usize,

    /// Whether the run is paused (advance is skipped)
    pub is_paused: bool,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    pub fn new(session: Session) -> Self {
        App {
            session,
            focused_pane: FocusedPane::View,
            trace_scroll: 0,
            prev_steps: 0,
            is_paused: false,
            should_quit: false,
            status_message: String::from("Ready!"),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if !self.is_paused {
                let was_running = self.session.is_running();
                self.session.advance();
                if self.session.steps() > self.prev_steps {
                    self.prev_steps = self.session.steps();
                    self.trace_scroll = usize::MAX;
                }
                if was_running && !self.session.is_running() {
                    self.status_message = match (self.session.defect(), self.session.outcome()) {
                        (Some(err), _) => format!("Aborted: {}", err),
                        (None, Some(RunOutcome::Completed(_))) => "Run complete".to_string(),
                        (None, Some(RunOutcome::Cancelled(_))) => "Run cancelled".to_string(),
                        (None, None) => "Stopped".to_string(),
                    };
                }
            }

            // Poll with timeout so paced runs keep advancing
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    fn badge(&self) -> RunBadge {
        if self.session.defect().is_some() {
            return RunBadge::Defect;
        }
        if self.session.is_running() {
            return RunBadge::Running;
        }
        match self.session.outcome() {
            Some(RunOutcome::Completed(_)) => RunBadge::Done,
            Some(RunOutcome::Cancelled(_)) => RunBadge::Cancelled,
            None => RunBadge::Ready,
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Main view and trace side by side, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(main_chunks[0]);

        let state = self.session.state();
        if let Some(buf) = state.as_linear() {
            panes::render_bars_pane(
                frame,
                columns[0],
                buf,
                self.session.last_event(),
                self.session.target(),
                self.focused_pane == FocusedPane::View,
            );
        } else if let Some(pool) = state.as_tree() {
            panes::render_tree_pane(
                frame,
                columns[0],
                pool,
                self.focused_pane == FocusedPane::View,
            );
        }

        panes::render_trace_pane(
            frame,
            columns[1],
            self.session.trace(),
            self.session.defect(),
            self.focused_pane == FocusedPane::Trace,
            &mut self.trace_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            self.session.algorithm(),
            self.session.steps(),
            self.session.pace().get(),
            &self.status_message,
            self.badge(),
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                // Debounce to prevent key-repeat spam
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.toggle_run();
                }
            }
            KeyCode::Char('c') => {
                if self.session.is_running() {
                    self.session.request_cancel();
                    self.is_paused = false;
                    self.status_message = "Cancelling...".to_string();
                }
            }
            KeyCode::Char('g') => match self.session.regenerate() {
                Ok(()) => {
                    self.prev_steps = 0;
                    self.trace_scroll = 0;
                    self.status_message = "New values".to_string();
                }
                Err(e) => {
                    self.status_message = format!("Cannot regenerate: {}", e);
                }
            },
            KeyCode::Char('r') => {
                self.session.reset();
                self.is_paused = false;
                self.prev_steps = 0;
                self.trace_scroll = 0;
                self.status_message = "Reset".to_string();
            }
            KeyCode::Tab => self.cycle_algorithm(1),
            KeyCode::BackTab => self.cycle_algorithm(-1),
            KeyCode::Left | KeyCode::Right => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::View => self.adjust_pace(50),
                FocusedPane::Trace => {
                    self.trace_scroll = self.trace_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::View => self.adjust_pace_down(50),
                FocusedPane::Trace => {
                    self.trace_scroll = self.trace_scroll.saturating_add(1);
                }
            },
            _ => {}
        }
    }

    fn toggle_run(&mut self) {
        if self.session.is_running() {
            self.is_paused = !self.is_paused;
            self.status_message = if self.is_paused {
                "Paused".to_string()
            } else {
                "Playing...".to_string()
            };
            return;
        }
        // A finished run restarts from the same initial state
        if self.session.outcome().is_some() || self.session.defect().is_some() {
            self.session.reset();
        }
        match self.session.start() {
            Ok(()) => {
                self.is_paused = false;
                self.prev_steps = 0;
                self.trace_scroll = 0;
                self.status_message = "Playing...".to_string();
            }
            Err(e) => {
                self.status_message = format!("Cannot start: {}", e);
            }
        }
    }

    fn cycle_algorithm(&mut self, dir: isize) {
        let current = self.session.algorithm();
        let pos = ALL_ALGORITHMS
            .iter()
            .position(|a| *a == current)
            .unwrap_or(0) as isize;
        let len = ALL_ALGORITHMS.len() as isize;
        let next: Algorithm = ALL_ALGORITHMS[((pos + dir + len) % len) as usize];
        match self.session.set_algorithm(next) {
            Ok(()) => {
                self.prev_steps = 0;
                self.trace_scroll = 0;
                self.status_message = format!("Selected {}", next);
            }
            Err(e) => {
                self.status_message = format!("Cannot switch: {}", e);
            }
        }
    }

    fn adjust_pace(&mut self, by: u64) {
        let pace = self.session.pace();
        pace.set(pace.get().saturating_add(by));
        self.status_message = format!("Pace {}ms", pace.get());
    }

    // Interactive floor of 10ms; dropping to 0 would outrun the poll loop
    fn adjust_pace_down(&mut self, by: u64) {
        let pace = self.session.pace();
        pace.set(pace.get().saturating_sub(by).max(10));
        self.status_message = format!("Pace {}ms", pace.get());
    }
}
