//! Main TUI application state and logic

use crate::snapshot::{ExecutionStep, Trace};
use crate::ui::panes::{self, SourceScrollState, StatusRenderData};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Auto-play intervals, slowest first
const PLAY_INTERVALS_MS: [u64; 5] = [2000, 1000, 500, 250, 100];

/// Index into [`PLAY_INTERVALS_MS`] used at startup
const DEFAULT_SPEED: usize = 1;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Console,
    Variables,
    Narration,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> console -> variables -> narration)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Console,
            FocusedPane::Console => FocusedPane::Variables,
            FocusedPane::Variables => FocusedPane::Narration,
            FocusedPane::Narration => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Narration,
            FocusedPane::Console => FocusedPane::Source,
            FocusedPane::Variables => FocusedPane::Console,
            FocusedPane::Narration => FocusedPane::Variables,
        }
    }
}

/// The step player state
pub struct App {
    /// The recorded trace being replayed
    pub trace: Trace,

    /// The source code that produced the trace
    pub source_code: String,

    /// Index of the shown step
    pub position: usize,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: SourceScrollState,
    pub variables_scroll: usize,
    pub console_scroll: usize,
    pub narration_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Index into the auto-play interval table
    pub speed: usize,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a player positioned on the first step
    pub fn new(trace: Trace, source_code: String) -> Self {
        let status_message = if trace.is_empty() {
            String::from("Program finished without recording any steps")
        } else {
            String::from("Ready!")
        };

        App {
            trace,
            source_code,
            position: 0,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState::default(),
            variables_scroll: 0,
            console_scroll: usize::MAX,
            narration_scroll: 0,
            should_quit: false,
            status_message,
            is_playing: false,
            speed: DEFAULT_SPEED,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or_else(Instant::now),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_play_time.elapsed() >= self.play_interval() {
                self.advance_playback();
                self.last_play_time = Instant::now();
            }

            // Poll with a timeout so auto-play keeps ticking
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

    /// The step currently shown; `None` only for an empty trace
    pub fn current_step(&self) -> Option<&ExecutionStep> {
        self.trace.get(self.position)
    }

    fn last_index(&self) -> usize {
        self.trace.len().saturating_sub(1)
    }

    pub fn play_interval(&self) -> Duration {
        Duration::from_millis(PLAY_INTERVALS_MS[self.speed])
    }

    fn speed_label(&self) -> String {
        format!("{:.1}s", PLAY_INTERVALS_MS[self.speed] as f64 / 1000.0)
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Left column: Source (top) | Console (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        // Right column: Variables (top) | Narration (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[1]);

        let step = self.trace.get(self.position);
        let previous = self.position.checked_sub(1).and_then(|idx| self.trace.get(idx));

        panes::render_source_pane(
            frame,
            left_rows[0],
            &self.source_code,
            step.map_or(0, |s| s.line_no),
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_console_pane(
            frame,
            left_rows[1],
            step.map(|s| s.output.as_slice()).unwrap_or_default(),
            self.focused_pane == FocusedPane::Console,
            &mut self.console_scroll,
        );

        panes::render_variables_pane(
            frame,
            right_rows[0],
            step.map(|s| &s.variables),
            previous.map(|s| &s.variables),
            self.focused_pane == FocusedPane::Variables,
            &mut self.variables_scroll,
        );

        panes::render_narration_pane(
            frame,
            right_rows[1],
            step,
            self.focused_pane == FocusedPane::Narration,
            &mut self.narration_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &StatusRenderData {
                message: &self.status_message,
                current_step: self.position,
                total_steps: self.trace.len(),
                is_playing: self.is_playing,
                speed_label: self.speed_label(),
            },
        );
    }

    /// Handle keyboard events
    pub(crate) fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let stepped = self.step_by(n);
                self.status_message = format!("Stepped forward {} step(s)", stepped);
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.step_backward();
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.step_forward();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Variables => {
                    self.variables_scroll = self.variables_scroll.saturating_sub(1);
                }
                FocusedPane::Console => {
                    self.console_scroll = self.console_scroll.saturating_sub(1);
                }
                FocusedPane::Narration => {
                    self.narration_scroll = self.narration_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Variables => {
                    self.variables_scroll = self.variables_scroll.saturating_add(1);
                }
                FocusedPane::Console => {
                    self.console_scroll = self.console_scroll.saturating_add(1);
                }
                FocusedPane::Narration => {
                    self.narration_scroll = self.narration_scroll.saturating_add(1);
                }
            },
            KeyCode::Char(' ') => {
                // 200ms debounce against key repeat
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.toggle_playback();
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.speed = (self.speed + 1).min(PLAY_INTERVALS_MS.len() - 1);
                self.status_message = format!("Speed: one step every {}", self.speed_label());
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                self.speed = self.speed.saturating_sub(1);
                self.status_message = format!("Speed: one step every {}", self.speed_label());
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.jump_to(self.last_index());
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.jump_to(0);
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
    }

    fn toggle_playback(&mut self) {
        if self.is_playing {
            self.is_playing = false;
            self.status_message = "Paused".to_string();
            return;
        }

        if self.position >= self.last_index() {
            // Replay from the top when already at the end
            self.jump_to(0);
        }
        self.is_playing = !self.trace.is_empty();
        self.last_play_time = Instant::now();
        self.status_message = "Playing...".to_string();
    }

    fn advance_playback(&mut self) {
        if self.step_by(1) == 1 {
            self.status_message = "Playing...".to_string();
        }
        if self.position >= self.last_index() {
            self.is_playing = false;
            self.status_message = "Playback complete".to_string();
        }
    }

    /// Move forward up to `n` steps; returns how many were taken
    fn step_by(&mut self, n: usize) -> usize {
        let target = (self.position + n).min(self.last_index());
        let stepped = target - self.position;
        self.jump_to(target);
        stepped
    }

    fn step_forward(&mut self) {
        if self.step_by(1) == 1 {
            self.status_message = "Stepped forward".to_string();
        } else {
            self.status_message = "Cannot step forward: already at the last step".to_string();
        }
    }

    fn step_backward(&mut self) {
        match self.position.checked_sub(1) {
            Some(target) => {
                self.jump_to(target);
                self.status_message = "Stepped backward".to_string();
            }
            None => {
                self.status_message = "Cannot step backward: already at the first step".to_string();
            }
        }
    }

    fn jump_to(&mut self, target: usize) {
        self.position = target.min(self.last_index());
        // Follow new output and show each narration from its top
        self.console_scroll = usize::MAX;
        self.narration_scroll = 0;
        log::trace!(
            "player at step {} (line {:?})",
            self.position,
            self.current_step().map(|s| s.line_no)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    const SAMPLE: &str = "total = 0\nfor i in range(3):\n    total = total + i\n    print(total)\n";

    fn app() -> App {
        let trace = crate::trace(SAMPLE).expect("trace");
        App::new(trace, SAMPLE.to_string())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_stepping_is_clamped() {
        let mut app = app();
        let last = app.trace.len() - 1;

        press(&mut app, KeyCode::Left);
        assert_eq!(app.position, 0);

        press(&mut app, KeyCode::Right);
        assert_eq!(app.position, 1);

        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.position, last);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.position, last);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.position, last);

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.position, 0);
    }

    #[test]
    fn test_number_keys_step_n() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.position, 3);
        assert_eq!(app.status_message, "Stepped forward 3 step(s)");
    }

    #[test]
    fn test_focus_cycles() {
        let mut app = app();
        for _ in 0..4 {
            press(&mut app, KeyCode::Tab);
        }
        assert_eq!(app.focused_pane, FocusedPane::Source);
        assert_eq!(FocusedPane::Source.next().prev(), FocusedPane::Source);
    }

    #[test]
    fn test_speed_bounds() {
        let mut app = app();
        for _ in 0..10 {
            press(&mut app, KeyCode::Char('+'));
        }
        assert_eq!(app.play_interval(), Duration::from_millis(100));
        for _ in 0..10 {
            press(&mut app, KeyCode::Char('-'));
        }
        assert_eq!(app.play_interval(), Duration::from_millis(2000));
    }

    #[test]
    fn test_playback_stops_at_end() {
        let mut app = app();
        app.toggle_playback();
        assert!(app.is_playing);
        for _ in 0..app.trace.len() {
            app.advance_playback();
        }
        assert!(!app.is_playing);
        assert_eq!(app.position, app.trace.len() - 1);
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_render_smoke() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Source Code"));
        assert!(text.contains("Variables"));
        assert!(text.contains("Narration"));
        assert!(text.contains("Step 10/10"));
        assert!(text.contains("END"));
    }

    #[test]
    fn test_render_empty_trace() {
        let mut app = App::new(Trace::default(), "pass\n".to_string());
        press(&mut app, KeyCode::Right);
        assert_eq!(app.position, 0);

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Step 0/0"));
    }
}
