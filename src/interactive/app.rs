//! TUI application state and logic

use super::session::{Outcome, Session};
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::collections::BTreeMap;
use std::io;

/// Application state
pub struct App {
    pub session: Session,
    pub outcome: Outcome,
    /// Highlighted answer option
    pub selected: usize,
    pub messages: Vec<Message>,
    pub stats: Statistics,
    pub should_quit: bool,
    /// Entropy of the full table, the scale for gauges
    pub prior_entropy: f64,
    counted: bool,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

#[derive(Debug, Default, Clone)]
pub struct Statistics {
    pub total_games: usize,
    pub identified: usize,
    pub question_distribution: BTreeMap<usize, usize>,
}

impl App {
    #[must_use]
    pub fn new(mut session: Session) -> Self {
        let outcome = session.outcome();
        let prior_entropy = session.entropy();

        Self {
            session,
            outcome,
            selected: 0,
            messages: vec![
                Message {
                    text: "Think of an object. I'll ask the optimal questions.".to_string(),
                    style: MessageStyle::Info,
                },
                Message {
                    text: "↑/↓ to pick an answer, Enter to submit".to_string(),
                    style: MessageStyle::Info,
                },
            ],
            stats: Statistics::default(),
            should_quit: false,
            prior_entropy,
            counted: false,
        }
    }

    /// Whether the current game has ended
    #[must_use]
    pub fn is_finished(&self) -> bool {
        !matches!(self.outcome, Outcome::Asking(_))
    }

    fn options_len(&self) -> usize {
        match &self.outcome {
            Outcome::Asking(question) => question.options.len(),
            _ => 0,
        }
    }

    pub fn select_next(&mut self) {
        let len = self.options_len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_previous(&mut self) {
        let len = self.options_len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// Answer the pending question with the highlighted option
    pub fn submit(&mut self) {
        let choice = self.selected;
        self.submit_choice(choice);
    }

    /// Answer with the option at `choice`
    pub fn submit_choice(&mut self, choice: usize) {
        match self.session.answer(choice) {
            Ok(outcome) => {
                self.outcome = outcome;
                self.selected = 0;
                self.report_outcome();
            }
            Err(err) => self.add_message(&err.to_string(), MessageStyle::Error),
        }
    }

    fn report_outcome(&mut self) {
        let questions = self.session.history().len();
        match self.outcome.clone() {
            Outcome::Asking(_) => {
                let remaining = self.session.candidates_count();
                self.add_message(
                    &format!("{remaining} candidates remaining"),
                    MessageStyle::Info,
                );
            }
            Outcome::Identified(id) => {
                self.record_game(questions, true);
                self.add_message(
                    &format!("🎉 It's {id}! Found in {questions} questions"),
                    MessageStyle::Success,
                );
                self.add_message("Press 'n' for new game or 'q' to quit.", MessageStyle::Info);
            }
            Outcome::Indistinguishable(ids) => {
                self.record_game(questions, false);
                self.add_message(
                    &format!("No attribute separates: {}", ids.join(", ")),
                    MessageStyle::Error,
                );
                self.add_message("Press 'n' for new game or 'q' to quit.", MessageStyle::Info);
            }
        }
    }

    fn record_game(&mut self, questions: usize, identified: bool) {
        if self.counted {
            return;
        }
        self.counted = true;
        self.stats.total_games += 1;
        if identified {
            self.stats.identified += 1;
        }
        *self
            .stats
            .question_distribution
            .entry(questions)
            .or_insert(0) += 1;
    }

    pub fn new_game(&mut self) {
        self.session.reset();
        self.outcome = self.session.outcome();
        self.selected = 0;
        self.counted = false;
        self.messages.clear();
        self.add_message(
            "New game started! Think of an object.",
            MessageStyle::Info,
        );
    }

    pub fn undo_last(&mut self) {
        if self.session.undo() {
            self.outcome = self.session.outcome();
            self.selected = 0;
            self.add_message("Undone!", MessageStyle::Info);
        } else {
            self.add_message("Nothing to undo!", MessageStyle::Error);
        }
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.should_quit = true;
                }
                KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
                KeyCode::Char('n') => app.new_game(),
                KeyCode::Char('u') | KeyCode::Backspace => app.undo_last(),
                _ if app.is_finished() => {}
                KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
                KeyCode::Down | KeyCode::Char('j') => app.select_next(),
                KeyCode::Enter => app.submit(),
                KeyCode::Char(c @ '1'..='9') => {
                    let choice = c as usize - '1' as usize;
                    app.submit_choice(choice);
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
