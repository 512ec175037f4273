//! Interactive play
//!
//! The user thinks of an object and the oracle asks the optimal questions.
//! [`Session`] holds the game state; the TUI and the text mode drive it.

mod app;
mod rendering;
mod session;

pub use app::{App, run_tui};
pub use session::{AnswerOption, Outcome, Question, Session, SessionError};
