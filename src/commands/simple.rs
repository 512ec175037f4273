//! Simple interactive CLI mode
//!
//! Text-based question-and-answer loop without TUI. The user thinks of an
//! object and answers each attribute question by value or option number.

use crate::interactive::{Outcome, Question, Session};
use crate::output::formatters::entropy_bar;
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Run the simple interactive mode on stdin/stdout
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub fn run_simple(session: &mut Session) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_simple_with(session, &mut stdin.lock(), &mut stdout)
}

/// Run the question loop over arbitrary input and output streams
///
/// Ends on `quit` or end of input.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub fn run_simple_with<R: BufRead, W: Write>(
    session: &mut Session,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "\n╔══════════════════════════════════════════════════════════════╗")?;
    writeln!(out, "║              Question Oracle - Interactive Mode              ║")?;
    writeln!(out, "╚══════════════════════════════════════════════════════════════╝\n")?;
    writeln!(
        out,
        "Think of one of the {} objects. I'll ask the question that minimizes",
        session.oracle().items().len()
    )?;
    writeln!(out, "the expected number of questions left.\n")?;
    writeln!(out, "Answer with a value or its number.")?;
    writeln!(out, "Commands: 'quit' to exit, 'new' for new game, 'undo' to undo last answer\n")?;

    let prior = session.entropy();

    loop {
        let outcome = session.outcome();
        let turn = session.history().len() + 1;

        match &outcome {
            Outcome::Asking(question) => {
                print_question(out, session, question, turn, prior)?;
            }
            Outcome::Identified(id) => {
                print_finished(out, session, &[id.clone()])?;
            }
            Outcome::Indistinguishable(ids) => {
                print_finished(out, session, ids)?;
            }
        }

        let Some(line) = read_line(input, out, "Answer")? else {
            return Ok(());
        };

        // An offered value wins over a command with the same spelling
        if let Outcome::Asking(question) = &outcome
            && question.options.iter().any(|option| option.value == line)
        {
            if let Err(err) = session.answer_by_text(&line) {
                writeln!(out, "❌ {err}\n")?;
            }
            continue;
        }

        match line.to_lowercase().as_str() {
            "quit" | "q" | "exit" => {
                writeln!(out, "\n👋 Thanks for playing!\n")?;
                return Ok(());
            }
            "new" | "n" => {
                session.reset();
                writeln!(out, "\n🔄 New game started!\n")?;
            }
            "undo" | "u" => {
                if session.undo() {
                    writeln!(out, "✓ Undone! Back to question {}\n", session.history().len() + 1)?;
                } else {
                    writeln!(out, "Nothing to undo!\n")?;
                }
            }
            _ if matches!(outcome, Outcome::Asking(_)) => {
                if let Err(err) = session.answer_by_text(&line) {
                    writeln!(out, "❌ {err}\n")?;
                }
            }
            _ => writeln!(out, "Type 'new' to play again or 'quit' to exit.\n")?,
        }
    }
}

fn print_question<W: Write>(
    out: &mut W,
    session: &Session,
    question: &Question,
    turn: usize,
    prior: f64,
) -> io::Result<()> {
    writeln!(out, "────────────────────────────────────────────────────────────")?;
    writeln!(
        out,
        "Question {turn}: {} candidates remaining",
        session.candidates_count()
    )?;
    writeln!(out, "────────────────────────────────────────────────────────────")?;
    writeln!(
        out,
        "   Entropy:   [{}] {:.3} bits",
        entropy_bar(session.entropy(), prior, 20),
        session.entropy()
    )?;
    writeln!(out, "   Expected:  {:.3} more questions", question.expected_cost)?;

    writeln!(out, "\n❓ What is its {}?", question.name.bright_yellow().bold())?;
    for (i, option) in question.options.iter().enumerate() {
        writeln!(out, "   {}. {} ({} left)", i + 1, option.value, option.count)?;
    }
    writeln!(out)
}

fn print_finished<W: Write>(out: &mut W, session: &Session, ids: &[String]) -> io::Result<()> {
    let questions = session.history().len();
    writeln!(out, "\n{}", "═".repeat(60).bright_cyan())?;
    if let [id] = ids {
        writeln!(
            out,
            "{}",
            format!("🎉 Identified: {id} after {questions} questions")
                .bright_green()
                .bold()
        )?;
    } else {
        writeln!(
            out,
            "{}",
            format!(
                "🔗 No attribute separates these {} objects: {}",
                ids.len(),
                ids.join(", ")
            )
            .yellow()
            .bold()
        )?;
    }

    for (i, step) in session.history().iter().enumerate() {
        writeln!(
            out,
            "    {}. {} = {} ({} → {})",
            i + 1,
            step.attribute,
            step.answer,
            step.candidates_before,
            step.candidates_after
        )?;
    }
    writeln!(out, "{}", "═".repeat(60).bright_cyan())?;
    writeln!(out, "'new' to play again, 'undo' to go back, 'quit' to exit\n")
}

/// Prompt and read one trimmed line; `None` at end of input
fn read_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(out, "{prompt}: ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::ExactQueryOracle;
    use crate::oracle::fixtures::{three_objects, twins};

    fn play(items: crate::core::ItemTable, script: &str) -> (Session, String) {
        let mut session = Session::new(ExactQueryOracle::new(items).unwrap());
        let mut out = Vec::new();
        run_simple_with(&mut session, &mut script.as_bytes(), &mut out).unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    #[test]
    fn answering_identifies_object() {
        let (session, out) = play(three_objects(), "red\nS\nquit\n");

        assert!(out.contains("Identified: a after 2 questions"));
        assert_eq!(session.candidates(), vec!["a"]);
    }

    #[test]
    fn invalid_answer_is_reported_and_ignored() {
        let (session, out) = play(three_objects(), "purple\n");

        assert!(out.contains("not one of the offered answers"));
        assert!(session.history().is_empty());
    }

    #[test]
    fn undo_and_new_game() {
        let (session, out) = play(three_objects(), "red\nundo\nundo\nblue\nnew\n");

        assert!(out.contains("Back to question 1"));
        assert!(out.contains("Nothing to undo"));
        assert!(out.contains("Identified: c"));
        assert!(session.history().is_empty());
    }

    #[test]
    fn offered_value_beats_command_spelling() {
        let items = crate::core::ItemTable::from_records([
            ("a", vec![("reply", "n")]),
            ("b", vec![("reply", "y")]),
        ])
        .unwrap();
        let (session, out) = play(items, "n\nquit\n");

        assert!(out.contains("Identified: a after 1 questions"));
        assert!(!out.contains("New game started"));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn command_still_works_when_no_value_matches() {
        let (session, out) = play(three_objects(), "n\n");

        assert!(out.contains("New game started"));
        assert!(session.history().is_empty());
    }

    #[test]
    fn twins_report_equivalence_class() {
        let (_, out) = play(twins(), "red\n");
        assert!(out.contains("No attribute separates these 2 objects: x, y"));
    }
}
