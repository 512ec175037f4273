//! Question-and-answer session shared by the TUI and the text mode
//!
//! The session keeps a stack of candidate states: every answer pushes the
//! narrowed state, undo pops it, reset drops back to the full table.

use crate::core::{AttributeIndex, CandidateSet, ValueCode};
use crate::oracle::partition::{answer_distribution, restrict};
use crate::oracle::{ExactQueryOracle, TrajectoryStep, entropy_uniform};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("no question is pending")]
    NoQuestion,
    #[error("{0:?} is not one of the offered answers")]
    UnknownAnswer(String),
}

/// One possible answer to the pending question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    pub value: String,
    pub code: ValueCode,
    /// Candidates that give this answer
    pub count: usize,
}

/// The optimal question for the current state
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub attribute: AttributeIndex,
    pub name: String,
    /// Expected questions left, counting this one
    pub expected_cost: f64,
    pub options: Vec<AnswerOption>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Asking(Question),
    /// Exactly one object is consistent with the answers
    Identified(String),
    /// Several objects remain but no attribute separates them
    Indistinguishable(Vec<String>),
}

pub struct Session {
    oracle: ExactQueryOracle,
    states: Vec<CandidateSet>,
    history: Vec<TrajectoryStep>,
}

impl Session {
    #[must_use]
    pub fn new(oracle: ExactQueryOracle) -> Self {
        let root = oracle.root().clone();
        Self {
            oracle,
            states: vec![root],
            history: Vec::new(),
        }
    }

    #[must_use]
    pub fn oracle(&self) -> &ExactQueryOracle {
        &self.oracle
    }

    fn state(&self) -> &CandidateSet {
        self.states.last().unwrap_or_else(|| self.oracle.root())
    }

    /// IDs still consistent with every answer
    #[must_use]
    pub fn candidates(&self) -> Vec<&str> {
        let items = self.oracle.items();
        self.state().iter().map(|i| items.id(i)).collect()
    }

    #[must_use]
    pub fn candidates_count(&self) -> usize {
        self.state().len()
    }

    #[must_use]
    pub fn entropy(&self) -> f64 {
        entropy_uniform(self.candidates_count())
    }

    /// Entropy of every state so far, starting with the prior
    #[must_use]
    pub fn entropies(&self) -> Vec<f64> {
        self.states.iter().map(|s| entropy_uniform(s.len())).collect()
    }

    #[must_use]
    pub fn history(&self) -> &[TrajectoryStep] {
        &self.history
    }

    /// What to do at the current state
    pub fn outcome(&mut self) -> Outcome {
        let state = self.state().clone();
        if let [only] = state.members() {
            return Outcome::Identified(self.oracle.items().id(*only).to_string());
        }

        let solution = self.oracle.solve(&state);
        let items = self.oracle.items();
        let Some(attribute) = solution.attribute else {
            return Outcome::Indistinguishable(
                state.iter().map(|i| items.id(i).to_string()).collect(),
            );
        };

        let options = answer_distribution(items, &state, attribute)
            .into_iter()
            .map(|(code, count)| AnswerOption {
                value: items.value_name(attribute, code).to_string(),
                code,
                count,
            })
            .collect();

        Outcome::Asking(Question {
            attribute,
            name: items.attribute_name(attribute).to_string(),
            expected_cost: solution.cost,
            options,
        })
    }

    /// Answer the pending question with the option at `choice`
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestion` when the state is terminal and
    /// `UnknownAnswer` when `choice` is out of range.
    pub fn answer(&mut self, choice: usize) -> Result<Outcome, SessionError> {
        let Outcome::Asking(question) = self.outcome() else {
            return Err(SessionError::NoQuestion);
        };
        let option = question
            .options
            .get(choice)
            .ok_or_else(|| SessionError::UnknownAnswer((choice + 1).to_string()))?;

        let before = self.state();
        let candidates_before = before.len();
        let narrowed = restrict(self.oracle.items(), before, question.attribute, option.code);

        self.history.push(TrajectoryStep {
            attribute: question.name.clone(),
            answer: option.value.clone(),
            candidates_before,
            candidates_after: narrowed.len(),
        });
        self.states.push(narrowed);

        Ok(self.outcome())
    }

    /// Answer by value name or by 1-based option number
    ///
    /// Value names match exactly first, then case-insensitively.
    ///
    /// # Errors
    ///
    /// Same as [`Session::answer`].
    pub fn answer_by_text(&mut self, text: &str) -> Result<Outcome, SessionError> {
        let Outcome::Asking(question) = self.outcome() else {
            return Err(SessionError::NoQuestion);
        };
        let text = text.trim();

        let choice = question
            .options
            .iter()
            .position(|option| option.value == text)
            .or_else(|| {
                question
                    .options
                    .iter()
                    .position(|option| option.value.eq_ignore_ascii_case(text))
            })
            .or_else(|| {
                text.parse::<usize>()
                    .ok()
                    .filter(|&n| (1..=question.options.len()).contains(&n))
                    .map(|n| n - 1)
            })
            .ok_or_else(|| SessionError::UnknownAnswer(text.to_string()))?;

        self.answer(choice)
    }

    /// Drop the last answer; false when nothing has been answered
    pub fn undo(&mut self) -> bool {
        if self.history.pop().is_some() {
            self.states.pop();
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.states.truncate(1);
        self.history.clear();
    }
}
