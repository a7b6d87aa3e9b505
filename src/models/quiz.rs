use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::anime::Anime;

/// Maximum number of values a multiple-choice question may hold
pub const MULTI_SELECT_CAP: usize = 3;

/// How a question collects its answer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    Single,
    Multiple,
}

/// One selectable option of a quiz question
#[derive(Debug, Clone, Serialize)]
pub struct QuizOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// A quiz question; the catalog is fixed at compile time
#[derive(Debug, Clone, Serialize)]
pub struct QuizQuestion {
    pub id: &'static str,
    pub prompt: &'static str,
    pub mode: SelectionMode,
    pub options: &'static [QuizOption],
}

impl QuizQuestion {
    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }
}

/// The ordered question catalog
pub fn questions() -> &'static [QuizQuestion] {
    QUESTIONS
}

pub fn question_by_id(id: &str) -> Option<&'static QuizQuestion> {
    QUESTIONS.iter().find(|q| q.id == id)
}

static QUESTIONS: &[QuizQuestion] = &[
    QuizQuestion {
        id: "experience",
        prompt: "How familiar are you with anime?",
        mode: SelectionMode::Single,
        options: &[
            QuizOption {
                value: "new",
                label: "Complete beginner",
            },
            QuizOption {
                value: "casual",
                label: "Watched a few shows",
            },
            QuizOption {
                value: "experienced",
                label: "Pretty experienced",
            },
            QuizOption {
                value: "veteran",
                label: "Anime veteran",
            },
        ],
    },
    QuizQuestion {
        id: "genres",
        prompt: "What genres interest you most? (Select up to 3)",
        mode: SelectionMode::Multiple,
        options: &[
            QuizOption {
                value: "action",
                label: "Action & Adventure",
            },
            QuizOption {
                value: "romance",
                label: "Romance & Drama",
            },
            QuizOption {
                value: "comedy",
                label: "Comedy & Slice of Life",
            },
            QuizOption {
                value: "fantasy",
                label: "Fantasy & Supernatural",
            },
            QuizOption {
                value: "thriller",
                label: "Thriller & Mystery",
            },
            QuizOption {
                value: "scifi",
                label: "Sci-Fi & Mecha",
            },
        ],
    },
    QuizQuestion {
        id: "tone",
        prompt: "What tone do you prefer?",
        mode: SelectionMode::Single,
        options: &[
            QuizOption {
                value: "lighthearted",
                label: "Lighthearted and fun",
            },
            QuizOption {
                value: "balanced",
                label: "Mix of light and serious",
            },
            QuizOption {
                value: "serious",
                label: "Serious and dramatic",
            },
            QuizOption {
                value: "dark",
                label: "Dark and intense",
            },
        ],
    },
    QuizQuestion {
        id: "length",
        prompt: "How long of a series do you want?",
        mode: SelectionMode::Single,
        options: &[
            QuizOption {
                value: "movie",
                label: "Movies (1-3 hours)",
            },
            QuizOption {
                value: "short",
                label: "Short series (12-26 episodes)",
            },
            QuizOption {
                value: "medium",
                label: "Medium series (27-100 episodes)",
            },
            QuizOption {
                value: "long",
                label: "Long series (100+ episodes)",
            },
            QuizOption {
                value: "any",
                label: "No preference",
            },
        ],
    },
    QuizQuestion {
        id: "pacing",
        prompt: "What pacing do you prefer?",
        mode: SelectionMode::Single,
        options: &[
            QuizOption {
                value: "fast",
                label: "Fast-paced with lots of action",
            },
            QuizOption {
                value: "moderate",
                label: "Moderate pace with good balance",
            },
            QuizOption {
                value: "slow",
                label: "Slow burn with character development",
            },
            QuizOption {
                value: "varied",
                label: "Doesn't matter to me",
            },
        ],
    },
    QuizQuestion {
        id: "emotional",
        prompt: "How much emotional depth do you want?",
        mode: SelectionMode::Single,
        options: &[
            QuizOption {
                value: "light",
                label: "Keep it fun and light",
            },
            QuizOption {
                value: "some",
                label: "Some emotional moments",
            },
            QuizOption {
                value: "deep",
                label: "Deep emotional storytelling",
            },
            QuizOption {
                value: "heavy",
                label: "Heavy themes and complex emotions",
            },
        ],
    },
];

/// A recorded answer: one value for single-choice, up to three for
/// multiple-choice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Answer {
    Single(String),
    Multiple(Vec<String>),
}

/// Errors from recording an answer
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("unknown question: {0}")]
    UnknownQuestion(String),
    #[error("unknown option '{value}' for question {question}")]
    UnknownOption { question: String, value: String },
}

/// The answers one user has recorded so far, keyed by question id
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct AnswerSet {
    #[serde(flatten)]
    recorded: HashMap<String, Answer>,
}

impl AnswerSet {
    /// Applies one selection to a question.
    ///
    /// Single-choice questions overwrite the previous value. Multiple-choice
    /// questions toggle: a present value is removed (never blocked), an
    /// absent value is added unless the selection already holds
    /// MULTI_SELECT_CAP values, in which case the selection is a no-op.
    pub fn select(&mut self, question: &QuizQuestion, value: &str) {
        match question.mode {
            SelectionMode::Single => {
                self.recorded
                    .insert(question.id.to_string(), Answer::Single(value.to_string()));
            }
            SelectionMode::Multiple => {
                let entry = self
                    .recorded
                    .entry(question.id.to_string())
                    .or_insert_with(|| Answer::Multiple(Vec::new()));
                if let Answer::Multiple(values) = entry {
                    if let Some(pos) = values.iter().position(|v| v == value) {
                        values.remove(pos);
                    } else if values.len() < MULTI_SELECT_CAP {
                        values.push(value.to_string());
                    }
                }
            }
        }
    }

    /// Whether the question holds a valid answer (non-empty for
    /// multiple-choice)
    pub fn answered(&self, question: &QuizQuestion) -> bool {
        match self.recorded.get(question.id) {
            Some(Answer::Single(_)) => true,
            Some(Answer::Multiple(values)) => !values.is_empty(),
            None => false,
        }
    }

    pub fn single(&self, question_id: &str) -> Option<&str> {
        match self.recorded.get(question_id) {
            Some(Answer::Single(value)) => Some(value),
            _ => None,
        }
    }

    pub fn multiple(&self, question_id: &str) -> Option<&[String]> {
        match self.recorded.get(question_id) {
            Some(Answer::Multiple(values)) => Some(values),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.recorded.clear();
    }
}

/// Where the user is in the quiz traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalState {
    Asking(usize),
    Complete,
}

/// One user's quiz traversal: current position, recorded answers, and the
/// recommendations produced at completion.
///
/// The generation counter increments on every reset so that a scoring pass
/// started before the reset can be detected as stale and discarded.
#[derive(Debug, Clone)]
pub struct QuizSession {
    state: TraversalState,
    answers: AnswerSet,
    generation: u64,
    recommendations: Option<Vec<Anime>>,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    pub fn new() -> Self {
        Self {
            state: TraversalState::Asking(0),
            answers: AnswerSet::default(),
            generation: 0,
            recommendations: None,
        }
    }

    pub fn state(&self) -> TraversalState {
        self.state
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn recommendations(&self) -> Option<&[Anime]> {
        self.recommendations.as_deref()
    }

    pub fn is_complete(&self) -> bool {
        self.state == TraversalState::Complete
    }

    /// The question currently being asked, None once complete
    pub fn current_question(&self) -> Option<&'static QuizQuestion> {
        match self.state {
            TraversalState::Asking(index) => questions().get(index),
            TraversalState::Complete => None,
        }
    }

    /// Records one selection after validating the question and option value
    pub fn select(&mut self, question_id: &str, value: &str) -> Result<(), QuizError> {
        let question = question_by_id(question_id)
            .ok_or_else(|| QuizError::UnknownQuestion(question_id.to_string()))?;
        if !question.has_option(value) {
            return Err(QuizError::UnknownOption {
                question: question_id.to_string(),
                value: value.to_string(),
            });
        }
        self.answers.select(question, value);
        Ok(())
    }

    /// Whether the current question holds a valid answer
    pub fn can_advance(&self) -> bool {
        match self.state {
            TraversalState::Asking(index) => questions()
                .get(index)
                .map(|q| self.answers.answered(q))
                .unwrap_or(false),
            TraversalState::Complete => false,
        }
    }

    /// Moves to the next question, or to Complete from the last one.
    ///
    /// Returns false (and stays put) when the current question is
    /// unanswered; the guard is not an error.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        if let TraversalState::Asking(index) = self.state {
            self.state = if index + 1 == questions().len() {
                TraversalState::Complete
            } else {
                TraversalState::Asking(index + 1)
            };
            return true;
        }
        false
    }

    /// Moves back one question, preserving recorded answers
    pub fn retreat(&mut self) -> bool {
        match self.state {
            TraversalState::Asking(index) if index > 0 => {
                self.state = TraversalState::Asking(index - 1);
                true
            }
            _ => false,
        }
    }

    /// Clears all answers and restarts the traversal. Bumping the generation
    /// invalidates any scoring pass still in flight for the old answers.
    pub fn reset(&mut self) {
        self.state = TraversalState::Asking(0);
        self.answers.clear();
        self.generation += 1;
        self.recommendations = None;
    }

    /// Commits a finished scoring pass, but only if the session has not been
    /// reset since the pass started. Returns whether the commit happened.
    pub fn store_recommendations(&mut self, generation: u64, ranked: Vec<Anime>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.recommendations = Some(ranked);
        true
    }
}
