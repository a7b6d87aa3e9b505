pub mod anime;
pub mod quiz;

pub use anime::{AiringStatus, Anime, JikanAnime, JikanGenre, JikanImageSet, JikanImages, JikanListResponse};
pub use quiz::{
    question_by_id, questions, Answer, AnswerSet, QuizError, QuizOption, QuizQuestion, QuizSession,
    SelectionMode, TraversalState, MULTI_SELECT_CAP,
};
