use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{questions, Anime, AnswerSet, QuizQuestion, QuizSession, TraversalState};
use crate::services::{
    assembly,
    scoring::{self, GenreChoice, PreferenceProfile},
};

use super::AppState;

/// Default page size for the catalog browse endpoints
const DEFAULT_BROWSE_LIMIT: usize = 25;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct CreateQuizResponse {
    pub id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub question_id: String,
    pub value: String,
}

/// Snapshot of one quiz session handed to the presentation layer
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub complete: bool,
    pub question_index: Option<usize>,
    pub question_count: usize,
    pub question: Option<&'static QuizQuestion>,
    pub answers: AnswerSet,
    pub can_advance: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<Anime>>,
}

impl SessionView {
    fn of(id: Uuid, session: &QuizSession) -> Self {
        let question_index = match session.state() {
            TraversalState::Asking(index) => Some(index),
            TraversalState::Complete => None,
        };

        Self {
            id,
            complete: session.is_complete(),
            question_index,
            question_count: questions().len(),
            question: session.current_question(),
            answers: session.answers().clone(),
            can_advance: session.can_advance(),
            recommendations: session.recommendations().map(|r| r.to_vec()),
        }
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Get top-rated titles from the configured catalog
pub async fn top_titles(
    State(state): State<AppState>,
    Query(params): Query<LimitQuery>,
) -> AppResult<Json<Vec<Anime>>> {
    let limit = params.limit.unwrap_or(DEFAULT_BROWSE_LIMIT);
    let titles = state.provider.fetch_top(limit).await?;
    Ok(Json(titles))
}

/// Free-text title search
pub async fn search_titles(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<Anime>>> {
    let limit = params.limit.unwrap_or(DEFAULT_BROWSE_LIMIT);
    let titles = state.provider.search(&params.q, limit).await?;
    Ok(Json(titles))
}

/// Titles for one quiz genre choice
pub async fn titles_by_genre(
    State(state): State<AppState>,
    Path(genre): Path<String>,
    Query(params): Query<LimitQuery>,
) -> AppResult<Json<Vec<Anime>>> {
    let genre = GenreChoice::from_value(&genre)
        .ok_or_else(|| AppError::InvalidInput(format!("unknown genre '{}'", genre)))?;
    let limit = params.limit.unwrap_or(DEFAULT_BROWSE_LIMIT);
    let titles = state.provider.fetch_by_genre(genre, limit).await?;
    Ok(Json(titles))
}

/// The fixed question catalog
pub async fn get_questions() -> Json<&'static [QuizQuestion]> {
    Json(questions())
}

/// Start a new quiz session
pub async fn create_quiz(State(state): State<AppState>) -> (StatusCode, Json<CreateQuizResponse>) {
    let id = Uuid::new_v4();

    let mut inner = state.inner.write().await;
    inner.sessions.insert(id, QuizSession::new());

    tracing::info!(session_id = %id, "Quiz session created");

    (StatusCode::CREATED, Json(CreateQuizResponse { id }))
}

/// Current traversal state of one session
pub async fn get_quiz(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SessionView>> {
    let inner = state.inner.read().await;
    let session = inner
        .sessions
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("quiz session {}", id)))?;
    Ok(Json(SessionView::of(id, session)))
}

/// Record one answer selection
pub async fn record_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AnswerRequest>,
) -> AppResult<Json<SessionView>> {
    let mut inner = state.inner.write().await;
    let session = inner
        .sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("quiz session {}", id)))?;

    session
        .select(&request.question_id, &request.value)
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;

    Ok(Json(SessionView::of(id, session)))
}

/// Advance the traversal; completing the last question runs scoring.
///
/// An unanswered current question leaves the session untouched (the guard is
/// silent; the view's can_advance flag tells the UI to disable the action).
pub async fn advance_quiz(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SessionView>> {
    // First pass under the lock: apply the transition and snapshot the
    // answers if scoring is due
    let (answers, generation) = {
        let mut inner = state.inner.write().await;
        let session = inner
            .sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("quiz session {}", id)))?;

        session.advance();

        if !session.is_complete() || session.recommendations().is_some() {
            return Ok(Json(SessionView::of(id, session)));
        }

        (session.answers().clone(), session.generation())
    };

    // Assemble and score without holding the session lock
    let profile = PreferenceProfile::from_answers(&answers)?;
    let pool = assembly::assemble_candidates(state.provider.as_ref(), &profile.genres).await;
    let ranked = scoring::recommend(&pool, &profile);

    tracing::info!(
        session_id = %id,
        pool_size = pool.len(),
        results = ranked.len(),
        "Quiz scoring completed"
    );

    // Second pass: commit unless the session was reset meanwhile
    let mut inner = state.inner.write().await;
    let session = inner
        .sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("quiz session {}", id)))?;

    if !session.store_recommendations(generation, ranked) {
        tracing::warn!(session_id = %id, "Discarding scoring results for a reset session");
        return Err(AppError::Conflict(
            "quiz was reset while scoring was in flight".to_string(),
        ));
    }

    Ok(Json(SessionView::of(id, session)))
}

/// Step back one question, keeping recorded answers
pub async fn retreat_quiz(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SessionView>> {
    let mut inner = state.inner.write().await;
    let session = inner
        .sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("quiz session {}", id)))?;

    session.retreat();

    Ok(Json(SessionView::of(id, session)))
}

/// Clear all answers and restart the traversal
pub async fn reset_quiz(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SessionView>> {
    let mut inner = state.inner.write().await;
    let session = inner
        .sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("quiz session {}", id)))?;

    session.reset();

    Ok(Json(SessionView::of(id, session)))
}
