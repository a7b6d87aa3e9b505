use std::collections::HashSet;

use crate::{
    models::Anime,
    services::{providers::CatalogProvider, scoring::GenreChoice},
};

/// Titles requested per selected genre
const GENRE_FETCH_LIMIT: usize = 12;
/// Only the first two selected genres drive sourcing
const GENRE_SOURCES_MAX: usize = 2;
/// Below this pool size the top-rated fallback kicks in
const POOL_TARGET: usize = 20;
/// Titles requested from the top-rated fallback
const FALLBACK_FETCH_LIMIT: usize = 25;

/// Builds the candidate pool for one scoring pass.
///
/// Requests are issued sequentially and merged in a fixed order (genre 1,
/// genre 2, top-rated fallback) so the pool is reproducible regardless of
/// provider latency. A failed request contributes nothing and assembly
/// continues; an empty pool is a valid result.
pub async fn assemble_candidates(
    provider: &dyn CatalogProvider,
    genres: &[GenreChoice],
) -> Vec<Anime> {
    let mut pool = Vec::new();

    for genre in genres.iter().take(GENRE_SOURCES_MAX) {
        match provider.fetch_by_genre(*genre, GENRE_FETCH_LIMIT).await {
            Ok(titles) => pool.extend(titles),
            Err(e) => {
                tracing::warn!(
                    genre = genre.value(),
                    error = %e,
                    "Genre fetch failed, continuing with partial pool"
                );
            }
        }
    }

    if pool.len() < POOL_TARGET {
        match provider.fetch_top(FALLBACK_FETCH_LIMIT).await {
            Ok(titles) => pool.extend(titles),
            Err(e) => {
                tracing::warn!(error = %e, "Top-rated fallback fetch failed");
            }
        }
    }

    let pool = dedup_by_id(pool);

    tracing::info!(
        pool_size = pool.len(),
        genre_count = genres.len().min(GENRE_SOURCES_MAX),
        provider = provider.name(),
        "Candidate pool assembled"
    );

    pool
}

/// Drops later duplicates by id, keeping first-occurrence order
fn dedup_by_id(pool: Vec<Anime>) -> Vec<Anime> {
    let mut seen = HashSet::new();
    pool.into_iter()
        .filter(|anime| seen.insert(anime.id))
        .collect()
}
