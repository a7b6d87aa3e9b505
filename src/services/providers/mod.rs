/// Catalog data provider abstraction
///
/// The candidate pool can be sourced from the remote Jikan API or from the
/// built-in fixture catalog; both sit behind this trait so assembly and the
/// browse endpoints never care which one is configured.
use crate::{error::AppResult, models::Anime, services::scoring::GenreChoice};

pub mod builtin;
pub mod jikan;

/// Trait for catalog providers
///
/// Each operation is bounded and fails independently; a failed call degrades
/// to an empty contribution during candidate assembly rather than aborting
/// the scoring pass.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetch up to `limit` top-rated titles
    async fn fetch_top(&self, limit: usize) -> AppResult<Vec<Anime>>;

    /// Fetch up to `limit` titles for a quiz genre choice, best-rated first
    async fn fetch_by_genre(&self, genre: GenreChoice, limit: usize) -> AppResult<Vec<Anime>>;

    /// Free-text search over the catalog
    async fn search(&self, query: &str, limit: usize) -> AppResult<Vec<Anime>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
