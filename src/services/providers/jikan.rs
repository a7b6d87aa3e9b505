use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::{Anime, JikanListResponse},
    services::{providers::CatalogProvider, scoring::GenreChoice},
};

/// Jikan caps list endpoints at 25 items per request
const MAX_PAGE_SIZE: usize = 25;
/// Per-request timeout; the Jikan boundary owns its own timeout policy
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Catalog provider backed by the Jikan (MyAnimeList) public API
#[derive(Clone)]
pub struct JikanProvider {
    http_client: HttpClient,
    base_url: String,
}

impl JikanProvider {
    pub fn new(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
        }
    }

    /// MAL genre id for a quiz genre choice
    fn mal_genre_id(genre: GenreChoice) -> u32 {
        match genre {
            GenreChoice::Action => 1,
            GenreChoice::Romance => 22,
            GenreChoice::Comedy => 4,
            GenreChoice::Fantasy => 10,
            GenreChoice::Thriller => 41,
            GenreChoice::SciFi => 24,
        }
    }

    async fn fetch_list(&self, url: &str, query: &[(&str, String)]) -> AppResult<Vec<Anime>> {
        let response = self
            .http_client
            .get(url)
            .timeout(REQUEST_TIMEOUT)
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Jikan API returned status {}: {}",
                status, body
            )));
        }

        let list: JikanListResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Failed to parse Jikan response: {}", e)))?;

        Ok(list.data.into_iter().map(Anime::from).collect())
    }
}

#[async_trait::async_trait]
impl CatalogProvider for JikanProvider {
    async fn fetch_top(&self, limit: usize) -> AppResult<Vec<Anime>> {
        let url = format!("{}/top/anime", self.base_url);
        let limit = limit.min(MAX_PAGE_SIZE);

        let titles = self
            .fetch_list(&url, &[("limit", limit.to_string())])
            .await?;

        tracing::info!(
            results = titles.len(),
            provider = "jikan",
            "Top-rated fetch completed"
        );

        Ok(titles)
    }

    async fn fetch_by_genre(&self, genre: GenreChoice, limit: usize) -> AppResult<Vec<Anime>> {
        let url = format!("{}/anime", self.base_url);
        let limit = limit.min(MAX_PAGE_SIZE);

        let titles = self
            .fetch_list(
                &url,
                &[
                    ("genres", Self::mal_genre_id(genre).to_string()),
                    ("limit", limit.to_string()),
                    ("order_by", "score".to_string()),
                    ("sort", "desc".to_string()),
                ],
            )
            .await?;

        tracing::info!(
            genre = genre.value(),
            results = titles.len(),
            provider = "jikan",
            "Genre fetch completed"
        );

        Ok(titles)
    }

    async fn search(&self, query: &str, limit: usize) -> AppResult<Vec<Anime>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let url = format!("{}/anime", self.base_url);
        let limit = limit.min(MAX_PAGE_SIZE);

        let titles = self
            .fetch_list(
                &url,
                &[
                    ("q", query.to_string()),
                    ("limit", limit.to_string()),
                    ("order_by", "score".to_string()),
                    ("sort", "desc".to_string()),
                ],
            )
            .await?;

        tracing::info!(
            query = %query,
            results = titles.len(),
            provider = "jikan",
            "Title search completed"
        );

        Ok(titles)
    }

    fn name(&self) -> &'static str {
        "jikan"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mal_genre_id_mapping() {
        assert_eq!(JikanProvider::mal_genre_id(GenreChoice::Action), 1);
        assert_eq!(JikanProvider::mal_genre_id(GenreChoice::Romance), 22);
        assert_eq!(JikanProvider::mal_genre_id(GenreChoice::Comedy), 4);
        assert_eq!(JikanProvider::mal_genre_id(GenreChoice::Fantasy), 10);
        assert_eq!(JikanProvider::mal_genre_id(GenreChoice::Thriller), 41);
        assert_eq!(JikanProvider::mal_genre_id(GenreChoice::SciFi), 24);
    }

    #[tokio::test]
    async fn test_search_rejects_empty_query() {
        let provider = JikanProvider::new("http://test.local".to_string());
        let result = provider.search("   ", 10).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
