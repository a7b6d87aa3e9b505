use serde::{Deserialize, Serialize};

/// Lifecycle status of a series
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AiringStatus {
    Completed,
    Ongoing,
    Upcoming,
}

/// Represents one anime title in the catalog
///
/// Records are immutable once handed to candidate assembly; missing fields
/// from the external source are filled with sentinel defaults at conversion
/// time (rating 0, year 0, episodes 0) rather than failing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Anime {
    /// MyAnimeList id for fetched titles, small fixed ids for the built-in set
    pub id: u64,
    pub title: String,
    /// Community score in [0, 10], 0 meaning unrated
    pub rating: f64,
    /// Release year, 0 when unknown
    pub year: i32,
    pub genres: Vec<String>,
    pub summary: String,
    pub image: String,
    /// Episode count, 0 when unknown; 1 typically denotes a film
    pub episodes: u32,
    pub status: AiringStatus,
}

// ============================================================================
// Jikan API Types
// ============================================================================

/// Raw anime record from the Jikan API
#[derive(Debug, Clone, Deserialize)]
pub struct JikanAnime {
    pub mal_id: u64,
    pub title: String,
    #[serde(default)]
    pub title_english: Option<String>,
    #[serde(default)]
    pub images: Option<JikanImages>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub genres: Vec<JikanGenre>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub episodes: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JikanImages {
    pub jpg: JikanImageSet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JikanImageSet {
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub large_image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JikanGenre {
    pub mal_id: u64,
    pub name: String,
}

/// Envelope for Jikan list endpoints
#[derive(Debug, Deserialize)]
pub struct JikanListResponse {
    pub data: Vec<JikanAnime>,
}

impl From<JikanAnime> for Anime {
    fn from(raw: JikanAnime) -> Self {
        // English title preferred for display, as the original catalog did
        let title = raw.title_english.unwrap_or(raw.title);

        let image = raw
            .images
            .and_then(|i| i.jpg.large_image_url.or(i.jpg.image_url))
            .unwrap_or_else(|| "/placeholder.svg".to_string());

        let status = match raw.status.as_deref() {
            Some("Currently Airing") => AiringStatus::Ongoing,
            Some("Finished Airing") => AiringStatus::Completed,
            _ => AiringStatus::Upcoming,
        };

        Anime {
            id: raw.mal_id,
            title,
            rating: raw.score.unwrap_or(0.0),
            year: raw.year.unwrap_or(0),
            genres: raw.genres.into_iter().map(|g| g.name).collect(),
            summary: raw
                .synopsis
                .unwrap_or_else(|| "No summary available.".to_string()),
            image,
            episodes: raw.episodes.unwrap_or(0),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_anime() -> JikanAnime {
        JikanAnime {
            mal_id: 5114,
            title: "Hagane no Renkinjutsushi".to_string(),
            title_english: Some("Fullmetal Alchemist: Brotherhood".to_string()),
            images: Some(JikanImages {
                jpg: JikanImageSet {
                    image_url: Some("https://cdn.example/small.jpg".to_string()),
                    large_image_url: Some("https://cdn.example/large.jpg".to_string()),
                },
            }),
            score: Some(9.1),
            year: Some(2009),
            genres: vec![
                JikanGenre {
                    mal_id: 1,
                    name: "Action".to_string(),
                },
                JikanGenre {
                    mal_id: 2,
                    name: "Adventure".to_string(),
                },
            ],
            synopsis: Some("Two brothers search for the Philosopher's Stone.".to_string()),
            episodes: Some(64),
            status: Some("Finished Airing".to_string()),
        }
    }

    #[test]
    fn test_conversion_prefers_english_title() {
        let anime: Anime = raw_anime().into();
        assert_eq!(anime.id, 5114);
        assert_eq!(anime.title, "Fullmetal Alchemist: Brotherhood");
        assert_eq!(anime.rating, 9.1);
        assert_eq!(anime.year, 2009);
        assert_eq!(anime.genres, vec!["Action", "Adventure"]);
        assert_eq!(anime.episodes, 64);
        assert_eq!(anime.status, AiringStatus::Completed);
        assert_eq!(anime.image, "https://cdn.example/large.jpg");
    }

    #[test]
    fn test_conversion_applies_sentinel_defaults() {
        let raw = JikanAnime {
            mal_id: 99,
            title: "Unknown Show".to_string(),
            title_english: None,
            images: None,
            score: None,
            year: None,
            genres: vec![],
            synopsis: None,
            episodes: None,
            status: None,
        };

        let anime: Anime = raw.into();
        assert_eq!(anime.title, "Unknown Show");
        assert_eq!(anime.rating, 0.0);
        assert_eq!(anime.year, 0);
        assert!(anime.genres.is_empty());
        assert_eq!(anime.summary, "No summary available.");
        assert_eq!(anime.image, "/placeholder.svg");
        assert_eq!(anime.episodes, 0);
        assert_eq!(anime.status, AiringStatus::Upcoming);
    }

    #[test]
    fn test_conversion_status_ongoing() {
        let mut raw = raw_anime();
        raw.status = Some("Currently Airing".to_string());
        let anime: Anime = raw.into();
        assert_eq!(anime.status, AiringStatus::Ongoing);
    }

    #[test]
    fn test_conversion_falls_back_to_small_image() {
        let mut raw = raw_anime();
        raw.images = Some(JikanImages {
            jpg: JikanImageSet {
                image_url: Some("https://cdn.example/small.jpg".to_string()),
                large_image_url: None,
            },
        });
        let anime: Anime = raw.into();
        assert_eq!(anime.image, "https://cdn.example/small.jpg");
    }

    #[test]
    fn test_jikan_list_deserialization() {
        let json = r#"{
            "data": [
                {
                    "mal_id": 16498,
                    "title": "Shingeki no Kyojin",
                    "title_english": "Attack on Titan",
                    "images": { "jpg": { "image_url": "https://cdn.example/aot.jpg" } },
                    "score": 8.56,
                    "year": 2013,
                    "genres": [
                        { "mal_id": 1, "name": "Action" },
                        { "mal_id": 8, "name": "Drama" }
                    ],
                    "synopsis": "Humanity fights for survival.",
                    "episodes": 25,
                    "status": "Finished Airing"
                }
            ],
            "pagination": { "has_next_page": true, "current_page": 1 }
        }"#;

        let response: JikanListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.data.len(), 1);
        let anime: Anime = response.data.into_iter().next().unwrap().into();
        assert_eq!(anime.id, 16498);
        assert_eq!(anime.title, "Attack on Titan");
        assert_eq!(anime.genres, vec!["Action", "Drama"]);
    }
}
