use std::cmp::Ordering;

use crate::{
    error::{AppError, AppResult},
    models::{AiringStatus, Anime},
    services::{providers::CatalogProvider, scoring::GenreChoice},
};

/// Catalog provider backed by a fixed in-memory title set.
///
/// Useful for offline development and tests; never fails. Search matches
/// case-insensitively against title, summary, and genre tags.
pub struct BuiltinCatalog {
    titles: Vec<Anime>,
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinCatalog {
    pub fn new() -> Self {
        Self {
            titles: fixture_titles(),
        }
    }

    fn by_rating_desc(mut titles: Vec<Anime>) -> Vec<Anime> {
        titles.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal));
        titles
    }
}

#[async_trait::async_trait]
impl CatalogProvider for BuiltinCatalog {
    async fn fetch_top(&self, limit: usize) -> AppResult<Vec<Anime>> {
        let mut titles = Self::by_rating_desc(self.titles.clone());
        titles.truncate(limit);
        Ok(titles)
    }

    async fn fetch_by_genre(&self, genre: GenreChoice, limit: usize) -> AppResult<Vec<Anime>> {
        let synonyms = genre.synonyms();
        let matching: Vec<Anime> = self
            .titles
            .iter()
            .filter(|anime| {
                anime
                    .genres
                    .iter()
                    .any(|g| synonyms.iter().any(|s| g.eq_ignore_ascii_case(s)))
            })
            .cloned()
            .collect();

        let mut titles = Self::by_rating_desc(matching);
        titles.truncate(limit);
        Ok(titles)
    }

    async fn search(&self, query: &str, limit: usize) -> AppResult<Vec<Anime>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let needle = query.to_lowercase();
        let mut titles: Vec<Anime> = self
            .titles
            .iter()
            .filter(|anime| {
                anime.title.to_lowercase().contains(&needle)
                    || anime.summary.to_lowercase().contains(&needle)
                    || anime
                        .genres
                        .iter()
                        .any(|g| g.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        titles.truncate(limit);
        Ok(titles)
    }

    fn name(&self) -> &'static str {
        "builtin"
    }
}

fn fixture_titles() -> Vec<Anime> {
    fn entry(
        id: u64,
        title: &str,
        rating: f64,
        year: i32,
        genres: &[&str],
        summary: &str,
        image: &str,
        episodes: u32,
        status: AiringStatus,
    ) -> Anime {
        Anime {
            id,
            title: title.to_string(),
            rating,
            year,
            genres: genres.iter().map(|g| g.to_string()).collect(),
            summary: summary.to_string(),
            image: image.to_string(),
            episodes,
            status,
        }
    }

    vec![
        entry(
            1,
            "Attack on Titan",
            9.0,
            2013,
            &["Action", "Drama", "Fantasy"],
            "Humanity fights for survival against giant humanoid Titans behind massive walls.",
            "/assets/attack-on-titan.jpg",
            87,
            AiringStatus::Completed,
        ),
        entry(
            2,
            "Demon Slayer",
            8.7,
            2019,
            &["Action", "Supernatural", "Historical"],
            "A young boy becomes a demon slayer to save his sister who was turned into a demon.",
            "/assets/demon-slayer.jpg",
            32,
            AiringStatus::Ongoing,
        ),
        entry(
            3,
            "Your Name",
            8.4,
            2016,
            &["Romance", "Drama", "Supernatural"],
            "Two teenagers share a profound, magical connection upon discovering they are swapping bodies.",
            "/assets/your-name.jpg",
            1,
            AiringStatus::Completed,
        ),
        entry(
            4,
            "Spirited Away",
            9.3,
            2001,
            &["Adventure", "Family", "Fantasy"],
            "A young girl enters a world of spirits and witches, where humans are changed into beasts.",
            "/assets/spirited-away.jpg",
            1,
            AiringStatus::Completed,
        ),
        entry(
            5,
            "One Piece",
            9.1,
            1999,
            &["Action", "Adventure", "Comedy"],
            "Monkey D. Luffy explores the Grand Line with his diverse crew of pirates, the Straw Hats.",
            "/assets/one-piece.jpg",
            1000,
            AiringStatus::Ongoing,
        ),
        entry(
            6,
            "Jujutsu Kaisen",
            8.6,
            2020,
            &["Action", "School", "Supernatural"],
            "A high school student joins a secret organization of Jujutsu Sorcerers to eliminate Cursed Spirits.",
            "/assets/jujutsu-kaisen.jpg",
            24,
            AiringStatus::Ongoing,
        ),
        entry(
            7,
            "My Hero Academia",
            8.5,
            2016,
            &["Action", "School", "Superhero"],
            "A boy born without superpowers in a superhuman society enrolls in a prestigious hero academy.",
            "/assets/my-hero-academia.jpg",
            138,
            AiringStatus::Ongoing,
        ),
        entry(
            8,
            "Death Note",
            9.0,
            2006,
            &["Thriller", "Supernatural", "Psychological"],
            "A high school student finds a supernatural notebook that can kill anyone whose name is written in it.",
            "/assets/death-note.jpg",
            37,
            AiringStatus::Completed,
        ),
        entry(
            9,
            "Naruto",
            8.4,
            2002,
            &["Action", "Adventure", "Ninja"],
            "A young ninja seeks recognition from his peers and dreams of becoming the village leader.",
            "/assets/naruto.jpg",
            720,
            AiringStatus::Completed,
        ),
        entry(
            10,
            "Dragon Ball Z",
            8.8,
            1989,
            &["Action", "Adventure", "Martial Arts"],
            "Goku and his friends defend Earth against powerful villains and otherworldly threats.",
            "/assets/dragon-ball-z.jpg",
            291,
            AiringStatus::Completed,
        ),
    ]
}
