use crate::{
    error::{AppError, AppResult},
    models::{Anime, AnswerSet},
};

/// How many titles a scoring pass returns
pub const TOP_N: usize = 6;

// Additive score weights. All applicable rules fire; only the rating tiers
// are mutually exclusive.
const BEGINNER_PICK_BONUS: i32 = 35;
const BEGINNER_SHORT_BONUS: i32 = 20;
const BEGINNER_EPISODE_LIMIT: u32 = 50;
const VETERAN_LONG_BONUS: i32 = 10;
const VETERAN_ACCLAIM_BONUS: i32 = 15;
const GENRE_MATCH_BONUS: i32 = 30;
const LENGTH_MATCH_BONUS: i32 = 25;
const LENGTH_ANY_BONUS: i32 = 10;
const TONE_MATCH_BONUS: i32 = 20;
const EMOTIONAL_MATCH_BONUS: i32 = 15;
const RATING_TOP_BONUS: i32 = 15;
const RATING_HIGH_BONUS: i32 = 10;
const RATING_GOOD_BONUS: i32 = 5;

/// Titles that work as first anime, matched case-insensitively by substring
const BEGINNER_PICKS: &[&str] = &[
    "my hero academia",
    "demon slayer",
    "your name",
    "spirited away",
    "fullmetal alchemist",
    "one punch man",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Experience {
    New,
    Casual,
    Experienced,
    Veteran,
}

impl Experience {
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "new" => Some(Self::New),
            "casual" => Some(Self::Casual),
            "experienced" => Some(Self::Experienced),
            "veteran" => Some(Self::Veteran),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreChoice {
    Action,
    Romance,
    Comedy,
    Fantasy,
    Thriller,
    SciFi,
}

impl GenreChoice {
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "action" => Some(Self::Action),
            "romance" => Some(Self::Romance),
            "comedy" => Some(Self::Comedy),
            "fantasy" => Some(Self::Fantasy),
            "thriller" => Some(Self::Thriller),
            "scifi" => Some(Self::SciFi),
            _ => None,
        }
    }

    pub fn value(self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Romance => "romance",
            Self::Comedy => "comedy",
            Self::Fantasy => "fantasy",
            Self::Thriller => "thriller",
            Self::SciFi => "scifi",
        }
    }

    /// Catalog genre tags considered equivalent to this quiz choice
    pub fn synonyms(self) -> &'static [&'static str] {
        match self {
            Self::Action => &["Action", "Adventure", "Military", "Martial Arts"],
            Self::Romance => &["Romance", "Drama"],
            Self::Comedy => &["Comedy", "Slice of Life"],
            Self::Fantasy => &["Fantasy", "Supernatural", "Magic"],
            Self::Thriller => &["Thriller", "Mystery", "Psychological"],
            Self::SciFi => &["Sci-Fi", "Mecha", "Space"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Lighthearted,
    Balanced,
    Serious,
    Dark,
}

impl Tone {
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "lighthearted" => Some(Self::Lighthearted),
            "balanced" => Some(Self::Balanced),
            "serious" => Some(Self::Serious),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    fn synonyms(self) -> &'static [&'static str] {
        match self {
            Self::Lighthearted => &["Comedy", "Slice of Life"],
            // A balanced tone fits everything, so it earns no bonus anywhere
            Self::Balanced => &[],
            Self::Serious => &["Drama"],
            Self::Dark => &["Thriller", "Horror", "Psychological"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthChoice {
    Movie,
    Short,
    Medium,
    Long,
    Any,
}

impl LengthChoice {
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "movie" => Some(Self::Movie),
            "short" => Some(Self::Short),
            "medium" => Some(Self::Medium),
            "long" => Some(Self::Long),
            "any" => Some(Self::Any),
            _ => None,
        }
    }

    fn contains(self, episodes: u32) -> bool {
        match self {
            Self::Movie => episodes <= 3,
            Self::Short => (12..=26).contains(&episodes),
            Self::Medium => (27..=100).contains(&episodes),
            Self::Long => episodes > 100,
            Self::Any => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    Fast,
    Moderate,
    Slow,
    Varied,
}

impl Pacing {
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "fast" => Some(Self::Fast),
            "moderate" => Some(Self::Moderate),
            "slow" => Some(Self::Slow),
            "varied" => Some(Self::Varied),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmotionalDepth {
    Light,
    Some,
    Deep,
    Heavy,
}

impl EmotionalDepth {
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "some" => Some(Self::Some),
            "deep" => Some(Self::Deep),
            "heavy" => Some(Self::Heavy),
            _ => None,
        }
    }

    fn synonyms(self) -> &'static [&'static str] {
        match self {
            Self::Light => &["Comedy", "Slice of Life"],
            Self::Some => &["Drama"],
            Self::Deep => &["Drama", "Romance"],
            Self::Heavy => &["Drama", "Tragedy", "Psychological"],
        }
    }
}

/// A complete, typed answer set, parsed once at submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceProfile {
    pub experience: Experience,
    pub genres: Vec<GenreChoice>,
    pub tone: Tone,
    pub length: LengthChoice,
    /// Collected for future use; carries no scoring weight
    pub pacing: Pacing,
    pub emotional: EmotionalDepth,
}

impl PreferenceProfile {
    /// Converts a recorded answer set into a typed profile.
    ///
    /// Fails with InvalidInput when an answer is missing or holds a value
    /// outside the question's option set.
    pub fn from_answers(answers: &AnswerSet) -> AppResult<Self> {
        let genres = answers
            .multiple("genres")
            .filter(|values| !values.is_empty())
            .ok_or_else(|| missing("genres"))?
            .iter()
            .map(|value| GenreChoice::from_value(value).ok_or_else(|| unknown("genres", value)))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self {
            experience: parse_single(answers, "experience", Experience::from_value)?,
            genres,
            tone: parse_single(answers, "tone", Tone::from_value)?,
            length: parse_single(answers, "length", LengthChoice::from_value)?,
            pacing: parse_single(answers, "pacing", Pacing::from_value)?,
            emotional: parse_single(answers, "emotional", EmotionalDepth::from_value)?,
        })
    }
}

fn parse_single<T>(
    answers: &AnswerSet,
    question_id: &str,
    parse: fn(&str) -> Option<T>,
) -> AppResult<T> {
    let value = answers.single(question_id).ok_or_else(|| missing(question_id))?;
    parse(value).ok_or_else(|| unknown(question_id, value))
}

fn missing(question_id: &str) -> AppError {
    AppError::InvalidInput(format!("missing answer for question '{}'", question_id))
}

fn unknown(question_id: &str, value: &str) -> AppError {
    AppError::InvalidInput(format!(
        "unknown value '{}' for question '{}'",
        value, question_id
    ))
}

/// Ranks the candidate pool against the profile and returns the top titles.
///
/// The sort is stable, so equal-score candidates keep their pool order and
/// the result is reproducible for identical inputs. Candidates are not
/// mutated; scores live only for the duration of the call.
pub fn recommend(pool: &[Anime], profile: &PreferenceProfile) -> Vec<Anime> {
    let mut scored: Vec<(i32, &Anime)> = pool
        .iter()
        .map(|anime| (score(anime, profile), anime))
        .collect();

    scored.sort_by_key(|(score, _)| std::cmp::Reverse(*score));

    scored
        .into_iter()
        .take(TOP_N)
        .map(|(_, anime)| anime.clone())
        .collect()
}

/// Computes one candidate's score. Rules are evaluated independently and
/// every applicable rule adds its bonus.
fn score(anime: &Anime, profile: &PreferenceProfile) -> i32 {
    let mut score = 0;

    match profile.experience {
        Experience::New => {
            if is_beginner_pick(&anime.title) {
                score += BEGINNER_PICK_BONUS;
            }
            if anime.episodes <= BEGINNER_EPISODE_LIMIT {
                score += BEGINNER_SHORT_BONUS;
            }
        }
        Experience::Veteran => {
            if anime.episodes > 100 {
                score += VETERAN_LONG_BONUS;
            }
            if anime.rating >= 8.5 {
                score += VETERAN_ACCLAIM_BONUS;
            }
        }
        Experience::Casual | Experience::Experienced => {}
    }

    for genre in &profile.genres {
        if matches_any(&anime.genres, genre.synonyms()) {
            score += GENRE_MATCH_BONUS;
        }
    }

    if profile.length == LengthChoice::Any {
        score += LENGTH_ANY_BONUS;
    } else if profile.length.contains(anime.episodes) {
        score += LENGTH_MATCH_BONUS;
    }

    if matches_any(&anime.genres, profile.tone.synonyms()) {
        score += TONE_MATCH_BONUS;
    }

    if matches_any(&anime.genres, profile.emotional.synonyms()) {
        score += EMOTIONAL_MATCH_BONUS;
    }

    // Highest applicable rating tier only
    if anime.rating >= 9.0 {
        score += RATING_TOP_BONUS;
    } else if anime.rating >= 8.5 {
        score += RATING_HIGH_BONUS;
    } else if anime.rating >= 8.0 {
        score += RATING_GOOD_BONUS;
    }

    score
}

fn matches_any(genres: &[String], synonyms: &[&str]) -> bool {
    genres
        .iter()
        .any(|genre| synonyms.iter().any(|s| genre.eq_ignore_ascii_case(s)))
}

fn is_beginner_pick(title: &str) -> bool {
    let title = title.to_lowercase();
    BEGINNER_PICKS.iter().any(|pick| title.contains(pick))
}
