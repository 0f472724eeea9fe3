// src/site/genres.rs
//! The fixed table of genres and the content database behind each.

use crate::error::AppError;
use crate::types::{DatabaseId, ValidationError};

/// Genres the site publishes: key, display title, and the environment
/// variable naming its database.
pub const KNOWN_GENRES: &[(&str, &str, &str)] = &[
    ("ai", "AI", "NOTION_AI_DATABASE_ID"),
    ("design", "Design", "NOTION_DESIGN_DATABASE_ID"),
    ("time", "Time", "NOTION_TIME_DATABASE_ID"),
    ("tech", "Tech", "NOTION_TECH_DATABASE_ID"),
];

/// Genre whose database answers for keys the table does not know.
pub const DEFAULT_GENRE: &str = "ai";

/// One genre of the blog.
#[derive(Debug, Clone, PartialEq)]
pub struct Genre {
    pub key: String,
    pub title: String,
    pub database: DatabaseId,
}

impl Genre {
    pub fn new(key: impl Into<String>, title: impl Into<String>, database: DatabaseId) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            database,
        }
    }
}

/// Immutable genre → database lookup, loaded once at start-up.
#[derive(Debug, Clone)]
pub struct GenreTable {
    genres: Vec<Genre>,
    default_index: usize,
}

impl GenreTable {
    /// Builds a table from `genres`, in publishing order. `default_key` must
    /// name one of them.
    pub fn new(genres: Vec<Genre>, default_key: &str) -> Result<Self, ValidationError> {
        let default_index = genres
            .iter()
            .position(|genre| genre.key == default_key)
            .ok_or_else(|| ValidationError::InvalidGenre {
                key: default_key.to_string(),
                reason: "default genre is not in the table".to_string(),
            })?;
        Ok(Self {
            genres,
            default_index,
        })
    }

    /// Builds the known genres, reading each database id through `lookup`
    /// (an environment variable name → value function).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let genres = KNOWN_GENRES
            .iter()
            .map(|(key, title, variable)| {
                let raw = lookup(*variable)
                    .filter(|value| !value.trim().is_empty())
                    .ok_or_else(|| {
                        AppError::MissingConfiguration(format!(
                            "{} is not set (database for genre '{}')",
                            variable, key
                        ))
                    })?;
                Ok(Genre::new(*key, *title, DatabaseId::parse(raw.trim())?))
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(Self::new(genres, DEFAULT_GENRE)?)
    }

    /// Builds the known genres from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.genres.iter().map(|genre| genre.key.as_str())
    }

    fn find(&self, key: &str) -> Option<&Genre> {
        self.genres.iter().find(|genre| genre.key == key)
    }

    /// The database of `key`, or the default genre's for an unknown key.
    pub fn database_for(&self, key: &str) -> &DatabaseId {
        match self.find(key) {
            Some(genre) => &genre.database,
            None => {
                log::warn!(
                    "Unknown genre '{}', using the '{}' database",
                    key,
                    self.genres[self.default_index].key
                );
                &self.genres[self.default_index].database
            }
        }
    }

    /// The display title of `key`; an unknown key is its own title.
    pub fn title_for(&self, key: &str) -> String {
        self.find(key)
            .map(|genre| genre.title.clone())
            .unwrap_or_else(|| key.to_string())
    }
}
