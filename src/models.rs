use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// The two fixed personal lists a movie can be saved into.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListName {
    Watchlist,
    Watched,
}

impl ListName {
    pub fn as_str(self) -> &'static str {
        match self {
            ListName::Watchlist => "watchlist",
            ListName::Watched => "watched",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "watchlist" => Some(ListName::Watchlist),
            "watched" => Some(ListName::Watched),
            _ => None,
        }
    }

    /// A movie saved straight to "watched" starts with one viewing on record.
    pub fn initial_watch_count(self) -> i32 {
        match self {
            ListName::Watchlist => 0,
            ListName::Watched => 1,
        }
    }

    pub fn page_path(self) -> &'static str {
        match self {
            ListName::Watchlist => "/watchlist",
            ListName::Watched => "/watched",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ListName::Watchlist => "Watchlist",
            ListName::Watched => "Watched",
        }
    }
}

/// Partial catalog shape returned by title search.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchMovie {
    pub id: i64,
    pub title: String,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Full catalog record for the film page: details plus the crew/cast
/// derivations. Never persisted as-is.
#[derive(Clone, Debug, Serialize)]
pub struct CatalogMovie {
    pub id: i64,
    pub title: String,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub overview: Option<String>,
    pub genres: Vec<Genre>,
    pub director: String,
    pub actors: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CreateMovieRequest {
    pub tmdb_id: i64,
    pub title: String,
    pub director: Option<String>,
    pub actors: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub list_name: ListName,
    #[serde(default)]
    pub no_of_times_watched: i32,
    pub user_rating: Option<i32>,
    pub user_review: Option<String>,
}

impl CreateMovieRequest {
    /// Payload for saving a search result: only the identity fields are
    /// known, everything else stays null until the user fills in details.
    pub fn from_search(tmdb_id: i64, title: String, list_name: ListName) -> Self {
        Self {
            tmdb_id,
            title,
            director: None,
            actors: None,
            description: None,
            genre: None,
            list_name,
            no_of_times_watched: list_name.initial_watch_count(),
            user_rating: None,
            user_review: None,
        }
    }

    /// Checked before any store write; a malformed row never reaches SQL.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::BadRequest("title must not be empty".to_string()));
        }
        if let Some(rating) = self.user_rating {
            if !(1..=5).contains(&rating) {
                return Err(AppError::BadRequest(format!(
                    "user_rating must be between 1 and 5, got {rating}"
                )));
            }
        }
        if self.no_of_times_watched < 0 {
            return Err(AppError::BadRequest(
                "no_of_times_watched must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct CreateResponse {
    pub id: i32,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}
