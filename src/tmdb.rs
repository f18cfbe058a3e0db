use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::{CatalogMovie, Genre, SearchMovie},
};

/// Seam between request handlers and the external movie catalog; tests
/// substitute a fake.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn search(&self, query: &str) -> AppResult<Vec<SearchMovie>>;
    async fn movie_details(&self, tmdb_id: i64) -> AppResult<CatalogMovie>;
}

pub struct TmdbClient {
    client: reqwest::Client,
    access_token: String,
    base_url: String,
}

impl TmdbClient {
    pub fn new(client: reqwest::Client, access_token: String, base_url: String) -> Self {
        Self { client, access_token, base_url }
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, path: &str) -> AppResult<T> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        let resp = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(resp)
    }
}

#[async_trait]
impl CatalogApi for TmdbClient {
    async fn search(&self, query: &str) -> AppResult<Vec<SearchMovie>> {
        // the query is forwarded verbatim, empty string included; whatever
        // TMDB answers is what the caller gets
        let url = format!("{}/search/movie", self.base_url.trim_end_matches('/'));
        let resp: SearchResponse = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .query(&[("query", query)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(resp.results)
    }

    async fn movie_details(&self, tmdb_id: i64) -> AppResult<CatalogMovie> {
        let detail_path = format!("/movie/{tmdb_id}");
        let credits_path = format!("/movie/{tmdb_id}/credits");
        let (detail, credits) = tokio::try_join!(
            self.get_json::<MovieDetail>(&detail_path),
            self.get_json::<Credits>(&credits_path),
        )?;

        Ok(CatalogMovie {
            id: detail.id,
            title: detail.title,
            release_date: detail.release_date,
            poster_path: detail.poster_path,
            overview: detail.overview,
            genres: detail.genres,
            director: director_name(&credits),
            actors: top_billed(&credits, 3),
        })
    }
}

fn director_name(credits: &Credits) -> String {
    credits
        .crew
        .iter()
        .find(|c| c.job.as_deref() == Some("Director"))
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "N/A".to_string())
}

fn top_billed(credits: &Credits, max: usize) -> String {
    if credits.cast.is_empty() {
        return "N/A".to_string();
    }
    credits.cast.iter().take(max).map(|c| c.name.as_str()).collect::<Vec<_>>().join(", ")
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchMovie>,
}

#[derive(Debug, Deserialize)]
struct MovieDetail {
    id: i64,
    title: String,
    release_date: Option<String>,
    poster_path: Option<String>,
    overview: Option<String>,
    #[serde(default)]
    genres: Vec<Genre>,
}

#[derive(Debug, Deserialize)]
struct Credits {
    #[serde(default)]
    cast: Vec<CastMember>,
    #[serde(default)]
    crew: Vec<CrewMember>,
}

#[derive(Debug, Deserialize)]
struct CastMember {
    name: String,
}

#[derive(Debug, Deserialize)]
struct CrewMember {
    job: Option<String>,
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credits(json: serde_json::Value) -> Credits {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn director_is_first_crew_member_with_the_director_job() {
        let credits = credits(serde_json::json!({
            "cast": [],
            "crew": [
                {"job": "Producer", "name": "Joel Silver"},
                {"job": "Director", "name": "Lana Wachowski"},
                {"job": "Director", "name": "Lilly Wachowski"}
            ]
        }));
        assert_eq!(director_name(&credits), "Lana Wachowski");
    }

    #[test]
    fn director_falls_back_to_na() {
        let credits = credits(serde_json::json!({
            "cast": [],
            "crew": [{"job": "Producer", "name": "Joel Silver"}]
        }));
        assert_eq!(director_name(&credits), "N/A");
    }

    #[test]
    fn actors_are_the_top_three_cast_names() {
        let credits = credits(serde_json::json!({
            "cast": [
                {"name": "Keanu Reeves"},
                {"name": "Laurence Fishburne"},
                {"name": "Carrie-Anne Moss"},
                {"name": "Hugo Weaving"}
            ],
            "crew": []
        }));
        assert_eq!(top_billed(&credits, 3), "Keanu Reeves, Laurence Fishburne, Carrie-Anne Moss");
    }

    #[test]
    fn empty_cast_renders_na() {
        let credits = credits(serde_json::json!({"cast": [], "crew": []}));
        assert_eq!(top_billed(&credits, 3), "N/A");
    }

    #[test]
    fn search_results_keep_only_the_partial_shape() {
        let resp: SearchResponse = serde_json::from_value(serde_json::json!({
            "page": 1,
            "results": [{
                "id": 603,
                "title": "The Matrix",
                "poster_path": "/abc.jpg",
                "release_date": "1999-03-30",
                "vote_average": 8.2,
                "overview": "ignored here"
            }],
            "total_pages": 1
        }))
        .unwrap();
        assert_eq!(resp.results.len(), 1);
        assert_eq!(resp.results[0].id, 603);
        assert_eq!(resp.results[0].poster_path.as_deref(), Some("/abc.jpg"));
    }
}
