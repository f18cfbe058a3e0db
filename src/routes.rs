use std::sync::Arc;

use axum::{
    Json,
    extract::{Form, Path, Query, State, rejection::JsonRejection},
    http::{HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{
    app::AppState,
    entities::movie,
    error::{AppError, AppResult},
    models::{CreateMovieRequest, CreateResponse, DeleteResponse, ListName, SearchMovie},
    templates,
};

// --- JSON API ---

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    q: String,
}

pub async fn api_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<SearchMovie>>> {
    // the query is forwarded as-is, empty included; the catalog decides what
    // an empty search means
    let results = state.catalog.search(&params.q).await?;
    Ok(Json(results))
}

pub async fn api_list_movies(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<movie::Model>>> {
    Ok(Json(state.store.list_all().await?))
}

pub async fn api_create_movie(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateMovieRequest>, JsonRejection>,
) -> AppResult<Json<CreateResponse>> {
    let Json(req) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    req.validate()?;

    let id = state.store.insert(&req).await?;
    Ok(Json(CreateResponse { id, message: "Movie added successfully!".to_string() }))
}

pub async fn api_delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<DeleteResponse>> {
    let deleted = state.store.delete(id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound(format!("no movie with id {id}")));
    }
    Ok(Json(DeleteResponse { message: "Movie deleted successfully!".to_string() }))
}

// --- pages ---

pub async fn index() -> Html<String> {
    Html(templates::index_page())
}

pub async fn watchlist_page(State(state): State<Arc<AppState>>) -> Response {
    render_list_page(&state, ListName::Watchlist).await
}

pub async fn watched_page(State(state): State<Arc<AppState>>) -> Response {
    render_list_page(&state, ListName::Watched).await
}

async fn render_list_page(state: &AppState, list: ListName) -> Response {
    match fetch_list(state, list).await {
        Ok(movies) => Html(templates::list_page(list, &movies)).into_response(),
        Err(err) => error_page_response(err),
    }
}

/// The whole table is fetched and filtered here; the store has no notion of
/// a list.
async fn fetch_list(state: &AppState, list: ListName) -> AppResult<Vec<movie::Model>> {
    let all = state.store.list_all().await?;
    Ok(all.into_iter().filter(|m| m.list_name == list.as_str()).collect())
}

#[derive(Debug, Deserialize)]
pub struct FilmParams {
    tmdb_id: Option<i64>,
}

pub async fn film_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilmParams>,
) -> Response {
    let Some(tmdb_id) = params.tmdb_id else {
        return Redirect::to("/").into_response();
    };

    match state.catalog.movie_details(tmdb_id).await {
        Ok(movie) => Html(templates::film_page(&movie)).into_response(),
        Err(err) => {
            err.log();
            let mut resp =
                Html(templates::error_page("Failed to load movie details. Please try again."))
                    .into_response();
            *resp.status_mut() = err.status();
            resp
        }
    }
}

// --- datastar fragments ---

#[derive(Debug, Deserialize)]
pub struct SearchResultsParams {
    #[serde(default)]
    q: String,
    #[serde(default)]
    seq: u64,
}

pub async fn search_results(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchResultsParams>,
) -> Response {
    let query = params.q.trim();

    // an empty query clears the grid without touching the catalog
    if query.is_empty() {
        return fragment(templates::results_fragment(&[], params.seq), "#results");
    }

    match state.catalog.search(query).await {
        Ok(movies) => fragment(templates::results_fragment(&movies, params.seq), "#results"),
        Err(err) => {
            err.log();
            fragment(templates::search_error_fragment(params.seq), "#results")
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddParams {
    tmdb_id: i64,
    title: String,
    list: ListName,
}

pub async fn add_from_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AddParams>,
) -> Response {
    let req = CreateMovieRequest::from_search(params.tmdb_id, params.title, params.list);
    match state.store.insert(&req).await {
        Ok(_) => fragment(templates::toast_fragment("Movie added successfully!"), "#toast"),
        Err(err) => {
            err.log();
            fragment(templates::toast_fragment("Failed to add movie to list."), "#toast")
        }
    }
}

pub async fn remove_from_list(
    State(state): State<Arc<AppState>>,
    Path((list, id)): Path<(ListName, i32)>,
) -> Response {
    let result = async {
        let deleted = state.store.delete(id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound(format!("no movie with id {id}")));
        }
        // full refresh: re-fetch the list rather than patching the grid
        fetch_list(&state, list).await
    }
    .await;

    match result {
        Ok(movies) => fragment(templates::list_fragment(list, &movies), "#grid"),
        Err(err) => {
            err.log();
            fragment(templates::toast_fragment("Failed to remove movie."), "#toast")
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SaveFilmForm {
    tmdb_id: i64,
    title: String,
    #[serde(default)]
    director: String,
    #[serde(default)]
    actors: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    genre: String,
    #[serde(default)]
    list_name: String,
    #[serde(default)]
    user_rating: String,
    #[serde(default)]
    user_review: String,
}

pub async fn save_film(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SaveFilmForm>,
) -> Response {
    let result = async {
        let Some(list_name) = ListName::parse(&form.list_name) else {
            return Err(AppError::BadRequest(
                "Please select a list (Watchlist or Watched).".to_string(),
            ));
        };

        let user_rating = match form.user_rating.as_str() {
            "" => None,
            s => Some(s.parse::<i32>().map_err(|_| {
                AppError::BadRequest("user_rating must be a number between 1 and 5".to_string())
            })?),
        };

        let req = CreateMovieRequest {
            tmdb_id: form.tmdb_id,
            title: form.title,
            director: none_if_empty(form.director),
            actors: none_if_empty(form.actors),
            description: none_if_empty(form.description),
            genre: none_if_empty(form.genre),
            list_name,
            no_of_times_watched: list_name.initial_watch_count(),
            user_rating,
            user_review: none_if_empty(form.user_review),
        };
        req.validate()?;

        state.store.insert(&req).await?;
        Ok(list_name)
    }
    .await;

    match result {
        Ok(list) => Redirect::to(list.page_path()).into_response(),
        Err(err) => error_page_response(err),
    }
}

fn none_if_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}

fn error_page_response(err: AppError) -> Response {
    err.log();
    let status = err.status();
    let mut resp = Html(templates::error_page(&err.public_message())).into_response();
    *resp.status_mut() = status;
    resp
}

fn fragment(body: String, selector: &'static str) -> Response {
    let mut resp = Html(body).into_response();
    *resp.status_mut() = StatusCode::OK;
    resp.headers_mut().insert("datastar-selector", HeaderValue::from_static(selector));
    resp.headers_mut().insert("datastar-mode", HeaderValue::from_static("outer"));
    resp
}
