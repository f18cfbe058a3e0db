use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{routes, store::MovieStore, tmdb::CatalogApi};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogApi>,
    pub store: MovieStore,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/watchlist", get(routes::watchlist_page))
        .route("/watched", get(routes::watched_page))
        .route("/film", get(routes::film_page))
        .route("/film/save", post(routes::save_film))
        .route("/search/results", get(routes::search_results))
        .route("/lists/add", post(routes::add_from_search))
        .route("/lists/{list}/items/{id}", delete(routes::remove_from_list))
        .route("/api/search", get(routes::api_search))
        .route("/api/movies", get(routes::api_list_movies).post(routes::api_create_movie))
        .route("/api/movies/{id}", delete(routes::api_delete_movie))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
