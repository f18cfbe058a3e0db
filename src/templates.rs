use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::{
    entities::movie,
    models::{CatalogMovie, ListName, SearchMovie},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";
const DATASTAR_CDN: &str =
    "https://cdn.jsdelivr.net/npm/@sudodevnull/datastar@0.19.9/dist/datastar.js";

const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";
const PLACEHOLDER_POSTER: &str =
    "https://placehold.co/500x750/1e293b/FFFFFF?text=Poster+Unavailable";

/// Each keystroke bumps the sequence number before the (debounced) fetch, so
/// a response can always be matched against the latest issued request and a
/// superseded one is dropped rather than rendered.
const SEARCH_ACTION: &str =
    "$seq++; @get('/search/results?q=' + encodeURIComponent($q) + '&seq=' + $seq)";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CardContext {
    /// Search result: add-to-watchlist / add-to-watched, keyed by TMDB id.
    Search,
    /// Saved row: a single remove button, keyed by the internal row id.
    List(ListName),
}

/// The slice of a movie a grid card needs, from either source.
pub struct Card<'a> {
    pub tmdb_id: i64,
    pub db_id: Option<i32>,
    pub title: &'a str,
    pub poster_path: Option<&'a str>,
    pub release_date: Option<&'a str>,
}

impl<'a> From<&'a SearchMovie> for Card<'a> {
    fn from(m: &'a SearchMovie) -> Self {
        Self {
            tmdb_id: m.id,
            db_id: None,
            title: &m.title,
            poster_path: m.poster_path.as_deref(),
            release_date: m.release_date.as_deref(),
        }
    }
}

impl<'a> From<&'a movie::Model> for Card<'a> {
    fn from(m: &'a movie::Model) -> Self {
        // poster and release date are never persisted, so saved rows always
        // fall back to the placeholder image and "N/A"
        Self { tmdb_id: m.tmdb_id, db_id: Some(m.id), title: &m.title, poster_path: None, release_date: None }
    }
}

/// First four characters of the release date, "N/A" when absent. A substring,
/// not a date parse: "94" stays "94".
pub fn release_year(release_date: Option<&str>) -> String {
    match release_date {
        Some(d) if !d.is_empty() => d.chars().take(4).collect(),
        _ => "N/A".to_string(),
    }
}

fn poster_url(poster_path: Option<&str>) -> String {
    match poster_path {
        Some(p) => format!("{POSTER_BASE}{p}"),
        None => PLACEHOLDER_POSTER.to_string(),
    }
}

pub fn index_page() -> String {
    page(
        "Film Log",
        html! {
            div class="min-h-screen bg-gray-50" data-store="{q: '', seq: 0}" {
                (nav_bar(Some("/")))
                div class="max-w-5xl mx-auto px-6 py-10" {
                    h1 class="text-3xl font-bold text-gray-900" { "Search" }
                    p class="mt-2 text-gray-600" { "Find a film and add it to your watchlist, or mark it watched." }

                    div class="mt-6" {
                        input id="searchInput" type="search" placeholder="Search for a movie..."
                            class="w-full rounded-md border border-gray-300 px-4 py-3 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500"
                            data-model="q"
                            "data-on-input.debounce_500ms"=(PreEscaped(SEARCH_ACTION));
                    }

                    div id="toast" {}

                    (results_region(&[], 0))
                }
            }
        },
    )
}

pub fn results_fragment(movies: &[SearchMovie], seq: u64) -> String {
    results_region(movies, seq).into_string()
}

fn results_region(movies: &[SearchMovie], seq: u64) -> Markup {
    html! {
        div id="results" data-seq=(seq) {
            div class="mt-8 grid grid-cols-2 gap-6 sm:grid-cols-3 md:grid-cols-4" {
                @for m in movies {
                    (movie_card(&Card::from(m), CardContext::Search))
                }
            }
            @if movies.is_empty() {
                div class="mt-10 text-center text-gray-500" {
                    p { "Nothing here yet. Search for a film to get started." }
                }
            }
        }
    }
}

pub fn search_error_fragment(seq: u64) -> String {
    html! {
        div id="results" data-seq=(seq) {
            div class="mt-10 text-center text-gray-500" {
                p { "Could not fetch search results. Please try again." }
            }
        }
    }
    .into_string()
}

pub fn list_page(list: ListName, movies: &[movie::Model]) -> String {
    page(
        list.title(),
        html! {
            div class="min-h-screen bg-gray-50" {
                (nav_bar(Some(list.page_path())))
                div class="max-w-5xl mx-auto px-6 py-10" {
                    h1 class="text-3xl font-bold text-gray-900" { (list.title()) }
                    div id="toast" {}
                    (list_region(list, movies))
                }
            }
        },
    )
}

pub fn list_fragment(list: ListName, movies: &[movie::Model]) -> String {
    list_region(list, movies).into_string()
}

fn list_region(list: ListName, movies: &[movie::Model]) -> Markup {
    html! {
        div id="grid" {
            div class="mt-8 grid grid-cols-2 gap-6 sm:grid-cols-3 md:grid-cols-4" {
                @for m in movies {
                    (movie_card(&Card::from(m), CardContext::List(list)))
                }
            }
            @if movies.is_empty() {
                div class="mt-10 text-center text-gray-500" {
                    p { (empty_list_message(list)) }
                }
            }
        }
    }
}

fn empty_list_message(list: ListName) -> &'static str {
    match list {
        ListName::Watchlist => "Your watchlist is empty.",
        ListName::Watched => "Nothing marked as watched yet.",
    }
}

pub fn movie_card(card: &Card<'_>, context: CardContext) -> Markup {
    let poster = poster_url(card.poster_path);
    let year = release_year(card.release_date);

    html! {
        article class="bg-white shadow rounded-lg overflow-hidden" {
            a href=(format!("/film?tmdb_id={}", card.tmdb_id)) {
                img class="w-full aspect-[2/3] object-cover" src=(poster) alt=(card.title);
            }
            div class="p-4" {
                h3 class="font-semibold text-gray-900 truncate" { (card.title) }
                p class="text-sm text-gray-500" { (year) }
                div class="mt-3 grid grid-cols-2 gap-2" {
                    @match context {
                        CardContext::Search => {
                            button class="rounded-md bg-gray-200 px-2 py-1 text-sm font-medium text-gray-800 hover:bg-gray-300"
                                data-on-click=(PreEscaped(add_action(card, ListName::Watchlist))) {
                                "Watchlist"
                            }
                            button class="rounded-md bg-blue-600 px-2 py-1 text-sm font-medium text-white hover:bg-blue-700"
                                data-on-click=(PreEscaped(add_action(card, ListName::Watched))) {
                                "Watched"
                            }
                        },
                        CardContext::List(list) => {
                            @if let Some(db_id) = card.db_id {
                                button class="col-span-2 rounded-md bg-gray-200 px-2 py-1 text-sm font-medium text-gray-800 hover:bg-gray-300"
                                    data-on-click=(PreEscaped(remove_action(list, db_id))) {
                                    "Remove"
                                }
                            }
                        },
                    }
                }
            }
        }
    }
}

fn add_action(card: &Card<'_>, list: ListName) -> String {
    format!(
        "@post('/lists/add?tmdb_id={}&title={}&list={}')",
        card.tmdb_id,
        urlencoding::encode(card.title),
        list.as_str()
    )
}

fn remove_action(list: ListName, db_id: i32) -> String {
    format!("@delete('/lists/{}/items/{}')", list.as_str(), db_id)
}

pub fn film_page(movie: &CatalogMovie) -> String {
    let poster = poster_url(movie.poster_path.as_deref());
    let year = release_year(movie.release_date.as_deref());
    let genre_names =
        movie.genres.iter().map(|g| g.name.as_str()).collect::<Vec<_>>().join(", ");

    page(
        &movie.title,
        html! {
            div class="min-h-screen bg-gray-50" {
                (nav_bar(None))
                div class="max-w-4xl mx-auto px-6 py-10" {
                    div class="grid gap-8 md:grid-cols-[minmax(0,1fr)_2fr]" {
                        img class="rounded-xl w-full aspect-[2/3] object-cover" src=(poster) alt=(movie.title);
                        div {
                            h1 class="text-3xl font-bold text-gray-900" { (movie.title) }
                            p class="mt-1 text-gray-500" { (year) }

                            h3 class="mt-6 text-sm font-semibold text-gray-700" { "Plot" }
                            p class="mt-1 text-gray-700" {
                                (movie.overview.as_deref().unwrap_or("No plot summary available."))
                            }

                            div class="mt-4 grid grid-cols-2 gap-4" {
                                div {
                                    h3 class="text-sm font-semibold text-gray-700" { "Director" }
                                    p class="text-gray-700" { (movie.director) }
                                }
                                div {
                                    h3 class="text-sm font-semibold text-gray-700" { "Actors" }
                                    p class="text-gray-700" { (movie.actors) }
                                }
                            }

                            @if !movie.genres.is_empty() {
                                div class="mt-4 flex flex-wrap gap-2" {
                                    @for genre in &movie.genres {
                                        span class="rounded-full bg-gray-200 px-3 py-1 text-xs text-gray-700" { (genre.name) }
                                    }
                                }
                            }

                            form class="mt-8 border-t border-gray-200 pt-6 space-y-4" method="post" action="/film/save" {
                                h3 class="text-xl font-bold text-gray-900" { "Manage this film" }

                                input type="hidden" name="tmdb_id" value=(movie.id);
                                input type="hidden" name="title" value=(movie.title);
                                input type="hidden" name="director" value=(movie.director);
                                input type="hidden" name="actors" value=(movie.actors);
                                input type="hidden" name="description" value=(movie.overview.as_deref().unwrap_or(""));
                                input type="hidden" name="genre" value=(genre_names);

                                div class="grid gap-4 md:grid-cols-2" {
                                    div {
                                        label class="block text-sm font-medium text-gray-700" for="list_name" { "Add to list" }
                                        select class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2" name="list_name" id="list_name" {
                                            option value="" { "-- Select --" }
                                            option value="watchlist" { "Watchlist" }
                                            option value="watched" { "Watched" }
                                        }
                                    }
                                    div {
                                        label class="block text-sm font-medium text-gray-700" for="user_rating" { "Your rating (out of 5)" }
                                        select class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2" name="user_rating" id="user_rating" {
                                            option value="" { "-- Rate --" }
                                            @for n in (1..=5) {
                                                option value=(n) { (n) }
                                            }
                                        }
                                    }
                                }

                                div {
                                    label class="block text-sm font-medium text-gray-700" for="user_review" { "Your review / notes" }
                                    textarea class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2" name="user_review" id="user_review" rows="4" {}
                                }

                                button class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" {
                                    "Save movie"
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn toast_fragment(message: &str) -> String {
    html! {
        div id="toast" {
            p class="mt-4 rounded-md bg-gray-900/90 px-4 py-2 text-center text-sm text-white" { (message) }
        }
    }
    .into_string()
}

pub fn error_page(message: &str) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "Error" }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn nav_bar(active: Option<&str>) -> Markup {
    let link = |href: &str, label: &str| {
        let class = if active == Some(href) {
            "text-sm font-semibold text-blue-600"
        } else {
            "text-sm font-medium text-gray-600 hover:text-gray-900"
        };
        html! { a class=(class) href=(href) { (label) } }
    };

    html! {
        nav class="bg-white shadow-sm" {
            div class="max-w-5xl mx-auto flex items-center gap-6 px-6 py-4" {
                a class="text-lg font-bold text-gray-900" href="/" { "Film Log" }
                (link("/", "Search"))
                (link("/watchlist", "Watchlist"))
                (link("/watched", "Watched"))
            }
        }
    }
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
                script type="module" src=(DATASTAR_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Genre;

    fn search_movie() -> SearchMovie {
        SearchMovie {
            id: 603,
            title: "The Matrix".to_string(),
            poster_path: Some("/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg".to_string()),
            release_date: Some("1999-03-30".to_string()),
        }
    }

    fn saved_movie() -> movie::Model {
        movie::Model {
            id: 7,
            tmdb_id: 603,
            title: "The Matrix".to_string(),
            director: None,
            actors: None,
            description: None,
            genre: None,
            list_name: "watchlist".to_string(),
            no_of_times_watched: 0,
            user_rating: None,
            user_review: None,
            created_at: 0,
        }
    }

    #[test]
    fn year_is_a_four_character_substring() {
        assert_eq!(release_year(Some("1994-09-23")), "1994");
        assert_eq!(release_year(None), "N/A");
        assert_eq!(release_year(Some("")), "N/A");
        // substring behavior, not a date parse
        assert_eq!(release_year(Some("94")), "94");
    }

    #[test]
    fn search_card_has_both_add_buttons_keyed_by_tmdb_id() {
        let m = search_movie();
        let markup = movie_card(&Card::from(&m), CardContext::Search).into_string();
        assert!(markup.contains("@post('/lists/add?tmdb_id=603&title=The%20Matrix&list=watchlist')"));
        assert!(markup.contains("@post('/lists/add?tmdb_id=603&title=The%20Matrix&list=watched')"));
        assert!(markup.contains("1999"));
        assert!(markup.contains("/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg"));
    }

    #[test]
    fn list_card_has_one_remove_button_keyed_by_row_id() {
        let m = saved_movie();
        let markup = movie_card(&Card::from(&m), CardContext::List(ListName::Watchlist)).into_string();
        assert!(markup.contains("@delete('/lists/watchlist/items/7')"));
        assert!(!markup.contains("/lists/add"));
        // nothing was persisted for poster or date, so the card falls back
        assert!(markup.contains(PLACEHOLDER_POSTER));
        assert!(markup.contains("N/A"));
    }

    #[test]
    fn missing_poster_uses_the_placeholder() {
        let mut m = search_movie();
        m.poster_path = None;
        let markup = movie_card(&Card::from(&m), CardContext::Search).into_string();
        assert!(markup.contains(PLACEHOLDER_POSTER));
    }

    #[test]
    fn empty_results_render_the_empty_state() {
        let markup = results_fragment(&[], 3);
        assert!(!markup.contains("<article"));
        assert!(markup.contains("Nothing here yet."));
        assert!(markup.contains("data-seq=\"3\""));
    }

    #[test]
    fn search_input_debounces_by_500ms() {
        let markup = index_page();
        assert!(markup.contains("data-on-input.debounce_500ms"));
        assert!(markup.contains("$seq++"));
    }

    #[test]
    fn film_page_carries_detail_fields_as_hidden_inputs() {
        let movie = CatalogMovie {
            id: 603,
            title: "The Matrix".to_string(),
            release_date: Some("1999-03-30".to_string()),
            poster_path: None,
            overview: Some("A hacker learns the truth.".to_string()),
            genres: vec![
                Genre { id: 28, name: "Action".to_string() },
                Genre { id: 878, name: "Science Fiction".to_string() },
            ],
            director: "Lana Wachowski".to_string(),
            actors: "Keanu Reeves, Laurence Fishburne, Carrie-Anne Moss".to_string(),
        };
        let markup = film_page(&movie);
        assert!(markup.contains("name=\"director\" value=\"Lana Wachowski\""));
        assert!(markup.contains("name=\"genre\" value=\"Action, Science Fiction\""));
        assert!(markup.contains("action=\"/film/save\""));
    }
}
