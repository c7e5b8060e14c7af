use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::state::AppState;
use super::{ai, characters, health, locations, notes, search};

fn character_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(characters::search_characters))
        .route("/{id}", get(characters::get_character))
}

fn location_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(locations::list_locations))
        .route("/{id}", get(locations::get_location))
}

/// `/{id}` is a character id for GET and a note id for PUT and DELETE
fn note_routes() -> Router<AppState> {
    Router::new().route("/", post(notes::create_note)).route(
        "/{id}",
        get(notes::list_notes)
            .put(notes::update_note)
            .delete(notes::delete_note),
    )
}

fn search_routes() -> Router<AppState> {
    Router::new()
        .route("/index-characters", post(search::index_characters))
        .route("/semantic", post(search::semantic_search))
        .route("/status", get(search::index_status))
        .route("/reindex/{id}", post(search::reindex_character))
}

fn ai_routes() -> Router<AppState> {
    Router::new()
        .route("/location-summary/{id}", get(ai::location_summary))
        .route("/character-analysis/{id}", get(ai::character_analysis))
        .route("/character-dialogue", post(ai::character_dialogue))
        .route(
            "/eval/factual-consistency",
            post(ai::evaluate_factual_consistency),
        )
        .route("/eval/creativity", post(ai::evaluate_creativity))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/characters", character_routes())
        .nest("/locations", location_routes())
        .nest("/notes", note_routes())
        .nest("/search", search_routes())
        .nest("/ai", ai_routes())
}

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
