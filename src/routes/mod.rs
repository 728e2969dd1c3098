use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::{apply_security_headers, create_cors_layer};
use crate::handlers::{artists, health_check, not_found, shows, venues};
use crate::AppState;

pub fn create_routes(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/venues", get(venues::list))
        .route("/venues/search", post(venues::search))
        .route(
            "/venues/create",
            get(venues::create_form).post(venues::create),
        )
        .route(
            "/venues/:venue_id",
            get(venues::detail).delete(venues::delete),
        )
        .route(
            "/venues/:venue_id/edit",
            get(venues::edit_form).post(venues::edit),
        )
        .route("/artists", get(artists::list))
        .route("/artists/search", post(artists::search))
        .route(
            "/artists/create",
            get(artists::create_form).post(artists::create),
        )
        .route("/artists/:artist_id", get(artists::detail))
        .route(
            "/artists/:artist_id/edit",
            get(artists::edit_form).post(artists::edit),
        )
        .route("/shows", get(shows::list))
        .route("/shows/create", get(shows::create_form).post(shows::create))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer())
        .with_state(state);

    apply_security_headers(router)
}
