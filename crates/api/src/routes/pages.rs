//! Route definitions for the `/pages` resource.

use axum::routing::{delete, get, patch, post, put};
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// Routes mounted at `/pages`.
///
/// ```text
/// GET    /                           -> list
/// GET    /{entity}                   -> get_view
/// GET    /{entity}/html              -> get_html
/// POST   /{entity}/mount             -> mount
/// POST   /{entity}/refresh           -> refresh
/// PUT    /{entity}/search            -> search
/// POST   /{entity}/form/create       -> open_create
/// POST   /{entity}/form/edit/{id}    -> open_edit
/// PATCH  /{entity}/form/draft        -> input
/// POST   /{entity}/form/submit       -> submit
/// POST   /{entity}/form/cancel       -> cancel
/// DELETE /{entity}/records/{id}      -> delete_record
/// ```
pub fn router() -> Router<AppState> {
    let form_routes = Router::new()
        .route("/create", post(pages::open_create))
        .route("/edit/{id}", post(pages::open_edit))
        .route("/draft", patch(pages::input))
        .route("/submit", post(pages::submit))
        .route("/cancel", post(pages::cancel));

    Router::new()
        .route("/", get(pages::list))
        .route("/{entity}", get(pages::get_view))
        .route("/{entity}/html", get(pages::get_html))
        .route("/{entity}/mount", post(pages::mount))
        .route("/{entity}/refresh", post(pages::refresh))
        .route("/{entity}/search", put(pages::search))
        .route("/{entity}/records/{id}", delete(pages::delete_record))
        .nest("/{entity}/form", form_routes)
}
