pub mod health;
pub mod pages;

use axum::Router;

use crate::state::AppState;

/// Build the dashboard route tree.
///
/// Route hierarchy:
///
/// ```text
/// /pages                                  entity page catalog
/// /pages/{entity}                         page view (JSON)
/// /pages/{entity}/html                    page view (HTML)
/// /pages/{entity}/mount                   reset + fetch (POST)
/// /pages/{entity}/refresh                 fetch (POST)
/// /pages/{entity}/search                  set query (PUT)
/// /pages/{entity}/form/create             open Add form (POST)
/// /pages/{entity}/form/edit/{id}          open Edit form (POST)
/// /pages/{entity}/form/draft              input event (PATCH)
/// /pages/{entity}/form/submit             Add / Save (POST)
/// /pages/{entity}/form/cancel             Cancel / dismiss (POST)
/// /pages/{entity}/records/{id}            delete record (DELETE)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new().nest("/pages", pages::router())
}
