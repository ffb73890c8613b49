//! Handlers for the `/pages` resource.
//!
//! Each handler resolves the entity page from the path, drives one
//! operation of its list-view workflow, and answers with the resulting page
//! view. Backend failures do not produce HTTP errors; submit and delete
//! report them through the `outcome` field.

use std::sync::Arc;

use awards_core::list_view::{DeleteOutcome, FetchOutcome, ListView, SubmitOutcome};
use awards_core::view::{PageSummary, PageView};
use axum::extract::{Path, State};
use axum::response::Html;
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::render;
use crate::response::{DataResponse, OutcomeResponse};
use crate::state::AppState;

/// Body of `PUT /pages/{entity}/search`.
#[derive(Debug, Deserialize)]
pub struct SearchInput {
    #[serde(default)]
    pub query: String,
}

/// Body of `PATCH /pages/{entity}/form/draft`: one input event.
#[derive(Debug, Deserialize)]
pub struct DraftInput {
    pub field: String,
    #[serde(default)]
    pub value: String,
}

fn find_page(state: &AppState, entity: &str) -> AppResult<Arc<ListView>> {
    state
        .dashboard
        .page(entity)
        .ok_or_else(|| AppError::UnknownPage(entity.to_string()))
}

async fn page_view(page: &ListView) -> Json<DataResponse<PageView>> {
    Json(DataResponse {
        data: page.view().await,
    })
}

/// GET /pages
pub async fn list(State(state): State<AppState>) -> Json<DataResponse<Vec<PageSummary>>> {
    Json(DataResponse {
        data: state.dashboard.summaries(),
    })
}

/// GET /pages/{entity}
pub async fn get_view(
    State(state): State<AppState>,
    Path(entity): Path<String>,
) -> AppResult<Json<DataResponse<PageView>>> {
    let page = find_page(&state, &entity)?;
    Ok(page_view(&page).await)
}

/// GET /pages/{entity}/html
pub async fn get_html(
    State(state): State<AppState>,
    Path(entity): Path<String>,
) -> AppResult<Html<String>> {
    let page = find_page(&state, &entity)?;
    let view = page.view().await;
    Ok(Html(render::page(&view, page.schema().singular)?))
}

/// POST /pages/{entity}/mount
pub async fn mount(
    State(state): State<AppState>,
    Path(entity): Path<String>,
) -> AppResult<Json<OutcomeResponse<PageView, FetchOutcome>>> {
    let page = find_page(&state, &entity)?;
    let outcome = page.mount().await;
    Ok(Json(OutcomeResponse {
        data: page.view().await,
        outcome,
    }))
}

/// POST /pages/{entity}/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Path(entity): Path<String>,
) -> AppResult<Json<OutcomeResponse<PageView, FetchOutcome>>> {
    let page = find_page(&state, &entity)?;
    let outcome = page.refresh().await;
    Ok(Json(OutcomeResponse {
        data: page.view().await,
        outcome,
    }))
}

/// PUT /pages/{entity}/search
pub async fn search(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    Json(input): Json<SearchInput>,
) -> AppResult<Json<DataResponse<PageView>>> {
    let page = find_page(&state, &entity)?;
    page.set_query(input.query).await;
    Ok(page_view(&page).await)
}

/// POST /pages/{entity}/form/create
pub async fn open_create(
    State(state): State<AppState>,
    Path(entity): Path<String>,
) -> AppResult<Json<DataResponse<PageView>>> {
    let page = find_page(&state, &entity)?;
    page.open_create().await;
    Ok(page_view(&page).await)
}

/// POST /pages/{entity}/form/edit/{id}
pub async fn open_edit(
    State(state): State<AppState>,
    Path((entity, id)): Path<(String, String)>,
) -> AppResult<Json<DataResponse<PageView>>> {
    let page = find_page(&state, &entity)?;
    page.open_edit(&id).await?;
    Ok(page_view(&page).await)
}

/// PATCH /pages/{entity}/form/draft
pub async fn input(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    Json(input): Json<DraftInput>,
) -> AppResult<Json<DataResponse<PageView>>> {
    let page = find_page(&state, &entity)?;
    if input.field.is_empty() {
        return Err(AppError::BadRequest("field must not be empty".into()));
    }
    page.input(&input.field, input.value).await?;
    Ok(page_view(&page).await)
}

/// POST /pages/{entity}/form/submit
pub async fn submit(
    State(state): State<AppState>,
    Path(entity): Path<String>,
) -> AppResult<Json<OutcomeResponse<PageView, SubmitOutcome>>> {
    let page = find_page(&state, &entity)?;
    let outcome = page.submit().await?;
    Ok(Json(OutcomeResponse {
        data: page.view().await,
        outcome,
    }))
}

/// POST /pages/{entity}/form/cancel
pub async fn cancel(
    State(state): State<AppState>,
    Path(entity): Path<String>,
) -> AppResult<Json<DataResponse<PageView>>> {
    let page = find_page(&state, &entity)?;
    page.cancel().await;
    Ok(page_view(&page).await)
}

/// DELETE /pages/{entity}/records/{id}
pub async fn delete_record(
    State(state): State<AppState>,
    Path((entity, id)): Path<(String, String)>,
) -> AppResult<Json<OutcomeResponse<PageView, DeleteOutcome>>> {
    let page = find_page(&state, &entity)?;
    let outcome = page.delete(&id).await?;
    Ok(Json(OutcomeResponse {
        data: page.view().await,
        outcome,
    }))
}
