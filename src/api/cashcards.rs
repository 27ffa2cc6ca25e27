use axum::{
    extract::{Path, RawQuery, State},
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};

use crate::api::middleware::{
    auth::{require_card_owner, CurrentUser},
    state::AppState,
};
use crate::error::{AppError, Result};
use crate::models::cash_card::{CashCard, CashCardPayload};
use crate::models::page::{PageRequest, SortField, SortOrder};

/// Returns a single card owned by the caller
async fn find_by_id(
    State(state): State<AppState>,
    Extension(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<CashCard>> {
    let card = CashCard::find_by_id_and_owner(&state.pool, id, &user.username)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(card))
}

/// Lists the caller's cards, one page at a time
async fn find_all(
    State(state): State<AppState>,
    Extension(user): CurrentUser,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<CashCard>>> {
    let page = PageRequest::from_query(
        query.as_deref(),
        state.config.default_page_size,
        state.config.max_page_size,
    )?
    .sort_or(SortOrder::asc(SortField::Amount));

    let cards = CashCard::list_by_owner(&state.pool, &user.username, &page).await?;

    tracing::debug!(
        owner = %user.username,
        page = page.page,
        size = page.size,
        returned = cards.len(),
        "Listed cash cards"
    );

    Ok(Json(cards))
}

async fn create_cash_card(
    State(state): State<AppState>,
    Extension(user): CurrentUser,
    Json(payload): Json<CashCardPayload>,
) -> Result<Response> {
    if payload.id.is_some() || payload.owner.is_some() {
        tracing::debug!("Ignoring client-supplied id/owner on create");
    }

    let card = CashCard::create(&state.pool, payload.amount, &user.username).await?;

    tracing::info!(card_id = card.id, owner = %card.owner, "Created cash card");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/cashcards/{}", card.id))],
    )
        .into_response())
}

async fn update_cash_card(
    State(state): State<AppState>,
    Extension(user): CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<CashCardPayload>,
) -> Result<StatusCode> {
    let updated = CashCard::update_amount(&state.pool, id, &user.username, payload.amount).await?;
    if !updated {
        return Err(AppError::NotFound);
    }

    tracing::info!(card_id = id, owner = %user.username, "Updated cash card");

    Ok(StatusCode::NO_CONTENT)
}

async fn delete_cash_card(
    State(state): State<AppState>,
    Extension(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let deleted = CashCard::delete(&state.pool, id, &user.username).await?;
    if !deleted {
        return Err(AppError::NotFound);
    }

    tracing::info!(card_id = id, owner = %user.username, "Deleted cash card");

    Ok(StatusCode::NO_CONTENT)
}

/// Answers paths under `/cashcards` that match no route. Only reached once
/// the caller has passed the card-owner gate.
async fn unknown_route() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// All `/cashcards/**` routes. The card-owner gate wraps the fallback too, so
/// no path under the prefix answers before authentication.
pub fn router(state: AppState) -> Router<AppState> {
    let cashcards = Router::new()
        .route("/", get(find_all).post(create_cash_card))
        .route(
            "/:id",
            get(find_by_id).put(update_cash_card).delete(delete_cash_card),
        )
        .fallback(unknown_route)
        .layer(middleware::from_fn_with_state(state, require_card_owner));

    Router::new().nest("/cashcards", cashcards)
}
