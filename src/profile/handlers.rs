use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser,
    error::ApiError,
    state::AppState,
    users::{
        repo_types::{BasicUpdate, ItemDraft, ItemKind, PageItem, User},
        validate,
    },
};

use super::{
    dto::{
        AnalyticsResponse, PageItemRequest, TrackClickRequest, TrackClickResponse,
        UpdateAppearanceRequest, UpdateBasicRequest, UpdateLinksRequest, UpdateShopsRequest,
        UserProfile,
    },
    services,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/profile/basic", put(update_basic))
        .route("/profile/links", put(update_links))
        .route("/profile/shops", put(update_shops))
        .route("/profile/appearance", put(update_appearance))
        .route("/profile/track-click", post(track_click))
        .route("/profile/analytics", get(get_analytics))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UserProfile>, ApiError> {
    Ok(Json(services::load_profile(&state.db, user_id).await?))
}

#[instrument(skip(state, payload))]
pub async fn update_basic(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateBasicRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let violations = validate::validate_basic(&payload);
    if !violations.is_empty() {
        warn!(user_id = %user_id, count = violations.len(), "basic update rejected");
        return Err(ApiError::Validation(violations));
    }

    let fields = BasicUpdate {
        first_name: trimmed(payload.first_name),
        last_name: trimmed(payload.last_name),
        bio: trimmed(payload.bio),
        profile_photo: trimmed(payload.profile_photo),
        username: trimmed(payload.username),
        category: trimmed(payload.category),
    };

    let user = User::update_basic(&state.db, user_id, fields)
        .await?
        .ok_or(ApiError::NotFound("User"))?;
    let items = PageItem::list_for_user(&state.db, user_id).await?;

    info!(user_id = %user_id, "basic profile updated");
    Ok(Json(services::build_profile(user, items)))
}

#[instrument(skip(state, payload))]
pub async fn update_links(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateLinksRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    replace_items(&state, user_id, ItemKind::Link, "links", payload.links).await
}

#[instrument(skip(state, payload))]
pub async fn update_shops(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateShopsRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    replace_items(&state, user_id, ItemKind::Shop, "shops", payload.shops).await
}

async fn replace_items(
    state: &AppState,
    user_id: Uuid,
    kind: ItemKind,
    field: &'static str,
    items: Vec<PageItemRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let violations = validate::validate_items(field, &items);
    if !violations.is_empty() {
        warn!(user_id = %user_id, kind = kind.as_str(), count = violations.len(), "sequence update rejected");
        return Err(ApiError::Validation(violations));
    }

    if User::find_by_id(&state.db, user_id).await?.is_none() {
        return Err(ApiError::NotFound("User"));
    }

    let drafts: Vec<ItemDraft> = items
        .into_iter()
        .map(|item| ItemDraft {
            id: item.id,
            title: item.title.trim().to_string(),
            url: item.url.trim().to_string(),
            enabled: item.enabled,
            click_count: item.click_count,
        })
        .collect();

    PageItem::replace_for_user(
        &state.db,
        user_id,
        kind,
        drafts,
        state.config.replace_strategy,
    )
    .await?;

    info!(user_id = %user_id, kind = kind.as_str(), "sequence replaced");
    Ok(Json(services::load_profile(&state.db, user_id).await?))
}

#[instrument(skip(state, payload))]
pub async fn update_appearance(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateAppearanceRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let appearance =
        validate::parse_appearance(&payload.appearance_settings).map_err(ApiError::Validation)?;
    let banner_color = payload.banner_color.trim().to_string();

    let user = User::update_appearance(&state.db, user_id, &banner_color, appearance)
        .await?
        .ok_or(ApiError::NotFound("User"))?;
    let items = PageItem::list_for_user(&state.db, user_id).await?;

    info!(user_id = %user_id, "appearance updated");
    Ok(Json(services::build_profile(user, items)))
}

/// Unauthenticated: any visitor click counts. An id that parses to nothing
/// or matches nothing is still a success for the visitor.
#[instrument(skip(state))]
pub async fn track_click(
    State(state): State<AppState>,
    Json(payload): Json<TrackClickRequest>,
) -> Result<Json<TrackClickResponse>, ApiError> {
    let Ok(item_id) = payload.item_id.parse::<Uuid>() else {
        return Ok(Json(TrackClickResponse { success: true }));
    };

    let matched = PageItem::increment_click(&state.db, item_id, payload.item_type).await?;
    if matched {
        info!(item_id = %item_id, kind = payload.item_type.as_str(), "click tracked");
    }
    Ok(Json(TrackClickResponse { success: true }))
}

#[instrument(skip(state))]
pub async fn get_analytics(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<AnalyticsResponse>, ApiError> {
    Ok(Json(services::load_analytics(&state.db, user_id).await?))
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}
