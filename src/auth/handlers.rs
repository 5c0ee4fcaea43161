use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            AckResponse, LoginRequest, LoginResponse, RefreshRequest, RefreshResponse,
            SignupRequest, SignupResponse, UserSummary,
        },
        jwt::{AuthUser, JwtKeys, TokenError},
        password::{hash_password, verify_password},
    },
    error::ApiError,
    profile::dto::UserProfile,
    profile::services,
    state::AppState,
    users::{
        repo_types::{NewUser, User, DEFAULT_PROFILE_PHOTO},
        validate,
    },
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/refresh-token", post(refresh_token))
        .route("/me", get(me))
        .route("/logout", post(logout))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(mut payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    payload.email = payload.email.trim().to_lowercase();
    payload.username = payload.username.trim().to_string();

    let violations = validate::validate_signup(&payload);
    if !violations.is_empty() {
        warn!(count = violations.len(), "signup rejected");
        return Err(ApiError::Validation(violations));
    }

    // Advisory pre-check so the client learns which key collided; the
    // unique constraints arbitrate the race on insert.
    if let Some(existing) =
        User::find_by_email_or_username(&state.db, &payload.email, &payload.username).await?
    {
        let field = if existing.email == payload.email {
            "Email"
        } else {
            "Username"
        };
        warn!(field, "signup duplicate");
        return Err(ApiError::DuplicateKey(field));
    }

    let password_hash = hash_password(&payload.password).map_err(ApiError::Hashing)?;

    let user = User::create(
        &state.db,
        NewUser {
            first_name: payload.first_name.trim().to_string(),
            last_name: payload.last_name.trim().to_string(),
            email: payload.email,
            username: payload.username,
            password_hash,
            category: payload.category.trim().to_string(),
            profile_photo: payload
                .profile_photo
                .unwrap_or_else(|| DEFAULT_PROFILE_PHOTO.to_string()),
        },
    )
    .await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign_access(user.id).map_err(ApiError::Internal)?;
    let refresh_token = keys.sign_refresh(user.id).map_err(ApiError::Internal)?;

    info!(user_id = %user.id, username = %user.username, "user signed up");
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            token,
            refresh_token,
            user: UserSummary::from(user),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    // Unknown account and wrong password produce the identical response so
    // the endpoint cannot be used to enumerate users.
    let Some(user) = User::find_by_email(&state.db, &payload.email).await? else {
        warn!("login for unknown email");
        return Err(ApiError::InvalidCredentials);
    };

    let ok = verify_password(&payload.password, &user.password_hash).map_err(ApiError::Hashing)?;
    if !ok {
        warn!(user_id = %user.id, "login password mismatch");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign_access(user.id).map_err(ApiError::Internal)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(LoginResponse {
        token,
        user: UserSummary::from(user),
    }))
}

#[instrument(skip(state, payload))]
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let keys = JwtKeys::from_ref(&state);
    let claims = match keys.verify_refresh(&payload.refresh_token) {
        Ok(c) => c,
        Err(TokenError::Expired) => {
            warn!("refresh with expired token");
            return Err(ApiError::Unauthorized("Refresh token expired"));
        }
        Err(TokenError::Invalid) => {
            warn!("refresh with invalid token");
            return Err(ApiError::Unauthorized("Invalid refresh token"));
        }
    };

    let token = keys.sign_access(claims.sub).map_err(ApiError::Internal)?;
    info!(user_id = %claims.sub, "access token refreshed");
    Ok(Json(RefreshResponse { token }))
}

#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UserProfile>, ApiError> {
    // NotFound here means the token outlived the account.
    Ok(Json(services::load_profile(&state.db, user_id).await?))
}

#[instrument]
pub async fn logout(AuthUser(user_id): AuthUser) -> Json<AckResponse> {
    // Tokens are stateless; there is nothing to revoke server-side. The
    // client discards its copy and the token ages out at its expiry.
    info!(user_id = %user_id, "logout acknowledged");
    Json(AckResponse { success: true })
}
