use axum::{
    extract::{FromRef, State},
    http::{HeaderMap, HeaderValue},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginData, LoginRequest, Profile, RegisterRequest, TokenRequest},
        jwt::JwtKeys,
        repo_types::{NewUser, User},
        validation::validate_registration,
    },
    envelope::Envelope,
    error::ApiError,
    state::AppState,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user/register", post(register))
        .route("/user/login", post(login))
        .route("/user/getUser", post(get_user))
}

#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<Envelope<User>>, ApiError> {
    // Best-effort pre-check; the unique index is the real guarantee.
    if state.users.find_by_username(&payload.username).await?.is_some() {
        warn!("username already registered");
        return Err(ApiError::DuplicateUsername);
    }

    if let Err(e) = validate_registration(&payload.username, &payload.password) {
        warn!(reason = %e, "registration rejected");
        return Err(e);
    }

    let password_hash = state.credentials.hash(&payload.password)?;
    let user = state
        .users
        .create(NewUser {
            username: payload.username,
            password_hash,
        })
        .await?;

    info!(user_id = %user.id, "user registered");
    Ok(Json(Envelope::success(user)))
}

#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<Envelope<LoginData>>), ApiError> {
    let Some(user) = state.users.find_by_username(&payload.username).await? else {
        warn!("login unknown username");
        return Err(ApiError::InvalidCredentials);
    };

    if !state.credentials.verify(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.issue(user.id)?;

    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&token) {
        headers.insert("auth-token", value);
    }

    info!(user_id = %user.id, "user logged in");
    Ok((
        headers,
        Json(
            Envelope::success(LoginData {
                token,
                is_staff: user.is_staff,
                favourite: user.favourite,
                username: user.username,
            })
            .with_message("Login successful"),
        ),
    ))
}

#[instrument(skip(state, payload))]
pub async fn get_user(
    State(state): State<AppState>,
    Json(payload): Json<TokenRequest>,
) -> Result<Json<Envelope<Profile>>, ApiError> {
    let token = payload.token.ok_or(ApiError::Unauthorized)?;
    let user_id = JwtKeys::from_ref(&state).verify(&token)?;

    let Some(user) = state.users.find_by_id(user_id).await? else {
        warn!(user_id = %user_id, "token user no longer exists");
        return Err(ApiError::Unauthorized);
    };

    Ok(Json(Envelope::success(Profile {
        username: user.username,
        is_staff: user.is_staff,
        favourite: user.favourite,
    })))
}
