//! Route table and handlers.
//!
//! | Method | Path                 | Auth | Handler          |
//! |--------|----------------------|------|------------------|
//! | GET    | `/health`            | no   | `health`         |
//! | POST   | `/register`          | no   | `register`       |
//! | GET    | `/users/{username}`  | no   | `get_user`       |
//! | GET    | `/profile`           | yes  | `get_profile`    |
//! | PATCH  | `/profile`           | yes  | `update_profile` |
//! | POST   | `/follow/{username}` | yes  | `follow_toggle`  |

use axum::{
    extract::{Path, State},
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::auth::{token_auth_middleware, Actor};
use crate::directory::{DirectoryError, User, UserId};
use crate::http::response::Detail;
use crate::http::server::AppState;
use crate::relationship::FollowError;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: User,
    pub token: String,
}

/// Partial update; an absent field is left unchanged, an empty bio clears it.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub id: UserId,
    pub username: String,
    pub bio: Option<String>,
    pub followers: Vec<String>,
    pub following: Vec<String>,
}

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/follow/{username}", post(follow_toggle))
        .route("/profile", get(get_profile).patch(update_profile))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            token_auth_middleware,
        ));

    Router::new()
        .route("/health", get(health))
        .route("/register", post(register))
        .route("/users/{username}", get(get_user))
        .merge(protected)
        .with_state(state)
}

fn profile_view(state: &AppState, user: User) -> ProfileView {
    let names = |users: Vec<User>| -> Vec<String> { users.into_iter().map(|u| u.username).collect() };
    ProfileView {
        followers: names(state.follows.followers(&user)),
        following: names(state.follows.following(&user)),
        id: user.id,
        username: user.username,
        bio: user.bio,
    }
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, DirectoryError> {
    let user = state.directory.register(&body.username, body.bio)?;
    let token = state.tokens.get_or_create(user.id);
    Ok(Json(RegisterResponse { user, token }))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<ProfileView>, DirectoryError> {
    let user = state.directory.resolve(&username)?;
    Ok(Json(profile_view(&state, user)))
}

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(Actor(actor)): Extension<Actor>,
) -> Json<ProfileView> {
    Json(profile_view(&state, actor))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(Actor(actor)): Extension<Actor>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileView>, DirectoryError> {
    let user = match body.bio {
        Some(bio) => {
            let bio = (!bio.is_empty()).then_some(bio);
            state.directory.update_bio(actor.id, bio)?
        }
        None => actor,
    };
    Ok(Json(profile_view(&state, user)))
}

pub async fn follow_toggle(
    State(state): State<AppState>,
    Extension(Actor(actor)): Extension<Actor>,
    Path(username): Path<String>,
) -> Result<Json<Detail>, FollowError> {
    let outcome = state.follows.toggle_follow(&actor, &username)?;
    Ok(Json(Detail::new(outcome.detail())))
}
