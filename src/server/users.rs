//! User profile API routes. All of them (except the partial-profile
//! endpoint) require a verified session.

use super::envelope;
use super::session::Session;
use super::state::{ServerState, SharedUserStore};
use crate::user_store::{AuthProvider, NewUserProfile, UserUpdate};

use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

async fn get_profile(session: Session, State(user_store): State<SharedUserStore>) -> Response {
    match user_store.get_user(&session.uid) {
        Ok(Some(user)) => envelope::success(StatusCode::OK, user),
        Ok(None) => envelope::error(StatusCode::NOT_FOUND, "Not found"),
        Err(err) => {
            error!("Failed to fetch profile: {:#}", err);
            envelope::error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Error")
        }
    }
}

async fn get_partial_profile(
    session: Option<Session>,
    State(user_store): State<SharedUserStore>,
) -> Response {
    let session = match session {
        Some(session) => session,
        None => {
            return envelope::success(
                StatusCode::OK,
                json!({"img": null, "name": null, "isLoggedIn": false}),
            )
        }
    };
    match user_store.get_user(&session.uid) {
        Ok(Some(user)) => envelope::success(
            StatusCode::OK,
            json!({"img": user.profile_image, "name": user.name, "isLoggedIn": true}),
        ),
        Ok(None) => envelope::error(StatusCode::NOT_FOUND, "Not found"),
        Err(err) => {
            error!("Failed to fetch partial profile: {:#}", err);
            envelope::error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Error")
        }
    }
}

async fn update_profile(
    session: Session,
    State(user_store): State<SharedUserStore>,
    Json(update): Json<UserUpdate>,
) -> Response {
    match user_store.update_user(&session.uid, update) {
        Ok(Some(user)) => envelope::success(
            StatusCode::OK,
            json!({"user": user, "msg": "Profile updated successfully"}),
        ),
        Ok(None) => envelope::error(StatusCode::NOT_FOUND, "Not found"),
        Err(err) => {
            error!("Failed to update profile: {:#}", err);
            envelope::error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Error")
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct CreateUserBody {
    email: Option<String>,
    name: Option<String>,
    profile_image: Option<String>,
}

fn signup(
    session: Session,
    user_store: SharedUserStore,
    body: CreateUserBody,
    auth_provider: AuthProvider,
) -> Response {
    let email = match body.email.filter(|e| !e.trim().is_empty()) {
        Some(email) => email,
        None => return envelope::error(StatusCode::BAD_REQUEST, "Bad Request"),
    };
    let new_user = NewUserProfile {
        uid: session.uid,
        email,
        name: body.name,
        profile_image: body.profile_image,
        auth_provider,
    };
    match user_store.create_user(new_user) {
        Ok(user) => envelope::success(StatusCode::OK, json!({"user": user})),
        Err(err) => {
            error!("Failed to create user: {:#}", err);
            envelope::error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Error")
        }
    }
}

async fn create_user(
    session: Session,
    State(user_store): State<SharedUserStore>,
    Json(body): Json<CreateUserBody>,
) -> Response {
    signup(session, user_store, body, AuthProvider::EmailPassword)
}

async fn google_login(
    session: Session,
    State(user_store): State<SharedUserStore>,
    Json(body): Json<CreateUserBody>,
) -> Response {
    signup(session, user_store, body, AuthProvider::Google)
}

pub fn make_user_routes(state: ServerState) -> Router {
    Router::new()
        .route("/get-profile", get(get_profile))
        .route("/get-partial-profile", get(get_partial_profile))
        .route("/update-profile", patch(update_profile))
        .route("/create-user", post(create_user))
        .route("/google-login", post(google_login))
        .with_state(state)
}
