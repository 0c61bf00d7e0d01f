//! User account handlers.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use serde::{Deserialize, Serialize};

use frognote_auth::gate::bearer_token;
use frognote_core::error::AppError;
use frognote_core::result::AppResult;
use frognote_entity::user::{SignInId, User, validate_password, validate_screen_name};

use super::{finish, read_json, require_json, require_method, require_user};
use crate::dispatch::Route;
use crate::error::Reply;
use crate::logger::Logger;
use crate::state::AppState;

/// Full user document used by create, modify and get.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    pub password: String,
    pub screen_name: String,
    pub sign_in_id: String,
}

/// Credentials posted to `/user/auth`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationBody {
    pub sign_in_id: String,
    pub password: String,
}

/// Routes served by this module.
pub fn routes() -> Vec<Route> {
    vec![
        Route::new("/user/modify", modify),
        Route::new("/user/auth", authenticate),
        Route::new("/user/create", create),
        Route::new("/user/leave", leave),
        Route::new("/user/signout", sign_out),
        Route::new("/user", get),
    ]
}

/// `POST /user/create`
pub async fn create(state: AppState, request: Request<Body>, logger: Arc<Logger>) -> Reply {
    finish(create_user(&state, request).await, &logger, "create user").await
}

async fn create_user(state: &AppState, request: Request<Body>) -> AppResult<Reply> {
    require_json(&request, Method::POST)?;
    let body: UserBody = read_json(state, request).await?;

    let sign_in_id = SignInId::new(body.sign_in_id)?;
    validate_screen_name(&body.screen_name)?;
    validate_password(&body.password)?;

    let digest = state.hasher.hash(&body.password);
    let user = state
        .users
        .create(&sign_in_id, &digest, &body.screen_name)
        .await?;

    tracing::info!(user_id = %user.id, "User created");
    Ok(Reply::empty())
}

/// `POST /user/auth`: exchange credentials for a session token.
pub async fn authenticate(state: AppState, request: Request<Body>, logger: Arc<Logger>) -> Reply {
    finish(sign_in(&state, request).await, &logger, "authenticate").await
}

async fn sign_in(state: &AppState, request: Request<Body>) -> AppResult<Reply> {
    require_json(&request, Method::POST)?;
    let body: AuthenticationBody = read_json(state, request).await?;

    // Hashed up front so an unknown sign-in id costs as much as a wrong password.
    let digest = state.hasher.hash(&body.password);
    let user = match SignInId::new(body.sign_in_id) {
        Ok(sign_in_id) => state.users.find_by_sign_in_id(&sign_in_id).await?,
        Err(_) => None,
    };

    match user {
        Some(user) if state.hasher.matches(&digest, &user.password) => {
            let token = state.sessions.issue(user.id);
            Ok(Reply::text(token))
        }
        _ => Err(AppError::authentication("Unknown sign-in id or wrong password")),
    }
}

/// `GET /user`
pub async fn get(state: AppState, request: Request<Body>, logger: Arc<Logger>) -> Reply {
    finish(get_user(&state, request).await, &logger, "get user").await
}

async fn get_user(state: &AppState, request: Request<Body>) -> AppResult<Reply> {
    let user_id = require_user(state, &request)?;
    require_method(&request, Method::GET)?;

    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))?;

    Reply::json(&UserBody {
        password: user.password,
        screen_name: user.screen_name,
        sign_in_id: user.sign_in_id.into_inner(),
    })
}

/// `PATCH /user/modify`: replace the caller's profile.
///
/// A submitted password equal to the stored digest keeps the digest;
/// anything else is treated as a new plaintext password.
pub async fn modify(state: AppState, request: Request<Body>, logger: Arc<Logger>) -> Reply {
    finish(modify_user(&state, request).await, &logger, "modify user").await
}

async fn modify_user(state: &AppState, request: Request<Body>) -> AppResult<Reply> {
    let user_id = require_user(state, &request)?;
    require_json(&request, Method::PATCH)?;
    let body: UserBody = read_json(state, request).await?;

    let current = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))?;

    let sign_in_id = SignInId::new(body.sign_in_id)?;
    if sign_in_id != current.sign_in_id {
        if let Some(other) = state.users.find_by_sign_in_id(&sign_in_id).await? {
            if other.id != user_id {
                return Err(AppError::conflict("signInId is already taken"));
            }
        }
    }

    let password = if body.password == current.password {
        current.password
    } else {
        validate_password(&body.password)?;
        state.hasher.hash(&body.password)
    };

    let user = User::new(user_id, body.screen_name, sign_in_id, password)?;
    state.users.update(&user).await?;
    Ok(Reply::empty())
}

/// `DELETE /user/signout`: revoke the caller's token.
pub async fn sign_out(state: AppState, request: Request<Body>, logger: Arc<Logger>) -> Reply {
    finish(sign_out_user(&state, &request), &logger, "sign out").await
}

fn sign_out_user(state: &AppState, request: &Request<Body>) -> AppResult<Reply> {
    require_user(state, request)?;
    require_method(request, Method::DELETE)?;

    if let Some(token) = bearer_token(request) {
        state.sessions.revoke(token);
    }
    Ok(Reply::empty())
}

/// `DELETE /user/leave`: delete the caller and their backups, and end
/// every session they still hold.
pub async fn leave(state: AppState, request: Request<Body>, logger: Arc<Logger>) -> Reply {
    finish(leave_user(&state, request).await, &logger, "leave").await
}

async fn leave_user(state: &AppState, request: Request<Body>) -> AppResult<Reply> {
    let user_id = require_user(state, &request)?;
    require_method(&request, Method::DELETE)?;

    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))?;
    state.users.delete(&user.sign_in_id).await?;

    let revoked = state.sessions.revoke_user(user_id);
    tracing::info!(user_id = %user_id, revoked, "User left");
    Ok(Reply::empty())
}
