//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers::{auth, health, reactions, reviews, titles, users};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(reaction_routes())
        .merge(title_routes())
        .merge(review_routes())
        .merge(user_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/token", post(auth::login))
}

/// Reaction routes
fn reaction_routes() -> Router<AppState> {
    Router::new()
        .route("/reaction", post(reactions::apply_reaction))
        .route("/reaction/count", get(reactions::count_reactions))
}

/// Title routes
fn title_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/titles",
            get(titles::list_titles).post(titles::create_title),
        )
        // GET addresses a title by slug, PATCH and DELETE by id
        .route(
            "/titles/:title",
            get(titles::get_title)
                .put(titles::replace_title)
                .patch(titles::update_title)
                .delete(titles::delete_title),
        )
}

/// Review routes
fn review_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/reviews",
            get(reviews::list_reviews).post(reviews::create_review),
        )
        .route(
            "/reviews/:review_id",
            get(reviews::get_review).delete(reviews::delete_review),
        )
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/current", get(users::get_current_user))
        .route("/users/register", post(users::register))
        .route("/users/account/activation", post(users::activate_account))
        .route(
            "/users/reset/password/email",
            post(users::send_password_reset_email),
        )
        .route(
            "/users/reset/password/token/verification",
            post(users::verify_reset_token),
        )
        .route("/users/reset/password", post(users::reset_password))
        .route(
            "/users/change/password",
            post(users::change_password).patch(users::change_password),
        )
        .route(
            "/users/:user_id",
            patch(users::update_user).delete(users::delete_user),
        )
}
