//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET, API_PORT
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get_root("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get_root("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Account Tests
// ============================================================================

#[tokio::test]
async fn test_register_activate_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.register_user().await.unwrap();

    let response = server.get_auth("/users/current", &user.token).await.unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.id, user.id);
    assert_eq!(me.username, user.username);
    assert_eq!(me.role, "user");
    assert!(me.is_active);
}

#[tokio::test]
async fn test_login_before_activation_is_forbidden() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();
    let response = server.post("/users/register", &request).await.unwrap();
    let detail: DetailResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(!detail.detail.is_empty());

    let response = server
        .post_form("/auth/token", &LoginForm::from_register(&request))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_register_duplicate_username() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    server.post("/users/register", &request).await.unwrap();
    let response = server.post("/users/register", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let form = LoginForm {
        username: format!("nobody_{}", unique_suffix()),
        password: "wrongpass".to_string(),
    };

    let response = server.post_form("/auth/token", &form).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_current_user_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/users/current").await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.error.message, "Not authenticated");

    let response = server.get_auth("/users/current", "not-a-jwt").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_password_reset_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.register_user().await.unwrap();

    let response = server
        .post_empty(&format!("/users/reset/password/email?email={}", user.email))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let reset_token = server.mailed_token(&user.email, "?token=").unwrap();

    let response = server
        .post_empty(&format!(
            "/users/reset/password/token/verification?reset_password_token={reset_token}"
        ))
        .await
        .unwrap();
    let user_id: i64 = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(user_id, user.id);

    let response = server
        .post(
            "/users/reset/password",
            &json!({ "new_password": "BrandNew456!", "reset_password_token": reset_token }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    server.login(&user.username, "BrandNew456!").await.unwrap();
}

#[tokio::test]
async fn test_reset_email_for_unknown_address_fails() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post_empty(&format!(
            "/users/reset/password/email?email=ghost_{}@example.com",
            unique_suffix()
        ))
        .await
        .unwrap();
    assert_status(response, StatusCode::INTERNAL_SERVER_ERROR)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_change_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.register_user().await.unwrap();

    let response = server
        .post_auth(
            "/users/change/password",
            &user.token,
            &json!({ "current_password": "wrong-password", "new_password": "Another789!" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .patch_auth(
            "/users/change/password",
            &user.token,
            &json!({ "current_password": user.password, "new_password": "Another789!" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    server.login(&user.username, "Another789!").await.unwrap();
}

// ============================================================================
// User Administration Tests
// ============================================================================

#[tokio::test]
async fn test_user_listing_is_admin_only() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.register_user().await.unwrap();
    let admin = server.seed_admin().await.unwrap();

    let response = server.get_auth("/users", &user.token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .get_auth(&format!("/users?username={}", user.username), &admin.token)
        .await
        .unwrap();
    let list: UserListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list.total, 1);
    assert_eq!(list.users[0].id, user.id);
}

#[tokio::test]
async fn test_user_cannot_promote_self() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.register_user().await.unwrap();
    let path = format!("/users/{}", user.id);

    let response = server
        .patch_auth(&path, &user.token, &json!({ "role": "admin" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .patch_auth(&path, &user.token, &json!({ "avatar": "me.png" }))
        .await
        .unwrap();
    let updated: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.avatar.as_deref(), Some("me.png"));
    assert_eq!(updated.role, "user");
}

#[tokio::test]
async fn test_admin_creates_and_deletes_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.seed_admin().await.unwrap();
    let suffix = unique_suffix();

    let response = server
        .post_auth(
            "/users",
            &admin.token,
            &json!({
                "username": format!("made_{suffix}"),
                "email": format!("made_{suffix}@example.com"),
                "password": "MadeByAdmin1!",
            }),
        )
        .await
        .unwrap();
    let created: UserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(created.is_active);

    let response = server
        .delete_auth(&format!("/users/{}", created.id), &admin.token)
        .await
        .unwrap();
    let detail: DetailResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail.detail, "User deleted successfully");

    let response = server
        .delete_auth(&format!("/users/{}", created.id), &admin.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Title Tests
// ============================================================================

#[tokio::test]
async fn test_title_crud() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.seed_admin().await.unwrap();
    let request = CreateTitleRequest::unique();

    let response = server.post_auth("/titles", &admin.token, &request).await.unwrap();
    let title: TitleResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(title.name, request.name);
    assert_eq!(title.reviews, 0);

    let response = server.get(&format!("/titles/{}", title.slug)).await.unwrap();
    let fetched: TitleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.id, title.id);

    let response = server
        .patch_auth(
            &format!("/titles/{}", title.id),
            &admin.token,
            &json!({ "description": "Updated" }),
        )
        .await
        .unwrap();
    let updated: TitleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.description, "Updated");
    assert_eq!(updated.name, title.name);

    let response = server
        .put_auth(
            &format!("/titles/{}", title.id),
            &admin.token,
            &json!({ "name": title.name, "description": "Replaced" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let replacement_slug = format!("{}-remastered", title.slug);
    let response = server
        .put_auth(
            &format!("/titles/{}", title.id),
            &admin.token,
            &json!({
                "name": title.name,
                "slug": replacement_slug,
                "description": "Replaced",
                "trailer": "trailer.mp4",
                "image": "cover.png",
            }),
        )
        .await
        .unwrap();
    let replaced: TitleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(replaced.slug, replacement_slug);
    assert_eq!(replaced.trailer.as_deref(), Some("trailer.mp4"));

    let response = server
        .delete_auth(&format!("/titles/{}", title.id), &admin.token)
        .await
        .unwrap();
    let detail: DetailResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail.detail, "Title deleted successfully");

    let response = server.get(&format!("/titles/{}", title.slug)).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_create_title_requires_admin() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.register_user().await.unwrap();

    let response = server
        .post_auth("/titles", &user.token, &CreateTitleRequest::unique())
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.error.message, "Access denied. Admin role required.");
}

#[tokio::test]
async fn test_list_titles_paging_bounds() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/titles?page=1&limit=5").await.unwrap();
    let list: TitleListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list.page, 1);
    assert_eq!(list.limit, 5);
    assert!(list.titles.len() <= 5);

    let response = server.get("/titles?limit=500").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Review Tests
// ============================================================================

#[tokio::test]
async fn test_review_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.seed_admin().await.unwrap();
    let author = server.register_user().await.unwrap();
    let other = server.register_user().await.unwrap();

    let response = server
        .post_auth("/titles", &admin.token, &CreateTitleRequest::unique())
        .await
        .unwrap();
    let title: TitleResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            "/reviews",
            &author.token,
            &CreateReviewRequest {
                title_id: title.id,
                content: "Worth watching".to_string(),
            },
        )
        .await
        .unwrap();
    let review: ReviewResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(review.user_id, author.id);
    assert_eq!(review.title_id, title.id);

    let response = server.get(&format!("/titles/{}", title.slug)).await.unwrap();
    let fetched: TitleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.reviews, 1);

    let path = format!("/reviews/{}", review.id);
    let response = server.delete_auth(&path, &other.token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.delete_auth(&path, &author.token).await.unwrap();
    let detail: DetailResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail.detail, "Review deleted successfully");

    let response = server.get(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_review_for_missing_title() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.register_user().await.unwrap();

    let response = server
        .post_auth(
            "/reviews",
            &user.token,
            &CreateReviewRequest {
                title_id: i64::MAX,
                content: "Nothing to review".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_reaction_toggle_and_counts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.seed_admin().await.unwrap();
    let alice = server.register_user().await.unwrap();
    let bob = server.register_user().await.unwrap();

    let response = server
        .post_auth("/titles", &admin.token, &CreateTitleRequest::unique())
        .await
        .unwrap();
    let title: TitleResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let like = ReactionRequest::title(title.id, "like");
    let dislike = ReactionRequest::title(title.id, "dislike");

    // alice likes, bob likes then switches to dislike
    for (user, body) in [(&alice, &like), (&bob, &like), (&bob, &dislike)] {
        let response = server.post_auth("/reaction", &user.token, body).await.unwrap();
        assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
    }

    let path = format!("/reaction/count?title_ids={}", title.id);
    let response = server.get_auth(&path, &bob.token).await.unwrap();
    let counts: ReactionCountsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(counts.reactions.len(), 1);
    let tally = &counts.reactions[0];
    assert_eq!(tally.title_id, Some(title.id));
    assert_eq!(tally.likes, 1);
    assert_eq!(tally.dislikes, 1);
    assert_eq!(tally.current_user_reaction.as_deref(), Some("dislike"));

    // Repeated keys address the same buckets as a comma list
    let repeated = format!("/reaction/count?title_ids={0}&title_ids={0}", title.id);
    let response = server.get(&repeated).await.unwrap();
    let counts: ReactionCountsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(counts.reactions.len(), 1);
    assert_eq!(counts.reactions[0].title_id, Some(title.id));

    // Repeating the same reaction removes it
    let response = server.post_auth("/reaction", &alice.token, &like).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&path).await.unwrap();
    let counts: ReactionCountsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let tally = &counts.reactions[0];
    assert_eq!(tally.likes, 0);
    assert_eq!(tally.dislikes, 1);
    assert_eq!(tally.current_user_reaction, None);
}

#[tokio::test]
async fn test_review_reaction_reports_author() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.seed_admin().await.unwrap();
    let author = server.register_user().await.unwrap();
    let fan = server.register_user().await.unwrap();

    let response = server
        .post_auth("/titles", &admin.token, &CreateTitleRequest::unique())
        .await
        .unwrap();
    let title: TitleResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            "/reviews",
            &author.token,
            &CreateReviewRequest {
                title_id: title.id,
                content: "Great pacing".to_string(),
            },
        )
        .await
        .unwrap();
    let review: ReviewResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth("/reaction", &fan.token, &ReactionRequest::review(review.id, "like"))
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get(&format!("/reaction/count?review_ids={}", review.id))
        .await
        .unwrap();
    let counts: ReactionCountsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let tally = &counts.reactions[0];
    assert_eq!(tally.review_id, Some(review.id));
    assert_eq!(tally.user_id, Some(author.id));
    assert_eq!(tally.likes, 1);
}

#[tokio::test]
async fn test_reaction_requires_target() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.register_user().await.unwrap();

    let response = server
        .post_auth("/reaction", &user.token, &json!({ "type": "like" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .post_auth(
            "/reaction",
            &user.token,
            &ReactionRequest::title(i64::MAX, "like"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_reaction_count_rejects_bad_ids() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/reaction/count?title_ids=1,abc").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}
