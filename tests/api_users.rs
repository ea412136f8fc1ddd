//! User API integration tests

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use common::*;

#[tokio::test]
async fn test_get_user_is_public_and_hides_password() {
    let app = TestApp::new();
    let user = create_test_user(&app, "reader_one", "reader@example.com").await;

    let response = app.get(&format!("/api/user/{}", user.id), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "reader_one");
    assert!(response.body.get("passwordHash").is_none());
    assert!(response.body.get("password").is_none());

    let missing = app
        .get("/api/user/00000000-0000-0000-0000-000000000000", None)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let malformed = app.get("/api/user/not-a-uuid", None).await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_own_profile() {
    let app = TestApp::new();
    let user = create_test_user(&app, "reader_one", "reader@example.com").await;

    let response = app
        .put(
            &format!("/api/user/update/{}", user.id),
            user.token(),
            Some(json!({ "username": "renamed_one", "profilePicture": "https://example.com/me.png" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "renamed_one");
    assert_eq!(response.body["profilePicture"], "https://example.com/me.png");
    assert_eq!(response.body["email"], "reader@example.com");
}

#[tokio::test]
async fn test_update_other_user_is_forbidden() {
    let app = TestApp::new();
    let owner = create_test_user(&app, "reader_one", "reader@example.com").await;
    let admin = create_admin(&app).await;

    let response = app
        .put(
            &format!("/api/user/update/{}", owner.id),
            admin.token(),
            Some(json!({ "username": "hijacked" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let unchanged = app.get(&format!("/api/user/{}", owner.id), None).await;
    assert_eq!(unchanged.body["username"], "reader_one");
}

#[tokio::test]
async fn test_update_validates_and_detects_conflicts() {
    let app = TestApp::new();
    let user = create_test_user(&app, "reader_one", "reader@example.com").await;
    create_test_user(&app, "reader_two", "two@example.com").await;
    let uri = format!("/api/user/update/{}", user.id);

    let short = app
        .put(&uri, user.token(), Some(json!({ "username": "abc" })))
        .await;
    assert_eq!(short.status, StatusCode::BAD_REQUEST);

    let weak = app
        .put(&uri, user.token(), Some(json!({ "password": "abcdefgh" })))
        .await;
    assert_eq!(weak.status, StatusCode::BAD_REQUEST);

    let taken = app
        .put(&uri, user.token(), Some(json!({ "email": "two@example.com" })))
        .await;
    assert_eq!(taken.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_password_update_changes_signin() {
    let app = TestApp::new();
    let user = create_test_user(&app, "reader_one", "reader@example.com").await;
    app.put(
        &format!("/api/user/update/{}", user.id),
        user.token(),
        Some(json!({ "password": "changed789" })),
    )
    .await;

    let old = app
        .post(
            "/api/auth/signin",
            None,
            json!({ "email": "reader@example.com", "password": TEST_PASSWORD }),
        )
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);

    let new = app
        .post(
            "/api/auth/signin",
            None,
            json!({ "email": "reader@example.com", "password": "changed789" }),
        )
        .await;
    assert_eq!(new.status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_user() {
    let app = TestApp::new();
    let a = create_test_user(&app, "reader_one", "a@example.com").await;
    let b = create_test_user(&app, "reader_two", "b@example.com").await;
    let admin = create_admin(&app).await;

    let forbidden = app.delete(&format!("/api/user/delete/{}", a.id), b.token()).await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let by_self = app.delete(&format!("/api/user/delete/{}", b.id), b.token()).await;
    assert_eq!(by_self.status, StatusCode::OK);
    assert_eq!(by_self.body, "User has been deleted");

    let by_admin = app.delete(&format!("/api/user/delete/{}", a.id), admin.token()).await;
    assert_eq!(by_admin.status, StatusCode::OK);

    let gone = app.get(&format!("/api/user/{}", a.id), None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_acting_on_a_missing_account() {
    let app = TestApp::new();
    let reader = create_unique_test_user(&app).await;
    let admin = create_admin(&app).await;
    let missing = "00000000-0000-0000-0000-000000000000";

    let update = app
        .put(
            &format!("/api/user/update/{missing}"),
            reader.token(),
            Some(json!({ "username": "renamed_one" })),
        )
        .await;
    assert_eq!(update.status, StatusCode::FORBIDDEN);

    let delete = app.delete(&format!("/api/user/delete/{missing}"), reader.token()).await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);

    let by_admin = app.delete(&format!("/api/user/delete/{missing}"), admin.token()).await;
    assert_eq!(by_admin.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_a_user_keeps_their_posts_and_comments() {
    let app = TestApp::new();
    let admin = create_admin(&app).await;
    let reader = create_unique_test_user(&app).await;
    let post = create_post(&app, &admin, "Hello World", "First post").await;
    let post_id = post["_id"].as_str().unwrap();

    let comment = app
        .post(
            "/api/comment/create",
            reader.token(),
            json!({ "postId": post_id, "content": "Nice" }),
        )
        .await;
    assert_eq!(comment.status, StatusCode::CREATED);

    app.delete(&format!("/api/user/delete/{}", reader.id), reader.token())
        .await;
    app.delete(&format!("/api/user/delete/{}", admin.id), admin.token())
        .await;

    let comments = app
        .get(&format!("/api/comment/getPostComments/{post_id}"), None)
        .await;
    assert_eq!(comments.body.as_array().unwrap().len(), 1);
    assert_eq!(comments.body[0]["userId"], reader.id);

    let posts = app.get("/api/post/getposts", None).await;
    assert_eq!(posts.body["posts"][0]["userId"], admin.id);
}

#[tokio::test]
async fn test_get_users_is_admin_only() {
    let app = TestApp::new();
    let reader = create_test_user(&app, "reader_one", "reader@example.com").await;

    let anonymous = app.get("/api/user/getusers", None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let response = app.get("/api/user/getusers", reader.token()).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_message(), "You are not allowed to see all users");
}

#[tokio::test]
async fn test_get_users_lists_newest_first_with_totals() {
    let app = TestApp::new();
    let admin = create_admin(&app).await;
    for _ in 0..3 {
        create_unique_test_user(&app).await;
    }
    let newest = create_test_user(&app, "last_one", "last@example.com").await;

    let response = app.get("/api/user/getusers", admin.token()).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["totalUsers"], 5);
    assert_eq!(response.body["lastMonthUsers"], 5);
    assert_eq!(response.body["users"][0]["_id"], newest.id);
    assert!(response.body["users"][0].get("passwordHash").is_none());

    let page = app
        .get("/api/user/getusers?startIndex=1&limit=2&sort=asc", admin.token())
        .await;
    let users = page.body["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_ne!(users[0]["_id"], admin.id);
    assert_eq!(page.body["totalUsers"], 5);
}
