//! Authentication test helpers

use serde_json::{json, Value};
use uuid::Uuid;

use super::app::{TestApp, ADMIN_EMAIL};

pub const TEST_PASSWORD: &str = "secret123";

/// A signed-up user and their session token
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub token: String,
}

impl TestUser {
    pub fn token(&self) -> Option<&str> {
        Some(&self.token)
    }
}

pub async fn create_test_user(app: &TestApp, username: &str, email: &str) -> TestUser {
    let response = app
        .post(
            "/api/auth/signup",
            None,
            json!({ "username": username, "email": email, "password": TEST_PASSWORD }),
        )
        .await;
    assert_eq!(response.status, 200, "signup failed: {}", response.body);
    user_from_auth_body(&response.body)
}

/// A reader with a unique username and email
pub async fn create_unique_test_user(app: &TestApp) -> TestUser {
    let tag = &Uuid::new_v4().simple().to_string()[..8];
    create_test_user(app, &format!("user_{tag}"), &format!("{tag}@example.com")).await
}

pub async fn create_admin(app: &TestApp) -> TestUser {
    create_test_user(app, "the_admin", ADMIN_EMAIL).await
}

pub fn user_from_auth_body(body: &Value) -> TestUser {
    TestUser {
        id: body["user"]["_id"].as_str().unwrap_or_default().to_string(),
        username: body["user"]["username"].as_str().unwrap_or_default().to_string(),
        email: body["user"]["email"].as_str().unwrap_or_default().to_string(),
        token: body["token"].as_str().unwrap_or_default().to_string(),
    }
}

/// Create a post as `admin` and return its JSON
pub async fn create_post(app: &TestApp, admin: &TestUser, title: &str, content: &str) -> Value {
    let response = app
        .post(
            "/api/post/create",
            admin.token(),
            json!({ "title": title, "content": content }),
        )
        .await;
    assert_eq!(response.status, 201, "post creation failed: {}", response.body);
    response.body
}
