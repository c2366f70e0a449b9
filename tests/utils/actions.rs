#![allow(dead_code)] // Test utilities may not all be used in every test

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

use leetboard::{ContestLeaderboard, USER_ID_HEADER};

use super::setup::TestSetup;

// ============================================================================
// Action Helpers
// ============================================================================

impl TestSetup {
    /// Send a request through the full router and decode the JSON body, if any
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        user: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header(USER_ID_HEADER, user);
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        (status, value)
    }

    // ============================================================================
    // Convenience Action Methods
    // ============================================================================

    /// Create or update a profile, optionally linked to an external username
    pub async fn save_profile(&self, user: &str, username: &str, leetcode: Option<&str>) {
        let (status, _) = self
            .send(
                Method::PUT,
                "/profile",
                Some(user),
                Some(json!({ "username": username, "leetcode_username": leetcode })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "profile for {} should be saved", user);
    }

    /// Create a seven day contest and return its id
    pub async fn create_contest(&self, creator: &str, title: &str, max_participants: i32) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/contests",
                Some(creator),
                Some(json!({
                    "title": title,
                    "duration_days": 7,
                    "max_participants": max_participants,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "contest should be created: {}", body);
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn join(&self, user: &str, contest_id: &str) -> StatusCode {
        self.send(
            Method::POST,
            &format!("/contests/{}/join", contest_id),
            Some(user),
            None,
        )
        .await
        .0
    }

    pub async fn leave(&self, user: &str, contest_id: &str) -> StatusCode {
        self.send(
            Method::DELETE,
            &format!("/contests/{}/join", contest_id),
            Some(user),
            None,
        )
        .await
        .0
    }

    /// Save a linked profile and join the contest in one step
    pub async fn enroll(&self, user: &str, name: &str, leetcode: Option<&str>, contest_id: &str) {
        self.save_profile(user, name, leetcode).await;
        assert_eq!(self.join(user, contest_id).await, StatusCode::OK);
    }

    pub async fn leaderboard(&self, contest_id: &str) -> ContestLeaderboard {
        let (status, body) = self
            .send(
                Method::GET,
                &format!("/contests/{}/leaderboard", contest_id),
                None,
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "leaderboard should load: {}", body);
        serde_json::from_value(body).unwrap()
    }
}
