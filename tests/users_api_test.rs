mod common;

use admin_panel::database::user_store::UserStore;
use admin_panel::models::user::Role;
use axum::http::StatusCode;
use common::{token_for, TestApp};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn admin_manages_directory_end_to_end() {
    let t = TestApp::new();
    let admin = t.seed_user("Alice Admin", Role::Admin).await;
    let user = t.seed_user("Bob User", Role::User).await;
    let token = token_for(admin.id);

    let (status, body) = t.send("GET", "/api/v1/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["results"], 2);
    assert_eq!(body["data"][1]["id"], user.id.to_string());
    assert_eq!(body["data"][1]["role"], "user");

    let (status, body) = t
        .send(
            "PATCH",
            &format!("/api/v1/users/{}/role", user.id),
            Some(&token),
            Some(json!({ "role": "organizer" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let updated = &body["data"]["user"];
    assert_eq!(updated["role"], "organizer");
    assert_eq!(updated["id"], user.id.to_string());
    assert_eq!(updated["name"], user.name);
    assert_eq!(updated["email"], user.email);
    let created_at: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(updated["createdAt"].clone()).unwrap();
    assert_eq!(created_at, user.created_at);

    let (status, body) = t
        .send(
            "PATCH",
            &format!("/api/v1/users/{}/role", admin.id),
            Some(&token),
            Some(json!({ "role": "user" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Admin cannot change their own role");

    let uri = format!("/api/v1/users/{}", user.id);
    let (status, body) = t.send("DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, body) = t.send("DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No user found with that ID");

    assert_eq!(t.users.list().await.unwrap().len(), 1);
    assert_eq!(t.users.find_by_id(admin.id).await.unwrap().unwrap().role, Role::Admin);
}

#[tokio::test]
async fn invalid_roles_are_rejected_and_leave_target_unchanged() {
    let t = TestApp::new();
    let admin = t.seed_user("Alice Admin", Role::Admin).await;
    let user = t.seed_user("Bob User", Role::User).await;
    let token = token_for(admin.id);
    let uri = format!("/api/v1/users/{}/role", user.id);

    for bad in [json!({ "role": "invalid_role" }), json!({ "role": "Admin" }), json!({ "role": "" }), json!({})] {
        let (status, body) = t.send("PATCH", &uri, Some(&token), Some(bad.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", bad);
        assert_eq!(body["status"], "fail");
    }

    let (_, body) = t
        .send("PATCH", &uri, Some(&token), Some(json!({ "role": "superuser" })))
        .await;
    assert_eq!(body["message"], "Invalid role specified");

    let stored = t.users.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.role, Role::User);
}

#[tokio::test]
async fn self_actions_are_forbidden_before_existence_is_checked() {
    let t = TestApp::new();
    let admin = t.seed_user("Alice Admin", Role::Admin).await;
    let token = token_for(admin.id);

    let (status, body) = t
        .send("DELETE", &format!("/api/v1/users/{}", admin.id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Admin cannot delete their own account");

    let unknown = Uuid::new_v4();
    let (status, _) = t
        .send("DELETE", &format!("/api/v1/users/{}", unknown), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = t
        .send(
            "PATCH",
            &format!("/api/v1/users/{}/role", unknown),
            Some(&token),
            Some(json!({ "role": "admin" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No user found with that ID");
}

#[tokio::test]
async fn gate_rejects_missing_tokens_and_non_admins() {
    let t = TestApp::new();
    let admin = t.seed_user("Alice Admin", Role::Admin).await;
    let organizer = t.seed_user("Olga Organizer", Role::Organizer).await;
    let user = t.seed_user("Bob User", Role::User).await;

    let (status, body) = t.send("GET", "/api/v1/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], "fail");

    let (status, _) = t.send("GET", "/api/v1/users", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    for principal in [&organizer, &user] {
        let token = token_for(principal.id);
        let (status, body) = t.send("GET", "/api/v1/users", Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "You do not have permission to perform this action");

        let (status, _) = t
            .send(
                "PATCH",
                &format!("/api/v1/users/{}/role", admin.id),
                Some(&token),
                Some(json!({ "role": "user" })),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = t
            .send("DELETE", &format!("/api/v1/users/{}", admin.id), Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    assert_eq!(t.users.list().await.unwrap().len(), 3);
}

#[tokio::test]
async fn role_changes_apply_to_existing_tokens() {
    let t = TestApp::new();
    let root = t.seed_user("Root", Role::Admin).await;
    let second = t.seed_user("Second Admin", Role::Admin).await;
    let root_token = token_for(root.id);
    let second_token = token_for(second.id);

    let (status, _) = t
        .send(
            "PATCH",
            &format!("/api/v1/users/{}/role", second.id),
            Some(&root_token),
            Some(json!({ "role": "user" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = t.send("GET", "/api/v1/users", Some(&second_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    t.send("DELETE", &format!("/api/v1/users/{}", second.id), Some(&root_token), None)
        .await;
    let (status, body) = t.send("GET", "/api/v1/users", Some(&second_token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "The user belonging to this token no longer exists.");
}

#[tokio::test]
async fn responses_never_carry_credentials() {
    let t = TestApp::new();
    let admin = t.seed_user("Alice Admin", Role::Admin).await;
    let user = t.seed_user("Bob User", Role::User).await;
    let token = token_for(admin.id);

    let (_, list) = t.send("GET", "/api/v1/users", Some(&token), None).await;
    let (_, updated) = t
        .send(
            "PATCH",
            &format!("/api/v1/users/{}/role", user.id),
            Some(&token),
            Some(json!({ "role": "admin" })),
        )
        .await;

    for body in [list, updated] {
        let text = body.to_string();
        assert!(!text.contains("argon2"));
        assert!(!text.to_lowercase().contains("password"));
    }
}

#[tokio::test]
async fn malformed_ids_are_bad_requests() {
    let t = TestApp::new();
    let admin = t.seed_user("Alice Admin", Role::Admin).await;
    let token = token_for(admin.id);

    let (status, body) = t.send("DELETE", "/api/v1/users/42", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid id");
}

#[tokio::test]
async fn management_routes_are_rate_limited() {
    let t = TestApp::with_rps(2);
    let admin = t.seed_user("Alice Admin", Role::Admin).await;
    let token = token_for(admin.id);

    for _ in 0..2 {
        let (status, _) = t.send("GET", "/api/v1/users", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, body) = t.send("GET", "/api/v1/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["status"], "fail");

    let (status, _) = t.send("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn openapi_document_lists_management_paths() {
    let t = TestApp::new();
    let (status, body) = t.send("GET", "/api-docs/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/users/{id}/role"]["patch"].is_object());
    assert!(body["components"]["securitySchemes"]["bearer_auth"].is_object());
}
