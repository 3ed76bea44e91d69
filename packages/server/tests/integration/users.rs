use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn users_are_listed_in_id_order_without_passwords() {
    let app = TestApp::spawn().await;
    app.create_user("zed", "pass1234", "staff", "鳥松店").await;
    app.create_user("amy", "pass1234", "admin", "").await;

    let res = app.get(routes::USERS).await;

    assert_eq!(res.status, 200, "{}", res.text);
    let users = res.body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["username"], "zed");
    assert_eq!(users[1]["username"], "amy");
    assert!(users[0]["id"].as_i64().unwrap() < users[1]["id"].as_i64().unwrap());
    assert_eq!(users[0]["branch_name"], "鳥松店");
    assert_eq!(users[0]["full_name"], "zed full name");
    assert!(users.iter().all(|u| u.get("password").is_none()));
}

#[tokio::test]
async fn passwords_are_stored_hashed() {
    let app = TestApp::spawn().await;
    app.create_user("mei", "pass1234", "staff", "建工店").await;

    let stored = shelf_server::store::find_user_by_username(&app.db, "mei")
        .await
        .unwrap()
        .unwrap();
    assert_ne!(stored.password, "pass1234");
    assert!(stored.password.starts_with("$argon2"));
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let app = TestApp::spawn().await;
    app.create_user("mei", "pass1234", "staff", "建工店").await;

    let res = app
        .post_json(
            routes::USERS,
            &json!({
                "username": "mei",
                "password": "other",
                "role": "staff",
                "branch_name": "鳥松店",
                "full_name": "Another Mei",
            }),
        )
        .await;

    assert_eq!(res.status, 500);
    assert_eq!(res.body["success"], false);
    assert_eq!(res.body["code"], "INTERNAL_ERROR");

    let users = app.get(routes::USERS).await;
    assert_eq!(users.body.as_array().unwrap().len(), 1);
    assert_eq!(users.body[0]["branch_name"], "建工店");
}

#[tokio::test]
async fn malformed_body_is_a_validation_error() {
    let app = TestApp::spawn().await;

    let res = app.post_json(routes::USERS, &json!({"username": "mei"})).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["success"], false);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}
