use serde_json::json;

use crate::common::{TestApp, routes};

mod login {
    use super::*;

    #[tokio::test]
    async fn staff_can_log_into_their_own_branch() {
        let app = TestApp::spawn().await;
        app.create_user("mei", "pass1234", "staff", "建工店").await;

        let res = app
            .post_json(
                routes::LOGIN,
                &json!({"username": "mei", "password": "pass1234", "branch": "建工店"}),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["success"], true);
        assert_eq!(res.body["user"]["username"], "mei");
        assert_eq!(res.body["user"]["branch_name"], "建工店");
        assert!(res.body["user"].get("password").is_none());
    }

    #[tokio::test]
    async fn admin_can_log_into_any_branch() {
        let app = TestApp::spawn().await;
        app.create_user("boss", "pass1234", "admin", "建工店").await;

        let res = app
            .post_json(
                routes::LOGIN,
                &json!({"username": "boss", "password": "pass1234", "branch": "鳥松店"}),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["user"]["role"], "admin");
    }

    #[tokio::test]
    async fn staff_picking_another_branch_gets_branch_mismatch() {
        let app = TestApp::spawn().await;
        app.create_user("mei", "pass1234", "staff", "建工店").await;

        let res = app
            .post_json(
                routes::LOGIN,
                &json!({"username": "mei", "password": "pass1234", "branch": "鳥松店"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["success"], false);
        assert_eq!(res.body["code"], "BRANCH_MISMATCH");
    }

    #[tokio::test]
    async fn wrong_password_is_a_credential_failure() {
        let app = TestApp::spawn().await;
        app.create_user("mei", "pass1234", "staff", "建工店").await;

        let res = app
            .post_json(
                routes::LOGIN,
                &json!({"username": "mei", "password": "nope", "branch": "鳥松店"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn unknown_user_is_a_credential_failure() {
        let app = TestApp::spawn().await;

        let res = app
            .post_json(
                routes::LOGIN,
                &json!({"username": "ghost", "password": "pass1234", "branch": "建工店"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["success"], false);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn empty_username_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_json(
                routes::LOGIN,
                &json!({"username": "  ", "password": "pass1234", "branch": "建工店"}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}
