//! Membership mutation integration tests: add, update, remove

use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use teamgate_auth::OrgRole;
use teamgate_teams::{PermissionTable, PermissionType};

use crate::common::*;

mod test_add_member {
    use super::*;

    #[test_log::test(tokio::test)]
    async fn test_team_admin_adds_user_as_admin() {
        let app = TestApp::new();
        let req = authed_request(
            Method::POST,
            &members_uri(TEAM),
            &team_admin_jwt(),
            Some(json!({ "userId": OUTSIDER, "permission": 4 })),
        );

        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = parse_body(resp).await;
        assert_eq!(body["message"], "Member added to Team");

        assert_eq!(app.store.mapped_labels(), vec!["Admin".to_string()]);
        let writes = app.store.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].resource_id, "3");
        assert_eq!(
            writes[0].actions,
            PermissionTable::teams().map_permission("Admin").unwrap()
        );
        assert_eq!(
            app.store.member(ORG, TEAM, OUTSIDER),
            Some((PermissionType::Admin, false))
        );
    }

    #[tokio::test]
    async fn test_permission_defaults_to_member() {
        let app = TestApp::new();
        let req = authed_request(
            Method::POST,
            &members_uri(TEAM),
            &org_admin_jwt(),
            Some(json!({ "userId": OUTSIDER })),
        );

        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(app.store.mapped_labels(), vec!["Member".to_string()]);
        assert_eq!(
            app.store.member(ORG, TEAM, OUTSIDER),
            Some((PermissionType::Member, false))
        );
    }

    #[tokio::test]
    async fn test_adding_existing_member_conflicts() {
        let app = TestApp::new();
        let req = authed_request(
            Method::POST,
            &members_uri(TEAM),
            &team_admin_jwt(),
            Some(json!({ "userId": TEAM_MEMBER, "permission": 4 })),
        );

        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body = parse_body(resp).await;
        assert_eq!(body["error"]["code"], "CONFLICT");
        assert!(app.store.writes().is_empty());
    }

    #[tokio::test]
    async fn test_plain_member_is_forbidden() {
        let app = TestApp::new();
        let req = authed_request(
            Method::POST,
            &members_uri(TEAM),
            &team_member_jwt(),
            Some(json!({ "userId": OUTSIDER })),
        );

        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body = parse_body(resp).await;
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Not allowed to add team member"));
        assert!(app.store.writes().is_empty());
    }

    #[tokio::test]
    async fn test_fine_grained_mode_lets_request_through() {
        let app = TestApp::fine_grained();
        let req = authed_request(
            Method::POST,
            &members_uri(TEAM),
            &team_member_jwt(),
            Some(json!({ "userId": OUTSIDER })),
        );

        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_user_id_is_bad_request() {
        let app = TestApp::new();
        let req = authed_request(
            Method::POST,
            &members_uri(TEAM),
            &team_admin_jwt(),
            Some(json!({ "userId": 0 })),
        );

        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(app.store.writes().is_empty());
    }

    #[tokio::test]
    async fn test_unmapped_permission_is_bad_request() {
        let app = TestApp::new();
        let req = authed_request(
            Method::POST,
            &members_uri(TEAM),
            &team_admin_jwt(),
            Some(json!({ "userId": OUTSIDER, "permission": 1 })),
        );

        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(app.store.writes().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_internal_error() {
        let app = TestApp::fine_grained();
        app.store.fail_writes();
        let req = authed_request(
            Method::POST,
            &members_uri(TEAM),
            &team_admin_jwt(),
            Some(json!({ "userId": OUTSIDER })),
        );

        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = parse_body(resp).await;
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    }
}

mod test_update_member {
    use super::*;

    #[tokio::test]
    async fn test_update_to_zero_level_uses_member_label() {
        let app = TestApp::new();
        let req = authed_request(
            Method::PUT,
            &member_uri(TEAM, SYNCED),
            &team_admin_jwt(),
            Some(json!({ "permission": 0 })),
        );

        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = parse_body(resp).await;
        assert_eq!(body["message"], "Team member updated");
        assert_eq!(app.store.mapped_labels(), vec!["Member".to_string()]);
        // External sync flag survives the update
        assert_eq!(
            app.store.member(ORG, TEAM, SYNCED),
            Some((PermissionType::Member, true))
        );
    }

    #[tokio::test]
    async fn test_promote_member_to_admin() {
        let app = TestApp::new();
        let req = authed_request(
            Method::PUT,
            &member_uri(TEAM, TEAM_MEMBER),
            &org_admin_jwt(),
            Some(json!({ "permission": 4 })),
        );

        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            app.store.member(ORG, TEAM, TEAM_MEMBER),
            Some((PermissionType::Admin, false))
        );
    }

    #[tokio::test]
    async fn test_updating_non_member_is_not_found() {
        let app = TestApp::new();
        let req = authed_request(
            Method::PUT,
            &member_uri(TEAM, OUTSIDER),
            &team_admin_jwt(),
            Some(json!({ "permission": 4 })),
        );

        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(app.store.writes().is_empty());
    }

    #[tokio::test]
    async fn test_viewer_is_forbidden() {
        let app = TestApp::new();
        let jwt = create_test_jwt(OUTSIDER, "outsider", OrgRole::Viewer);
        let req = authed_request(
            Method::PUT,
            &member_uri(TEAM, TEAM_MEMBER),
            &jwt,
            Some(json!({ "permission": 4 })),
        );

        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert!(app.store.writes().is_empty());
    }
}

mod test_remove_member {
    use super::*;

    #[tokio::test]
    async fn test_remove_member_writes_empty_action_set() {
        let app = TestApp::new();
        let req = authed_request(
            Method::DELETE,
            &member_uri(TEAM, TEAM_MEMBER),
            &team_admin_jwt(),
            None,
        );

        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = parse_body(resp).await;
        assert_eq!(body["message"], "Team Member removed");

        let writes = app.store.writes();
        assert_eq!(writes.len(), 1);
        assert!(writes[0].actions.is_empty());
        assert_eq!(app.store.member(ORG, TEAM, TEAM_MEMBER), None);
    }

    #[tokio::test]
    async fn test_removing_non_member_is_not_found() {
        let app = TestApp::new();
        let req = authed_request(
            Method::DELETE,
            &member_uri(TEAM, OUTSIDER),
            &team_admin_jwt(),
            None,
        );

        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = parse_body(resp).await;
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Team member not found"));
    }

    #[tokio::test]
    async fn test_removing_from_unknown_team_is_not_found() {
        let app = TestApp::new();
        let req = authed_request(
            Method::DELETE,
            &member_uri(99, TEAM_MEMBER),
            &org_admin_jwt(),
            None,
        );

        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = parse_body(resp).await;
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Team not found"));
    }

    #[tokio::test]
    async fn test_plain_member_cannot_remove() {
        let app = TestApp::new();
        let req = authed_request(
            Method::DELETE,
            &member_uri(TEAM, TEAM_ADMIN),
            &team_member_jwt(),
            None,
        );

        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert!(app.store.writes().is_empty());
        assert!(app.store.member(ORG, TEAM, TEAM_ADMIN).is_some());
    }
}
