//! tests/webhook_tests.rs
//! Pruebas del registro de webhooks contra un servidor simulado (wiremock).

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::services::webhook_service::{
        curl_example, WebhookError, WebhookManager, WEBHOOK_NOT_FOUND,
    };

    fn manager_for(base: &str) -> WebhookManager {
        WebhookManager::new(base, Duration::from_secs(5)).expect("No se pudo crear WebhookManager")
    }

    #[actix_rt::test]
    async fn created_webhook_is_retrievable_with_zero_calls() {
        let manager = manager_for("http://localhost:5678/webhook/");

        let url = manager
            .create_webhook("lead-capture", "lead-generation")
            .await
            .unwrap();
        assert_eq!(url, "http://localhost:5678/webhook/lead-capture");

        let hook = manager.get_webhook("lead-capture").await.expect("Debería existir");
        assert_eq!(hook.url, url);
        assert_eq!(hook.workflow_id, "lead-generation");
        assert_eq!(hook.calls, 0);
    }

    #[actix_rt::test]
    async fn send_increments_calls_by_exactly_one() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/webhook/lead-capture"))
            .and(body_json(json!({"name": "John Doe"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"received": true})))
            .expect(1)
            .mount(&server)
            .await;

        let manager = manager_for(&format!("{}/webhook", server.uri()));
        manager
            .create_webhook("lead-capture", "lead-generation")
            .await
            .unwrap();

        let resp = manager
            .send_webhook_data("lead-capture", &json!({"name": "John Doe"}))
            .await
            .unwrap();
        assert_eq!(resp, json!({"received": true}));

        let hook = manager.get_webhook("lead-capture").await.unwrap();
        assert_eq!(hook.calls, 1);
    }

    #[actix_rt::test]
    async fn send_to_unknown_webhook_fails() {
        let manager = manager_for("http://localhost:5678/webhook");
        let err = manager
            .send_webhook_data("missing", &json!({}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains(WEBHOOK_NOT_FOUND));
        assert!(matches!(
            err.downcast_ref::<WebhookError>(),
            Some(WebhookError::NotFound(_))
        ));
        assert!(manager.get_webhook_stats().await.is_empty());
    }

    #[actix_rt::test]
    async fn non_json_response_is_returned_as_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/webhook/plain"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Workflow was started"))
            .mount(&server)
            .await;

        let manager = manager_for(&format!("{}/webhook", server.uri()));
        manager.create_webhook("plain", "wf-1").await.unwrap();

        let resp = manager
            .send_webhook_data("plain", &json!({"a": 1}))
            .await
            .unwrap();
        assert_eq!(resp, json!("Workflow was started"));
    }

    #[actix_rt::test]
    async fn error_status_is_a_failure_but_still_counts_the_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/webhook/broken"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let manager = manager_for(&format!("{}/webhook", server.uri()));
        manager.create_webhook("broken", "wf-1").await.unwrap();

        let err = manager
            .send_webhook_data("broken", &json!({}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("500"));
        assert_eq!(manager.get_webhook("broken").await.unwrap().calls, 1);
    }

    #[actix_rt::test]
    async fn target_body_saying_not_found_is_still_a_delivery_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/webhook/h"))
            .respond_with(ResponseTemplate::new(500).set_body_string(WEBHOOK_NOT_FOUND))
            .mount(&server)
            .await;

        let manager = manager_for(&format!("{}/webhook", server.uri()));
        manager.create_webhook("h", "wf-1").await.unwrap();

        let err = manager.send_webhook_data("h", &json!({})).await.unwrap_err();
        match err.downcast_ref::<WebhookError>() {
            Some(WebhookError::Rejected { status, body }) => {
                assert_eq!(*status, 500);
                assert_eq!(body, WEBHOOK_NOT_FOUND);
            }
            other => panic!("Se esperaba Rejected, llegó {:?}", other),
        }
    }

    #[actix_rt::test]
    async fn surrounding_whitespace_is_ignored_on_lookup() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/webhook/lead"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let manager = manager_for(&format!("{}/webhook", server.uri()));
        let url = manager.create_webhook("lead ", "wf-1").await.unwrap();
        assert!(url.ends_with("/webhook/lead"));

        assert_eq!(manager.get_webhook("lead ").await.unwrap().name, "lead");
        assert!(manager.get_webhook(" lead").await.is_some());
        manager
            .send_webhook_data("lead ", &json!({}))
            .await
            .unwrap();
        assert_eq!(manager.get_webhook("lead").await.unwrap().calls, 1);
    }

    #[actix_rt::test]
    async fn same_name_replaces_previous_registration() {
        let manager = manager_for("http://localhost:5678/webhook");
        manager.create_webhook("dup", "first").await.unwrap();
        manager.create_webhook("dup", "second").await.unwrap();

        let stats = manager.get_webhook_stats().await;
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].workflow_id, "second");
    }

    #[actix_rt::test]
    async fn empty_name_is_rejected() {
        let manager = manager_for("http://localhost:5678/webhook");
        assert!(manager.create_webhook("   ", "wf").await.is_err());
    }

    #[actix_rt::test]
    async fn names_are_url_encoded_and_usage_is_sorted() {
        let manager = manager_for("http://localhost:5678/webhook");
        let url = manager.create_webhook("zeta hook", "wf").await.unwrap();
        manager.create_webhook("alpha", "wf").await.unwrap();
        assert_eq!(url, "http://localhost:5678/webhook/zeta%20hook");

        let usage = manager.usage().await;
        let names: Vec<&str> = usage.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta hook"]);
    }

    #[test]
    fn curl_example_points_to_url() {
        let cmd = curl_example("http://localhost:5678/webhook/x");
        assert!(cmd.starts_with("curl -X POST http://localhost:5678/webhook/x"));
        assert!(cmd.contains("Content-Type: application/json"));
    }
}
