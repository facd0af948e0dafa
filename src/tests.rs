#[cfg(test)]
mod integration_tests {
    use crate::cli::CustomerArgs;
    use crate::cli::commands::dashboard::run_session;
    use crate::http_api::HttpScoringApi;
    use crate::render;
    use crate::test_utils::{FakeService, closed_port_url, parse};
    use axum::http::StatusCode;
    use common::{FormInput, LoyaltyFlag, PredictionLabel, default_feature_importance};
    use controller::{
        ApiError, FetchState, FormPhase, PredictionController, PredictionOutcome, RankingSource,
        ScoringApi,
    };
    use serde_json::json;

    fn customer(age: &str, purchases: &str, loyalty: &str, discounts: &str) -> CustomerArgs {
        CustomerArgs {
            age: age.to_string(),
            purchases: purchases.to_string(),
            loyalty: loyalty.to_string(),
            discounts: discounts.to_string(),
        }
    }

    #[tokio::test]
    async fn test_predict_posts_feature_vector() {
        let (url, recorded) = FakeService::default().spawn().await;
        let api = HttpScoringApi::new(&url);
        let features = FormInput {
            age: 27.0,
            purchases: 11.0,
            loyalty: LoyaltyFlag::Member,
            discounts_used: 0.0,
        }
        .feature_vector();

        let label = api.predict(&features).await.unwrap();

        assert_eq!(label, PredictionLabel::WillPurchase);
        let bodies = recorded.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0], r#"{"features":[27,11,1,0,0]}"#);
    }

    #[tokio::test]
    async fn test_predict_decodes_negative_label() {
        let service = FakeService {
            predict: (StatusCode::OK, json!({"prediction": 0}).to_string()),
            ..Default::default()
        };
        let (url, _) = service.spawn().await;
        let controller = PredictionController::new(HttpScoringApi::new(&url));
        customer("20", "4", "0", "5").fill(&controller);

        let outcome = controller.submit_prediction().await;

        assert_eq!(outcome, PredictionOutcome::Predicted(PredictionLabel::WillNotPurchase));
        assert_eq!(
            render::render_prediction(&controller.state()),
            "❌ The customer will not purchase.\n"
        );
    }

    #[tokio::test]
    async fn test_predict_unknown_label_is_decode_failure() {
        let service = FakeService {
            predict: (StatusCode::OK, json!({"prediction": 2}).to_string()),
            ..Default::default()
        };
        let (url, _) = service.spawn().await;
        let controller = PredictionController::new(HttpScoringApi::new(&url));
        customer("40", "8", "1", "5").fill(&controller);

        let outcome = controller.submit_prediction().await;

        assert!(matches!(outcome, PredictionOutcome::Failed(ApiError::Decode(_))));
        assert_eq!(controller.state().notice(), Some("Prediction request failed"));
        assert_eq!(controller.state().prediction(), None);
    }

    #[tokio::test]
    async fn test_predict_ignores_status_when_body_decodes() {
        let service = FakeService {
            predict: (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"prediction": 1}).to_string(),
            ),
            ..Default::default()
        };
        let (url, _) = service.spawn().await;
        let api = HttpScoringApi::new(&url);
        let features = FormInput {
            age: 31.0,
            purchases: 19.0,
            loyalty: LoyaltyFlag::NonMember,
            discounts_used: 0.0,
        }
        .feature_vector();

        assert_eq!(api.predict(&features).await, Ok(PredictionLabel::WillPurchase));
    }

    #[tokio::test]
    async fn test_invalid_loyalty_sends_nothing() {
        let (url, recorded) = FakeService::default().spawn().await;
        let controller = PredictionController::new(HttpScoringApi::new(&url));
        customer("27", "11", "4", "0").fill(&controller);

        let outcome = controller.submit_prediction().await;

        assert!(matches!(outcome, PredictionOutcome::Rejected(_)));
        assert!(recorded.lock().unwrap().is_empty());
        assert_eq!(
            controller.state().loyalty_error().as_deref(),
            Some("Loyalty must be 0 or 1.")
        );
    }

    #[tokio::test]
    async fn test_performance_error_page_is_decode_failure() {
        let service = FakeService {
            performance: (
                StatusCode::BAD_GATEWAY,
                "<html>Bad Gateway</html>".to_string(),
            ),
            ..Default::default()
        };
        let (url, _) = service.spawn().await;
        let api = HttpScoringApi::new(&url);

        assert!(matches!(api.performance().await, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_importance_checks_status() {
        let service = FakeService {
            importance: (
                StatusCode::SERVICE_UNAVAILABLE,
                json!([{"name": "age", "value": 1.0}]).to_string(),
            ),
            ..Default::default()
        };
        let (url, _) = service.spawn().await;
        let api = HttpScoringApi::new(&url);

        assert_eq!(api.importance().await, Err(ApiError::Status(503)));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_failure() {
        let api = HttpScoringApi::new(&closed_port_url().await);
        assert!(matches!(api.performance().await, Err(ApiError::Transport(_))));
    }

    #[tokio::test]
    async fn test_dashboard_session_with_healthy_service() {
        let (url, recorded) = FakeService::default().spawn().await;
        let controller = PredictionController::new(HttpScoringApi::new(&format!("{}/", url)));
        let customer = customer("27", "11", "1", "0");

        let outcome = run_session(&controller, Some(&customer)).await;

        assert_eq!(outcome, Some(PredictionOutcome::Predicted(PredictionLabel::WillPurchase)));
        let state = controller.state();
        assert_eq!(state.phase(), FormPhase::PredictionShown);
        assert_eq!(state.performance().data().map(|s| s.total()), Some(1500));
        let ranking = state.importance().data().unwrap();
        assert_eq!(ranking.source, RankingSource::Service);
        assert_eq!(ranking.entries[0].feature_name, "loyalty");
        assert_eq!(parse(&recorded.lock().unwrap()[0]), json!({"features": [27, 11, 1, 0, 0]}));

        let text = render::render_dashboard(&state);
        assert!(text.contains("✅ The customer will purchase!"));
        assert!(text.contains("📊 Model Performance (1500 samples)"));
        assert!(text.contains("📈 Feature Importance\n"));
    }

    #[tokio::test]
    async fn test_dashboard_session_degrades_per_section() {
        let service = FakeService {
            performance: (StatusCode::INTERNAL_SERVER_ERROR, "oops".to_string()),
            importance: (StatusCode::NOT_FOUND, String::new()),
            ..Default::default()
        };
        let (url, recorded) = service.spawn().await;
        let controller = PredictionController::new(HttpScoringApi::new(&url));

        let outcome = run_session(&controller, None).await;

        assert_eq!(outcome, None);
        assert!(recorded.lock().unwrap().is_empty());
        let state = controller.state();
        assert!(matches!(state.performance(), FetchState::Error(_)));
        let ranking = state.importance().data().unwrap();
        assert_eq!(ranking.source, RankingSource::Fallback);
        assert_eq!(ranking.entries, default_feature_importance());

        let text = render::render_dashboard(&state);
        assert!(text.contains("(no data)"));
        assert!(text.contains("(default ranking)"));
    }

    #[tokio::test]
    async fn test_dashboard_session_when_service_is_down() {
        let controller = PredictionController::new(HttpScoringApi::new(&closed_port_url().await));
        let customer = customer("24", "19", "0", "4");

        let outcome = run_session(&controller, Some(&customer)).await;

        assert!(matches!(
            outcome,
            Some(PredictionOutcome::Failed(ApiError::Transport(_)))
        ));
        let state = controller.state();
        assert_eq!(state.notice(), Some("Prediction request failed"));
        assert!(state.performance().is_error());
        assert!(state.importance().data().unwrap().is_fallback());
    }
}
