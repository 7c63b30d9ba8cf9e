#[cfg(test)]
mod router_tests {
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::api::{app_state::AppState, create_router};
    use crate::ml::{ClassifierModel, DecisionTree, ModelArtifacts, StandardScaler, TreeNode};
    use crate::services::{
        MockOcrEngine, create_chatbot, create_file_processor, create_prediction_service,
        create_provider_directory,
    };
    use crate::storage::ProviderStore;

    const BOUNDARY: &str = "seizureguard-test-boundary";

    /// 两列树桩模型：a 标准化后 <= 0 判为正常（60%），否则发作（90%）
    fn stump_artifacts() -> ModelArtifacts {
        let model = ClassifierModel::RandomForest {
            classes: vec![0, 1, 2],
            n_features: 2,
            trees: vec![DecisionTree {
                nodes: vec![
                    TreeNode::Split {
                        feature: 0,
                        threshold: 0.0,
                        left: 1,
                        right: 2,
                    },
                    TreeNode::Leaf {
                        value: vec![6.0, 3.0, 1.0],
                    },
                    TreeNode::Leaf {
                        value: vec![0.0, 1.0, 9.0],
                    },
                ],
            }],
        };
        let scaler = StandardScaler::new(vec![1.0, 0.0], vec![2.0, 1.0]).unwrap();
        ModelArtifacts::new(model, scaler, vec!["a".into(), "b".into()]).unwrap()
    }

    fn state(with_model: bool) -> AppState {
        AppState::new(
            with_model.then(|| create_prediction_service(stump_artifacts())),
            create_chatbot().unwrap(),
            create_provider_directory(Arc::new(ProviderStore::seed())),
            create_file_processor(Arc::new(MockOcrEngine::new("glucose 5.4"))),
            1024 * 1024,
        )
    }

    fn app(with_model: bool) -> Router {
        create_router(state(with_model))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart(field: &str, file_name: &str, content: &str) -> Request<Body> {
        let body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n{content}\r\n--{BOUNDARY}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri("/api/upload")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_model_state() {
        let (status, body) = send(app(false), get("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["predictor_loaded"], false);

        let (_, body) = send(app(true), get("/api/health")).await;
        assert_eq!(body["predictor_loaded"], true);
    }

    #[tokio::test]
    async fn test_predict_without_model() {
        let (status, body) = send(
            app(false),
            post_json("/api/predict", json!({"features": {"a": 1.0}})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "MODEL_NOT_LOADED");
        assert_eq!(
            body["error"],
            "Model not loaded. Please train the model first."
        );
    }

    #[tokio::test]
    async fn test_predict_named_features() {
        let (status, body) = send(
            app(true),
            post_json("/api/predict", json!({"features": {"a": 3.0, "b": 0.0}})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["result"]["prediction"], "SEIZURE");
        assert_eq!(body["result"]["risk_level"], "HIGH");
    }

    #[tokio::test]
    async fn test_predict_rejects_bad_shapes() {
        let (status, body) = send(
            app(true),
            post_json("/api/predict", json!({"features": "high"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");

        let (status, _) = send(
            app(true),
            post_json("/api/predict", json!({"features": [1.0, 2.0, 3.0]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_predict_batch_keeps_order() {
        let (status, body) = send(
            app(true),
            post_json(
                "/api/predict/batch",
                json!({"samples": [[3.0, 0.0], {"b": 1.0}]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        assert_eq!(body["results"][0]["prediction"], "SEIZURE");
        assert_eq!(body["results"][1]["prediction"], "NORMAL");
    }

    #[tokio::test]
    async fn test_analyze_symptoms() {
        let (status, body) = send(
            app(false),
            post_json(
                "/api/symptoms/analyze",
                json!({"symptoms": "I had a seizure and confusion afterwards"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["risk_score"], 85.0);
        assert_eq!(body["result"]["risk_level"], "HIGH");
        assert_eq!(body["result"]["possible_condition"], "SEIZURE");
    }

    #[tokio::test]
    async fn test_empty_symptoms_rejected() {
        let (status, body) = send(
            app(false),
            post_json("/api/symptoms/analyze", json!({"symptoms": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .contains("No symptoms provided")
        );
    }

    #[tokio::test]
    async fn test_chat_and_history() {
        let app = app(false);

        let (status, body) = send(
            app.clone(),
            post_json("/api/chat", json!({"message": "Hello there"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"]["intent"], "greeting");
        assert_eq!(body["response"]["confidence"], 0.85);

        let (_, body) = send(app.clone(), get("/api/chat/history")).await;
        assert_eq!(body["count"], 2);
        assert_eq!(body["history"][0]["message"], "Hello there");

        let clear = Request::builder()
            .method("DELETE")
            .uri("/api/chat/history")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(app.clone(), clear).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(app, get("/api/chat/history")).await;
        assert_eq!(body["count"], 0);
    }

    #[tokio::test]
    async fn test_empty_chat_message_rejected() {
        let (status, body) = send(app(false), post_json("/api/chat", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .contains("No message provided")
        );
    }

    #[tokio::test]
    async fn test_emergency_doctors_in_california() {
        let (status, body) = send(
            app(false),
            get("/api/doctors?emergency=TRUE&location=CA&top_n=5"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);
        assert_eq!(body["doctors"][0]["name"], "Dr. Michael Chen");
        assert!(body["formatted"].as_str().unwrap().contains("Dr. Michael Chen"));
    }

    #[tokio::test]
    async fn test_high_risk_implies_emergency() {
        let (_, body) = send(app(false), get("/api/doctors?risk_level=high&top_n=100")).await;
        let doctors = body["doctors"].as_array().unwrap();
        assert!(!doctors.is_empty());
        assert!(doctors.iter().all(|d| d["accepts_emergency"] == true));
    }

    #[tokio::test]
    async fn test_top_n_out_of_range() {
        let (status, body) = send(app(false), get("/api/doctors?top_n=0")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_doctor_lookups() {
        let (_, body) = send(app(false), get("/api/doctors/emergency")).await;
        assert_eq!(body["count"], 3);

        let (_, body) = send(app(false), get("/api/doctors/search?name=garcia")).await;
        assert_eq!(body["doctors"][0]["name"], "Dr. Maria Garcia");

        let (_, body) = send(app(false), get("/api/doctors/locations")).await;
        let locations: Vec<&str> = body["locations"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        let mut sorted = locations.clone();
        sorted.sort();
        assert_eq!(locations, sorted);
        assert!(locations.contains(&"San Jose, CA"));
    }

    #[tokio::test]
    async fn test_upload_csv_with_prediction() {
        let (status, body) = send(app(true), multipart("file", "eeg.csv", "c1,c2\n1,10\n3,30\n")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["file_type"], "csv");
        assert_eq!(body["result"]["features"]["c2_mean"], 20.0);
        // a 缺失 → 0.0，走左子树
        assert_eq!(body["result"]["prediction"]["prediction"], "NORMAL");
    }

    #[tokio::test]
    async fn test_upload_without_model_has_no_prediction() {
        let (status, body) = send(app(false), multipart("file", "eeg.csv", "c1\n1\n")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["result"].get("prediction").is_none());
    }

    #[tokio::test]
    async fn test_upload_errors() {
        let (status, body) = send(app(false), multipart("file", "notes.docx", "hello")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "UNSUPPORTED_FORMAT");

        let (status, body) = send(app(false), multipart("attachment", "eeg.csv", "c1\n1\n")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("No file provided"));

        let (status, body) = send(app(false), multipart("file", "", "c1\n1\n")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");
    }

    fn post_raw(uri: &str, content_type: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header("Content-Type", content_type);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_malformed_json_returns_error_body() {
        let (status, body) = send(
            app(false),
            post_raw("/api/symptoms/analyze", Some("application/json"), "{not json"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_wrong_field_type_returns_error_body() {
        let (status, body) = send(
            app(false),
            post_json("/api/symptoms/analyze", json!({"symptoms": 5})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_missing_content_type_returns_error_body() {
        let (status, body) =
            send(app(false), post_raw("/api/chat", None, r#"{"message":"hi"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_unparsable_top_n_returns_error_body() {
        let (status, body) = send(app(false), get("/api/doctors?top_n=abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_multipart_without_boundary_returns_error_body() {
        let (status, body) = send(
            app(false),
            post_raw("/api/upload", Some("multipart/form-data"), "file"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_security_headers_and_metrics() {
        let state = state(false);
        let metrics = state.metrics.clone();
        let app = create_router(state);

        let response = app
            .clone()
            .oneshot(get("/api/health"))
            .await
            .unwrap();
        assert_eq!(response.headers()["x-frame-options"], "DENY");

        let _ = app.oneshot(get("/api/doctors?top_n=500")).await.unwrap();
        let gathered = metrics.gather();
        assert!(gathered.contains("http_requests_total 2"));
        assert!(gathered.contains("errors_total 1"));
    }
}
