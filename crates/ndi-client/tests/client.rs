use std::time::Duration;

use ndi_client::{Credentials, NdClient, NdiError, RetryConfig};
use ndi_core::{AnalyticQuery, ComplianceGateway, Scope, SnapshotId};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PREFIX: &str = "/sedgeapi/v1/cisco-nir/api/api/telemetry/v2";

fn client(server: &MockServer) -> NdClient {
    NdClient::builder("unused")
        .base_url(server.uri())
        .retry(RetryConfig::disabled())
        .build()
        .unwrap()
}

async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({
            "userName": "admin",
            "userPasswd": "secret",
            "domain": "local"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "jwttoken": token })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn latest_epoch_logs_in_and_unwraps_first_epoch() {
    let server = MockServer::start().await;
    mount_login(&server, "tok-1").await;

    Mock::given(method("GET"))
        .and(path(format!(
            "{PREFIX}/config/insightsGroup/default/fabric/fab1/epochs"
        )))
        .and(query_param("$size", "1"))
        .and(query_param("$status", "FINISHED"))
        .and(header("authorization", "Bearer tok-1"))
        .and(header("cookie", "AuthCookie=tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": { "data": [{ "epochId": "e-123", "status": "FINISHED" }] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = NdClient::builder("unused")
        .base_url(server.uri())
        .credentials(Credentials::password("admin", "secret"))
        .build()
        .unwrap();

    let epoch = client
        .latest_epoch(&Scope::for_fabric("fab1"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(epoch.id(), Some("e-123"));
}

#[tokio::test]
async fn latest_epoch_is_none_for_empty_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!(
            "{PREFIX}/config/insightsGroup/default/fabric/fab1/epochs"
        )))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "value": { "data": [] } })),
        )
        .mount(&server)
        .await;

    let epoch = client(&server)
        .epochs()
        .latest(&Scope::for_fabric("fab1"))
        .await
        .unwrap();
    assert!(epoch.is_none());
}

#[tokio::test]
async fn session_token_is_shared_across_requests() {
    let server = MockServer::start().await;
    mount_login(&server, "tok-2").await;

    Mock::given(method("GET"))
        .and(header("authorization", "Bearer tok-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "score": 90 })))
        .expect(3)
        .mount(&server)
        .await;

    let client = NdClient::builder("unused")
        .base_url(server.uri())
        .credentials(Credentials::password("admin", "secret"))
        .build()
        .unwrap();
    let scope = Scope::for_fabric("fab1");
    let snapshot = SnapshotId::new("e-1");
    let api = client.compliance();

    let (a, b, c) = tokio::join!(
        api.score(&scope, &snapshot),
        api.count(&scope, &snapshot),
        api.score(&scope, &snapshot),
    );
    tokio_test::assert_ok!(a);
    tokio_test::assert_ok!(b);
    tokio_test::assert_ok!(c);
}

#[tokio::test]
async fn rejected_login_is_a_login_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = NdClient::builder("unused")
        .base_url(server.uri())
        .credentials(Credentials::password("admin", "wrong"))
        .build()
        .unwrap();

    let err = client.login().await.unwrap_err();
    assert!(matches!(err, NdiError::Login(_)), "{err:?}");
    assert!(err.is_auth_error());
}

#[tokio::test]
async fn api_key_is_sent_as_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("x-nd-username", "admin"))
        .and(header("x-nd-apikey", "k-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 4 })))
        .expect(1)
        .mount(&server)
        .await;

    let client = NdClient::builder("unused")
        .base_url(server.uri())
        .credentials(Credentials::api_key("admin", "k-1"))
        .build()
        .unwrap();

    let count = client
        .compliance()
        .count(&Scope::for_fabric("fab1"), &SnapshotId::new("e-1"))
        .await
        .unwrap();
    assert_eq!(count, json!({ "count": 4 }));
}

#[tokio::test]
async fn query_parameters_are_percent_encoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!(
            "{PREFIX}/events/insightsGroup/default/fabric/fab1/smartEvents"
        )))
        .and(query_param("$epochId", "e-123"))
        .and(query_param("category", "COMPLIANCE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": { "data": [{ "eventCode": "COMPLIANCE_VIOLATION" }] }
        })))
        .mount(&server)
        .await;

    let events = client(&server)
        .compliance()
        .smart_events(&Scope::for_fabric("fab1"), &SnapshotId::new("e-123"))
        .await
        .unwrap();
    assert_eq!(events, json!([{ "eventCode": "COMPLIANCE_VIOLATION" }]));

    let received = server.received_requests().await.unwrap();
    assert_eq!(
        received[0].url.query(),
        Some("%24epochId=e-123&%24page=0&%24size=10&%24sort=-severity&category=COMPLIANCE")
    );
}

#[tokio::test]
async fn get_json_returns_the_body_untouched() {
    let server = MockServer::start().await;
    let body = json!({ "value": { "data": [1, 2, 3] }, "totalItemsCount": 3 });

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .mount(&server)
        .await;

    let request = AnalyticQuery::EventsBySeverity
        .request(&Scope::for_fabric("fab1"), &SnapshotId::new("e-1"));
    let value = client(&server).get_json(&request).await.unwrap();
    assert_eq!(value, body);
}

#[tokio::test]
async fn missing_envelope_fails_enveloped_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let err = client(&server)
        .compliance()
        .unhealthy_resources(&Scope::for_fabric("fab1"), &SnapshotId::new("e-1"))
        .await
        .unwrap_err();
    assert!(matches!(err, NdiError::Json(_)), "{err:?}");
}

#[tokio::test]
async fn error_statuses_are_classified() {
    let server = MockServer::start().await;
    let scope = Scope::for_fabric("fab1");
    let snapshot = SnapshotId::new("e-1");

    Mock::given(method("GET"))
        .and(path(format!(
            "{PREFIX}/insightsGroup/default/fabric/fab1/model/aciPolicy/complianceAnalysis/complianceScore"
        )))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "messages": [{ "code": 500, "message": "analysis service unavailable" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!(
            "{PREFIX}/insightsGroup/default/fabric/fab1/model/aciPolicy/complianceAnalysis/count"
        )))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = client(&server);

    let err = client.compliance().score(&scope, &snapshot).await.unwrap_err();
    match err {
        NdiError::Api { code, message } => {
            assert_eq!(code, 500);
            assert_eq!(message, "analysis service unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let err = client.compliance().count(&scope, &snapshot).await.unwrap_err();
    assert!(matches!(err, NdiError::Unauthorized(_)), "{err:?}");

    let err = client
        .compliance()
        .events_by_severity(&scope, &snapshot)
        .await
        .unwrap_err();
    assert!(matches!(err, NdiError::NotFound { .. }), "{err:?}");
}

#[tokio::test]
async fn rate_limited_requests_are_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "score": 75 })))
        .with_priority(2)
        .mount(&server)
        .await;

    let client = NdClient::builder("unused")
        .base_url(server.uri())
        .retry(RetryConfig::new().initial_backoff(Duration::from_millis(10)))
        .build()
        .unwrap();

    let score = client
        .compliance()
        .score(&Scope::for_fabric("fab1"), &SnapshotId::new("e-1"))
        .await
        .unwrap();
    assert_eq!(score, json!({ "score": 75 }));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn server_errors_are_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let client = NdClient::builder("unused")
        .base_url(server.uri())
        .retry(RetryConfig::new().initial_backoff(Duration::from_millis(10)))
        .build()
        .unwrap();

    let err = client
        .compliance()
        .count(&Scope::for_fabric("fab1"), &SnapshotId::new("e-1"))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(502));
}

#[tokio::test]
async fn rate_limited_requests_fail_when_retry_is_off() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .expect(1)
        .mount(&server)
        .await;

    let client = NdClient::builder("unused")
        .base_url(server.uri())
        .retry(
            RetryConfig::new()
                .initial_backoff(Duration::from_millis(10))
                .retry_on_rate_limit(false),
        )
        .build()
        .unwrap();

    let err = client
        .compliance()
        .count(&Scope::for_fabric("fab1"), &SnapshotId::new("e-1"))
        .await
        .unwrap_err();

    assert!(matches!(err, NdiError::RateLimited { .. }), "{err:?}");
}

#[tokio::test]
async fn client_side_rate_limit_spaces_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 1 })))
        .expect(3)
        .mount(&server)
        .await;

    let client = NdClient::builder("unused")
        .base_url(server.uri())
        .retry(RetryConfig::disabled())
        .rate_limit(2)
        .build()
        .unwrap();

    let scope = Scope::for_fabric("fab1");
    let snapshot = SnapshotId::new("e-1");
    let started = std::time::Instant::now();
    for _ in 0..3 {
        client.compliance().count(&scope, &snapshot).await.unwrap();
    }

    // A burst of two, then one more token every 500 ms
    assert!(started.elapsed() >= Duration::from_millis(400), "{:?}", started.elapsed());
}
