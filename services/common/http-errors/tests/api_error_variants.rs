use axum::body::to_bytes;
use axum::response::IntoResponse;
use common_http_errors::ApiError;

async fn body_text(resp: axum::response::Response) -> String {
    let bytes = to_bytes(resp.into_body(), 1024 * 8).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn missing_role_shape() {
    let resp = ApiError::ForbiddenMissingRole { role: "admin" }.into_response();
    assert_eq!(resp.status().as_u16(), 403);
    assert_eq!(
        resp.headers().get("X-Error-Code").unwrap(),
        "missing_role"
    );
    let text = body_text(resp).await;
    assert!(text.contains("\"code\":\"missing_role\""), "unexpected body: {text}");
    assert!(text.contains("\"missing_role\":\"admin\""), "unexpected body: {text}");
}

#[tokio::test]
async fn partial_failure_is_distinct_from_internal() {
    let resp = ApiError::PartialFailure {
        code: "checkout_partial_failure",
        message: "payment recorded, cart purge failed".into(),
    }
    .into_response();
    assert_eq!(resp.status().as_u16(), 500);
    assert_eq!(
        resp.headers().get("X-Error-Code").unwrap(),
        "checkout_partial_failure"
    );
    let text = body_text(resp).await;
    assert!(text.contains("cart purge failed"), "unexpected body: {text}");
}

#[tokio::test]
async fn upstream_maps_to_bad_gateway() {
    let resp = ApiError::upstream("upstream_payment_provider", "connect timeout").into_response();
    assert_eq!(resp.status().as_u16(), 502);
    assert_eq!(
        resp.headers().get("X-Error-Code").unwrap(),
        "upstream_payment_provider"
    );
}

#[tokio::test]
async fn forbidden_has_no_message() {
    let resp = ApiError::Forbidden.into_response();
    assert_eq!(resp.status().as_u16(), 403);
    let text = body_text(resp).await;
    assert!(!text.contains("message"), "unexpected body: {text}");
}
