use axum::body::Body;
use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, seeded, TOKEN};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(http::header::AUTHORIZATION, format!("Token {TOKEN}"))
        .body(Body::empty())
        .unwrap()
}

fn multipart_post(uri: &str, parts: &[(&str, &str)], file: Option<&[u8]>) -> Request<Body> {
    let boundary = "XyZ";
    let mut body = Vec::new();
    if let Some(file) = file {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"a.po\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(file);
        body.extend_from_slice(b"\r\n");
    }
    for (name, value) in parts {
        body.extend_from_slice(
            format!("--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::AUTHORIZATION, format!("Token {TOKEN}"))
        .header(
            http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

// --- auth ---

#[tokio::test]
async fn missing_token_is_401() {
    let resp = app()
        .oneshot(Request::builder().uri("/api/projects/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_token_is_401() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/api/projects/")
                .header(http::header::AUTHORIZATION, "Token nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- projects ---

#[tokio::test]
async fn projects_are_an_envelope() {
    let resp = app().oneshot(get("/api/projects/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
    assert!(body["next"].is_null());
}

#[tokio::test]
async fn projects_paginate() {
    let resp = app()
        .oneshot(get("/api/projects/?page=1&page_size=1"))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["results"].as_array().unwrap().len(), 1);
    assert_eq!(body["results"][0]["slug"], "mobile-app");
    assert!(body["next"].as_str().unwrap().contains("page=2"));
    assert!(body["previous"].is_null());
}

// --- languages ---

#[tokio::test]
async fn languages_are_a_bare_array() {
    let resp = app()
        .oneshot(get("/api/projects/mobile-app/languages/"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn languages_of_unknown_project_is_404() {
    let resp = app()
        .oneshot(get("/api/projects/nope/languages/"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn special_projects_answer_403_and_429() {
    let resp = app()
        .oneshot(get("/api/projects/private/languages/"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = app()
        .oneshot(get("/api/projects/throttled/languages/"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn relocated_project_redirects() {
    let resp = app()
        .oneshot(get("/api/projects/relocated/languages/"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        resp.headers()[http::header::LOCATION],
        "/api/projects/mobile-app/languages/"
    );
}

// --- files ---

#[tokio::test]
async fn download_decodes_categorized_slug() {
    let db = seeded();
    let resp = app_with(db.clone())
        .oneshot(get(
            "/api/components/mobile-app/ios%252Flocalizable-strings/file/?format=zip%3Apo",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(&body_bytes(resp).await[..], b"\"hello\" = \"Hello\";\n");
    assert_eq!(
        db.read().await.download_formats,
        vec![Some("zip:po".to_string())]
    );
}

#[tokio::test]
async fn download_of_unknown_component_is_404() {
    let resp = app()
        .oneshot(get("/api/components/mobile-app/web/file/"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn translation_upload_records_fields_in_order() {
    let db = seeded();
    let resp = app_with(db.clone())
        .oneshot(multipart_post(
            "/api/translations/mobile-app/ios%252Flocalizable-strings/de/file/",
            &[("method", "translate"), ("conflicts", "ignore")],
            Some(&b"line one\nline two\n"[..]),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["result"], true);
    assert_eq!(body["accepted"], 2);

    let store = db.read().await;
    let upload = &store.uploads[0];
    assert_eq!(upload.endpoint, "translations");
    assert_eq!(upload.component, "ios/localizable-strings");
    assert_eq!(upload.language.as_deref(), Some("de"));
    assert_eq!(upload.file_name.as_deref(), Some("a.po"));
    assert_eq!(
        upload.fields,
        vec![
            ("method".to_string(), "translate".to_string()),
            ("conflicts".to_string(), "ignore".to_string())
        ]
    );
}

#[tokio::test]
async fn upload_without_file_is_400() {
    let resp = app()
        .oneshot(multipart_post(
            "/api/translations/mobile-app/android/de/file/",
            &[("method", "translate")],
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["file"][0], "No file was submitted.");
}

#[tokio::test]
async fn component_upload_replaces_base_file() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(multipart_post(
            "/api/components/mobile-app/android/file/",
            &[],
            Some(&b"<resources/>\n"[..]),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/api/components/mobile-app/android/file/"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(&body_bytes(resp).await[..], b"<resources/>\n");
}
