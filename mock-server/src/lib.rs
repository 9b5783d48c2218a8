use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// Token accepted by the mock server.
pub const TOKEN: &str = "test-token";

/// Project whose endpoints always answer 403.
pub const FORBIDDEN_PROJECT: &str = "private";

/// Project whose endpoints always answer 429.
pub const THROTTLED_PROJECT: &str = "throttled";

/// Project whose endpoints answer 301 pointing at `mobile-app`'s languages.
pub const RELOCATED_PROJECT: &str = "relocated";

/// One multipart upload as the server received it.
#[derive(Clone, Debug)]
pub struct RecordedUpload {
    pub endpoint: &'static str,
    pub project: String,
    pub component: String,
    pub language: Option<String>,
    pub file_name: Option<String>,
    pub file: Vec<u8>,
    /// Text fields in the order they appeared in the body.
    pub fields: Vec<(String, String)>,
}

#[derive(Debug, Default)]
pub struct Store {
    pub projects: Vec<Value>,
    pub languages: HashMap<String, Vec<Value>>,
    /// Component files keyed by `(project, component)`, component slug decoded.
    pub files: HashMap<(String, String), Vec<u8>>,
    pub uploads: Vec<RecordedUpload>,
    /// `format` query of every download request, in order.
    pub download_formats: Vec<Option<String>>,
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Deserialize)]
pub struct FileQuery {
    pub format: Option<String>,
}

/// A store with two projects, their languages, and two component files.
pub fn seeded() -> Db {
    let mut store = Store {
        projects: vec![
            json!({
                "name": "Mobile App",
                "slug": "mobile-app",
                "web_url": "http://weblate.test/projects/mobile-app/",
                "url": "http://weblate.test/api/projects/mobile-app/",
                "source_language": {"code": "en", "name": "English"},
                "languages_count": 2,
                "components_count": 2
            }),
            json!({"slug": "unnamed"}),
        ],
        ..Default::default()
    };
    store.languages.insert(
        "mobile-app".to_string(),
        vec![
            json!({
                "name": "English",
                "code": "en",
                "direction": "ltr",
                "plural": {"number": 2, "formula": "n != 1"},
                "web_url": "http://weblate.test/languages/en/"
            }),
            json!({"english_name": "German", "code": "de", "direction": "ltr"}),
        ],
    );
    store.languages.insert("unnamed".to_string(), Vec::new());
    store.files.insert(
        ("mobile-app".to_string(), "ios/localizable-strings".to_string()),
        b"\"hello\" = \"Hello\";\n".to_vec(),
    );
    store.files.insert(
        ("mobile-app".to_string(), "android".to_string()),
        b"<resources><string name=\"hello\">Hello</string></resources>\n".to_vec(),
    );
    Arc::new(RwLock::new(store))
}

pub fn app() -> Router {
    app_with(seeded())
}

pub fn app_with(db: Db) -> Router {
    Router::new()
        .route("/api/projects/", get(list_projects))
        .route("/api/projects/{project}/languages/", get(list_languages))
        .route(
            "/api/components/{project}/{component}/file/",
            get(download_file).post(upload_component_file),
        )
        .route(
            "/api/translations/{project}/{component}/{language}/file/",
            post(upload_translation_file),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(db)).await
}

/// Undo the second encoding layer: `ios%2Fstrings` arrives here after axum's
/// own decode and names the component `ios/strings`.
pub fn decode_slug(raw: &str) -> String {
    raw.replace("%2F", "/").replace("%2f", "/").replace("%25", "%")
}

fn error(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

fn authorize(headers: &HeaderMap) -> Result<(), Response> {
    let expected = format!("Token {TOKEN}");
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(error(StatusCode::UNAUTHORIZED, "Invalid token.")),
    }
}

fn check_project(project: &str) -> Result<(), Response> {
    match project {
        FORBIDDEN_PROJECT => Err(error(
            StatusCode::FORBIDDEN,
            "You do not have permission to perform this action.",
        )),
        THROTTLED_PROJECT => Err(error(StatusCode::TOO_MANY_REQUESTS, "Request was throttled.")),
        RELOCATED_PROJECT => Err((
            StatusCode::MOVED_PERMANENTLY,
            [(header::LOCATION, "/api/projects/mobile-app/languages/")],
        )
            .into_response()),
        _ => Ok(()),
    }
}

async fn list_projects(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Response {
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    let store = db.read().await;
    let page = query.page.unwrap_or(1).max(1);
    let page_size = query.page_size.unwrap_or(20).max(1);
    let start = (page - 1) * page_size;
    let results: Vec<Value> = store.projects.iter().skip(start).take(page_size).cloned().collect();
    let next = (start + page_size < store.projects.len()).then(|| {
        format!(
            "http://weblate.test/api/projects/?page={}&page_size={page_size}",
            page + 1
        )
    });
    let previous = (page > 1).then(|| {
        format!(
            "http://weblate.test/api/projects/?page={}&page_size={page_size}",
            page - 1
        )
    });
    Json(json!({
        "count": store.projects.len(),
        "next": next,
        "previous": previous,
        "results": results,
    }))
    .into_response()
}

async fn list_languages(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(project): Path<String>,
) -> Response {
    if let Err(resp) = authorize(&headers).and_then(|_| check_project(&project)) {
        return resp;
    }
    let store = db.read().await;
    match store.languages.get(&project) {
        // Weblate returns this listing as a bare array.
        Some(languages) => Json(Value::Array(languages.clone())).into_response(),
        None => error(StatusCode::NOT_FOUND, "Not found."),
    }
}

async fn download_file(
    State(db): State<Db>,
    headers: HeaderMap,
    Path((project, component)): Path<(String, String)>,
    Query(query): Query<FileQuery>,
) -> Response {
    if let Err(resp) = authorize(&headers).and_then(|_| check_project(&project)) {
        return resp;
    }
    let mut store = db.write().await;
    store.download_formats.push(query.format);
    match store.files.get(&(project, decode_slug(&component))) {
        Some(content) => (
            [(header::CONTENT_TYPE, "application/octet-stream")],
            content.clone(),
        )
            .into_response(),
        None => error(StatusCode::NOT_FOUND, "Not found."),
    }
}

async fn upload_translation_file(
    State(db): State<Db>,
    headers: HeaderMap,
    Path((project, component, language)): Path<(String, String, String)>,
    multipart: Multipart,
) -> Response {
    receive_upload(db, headers, "translations", project, component, Some(language), multipart).await
}

async fn upload_component_file(
    State(db): State<Db>,
    headers: HeaderMap,
    Path((project, component)): Path<(String, String)>,
    multipart: Multipart,
) -> Response {
    receive_upload(db, headers, "components", project, component, None, multipart).await
}

async fn receive_upload(
    db: Db,
    headers: HeaderMap,
    endpoint: &'static str,
    project: String,
    component: String,
    language: Option<String>,
    mut multipart: Multipart,
) -> Response {
    if let Err(resp) = authorize(&headers).and_then(|_| check_project(&project)) {
        return resp;
    }
    let component = decode_slug(&component);
    let mut upload = RecordedUpload {
        endpoint,
        project,
        component,
        language,
        file_name: None,
        file: Vec::new(),
        fields: Vec::new(),
    };
    let mut has_file = false;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return error(StatusCode::BAD_REQUEST, &e.body_text()),
        };
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            upload.file_name = field.file_name().map(str::to_string);
            match field.bytes().await {
                Ok(bytes) => upload.file = bytes.to_vec(),
                Err(e) => return error(StatusCode::BAD_REQUEST, &e.body_text()),
            }
            has_file = true;
        } else {
            match field.text().await {
                Ok(text) => upload.fields.push((name, text)),
                Err(e) => return error(StatusCode::BAD_REQUEST, &e.body_text()),
            }
        }
    }

    if !has_file {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "file": ["No file was submitted."] })),
        )
            .into_response();
    }

    let mut store = db.write().await;
    let key = (upload.project.clone(), upload.component.clone());
    if !store.files.contains_key(&key) {
        return error(StatusCode::NOT_FOUND, "Not found.");
    }
    let units = upload.file.split(|b| *b == b'\n').filter(|l| !l.is_empty()).count();
    if endpoint == "components" {
        store.files.insert(key, upload.file.clone());
    }
    store.uploads.push(upload);

    Json(json!({
        "not_found": 0,
        "skipped": 0,
        "accepted": units,
        "total": units,
        "result": true,
        "count": units,
    }))
    .into_response()
}
