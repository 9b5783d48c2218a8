//! Stateless HTTP request builder and response parser for the Weblate API.
//!
//! # Design
//! `WeblateClient` holds the derived API base and the token and carries no
//! mutable state between calls. Each endpoint is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`, keeping the core free of network I/O.

use secrecy::{ExposeSecret, SecretString};

use crate::endpoint::{build_api_base, build_resource_url, with_query, Segment};
use crate::error::ApiResult;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::multipart::{generate_boundary, MultipartForm};
use crate::response::{lenient_json, normalize_list, raw_bytes, structured_json};
use crate::types::{LanguageSummary, ProjectPage, UploadOutcome, UploadRequest};

/// User-Agent sent with every request.
pub const USER_AGENT: &str = concat!("weblate-rs/", env!("CARGO_PKG_VERSION"));

/// Pagination for the projects listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// Synchronous, stateless client for the Weblate REST API.
#[derive(Debug)]
pub struct WeblateClient {
    api_base: String,
    token: SecretString,
}

impl WeblateClient {
    /// Create a client for `host`, deriving the API base from it.
    pub fn new(host: &str, token: SecretString) -> ApiResult<Self> {
        Ok(Self {
            api_base: build_api_base(host)?,
            token,
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn build_list_projects(&self, query: PageQuery) -> HttpRequest {
        let url = build_resource_url(&self.api_base, &[Segment::Literal("projects")]);
        let url = with_query(
            url,
            &[
                ("page", query.page.map(|p| p.to_string())),
                ("page_size", query.page_size.map(|p| p.to_string())),
            ],
        );
        self.get(url)
    }

    pub fn build_project_languages(&self, project: &str) -> HttpRequest {
        let url = build_resource_url(
            &self.api_base,
            &[
                Segment::Literal("projects"),
                Segment::Slug(project),
                Segment::Literal("languages"),
            ],
        );
        self.get(url)
    }

    /// `POST translations/{project}/{component}/{language}/file/`
    pub fn build_upload_translation(
        &self,
        project: &str,
        component: &str,
        language: &str,
        upload: &UploadRequest,
    ) -> HttpRequest {
        let url = self.translation_file_url(project, component, language);
        self.multipart_post(url, upload)
    }

    /// `POST components/{project}/{component}/file/`
    pub fn build_upload_component_file(
        &self,
        project: &str,
        component: &str,
        upload: &UploadRequest,
    ) -> HttpRequest {
        let url = self.component_file_url(project, component);
        self.multipart_post(url, upload)
    }

    /// `GET components/{project}/{component}/file/`, optionally converted
    /// server-side to `format` (e.g. `zip:po`).
    pub fn build_download_component_file(
        &self,
        project: &str,
        component: &str,
        format: Option<&str>,
    ) -> HttpRequest {
        let url = self.component_file_url(project, component);
        let url = with_query(url, &[("format", format.map(str::to_string))]);
        self.get(url)
    }

    pub fn translation_file_url(&self, project: &str, component: &str, language: &str) -> String {
        build_resource_url(
            &self.api_base,
            &[
                Segment::Literal("translations"),
                Segment::Slug(project),
                Segment::Slug(component),
                Segment::Slug(language),
                Segment::Literal("file"),
            ],
        )
    }

    pub fn component_file_url(&self, project: &str, component: &str) -> String {
        build_resource_url(
            &self.api_base,
            &[
                Segment::Literal("components"),
                Segment::Slug(project),
                Segment::Slug(component),
                Segment::Literal("file"),
            ],
        )
    }

    pub fn parse_list_projects(&self, response: HttpResponse) -> ApiResult<ProjectPage> {
        let value = structured_json(response)?;
        Ok(ProjectPage::from(normalize_list(value)))
    }

    pub fn parse_project_languages(&self, response: HttpResponse) -> ApiResult<Vec<LanguageSummary>> {
        let value = structured_json(response)?;
        Ok(normalize_list(value)
            .results
            .iter()
            .map(LanguageSummary::from_record)
            .collect())
    }

    pub fn parse_upload(&self, response: HttpResponse) -> ApiResult<UploadOutcome> {
        lenient_json(response).map(UploadOutcome::from_object)
    }

    pub fn parse_download(&self, response: HttpResponse) -> ApiResult<Vec<u8>> {
        raw_bytes(response)
    }

    fn get(&self, url: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: self.base_headers(),
            body: None,
        }
    }

    fn multipart_post(&self, url: String, upload: &UploadRequest) -> HttpRequest {
        let form = upload.fields.ordered().into_iter().fold(
            MultipartForm::with_file(generate_boundary(), &upload.file_name(), &upload.file_bytes),
            |form, (name, value)| form.text(name, value),
        );
        let (content_type, body) = form.finish();

        let mut headers = self.base_headers();
        headers.push(("Content-Type".to_string(), content_type));
        HttpRequest {
            method: HttpMethod::Post,
            url,
            headers,
            body: Some(body),
        }
    }

    fn base_headers(&self) -> Vec<(String, String)> {
        vec![
            (
                "Authorization".to_string(),
                format!("Token {}", self.token.expose_secret()),
            ),
            ("Accept".to_string(), "application/json".to_string()),
            ("User-Agent".to_string(), USER_AGENT.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::types::UploadFields;
    use std::path::PathBuf;

    fn client() -> WeblateClient {
        WeblateClient::new(
            "https://hosted.weblate.org",
            SecretString::new("secret-token".to_string()),
        )
        .unwrap()
    }

    fn upload(fields: UploadFields) -> UploadRequest {
        UploadRequest {
            file_path: PathBuf::from("./ios/Base.lproj/Localizable.strings"),
            file_bytes: b"\"hello\" = \"Hello\";\n".to_vec(),
            fields,
        }
    }

    fn body_text(req: &HttpRequest) -> String {
        String::from_utf8(req.body.clone().unwrap()).unwrap()
    }

    #[test]
    fn api_base_keeps_custom_path_and_port() {
        let c = WeblateClient::new(
            "http://localhost:8080/weblate/api/",
            SecretString::new("t".into()),
        )
        .unwrap();
        assert_eq!(c.api_base(), "http://localhost:8080/weblate/api");
        assert_eq!(client().api_base(), "https://hosted.weblate.org/api");
    }

    #[test]
    fn invalid_host_is_rejected_up_front() {
        let err = WeblateClient::new("hosted.weblate.org", SecretString::new("t".into())).unwrap_err();
        assert!(matches!(err, ApiError::InvalidHost { .. }));
    }

    #[test]
    fn read_requests_carry_auth_headers() {
        let req = client().build_list_projects(PageQuery::default());
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "https://hosted.weblate.org/api/projects/");
        assert_eq!(req.header("Authorization"), Some("Token secret-token"));
        assert_eq!(req.header("Accept"), Some("application/json"));
        assert_eq!(req.header("User-Agent"), Some(USER_AGENT));
        assert!(req.body.is_none());
    }

    #[test]
    fn pagination_is_appended_when_present() {
        let req = client().build_list_projects(PageQuery {
            page: Some(2),
            page_size: Some(50),
        });
        assert_eq!(req.url, "https://hosted.weblate.org/api/projects/?page=2&page_size=50");
    }

    #[test]
    fn languages_url() {
        let req = client().build_project_languages("my-project");
        assert_eq!(req.url, "https://hosted.weblate.org/api/projects/my-project/languages/");
    }

    #[test]
    fn categorized_component_upload_url() {
        let req = client().build_upload_translation(
            "my-project",
            "ios/localizable-strings",
            "en_devel",
            &upload(UploadFields::default()),
        );
        assert_eq!(req.method, HttpMethod::Post);
        assert!(req
            .url
            .ends_with("/translations/my-project/ios%252Flocalizable-strings/en_devel/file/"));
    }

    #[test]
    fn base_upload_targets_component_file() {
        let req = client().build_upload_component_file(
            "my-project",
            "ios/localizable-strings",
            &upload(UploadFields::default()),
        );
        assert_eq!(
            req.url,
            "https://hosted.weblate.org/api/components/my-project/ios%252Flocalizable-strings/file/"
        );
    }

    #[test]
    fn upload_body_matches_content_type_boundary() {
        let req = client().build_upload_translation(
            "p",
            "c",
            "de",
            &upload(UploadFields {
                method: Some("translate".into()),
                conflicts: Some("ignore".into()),
                ..Default::default()
            }),
        );
        let content_type = req.header("Content-Type").unwrap();
        let boundary = content_type
            .strip_prefix("multipart/form-data; boundary=")
            .unwrap();
        let body = body_text(&req);
        assert!(body.starts_with(&format!("--{boundary}\r\n")));
        assert!(body.ends_with(&format!("--{boundary}--\r\n")));
        assert!(body.contains("filename=\"Localizable.strings\""));
        assert_eq!(body.matches("name=\"file\"").count(), 1);
    }

    #[test]
    fn upload_fields_keep_fixed_order() {
        let req = client().build_upload_translation(
            "p",
            "c",
            "de",
            &upload(UploadFields {
                fuzzy: Some("process".into()),
                author: Some("Jane Doe".into()),
                email: Some("jane@example.com".into()),
                conflicts: Some("replace-translated".into()),
                method: Some("replace".into()),
            }),
        );
        let body = body_text(&req);
        let positions: Vec<usize> = ["file", "method", "conflicts", "email", "author", "fuzzy"]
            .iter()
            .map(|name| body.find(&format!("name=\"{name}\"")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    }

    #[test]
    fn empty_upload_fields_are_not_sent() {
        let req = client().build_upload_translation(
            "p",
            "c",
            "de",
            &upload(UploadFields {
                method: Some("translate".into()),
                email: Some(String::new()),
                ..Default::default()
            }),
        );
        let body = body_text(&req);
        assert!(body.contains("name=\"method\""));
        for absent in ["conflicts", "email", "author", "fuzzy"] {
            assert!(!body.contains(&format!("name=\"{absent}\"")), "{absent} was sent");
        }
    }

    #[test]
    fn download_format_is_a_query_parameter() {
        let req = client().build_download_component_file("p", "web/app", Some("zip:xliff"));
        assert_eq!(
            req.url,
            "https://hosted.weblate.org/api/components/p/web%252Fapp/file/?format=zip%3Axliff"
        );
        let req = client().build_download_component_file("p", "web", None);
        assert!(req.url.ends_with("/components/p/web/file/"));
    }

    #[test]
    fn parse_projects_envelope() {
        let response = HttpResponse::new(
            200,
            r#"{"count":2,"next":null,"previous":null,"results":[
                {"name":"Alpha","slug":"alpha"},{"slug":"beta"}]}"#,
        );
        let page = client().parse_list_projects(response).unwrap();
        assert_eq!(page.count, 2);
        assert_eq!(page.results[0].name, "Alpha");
        assert_eq!(page.results[1].name, "Unknown");
        assert_eq!(page.results[1].slug, "beta");
    }

    #[test]
    fn parse_languages_not_found_has_no_partial_result() {
        let err = client()
            .parse_project_languages(HttpResponse::new(404, r#"{"detail":"Not found."}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_languages_bad_json() {
        let err = client()
            .parse_project_languages(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::JsonParse(_)));
    }

    #[test]
    fn parse_upload_is_lenient() {
        let outcome = client()
            .parse_upload(HttpResponse::new(200, "accepted"))
            .unwrap();
        assert!(outcome.success);
        assert!(outcome.raw.is_empty());

        let outcome = client()
            .parse_upload(HttpResponse::new(
                200,
                r#"{"result":true,"accepted":3,"total":3,"skipped":0,"not_found":0,"count":3}"#,
            ))
            .unwrap();
        assert_eq!(outcome.accepted, Some(3));
    }

    #[test]
    fn parse_upload_rate_limited() {
        let err = client().parse_upload(HttpResponse::new(429, "")).unwrap_err();
        assert!(matches!(err, ApiError::RateLimited));
    }

    #[test]
    fn parse_download_returns_raw_bytes() {
        let bytes = vec![0x50, 0x4b, 0x05, 0x06, 0x00];
        let body = client()
            .parse_download(HttpResponse::new(200, bytes.clone()))
            .unwrap();
        assert_eq!(body, bytes);
    }

    #[test]
    fn debug_output_redacts_token() {
        let rendered = format!("{:?}", client());
        assert!(!rendered.contains("secret-token"));
    }
}
