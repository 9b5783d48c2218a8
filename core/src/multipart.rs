//! `multipart/form-data` body assembly for file uploads.
//!
//! Part order and CRLF framing are fixed byte for byte.

use uuid::Uuid;

const BOUNDARY_PREFIX: &str = "----weblate-formdata-";
const CRLF: &str = "\r\n";

/// Generate a fresh boundary token.
pub fn generate_boundary() -> String {
    format!("{BOUNDARY_PREFIX}{}", Uuid::new_v4().simple())
}

/// Value of the `Content-Type` header for a body framed with `boundary`.
pub fn content_type(boundary: &str) -> String {
    format!("multipart/form-data; boundary={boundary}")
}

/// A form body under construction: one file part followed by text parts.
#[derive(Debug)]
pub struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartForm {
    /// Start a form with the mandatory `file` part.
    pub fn with_file(boundary: impl Into<String>, filename: &str, content: &[u8]) -> Self {
        let boundary = boundary.into();
        let mut body = Vec::with_capacity(content.len() + 512);
        push_delimiter(&mut body, &boundary);
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"{CRLF}",
                escape_quoted(filename)
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: application/octet-stream{CRLF}{CRLF}").as_bytes());
        body.extend_from_slice(content);
        body.extend_from_slice(CRLF.as_bytes());
        Self { boundary, body }
    }

    /// Append a text part. Absent or empty values are skipped entirely.
    pub fn text(mut self, name: &str, value: Option<&str>) -> Self {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            return self;
        };
        push_delimiter(&mut self.body, &self.boundary);
        self.body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"{CRLF}{CRLF}").as_bytes(),
        );
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(CRLF.as_bytes());
        self
    }

    /// Close the form and return `(content_type, body)`.
    pub fn finish(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{}--{CRLF}", self.boundary).as_bytes());
        (content_type(&self.boundary), self.body)
    }
}

fn push_delimiter(body: &mut Vec<u8>, boundary: &str) {
    body.extend_from_slice(format!("--{boundary}{CRLF}").as_bytes());
}

fn escape_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
