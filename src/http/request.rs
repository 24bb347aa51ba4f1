use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{multipart, Client, Method, RequestBuilder};
use serde_json::Value;

use crate::http::error::RequestError;
use crate::session::Session;
use crate::upload::Upload;

/// One part of a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq)]
pub enum MultipartField {
    Text { name: String, value: String },
    File { name: String, upload: Upload },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartBody {
    fields: Vec<MultipartField>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(MultipartField::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn file(mut self, name: impl Into<String>, upload: Upload) -> Self {
        self.fields.push(MultipartField::File {
            name: name.into(),
            upload,
        });
        self
    }

    pub fn fields(&self) -> &[MultipartField] {
        &self.fields
    }

    fn into_form(self) -> Result<multipart::Form, RequestError> {
        self.fields
            .into_iter()
            .try_fold(multipart::Form::new(), |form, field| match field {
                MultipartField::Text { name, value } => Ok(form.text(name, value)),
                MultipartField::File { name, upload } => {
                    let part = multipart::Part::bytes(upload.bytes().to_vec())
                        .file_name(upload.file_name().to_string())
                        .mime_str(upload.mime_type())
                        .map_err(|e| {
                            RequestError::InvalidRequest(format!(
                                "bad MIME type '{}': {}",
                                upload.mime_type(),
                                e
                            ))
                        })?;
                    Ok(form.part(name, part))
                }
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    /// Serialized as JSON with `Content-Type: application/json`.
    Json(Value),
    Multipart(MultipartBody),
}

/// Everything needed to issue one call.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    url: String,
    method: Method,
    body: RequestBody,
    headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// A `GET` with no body and no extra headers.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: Method::GET,
            body: RequestBody::Empty,
            headers: Vec::new(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(url).method(Method::POST)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(url).method(Method::PATCH)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(url).method(Method::DELETE)
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach `Authorization: Bearer <token>` from the session.
    pub fn authorized(self, session: &Session) -> Self {
        let (name, value) = session.authorization_header();
        self.header(name, value)
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    pub fn multipart(mut self, body: MultipartBody) -> Self {
        self.body = RequestBody::Multipart(body);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn http_method(&self) -> &Method {
        &self.method
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub(crate) fn into_builder(self, client: &Client) -> Result<RequestBuilder, RequestError> {
        let mut builder = client.request(self.method, &self.url);

        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                RequestError::InvalidRequest(format!("bad header name '{}': {}", name, e))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                RequestError::InvalidRequest(format!("bad value for header '{}': {}", name, e))
            })?;
            builder = builder.header(header_name, header_value);
        }

        builder = match self.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(body) => builder.multipart(body.into_form()?),
        };

        Ok(builder)
    }
}
