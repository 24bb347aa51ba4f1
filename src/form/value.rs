use crate::upload::Upload;

/// Value held by the built-in pages' form fields.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    File(Option<Upload>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn no_file() -> Self {
        FieldValue::File(None)
    }

    pub fn upload(&self) -> Option<&Upload> {
        match self {
            FieldValue::File(upload) => upload.as_ref(),
            FieldValue::Text(_) => None,
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<Upload> for FieldValue {
    fn from(upload: Upload) -> Self {
        FieldValue::File(Some(upload))
    }
}
