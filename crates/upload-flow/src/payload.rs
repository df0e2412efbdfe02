//! Form payloads and the form they are read from.

use reqwest::multipart::{Form, Part};
use std::path::Path;

use upload_common::UploadError;
use upload_common::constants::fields;

use crate::FlowError;

/// One named field of a submitted form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        filename: String,
        content: Vec<u8>,
        mime: Option<String>,
    },
}

impl FormField {
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// Multipart body under construction.
///
/// Built fresh for every submission and consumed by the request that
/// sends it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
    fields: Vec<FormField>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field; repeated names are kept, like a browser form
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_text(name, value);
        self
    }

    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push(FormField::Text {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Append an in-memory file part
    pub fn file(
        mut self,
        name: impl Into<String>,
        filename: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        let filename = filename.into();
        let mime = mime_guess::from_path(&filename)
            .first()
            .map(|m| m.essence_str().to_string());
        self.fields.push(FormField::File {
            name: name.into(),
            filename,
            content: content.into(),
            mime,
        });
        self
    }

    /// Read `path` and append it as the `file` part
    pub async fn attach_path(self, path: impl AsRef<Path>) -> Result<Self, FlowError> {
        let path = path.as_ref();
        let content = tokio::fs::read(path)
            .await
            .map_err(|source| FlowError::Payload {
                path: path.display().to_string(),
                source,
            })?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(self.file(fields::FILE, filename, content))
    }

    /// Parse a `name=value` pair as given on a command line
    pub fn push_pair(&mut self, pair: &str) -> Result<(), UploadError> {
        match pair.split_once('=') {
            Some((name, value)) if !name.is_empty() => {
                self.push_text(name, value);
                Ok(())
            }
            _ => Err(UploadError::InvalidInput(format!(
                "expected name=value, got '{pair}'"
            ))),
        }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// First text value for `name`
    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|f| match f {
            FormField::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name() == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convert into a reqwest multipart body
    pub fn into_multipart(self) -> Result<Form, FlowError> {
        let mut form = Form::new();
        for field in self.fields {
            form = match field {
                FormField::Text { name, value } => form.text(name, value),
                FormField::File {
                    name,
                    filename,
                    content,
                    mime,
                } => {
                    let mut part = Part::bytes(content).file_name(filename);
                    if let Some(mime) = mime {
                        part = part
                            .mime_str(&mime)
                            .map_err(|source| FlowError::InvalidPart {
                                name: name.clone(),
                                mime,
                                source,
                            })?;
                    }
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}

/// The page form whose current values the programmatic triggers read
pub trait FormSource: Send + Sync {
    /// Current field values, as a fresh payload
    fn snapshot(&self) -> FormPayload;
}

/// A form whose values are fixed at construction
#[derive(Debug, Clone, Default)]
pub struct StaticForm {
    payload: FormPayload,
}

impl StaticForm {
    pub fn new(payload: FormPayload) -> Self {
        Self { payload }
    }
}

impl FormSource for StaticForm {
    fn snapshot(&self) -> FormPayload {
        self.payload.clone()
    }
}
