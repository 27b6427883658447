use std::collections::HashMap;

use actix_multipart::Multipart;
use futures_util::StreamExt;

use pontonovo::client::{UploadFile, MAX_UPLOAD_BYTES};

/// Longest accepted text field.
const MAX_TEXT_BYTES: usize = 64 * 1024;

/// A decoded `multipart/form-data` submission: text fields plus at most one
/// file.
#[derive(Debug, Default)]
pub struct FormData {
    pub fields: HashMap<String, String>,
    pub file: Option<UploadFile>,
}

impl FormData {
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FormReadError {
    #[error("Invalid form data: {0}")]
    Multipart(#[from] actix_multipart::MultipartError),

    #[error("Field {0} is too large")]
    TooLarge(String),

    #[error("Field {0} is not valid UTF-8")]
    NotUtf8(String),
}

/// Reads the whole form into memory with hard size limits. File inputs left
/// empty by the browser are skipped.
pub async fn read_form(mut multipart: Multipart) -> Result<FormData, FormReadError> {
    let mut form = FormData::default();

    while let Some(field) = multipart.next().await {
        let mut field = field?;
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(String::from));
        let content_type = field.content_type().map(|m| m.to_string());

        let limit = if file_name.is_some() {
            MAX_UPLOAD_BYTES
        } else {
            MAX_TEXT_BYTES
        };

        let mut buf: Vec<u8> = Vec::new();
        while let Some(chunk) = field.next().await {
            let data = chunk?;
            if buf.len().saturating_add(data.len()) > limit {
                return Err(FormReadError::TooLarge(name));
            }
            buf.extend_from_slice(&data);
        }

        match file_name {
            Some(file_name) if file_name.is_empty() && buf.is_empty() => {}
            Some(file_name) => {
                form.file = Some(UploadFile::new(file_name, content_type, buf));
            }
            None => {
                let value = String::from_utf8(buf)
                    .map_err(|_| FormReadError::NotUtf8(name.clone()))?;
                form.fields.insert(name, value);
            }
        }
    }

    Ok(form)
}
