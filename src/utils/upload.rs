use std::path::Path;

use mime::Mime;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::error::{Error, Result};

pub const ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// An image file that passed the client-side extension check. Only the
/// constructors below build one, so every instance has an allowed extension.
#[derive(Clone, Debug, PartialEq)]
pub struct PhotoUpload {
    file_name: String,
    mime: Mime,
    bytes: Vec<u8>,
}

impl PhotoUpload {
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let file_name = file_name.into();
        let mime = mime_for(&file_name)?;
        Ok(PhotoUpload {
            file_name,
            mime,
            bytes,
        })
    }

    /// Checks the extension before touching the file.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::UnsupportedExtension(String::new()))?
            .to_string();
        let mime = mime_for(&file_name)?;
        let bytes = tokio::fs::read(path).await?;
        debug!(file = %file_name, size = bytes.len(), "read photo for upload");

        Ok(PhotoUpload {
            file_name,
            mime,
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime(&self) -> &Mime {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn into_part(self) -> Result<Part> {
        Ok(Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(self.mime.as_ref())?)
    }
}

/// Multipart body of `photos/create` and `photos/update`.
#[derive(Clone, Debug, PartialEq)]
pub struct PhotoForm {
    pub photo_id: Option<i64>,
    pub image: Option<PhotoUpload>,
    pub tag_ids: Vec<i64>,
    pub user_id: i64,
}

impl PhotoForm {
    pub fn joined_tag_ids(&self) -> String {
        self.tag_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn into_multipart(self) -> Result<Form> {
        let mut form = Form::new();
        if let Some(photo_id) = self.photo_id {
            form = form.text("photoId", photo_id.to_string());
        }
        let tag_ids = self.joined_tag_ids();
        form = form
            .text("tagIds", tag_ids)
            .text("userId", self.user_id.to_string());
        if let Some(image) = self.image {
            form = form.part("image", image.into_part()?);
        }
        Ok(form)
    }
}

pub fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

fn mime_for(file_name: &str) -> Result<Mime> {
    let ext = extension_of(file_name).unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => Ok(mime::IMAGE_JPEG),
        "png" => Ok(mime::IMAGE_PNG),
        "gif" => Ok(mime::IMAGE_GIF),
        _ => Err(Error::UnsupportedExtension(ext)),
    }
}
