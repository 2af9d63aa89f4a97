use async_trait::async_trait;
use reqwest::Method;
use tracing::info;

use super::api_client::ApiClient;
use crate::error::Result;
use crate::models::{Page, PageRequest, Photo};
use crate::utils::upload::PhotoForm;

#[async_trait]
pub trait PhotoService: Send + Sync {
    /// One page of the photos attached to a tag. `0` addresses the root.
    async fn photos_by_tag(&self, tag_id: i64, request: &PageRequest) -> Result<Page<Photo>>;

    async fn query_photos(&self, request: Option<&PageRequest>) -> Result<Page<Photo>>;

    async fn find_photo(&self, id: i64) -> Result<Photo>;

    /// Full-size image as a `data:` URI.
    async fn photo_image(&self, id: i64) -> Result<String>;

    /// `photos/update` when the form carries a photo id, `photos/create` otherwise.
    async fn save_photo(&self, form: PhotoForm) -> Result<Photo>;

    async fn delete_photo(&self, id: i64) -> Result<()>;
}

#[async_trait]
impl PhotoService for ApiClient {
    async fn photos_by_tag(&self, tag_id: i64, request: &PageRequest) -> Result<Page<Photo>> {
        let mut query = vec![("tagId", tag_id.to_string())];
        query.extend(request.query_pairs());

        let builder = self.request(Method::GET, "photos").query(&query);
        self.page(builder, "photos").await
    }

    async fn query_photos(&self, request: Option<&PageRequest>) -> Result<Page<Photo>> {
        let mut builder = self.request(Method::GET, "photos");
        if let Some(request) = request {
            builder = builder.query(&request.query_pairs());
        }
        self.page(builder, "photos").await
    }

    async fn find_photo(&self, id: i64) -> Result<Photo> {
        let path = format!("photos/{id}");
        self.json(self.request(Method::GET, &path), &path).await
    }

    async fn photo_image(&self, id: i64) -> Result<String> {
        let path = format!("photos/{id}/image");
        let response = self.send(self.request(Method::GET, &path), &path).await?;
        Ok(response.text().await?)
    }

    async fn save_photo(&self, form: PhotoForm) -> Result<Photo> {
        let path = match form.photo_id {
            Some(_) => "photos/update",
            None => "photos/create",
        };
        let tag_count = form.tag_ids.len();
        let multipart = form.into_multipart()?;

        let saved: Photo = self
            .json(self.request(Method::POST, path).multipart(multipart), path)
            .await?;
        info!(id = ?saved.id, tags = tag_count, "photo saved via {path}");
        Ok(saved)
    }

    async fn delete_photo(&self, id: i64) -> Result<()> {
        let path = format!("photos/{id}");
        self.send(self.request(Method::DELETE, &path), &path).await?;
        info!(id, "photo deleted");
        Ok(())
    }
}
