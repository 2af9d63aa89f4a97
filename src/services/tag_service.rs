use async_trait::async_trait;
use reqwest::Method;
use tracing::info;

use super::api_client::ApiClient;
use crate::error::{Error, Result};
use crate::models::{Page, PageRequest, Tag};

#[async_trait]
pub trait TagService: Send + Sync {
    /// Direct children of a tag. `0` addresses the root.
    async fn children_of(&self, tag_id: i64) -> Result<Vec<Tag>>;

    async fn find_tag(&self, id: i64) -> Result<Tag>;

    async fn query_tags(&self, request: Option<&PageRequest>) -> Result<Page<Tag>>;

    async fn create_tag(&self, tag: &Tag) -> Result<Tag>;

    /// Creates the tag instead when it has no id yet.
    async fn update_tag(&self, tag: &Tag) -> Result<Tag>;

    /// The backend removes the whole subtree and any photo left without tags.
    async fn delete_tag(&self, id: i64) -> Result<()>;
}

#[async_trait]
impl TagService for ApiClient {
    async fn children_of(&self, tag_id: i64) -> Result<Vec<Tag>> {
        let path = format!("tags/{tag_id}/children");
        self.json(self.request(Method::GET, &path), &path).await
    }

    async fn find_tag(&self, id: i64) -> Result<Tag> {
        let path = format!("tags/{id}");
        self.json(self.request(Method::GET, &path), &path).await
    }

    async fn query_tags(&self, request: Option<&PageRequest>) -> Result<Page<Tag>> {
        let mut builder = self.request(Method::GET, "tags");
        if let Some(request) = request {
            builder = builder.query(&request.query_pairs());
        }
        self.page(builder, "tags").await
    }

    async fn create_tag(&self, tag: &Tag) -> Result<Tag> {
        if tag.is_root() {
            return Err(Error::RootTagNotPersisted);
        }
        if tag.id.is_some() {
            return Err(Error::IdExists("tag"));
        }

        let created: Tag = self
            .json(self.request(Method::POST, "tags").json(tag), "tags")
            .await?;
        info!(id = ?created.id, name = created.label(), "tag created");
        Ok(created)
    }

    async fn update_tag(&self, tag: &Tag) -> Result<Tag> {
        if tag.is_root() {
            return Err(Error::RootTagNotPersisted);
        }
        if tag.id.is_none() {
            return self.create_tag(tag).await;
        }

        let updated: Tag = self
            .json(self.request(Method::PUT, "tags").json(tag), "tags")
            .await?;
        info!(id = ?updated.id, "tag updated");
        Ok(updated)
    }

    async fn delete_tag(&self, id: i64) -> Result<()> {
        if id == crate::models::tag::ROOT_TAG_ID {
            return Err(Error::RootTagNotPersisted);
        }

        let path = format!("tags/{id}");
        self.send(self.request(Method::DELETE, &path), &path).await?;
        info!(id, "tag deleted");
        Ok(())
    }
}
