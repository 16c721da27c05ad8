//! News endpoints. Listing and cover images are public; mutations carry the
//! admin token and go over multipart because of the image.

use mothersaid_common::entities::NewsItem;
use mothersaid_common::error::Result;
use reqwest::multipart::Form;
use tracing::instrument;

use crate::client::{ApiClient, Download, UploadFile};

impl ApiClient {
    /// Published news, newest first. No token: the public site reads this.
    #[instrument(skip(self))]
    pub async fn list_news(&self) -> Result<Vec<NewsItem>> {
        let resp = self.get("/admin/news").send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    /// Cover image bytes for a news item.
    #[instrument(skip(self))]
    pub async fn news_image(&self, news_id: &str) -> Result<Download> {
        let path = format!("/admin/news/{news_id}/image");
        self.fetch_bytes(self.get(&path)).await
    }

    #[instrument(skip(self, token, content, cover_image))]
    pub async fn create_news(
        &self,
        token: &str,
        title: &str,
        content: &str,
        cover_image: UploadFile,
    ) -> Result<()> {
        let form = Form::new()
            .text("title", title.to_string())
            .text("content", content.to_string())
            .part("cover_image", cover_image.into_part()?);
        let resp = self
            .post("/admin/news")
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    /// Update title/content, optionally replacing the cover image.
    #[instrument(skip(self, token, content, cover_image))]
    pub async fn update_news(
        &self,
        token: &str,
        news_id: &str,
        title: &str,
        content: &str,
        cover_image: Option<UploadFile>,
    ) -> Result<()> {
        let mut form = Form::new()
            .text("title", title.to_string())
            .text("content", content.to_string());
        if let Some(image) = cover_image {
            form = form.part("cover_image", image.into_part()?);
        }
        let path = format!("/admin/news/{news_id}");
        let resp = self
            .put(&path)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    #[instrument(skip(self, token))]
    pub async fn delete_news(&self, token: &str, news_id: &str) -> Result<()> {
        let path = format!("/admin/news/{news_id}");
        let resp = self.delete(&path).bearer_auth(token).send().await?;
        Self::check(resp).await?;
        Ok(())
    }
}
