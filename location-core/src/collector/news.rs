use anyhow::Result;
use async_trait::async_trait;
use futures::future::join_all;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::NewsSource;
use crate::{
    client::{
        NewsClient,
        news::{Article, NewsResponse},
    },
    config::DEFAULT_NEWS_PAGE_SIZE,
    model::{LocationDto, NewsInfoDto},
};

#[derive(Debug, Clone)]
pub struct NewsCollector {
    client: NewsClient,
    page_size: usize,
}

impl NewsCollector {
    pub fn new(client: NewsClient) -> Self {
        Self::with_page_size(client, DEFAULT_NEWS_PAGE_SIZE)
    }

    pub fn with_page_size(client: NewsClient, page_size: usize) -> Self {
        Self { client, page_size }
    }

    /// Raw provider payload for one location.
    pub async fn read(&self, location: &LocationDto) -> Result<Option<NewsResponse>> {
        self.client.everything(&location.query(), self.page_size).await
    }

    /// Newest first, at most `page_size` items.
    fn articles(&self, response: NewsResponse) -> Vec<NewsInfoDto> {
        let mut news: Vec<NewsInfoDto> = response
            .articles
            .into_iter()
            .map(NewsInfoDto::from)
            .collect();
        news.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        news.truncate(self.page_size);
        news
    }
}

#[async_trait]
impl NewsSource for NewsCollector {
    async fn collect(
        &self,
        locations: &HashSet<LocationDto>,
    ) -> Result<HashMap<LocationDto, Vec<NewsInfoDto>>> {
        let responses = join_all(
            locations
                .iter()
                .map(|location| async move { (location, self.read(location).await) }),
        )
        .await;

        let mut news = HashMap::with_capacity(responses.len());
        for (location, response) in responses {
            match response? {
                Some(payload) => {
                    news.insert(location.clone(), self.articles(payload));
                }
                None => {
                    debug!(location = %location.query(), "No news, leaving location out");
                }
            }
        }

        Ok(news)
    }
}

impl From<Article> for NewsInfoDto {
    fn from(article: Article) -> Self {
        Self {
            title: article.title.unwrap_or_default(),
            description: article.description.unwrap_or_default(),
            source: article.source.name.unwrap_or_default(),
            url: article.url,
            published_at: article.published_at,
        }
    }
}
