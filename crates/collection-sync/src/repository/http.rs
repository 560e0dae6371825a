//! REST implementation of [`RemoteCollection`]

use std::marker::PhantomData;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};

use super::traits::RemoteCollection;
use crate::config::ApiConfig;
use crate::domain::Resource;
use crate::error::RequestError;

/// One collection endpoint (`{base}/{schema.path}`) of the REST API
#[derive(Debug, Clone)]
pub struct HttpCollection<T> {
    client: reqwest::Client,
    config: ApiConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Resource> HttpCollection<T> {
    pub fn new(config: ApiConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Share one connection pool between collections
    pub fn with_client(client: reqwest::Client, config: ApiConfig) -> Self {
        Self {
            client,
            config,
            _marker: PhantomData,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn collection_url(&self) -> String {
        self.config.collection_url(T::schema().path)
    }

    fn item_url(&self, id: &str) -> String {
        self.config.item_url(T::schema().path, id)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, RequestError> {
        let res = request.send().await?;
        let status = res.status();

        if !status.is_success() {
            let body = res.text().await.unwrap_or_else(|_| "no body".to_string());
            log::error!(
                "unexpected response from {} endpoint: status={} body={}",
                T::schema().path,
                status,
                body
            );
            return Err(RequestError::Server {
                status: status.as_u16(),
                body,
            });
        }

        Ok(res)
    }

    /// Decode the item echoed back by a mutating call, if any.
    async fn echoed_item(&self, res: Response) -> Result<Option<T>, RequestError> {
        let text = res.text().await?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        match serde_json::from_str(&text) {
            Ok(item) => Ok(Some(item)),
            Err(e) => {
                log::debug!("{} response body is not an item: {}", T::schema().path, e);
                Ok(None)
            }
        }
    }
}

#[async_trait(?Send)]
impl<T: Resource> RemoteCollection<T> for HttpCollection<T> {
    async fn list(&self) -> Result<Vec<T>, RequestError> {
        let url = self.collection_url();
        log::debug!("GET {}", url);
        let res = self.send(self.client.get(url)).await?;
        let text = res.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn get(&self, id: &str) -> Result<T, RequestError> {
        let url = self.item_url(id);
        log::debug!("GET {}", url);
        let res = self.send(self.client.get(url)).await?;
        let text = res.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn create(&self, draft: &T::Draft) -> Result<Option<T>, RequestError> {
        let url = self.collection_url();
        log::debug!("POST {}", url);
        let res = self.send(self.client.post(url).json(draft)).await?;
        self.echoed_item(res).await
    }

    async fn update(&self, draft: &T::Draft) -> Result<Option<T>, RequestError> {
        let url = self.collection_url();
        log::debug!("PUT {}", url);
        let res = self.send(self.client.put(url).json(draft)).await?;
        self.echoed_item(res).await
    }

    async fn delete(&self, id: &str) -> Result<(), RequestError> {
        let url = self.item_url(id);
        log::debug!("DELETE {}", url);
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Product};

    fn config() -> ApiConfig {
        ApiConfig::new("http://localhost:3000/").unwrap()
    }

    #[test]
    fn test_endpoints_follow_schema_path() {
        let categories = HttpCollection::<Category>::new(config());
        assert_eq!(categories.collection_url(), "http://localhost:3000/category");
        assert_eq!(categories.item_url("c1"), "http://localhost:3000/category/c1");

        let products = HttpCollection::<Product>::with_client(reqwest::Client::new(), config());
        assert_eq!(products.item_url("p1"), "http://localhost:3000/product/p1");
    }
}
