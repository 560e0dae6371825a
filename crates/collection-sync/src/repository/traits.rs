//! Repository Layer - Core Traits
//!
//! Abstract interface to a remote collection resource. The HTTP
//! implementation talks to the REST API; tests substitute an in-memory one.

use async_trait::async_trait;

use crate::domain::Resource;
use crate::error::RequestError;

/// CRUD access to one remote collection
///
/// Futures are not required to be `Send`: the controller lives on the
/// single-threaded UI event loop, where browser fetch futures are `!Send`.
#[async_trait(?Send)]
pub trait RemoteCollection<T: Resource> {
    /// `GET /{path}`
    async fn list(&self) -> Result<Vec<T>, RequestError>;

    /// `GET /{path}/{id}`
    async fn get(&self, id: &str) -> Result<T, RequestError>;

    /// `POST /{path}`; the created item when the response body carries one
    async fn create(&self, draft: &T::Draft) -> Result<Option<T>, RequestError>;

    /// `PUT /{path}`; the draft carries the identifier
    async fn update(&self, draft: &T::Draft) -> Result<Option<T>, RequestError>;

    /// `DELETE /{path}/{id}`
    async fn delete(&self, id: &str) -> Result<(), RequestError>;
}
