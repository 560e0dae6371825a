//! Repository Layer
//!
//! Remote collection abstraction and its REST implementation.

mod http;
mod traits;

pub use http::HttpCollection;
pub use traits::RemoteCollection;
