//! REST API Wrappers
//!
//! One async call per `/tasks/` route, behind [`TodoApi`] so board logic
//! does not care whether it talks to the server or a test double.

mod auth;
mod http;
pub mod payloads;

use async_trait::async_trait;

use crate::models::{Category, Snapshot, Task};
use payloads::{
    CategoryRef, CategoryRelocation, CategoryRename, NewCategory, NewTask, TaskDeletion,
    TaskRelocation, TaskUpdate,
};

pub use auth::{login, register, stored_token};
pub use http::HttpApi;

/// Any failed call. The user sees one generic alert either way;
/// the variants only matter for logs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed response: {0}")]
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[async_trait(?Send)]
pub trait TodoApi {
    /// `GET get`
    async fn snapshot(&self) -> ApiResult<Snapshot>;

    async fn add_category(&self, body: &NewCategory) -> ApiResult<Category>;
    async fn update_category(&self, body: &CategoryRename) -> ApiResult<Category>;
    async fn delete_category(&self, body: &CategoryRef) -> ApiResult<()>;
    /// The server may answer with a fresh snapshot
    async fn relocate_category(&self, body: &CategoryRelocation) -> ApiResult<Option<Snapshot>>;

    async fn add_task(&self, body: &NewTask) -> ApiResult<Task>;
    async fn update_task(&self, body: &TaskUpdate) -> ApiResult<Task>;
    async fn delete_task(&self, body: &TaskDeletion) -> ApiResult<()>;
    async fn relocate_task(&self, body: &TaskRelocation) -> ApiResult<Task>;
}
