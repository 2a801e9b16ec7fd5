//! Fetch-backed [`TodoApi`]

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::payloads::{
    CategoryRef, CategoryRelocation, CategoryRename, ErrorBody, NewCategory, NewTask,
    TaskDeletion, TaskRelocation, TaskUpdate,
};
use super::{stored_token, ApiError, ApiResult, TodoApi};
use crate::config::ClientConfig;
use crate::models::{Category, Snapshot, Task};

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpApi {
    config: ClientConfig,
}

impl HttpApi {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match stored_token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn get<R: DeserializeOwned>(&self, route: &str) -> ApiResult<R> {
        let url = self.config.tasks_route(route);
        let response = self.authorized(Request::get(&url)).send().await?;
        Ok(ensure_ok(route, response).await?.json::<R>().await?)
    }

    async fn post<B: Serialize>(&self, route: &str, body: &B) -> ApiResult<Response> {
        let url = self.config.tasks_route(route);
        tracing::debug!(route, "POST");
        let response = self.authorized(Request::post(&url)).json(body)?.send().await?;
        ensure_ok(route, response).await
    }

    async fn post_json<B: Serialize, R: DeserializeOwned>(&self, route: &str, body: &B) -> ApiResult<R> {
        Ok(self.post(route, body).await?.json::<R>().await?)
    }
}

/// Turn a non-2xx response into [`ApiError::Status`], keeping the server's message
pub(super) async fn ensure_ok(route: &str, response: Response) -> ApiResult<Response> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);
    tracing::warn!(route, status, %message, "request rejected");
    Err(ApiError::Status { status, message })
}

/// The move is already applied once relocateCategory answered 2xx, so an
/// unreadable body only means there is nothing to reconcile with
fn relocation_snapshot(text: &str) -> Option<Snapshot> {
    if text.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<Snapshot>(text) {
        // the moved category itself is always listed
        Ok(snapshot) if !snapshot.categories.is_empty() => Some(snapshot),
        Ok(_) => {
            tracing::warn!("relocateCategory answered without categories, keeping local order");
            None
        }
        Err(err) => {
            tracing::warn!(error = %err, "relocateCategory answer is not a snapshot, keeping local order");
            None
        }
    }
}

#[async_trait(?Send)]
impl TodoApi for HttpApi {
    async fn snapshot(&self) -> ApiResult<Snapshot> {
        self.get("get").await
    }

    async fn add_category(&self, body: &NewCategory) -> ApiResult<Category> {
        self.post_json("addCategory", body).await
    }

    async fn update_category(&self, body: &CategoryRename) -> ApiResult<Category> {
        self.post_json("updateCategory", body).await
    }

    async fn delete_category(&self, body: &CategoryRef) -> ApiResult<()> {
        self.post("deleteCategory", body).await.map(|_| ())
    }

    async fn relocate_category(&self, body: &CategoryRelocation) -> ApiResult<Option<Snapshot>> {
        let text = self.post("relocateCategory", body).await?.text().await?;
        Ok(relocation_snapshot(&text))
    }

    async fn add_task(&self, body: &NewTask) -> ApiResult<Task> {
        self.post_json("addTask", body).await
    }

    async fn update_task(&self, body: &TaskUpdate) -> ApiResult<Task> {
        self.post_json("updateTask", body).await
    }

    async fn delete_task(&self, body: &TaskDeletion) -> ApiResult<()> {
        self.post("deleteTask", body).await.map(|_| ())
    }

    async fn relocate_task(&self, body: &TaskRelocation) -> ApiResult<Task> {
        self.post_json("relocateTask", body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_relocation_snapshot_parses_board() {
        let snapshot = relocation_snapshot(
            r#"{"categories":[{"id":2,"name":"B","order":1}],"tasks":null}"#,
        )
        .unwrap();
        assert_eq!(snapshot.categories.len(), 1);
        assert!(snapshot.tasks.is_empty());
    }

    #[test]
    fn test_relocation_snapshot_tolerates_odd_bodies() {
        assert_eq!(relocation_snapshot(""), None);
        assert_eq!(relocation_snapshot("  \n"), None);
        assert_eq!(relocation_snapshot("OK"), None);
        assert_eq!(relocation_snapshot(r#"{"status":"moved"}"#), None);
    }
}
