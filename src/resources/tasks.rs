//! Task endpoints.

use crate::error::DanellaResult;
use crate::http::HttpClient;
use crate::types::{SecondaryFieldDto, TaskCreateDto, TaskResponse};
use std::sync::Arc;

/// Typed access to the `/api/tasks` endpoints.
#[derive(Debug, Clone)]
pub struct TasksResource {
    http: Arc<HttpClient>,
}

impl TasksResource {
    /// Create a tasks resource over the given transport.
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Get secondary field definitions for a project.
    pub async fn project_secondary_fields(
        &self,
        project_id: i64,
    ) -> DanellaResult<Vec<SecondaryFieldDto>> {
        self.http
            .get(&format!("/api/tasks/project-secondary-fields/{project_id}"))
            .await
    }

    /// Get all tasks in a subproject.
    pub async fn by_sub_project(&self, sub_project_id: i64) -> DanellaResult<Vec<TaskResponse>> {
        self.http
            .get(&format!("/api/tasks/by-subproject/{sub_project_id}"))
            .await
    }

    /// Get a task by ID.
    pub async fn by_id(&self, id: i64) -> DanellaResult<TaskResponse> {
        self.http.get(&format!("/api/tasks/{id}")).await
    }

    /// Create or update a task, returning the upserted task.
    pub async fn update(&self, task: &TaskCreateDto) -> DanellaResult<TaskResponse> {
        self.http.put("/api/tasks", task).await
    }
}
