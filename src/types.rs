//! Wire DTOs for the tasks API.
//!
//! Field names follow the Danella wire format (camelCase with `ID` suffixes);
//! dates are ISO 8601 strings as returned by the server.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Secondary field definition for a project.
///
/// Returned by `GET /api/tasks/project-secondary-fields/{projectId}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SecondaryFieldDto {
    /// Identifier of this project/field association.
    #[serde(rename = "projectSecondaryFieldID")]
    pub project_secondary_field_id: i64,
    /// Owning project.
    #[serde(rename = "projectID")]
    pub project_id: i64,
    /// Underlying field definition.
    #[serde(rename = "fieldDefinitionID")]
    pub field_definition_id: i64,
    /// Display name of the field.
    pub field_name: String,
    /// Soft-delete marker (0 or 1).
    pub deleted: i64,
    /// Creation date.
    pub create_date: String,
    /// User who created the association.
    #[serde(rename = "userID")]
    pub user_id: i64,
}

/// Secondary field value attached to a task on create/update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSecondaryFieldValue {
    /// Name of the secondary field.
    pub field_name: String,
    /// Value, or `None` to clear it.
    pub value: Option<String>,
}

/// Body for `PUT /api/tasks` (create or update a task).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreateDto {
    /// Subproject to attach the task to.
    #[serde(rename = "subProjectID", skip_serializing_if = "Option::is_none")]
    pub sub_project_id: Option<i64>,
    /// Verifier key.
    #[serde(rename = "verifierKeyID", skip_serializing_if = "Option::is_none")]
    pub verifier_key_id: Option<String>,
    /// Job identifier.
    #[serde(rename = "jobID", skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    /// Estimated closing date, ISO 8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_closing_date: Option<String>,
    /// Secondary field values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_fields: Option<Vec<TaskSecondaryFieldValue>>,
}

/// A task as returned by the API.
///
/// `#[serde(default)]` keeps deserialization tolerant of fields the server
/// omits for older tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskResponse {
    /// Task identifier.
    #[serde(rename = "taskID")]
    pub task_id: i64,
    /// Human-readable task code.
    pub task_code: String,
    /// Job identifier.
    #[serde(rename = "jobID")]
    pub job_id: String,
    /// Verifier key.
    #[serde(rename = "verifierKeyID")]
    pub verifier_key_id: String,
    /// End customer.
    #[serde(rename = "endCustomerID")]
    pub end_customer_id: i64,
    /// Manager area.
    #[serde(rename = "managerAreaID")]
    pub manager_area_id: i64,
    /// Creation date.
    pub creation_date: String,
    /// Start date.
    pub start_date: String,
    /// Estimated closing date.
    pub estimated_closing_date: String,
    /// Actual end date, if closed.
    pub end_date: Option<String>,
    /// Forecast revenue.
    pub forecast_revenue_amount: f64,
    /// Forecast cost.
    pub forecast_cost_amount: f64,
    /// Task status.
    #[serde(rename = "taskStatusID")]
    pub task_status_id: i64,
    /// End customer name.
    pub end_customer_name: String,
    /// Legal entity name.
    pub legal_entity_name: String,
    /// Manager area name.
    pub manager_area_name: String,
    /// Task status name.
    pub task_status_name: String,
    /// Expanded end customer, when requested.
    pub end_customer: Option<Value>,
    /// Expanded manager area, when requested.
    pub manager_area: Option<Value>,
    /// Expanded task status, when requested.
    pub task_status: Option<Value>,
    /// Owning user.
    #[serde(rename = "userID")]
    pub user_id: i64,
    /// Owning subproject.
    #[serde(rename = "subProjectID")]
    pub sub_project_id: i64,
    /// Subproject name.
    pub sub_project_name: Option<String>,
    /// Owning project.
    #[serde(rename = "projectID")]
    pub project_id: i64,
    /// Project name.
    pub project_name: Option<String>,
    /// Customer name.
    pub customer_name: String,
    /// Project type.
    #[serde(rename = "projectTypeID")]
    pub project_type_id: i64,
    /// Project type name.
    pub project_type: String,
    /// Job type.
    #[serde(rename = "jobTypeID")]
    pub job_type_id: i64,
    /// Job type name.
    pub job_type: String,
    /// Project codes status.
    #[serde(rename = "taskProjectCodesStatusID")]
    pub task_project_codes_status_id: i64,
    /// Expanded project codes status.
    pub task_project_codes_status: Option<Value>,
    /// Approval date for project codes.
    pub approve_date_project_codes: String,
    /// Vendor.
    #[serde(rename = "vendorID")]
    pub vendor_id: i64,
    /// Vendor name.
    pub vendor_name: String,
    /// Supervisor name.
    pub supervisor_name: String,
    /// Designer name.
    pub designer_name: String,
    /// Cost center.
    pub cost_center: Option<Value>,
    /// Customer.
    #[serde(rename = "customerID")]
    pub customer_id: i64,
    /// Customer cost-center association.
    #[serde(rename = "taskCustomerCostCenterID")]
    pub task_customer_cost_center_id: i64,
    /// Billed amount.
    pub amount: Option<f64>,
    /// Internal cost.
    pub internal_cost: Option<f64>,
    /// Vendor cost.
    pub vendor_cost: Option<f64>,
    /// Profit.
    pub profit: Option<f64>,
    /// Margin.
    pub margin: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_task_create_dto_wire_names() {
        let dto = TaskCreateDto {
            sub_project_id: Some(41),
            job_id: Some("TEST-001".to_string()),
            verifier_key_id: Some("VER-001".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "subProjectID": 41,
                "jobID": "TEST-001",
                "verifierKeyID": "VER-001",
            })
        );
    }

    #[test]
    fn test_task_response_partial_body() {
        let task: TaskResponse = serde_json::from_str(
            r#"{"taskID": 6394, "taskCode": "T-6394", "subProjectID": 32, "amount": null}"#,
        )
        .unwrap();
        assert_eq!(task.task_id, 6394);
        assert_eq!(task.task_code, "T-6394");
        assert_eq!(task.sub_project_id, 32);
        assert_eq!(task.amount, None);
    }

    #[test]
    fn test_secondary_field_wire_names() {
        let field: SecondaryFieldDto = serde_json::from_str(
            r#"{
                "projectSecondaryFieldID": 7,
                "projectID": 1,
                "fieldDefinitionID": 3,
                "fieldName": "Region",
                "deleted": 0,
                "createDate": "2025-01-01T00:00:00Z",
                "userID": 12
            }"#,
        )
        .unwrap();
        assert_eq!(field.project_secondary_field_id, 7);
        assert_eq!(field.field_name, "Region");
    }

    #[test]
    fn test_secondary_field_value_clearing() {
        let value = TaskSecondaryFieldValue {
            field_name: "Region".to_string(),
            value: None,
        };
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json, serde_json::json!({"fieldName": "Region", "value": null}));
    }
}
