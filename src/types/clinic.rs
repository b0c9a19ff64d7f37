//! Payloads exchanged with the clinic operations API.
//!
//! Most endpoints return loosely shaped JSON and are surfaced as
//! [`serde_json::Value`]; only the shapes the dashboard depends on are typed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize)]
pub struct AppointmentQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visit_reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Scheduled,
    Arrived,
    #[serde(rename = "Checked-In")]
    CheckedIn,
    Completed,
    Canceled,
    Expected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentStatusUpdate {
    pub status: AppointmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
}

/// Patient document upload. The file travels base64-encoded inside JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentUpload {
    pub name: String,
    pub document_type: String,
    #[serde(rename = "contentType")]
    pub content_type: String,
    pub base64: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicalNote {
    pub note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Internal assistant turn. Exactly one of the fields is normally set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssistantReply {
    pub reply: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CroDashboard {
    pub success: bool,
    pub data: CroDashboardData,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CroDashboardData {
    pub kpis: CroKpis,
    #[serde(default)]
    pub funnel: Option<Vec<Value>>,
    #[serde(default)]
    pub intervention_queue: Option<Vec<Value>>,
}

/// KPI block; trend values are only present when the backend computed them.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CroKpis {
    pub conversion_rate: Option<f64>,
    pub cro_success_rate: Option<f64>,
    pub avg_time_to_convert_days: Option<f64>,
    pub patient_churn_rate: Option<f64>,
    pub conversion_rate_trend: Option<f64>,
    pub cro_success_rate_trend: Option<f64>,
    pub avg_time_to_convert_days_trend: Option<f64>,
    pub patient_churn_rate_trend: Option<f64>,
}
