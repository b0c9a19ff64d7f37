//! Typed wrappers over every clinic API route the dashboard calls.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Method;
use serde_json::Value;
use std::path::Path;

use super::error::ClientError;
use super::http::ApiClient;
use crate::types::clinic::{
    AppointmentQuery, AppointmentStatusUpdate, AppointmentUpdate, AssistantReply,
    AssistantRequest, ClinicalNote, CroDashboard, DocumentUpload, LoginCredentials,
};

pub const UPLOADED_DOCUMENT_TYPE: &str = "Uploaded";
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

impl ApiClient {
    // Appointments

    pub async fn get_appointments(&self, query: &AppointmentQuery) -> Result<Value, ClientError> {
        let req = self
            .request(Method::GET, &["api", "appointments"])?
            .query(query);
        self.fetch_json(req).await
    }

    pub async fn get_appointment(&self, id: &str) -> Result<Value, ClientError> {
        self.get_json(&["api", "appointments", id]).await
    }

    pub async fn create_appointment(&self, data: &Value) -> Result<Value, ClientError> {
        self.send_json(Method::POST, &["api", "appointments"], data)
            .await
    }

    pub async fn update_appointment(
        &self,
        id: &str,
        data: &AppointmentUpdate,
    ) -> Result<Value, ClientError> {
        self.send_json(Method::PATCH, &["api", "appointments", id], data)
            .await
    }

    pub async fn update_appointment_status(
        &self,
        id: &str,
        data: &AppointmentStatusUpdate,
    ) -> Result<Value, ClientError> {
        self.send_json(Method::PATCH, &["api", "appointments", id, "status"], data)
            .await
    }

    // Leads

    pub async fn get_leads(&self) -> Result<Value, ClientError> {
        self.get_json(&["api", "leads"]).await
    }

    pub async fn get_lead(&self, id: &str) -> Result<Value, ClientError> {
        self.get_json(&["api", "leads", id]).await
    }

    pub async fn create_lead(&self, data: &Value) -> Result<Value, ClientError> {
        self.send_json(Method::POST, &["api", "leads"], data).await
    }

    pub async fn update_lead(&self, id: &str, data: &Value) -> Result<Value, ClientError> {
        self.send_json(Method::PATCH, &["api", "leads", id], data)
            .await
    }

    pub async fn re_engage_lead(&self, id: &str) -> Result<Value, ClientError> {
        self.post_empty(&["api", "leads", id, "re-engage"]).await
    }

    // Patients

    pub async fn get_patients(&self) -> Result<Value, ClientError> {
        self.get_json(&["api", "patients"]).await
    }

    pub async fn get_patient(&self, id: &str) -> Result<Value, ClientError> {
        self.get_json(&["api", "patients", id]).await
    }

    pub async fn get_patient_appointments(&self, id: &str) -> Result<Value, ClientError> {
        self.get_json(&["api", "patients", id, "appointments"])
            .await
    }

    pub async fn create_patient(&self, data: &Value) -> Result<Value, ClientError> {
        self.send_json(Method::POST, &["api", "patients"], data)
            .await
    }

    pub async fn update_patient(&self, id: &str, data: &Value) -> Result<Value, ClientError> {
        self.send_json(Method::PATCH, &["api", "patients", id], data)
            .await
    }

    /// Name or phone search; the backend matches both through `q`.
    pub async fn search_patients(&self, query: &str) -> Result<Value, ClientError> {
        let req = self
            .request(Method::GET, &["api", "patients"])?
            .query(&[("q", query)]);
        self.fetch_json(req).await
    }

    pub async fn get_patient_documents(&self, id: &str) -> Result<Value, ClientError> {
        self.get_json(&["api", "patients", id, "documents"]).await
    }

    /// Upload raw bytes as a patient document, base64-encoded inside JSON.
    pub async fn upload_patient_document(
        &self,
        id: &str,
        name: &str,
        content_type: Option<&str>,
        contents: &[u8],
    ) -> Result<Value, ClientError> {
        let payload = document_payload(name, content_type, contents);
        self.send_json(Method::POST, &["api", "patients", id, "documents"], &payload)
            .await
    }

    /// Read a file from disk and upload it under its file name.
    pub async fn upload_patient_document_file(
        &self,
        id: &str,
        path: &Path,
        content_type: Option<&str>,
    ) -> Result<Value, ClientError> {
        let contents = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.upload_patient_document(id, &name, content_type, &contents)
            .await
    }

    pub async fn save_clinical_note(&self, patient_id: &str, note: &str) -> Result<Value, ClientError> {
        let body = ClinicalNote {
            note: note.to_string(),
        };
        self.send_json(
            Method::POST,
            &["api", "patients", patient_id, "clinical-notes"],
            &body,
        )
        .await
    }

    pub async fn get_clinical_notes(&self, patient_id: &str) -> Result<Value, ClientError> {
        self.get_json(&["api", "patients", patient_id, "clinical-notes"])
            .await
    }

    // Dashboard

    pub async fn get_dashboard_summary(&self) -> Result<Value, ClientError> {
        self.get_json(&["api", "dashboard", "summary"]).await
    }

    pub async fn get_cro_dashboard(&self) -> Result<CroDashboard, ClientError> {
        self.get_json(&["api", "dashboard", "cro"]).await
    }

    // Auth

    pub async fn login(&self, credentials: &LoginCredentials) -> Result<Value, ClientError> {
        self.send_json(Method::POST, &["api", "auth", "login"], credentials)
            .await
    }

    pub async fn logout(&self) -> Result<Value, ClientError> {
        self.post_empty(&["api", "auth", "logout"]).await
    }

    // Control tower

    pub async fn get_patient_flow_summary(&self) -> Result<Value, ClientError> {
        self.get_json(&["api", "control-tower", "patient-flow-summary"])
            .await
    }

    pub async fn get_waiting_alerts(&self) -> Result<Value, ClientError> {
        self.get_json(&["api", "control-tower", "waiting-alerts"])
            .await
    }

    pub async fn get_live_queue(&self) -> Result<Value, ClientError> {
        self.get_json(&["api", "control-tower", "live-queue"]).await
    }

    pub async fn get_doctor_utilization(&self) -> Result<Value, ClientError> {
        self.get_json(&["api", "control-tower", "doctor-utilization"])
            .await
    }

    pub async fn get_lead_snapshot(&self) -> Result<Value, ClientError> {
        self.get_json(&["api", "control-tower", "lead-summary"])
            .await
    }

    // Internal assistant

    pub async fn internal_assistant_chat(
        &self,
        payload: &AssistantRequest,
    ) -> Result<AssistantReply, ClientError> {
        self.send_json(
            Method::POST,
            &["api", "internal-assistant", "chat"],
            payload,
        )
        .await
    }
}

fn document_payload(name: &str, content_type: Option<&str>, contents: &[u8]) -> DocumentUpload {
    let content_type = content_type
        .filter(|ct| !ct.is_empty())
        .unwrap_or(DEFAULT_CONTENT_TYPE);
    DocumentUpload {
        name: name.to_string(),
        document_type: UPLOADED_DOCUMENT_TYPE.to_string(),
        content_type: content_type.to_string(),
        base64: STANDARD.encode(contents),
    }
}
