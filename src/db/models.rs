use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error as ThisError;

pub const DEFAULT_LEAD_PRIORITY: &str = "Medium";
pub const DEFAULT_LEAD_STATUS: &str = "new";

/// Insert payload rejected before it reaches the database.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("missing required field(s): {}", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

/// Collects the names of absent required fields.
#[derive(Default)]
struct Required {
    missing: Vec<&'static str>,
}

impl Required {
    fn take(&mut self, name: &'static str, value: Option<String>) -> String {
        value.unwrap_or_else(|| {
            self.missing.push(name);
            String::new()
        })
    }

    fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.missing.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError {
                missing: self.missing,
            })
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// Raw user insert body, as received.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserInsert {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

impl UserInsert {
    pub fn validate(self) -> Result<NewUser, ValidationError> {
        let mut req = Required::default();
        let username = req.take("username", self.username);
        let password = req.take("password", self.password);
        req.finish(NewUser { username, password })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Lead {
    pub lead_id: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub phone: String,
    pub age: Option<i64>,
    pub source: Option<String>,
    pub campaign: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub inquiry_type: Option<String>,
    pub priority: String,
    pub status: String,
    pub assigned_to: Option<String>,
    pub clinic_id: Option<String>,
    pub notes: Option<String>,
    pub last_contact_date: Option<String>,
    pub next_follow_up_date: Option<String>,
    pub converted_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Raw lead insert body, as received.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LeadInsert {
    pub lead_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub age: Option<i64>,
    pub source: Option<String>,
    pub campaign: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub inquiry_type: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub assigned_to: Option<String>,
    pub clinic_id: Option<String>,
    pub notes: Option<String>,
    pub last_contact_date: Option<String>,
    pub next_follow_up_date: Option<String>,
    pub converted_date: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A lead that passed insert validation. Timestamps left `None` are stamped
/// by storage.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLead {
    pub lead_id: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub phone: String,
    pub age: Option<i64>,
    pub source: Option<String>,
    pub campaign: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub inquiry_type: Option<String>,
    pub priority: String,
    pub status: String,
    pub assigned_to: Option<String>,
    pub clinic_id: Option<String>,
    pub notes: Option<String>,
    pub last_contact_date: Option<String>,
    pub next_follow_up_date: Option<String>,
    pub converted_date: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl LeadInsert {
    pub fn validate(self) -> Result<NewLead, ValidationError> {
        let mut req = Required::default();
        let lead_id = req.take("lead_id", self.lead_id);
        let first_name = req.take("first_name", self.first_name);
        let email = req.take("email", self.email);
        let phone = req.take("phone", self.phone);
        req.finish(NewLead {
            lead_id,
            first_name,
            last_name: self.last_name,
            email,
            phone,
            age: self.age,
            source: self.source,
            campaign: self.campaign,
            utm_source: self.utm_source,
            utm_medium: self.utm_medium,
            utm_campaign: self.utm_campaign,
            inquiry_type: self.inquiry_type,
            priority: self
                .priority
                .unwrap_or_else(|| DEFAULT_LEAD_PRIORITY.to_string()),
            status: self.status.unwrap_or_else(|| DEFAULT_LEAD_STATUS.to_string()),
            assigned_to: self.assigned_to,
            clinic_id: self.clinic_id,
            notes: self.notes,
            last_contact_date: self.last_contact_date,
            next_follow_up_date: self.next_follow_up_date,
            converted_date: self.converted_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Partial lead update. Absent fields keep their stored value; `lead_id` and
/// `created_at` are not patchable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LeadPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub age: Option<i64>,
    pub source: Option<String>,
    pub campaign: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub inquiry_type: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub assigned_to: Option<String>,
    pub clinic_id: Option<String>,
    pub notes: Option<String>,
    pub last_contact_date: Option<String>,
    pub next_follow_up_date: Option<String>,
    pub converted_date: Option<String>,
}
