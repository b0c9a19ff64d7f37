use crate::db::models::{Lead, LeadPatch, NewLead, NewUser, User};
use crate::db::schema::SQLITE_INIT;
use crate::error::BindingError;
use chrono::{SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

pub type SqlitePool = Pool<Sqlite>;

const LEAD_COLUMNS: &str = r#"lead_id, first_name, last_name, email, phone, age, source,
    campaign, utm_source, utm_medium, utm_campaign, inquiry_type, priority, status,
    assigned_to, clinic_id, notes, last_contact_date, next_follow_up_date,
    converted_date, created_at, updated_at"#;

#[derive(Clone)]
pub struct ClinicStorage {
    pool: SqlitePool,
}

impl ClinicStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating the file if needed) and initialize the schema.
    pub async fn connect(database_url: &str) -> Result<Self, BindingError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let mut pool_opts = SqlitePoolOptions::new().max_connections(5);
        if database_url.contains(":memory:") {
            // An in-memory database lives and dies with its one connection.
            pool_opts = pool_opts
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = pool_opts.connect_with(connect_opts).await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        info!(database_url = %database_url, "clinic storage ready");
        Ok(storage)
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), BindingError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Database clock, used by the DB health probe.
    pub async fn now(&self) -> Result<String, BindingError> {
        let rec: (String,) = sqlx::query_as("SELECT datetime('now')")
            .fetch_one(&self.pool)
            .await?;
        Ok(rec.0)
    }

    pub async fn create_user(&self, user: NewUser) -> Result<User, BindingError> {
        let id = Uuid::new_v4().to_string();
        sqlx::query("INSERT INTO users (id, username, password) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(&user.username)
            .bind(&user.password)
            .execute(&self.pool)
            .await
            .map_err(|e| conflict_or(e, format!("username `{}` already taken", user.username)))?;

        Ok(User {
            id,
            username: user.username,
            password: user.password,
        })
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<User>, BindingError> {
        let user = sqlx::query_as::<_, User>("SELECT id, username, password FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, BindingError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Insert a validated lead. A reused `lead_id` is a conflict, never an overwrite.
    pub async fn insert_lead(&self, lead: NewLead) -> Result<Lead, BindingError> {
        let now = timestamp();
        let created_at = lead.created_at.unwrap_or_else(|| now.clone());
        let updated_at = lead.updated_at.unwrap_or(now);
        let lead_id = lead.lead_id.clone();

        sqlx::query(&format!(
            "INSERT INTO leads ({LEAD_COLUMNS}) VALUES \
             (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(lead.lead_id)
        .bind(lead.first_name)
        .bind(lead.last_name)
        .bind(lead.email)
        .bind(lead.phone)
        .bind(lead.age)
        .bind(lead.source)
        .bind(lead.campaign)
        .bind(lead.utm_source)
        .bind(lead.utm_medium)
        .bind(lead.utm_campaign)
        .bind(lead.inquiry_type)
        .bind(lead.priority)
        .bind(lead.status)
        .bind(lead.assigned_to)
        .bind(lead.clinic_id)
        .bind(lead.notes)
        .bind(lead.last_contact_date)
        .bind(lead.next_follow_up_date)
        .bind(lead.converted_date)
        .bind(created_at)
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_or(e, format!("lead `{lead_id}` already exists")))?;

        self.get_lead(&lead_id)
            .await?
            .ok_or_else(|| BindingError::NotFound(format!("lead `{lead_id}`")))
    }

    pub async fn get_lead(&self, lead_id: &str) -> Result<Option<Lead>, BindingError> {
        let lead = sqlx::query_as::<_, Lead>(&format!(
            "SELECT {LEAD_COLUMNS} FROM leads WHERE lead_id = ?"
        ))
        .bind(lead_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(lead)
    }

    /// All leads, newest first.
    pub async fn list_leads(&self) -> Result<Vec<Lead>, BindingError> {
        let leads = sqlx::query_as::<_, Lead>(&format!(
            "SELECT {LEAD_COLUMNS} FROM leads ORDER BY created_at DESC, lead_id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(leads)
    }

    /// Apply a partial update. Returns `None` when no such lead exists.
    pub async fn update_lead(
        &self,
        lead_id: &str,
        patch: LeadPatch,
    ) -> Result<Option<Lead>, BindingError> {
        let result = sqlx::query(
            r#"UPDATE leads SET
                first_name = COALESCE(?, first_name),
                last_name = COALESCE(?, last_name),
                email = COALESCE(?, email),
                phone = COALESCE(?, phone),
                age = COALESCE(?, age),
                source = COALESCE(?, source),
                campaign = COALESCE(?, campaign),
                utm_source = COALESCE(?, utm_source),
                utm_medium = COALESCE(?, utm_medium),
                utm_campaign = COALESCE(?, utm_campaign),
                inquiry_type = COALESCE(?, inquiry_type),
                priority = COALESCE(?, priority),
                status = COALESCE(?, status),
                assigned_to = COALESCE(?, assigned_to),
                clinic_id = COALESCE(?, clinic_id),
                notes = COALESCE(?, notes),
                last_contact_date = COALESCE(?, last_contact_date),
                next_follow_up_date = COALESCE(?, next_follow_up_date),
                converted_date = COALESCE(?, converted_date),
                updated_at = ?
              WHERE lead_id = ?"#,
        )
        .bind(patch.first_name)
        .bind(patch.last_name)
        .bind(patch.email)
        .bind(patch.phone)
        .bind(patch.age)
        .bind(patch.source)
        .bind(patch.campaign)
        .bind(patch.utm_source)
        .bind(patch.utm_medium)
        .bind(patch.utm_campaign)
        .bind(patch.inquiry_type)
        .bind(patch.priority)
        .bind(patch.status)
        .bind(patch.assigned_to)
        .bind(patch.clinic_id)
        .bind(patch.notes)
        .bind(patch.last_contact_date)
        .bind(patch.next_follow_up_date)
        .bind(patch.converted_date)
        .bind(timestamp())
        .bind(lead_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_lead(lead_id).await
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn conflict_or(err: sqlx::Error, message: String) -> BindingError {
    match err.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => BindingError::Conflict(message),
        _ => BindingError::DatabaseError(err),
    }
}
