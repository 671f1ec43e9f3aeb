use indexmap::IndexMap;
use serde::Serialize;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;

use crate::database::{activities_repo, activity_participants_repo};
use crate::models::{ActivitiesRow, ActivityParticipantsRow};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Activity not found")]
    ActivityNotFound,
    #[error("Student is already signed up")]
    AlreadyRegistered,
    #[error("Student is not signed up for this activity")]
    NotRegistered,
    #[error("email query parameter is required")]
    InvalidEmail,
    #[error("query string could not be parsed")]
    InvalidQuery,
    #[error("registry storage error: {0}")]
    Database(#[from] sqlx::Error),
}

/// One activity as exposed by the API. The name is the key of the listing map.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityView {
    #[serde(skip)]
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: i64,
    pub participants: Vec<String>,
}

pub type ActivityListing = IndexMap<String, ActivityView>;

pub async fn list_activities(pool: &SqlitePool) -> Result<ActivityListing, RegistryError> {
    let rows = activities_repo::list_activities(pool).await?;
    let participants = activity_participants_repo::list_participants(pool).await?;
    Ok(build_listing(rows, participants))
}

fn build_listing(
    rows: Vec<ActivitiesRow>,
    participants: Vec<ActivityParticipantsRow>,
) -> ActivityListing {
    let mut listing: ActivityListing = rows
        .into_iter()
        .map(|row| {
            let view = ActivityView {
                name: row.name.clone(),
                description: row.description,
                schedule: row.schedule,
                max_participants: row.max_participants,
                participants: Vec::new(),
            };
            (row.name, view)
        })
        .collect();

    for p in participants {
        if let Some(view) = listing.get_mut(&p.activity_name) {
            view.participants.push(p.email);
        }
    }
    listing
}

/// Adds `email` to the activity's roster and returns the confirmation message.
///
/// Capacity is informational; a full activity still accepts signups.
pub async fn signup(
    pool: &SqlitePool,
    activity_name: &str,
    email: &str,
) -> Result<String, RegistryError> {
    let email = require_email(email)?;

    let mut tx = pool.begin().await?;
    if !activities_repo::activity_exists(&mut tx, activity_name).await? {
        return Err(RegistryError::ActivityNotFound);
    }
    if activity_participants_repo::is_participant(&mut tx, activity_name, email).await? {
        return Err(RegistryError::AlreadyRegistered);
    }
    activity_participants_repo::insert_participant(&mut tx, activity_name, email)
        .await
        .map_err(insert_error)?;
    tx.commit().await?;

    info!(activity = %activity_name, email = %email, "participant signed up");
    Ok(format!("Signed up {} for {}", email, activity_name))
}

/// Removes `email` from the activity's roster and returns the confirmation message.
pub async fn unregister(
    pool: &SqlitePool,
    activity_name: &str,
    email: &str,
) -> Result<String, RegistryError> {
    let email = require_email(email)?;

    let mut tx = pool.begin().await?;
    if !activities_repo::activity_exists(&mut tx, activity_name).await? {
        return Err(RegistryError::ActivityNotFound);
    }
    let removed =
        activity_participants_repo::delete_participant(&mut tx, activity_name, email).await?;
    if removed == 0 {
        return Err(RegistryError::NotRegistered);
    }
    tx.commit().await?;

    info!(activity = %activity_name, email = %email, "participant unregistered");
    Ok(format!("Unregistered {} from {}", email, activity_name))
}

// The UNIQUE(activity_name, email) constraint backs up the roster check.
fn insert_error(err: sqlx::Error) -> RegistryError {
    match err {
        sqlx::Error::Database(e) if e.is_unique_violation() => RegistryError::AlreadyRegistered,
        other => RegistryError::Database(other),
    }
}

// Emails are matched verbatim; only an empty value is rejected.
fn require_email(email: &str) -> Result<&str, RegistryError> {
    if email.trim().is_empty() {
        return Err(RegistryError::InvalidEmail);
    }
    Ok(email)
}
