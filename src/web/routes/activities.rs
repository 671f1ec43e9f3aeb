use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::services::activities_service::{self, ActivityListing, RegistryError};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParticipantQuery {
    pub email: Option<String>,
}

impl ParticipantQuery {
    // Read as raw pairs so a repeated key is not a decode error; the last `email` wins.
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let email = pairs
            .into_iter()
            .filter(|(key, _)| key == "email")
            .map(|(_, value)| value)
            .last();
        Self { email }
    }

    fn extract(
        query: Result<Query<Vec<(String, String)>>, QueryRejection>,
    ) -> Result<Self, RegistryError> {
        match query {
            Ok(Query(pairs)) => Ok(Self::from_pairs(pairs)),
            Err(rejection) => {
                debug!(error = %rejection, "query string rejected");
                Err(RegistryError::InvalidQuery)
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub async fn list_activities_handler(
    State(pool): State<SqlitePool>,
) -> Result<Json<ActivityListing>, RegistryError> {
    activities_service::list_activities(&pool).await.map(Json)
}

pub async fn signup_handler(
    Path(activity_name): Path<String>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
    State(pool): State<SqlitePool>,
) -> Result<Json<MessageResponse>, RegistryError> {
    let email = ParticipantQuery::extract(query)?.email.unwrap_or_default();
    let message = activities_service::signup(&pool, &activity_name, &email).await?;
    Ok(Json(MessageResponse { message }))
}

pub async fn unregister_handler(
    Path(activity_name): Path<String>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
    State(pool): State<SqlitePool>,
) -> Result<Json<MessageResponse>, RegistryError> {
    let email = ParticipantQuery::extract(query)?.email.unwrap_or_default();
    let message = activities_service::unregister(&pool, &activity_name, &email).await?;
    Ok(Json(MessageResponse { message }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn last_email_wins() {
        let query = ParticipantQuery::from_pairs(pairs(&[
            ("email", "a@mergington.edu"),
            ("other", "x"),
            ("email", "b@mergington.edu"),
        ]));
        assert_eq!(query.email.as_deref(), Some("b@mergington.edu"));
    }

    #[test]
    fn missing_email_is_none() {
        let query = ParticipantQuery::from_pairs(pairs(&[("name", "a")]));
        assert_eq!(query, ParticipantQuery::default());
    }
}
