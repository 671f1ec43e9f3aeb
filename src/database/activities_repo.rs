use sqlx::{SqliteConnection, SqlitePool};

use crate::models::ActivitiesRow;

const SQL_LIST_ACTIVITIES: &str = r#"
SELECT
  name,
  description,
  schedule,
  max_participants,
  position
FROM activities
ORDER BY position ASC
"#;

pub async fn list_activities(pool: &SqlitePool) -> sqlx::Result<Vec<ActivitiesRow>> {
    sqlx::query_as::<_, ActivitiesRow>(SQL_LIST_ACTIVITIES)
        .fetch_all(pool)
        .await
}

const SQL_ACTIVITY_EXISTS: &str = r#"
SELECT 1
FROM activities
WHERE name = ?
"#;

pub async fn activity_exists(conn: &mut SqliteConnection, name: &str) -> sqlx::Result<bool> {
    let row: Option<(i64,)> = sqlx::query_as(SQL_ACTIVITY_EXISTS)
        .bind(name)
        .fetch_optional(conn)
        .await?;
    Ok(row.is_some())
}
