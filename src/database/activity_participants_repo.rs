use sqlx::{SqliteConnection, SqlitePool};

use crate::models::ActivityParticipantsRow;

const SQL_LIST_PARTICIPANTS: &str = r#"
SELECT
  id,
  activity_name,
  email
FROM activity_participants
ORDER BY id ASC
"#;

pub async fn list_participants(pool: &SqlitePool) -> sqlx::Result<Vec<ActivityParticipantsRow>> {
    sqlx::query_as::<_, ActivityParticipantsRow>(SQL_LIST_PARTICIPANTS)
        .fetch_all(pool)
        .await
}

const SQL_IS_PARTICIPANT: &str = r#"
SELECT 1
FROM activity_participants
WHERE activity_name = ?
  AND email = ?
"#;

pub async fn is_participant(
    conn: &mut SqliteConnection,
    activity_name: &str,
    email: &str,
) -> sqlx::Result<bool> {
    let row: Option<(i64,)> = sqlx::query_as(SQL_IS_PARTICIPANT)
        .bind(activity_name)
        .bind(email)
        .fetch_optional(conn)
        .await?;
    Ok(row.is_some())
}

const SQL_INSERT_PARTICIPANT: &str = r#"
INSERT INTO activity_participants (
  activity_name,
  email
) VALUES (?, ?)
"#;

pub async fn insert_participant(
    conn: &mut SqliteConnection,
    activity_name: &str,
    email: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_PARTICIPANT)
        .bind(activity_name)
        .bind(email)
        .execute(conn)
        .await?;
    Ok(res.rows_affected())
}

const SQL_DELETE_PARTICIPANT: &str = r#"
DELETE FROM activity_participants
WHERE activity_name = ?
  AND email = ?
"#;

pub async fn delete_participant(
    conn: &mut SqliteConnection,
    activity_name: &str,
    email: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE_PARTICIPANT)
        .bind(activity_name)
        .bind(email)
        .execute(conn)
        .await?;
    Ok(res.rows_affected())
}
