use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;

const SQL_CREATE_ACTIVITIES: &str = r#"
CREATE TABLE IF NOT EXISTS activities (
  name TEXT PRIMARY KEY NOT NULL,
  description TEXT NOT NULL,
  schedule TEXT NOT NULL,
  max_participants INTEGER NOT NULL CHECK (max_participants > 0),
  position INTEGER NOT NULL
)
"#;

const SQL_CREATE_ACTIVITY_PARTICIPANTS: &str = r#"
CREATE TABLE IF NOT EXISTS activity_participants (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  activity_name TEXT NOT NULL REFERENCES activities(name),
  email TEXT NOT NULL,
  UNIQUE (activity_name, email)
)
"#;

const SQL_INSERT_SEED_ACTIVITY: &str = r#"
INSERT OR IGNORE INTO activities (
  name,
  description,
  schedule,
  max_participants,
  position
) VALUES (?, ?, ?, ?, ?)
"#;

const SQL_INSERT_SEED_PARTICIPANT: &str = r#"
INSERT OR IGNORE INTO activity_participants (activity_name, email)
VALUES (?, ?)
"#;

pub struct SeedActivity {
    pub name: &'static str,
    pub description: &'static str,
    pub schedule: &'static str,
    pub max_participants: i64,
    pub participants: &'static [&'static str],
}

/// Activities offered at process start. The set is fixed; only participants change.
pub const SEED_ACTIVITIES: &[SeedActivity] = &[
    SeedActivity {
        name: "Chess Club",
        description: "Learn strategies and compete in chess tournaments",
        schedule: "Fridays, 3:30 PM - 5:00 PM",
        max_participants: 12,
        participants: &["michael@mergington.edu", "daniel@mergington.edu"],
    },
    SeedActivity {
        name: "Programming Class",
        description: "Learn programming fundamentals and build software projects",
        schedule: "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
        max_participants: 20,
        participants: &["emma@mergington.edu", "sophia@mergington.edu"],
    },
    SeedActivity {
        name: "Gym Class",
        description: "Physical education and sports activities",
        schedule: "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
        max_participants: 30,
        participants: &["john@mergington.edu", "olivia@mergington.edu"],
    },
    SeedActivity {
        name: "Basketball Team",
        description: "Join the school basketball team and compete in league games",
        schedule: "Tuesdays and Thursdays, 4:00 PM - 6:00 PM",
        max_participants: 15,
        participants: &["james@mergington.edu", "liam@mergington.edu"],
    },
    SeedActivity {
        name: "Swimming Club",
        description: "Improve swimming technique and participate in swim meets",
        schedule: "Mondays and Wednesdays, 3:30 PM - 5:00 PM",
        max_participants: 18,
        participants: &["ava@mergington.edu", "noah@mergington.edu"],
    },
    SeedActivity {
        name: "Art Club",
        description: "Explore various art mediums including painting, drawing, and sculpture",
        schedule: "Thursdays, 3:30 PM - 5:00 PM",
        max_participants: 15,
        participants: &["mia@mergington.edu", "isabella@mergington.edu"],
    },
    SeedActivity {
        name: "Drama Club",
        description: "Develop acting skills and perform in school theater productions",
        schedule: "Wednesdays and Fridays, 3:30 PM - 5:30 PM",
        max_participants: 25,
        participants: &["ethan@mergington.edu", "charlotte@mergington.edu"],
    },
    SeedActivity {
        name: "Debate Team",
        description: "Develop critical thinking and public speaking through competitive debate",
        schedule: "Mondays, 3:30 PM - 5:00 PM",
        max_participants: 16,
        participants: &["william@mergington.edu", "amelia@mergington.edu"],
    },
    SeedActivity {
        name: "Science Olympiad",
        description: "Compete in science competitions and conduct research projects",
        schedule: "Tuesdays, 3:30 PM - 5:00 PM",
        max_participants: 20,
        participants: &["benjamin@mergington.edu", "harper@mergington.edu"],
    },
];

/// Connects, creates the schema and seeds the activity table.
///
/// In-memory databases live per connection, so the pool holds exactly one
/// connection that never idles out or expires.
pub async fn open_registry(database_url: &str) -> sqlx::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    create_schema(&pool).await?;
    let seeded = seed_activities(&pool).await?;
    info!(seeded, total = SEED_ACTIVITIES.len(), "activity registry ready");
    Ok(pool)
}

pub async fn create_schema(pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::query(SQL_CREATE_ACTIVITIES).execute(pool).await?;
    sqlx::query(SQL_CREATE_ACTIVITY_PARTICIPANTS)
        .execute(pool)
        .await?;
    Ok(())
}

/// Inserts missing seed activities and returns how many were new.
///
/// Seed participants only go into activities created by this call, so an
/// existing file-backed registry keeps its current rosters.
pub async fn seed_activities(pool: &SqlitePool) -> sqlx::Result<usize> {
    let mut tx = pool.begin().await?;
    let mut inserted = 0;
    for (position, seed) in SEED_ACTIVITIES.iter().enumerate() {
        if insert_seed_activity(&mut tx, seed, position as i64).await? {
            inserted += 1;
        }
    }
    tx.commit().await?;
    Ok(inserted)
}

async fn insert_seed_activity(
    conn: &mut SqliteConnection,
    seed: &SeedActivity,
    position: i64,
) -> sqlx::Result<bool> {
    let res = sqlx::query(SQL_INSERT_SEED_ACTIVITY)
        .bind(seed.name)
        .bind(seed.description)
        .bind(seed.schedule)
        .bind(seed.max_participants)
        .bind(position)
        .execute(&mut *conn)
        .await?;
    if res.rows_affected() == 0 {
        return Ok(false);
    }

    for email in seed.participants {
        sqlx::query(SQL_INSERT_SEED_PARTICIPANT)
            .bind(seed.name)
            .bind(*email)
            .execute(&mut *conn)
            .await?;
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_table_is_well_formed() {
        assert_eq!(SEED_ACTIVITIES.len(), 9);
        for seed in SEED_ACTIVITIES {
            assert!(seed.max_participants > 0, "{} has no capacity", seed.name);
            assert_eq!(seed.participants.len(), 2);
        }
        let mut names: Vec<_> = SEED_ACTIVITIES.iter().map(|s| s.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), SEED_ACTIVITIES.len());
    }

    #[tokio::test]
    async fn seeding_twice_does_not_duplicate() {
        let pool = open_registry("sqlite::memory:").await.unwrap();
        assert_eq!(seed_activities(&pool).await.unwrap(), 0);

        let (activities,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM activities")
            .fetch_one(&pool)
            .await
            .unwrap();
        let (participants,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM activity_participants")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(activities, 9);
        assert_eq!(participants, 18);
    }
}
