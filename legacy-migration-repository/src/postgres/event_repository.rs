//! PostgreSQL-backed event repository.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use legacy_migration_shared::types::{Event, NewEvent};

use crate::errors::RepositoryError;
use crate::interfaces::EventRepository;

#[derive(sqlx::FromRow)]
struct EventRow {
    id: i32,
    name: String,
    date: String,
    max_participants: i32,
    location_x: String,
    location_y: String,
    kind: String,
    created_at: DateTime<Utc>,
    employee_id: i32,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: row.id,
            name: row.name,
            date: row.date,
            max_participants: row.max_participants,
            location_x: row.location_x,
            location_y: row.location_y,
            kind: row.kind,
            created_at: row.created_at,
            employee_id: row.employee_id,
        }
    }
}

pub struct PostgresEventRepository {
    pool: sqlx::PgPool,
}

impl PostgresEventRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepository {
    async fn find_all(&self) -> Result<Vec<Event>, RepositoryError> {
        let rows = sqlx::query_as::<_, EventRow>(
            "SELECT id, name, date, max_participants, location_x, location_y, kind, \
                    created_at, employee_id \
             FROM event ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Event>, RepositoryError> {
        let row = sqlx::query_as::<_, EventRow>(
            "SELECT id, name, date, max_participants, location_x, location_y, kind, \
                    created_at, employee_id \
             FROM event WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Event::from))
    }

    async fn add(&self, event: &NewEvent) -> Result<Event, RepositoryError> {
        let row = sqlx::query_as::<_, EventRow>(
            "INSERT INTO event (name, date, max_participants, location_x, location_y, kind, \
                                employee_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id, name, date, max_participants, location_x, location_y, kind, \
                       created_at, employee_id",
        )
        .bind(&event.name)
        .bind(&event.date)
        .bind(event.max_participants)
        .bind(&event.location_x)
        .bind(&event.location_y)
        .bind(&event.kind)
        .bind(event.employee_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }
}
