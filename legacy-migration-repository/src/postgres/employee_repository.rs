//! PostgreSQL-backed employee repository.
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use legacy_migration_shared::types::{Employee, FileId, NewEmployee};

use crate::errors::RepositoryError;
use crate::interfaces::{EmployeeRepository, FileStore};

#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id: i32,
    legacy_id: Option<i32>,
    email: String,
    name: String,
    surname: String,
    birth_date: String,
    gender: String,
    work: String,
    image_id: Option<FileId>,
    created_at: DateTime<Utc>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id: row.id,
            legacy_id: row.legacy_id,
            email: row.email,
            name: row.name,
            surname: row.surname,
            birth_date: row.birth_date,
            gender: row.gender,
            work: row.work,
            image_id: row.image_id,
            created_at: row.created_at,
        }
    }
}

pub struct PostgresEmployeeRepository {
    pool: sqlx::PgPool,
    files: Arc<dyn FileStore>,
}

impl PostgresEmployeeRepository {
    pub fn new(pool: sqlx::PgPool, files: Arc<dyn FileStore>) -> Self {
        Self { pool, files }
    }
}

#[async_trait]
impl EmployeeRepository for PostgresEmployeeRepository {
    async fn find_all(&self) -> Result<Vec<Employee>, RepositoryError> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, legacy_id, email, name, surname, birth_date, gender, work, \
                    image_id, created_at \
             FROM employee ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, RepositoryError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, legacy_id, email, name, surname, birth_date, gender, work, \
                    image_id, created_at \
             FROM employee WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Employee::from))
    }

    async fn find_by_legacy_id(
        &self,
        legacy_id: i32,
    ) -> Result<Option<Employee>, RepositoryError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, legacy_id, email, name, surname, birth_date, gender, work, \
                    image_id, created_at \
             FROM employee WHERE legacy_id = $1",
        )
        .bind(legacy_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Employee::from))
    }

    async fn add(&self, employee: &NewEmployee) -> Result<Employee, RepositoryError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            "INSERT INTO employee (legacy_id, email, name, surname, birth_date, gender, work) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id, legacy_id, email, name, surname, birth_date, gender, work, \
                       image_id, created_at",
        )
        .bind(employee.legacy_id)
        .bind(&employee.email)
        .bind(&employee.name)
        .bind(&employee.surname)
        .bind(&employee.birth_date)
        .bind(&employee.gender)
        .bind(&employee.work)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn attach_image(
        &self,
        id: i32,
        data: Vec<u8>,
        filename: &str,
    ) -> Result<FileId, RepositoryError> {
        super::attach_image(&self.pool, &self.files, "employee", id, data, filename).await
    }
}
