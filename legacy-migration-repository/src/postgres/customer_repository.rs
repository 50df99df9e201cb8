//! PostgreSQL-backed customer repository.
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use legacy_migration_shared::types::{Customer, FileId, NewCustomer};

use crate::errors::RepositoryError;
use crate::interfaces::{CustomerRepository, FileStore};

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: i32,
    legacy_id: Option<i32>,
    email: String,
    name: String,
    surname: String,
    birth_date: String,
    gender: String,
    description: String,
    astrological_sign: String,
    phone_number: String,
    address: String,
    image_id: Option<FileId>,
    created_at: DateTime<Utc>,
    employee_id: Option<i32>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            legacy_id: row.legacy_id,
            email: row.email,
            name: row.name,
            surname: row.surname,
            birth_date: row.birth_date,
            gender: row.gender,
            description: row.description,
            astrological_sign: row.astrological_sign,
            phone_number: row.phone_number,
            address: row.address,
            image_id: row.image_id,
            created_at: row.created_at,
            employee_id: row.employee_id,
        }
    }
}

pub struct PostgresCustomerRepository {
    pool: sqlx::PgPool,
    files: Arc<dyn FileStore>,
}

impl PostgresCustomerRepository {
    pub fn new(pool: sqlx::PgPool, files: Arc<dyn FileStore>) -> Self {
        Self { pool, files }
    }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn find_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, legacy_id, email, name, surname, birth_date, gender, description, \
                    astrological_sign, phone_number, address, image_id, created_at, employee_id \
             FROM customer ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, legacy_id, email, name, surname, birth_date, gender, description, \
                    astrological_sign, phone_number, address, image_id, created_at, employee_id \
             FROM customer WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Customer::from))
    }

    async fn find_by_legacy_id(
        &self,
        legacy_id: i32,
    ) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, legacy_id, email, name, surname, birth_date, gender, description, \
                    astrological_sign, phone_number, address, image_id, created_at, employee_id \
             FROM customer WHERE legacy_id = $1",
        )
        .bind(legacy_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Customer::from))
    }

    async fn add(&self, customer: &NewCustomer) -> Result<Customer, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            "INSERT INTO customer (legacy_id, email, name, surname, birth_date, gender, \
                                   description, astrological_sign, phone_number, address, \
                                   employee_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING id, legacy_id, email, name, surname, birth_date, gender, description, \
                       astrological_sign, phone_number, address, image_id, created_at, \
                       employee_id",
        )
        .bind(customer.legacy_id)
        .bind(&customer.email)
        .bind(&customer.name)
        .bind(&customer.surname)
        .bind(&customer.birth_date)
        .bind(&customer.gender)
        .bind(&customer.description)
        .bind(&customer.astrological_sign)
        .bind(&customer.phone_number)
        .bind(&customer.address)
        .bind(customer.employee_id)
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
        super::attach_image(&self.pool, &self.files, "customer", id, data, filename).await
    }
}
