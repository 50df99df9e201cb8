//! PostgreSQL-backed payment repository.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use legacy_migration_shared::types::{NewPayment, Payment};

use crate::errors::RepositoryError;
use crate::interfaces::PaymentRepository;

#[derive(sqlx::FromRow)]
struct PaymentRow {
    id: i32,
    legacy_id: Option<i32>,
    date: String,
    payment_method: String,
    amount: f64,
    comment: String,
    created_at: DateTime<Utc>,
    customer_id: i32,
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        Payment {
            id: row.id,
            legacy_id: row.legacy_id,
            date: row.date,
            payment_method: row.payment_method,
            amount: row.amount,
            comment: row.comment,
            created_at: row.created_at,
            customer_id: row.customer_id,
        }
    }
}

pub struct PostgresPaymentRepository {
    pool: sqlx::PgPool,
}

impl PostgresPaymentRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn find_all(&self) -> Result<Vec<Payment>, RepositoryError> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            "SELECT id, legacy_id, date, payment_method, amount, comment, created_at, \
                    customer_id \
             FROM payment ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Payment::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Payment>, RepositoryError> {
        let row = sqlx::query_as::<_, PaymentRow>(
            "SELECT id, legacy_id, date, payment_method, amount, comment, created_at, \
                    customer_id \
             FROM payment WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Payment::from))
    }

    async fn add(&self, payment: &NewPayment) -> Result<Payment, RepositoryError> {
        let row = sqlx::query_as::<_, PaymentRow>(
            "INSERT INTO payment (legacy_id, date, payment_method, amount, comment, customer_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, legacy_id, date, payment_method, amount, comment, created_at, \
                       customer_id",
        )
        .bind(payment.legacy_id)
        .bind(&payment.date)
        .bind(&payment.payment_method)
        .bind(payment.amount)
        .bind(&payment.comment)
        .bind(payment.customer_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }
}
