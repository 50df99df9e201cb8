//! Schema provisioning for the migration target store.
//!
//! The DDL is idempotent (`CREATE TABLE IF NOT EXISTS`) and runs once at
//! startup. Legacy id columns carry no uniqueness constraint: the legacy
//! API is the source of truth, and a re-run inserts fresh rows.
use crate::errors::RepositoryError;

const TABLES: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS stored_file (
        id UUID PRIMARY KEY,
        filename TEXT NOT NULL,
        data BYTEA NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE TABLE IF NOT EXISTS employee (
        id SERIAL PRIMARY KEY,
        legacy_id INTEGER,
        email TEXT NOT NULL,
        name TEXT NOT NULL,
        surname TEXT NOT NULL,
        birth_date TEXT NOT NULL,
        gender TEXT NOT NULL,
        work TEXT NOT NULL,
        image_id UUID REFERENCES stored_file (id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE TABLE IF NOT EXISTS customer (
        id SERIAL PRIMARY KEY,
        legacy_id INTEGER,
        email TEXT NOT NULL,
        name TEXT NOT NULL,
        surname TEXT NOT NULL,
        birth_date TEXT NOT NULL,
        gender TEXT NOT NULL,
        description TEXT NOT NULL,
        astrological_sign TEXT NOT NULL,
        phone_number TEXT NOT NULL,
        address TEXT NOT NULL,
        image_id UUID REFERENCES stored_file (id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        employee_id INTEGER REFERENCES employee (id)
    )",
    "CREATE TABLE IF NOT EXISTS clothe (
        id SERIAL PRIMARY KEY,
        legacy_id INTEGER,
        kind TEXT NOT NULL,
        image_id UUID REFERENCES stored_file (id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        customer_id INTEGER NOT NULL REFERENCES customer (id)
    )",
    "CREATE TABLE IF NOT EXISTS payment (
        id SERIAL PRIMARY KEY,
        legacy_id INTEGER,
        date TEXT NOT NULL,
        payment_method TEXT NOT NULL,
        amount DOUBLE PRECISION NOT NULL,
        comment TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        customer_id INTEGER NOT NULL REFERENCES customer (id)
    )",
    "CREATE TABLE IF NOT EXISTS encounter (
        id SERIAL PRIMARY KEY,
        date TEXT NOT NULL,
        rating INTEGER NOT NULL,
        comment TEXT NOT NULL,
        source TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        customer_id INTEGER NOT NULL REFERENCES customer (id)
    )",
    "CREATE TABLE IF NOT EXISTS event (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        date TEXT NOT NULL,
        max_participants INTEGER NOT NULL,
        location_x TEXT NOT NULL,
        location_y TEXT NOT NULL,
        kind TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        employee_id INTEGER NOT NULL REFERENCES employee (id)
    )",
    "CREATE TABLE IF NOT EXISTS tip (
        id SERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        tip TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
];

/// Create every table the migration writes, if it does not exist yet.
pub async fn ensure_schema(pool: &sqlx::PgPool) -> Result<(), RepositoryError> {
    for ddl in TABLES {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}
