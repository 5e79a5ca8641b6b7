use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Statements are idempotent so a restart against an initialized database is
/// a no-op.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        name TEXT,
        role TEXT NOT NULL DEFAULT 'customer',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE TABLE IF NOT EXISTS menu_items (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        category TEXT NOT NULL,
        price NUMERIC(10,2) NOT NULL,
        recipe TEXT,
        image TEXT
    )",
    "CREATE TABLE IF NOT EXISTS reviews (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        details TEXT NOT NULL,
        rating DOUBLE PRECISION NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS cart_items (
        id UUID PRIMARY KEY,
        owner_email TEXT NOT NULL,
        menu_item_id UUID NOT NULL,
        name TEXT,
        price NUMERIC(10,2) NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS cart_items_owner_email_idx ON cart_items (owner_email)",
    "CREATE TABLE IF NOT EXISTS payments (
        id UUID PRIMARY KEY,
        payer_email TEXT NOT NULL,
        price NUMERIC(10,2) NOT NULL,
        cart_item_ids UUID[] NOT NULL,
        menu_item_ids UUID[] NOT NULL,
        transaction_id TEXT,
        status TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
];

pub async fn connect(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .context("failed to connect to Postgres")?;
    Ok(pool)
}

pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("failed to bootstrap schema")?;
    }
    Ok(())
}
