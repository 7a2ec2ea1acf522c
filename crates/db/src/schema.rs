use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create schedule_slots table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedule_slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            time_start TIMESTAMP NOT NULL,
            is_visible BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT unique_slot_time_start UNIQUE (time_start)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create reservations table; each row keeps its own copy of the slot start
    // so a rejected request survives its slot being absorbed or closed
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reservations (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            first_name VARCHAR(255) NOT NULL,
            last_name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL,
            phone_number VARCHAR(64) NOT NULL,
            status VARCHAR(16) NOT NULL,
            schedule_slot_id UUID NOT NULL,
            slot_time_start TIMESTAMP NOT NULL,
            duration_in_minutes INTEGER NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_status CHECK (status IN ('PENDING', 'ACCEPTED', 'REJECTED')),
            CONSTRAINT positive_duration CHECK (duration_in_minutes IS NULL OR duration_in_minutes > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_reservations_schedule_slot_id ON reservations(schedule_slot_id)",
        "CREATE INDEX IF NOT EXISTS idx_reservations_status ON reservations(status)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
