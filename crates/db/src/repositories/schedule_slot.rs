use crate::models::DbScheduleSlot;
use chrono::NaiveDateTime;
use eyre::Result;
use reservation_core::models::schedule_slot::SlotRange;
use sqlx::PgConnection;
use uuid::Uuid;

pub async fn exists_by_time_start(conn: &mut PgConnection, time_start: NaiveDateTime) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM schedule_slots WHERE time_start = $1
        )
        "#,
    )
    .bind(time_start)
    .fetch_one(conn)
    .await?;

    Ok(exists)
}

pub async fn create_schedule_slot(
    conn: &mut PgConnection,
    time_start: NaiveDateTime,
) -> Result<DbScheduleSlot> {
    let id = Uuid::new_v4();

    tracing::debug!("Creating schedule slot: id={}, time_start={}", id, time_start);

    let slot = sqlx::query_as::<_, DbScheduleSlot>(
        r#"
        INSERT INTO schedule_slots (id, time_start, is_visible)
        VALUES ($1, $2, TRUE)
        RETURNING id, time_start, is_visible
        "#,
    )
    .bind(id)
    .bind(time_start)
    .fetch_one(conn)
    .await?;

    Ok(slot)
}

pub async fn get_schedule_slots(conn: &mut PgConnection) -> Result<Vec<DbScheduleSlot>> {
    let slots = sqlx::query_as::<_, DbScheduleSlot>(
        r#"
        SELECT id, time_start, is_visible
        FROM schedule_slots
        ORDER BY time_start ASC
        "#,
    )
    .fetch_all(conn)
    .await?;

    Ok(slots)
}

pub async fn get_schedule_slot_by_id(
    conn: &mut PgConnection,
    id: Uuid,
) -> Result<Option<DbScheduleSlot>> {
    let slot = sqlx::query_as::<_, DbScheduleSlot>(
        r#"
        SELECT id, time_start, is_visible
        FROM schedule_slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(slot)
}

pub async fn get_schedule_slot_by_time_start(
    conn: &mut PgConnection,
    time_start: NaiveDateTime,
) -> Result<Option<DbScheduleSlot>> {
    let slot = sqlx::query_as::<_, DbScheduleSlot>(
        r#"
        SELECT id, time_start, is_visible
        FROM schedule_slots
        WHERE time_start = $1
        "#,
    )
    .bind(time_start)
    .fetch_optional(conn)
    .await?;

    Ok(slot)
}

pub async fn delete_schedule_slot(conn: &mut PgConnection, id: Uuid) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM schedule_slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(conn)
    .await?;

    Ok(())
}

pub async fn get_schedule_slots_in_range(
    conn: &mut PgConnection,
    range: SlotRange,
) -> Result<Vec<DbScheduleSlot>> {
    let sql = match range {
        SlotRange::Exclusive { .. } => {
            r#"
            SELECT id, time_start, is_visible
            FROM schedule_slots
            WHERE time_start > $1 AND time_start < $2
            ORDER BY time_start ASC
            "#
        }
        SlotRange::Inclusive { .. } => {
            r#"
            SELECT id, time_start, is_visible
            FROM schedule_slots
            WHERE time_start >= $1 AND time_start <= $2
            ORDER BY time_start ASC
            "#
        }
    };
    let (start, end) = range.bounds();

    let slots = sqlx::query_as::<_, DbScheduleSlot>(sql)
        .bind(start)
        .bind(end)
        .fetch_all(conn)
        .await?;

    Ok(slots)
}

pub async fn delete_schedule_slots_in_range(conn: &mut PgConnection, range: SlotRange) -> Result<u64> {
    let sql = match range {
        SlotRange::Exclusive { .. } => {
            "DELETE FROM schedule_slots WHERE time_start > $1 AND time_start < $2"
        }
        SlotRange::Inclusive { .. } => {
            "DELETE FROM schedule_slots WHERE time_start >= $1 AND time_start <= $2"
        }
    };
    let (start, end) = range.bounds();

    let result = sqlx::query(sql).bind(start).bind(end).execute(conn).await?;

    Ok(result.rows_affected())
}

pub async fn set_schedule_slot_visibility(
    conn: &mut PgConnection,
    id: Uuid,
    is_visible: bool,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE schedule_slots
        SET is_visible = $2
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(is_visible)
    .execute(conn)
    .await?;

    Ok(())
}
