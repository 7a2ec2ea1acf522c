use crate::models::DbReservation;
use eyre::Result;
use reservation_core::models::reservation::{NewReservation, Reservation, ReservationStatus};
use sqlx::PgConnection;
use uuid::Uuid;

const SELECT_RESERVATION: &str = r#"
    SELECT r.id, r.first_name, r.last_name, r.email, r.phone_number, r.status,
           r.duration_in_minutes,
           r.schedule_slot_id AS slot_id, r.slot_time_start,
           COALESCE(s.is_visible, FALSE) AS slot_is_visible
    FROM reservations r
    LEFT JOIN schedule_slots s ON s.id = r.schedule_slot_id
"#;

pub async fn create_reservation(
    conn: &mut PgConnection,
    reservation: NewReservation,
) -> Result<Reservation> {
    let id = Uuid::new_v4();
    let created = Reservation {
        id,
        first_name: reservation.first_name,
        last_name: reservation.last_name,
        email: reservation.email,
        phone_number: reservation.phone_number,
        status: ReservationStatus::Pending,
        schedule_slot: reservation.schedule_slot,
        duration_in_minutes: None,
    };

    tracing::debug!(
        "Creating reservation: id={}, slot_id={}",
        id,
        created.schedule_slot.id
    );

    sqlx::query(
        r#"
        INSERT INTO reservations
            (id, first_name, last_name, email, phone_number, status,
             schedule_slot_id, slot_time_start, duration_in_minutes)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(created.id)
    .bind(&created.first_name)
    .bind(&created.last_name)
    .bind(&created.email)
    .bind(&created.phone_number)
    .bind(created.status.as_str())
    .bind(created.schedule_slot.id)
    .bind(created.schedule_slot.time_start)
    .bind(created.duration_in_minutes)
    .execute(conn)
    .await?;

    Ok(created)
}

pub async fn update_reservation(
    conn: &mut PgConnection,
    reservation: Reservation,
) -> Result<Reservation> {
    let result = sqlx::query(
        r#"
        UPDATE reservations
        SET status = $2, duration_in_minutes = $3
        WHERE id = $1
        "#,
    )
    .bind(reservation.id)
    .bind(reservation.status.as_str())
    .bind(reservation.duration_in_minutes)
    .execute(conn)
    .await?;

    if result.rows_affected() == 0 {
        eyre::bail!("reservation {} vanished during update", reservation.id);
    }

    Ok(reservation)
}

pub async fn get_reservation_by_id(
    conn: &mut PgConnection,
    id: Uuid,
) -> Result<Option<Reservation>> {
    let sql = format!("{SELECT_RESERVATION} WHERE r.id = $1");
    let row = sqlx::query_as::<_, DbReservation>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;

    row.map(Reservation::try_from).transpose()
}

pub async fn get_reservations(conn: &mut PgConnection) -> Result<Vec<Reservation>> {
    let sql = format!("{SELECT_RESERVATION} ORDER BY r.slot_time_start ASC, r.id ASC");
    let rows = sqlx::query_as::<_, DbReservation>(&sql)
        .fetch_all(conn)
        .await?;

    rows.into_iter().map(Reservation::try_from).collect()
}

pub async fn get_reservations_by_slot_id(
    conn: &mut PgConnection,
    slot_id: Uuid,
) -> Result<Vec<Reservation>> {
    let sql = format!("{SELECT_RESERVATION} WHERE r.schedule_slot_id = $1 ORDER BY r.id ASC");
    let rows = sqlx::query_as::<_, DbReservation>(&sql)
        .bind(slot_id)
        .fetch_all(conn)
        .await?;

    rows.into_iter().map(Reservation::try_from).collect()
}
