use async_trait::async_trait;
use chrono::NaiveDateTime;
use mockall::mock;
use reservation_core::{
    models::{
        reservation::{NewReservation, Reservation},
        schedule_slot::{ScheduleSlot, SlotRange},
    },
    store::{ReservationStore, SlotStore},
};
use uuid::Uuid;

// Mock of both storage ports, for driving the engine without a database
mock! {
    pub Store {}

    #[async_trait]
    impl SlotStore for Store {
        async fn slot_exists_at(&mut self, time_start: NaiveDateTime) -> eyre::Result<bool>;

        async fn insert_slot(&mut self, time_start: NaiveDateTime) -> eyre::Result<ScheduleSlot>;

        async fn list_slots(&mut self) -> eyre::Result<Vec<ScheduleSlot>>;

        async fn find_slot_by_id(&mut self, id: Uuid) -> eyre::Result<Option<ScheduleSlot>>;

        async fn find_slot_by_start(
            &mut self,
            time_start: NaiveDateTime,
        ) -> eyre::Result<Option<ScheduleSlot>>;

        async fn delete_slot(&mut self, id: Uuid) -> eyre::Result<()>;

        async fn find_slots_in(&mut self, range: SlotRange) -> eyre::Result<Vec<ScheduleSlot>>;

        async fn delete_slots_in(&mut self, range: SlotRange) -> eyre::Result<u64>;

        async fn hide_slot(&mut self, slot: &ScheduleSlot) -> eyre::Result<()>;
    }

    #[async_trait]
    impl ReservationStore for Store {
        async fn insert_reservation(
            &mut self,
            reservation: NewReservation,
        ) -> eyre::Result<Reservation>;

        async fn update_reservation(&mut self, reservation: Reservation) -> eyre::Result<Reservation>;

        async fn find_reservation_by_id(&mut self, id: Uuid) -> eyre::Result<Option<Reservation>>;

        async fn find_reservations_by_slot(&mut self, slot_id: Uuid) -> eyre::Result<Vec<Reservation>>;

        async fn list_reservations(&mut self) -> eyre::Result<Vec<Reservation>>;
    }
}
