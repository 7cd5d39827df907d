use time::PrimitiveDateTime;

use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{
    Booking, BookingEnd, BookingId, BookingStart, BookingState, ItemId, PageRequest, UserId,
};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookingQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &BookingId,
    ) -> error_stack::Result<Option<Booking>, KernelError>;

    /// Whether an APPROVED booking of the item overlaps `[start, end)`.
    /// `excluding` leaves one booking out of the check.
    async fn exists_approved_overlap(
        &self,
        con: &mut Self::Transaction,
        item_id: &ItemId,
        start: &BookingStart,
        end: &BookingEnd,
        excluding: Option<&BookingId>,
    ) -> error_stack::Result<bool, KernelError>;

    async fn find_by_booker(
        &self,
        con: &mut Self::Transaction,
        booker_id: &UserId,
        state: &BookingState,
        now: &PrimitiveDateTime,
        page: &PageRequest,
    ) -> error_stack::Result<Vec<Booking>, KernelError>;

    async fn find_by_owner(
        &self,
        con: &mut Self::Transaction,
        owner_id: &UserId,
        state: &BookingState,
        now: &PrimitiveDateTime,
        page: &PageRequest,
    ) -> error_stack::Result<Vec<Booking>, KernelError>;

    /// APPROVED bookings of the given items with `start < as_of`.
    async fn find_approved_started_before(
        &self,
        con: &mut Self::Transaction,
        item_ids: &[ItemId],
        as_of: &PrimitiveDateTime,
    ) -> error_stack::Result<Vec<Booking>, KernelError>;

    /// APPROVED bookings of the given items with `start > as_of`.
    async fn find_approved_starting_after(
        &self,
        con: &mut Self::Transaction,
        item_ids: &[ItemId],
        as_of: &PrimitiveDateTime,
    ) -> error_stack::Result<Vec<Booking>, KernelError>;

    /// Whether the user has an APPROVED booking of the item that ended before `now`.
    async fn exists_completed(
        &self,
        con: &mut Self::Transaction,
        item_id: &ItemId,
        booker_id: &UserId,
        now: &PrimitiveDateTime,
    ) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnBookingQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookingQuery: BookingQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn booking_query(&self) -> &Self::BookingQuery;
}
