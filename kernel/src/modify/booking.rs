use destructure::Destructure;
use vodca::References;

use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{BookingEnd, BookingId, BookingStart, BookingStatus, ItemId, UserId};
use crate::KernelError;

/// A booking that has not been stored yet. New bookings always start WAITING.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct CreateBooking {
    item_id: ItemId,
    booker_id: UserId,
    start: BookingStart,
    end: BookingEnd,
    status: BookingStatus,
}

impl CreateBooking {
    pub fn new(item_id: ItemId, booker_id: UserId, start: BookingStart, end: BookingEnd) -> Self {
        Self {
            item_id,
            booker_id,
            start,
            end,
            status: BookingStatus::Waiting,
        }
    }
}

#[async_trait::async_trait]
pub trait BookingModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        booking: &CreateBooking,
    ) -> error_stack::Result<BookingId, KernelError>;
    async fn update_status(
        &self,
        con: &mut Self::Transaction,
        id: &BookingId,
        status: &BookingStatus,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnBookingModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookingModifier: BookingModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn booking_modifier(&self) -> &Self::BookingModifier;
}
