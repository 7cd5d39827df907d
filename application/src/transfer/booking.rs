use time::PrimitiveDateTime;

use kernel::prelude::entity::{Booking, BookingStatus, DestructBooking};

use crate::transfer::{ItemDto, UserDto};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookingDto {
    pub id: i64,
    pub start: PrimitiveDateTime,
    pub end: PrimitiveDateTime,
    pub status: BookingStatus,
    pub booker: UserDto,
    pub item: ItemDto,
}

impl From<Booking> for BookingDto {
    fn from(value: Booking) -> Self {
        let DestructBooking {
            id,
            start,
            end,
            item,
            booker,
            status,
        } = value.into_destruct();
        Self {
            id: id.into(),
            start: start.into(),
            end: end.into(),
            status,
            booker: UserDto::from(booker),
            item: ItemDto::from(item),
        }
    }
}

/// Last/next booking attached to an item view.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookingShortDto {
    pub id: i64,
    pub start: PrimitiveDateTime,
    pub end: PrimitiveDateTime,
    pub status: BookingStatus,
    pub booker_id: i64,
}

impl From<Booking> for BookingShortDto {
    fn from(value: Booking) -> Self {
        let DestructBooking {
            id,
            start,
            end,
            booker,
            status,
            ..
        } = value.into_destruct();
        Self {
            id: id.into(),
            start: start.into(),
            end: end.into(),
            status,
            booker_id: (*booker.id()).into(),
        }
    }
}

pub struct CreateBookingDto {
    pub item_id: i64,
    pub booker_id: i64,
    pub start: PrimitiveDateTime,
    pub end: PrimitiveDateTime,
}

pub struct ApproveBookingDto {
    pub booking_id: i64,
    pub approved: bool,
    pub user_id: i64,
}

pub struct GetBookingDto {
    pub booking_id: i64,
    pub user_id: i64,
}

/// Listing of the bookings a user made, or of the bookings on a user's items.
pub struct GetBookingsDto {
    pub user_id: i64,
    pub state: String,
    pub from: i32,
    pub size: i32,
}
