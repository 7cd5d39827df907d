mod id;
mod period;
mod state;
mod status;

pub use self::{id::*, period::*, state::*, status::*};
use destructure::Destructure;
use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::References;

use crate::entity::{Item, User, UserId};
use crate::{Invalid, KernelError};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure)]
pub struct Booking {
    id: BookingId,
    start: BookingStart,
    end: BookingEnd,
    item: Item,
    booker: User,
    status: BookingStatus,
}

impl Booking {
    pub fn new(
        id: BookingId,
        start: BookingStart,
        end: BookingEnd,
        item: Item,
        booker: User,
        status: BookingStatus,
    ) -> Self {
        Self {
            id,
            start,
            end,
            item,
            booker,
            status,
        }
    }

    /// Booker or owner of the booked item.
    pub fn is_participant(&self, user_id: &UserId) -> bool {
        self.booker.id().eq(user_id) || self.item.is_owned_by(user_id)
    }

    /// Half-open interval test against `[start, end)`.
    pub fn overlaps(&self, start: &BookingStart, end: &BookingEnd) -> bool {
        self.start.as_ref() < end.as_ref() && self.end.as_ref() > start.as_ref()
    }

    pub fn is_approved(&self) -> bool {
        self.status == BookingStatus::Approved
    }

    pub fn check_period(
        start: &BookingStart,
        end: &BookingEnd,
    ) -> error_stack::Result<(), KernelError> {
        if start.as_ref() < end.as_ref() {
            Ok(())
        } else {
            Err(Report::new(KernelError::from(Invalid::BadTimeRange))
                .attach_printable(format!("start: {start:?}, end: {end:?}")))
        }
    }
}

#[cfg(test)]
pub(crate) mod test {
    use time::macros::datetime;
    use time::PrimitiveDateTime;

    use crate::entity::{
        Booking, BookingEnd, BookingId, BookingStart, BookingStatus, Item, ItemAvailable,
        ItemDescription, ItemId, ItemName, User, UserEmail, UserId, UserName,
    };
    use crate::{Invalid, KernelError};

    pub(crate) fn booking(
        start: PrimitiveDateTime,
        end: PrimitiveDateTime,
        status: BookingStatus,
    ) -> Booking {
        let owner = UserId::new(1);
        let item = Item::new(
            ItemId::new(10),
            ItemName::new("drill"),
            ItemDescription::new("cordless drill"),
            ItemAvailable::new(true),
            owner,
            None,
        );
        let booker = User::new(
            UserId::new(2),
            UserName::new("booker"),
            UserEmail::new("booker@example.com"),
        );
        Booking::new(
            BookingId::new(100),
            BookingStart::new(start),
            BookingEnd::new(end),
            item,
            booker,
            status,
        )
    }

    #[test]
    fn participant_is_booker_or_owner() {
        let booking = booking(
            datetime!(2024-01-01 10:00),
            datetime!(2024-01-01 12:00),
            BookingStatus::Waiting,
        );
        assert!(booking.is_participant(&UserId::new(1)));
        assert!(booking.is_participant(&UserId::new(2)));
        assert!(!booking.is_participant(&UserId::new(3)));
    }

    #[test]
    fn overlap_is_half_open() {
        let booking = booking(
            datetime!(2024-01-01 10:00),
            datetime!(2024-01-01 12:00),
            BookingStatus::Approved,
        );
        let overlaps = |start: PrimitiveDateTime, end: PrimitiveDateTime| {
            booking.overlaps(&BookingStart::new(start), &BookingEnd::new(end))
        };
        assert!(overlaps(datetime!(2024-01-01 11:00), datetime!(2024-01-01 13:00)));
        assert!(overlaps(datetime!(2024-01-01 09:00), datetime!(2024-01-01 10:30)));
        assert!(overlaps(datetime!(2024-01-01 09:00), datetime!(2024-01-01 13:00)));
        assert!(!overlaps(datetime!(2024-01-01 12:00), datetime!(2024-01-01 13:00)));
        assert!(!overlaps(datetime!(2024-01-01 08:00), datetime!(2024-01-01 10:00)));
    }

    #[test]
    fn period_must_be_strictly_ordered() {
        let start = BookingStart::new(datetime!(2024-01-01 10:00));
        assert!(Booking::check_period(&start, &BookingEnd::new(datetime!(2024-01-01 10:01))).is_ok());
        for end in [datetime!(2024-01-01 10:00), datetime!(2024-01-01 09:00)] {
            let report = Booking::check_period(&start, &BookingEnd::new(end)).unwrap_err();
            assert_eq!(
                report.current_context(),
                &KernelError::Invalid(Invalid::BadTimeRange)
            );
        }
    }
}
