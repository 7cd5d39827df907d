use std::str::FromStr;

use error_stack::Report;
use time::PrimitiveDateTime;

use crate::entity::{Booking, BookingStatus};
use crate::{Invalid, KernelError};

/// Listing filter. Temporal variants are evaluated against "now" at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BookingState {
    #[default]
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl BookingState {
    pub fn admits(&self, booking: &Booking, now: &PrimitiveDateTime) -> bool {
        let start = booking.start().as_ref();
        let end = booking.end().as_ref();
        match self {
            BookingState::All => true,
            BookingState::Current => start < now && end > now,
            BookingState::Past => end < now,
            BookingState::Future => start > now,
            BookingState::Waiting => booking.status() == &BookingStatus::Waiting,
            BookingState::Rejected => booking.status() == &BookingStatus::Rejected,
        }
    }
}

impl FromStr for BookingState {
    type Err = Report<KernelError>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(BookingState::All),
            "CURRENT" => Ok(BookingState::Current),
            "PAST" => Ok(BookingState::Past),
            "FUTURE" => Ok(BookingState::Future),
            "WAITING" => Ok(BookingState::Waiting),
            "REJECTED" => Ok(BookingState::Rejected),
            other => Err(Report::new(KernelError::from(Invalid::UnsupportedStatus))
                .attach_printable(format!("state: {other}"))),
        }
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;

    use crate::entity::booking::test::booking;
    use crate::entity::{BookingState, BookingStatus};
    use crate::{Invalid, KernelError};

    #[test]
    fn parses_known_tokens_only() {
        assert_eq!("ALL".parse::<BookingState>().unwrap(), BookingState::All);
        assert_eq!(
            "REJECTED".parse::<BookingState>().unwrap(),
            BookingState::Rejected
        );
        for token in ["UNSUPPORTED_STATUS", "all", "APPROVED", ""] {
            let report = token.parse::<BookingState>().unwrap_err();
            assert_eq!(
                report.current_context(),
                &KernelError::Invalid(Invalid::UnsupportedStatus)
            );
            assert_eq!(
                report.current_context().to_string(),
                "Unknown state: UNSUPPORTED_STATUS"
            );
        }
    }

    #[test]
    fn temporal_states_follow_now() {
        let booking = booking(
            datetime!(2024-01-01 11:00),
            datetime!(2024-01-01 12:00),
            BookingStatus::Approved,
        );
        let before = datetime!(2024-01-01 10:00);
        let inside = datetime!(2024-01-01 11:30);
        let after = datetime!(2024-01-01 13:00);

        assert!(BookingState::Future.admits(&booking, &before));
        assert!(!BookingState::Current.admits(&booking, &before));
        assert!(BookingState::Current.admits(&booking, &inside));
        assert!(!BookingState::Past.admits(&booking, &inside));
        assert!(BookingState::Past.admits(&booking, &after));
        assert!(BookingState::All.admits(&booking, &after));
    }

    #[test]
    fn current_excludes_window_edges() {
        let booking = booking(
            datetime!(2024-01-01 11:00),
            datetime!(2024-01-01 12:00),
            BookingStatus::Approved,
        );
        assert!(!BookingState::Current.admits(&booking, &datetime!(2024-01-01 11:00)));
        assert!(!BookingState::Current.admits(&booking, &datetime!(2024-01-01 12:00)));
    }

    #[test]
    fn status_states_ignore_time() {
        let waiting = booking(
            datetime!(2024-01-01 11:00),
            datetime!(2024-01-01 12:00),
            BookingStatus::Waiting,
        );
        let now = datetime!(2030-01-01 00:00);
        assert!(BookingState::Waiting.admits(&waiting, &now));
        assert!(!BookingState::Rejected.admits(&waiting, &now));
    }
}
