use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum KernelError {
    Concurrency,
    Timeout,
    Internal,
    NotFound(NotFound),
    Invalid(Invalid),
}

/// Resources that could not be resolved for the acting user.
/// Participant and ownership mismatches are reported as missing resources too.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum NotFound {
    Item,
    User,
    Booking,
    SelfBooking,
    NotOwner,
    NotParticipant,
    ItemRequest,
    NotItemOwner,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Invalid {
    ItemUnavailable,
    BadTimeRange,
    AlreadyBooked,
    NotWaiting,
    UnsupportedStatus,
    BadPageSize,
    BadOffset,
    CommentNotAllowed,
    BlankText,
    MissingAvailability,
}

pub const UNSUPPORTED_STATUS: &str = "Unknown state: UNSUPPORTED_STATUS";

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::Concurrency => write!(f, "Concurrency error"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
            KernelError::NotFound(reason) => write!(f, "{reason}"),
            KernelError::Invalid(reason) => write!(f, "{reason}"),
        }
    }
}

impl Display for NotFound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotFound::Item => write!(f, "Item not found"),
            NotFound::User => write!(f, "User not found"),
            NotFound::Booking => write!(f, "Booking not found"),
            NotFound::SelfBooking => write!(f, "Owner cannot book own item"),
            NotFound::NotOwner => write!(f, "Only the item owner can change the booking status"),
            NotFound::NotParticipant => {
                write!(f, "Booking is visible only to its booker and the item owner")
            }
            NotFound::ItemRequest => write!(f, "Item request not found"),
            NotFound::NotItemOwner => write!(f, "Only the item owner can change the item"),
        }
    }
}

impl Display for Invalid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Invalid::ItemUnavailable => write!(f, "Item is not available for booking"),
            Invalid::BadTimeRange => write!(f, "Booking start must be before its end"),
            Invalid::AlreadyBooked => write!(f, "Item is already booked for this period"),
            Invalid::NotWaiting => write!(f, "Booking status is not WAITING"),
            Invalid::UnsupportedStatus => write!(f, "{UNSUPPORTED_STATUS}"),
            Invalid::BadPageSize => write!(f, "Page size must be positive"),
            Invalid::BadOffset => write!(f, "Offset must not be negative"),
            Invalid::CommentNotAllowed => {
                write!(f, "Only users who completed a booking of the item can comment")
            }
            Invalid::BlankText => write!(f, "Text must not be blank"),
            Invalid::MissingAvailability => write!(f, "Item availability must be set"),
        }
    }
}

impl From<NotFound> for KernelError {
    fn from(value: NotFound) -> Self {
        Self::NotFound(value)
    }
}

impl From<Invalid> for KernelError {
    fn from(value: Invalid) -> Self {
        Self::Invalid(value)
    }
}

impl Context for KernelError {}

#[cfg(test)]
mod test {
    use crate::{Invalid, KernelError, NotFound};

    #[test]
    fn unsupported_status_message_is_stable() {
        let error = KernelError::from(Invalid::UnsupportedStatus);
        assert_eq!(error.to_string(), "Unknown state: UNSUPPORTED_STATUS");
    }

    #[test]
    fn reasons_keep_their_kind() {
        assert!(matches!(
            KernelError::from(NotFound::SelfBooking),
            KernelError::NotFound(NotFound::SelfBooking)
        ));
        assert!(matches!(
            KernelError::from(Invalid::AlreadyBooked),
            KernelError::Invalid(Invalid::AlreadyBooked)
        ));
    }
}
