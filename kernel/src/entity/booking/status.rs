use std::fmt::Display;
use std::str::FromStr;

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::{Invalid, KernelError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Waiting,
    Approved,
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
        }
    }

    /// The owner's decision. Only a waiting booking can be decided, and only once.
    pub fn decide(self, approved: bool) -> error_stack::Result<Self, KernelError> {
        match self {
            BookingStatus::Waiting if approved => Ok(BookingStatus::Approved),
            BookingStatus::Waiting => Ok(BookingStatus::Rejected),
            decided => Err(Report::new(KernelError::from(Invalid::NotWaiting))
                .attach_printable(format!("current status: {decided}"))),
        }
    }
}

impl Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = Report<KernelError>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(BookingStatus::Waiting),
            "APPROVED" => Ok(BookingStatus::Approved),
            "REJECTED" => Ok(BookingStatus::Rejected),
            other => Err(Report::new(KernelError::Internal)
                .attach_printable(format!("unknown booking status stored: {other}"))),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::entity::BookingStatus;
    use crate::{Invalid, KernelError};

    #[test]
    fn waiting_is_decided_once() {
        assert_eq!(
            BookingStatus::Waiting.decide(true).unwrap(),
            BookingStatus::Approved
        );
        assert_eq!(
            BookingStatus::Waiting.decide(false).unwrap(),
            BookingStatus::Rejected
        );
        for decided in [BookingStatus::Approved, BookingStatus::Rejected] {
            for approved in [true, false] {
                let report = decided.decide(approved).unwrap_err();
                assert_eq!(
                    report.current_context(),
                    &KernelError::Invalid(Invalid::NotWaiting)
                );
            }
        }
    }

    #[test]
    fn stored_names_round_trip() {
        for status in [
            BookingStatus::Waiting,
            BookingStatus::Approved,
            BookingStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<BookingStatus>().unwrap(), status);
        }
        assert!("CANCELED".parse::<BookingStatus>().is_err());
    }
}
