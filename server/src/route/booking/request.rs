use serde::Deserialize;
use time::PrimitiveDateTime;

use application::transfer::{ApproveBookingDto, CreateBookingDto, GetBookingDto, GetBookingsDto};
use kernel::prelude::entity::{local_date_time, SelectFrom, SelectSize};

use crate::controller::Intake;

const DEFAULT_STATE: &str = "ALL";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    item_id: i64,
    #[serde(with = "local_date_time")]
    start: PrimitiveDateTime,
    #[serde(with = "local_date_time")]
    end: PrimitiveDateTime,
}

#[derive(Debug, Deserialize)]
pub struct ApproveRequest {
    approved: bool,
}

#[derive(Debug)]
pub struct GetRequest {
    booking_id: i64,
}

impl GetRequest {
    pub fn new(booking_id: i64) -> Self {
        Self { booking_id }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListRequest {
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    from: SelectFrom,
    #[serde(default)]
    size: SelectSize,
}

pub struct Transformer;

impl Intake<(i64, CreateRequest)> for Transformer {
    type To = CreateBookingDto;
    fn emit(&self, input: (i64, CreateRequest)) -> Self::To {
        let (booker_id, input) = input;
        CreateBookingDto {
            item_id: input.item_id,
            booker_id,
            start: input.start,
            end: input.end,
        }
    }
}

impl Intake<(i64, i64, ApproveRequest)> for Transformer {
    type To = ApproveBookingDto;
    fn emit(&self, input: (i64, i64, ApproveRequest)) -> Self::To {
        let (user_id, booking_id, input) = input;
        ApproveBookingDto {
            booking_id,
            approved: input.approved,
            user_id,
        }
    }
}

impl Intake<(i64, GetRequest)> for Transformer {
    type To = GetBookingDto;
    fn emit(&self, input: (i64, GetRequest)) -> Self::To {
        let (user_id, input) = input;
        GetBookingDto {
            booking_id: input.booking_id,
            user_id,
        }
    }
}

impl Intake<(i64, ListRequest)> for Transformer {
    type To = GetBookingsDto;
    fn emit(&self, input: (i64, ListRequest)) -> Self::To {
        let (user_id, input) = input;
        GetBookingsDto {
            user_id,
            state: input.state.unwrap_or_else(|| DEFAULT_STATE.to_string()),
            from: input.from.into(),
            size: input.size.into(),
        }
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;

    use crate::controller::Intake;
    use crate::route::booking::request::{CreateRequest, ListRequest, Transformer};

    #[test]
    fn create_request_reads_local_timestamps() {
        let request: CreateRequest = serde_json::from_str(
            r#"{"itemId": 3, "start": "2024-05-01T10:00:00", "end": "2024-05-01T12:30:00"}"#,
        )
        .unwrap();
        let dto = Transformer.emit((7, request));
        assert_eq!(dto.item_id, 3);
        assert_eq!(dto.booker_id, 7);
        assert_eq!(dto.start, datetime!(2024-05-01 10:00));
        assert_eq!(dto.end, datetime!(2024-05-01 12:30));
    }

    #[test]
    fn list_request_defaults() {
        let request: ListRequest = serde_json::from_str("{}").unwrap();
        let dto = Transformer.emit((1, request));
        assert_eq!(dto.state, "ALL");
        assert_eq!(dto.from, 0);
        assert_eq!(dto.size, 20);
    }
}
