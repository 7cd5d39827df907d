use axum::Json;
use serde::Serialize;
use time::PrimitiveDateTime;

use application::transfer::{BookingDto, UserDto};
use kernel::prelude::entity::{local_date_time, BookingStatus};

use crate::controller::Exhaust;
use crate::route::item::ItemResponse;

#[derive(Debug, Serialize)]
pub struct BookerResponse {
    id: i64,
    name: String,
    email: String,
}

impl From<UserDto> for BookerResponse {
    fn from(value: UserDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    id: i64,
    #[serde(with = "local_date_time")]
    start: PrimitiveDateTime,
    #[serde(with = "local_date_time")]
    end: PrimitiveDateTime,
    status: BookingStatus,
    booker: BookerResponse,
    item: ItemResponse,
}

impl From<BookingDto> for BookingResponse {
    fn from(value: BookingDto) -> Self {
        Self {
            id: value.id,
            start: value.start,
            end: value.end,
            status: value.status,
            booker: BookerResponse::from(value.booker),
            item: ItemResponse::from(value.item),
        }
    }
}

pub struct Presenter;

impl Exhaust<BookingDto> for Presenter {
    type To = Json<BookingResponse>;
    fn emit(&self, input: BookingDto) -> Self::To {
        Json(BookingResponse::from(input))
    }
}

impl Exhaust<Vec<BookingDto>> for Presenter {
    type To = Json<Vec<BookingResponse>>;
    fn emit(&self, input: Vec<BookingDto>) -> Self::To {
        Json(input.into_iter().map(BookingResponse::from).collect())
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;

    use application::transfer::{BookingDto, ItemDto, UserDto};
    use kernel::prelude::entity::BookingStatus;

    use crate::controller::Exhaust;
    use crate::route::booking::response::Presenter;

    #[test]
    fn booking_shape() {
        let dto = BookingDto {
            id: 5,
            start: datetime!(2024-05-01 10:00),
            end: datetime!(2024-05-01 12:00),
            status: BookingStatus::Waiting,
            booker: UserDto {
                id: 2,
                name: "booker".to_string(),
                email: "booker@example.com".to_string(),
            },
            item: ItemDto {
                id: 9,
                name: "Drill".to_string(),
                description: "cordless".to_string(),
                available: true,
                owner_id: 1,
                request_id: None,
            },
        };
        let json = serde_json::to_value(Presenter.emit(dto).0).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 5,
                "start": "2024-05-01T10:00:00",
                "end": "2024-05-01T12:00:00",
                "status": "WAITING",
                "booker": {"id": 2, "name": "booker", "email": "booker@example.com"},
                "item": {
                    "id": 9,
                    "name": "Drill",
                    "description": "cordless",
                    "available": true,
                    "requestId": null
                }
            })
        );
    }
}
