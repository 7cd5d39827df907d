use axum::Json;
use serde::Serialize;
use time::PrimitiveDateTime;

use application::transfer::{BookingShortDto, CommentDto, ItemDetailDto, ItemDto};
use kernel::prelude::entity::{local_date_time, BookingStatus};

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    id: i64,
    name: String,
    description: String,
    available: bool,
    request_id: Option<i64>,
}

impl From<ItemDto> for ItemResponse {
    fn from(value: ItemDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            available: value.available,
            request_id: value.request_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortBookingResponse {
    id: i64,
    #[serde(with = "local_date_time")]
    start: PrimitiveDateTime,
    #[serde(with = "local_date_time")]
    end: PrimitiveDateTime,
    status: BookingStatus,
    booker_id: i64,
}

impl From<BookingShortDto> for ShortBookingResponse {
    fn from(value: BookingShortDto) -> Self {
        Self {
            id: value.id,
            start: value.start,
            end: value.end,
            status: value.status,
            booker_id: value.booker_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    id: i64,
    text: String,
    author_name: String,
    #[serde(with = "local_date_time")]
    created: PrimitiveDateTime,
}

impl From<CommentDto> for CommentResponse {
    fn from(value: CommentDto) -> Self {
        Self {
            id: value.id,
            text: value.text,
            author_name: value.author_name,
            created: value.created,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemViewResponse {
    #[serde(flatten)]
    item: ItemResponse,
    last_booking: Option<ShortBookingResponse>,
    next_booking: Option<ShortBookingResponse>,
    comments: Vec<CommentResponse>,
}

impl From<ItemDetailDto> for ItemViewResponse {
    fn from(value: ItemDetailDto) -> Self {
        Self {
            item: ItemResponse::from(value.item),
            last_booking: value.last_booking.map(ShortBookingResponse::from),
            next_booking: value.next_booking.map(ShortBookingResponse::from),
            comments: value.comments.into_iter().map(CommentResponse::from).collect(),
        }
    }
}

pub struct Presenter;

impl Exhaust<ItemDetailDto> for Presenter {
    type To = Json<ItemViewResponse>;
    fn emit(&self, input: ItemDetailDto) -> Self::To {
        Json(ItemViewResponse::from(input))
    }
}

impl Exhaust<Vec<ItemDetailDto>> for Presenter {
    type To = Json<Vec<ItemViewResponse>>;
    fn emit(&self, input: Vec<ItemDetailDto>) -> Self::To {
        Json(input.into_iter().map(ItemViewResponse::from).collect())
    }
}

impl Exhaust<ItemDto> for Presenter {
    type To = Json<ItemResponse>;
    fn emit(&self, input: ItemDto) -> Self::To {
        Json(ItemResponse::from(input))
    }
}

impl Exhaust<Vec<ItemDto>> for Presenter {
    type To = Json<Vec<ItemResponse>>;
    fn emit(&self, input: Vec<ItemDto>) -> Self::To {
        Json(input.into_iter().map(ItemResponse::from).collect())
    }
}

impl Exhaust<CommentDto> for Presenter {
    type To = Json<CommentResponse>;
    fn emit(&self, input: CommentDto) -> Self::To {
        Json(CommentResponse::from(input))
    }
}
