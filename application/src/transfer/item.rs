use kernel::prelude::entity::{DestructItem, Item};

use crate::transfer::{BookingShortDto, CommentDto};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ItemDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: i64,
    pub request_id: Option<i64>,
}

impl From<Item> for ItemDto {
    fn from(value: Item) -> Self {
        let DestructItem {
            id,
            name,
            description,
            available,
            owner_id,
            request_id,
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            available: available.into(),
            owner_id: owner_id.into(),
            request_id: request_id.map(Into::into),
        }
    }
}

/// Item with the bookings and comments bound for response shaping.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ItemDetailDto {
    pub item: ItemDto,
    pub last_booking: Option<BookingShortDto>,
    pub next_booking: Option<BookingShortDto>,
    pub comments: Vec<CommentDto>,
}

impl From<Item> for ItemDetailDto {
    fn from(value: Item) -> Self {
        Self {
            item: ItemDto::from(value),
            last_booking: None,
            next_booking: None,
            comments: Vec::new(),
        }
    }
}

pub struct GetItemDto {
    pub item_id: i64,
    pub user_id: i64,
}

pub struct GetOwnerItemsDto {
    pub owner_id: i64,
    pub from: i32,
    pub size: i32,
}

pub struct SearchItemsDto {
    pub text: String,
    pub from: i32,
    pub size: i32,
}

pub struct CreateItemDto {
    pub owner_id: i64,
    pub name: String,
    pub description: String,
    pub available: Option<bool>,
    pub request_id: Option<i64>,
}

/// Absent fields keep their stored values.
pub struct UpdateItemDto {
    pub item_id: i64,
    pub user_id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}
