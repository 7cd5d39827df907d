use serde::Deserialize;

use application::transfer::{
    CreateCommentDto, CreateItemDto, GetItemDto, GetOwnerItemsDto, SearchItemsDto, UpdateItemDto,
};
use kernel::prelude::entity::{SelectFrom, SelectSize};

use crate::controller::Intake;

#[derive(Debug)]
pub struct GetRequest {
    item_id: i64,
}

impl GetRequest {
    pub fn new(item_id: i64) -> Self {
        Self { item_id }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListRequest {
    #[serde(default)]
    from: SelectFrom,
    #[serde(default)]
    size: SelectSize,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    text: String,
    #[serde(default)]
    from: SelectFrom,
    #[serde(default)]
    size: SelectSize,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    available: Option<bool>,
    request_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    name: Option<String>,
    description: Option<String>,
    available: Option<bool>,
}

pub struct Transformer;

impl Intake<(i64, GetRequest)> for Transformer {
    type To = GetItemDto;
    fn emit(&self, input: (i64, GetRequest)) -> Self::To {
        let (user_id, input) = input;
        GetItemDto {
            item_id: input.item_id,
            user_id,
        }
    }
}

impl Intake<(i64, ListRequest)> for Transformer {
    type To = GetOwnerItemsDto;
    fn emit(&self, input: (i64, ListRequest)) -> Self::To {
        let (owner_id, input) = input;
        GetOwnerItemsDto {
            owner_id,
            from: input.from.into(),
            size: input.size.into(),
        }
    }
}

impl Intake<SearchRequest> for Transformer {
    type To = SearchItemsDto;
    fn emit(&self, input: SearchRequest) -> Self::To {
        SearchItemsDto {
            text: input.text,
            from: input.from.into(),
            size: input.size.into(),
        }
    }
}

impl Intake<(i64, CreateRequest)> for Transformer {
    type To = CreateItemDto;
    fn emit(&self, input: (i64, CreateRequest)) -> Self::To {
        let (owner_id, input) = input;
        CreateItemDto {
            owner_id,
            name: input.name,
            description: input.description,
            available: input.available,
            request_id: input.request_id,
        }
    }
}

impl Intake<(i64, i64, UpdateRequest)> for Transformer {
    type To = UpdateItemDto;
    fn emit(&self, input: (i64, i64, UpdateRequest)) -> Self::To {
        let (user_id, item_id, input) = input;
        UpdateItemDto {
            item_id,
            user_id,
            name: input.name,
            description: input.description,
            available: input.available,
        }
    }
}

impl Intake<(i64, i64, CommentRequest)> for Transformer {
    type To = CreateCommentDto;
    fn emit(&self, input: (i64, i64, CommentRequest)) -> Self::To {
        let (author_id, item_id, input) = input;
        CreateCommentDto {
            item_id,
            author_id,
            text: input.text,
        }
    }
}
