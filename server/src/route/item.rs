use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use application::service::{
    CommentService, CreateItemService, GetItemService, UpdateItemService,
};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::extract::SharerId;
use crate::handler::AppModule;

use self::request::{
    CommentRequest, CreateRequest, GetRequest, ListRequest, SearchRequest, Transformer,
    UpdateRequest,
};
use self::response::Presenter;

pub(in crate::route) use self::response::ItemResponse;

mod request;
mod response;

pub trait ItemRouter {
    fn route_item(self) -> Self;
}

impl ItemRouter for Router<AppModule> {
    fn route_item(self) -> Self {
        self.route(
            "/items",
            get(
                |State(module): State<AppModule>,
                 SharerId(user_id): SharerId,
                 Query(req): Query<ListRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((user_id, req))
                        .handle(|dto| async move { module.get_owner_items(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule>,
                 SharerId(user_id): SharerId,
                 Json(req): Json<CreateRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((user_id, req))
                        .handle(|dto| async move { module.create_item(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/items/search",
            get(
                |State(module): State<AppModule>, Query(req): Query<SearchRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { module.search_items(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/items/:id",
            get(
                |State(module): State<AppModule>,
                 SharerId(user_id): SharerId,
                 Path(id): Path<i64>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((user_id, GetRequest::new(id)))
                        .handle(|dto| async move { module.get_item(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .patch(
                |State(module): State<AppModule>,
                 SharerId(user_id): SharerId,
                 Path(id): Path<i64>,
                 Json(req): Json<UpdateRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((user_id, id, req))
                        .handle(|dto| async move { module.update_item(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/items/:id/comment",
            post(
                |State(module): State<AppModule>,
                 SharerId(user_id): SharerId,
                 Path(id): Path<i64>,
                 Json(req): Json<CommentRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((user_id, id, req))
                        .handle(|dto| async move { module.add_comment(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
