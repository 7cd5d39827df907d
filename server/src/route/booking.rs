use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use application::service::{
    ApproveBookingService, CreateBookingService, GetBookingService, GetBookingsService,
};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::extract::SharerId;
use crate::handler::AppModule;

use self::request::{ApproveRequest, CreateRequest, GetRequest, ListRequest, Transformer};
use self::response::Presenter;

mod request;
mod response;

pub trait BookingRouter {
    fn route_booking(self) -> Self;
}

impl BookingRouter for Router<AppModule> {
    fn route_booking(self) -> Self {
        self.route(
            "/bookings",
            post(
                |State(module): State<AppModule>,
                 SharerId(user_id): SharerId,
                 Json(req): Json<CreateRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((user_id, req))
                        .handle(|dto| async move { module.create_booking(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .get(
                |State(module): State<AppModule>,
                 SharerId(user_id): SharerId,
                 Query(req): Query<ListRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((user_id, req))
                        .handle(|dto| async move { module.get_booker_bookings(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/bookings/owner",
            get(
                |State(module): State<AppModule>,
                 SharerId(user_id): SharerId,
                 Query(req): Query<ListRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((user_id, req))
                        .handle(|dto| async move { module.get_owner_bookings(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/bookings/:id",
            get(
                |State(module): State<AppModule>,
                 SharerId(user_id): SharerId,
                 Path(id): Path<i64>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((user_id, GetRequest::new(id)))
                        .handle(|dto| async move { module.get_booking(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .patch(
                |State(module): State<AppModule>,
                 SharerId(user_id): SharerId,
                 Path(id): Path<i64>,
                 Query(req): Query<ApproveRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((user_id, id, req))
                        .handle(|dto| async move { module.approve_booking(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
