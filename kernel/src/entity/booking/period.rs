use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;
use vodca::{AsRefln, Fromln};

use crate::entity::local_date_time;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Fromln, AsRefln, Serialize, Deserialize,
)]
pub struct BookingStart(#[serde(with = "local_date_time")] PrimitiveDateTime);

impl BookingStart {
    pub fn new(time: impl Into<PrimitiveDateTime>) -> Self {
        Self(time.into())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Fromln, AsRefln, Serialize, Deserialize,
)]
pub struct BookingEnd(#[serde(with = "local_date_time")] PrimitiveDateTime);

impl BookingEnd {
    pub fn new(time: impl Into<PrimitiveDateTime>) -> Self {
        Self(time.into())
    }
}
