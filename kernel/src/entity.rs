mod booking;
mod comment;
mod common;
mod item;
mod user;

pub use self::{booking::*, comment::*, common::*, item::*, user::*};
