mod booking;
mod comment;
mod item;
mod user;

pub use self::{booking::*, comment::*, item::*, user::*};
