mod booking;
mod comment;
mod item;

pub use self::{booking::*, comment::*, item::*};
