mod availability;
mod booking;
mod item;

pub use self::{availability::*, booking::*, item::*};
