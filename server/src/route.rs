mod booking;
mod item;

pub use self::{booking::BookingRouter, item::ItemRouter};
