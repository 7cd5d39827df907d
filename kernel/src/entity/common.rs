mod page;
mod time;

pub use self::{page::*, time::*};
