use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct ItemAvailable(bool);

impl ItemAvailable {
    pub fn new(available: impl Into<bool>) -> Self {
        Self(available.into())
    }
}
