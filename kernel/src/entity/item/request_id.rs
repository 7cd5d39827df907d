use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Wish-list entry an item was listed in response to.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize, Fromln, AsRefln)]
pub struct ItemRequestId(i64);

impl ItemRequestId {
    pub fn new(id: impl Into<i64>) -> Self {
        Self(id.into())
    }
}
