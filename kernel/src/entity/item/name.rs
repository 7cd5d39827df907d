use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::{Invalid, KernelError};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct ItemName(String);

impl ItemName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn parse(name: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Report::new(KernelError::from(Invalid::BlankText))
                .attach_printable("item name"));
        }
        Ok(Self(name))
    }
}
