use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::{Invalid, KernelError};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct ItemDescription(String);

impl ItemDescription {
    pub fn new(description: impl Into<String>) -> Self {
        Self(description.into())
    }

    pub fn parse(description: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(Report::new(KernelError::from(Invalid::BlankText))
                .attach_printable("item description"));
        }
        Ok(Self(description))
    }
}
