use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Shown next to comments the user writes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl Display for UserName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique across users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct UserEmail(String);

impl UserEmail {
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into())
    }
}
