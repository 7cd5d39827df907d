use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::{Invalid, KernelError};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct CommentText(String);

impl CommentText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn parse(text: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(Report::new(KernelError::from(Invalid::BlankText)));
        }
        Ok(Self(text))
    }
}

#[cfg(test)]
mod test {
    use crate::entity::CommentText;

    #[test]
    fn blank_text_is_rejected() {
        assert!(CommentText::parse("  \n").is_err());
        assert!(CommentText::parse("").is_err());
        assert_eq!(
            CommentText::parse("works fine").unwrap(),
            CommentText::new("works fine")
        );
    }
}
