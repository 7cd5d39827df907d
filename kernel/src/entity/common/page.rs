use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln, References};

use crate::{Invalid, KernelError};

#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct SelectFrom(i32);

impl SelectFrom {
    pub fn new(value: impl Into<i32>) -> Self {
        SelectFrom(value.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct SelectSize(i32);

impl SelectSize {
    pub fn new(value: impl Into<i32>) -> Self {
        SelectSize(value.into())
    }
}

impl Default for SelectSize {
    fn default() -> Self {
        Self::new(20)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Id,
    Start,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sort {
    Unsorted,
    By(SortKey, Direction),
}

/// Page-index pagination.
///
/// `from` is not an arbitrary offset: it selects the page that contains it,
/// so `from = 25, size = 10` and `from = 20, size = 10` address the same page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, References)]
pub struct PageRequest {
    index: i64,
    size: i64,
    sort: Sort,
}

impl PageRequest {
    pub fn from_offset(
        from: &SelectFrom,
        size: &SelectSize,
        sort: Sort,
    ) -> error_stack::Result<Self, KernelError> {
        let from = i64::from(*from.as_ref());
        let size = i64::from(*size.as_ref());
        if size <= 0 {
            return Err(Report::new(KernelError::from(Invalid::BadPageSize))
                .attach_printable(format!("size: {size}")));
        }
        if from < 0 {
            return Err(Report::new(KernelError::from(Invalid::BadOffset))
                .attach_printable(format!("from: {from}")));
        }
        Ok(Self {
            index: from / size,
            size,
            sort,
        })
    }

    /// First row of the page.
    pub fn offset(&self) -> i64 {
        self.index * self.size
    }
}
