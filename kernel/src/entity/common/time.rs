use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::marker::PhantomData;

use time::PrimitiveDateTime;

// Timestamps carry no offset. Callers are expected to agree on one timezone.
time::serde::format_description!(
    pub local_date_time,
    PrimitiveDateTime,
    "[year]-[month]-[day]T[hour]:[minute]:[second]"
);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CreatedAt<T>(PrimitiveDateTime, PhantomData<T>);

impl<T> CreatedAt<T> {
    pub fn new(time: impl Into<PrimitiveDateTime>) -> Self {
        Self(time.into(), PhantomData)
    }
}

impl<T> AsRef<PrimitiveDateTime> for CreatedAt<T> {
    fn as_ref(&self) -> &PrimitiveDateTime {
        &self.0
    }
}

impl<T> From<CreatedAt<T>> for PrimitiveDateTime {
    fn from(value: CreatedAt<T>) -> Self {
        value.0
    }
}

impl<T> Serialize for CreatedAt<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        local_date_time::serialize(&self.0, serializer)
    }
}

impl<'de, T> Deserialize<'de> for CreatedAt<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        local_date_time::deserialize(deserializer).map(|time| Self(time, PhantomData))
    }
}

#[cfg(test)]
mod test {
    use crate::entity::{Comment, CreatedAt};
    use time::macros::datetime;

    #[test]
    fn serializes_without_offset() {
        let created = CreatedAt::<Comment>::new(datetime!(2024-03-01 10:15:00));
        let json = serde_json::to_string(&created).unwrap();
        assert_eq!(json, "\"2024-03-01T10:15:00\"");
        let back: CreatedAt<Comment> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, created);
    }
}
