use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::BadRequest;

pub static SHARER_USER_ID: &str = "X-Sharer-User-Id";

/// Acting user, taken from the `X-Sharer-User-Id` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharerId(pub i64);

#[axum::async_trait]
impl<S> FromRequestParts<S> for SharerId
where
    S: Send + Sync,
{
    type Rejection = BadRequest;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(SHARER_USER_ID)
            .ok_or_else(|| BadRequest::new(format!("Missing header {SHARER_USER_ID}")))?;
        value
            .to_str()
            .ok()
            .and_then(|value| value.trim().parse::<i64>().ok())
            .map(SharerId)
            .ok_or_else(|| BadRequest::new(format!("Malformed header {SHARER_USER_ID}")))
    }
}

#[cfg(test)]
mod test {
    use axum::extract::FromRequestParts;
    use axum::http::Request;

    use crate::extract::{SharerId, SHARER_USER_ID};

    async fn extract(header: Option<&str>) -> Option<SharerId> {
        let mut request = Request::builder().uri("/bookings");
        if let Some(header) = header {
            request = request.header(SHARER_USER_ID, header);
        }
        let (mut parts, _) = request.body(()).unwrap().into_parts();
        SharerId::from_request_parts(&mut parts, &()).await.ok()
    }

    #[tokio::test]
    async fn reads_numeric_header() {
        assert_eq!(extract(Some("42")).await, Some(SharerId(42)));
    }

    #[tokio::test]
    async fn rejects_missing_or_malformed_header() {
        assert_eq!(extract(None).await, None);
        assert_eq!(extract(Some("abc")).await, None);
    }
}
