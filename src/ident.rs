use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use tracing::warn;
use uuid::Uuid;

/// Caller identity taken from the `X-User-Id` header. Authentication happens
/// upstream; this only refuses requests that arrive without an identity.
#[derive(Debug)]
pub struct UserId(pub Uuid);

const USER_ID_HEADER: &str = "x-user-id";

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "Missing X-User-Id header".to_string(),
            ))?;

        let user_id = Uuid::parse_str(raw).map_err(|_| {
            warn!(raw, "malformed X-User-Id header");
            (
                StatusCode::UNAUTHORIZED,
                "Invalid X-User-Id header".to_string(),
            )
        })?;

        Ok(UserId(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_header(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(v) = value {
            builder = builder.header(USER_ID_HEADER, v);
        }
        builder.body(()).expect("request").into_parts().0
    }

    #[tokio::test]
    async fn extracts_a_valid_uuid() {
        let id = Uuid::new_v4();
        let mut parts = parts_with_header(Some(&id.to_string()));
        let UserId(extracted) = UserId::from_request_parts(&mut parts, &())
            .await
            .expect("extract");
        assert_eq!(extracted, id);
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let mut parts = parts_with_header(None);
        let err = UserId::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_header_is_unauthorized() {
        let mut parts = parts_with_header(Some("not-a-uuid"));
        let err = UserId::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::UNAUTHORIZED);
    }
}
