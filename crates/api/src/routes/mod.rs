//! HTTP handlers, one module per service.

pub mod cart;
pub mod catalog;
pub mod health;
pub mod inventory;
pub mod metrics;
pub mod pricing;
pub mod wallet;

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use common::Owner;

/// Header carrying the caller's identity.
pub const USER_HEADER: &str = "x-user";

/// The caller, taken verbatim from the `x-user` header. Missing, empty or
/// non-UTF-8 values mean the guest user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub Owner);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let owner = parts
            .headers
            .get(USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(Owner::new)
            .unwrap_or_default();
        Ok(CurrentUser(owner))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn extract(request: Request<()>) -> Owner {
        let (mut parts, _) = request.into_parts();
        let CurrentUser(owner) = CurrentUser::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        owner
    }

    #[tokio::test]
    async fn test_header_sets_owner() {
        let request = Request::builder().header("x-user", "jp").body(()).unwrap();
        assert_eq!(extract(request).await, Owner::new("jp"));
    }

    #[tokio::test]
    async fn test_missing_or_empty_header_is_guest() {
        let request = Request::builder().body(()).unwrap();
        assert!(extract(request).await.is_guest());

        let request = Request::builder().header("x-user", "").body(()).unwrap();
        assert!(extract(request).await.is_guest());
    }

    #[tokio::test]
    async fn test_header_value_is_kept_as_given() {
        let request = Request::builder().header("x-user", " jp").body(()).unwrap();
        assert_eq!(extract(request).await, Owner::new(" jp"));

        let request = Request::builder().header("x-user", "  ").body(()).unwrap();
        assert_eq!(extract(request).await, Owner::new("  "));
    }
}
