use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use percent_encoding::percent_decode_str;

use crate::middleware::request_path;

use super::ApiError;

/// The `{id}` segment of a product route.
///
/// An id that does not percent-decode to valid UTF-8 is decoded lossily
/// instead of rejected, so it goes through the normal lookup and ends in the
/// usual 404 body.
#[derive(Debug)]
pub(super) struct ProductId(pub String);

impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(id)),
            Err(rejection) => {
                let Some(raw) = raw_product_segment(parts.uri.path()) else {
                    tracing::error!(%rejection, path = %parts.uri, "product route without an id segment");
                    return Err(ApiError::internal(request_path(&parts.uri)));
                };
                tracing::debug!(%rejection, raw, "decoding product id lossily");
                Ok(Self(percent_decode_str(raw).decode_utf8_lossy().into_owned()))
            }
        }
    }
}

/// The still percent-encoded segment following `products` in `path`.
fn raw_product_segment(path: &str) -> Option<&str> {
    let mut segments = path.split('/');
    segments.find(|s| *s == "products")?;
    segments.next().filter(|s| !s.is_empty())
}
