use std::collections::HashMap;

use axum::{extract::FromRequestParts, extract::Query, http::request::Parts};
use catalog_core::{
    ListParams, DEFAULT_LIST_LIMIT, DEFAULT_RELATED_LIMIT, MAX_LIST_LIMIT, MAX_RELATED_LIMIT,
};
use serde::Serialize;

use crate::middleware::request_path;

use super::ApiError;

/// One rejected query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
    pub invalid_value: Option<String>,
}

impl FieldViolation {
    fn new(field: &str, message: impl Into<String>, invalid_value: Option<&str>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
            invalid_value: invalid_value.map(ToOwned::to_owned),
        }
    }
}

/// Inclusive integer bounds for a query parameter.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    min: i64,
    max: Option<usize>,
}

/// Parse `raw` as an integer within `bounds`, falling back to `default`
/// when the parameter is absent. Violations are pushed onto `errors`.
fn bounded_param(
    field: &str,
    raw: Option<&str>,
    default: usize,
    bounds: Bounds,
    errors: &mut Vec<FieldViolation>,
) -> usize {
    let Some(raw) = raw else {
        return default;
    };

    let Ok(value) = raw.trim().parse::<i64>() else {
        errors.push(FieldViolation::new(
            field,
            "value must be a valid integer",
            Some(raw),
        ));
        return default;
    };

    if value < bounds.min {
        errors.push(FieldViolation::new(
            field,
            format!("value must be greater than or equal to {}", bounds.min),
            Some(raw),
        ));
        return default;
    }

    let value = usize::try_from(value).unwrap_or(usize::MAX);
    if let Some(max) = bounds.max.filter(|max| value > *max) {
        errors.push(FieldViolation::new(
            field,
            format!("value must be less than or equal to {max}"),
            Some(raw),
        ));
        return default;
    }

    value
}

fn raw_query(parts: &Parts) -> Result<HashMap<String, String>, ApiError> {
    Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
        .map(|Query(map)| map)
        .map_err(|e| {
            ApiError::validation(
                request_path(&parts.uri),
                vec![FieldViolation::new("query", e.body_text(), None)],
            )
        })
}

fn reject(parts: &Parts, errors: Vec<FieldViolation>) -> ApiError {
    tracing::debug!(path = %parts.uri, violations = errors.len(), "rejected query parameters");
    ApiError::validation(request_path(&parts.uri), errors)
}

/// Validated `limit` / `offset` / `search` for the product listing.
#[derive(Debug)]
pub(super) struct ListQuery(pub ListParams);

impl<S> FromRequestParts<S> for ListQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = raw_query(parts)?;
        let mut errors = Vec::new();

        let limit = bounded_param(
            "limit",
            raw.get("limit").map(String::as_str),
            DEFAULT_LIST_LIMIT,
            Bounds {
                min: 1,
                max: Some(MAX_LIST_LIMIT),
            },
            &mut errors,
        );
        let offset = bounded_param(
            "offset",
            raw.get("offset").map(String::as_str),
            0,
            Bounds { min: 0, max: None },
            &mut errors,
        );

        if !errors.is_empty() {
            return Err(reject(parts, errors));
        }

        Ok(Self(ListParams {
            limit,
            offset,
            search: raw.get("search").cloned(),
        }))
    }
}

/// Validated `limit` for related products.
#[derive(Debug)]
pub(super) struct RelatedQuery {
    pub limit: usize,
}

impl<S> FromRequestParts<S> for RelatedQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = raw_query(parts)?;
        let mut errors = Vec::new();

        let limit = bounded_param(
            "limit",
            raw.get("limit").map(String::as_str),
            DEFAULT_RELATED_LIMIT,
            Bounds {
                min: 1,
                max: Some(MAX_RELATED_LIMIT),
            },
            &mut errors,
        );

        if !errors.is_empty() {
            return Err(reject(parts, errors));
        }

        Ok(Self { limit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_BOUNDS: Bounds = Bounds {
        min: 1,
        max: Some(100),
    };

    #[test]
    fn absent_param_uses_default() {
        let mut errors = Vec::new();
        assert_eq!(bounded_param("limit", None, 20, LIST_BOUNDS, &mut errors), 20);
        assert!(errors.is_empty());
    }

    #[test]
    fn in_range_value_is_accepted() {
        let mut errors = Vec::new();
        assert_eq!(
            bounded_param("limit", Some("100"), 20, LIST_BOUNDS, &mut errors),
            100
        );
        assert_eq!(
            bounded_param("limit", Some("1"), 20, LIST_BOUNDS, &mut errors),
            1
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn above_max_is_rejected() {
        let mut errors = Vec::new();
        bounded_param("limit", Some("101"), 20, LIST_BOUNDS, &mut errors);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "limit");
        assert_eq!(errors[0].invalid_value.as_deref(), Some("101"));
        assert!(errors[0].message.contains("less than or equal to 100"));
    }

    #[test]
    fn below_min_is_rejected() {
        let mut errors = Vec::new();
        bounded_param(
            "offset",
            Some("-1"),
            0,
            Bounds { min: 0, max: None },
            &mut errors,
        );
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("greater than or equal to 0"));
    }

    #[test]
    fn non_integer_is_rejected() {
        let mut errors = Vec::new();
        bounded_param("limit", Some("ten"), 20, LIST_BOUNDS, &mut errors);
        bounded_param("limit", Some("2.5"), 20, LIST_BOUNDS, &mut errors);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.message.contains("valid integer")));
    }

    #[test]
    fn unbounded_max_accepts_large_offsets() {
        let mut errors = Vec::new();
        assert_eq!(
            bounded_param(
                "offset",
                Some("1000000"),
                0,
                Bounds { min: 0, max: None },
                &mut errors
            ),
            1_000_000
        );
        assert!(errors.is_empty());
    }
}
