//! The shape every storefront resource shares.
//!
//! A resource is described by three types: a parameter model whose fields are
//! all optional (used for create, filter and update input), a stored entity,
//! and an output projection. The functions on [`Resource`] are pure; storage
//! lives behind `repositories::CrudRepository`.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::error::{AppError, AppResult};

/// How a query-string value is parsed for a given field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Bool,
    Float,
    Int,
}

/// One attribute of a parameter model.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// Wire name, as it appears in JSON bodies and query strings.
    pub name: &'static str,
    /// Rust field name on the parameter model.
    pub key: &'static str,
    pub kind: FieldKind,
    /// Whether the attribute may appear in a query string.
    pub filter: bool,
}

impl Field {
    /// A filterable attribute.
    pub const fn new(name: &'static str, key: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            key,
            kind,
            filter: true,
        }
    }

    /// An attribute accepted in bodies only.
    pub const fn input(name: &'static str, key: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            key,
            kind,
            filter: false,
        }
    }
}

pub trait Resource: Send + Sync + Sized + 'static {
    /// Singular name used in logs and error bodies.
    const NAME: &'static str;
    /// Path the router nests this resource under.
    const BASE_PATH: &'static str;
    /// Whether `PUT {base}/{id}` is exposed.
    const SUPPORTS_UPDATE: bool = true;
    /// Wire attributes of the parameter model.
    const FIELDS: &'static [Field];
    /// Rust field names in the order validation reports them.
    const VALIDATION_ORDER: &'static [&'static str];

    type Params: Clone + Default + DeserializeOwned + Validate + ToSchema + Send + Sync + 'static;
    type Entity: Clone + Send + Sync + 'static;
    type Output: Serialize + ToSchema + From<Self::Entity> + Send + 'static;

    fn id(entity: &Self::Entity) -> &str;

    /// Builds a new row from creation input, filling defaults for absent fields.
    fn build(id: String, created_at: String, params: Self::Params) -> Self::Entity;

    /// Applies `params` on top of `previous`. Identifier and creation time are kept.
    fn merge(previous: Self::Entity, params: Self::Params) -> Self::Entity;

    /// In-process equivalent of the repository's filter predicates.
    fn matches(entity: &Self::Entity, filter: &Self::Params) -> bool;

    /// Rules a merged row must still satisfy. Runs on every update, before the
    /// row is written back or discarded.
    fn check(_merged: &Self::Entity) -> AppResult<()> {
        Ok(())
    }

    /// Whether a merged row should be removed instead of written back.
    fn discards_on_update(_merged: &Self::Entity) -> bool {
        false
    }

    /// Value returned by an update that removed the row.
    fn empty() -> Self::Entity;
}

/// Present value wins, otherwise the previous one is kept.
pub fn resolve<T>(new: Option<T>, previous: T) -> T {
    new.unwrap_or(previous)
}

/// Rounds to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Equality on an optional filter value. Absent filters match everything.
pub fn matches_eq<T: PartialEq>(filter: &Option<T>, actual: &T) -> bool {
    filter.as_ref().is_none_or(|expected| expected == actual)
}

/// Case-sensitive substring match, the in-process twin of `LIKE '%v%'`.
pub fn matches_like(filter: &Option<String>, actual: &str) -> bool {
    filter.as_ref().is_none_or(|needle| actual.contains(needle.as_str()))
}

/// Wraps a filter value the way the repositories pass it to `LIKE`.
pub fn like_pattern(value: &str) -> String {
    format!("%{value}%")
}

/// Runs the validator rules and reports only the first failing field.
pub fn validate_first<R: Resource>(params: &R::Params) -> AppResult<()> {
    match params.validate() {
        Ok(()) => Ok(()),
        Err(errors) => Err(first_violation::<R>(&errors)),
    }
}

fn first_violation<R: Resource>(errors: &ValidationErrors) -> AppError {
    let field_errors = errors.field_errors();

    let ordered = R::VALIDATION_ORDER
        .iter()
        .find_map(|key| field_errors.get(*key).map(|errs| (*key, *errs)));

    let Some((key, errs)) = ordered.or_else(|| {
        field_errors
            .iter()
            .next()
            .map(|(key, errs)| (&**key, *errs))
    }) else {
        return AppError::Validation {
            field: R::NAME.to_string(),
            reason: errors.to_string(),
        };
    };

    let reason = errs
        .first()
        .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| format!("{} is invalid", wire_name::<R>(key)));

    AppError::Validation {
        field: wire_name::<R>(key).to_string(),
        reason,
    }
}

fn wire_name<R: Resource>(key: &str) -> &str {
    R::FIELDS
        .iter()
        .find(|f| f.key == key)
        .map(|f| f.name)
        .unwrap_or(key)
}

/// Builds a filter from query-string pairs.
///
/// Keys are matched case-insensitively against the filterable entries of
/// [`Resource::FIELDS`].
/// An unknown key or a value that does not parse for its field is a
/// `BadRequest`. When a key repeats, the last value wins.
pub fn filter_from_query<R: Resource>(pairs: &[(String, String)]) -> AppResult<R::Params> {
    let mut object = Map::new();

    for (key, raw) in pairs {
        let field = R::FIELDS
            .iter()
            .find(|f| f.filter && f.name.eq_ignore_ascii_case(key))
            .ok_or_else(|| {
                AppError::bad_request(format!("Unknown {} filter parameter '{}'", R::NAME, key))
            })?;

        object.insert(field.name.to_string(), parse_value(field, raw)?);
    }

    serde_json::from_value(Value::Object(object))
        .map_err(|e| AppError::bad_request(format!("Invalid {} filter: {}", R::NAME, e)))
}

fn parse_value(field: &Field, raw: &str) -> AppResult<Value> {
    let invalid = || {
        AppError::bad_request(format!(
            "Invalid value '{}' for filter parameter '{}'",
            raw, field.name
        ))
    };

    match field.kind {
        FieldKind::Text => Ok(Value::String(raw.to_string())),
        FieldKind::Bool => parse_bool(raw).map(Value::Bool).ok_or_else(invalid),
        FieldKind::Float => raw
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .ok_or_else(invalid),
        FieldKind::Int => raw
            .parse::<i64>()
            .map(|n| Value::Number(n.into()))
            .map_err(|_| invalid()),
    }
}

/// `true` / `false` in any letter case.
fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Custom validator: rejects strings that are empty after trimming.
pub fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}
