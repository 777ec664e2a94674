use std::sync::OnceLock;

use regex::Regex;

use crate::db::bootstrap::TABLE_ORDER;

/// Utility for parsing PostgreSQL constraint violation messages.
///
/// PostgreSQL names generated constraints `{table}_{column}_{suffix}`. Several
/// tables here contain underscores themselves (`shopping_cart`,
/// `user_delivery`), so the table part is matched against the known table
/// names instead of being split on the first underscore.
pub struct ConstraintParser;

/// Kind of generated constraint, derived from the name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    PrimaryKey,
    Unique,
    ForeignKey,
    Check,
}

impl ConstraintKind {
    const SUFFIXES: &'static [(&'static str, ConstraintKind)] = &[
        ("_pkey", ConstraintKind::PrimaryKey),
        ("_fkey", ConstraintKind::ForeignKey),
        ("_check", ConstraintKind::Check),
        ("_key", ConstraintKind::Unique),
    ];
}

/// A decoded constraint name such as `shopping_cart_user_id_fkey`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintName {
    pub table: String,
    /// Empty for primary keys, which carry no column in their name.
    pub column: String,
    pub kind: ConstraintKind,
}

struct RegexPatterns {
    key_value: Option<Regex>,
    column_name: Option<Regex>,
    relation_name: Option<Regex>,
    referenced_table: Option<Regex>,
}

impl RegexPatterns {
    fn new() -> Self {
        Self {
            // "Key (field)=(value)" in the DETAIL line
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").ok(),
            column_name: Regex::new(r#"column "([^"]+)""#).ok(),
            // "on table \"x\"" in FK messages, "relation \"x\"" elsewhere
            relation_name: Regex::new(r#"(?:on table|relation) "([^"]+)""#).ok(),
            referenced_table: Regex::new(r#"not present in table "([^"]+)""#).ok(),
        }
    }
}

static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

impl ConstraintParser {
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new)
    }

    fn capture(pattern: &Option<Regex>, message: &str) -> Option<String> {
        pattern
            .as_ref()?
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Decodes a generated constraint name.
    ///
    /// ```ignore
    /// let name = ConstraintParser::parse_constraint_name("shopping_cart_user_id_fkey").unwrap();
    /// assert_eq!(name.table, "shopping_cart");
    /// assert_eq!(name.column, "user_id");
    /// ```
    pub fn parse_constraint_name(constraint_name: &str) -> Option<ConstraintName> {
        let (rest, kind) = ConstraintKind::SUFFIXES.iter().find_map(|(suffix, kind)| {
            constraint_name.strip_suffix(suffix).map(|rest| (rest, *kind))
        })?;

        // Longest table name first, so `user_delivery` wins over `users`-like prefixes.
        let mut tables: Vec<&str> = TABLE_ORDER.iter().map(|(name, _)| *name).collect();
        tables.sort_by_key(|name| std::cmp::Reverse(name.len()));

        let table = tables.into_iter().find(|table| {
            rest == *table || rest.starts_with(&format!("{table}_"))
        })?;

        let column = rest
            .strip_prefix(table)
            .map(|c| c.trim_start_matches('_').to_string())
            .unwrap_or_default();

        if column.is_empty() && kind != ConstraintKind::PrimaryKey {
            return None;
        }

        Some(ConstraintName {
            table: table.to_string(),
            column,
            kind,
        })
    }

    /// Extracts `(field, value)` from `Key (field)=(value)`.
    pub fn extract_key_value_from_message(message: &str) -> Option<(String, String)> {
        Self::patterns()
            .key_value
            .as_ref()?
            .captures(message)
            .and_then(|caps| {
                let field = caps.get(1)?.as_str().to_string();
                let value = caps.get(2)?.as_str().to_string();
                Some((field, value))
            })
    }

    pub fn extract_column_from_message(message: &str) -> Option<String> {
        Self::capture(&Self::patterns().column_name, message)
    }

    /// Table the failing statement wrote to.
    pub fn extract_table_from_message(message: &str) -> Option<String> {
        Self::capture(&Self::patterns().relation_name, message)
    }

    /// Table a foreign key points at, from `is not present in table "x"`.
    pub fn extract_referenced_table(message: &str) -> Option<String> {
        Self::capture(&Self::patterns().referenced_table, message)
    }

    /// Returns `(entity, field, value)` for a unique or primary key violation.
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let from_message = Self::extract_key_value_from_message(message);

        if let Some(name) = constraint_name.and_then(Self::parse_constraint_name) {
            let (field, value) = match (&from_message, name.kind) {
                (Some((field, value)), _) => (field.clone(), value.clone()),
                (None, ConstraintKind::PrimaryKey) => ("id".to_string(), "duplicate_value".to_string()),
                (None, _) => (name.column.clone(), "duplicate_value".to_string()),
            };
            return Some((name.table, field, value));
        }

        let (field, value) = from_message?;
        let entity = Self::extract_table_from_message(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Returns `(entity, field)` for a not-null violation.
    pub fn parse_not_null_violation(message: &str) -> Option<(String, String)> {
        let field = Self::extract_column_from_message(message)?;
        let entity = Self::extract_table_from_message(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// Returns `(field, value, referenced_table)` for a foreign key violation.
    pub fn parse_foreign_key_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let referenced = Self::extract_referenced_table(message).unwrap_or_else(|| "resource".to_string());

        if let Some((field, value)) = Self::extract_key_value_from_message(message) {
            return Some((field, value, referenced));
        }

        let name = constraint_name.and_then(Self::parse_constraint_name)?;
        (name.kind == ConstraintKind::ForeignKey)
            .then(|| (name.column, "invalid_reference".to_string(), referenced))
    }

    /// Returns `(entity, field)` for a check violation.
    pub fn parse_check_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        if let Some(name) = constraint_name.and_then(Self::parse_constraint_name) {
            return Some((name.table, name.column));
        }

        let field = Self::extract_column_from_message(message)?;
        let entity = Self::extract_table_from_message(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }
}
