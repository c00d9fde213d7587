//! Type and range checks over raw config objects.
//!
//! Every public operation takes its config as a JSON object. Before anything
//! is computed the object goes through two passes: a type pass over every
//! property, then a range pass over every numeric property. Readers at the
//! bottom of this module pull typed values out of an object once it has been
//! checked.

use num_traits::ToPrimitive;
use serde_json::{Map, Value};

use crate::error::ConfigError;

/// A raw config object.
pub(crate) type RawMap = Map<String, Value>;

/// What kind of value a property must hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    /// Finite real number.
    Number,
    /// Finite number without a fractional part.
    Whole,
    /// Boolean.
    Flag,
    /// Non-empty array of finite numbers.
    Numbers,
    /// Anything; used for diagnostic labels.
    Label,
}

/// Allowed range of a numeric property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Bound {
    Signed,
    NonNegative,
    Positive,
}

/// Schema entry for one known property.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Field {
    pub name: &'static str,
    pub alias: Option<&'static str>,
    pub kind: Kind,
    pub bound: Bound,
    pub required: bool,
    pub limit: Option<usize>,
}

impl Field {
    pub const fn optional(name: &'static str, kind: Kind, bound: Bound) -> Self {
        Self {
            name,
            alias: None,
            kind,
            bound,
            required: false,
            limit: None,
        }
    }

    pub const fn required(name: &'static str, kind: Kind, bound: Bound) -> Self {
        Self {
            name,
            alias: None,
            kind,
            bound,
            required: true,
            limit: None,
        }
    }

    pub const fn alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    /// Caps a count so the work it drives stays bounded.
    pub const fn at_most(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, key: &str) -> bool {
        self.name == key || self.alias == Some(key)
    }
}

/// How properties outside the schema are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Unknown {
    Ignore,
    /// Held to the generic rule: a finite number, zero or higher.
    NonNegativeNumber,
}

const GENERIC: Field = Field::optional("", Kind::Number, Bound::NonNegative);

#[derive(Debug, Clone, Copy)]
pub(crate) struct Schema {
    pub fields: &'static [Field],
    pub unknown: Unknown,
}

impl Schema {
    fn lookup(&self, key: &str) -> Option<&Field> {
        match self.fields.iter().find(|f| f.matches(key)) {
            Some(field) => Some(field),
            None if self.unknown == Unknown::NonNegativeNumber => Some(&GENERIC),
            None => None,
        }
    }

    /// Runs both passes and hands back the checked object.
    pub fn check<'a>(&self, config: &'a Value) -> Result<&'a RawMap, ConfigError> {
        let map = as_object(config)?;
        self.check_types(map)?;
        self.check_ranges(map)?;
        Ok(map)
    }

    pub fn check_types(&self, map: &RawMap) -> Result<(), ConfigError> {
        for field in self.fields {
            let by_name = map.contains_key(field.name);
            let by_alias = field.alias.is_some_and(|alias| map.contains_key(alias));
            if by_name && by_alias {
                return Err(ConfigError::type_violation(
                    field.name,
                    format!("is also given as {}", field.alias.unwrap_or_default()),
                ));
            }
            if field.required && !by_name && !by_alias {
                return Err(ConfigError::type_violation(field.name, "is missing"));
            }
        }

        for (key, value) in map {
            if let Some(field) = self.lookup(key) {
                check_kind(key, field.kind, value)?;
            }
        }
        Ok(())
    }

    pub fn check_ranges(&self, map: &RawMap) -> Result<(), ConfigError> {
        for (key, value) in map {
            let Some(field) = self.lookup(key) else {
                continue;
            };
            if !matches!(field.kind, Kind::Number | Kind::Whole) {
                continue;
            }
            let Some(n) = value.as_f64() else {
                continue;
            };
            match field.bound {
                Bound::Signed => {}
                Bound::NonNegative if n < 0.0 => {
                    return Err(ConfigError::range_violation(
                        key.as_str(),
                        "must be zero or a positive number",
                    ));
                }
                Bound::Positive if n <= 0.0 => {
                    return Err(ConfigError::range_violation(
                        key.as_str(),
                        "must be a positive number",
                    ));
                }
                _ => {}
            }
            if let Some(limit) = field.limit {
                if n > limit as f64 {
                    return Err(ConfigError::range_violation(
                        key.as_str(),
                        format!("must be at most {}", limit),
                    ));
                }
            }
        }
        Ok(())
    }
}

pub(crate) fn as_object(config: &Value) -> Result<&RawMap, ConfigError> {
    config
        .as_object()
        .ok_or_else(|| ConfigError::type_violation("config", "should be an object"))
}

fn finite(key: &str, value: &Value) -> Result<f64, ConfigError> {
    match value.as_f64() {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(ConfigError::type_violation(key, "is not a number")),
    }
}

fn check_kind(key: &str, kind: Kind, value: &Value) -> Result<(), ConfigError> {
    match kind {
        Kind::Number => finite(key, value).map(drop),
        Kind::Whole => {
            if finite(key, value)?.fract() != 0.0 {
                return Err(ConfigError::type_violation(key, "is not a whole number"));
            }
            Ok(())
        }
        Kind::Flag => {
            if !value.is_boolean() {
                return Err(ConfigError::type_violation(key, "is not a boolean"));
            }
            Ok(())
        }
        Kind::Numbers => numbers(key, value).map(drop),
        Kind::Label => Ok(()),
    }
}

fn numbers(key: &str, value: &Value) -> Result<Vec<f64>, ConfigError> {
    let items = value
        .as_array()
        .ok_or_else(|| ConfigError::type_violation(key, "is not an array"))?;
    if items.is_empty() {
        return Err(ConfigError::type_violation(key, "is empty"));
    }
    items
        .iter()
        .map(|item| match item.as_f64() {
            Some(n) if n.is_finite() => Ok(n),
            _ => Err(ConfigError::type_violation(key, "is not an array of numbers")),
        })
        .collect()
}

/// Finds a property by its name or alias.
pub(crate) fn get<'a>(map: &'a RawMap, field: &Field) -> Option<(&'a str, &'a Value)> {
    map.get_key_value(field.name)
        .or_else(|| field.alias.and_then(|alias| map.get_key_value(alias)))
        .map(|(key, value)| (key.as_str(), value))
}

pub(crate) fn read_number(map: &RawMap, field: &Field) -> Result<Option<f64>, ConfigError> {
    get(map, field)
        .map(|(key, value)| finite(key, value))
        .transpose()
}

pub(crate) fn read_whole(map: &RawMap, field: &Field) -> Result<Option<usize>, ConfigError> {
    let Some((key, value)) = get(map, field) else {
        return Ok(None);
    };
    check_kind(key, Kind::Whole, value)?;
    let n = finite(key, value)?;
    n.to_usize()
        .map(Some)
        .ok_or_else(|| ConfigError::range_violation(key, "does not fit an index"))
}

pub(crate) fn read_flag(map: &RawMap, field: &Field) -> Result<Option<bool>, ConfigError> {
    get(map, field)
        .map(|(key, value)| {
            value
                .as_bool()
                .ok_or_else(|| ConfigError::type_violation(key, "is not a boolean"))
        })
        .transpose()
}

pub(crate) fn read_numbers(map: &RawMap, field: &Field) -> Result<Option<Vec<f64>>, ConfigError> {
    get(map, field)
        .map(|(key, value)| numbers(key, value))
        .transpose()
}

/// Like the `read_*` helpers, but a missing property is a type violation.
pub(crate) fn require<T>(field: &Field, value: Option<T>) -> Result<T, ConfigError> {
    value.ok_or_else(|| ConfigError::type_violation(field.name, "is missing"))
}
