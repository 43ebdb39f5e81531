//! Typed reads over the two payload encodings.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::warn;

use crate::parser::InvalidRequest;
use crate::request::keys;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Strictness {
    /// Malformed values fail the request.
    Strict,
    /// Malformed values fall back to their default.
    Permissive,
}

pub(crate) enum Fields<'a> {
    Properties(&'a BTreeMap<String, String>),
    Extras(&'a Map<String, Value>),
}

impl<'a> Fields<'a> {
    pub(crate) fn string(
        &self,
        key: &str,
        strictness: Strictness,
    ) -> Result<Option<String>, InvalidRequest> {
        let value = match self {
            Fields::Properties(props) => props.get(key).cloned(),
            Fields::Extras(extras) => match extras.get(key) {
                None | Some(Value::Null) => None,
                Some(Value::String(s)) => Some(s.clone()),
                Some(other) => {
                    return reject_or_default(
                        strictness,
                        key,
                        format!("expected a string, found {other}"),
                        None,
                    )
                }
            },
        };
        Ok(value.filter(|s| !s.is_empty()))
    }

    pub(crate) fn flag(
        &self,
        key: &str,
        strictness: Strictness,
    ) -> Result<bool, InvalidRequest> {
        let raw = match self {
            Fields::Properties(props) => props.get(key).map(|s| Value::String(s.clone())),
            Fields::Extras(extras) => extras.get(key).cloned(),
        };
        match raw {
            None | Some(Value::Null) => Ok(false),
            Some(Value::Bool(b)) => Ok(b),
            Some(Value::String(s)) => match s.trim() {
                "true" => Ok(true),
                "false" => Ok(false),
                other => reject_or_default(
                    strictness,
                    key,
                    format!("expected true or false, found {other:?}"),
                    false,
                ),
            },
            Some(other) => reject_or_default(
                strictness,
                key,
                format!("expected a boolean, found {other}"),
                false,
            ),
        }
    }

    pub(crate) fn integer(
        &self,
        key: &str,
        strictness: Strictness,
    ) -> Result<Option<i64>, InvalidRequest> {
        let raw = match self {
            Fields::Properties(props) => props.get(key).map(|s| Value::String(s.clone())),
            Fields::Extras(extras) => extras.get(key).cloned(),
        };
        match raw {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(v) => Ok(Some(v)),
                None => {
                    reject_or_default(strictness, key, format!("{n} is not an integer"), None)
                }
            },
            Some(Value::String(s)) => match s.trim().parse::<i64>() {
                Ok(v) => Ok(Some(v)),
                Err(_) => reject_or_default(
                    strictness,
                    key,
                    format!("{s:?} is not an integer"),
                    None,
                ),
            },
            Some(other) => reject_or_default(
                strictness,
                key,
                format!("expected an integer, found {other}"),
                None,
            ),
        }
    }

    pub(crate) fn port(
        &self,
        key: &str,
        strictness: Strictness,
    ) -> Result<Option<u16>, InvalidRequest> {
        match self.integer(key, strictness)? {
            None => Ok(None),
            Some(v) => match u16::try_from(v) {
                Ok(port) if port > 0 => Ok(Some(port)),
                _ => reject_or_default(strictness, key, format!("{v} is not a valid port"), None),
            },
        }
    }

    pub(crate) fn admin_extras(
        &self,
        strictness: Strictness,
    ) -> Result<BTreeMap<String, String>, InvalidRequest> {
        match self {
            Fields::Properties(props) => {
                let prefix = format!("{}.", keys::ADMIN_EXTRAS);
                Ok(props
                    .iter()
                    .filter_map(|(k, v)| {
                        k.strip_prefix(&prefix)
                            .filter(|name| !name.is_empty())
                            .map(|name| (name.to_string(), v.clone()))
                    })
                    .collect())
            }
            Fields::Extras(extras) => match extras.get(keys::ADMIN_EXTRAS) {
                None | Some(Value::Null) => Ok(BTreeMap::new()),
                Some(Value::Object(map)) => {
                    let mut out = BTreeMap::new();
                    for (name, value) in map {
                        match value {
                            Value::String(s) => {
                                out.insert(name.clone(), s.clone());
                            }
                            other if strictness == Strictness::Permissive => {
                                out.insert(name.clone(), other.to_string());
                            }
                            other => {
                                return Err(InvalidRequest::malformed(format!(
                                    "{}: value of {name} must be a string, found {other}",
                                    keys::ADMIN_EXTRAS
                                )))
                            }
                        }
                    }
                    Ok(out)
                }
                Some(other) => reject_or_default(
                    strictness,
                    keys::ADMIN_EXTRAS,
                    format!("expected an object, found {other}"),
                    BTreeMap::new(),
                ),
            },
        }
    }
}

fn reject_or_default<T>(
    strictness: Strictness,
    key: &str,
    problem: String,
    default: T,
) -> Result<T, InvalidRequest> {
    match strictness {
        Strictness::Strict => Err(InvalidRequest::malformed(format!("{key}: {problem}"))),
        Strictness::Permissive => {
            warn!(key, %problem, "ignoring malformed provisioning field");
            Ok(default)
        }
    }
}

/// Parses a properties-formatted body (`key=value` or `key: value` lines).
pub(crate) fn parse_properties(body: &str) -> BTreeMap<String, String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
        .filter_map(|line| {
            let split_at = line.find(|c: char| c == '=' || c == ':')?;
            let (key, value) = line.split_at(split_at);
            Some((key.trim().to_string(), value[1..].trim().to_string()))
        })
        .collect()
}
