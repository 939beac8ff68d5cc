//! Binding policies and binding outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The single request origin a handler's value is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingPolicy {
    /// JSON request body.
    Body,
    /// Query-string key/value pairs.
    QueryString,
    /// Route (path) parameters.
    RouteValues,
    /// Reserved. Not implemented.
    Form,
    /// Reserved. Behavior not defined yet.
    TryAll,
    /// No explicit choice; resolves to `Body`.
    #[default]
    Unspecified,
}

impl BindingPolicy {
    /// The origin actually consulted for this policy.
    pub fn resolve(self) -> Self {
        match self {
            BindingPolicy::Unspecified => BindingPolicy::Body,
            other => other,
        }
    }

    /// Whether the binder has an implementation for this policy.
    pub fn is_supported(self) -> bool {
        !matches!(self, BindingPolicy::Form | BindingPolicy::TryAll)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BindingPolicy::Body => "body",
            BindingPolicy::QueryString => "query_string",
            BindingPolicy::RouteValues => "route_values",
            BindingPolicy::Form => "form",
            BindingPolicy::TryAll => "try_all",
            BindingPolicy::Unspecified => "unspecified",
        }
    }
}

impl fmt::Display for BindingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of reading one origin.
///
/// `NotBound` means the origin simply held nothing for the shape; it is
/// the dispatcher, not the binder, that decides whether that is acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding<T> {
    Bound(T),
    NotBound,
}

impl<T> Binding<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Binding<U> {
        match self {
            Binding::Bound(value) => Binding::Bound(f(value)),
            Binding::NotBound => Binding::NotBound,
        }
    }
}

impl<T> From<Option<T>> for Binding<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Binding::NotBound, Binding::Bound)
    }
}
