use std::fmt;

use crate::domain::validation::ValidationError;

fn non_blank(value: impl Into<String>, field: &'static str) -> Result<String, ValidationError> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_owned())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Nuntium account name.
///
/// Invariant: non-empty after trimming.
pub struct AccountName(String);

impl AccountName {
    pub const FIELD: &'static str = "account";

    /// Create a validated [`AccountName`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        non_blank(value, Self::FIELD).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Nuntium application name (scoped to an account).
///
/// Invariant: non-empty after trimming.
pub struct ApplicationName(String);

impl ApplicationName {
    pub const FIELD: &'static str = "application";

    /// Create a validated [`ApplicationName`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        non_blank(value, Self::FIELD).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Application password used for HTTP basic auth.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Channel name. Unique per account and chosen by the caller.
///
/// Invariant: non-empty after trimming.
pub struct ChannelName(String);

impl ChannelName {
    pub const FIELD: &'static str = "name";

    /// Create a validated [`ChannelName`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        non_blank(value, Self::FIELD).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// ISO 3166 alpha-2 or alpha-3 country code (`ar`, `arg`).
///
/// Invariant: non-empty after trimming. The server resolves either form.
pub struct CountryIso(String);

impl CountryIso {
    pub const FIELD: &'static str = "iso";

    /// Create a validated [`CountryIso`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        non_blank(value, Self::FIELD).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Carrier GUID assigned by Nuntium.
///
/// Invariant: non-empty after trimming.
pub struct CarrierGuid(String);

impl CarrierGuid {
    pub const FIELD: &'static str = "guid";

    /// Create a validated [`CarrierGuid`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        non_blank(value, Self::FIELD).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Message address in Nuntium's `protocol://value` form, e.g. `sms://5551234`.
///
/// Invariant: non-empty after trimming. The protocol prefix is not checked.
pub struct Address(String);

impl Address {
    pub const FIELD: &'static str = "address";

    /// Create a validated [`Address`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        non_blank(value, Self::FIELD).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Protocol part before `://`, if present.
    pub fn protocol(&self) -> Option<&str> {
        self.0.split_once("://").map(|(protocol, _)| protocol)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Correlation token for AO messages.
///
/// Supplied by the caller or generated by the server and echoed back in
/// the `x-nuntium-token` header.
pub struct AoToken(String);

impl AoToken {
    pub const FIELD: &'static str = "token";

    /// Create a validated [`AoToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        non_blank(value, Self::FIELD).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
