use std::fmt;

use crate::domain::validation::ValidationError;

use phonenumber::country;

fn non_empty_trimmed(
    value: impl Into<String>,
    field: &'static str,
) -> Result<String, ValidationError> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_owned())
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Notify Africa API key, sent as a bearer token.
///
/// Invariant: non-empty after trimming. `Debug` never prints the key.
pub struct ApiKey(String);

impl ApiKey {
    /// Name used in validation errors.
    pub const FIELD: &'static str = "api_key";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(non_empty_trimmed(value, Self::FIELD)?))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS sender id (`sender_id`).
///
/// Invariant: non-empty after trimming. The value must be registered with the provider.
pub struct SenderId(String);

impl SenderId {
    /// JSON field name (`sender_id`).
    pub const FIELD: &'static str = "sender_id";

    /// Create a validated [`SenderId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(non_empty_trimmed(value, Self::FIELD)?))
    }

    /// Borrow the validated sender id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`message`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// JSON field name (`message`).
    pub const FIELD: &'static str = "message";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Provider-assigned message id (`messageId`), used for status lookups.
///
/// Invariant: non-empty after trimming.
pub struct MessageId(String);

impl MessageId {
    /// JSON field name (`messageId`).
    pub const FIELD: &'static str = "messageId";

    /// Create a validated [`MessageId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(non_empty_trimmed(value, Self::FIELD)?))
    }

    /// Borrow the validated message id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Phone number exactly as sent to the provider (`phone_number`).
///
/// Invariant: non-empty after trimming. This type does not normalize; parse into
/// [`PhoneNumber`] and convert it into [`RawPhoneNumber`] for normalized digits.
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// JSON field name (`phone_number`).
    pub const FIELD: &'static str = "phone_number";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(non_empty_trimmed(value, Self::FIELD)?))
    }

    /// Raw (trimmed) value as sent to the provider.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    /// The provider expects international digits without the leading `+`.
    fn from(value: PhoneNumber) -> Self {
        Self(value.international_digits().to_owned())
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// JSON field name (`phone_number`).
    pub const FIELD: &'static str = "phone_number";

    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix,
    /// e.g. `Some(country::Id::TZ)` for local Tanzanian numbers.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation (`+255765432100`).
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// E.164 digits without the `+` (`255765432100`).
    pub fn international_digits(&self) -> &str {
        self.e164.strip_prefix('+').unwrap_or(&self.e164)
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl std::cmp::PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.e164.cmp(&other.e164)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Email address used as sender or recipient.
///
/// Invariant: non-empty after trimming and contains `@`. Deliverability is left to the provider.
pub struct EmailAddress(String);

impl EmailAddress {
    /// Name used in validation errors.
    pub const FIELD: &'static str = "email";

    /// Create a validated [`EmailAddress`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = non_empty_trimmed(value, Self::FIELD)?;
        if !value.contains('@') {
            return Err(ValidationError::InvalidEmailAddress { input: value });
        }
        Ok(Self(value))
    }

    /// Borrow the validated address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
