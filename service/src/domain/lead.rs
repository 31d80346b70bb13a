//! [`Lead`] definitions.

use std::str::FromStr;

use derive_more::{AsRef, Display};
use serde::Serialize;

/// Callback request left by a site visitor.
#[derive(Clone, Debug, Serialize)]
pub struct Lead {
    /// [`Name`] the visitor introduced themselves with.
    pub name: Name,

    /// Contact [`Phone`] of the visitor.
    pub phone: Phone,

    /// Free-form [`Comment`] of the visitor.
    pub comment: Option<Comment>,
}

/// Raw, unvalidated callback form submission.
#[derive(Clone, Debug, Default)]
pub struct Draft {
    /// Name field of the form.
    pub name: String,

    /// Phone field of the form.
    pub phone: String,

    /// Comment field of the form.
    pub comment: String,

    /// Hidden `email_confirm` field of the form.
    ///
    /// Rendered invisible to humans, so anything in here was typed by a
    /// form-stuffing bot.
    pub email_confirm: String,

    /// Hidden `last_name` field of the form.
    ///
    /// Same trap as [`Draft::email_confirm`].
    pub last_name: String,
}

impl Draft {
    /// Indicates whether this [`Draft`] tripped the honeypot fields.
    #[must_use]
    pub fn is_bait(&self) -> bool {
        !self.email_confirm.trim().is_empty()
            || !self.last_name.trim().is_empty()
    }
}

/// Name of a [`Lead`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 128
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Contact phone of a [`Lead`], normalized to bare digits.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
pub struct Phone(String);

impl Phone {
    /// Minimum number of digits in a dialable [`Phone`].
    pub const MIN_DIGITS: usize = 10;

    /// Maximum number of digits in a dialable [`Phone`].
    pub const MAX_DIGITS: usize = 15;

    /// Creates a new [`Phone`] by stripping every non-digit character out of
    /// the given `raw` input.
    ///
    /// Returns [`None`] if the remaining digits don't form a dialable number.
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let digits: String =
            raw.as_ref().chars().filter(char::is_ascii_digit).collect();
        ((Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits.len()))
            .then_some(Self(digits))
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

/// Free-form comment of a [`Lead`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
pub struct Comment(String);

impl Comment {
    /// Creates a new [`Comment`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `comment` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(comment: impl Into<String>) -> Self {
        Self(comment.into())
    }

    /// Creates a new [`Comment`] if the given `comment` is valid.
    #[must_use]
    pub fn new(comment: impl Into<String>) -> Option<Self> {
        let comment = comment.into();
        Self::check(&comment).then_some(Self(comment))
    }

    /// Checks whether the given `comment` is a valid [`Comment`].
    fn check(comment: impl AsRef<str>) -> bool {
        let comment = comment.as_ref();
        !comment.trim().is_empty() && comment.len() <= 2000
    }
}

impl FromStr for Comment {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Comment`")
    }
}

#[cfg(test)]
mod spec {
    use super::{Draft, Phone};

    #[test]
    fn phone_keeps_digits_only() {
        assert_eq!(
            Phone::new("+7 (912) 345-67-89").as_ref().map(AsRef::as_ref),
            Some("79123456789"),
        );
        assert_eq!(
            Phone::new("8-912-345-67-89").as_ref().map(AsRef::as_ref),
            Some("89123456789"),
        );
    }

    #[test]
    fn phone_requires_enough_digits() {
        assert_eq!(Phone::new("123-45-67"), None);
        assert_eq!(Phone::new("not a phone"), None);
        assert_eq!(Phone::new("9".repeat(16)), None);
    }

    #[test]
    fn draft_with_filled_trap_fields_is_bait() {
        let genuine = Draft {
            name: "Иван".into(),
            phone: "+7 912 345-67-89".into(),
            ..Draft::default()
        };
        assert!(!genuine.is_bait());

        let bot = Draft {
            email_confirm: "ivan@example.com".into(),
            ..genuine.clone()
        };
        assert!(bot.is_bait());

        let bot = Draft { last_name: "Ivanov".into(), ..genuine };
        assert!(bot.is_bait());
    }
}
