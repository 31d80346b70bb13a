//! [`Slug`]-related definitions.

use std::str::FromStr;

use derive_more::{AsRef, Display, Into};

/// URL-safe identifier derived from a name.
///
/// Consists of lowercase ASCII letters, digits and inner hyphens, the exact
/// alphabet the backend's slugifier emits. Never empty, never starts or ends
/// with a hyphen.
#[derive(
    AsRef, Clone, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
#[as_ref(forward)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(into = "String", try_from = "String")
)]
pub struct Slug(String);

impl Slug {
    /// Creates a new [`Slug`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `value` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Creates a new [`Slug`] if the given `value` is valid.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        Self::check(&value).then_some(Self(value))
    }

    /// Checks whether the given `value` is a valid [`Slug`].
    fn check(value: impl AsRef<str>) -> bool {
        let value = value.as_ref();
        !value.is_empty()
            && !value.starts_with('-')
            && !value.ends_with('-')
            && value.chars().all(|c| {
                c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'
            })
    }
}

impl TryFrom<String> for Slug {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value).ok_or("invalid `Slug`")
    }
}

impl FromStr for Slug {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Slug`")
    }
}

#[cfg(test)]
mod spec {
    use super::Slug;

    #[test]
    fn accepts_slugified_names() {
        assert!(Slug::new("zelenogradsk").is_some());
        assert!(Slug::new("bolshoe-isakovo").is_some());
        assert!(Slug::new("uchastok-39").is_some());
    }

    #[test]
    fn rejects_foreign_alphabets_and_shapes() {
        assert!(Slug::new("").is_none());
        assert!(Slug::new("-leading").is_none());
        assert!(Slug::new("trailing-").is_none());
        assert!(Slug::new("Upper").is_none());
        assert!(Slug::new("under_score").is_none());
        assert!(Slug::new("пос-янтарный").is_none());
        assert!(Slug::new("with space").is_none());
    }
}
