//! Listing definitions.

use std::sync::LazyLock;

use common::define_kind;
use derive_more::{AsRef, Display, From, FromStr, Into};
use regex::Regex;
use serde::{Deserialize, Serialize};

define_kind! {
    #[doc = "Sale state of the land plot behind a listing."]
    enum Status {
        #[doc = "Plot is on sale."]
        Active,

        #[doc = "Plot has been sold."]
        Sold,

        #[doc = "Plot is reserved by a buyer."]
        Reserved,
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Active
    }
}

/// ID of a listing.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(i64);

/// ID of a land use category (ИЖС, СНТ, ЛПХ and the like).
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct LandUseId(i64);

/// Cadastral number of the land plot behind a listing.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(into = "String", try_from = "String")]
pub struct CadastralNumber(String);

impl CadastralNumber {
    /// Creates a new [`CadastralNumber`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `num` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(num: impl Into<String>) -> Self {
        Self(num.into())
    }

    /// Creates a new [`CadastralNumber`] if the given `num` is valid.
    #[must_use]
    pub fn new(num: impl Into<String>) -> Option<Self> {
        let num = num.into();
        Self::check(&num).then_some(Self(num))
    }

    /// Checks whether the given `num` is a valid [`CadastralNumber`].
    fn check(num: impl AsRef<str>) -> bool {
        /// Regular expression checking the `district:quarter:block:plot`
        /// cadastral number format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^\d{2}:\d{2}:\d{6,7}:\d+$").expect("valid regex")
        });

        REGEX.is_match(num.as_ref())
    }
}

impl From<CadastralNumber> for String {
    fn from(num: CadastralNumber) -> Self {
        num.0
    }
}

impl TryFrom<String> for CadastralNumber {
    type Error = &'static str;

    fn try_from(num: String) -> Result<Self, Self::Error> {
        num.parse()
    }
}

impl FromStr for CadastralNumber {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `CadastralNumber`")
    }
}

#[cfg(test)]
mod cadastral_number_spec {
    use super::CadastralNumber;

    #[test]
    fn accepts_real_world_numbers() {
        for num in ["39:05:010203:123", "39:15:1234567:4"] {
            assert!(CadastralNumber::new(num).is_some(), "rejected: {num}");
        }
    }

    #[test]
    fn rejects_malformed_numbers() {
        for num in [
            "",
            "39:05:010203",
            "39-05-010203-123",
            "3:05:010203:123",
            "39:05:01020:123",
            "39:05:010203:123а",
        ] {
            assert!(CadastralNumber::new(num).is_none(), "accepted: {num}");
        }
    }
}
