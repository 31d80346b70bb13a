//! News read models.

use common::{unit, DateTimeOf, Slug};
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

/// ID of a news [`Article`].
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

/// News feed card.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Article {
    /// ID of this [`Article`].
    pub id: Id,

    /// URL [`Slug`] of this [`Article`].
    pub slug: Slug,

    /// Title of this [`Article`].
    pub title: String,

    /// Short teaser of this [`Article`].
    #[serde(default)]
    pub excerpt: Option<String>,

    /// When this [`Article`] was published.
    #[serde(with = "common::datetime::serde::iso8601")]
    pub published_at: PublicationDateTime,
}

/// Full news article payload.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Detail {
    /// ID of this article.
    pub id: Id,

    /// URL [`Slug`] of this article.
    pub slug: Slug,

    /// Title of this article.
    pub title: String,

    /// Rendered body of this article.
    pub body: String,

    /// When this article was published.
    #[serde(with = "common::datetime::serde::iso8601")]
    pub published_at: PublicationDateTime,
}

/// [`common::DateTime`] of an [`Article`] publication.
pub type PublicationDateTime = DateTimeOf<(Article, unit::Publication)>;

pub mod list {
    //! News feed list definitions.

    use common::pagination;

    /// Page of news [`Article`]s.
    ///
    /// [`Article`]: super::Article
    pub type Page = pagination::Page<super::Article>;

    /// Page size of the news feed.
    pub const DEFAULT_SIZE: u32 = 10;

    /// Selector of a news feed page.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct Selector {
        /// Pagination arguments.
        pub page: pagination::Arguments,
    }
}
