//! Abstractions for page-based pagination.

/// Arguments selecting one page of a list.
///
/// Always well-formed: the page number is 1-based and the size is clamped
/// into `1..=`[`MAX_SIZE`], so a handler can pass user input here untouched.
///
/// [`MAX_SIZE`]: Arguments::MAX_SIZE
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Arguments {
    /// 1-based page number.
    page: u32,

    /// Number of items per page.
    size: u32,
}

impl Arguments {
    /// Maximum allowed page size.
    pub const MAX_SIZE: u32 = 100;

    /// Creates new [`Arguments`] from optional user input, falling back to
    /// the first page of the provided `default_size`.
    #[must_use]
    pub fn new(
        page: Option<u32>,
        size: Option<u32>,
        default_size: u32,
    ) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            size: size.unwrap_or(default_size).clamp(1, Self::MAX_SIZE),
        }
    }

    /// Returns the 1-based page number of these [`Arguments`].
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size of these [`Arguments`].
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }
}

/// One page of items along with the list totals.
///
/// Mirrors the envelope the catalog API wraps every list response in.
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize)
)]
pub struct Page<I> {
    /// Items of this [`Page`].
    pub items: Vec<I>,

    /// Total number of items across all pages.
    pub total: u64,

    /// 1-based number of this [`Page`].
    pub page: u32,

    /// Size this [`Page`] was selected with.
    pub size: u32,

    /// Total number of pages, at least `1` even for an empty list.
    pub pages: u32,
}

impl<I> Page<I> {
    /// Creates a new [`Page`] from the provided items and their overall
    /// total.
    #[must_use]
    pub fn new(args: &Arguments, items: Vec<I>, total: u64) -> Self {
        Self {
            items,
            total,
            page: args.page(),
            size: args.size(),
            pages: u32::try_from(total.div_ceil(u64::from(args.size())))
                .unwrap_or(u32::MAX)
                .max(1),
        }
    }

    /// Indicates whether this [`Page`] is the last one.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.page >= self.pages
    }
}

#[cfg(test)]
mod spec {
    use super::{Arguments, Page};

    #[test]
    fn arguments_clamp_user_input() {
        let args = Arguments::new(None, None, 12);
        assert_eq!((args.page(), args.size()), (1, 12));

        let args = Arguments::new(Some(0), Some(0), 12);
        assert_eq!((args.page(), args.size()), (1, 1));

        let args = Arguments::new(Some(3), Some(500), 12);
        assert_eq!((args.page(), args.size()), (3, 100));
    }

    #[test]
    fn page_count_is_ceiling_and_never_zero() {
        let args = Arguments::new(Some(1), Some(12), 12);

        let page = Page::new(&args, Vec::<u8>::new(), 0);
        assert_eq!(page.pages, 1);
        assert!(page.is_last());

        let page = Page::new(&args, vec![0_u8; 12], 25);
        assert_eq!(page.pages, 3);
        assert!(!page.is_last());

        let page = Page::new(&args, vec![0_u8; 12], 24);
        assert_eq!(page.pages, 2);
    }
}
