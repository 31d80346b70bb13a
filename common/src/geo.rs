//! Geographic primitives.

use std::{fmt, str::FromStr};

use derive_more::{Display, From, Into};

/// Geographic point in WGS 84 degrees, latitude first.
#[derive(Clone, Copy, Debug, Display, From, Into, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(from = "(f64, f64)", into = "(f64, f64)")
)]
#[display("{lat}, {lon}")]
pub struct Point {
    /// Latitude of this [`Point`].
    pub lat: f64,

    /// Longitude of this [`Point`].
    pub lon: f64,
}

/// Geographic bounding box of a map viewport, in WGS 84 degrees.
///
/// Always well-formed: `north > south`, `east > west`, latitudes within
/// ±90°, longitudes within ±180°. Boxes crossing the antimeridian are not
/// representable.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "raw::Bounds")
)]
pub struct Bounds {
    /// Northern edge latitude.
    north: f64,

    /// Southern edge latitude.
    south: f64,

    /// Eastern edge longitude.
    east: f64,

    /// Western edge longitude.
    west: f64,
}

impl Bounds {
    /// Creates new [`Bounds`] by checking the provided edges form a valid
    /// box.
    #[must_use]
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Option<Self> {
        Self::check(north, south, east, west).then(|| {
            #[expect(
                clippy::allow_attributes,
                reason = "TODO: Remove once clippy is fixed"
            )]
            #[allow(unsafe_code, reason = "invariants checked already")]
            unsafe {
                Self::new_unchecked(north, south, east, west)
            }
        })
    }

    /// Creates new [`Bounds`] without performing any validation.
    ///
    /// # Safety
    ///
    /// The provided edges must satisfy `north > south`, `east > west`, and
    /// lie within valid degree ranges.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(
        north: f64,
        south: f64,
        east: f64,
        west: f64,
    ) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    /// Checks whether the provided edges form valid [`Bounds`].
    fn check(north: f64, south: f64, east: f64, west: f64) -> bool {
        north > south
            && east > west
            && (-90.0..=90.0).contains(&south)
            && (-90.0..=90.0).contains(&north)
            && (-180.0..=180.0).contains(&west)
            && (-180.0..=180.0).contains(&east)
    }

    /// Northern edge latitude of these [`Bounds`].
    #[must_use]
    pub fn north(&self) -> f64 {
        self.north
    }

    /// Southern edge latitude of these [`Bounds`].
    #[must_use]
    pub fn south(&self) -> f64 {
        self.south
    }

    /// Eastern edge longitude of these [`Bounds`].
    #[must_use]
    pub fn east(&self) -> f64 {
        self.east
    }

    /// Western edge longitude of these [`Bounds`].
    #[must_use]
    pub fn west(&self) -> f64 {
        self.west
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            north,
            south,
            east,
            west,
        } = self;
        write!(f, "{south}..{north}, {west}..{east}")
    }
}

#[cfg(feature = "serde")]
mod raw {
    //! Raw representations validated on deserialization.

    /// Unvalidated [`Bounds`](super::Bounds) edges.
    #[derive(serde::Deserialize)]
    pub(super) struct Bounds {
        /// Northern edge latitude.
        pub(super) north: f64,

        /// Southern edge latitude.
        pub(super) south: f64,

        /// Eastern edge longitude.
        pub(super) east: f64,

        /// Western edge longitude.
        pub(super) west: f64,
    }
}

#[cfg(feature = "serde")]
impl TryFrom<raw::Bounds> for Bounds {
    type Error = &'static str;

    fn try_from(raw: raw::Bounds) -> Result<Self, Self::Error> {
        Self::new(raw.north, raw.south, raw.east, raw.west)
            .ok_or("invalid bounds")
    }
}

/// Map zoom level.
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(into = "u8", try_from = "u8")
)]
pub struct Zoom(u8);

impl Zoom {
    /// Minimum possible [`Zoom`] level.
    pub const MIN: Self = Self(1);

    /// Maximum possible [`Zoom`] level.
    pub const MAX: Self = Self(20);

    /// [`Zoom`] level below which a viewport is represented by clusters
    /// rather than individual plot polygons.
    pub const CLUSTERING_THRESHOLD: Self = Self(13);

    /// Creates a new [`Zoom`] by checking the provided level is within the
    /// [`MIN`]..=[`MAX`] range.
    ///
    /// [`MIN`]: Self::MIN
    /// [`MAX`]: Self::MAX
    #[must_use]
    pub fn new(level: u8) -> Option<Self> {
        ((Self::MIN.0..=Self::MAX.0).contains(&level)).then_some(Self(level))
    }

    /// Creates a new [`Zoom`] without performing any validation.
    ///
    /// # Safety
    ///
    /// The provided level must be within the [`MIN`]..=[`MAX`] range.
    ///
    /// [`MIN`]: Self::MIN
    /// [`MAX`]: Self::MAX
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(level: u8) -> Self {
        Self(level)
    }

    /// Returns the [`Representation`] plots take at this [`Zoom`] level.
    #[must_use]
    pub fn representation(self) -> Representation {
        if self < Self::CLUSTERING_THRESHOLD {
            Representation::Clusters
        } else {
            Representation::Plots
        }
    }
}

impl TryFrom<u8> for Zoom {
    type Error = &'static str;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level).ok_or("zoom level out of range")
    }
}

impl FromStr for Zoom {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u8>()
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `Zoom`")
    }
}

/// Way plots inside a viewport are represented at some [`Zoom`] level.
///
/// Strictly either/or: a viewport never renders clusters and individual
/// polygons at the same time.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Representation {
    /// Aggregated cluster markers.
    Clusters,

    /// Individual plot polygons.
    Plots,
}

#[cfg(test)]
mod spec {
    use super::{Bounds, Representation, Zoom};

    #[test]
    fn bounds_require_ordered_edges() {
        assert!(Bounds::new(54.8, 54.6, 20.6, 20.3).is_some());
        assert!(Bounds::new(54.6, 54.8, 20.6, 20.3).is_none());
        assert!(Bounds::new(54.8, 54.6, 20.3, 20.6).is_none());
        assert!(Bounds::new(54.8, 54.8, 20.6, 20.3).is_none());
    }

    #[test]
    fn bounds_require_degree_ranges() {
        assert!(Bounds::new(91.0, 54.6, 20.6, 20.3).is_none());
        assert!(Bounds::new(54.8, -91.0, 20.6, 20.3).is_none());
        assert!(Bounds::new(54.8, 54.6, 180.5, 20.3).is_none());
        assert!(Bounds::new(54.8, 54.6, 20.6, -180.5).is_none());
        assert!(Bounds::new(90.0, -90.0, 180.0, -180.0).is_some());
    }

    #[test]
    fn zoom_is_range_checked() {
        assert!(Zoom::new(0).is_none());
        assert!(Zoom::new(1).is_some());
        assert!(Zoom::new(20).is_some());
        assert!(Zoom::new(21).is_none());
    }

    #[test]
    fn representation_switches_at_threshold() {
        assert_eq!(
            Zoom::new(12).unwrap().representation(),
            Representation::Clusters,
        );
        assert_eq!(
            Zoom::new(13).unwrap().representation(),
            Representation::Plots,
        );
        assert_eq!(Zoom::MIN.representation(), Representation::Clusters);
        assert_eq!(Zoom::MAX.representation(), Representation::Plots);
    }

    #[test]
    fn zoom_from_str() {
        assert_eq!("12".parse::<Zoom>().unwrap(), Zoom::new(12).unwrap());
        assert!("0".parse::<Zoom>().is_err());
        assert!("25".parse::<Zoom>().is_err());
        assert!("abc".parse::<Zoom>().is_err());
    }
}
