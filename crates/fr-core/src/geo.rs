//! Geographic coordinate type and great-circle distance.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Edge weights are rounded to
//! centi-kilometre precision downstream, so single precision would leak
//! visible error into stored weights at continental scale.

use std::fmt;

use crate::{CoreError, CoreResult};

/// Mean Earth radius used by the haversine formula, kilometres.
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// A WGS-84 geographic coordinate in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in kilometres.
    ///
    /// Inputs are not range-checked: out-of-range degrees still produce a
    /// finite (if physically meaningless) number.  Call [`validate`] first
    /// when the point comes from an untrusted source.
    ///
    /// [`validate`]: GeoPoint::validate
    pub fn distance_km(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }

    /// `true` if both components are finite and inside
    /// `[-90, 90] × [-180, 180]`.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Return `self` unchanged if [`is_valid`](Self::is_valid), else
    /// [`CoreError::InvalidCoordinate`].
    pub fn validate(self) -> CoreResult<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(CoreError::InvalidCoordinate { lat: self.lat, lon: self.lon })
        }
    }

    /// Return `self` unchanged if both components are finite, else
    /// [`CoreError::InvalidCoordinate`].  Out-of-range degrees are accepted.
    pub fn require_finite(self) -> CoreResult<Self> {
        if self.lat.is_finite() && self.lon.is_finite() {
            Ok(self)
        } else {
            Err(CoreError::InvalidCoordinate { lat: self.lat, lon: self.lon })
        }
    }

    /// Build a point from optional raw components, as delivered by a query
    /// string.  Missing components are an [`CoreError::InvalidCoordinate`]
    /// carrying `NaN` in the missing slot.
    pub fn from_raw(lat: Option<f64>, lon: Option<f64>) -> CoreResult<Self> {
        match (lat, lon) {
            (Some(lat), Some(lon)) => GeoPoint::new(lat, lon).validate(),
            (lat, lon) => Err(CoreError::InvalidCoordinate {
                lat: lat.unwrap_or(f64::NAN),
                lon: lon.unwrap_or(f64::NAN),
            }),
        }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

impl From<(f64, f64)> for GeoPoint {
    #[inline]
    fn from((lat, lon): (f64, f64)) -> Self {
        GeoPoint::new(lat, lon)
    }
}

/// Free-function form of [`GeoPoint::distance_km`].
#[inline]
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    a.distance_km(b)
}

/// Round `value` to `decimals` fractional digits, half away from zero.
///
/// Infinities and `NaN` pass through unchanged.
#[inline]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}
