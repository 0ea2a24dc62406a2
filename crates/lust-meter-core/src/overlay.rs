//! Decorative sparkle overlay.
//!
//! Purely ornamental: a fixed list of sparkle markers drawn on top of the
//! session view. It has no state and no link to the session.

use std::time::Duration;

use serde::Serialize;

/// Distance from an edge of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Offset {
    /// Absolute distance in rem.
    Rem(f32),
    /// Fraction of the overlay size, in percent.
    Percent(f32),
}

/// Vertical anchor of a marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Vertical {
    /// Measured from the top edge.
    Top(Offset),
    /// Measured from the bottom edge.
    Bottom(Offset),
}

/// Horizontal anchor of a marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Horizontal {
    /// Measured from the left edge.
    Left(Offset),
    /// Measured from the right edge.
    Right(Offset),
}

/// Theme color of a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Accent,
    Primary,
    Secondary,
}

/// One ornamental marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SparkleMarker {
    pub vertical: Vertical,
    pub horizontal: Horizontal,
    /// Edge length in rem.
    pub size: f32,
    pub tone: Tone,
    /// Opacity, 0.0 to 1.0.
    pub opacity: f32,
    /// Animation start offset.
    #[serde(rename = "delay_ms", serialize_with = "serialize_millis")]
    pub delay: Duration,
}

const fn marker(
    vertical: Vertical,
    horizontal: Horizontal,
    size: f32,
    tone: Tone,
    opacity: f32,
    delay_ms: u64,
) -> SparkleMarker {
    SparkleMarker {
        vertical,
        horizontal,
        size,
        tone,
        opacity,
        delay: Duration::from_millis(delay_ms),
    }
}

const MARKERS: [SparkleMarker; 6] = [
    marker(
        Vertical::Top(Offset::Rem(1.0)),
        Horizontal::Left(Offset::Rem(1.0)),
        1.0,
        Tone::Accent,
        0.7,
        0,
    ),
    marker(
        Vertical::Top(Offset::Rem(3.0)),
        Horizontal::Right(Offset::Rem(2.0)),
        0.75,
        Tone::Primary,
        0.5,
        500,
    ),
    marker(
        Vertical::Bottom(Offset::Rem(4.0)),
        Horizontal::Left(Offset::Rem(3.0)),
        1.25,
        Tone::Secondary,
        0.6,
        1000,
    ),
    marker(
        Vertical::Bottom(Offset::Rem(2.0)),
        Horizontal::Right(Offset::Rem(1.0)),
        0.75,
        Tone::Accent,
        0.4,
        1500,
    ),
    marker(
        Vertical::Top(Offset::Percent(50.0)),
        Horizontal::Left(Offset::Percent(25.0)),
        1.0,
        Tone::Primary,
        0.3,
        800,
    ),
    marker(
        Vertical::Top(Offset::Percent(100.0 / 3.0)),
        Horizontal::Right(Offset::Percent(100.0 / 3.0)),
        0.75,
        Tone::Secondary,
        0.5,
        1200,
    ),
];

/// The sparkle overlay layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecorativeOverlay;

impl DecorativeOverlay {
    /// Returns the markers in drawing order.
    pub fn markers(self) -> impl Iterator<Item = SparkleMarker> {
        MARKERS.into_iter()
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_millis<S: serde::Serializer>(
    delay: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(delay.as_millis()).unwrap_or(u64::MAX))
}
