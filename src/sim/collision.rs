//! Knife-on-knife collision by angle
//!
//! A knife always arrives at the bottom of the target. Each stuck knife
//! remembers the target angle at the moment it landed (its anchor), so a new
//! knife collides when the target has turned back to within the threshold of
//! an anchor.

use crate::normalize_degrees;

/// Signed minimal rotation (degrees) that takes `from` to `to`, in [-180, 180]
#[inline]
pub fn shortest_between(from: f32, to: f32) -> f32 {
    normalize_degrees(to - from)
}

/// Whether a knife landing at `target_angle` hits any anchored knife
pub fn is_hit<I>(target_angle: f32, anchors: I, threshold: f32) -> bool
where
    I: IntoIterator<Item = f32>,
{
    anchors
        .into_iter()
        .any(|anchor| shortest_between(target_angle, anchor).abs() < threshold)
}

/// Smallest angular gap (degrees) between `target_angle` and any anchor
///
/// Returns `None` when nothing is anchored yet.
pub fn nearest_gap<I>(target_angle: f32, anchors: I) -> Option<f32>
where
    I: IntoIterator<Item = f32>,
{
    anchors
        .into_iter()
        .map(|anchor| shortest_between(target_angle, anchor).abs())
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
}
