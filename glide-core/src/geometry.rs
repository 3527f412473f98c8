//! Bearing and turn geometry over WGS84 coordinates.
//!
//! Bearings are compass degrees: north is 0, east is 90. Turn angles are
//! signed, with positive values turning right and negative values turning
//! left, normalised into `(-180.0, 180.0]`.

use geo::{Bearing, Coord, Haversine, Point};

use crate::config::DrivingSide;

/// Turns within this cone of the incoming bearing count as straight on.
const STRAIGHT_CONE_DEG: f64 = 30.0;

/// Turns beyond this angle cut across a junction rather than merging with
/// it.
const SHARP_TURN_DEG: f64 = 60.0;

/// Initial great-circle bearing from `from` towards `to`, in degrees.
#[must_use]
pub fn initial_bearing(from: Coord<f64>, to: Coord<f64>) -> f64 {
    Haversine.bearing(Point::from(from), Point::from(to))
}

/// Bearing at which an arc leaves its tail node.
///
/// Uses the first segment of the polyline when one is present, otherwise
/// treats the arc as the straight line between its endpoints.
#[must_use]
pub fn departure_bearing(from: Coord<f64>, to: Coord<f64>, polyline: &[Coord<f64>]) -> f64 {
    match (polyline.first(), polyline.get(1)) {
        (Some(&first), Some(&second)) => initial_bearing(first, second),
        _ => initial_bearing(from, to),
    }
}

/// Bearing at which an arc arrives at its head node.
///
/// Uses the last segment of the polyline when one is present, otherwise
/// treats the arc as the straight line between its endpoints.
#[must_use]
pub fn arrival_bearing(from: Coord<f64>, to: Coord<f64>, polyline: &[Coord<f64>]) -> f64 {
    let mut tail = polyline.iter().rev();
    match (tail.next(), tail.next()) {
        (Some(&last), Some(&before_last)) => initial_bearing(before_last, last),
        _ => initial_bearing(from, to),
    }
}

/// Signed change of direction between two bearings, in `(-180.0, 180.0]`.
///
/// Positive is a right turn, negative a left turn.
#[must_use]
pub fn signed_turn_angle(inbound: f64, outbound: f64) -> f64 {
    let delta = (outbound - inbound).rem_euclid(360.0);
    if delta > 180.0 { delta - 360.0 } else { delta }
}

/// How a junction is negotiated, seen from the traversing vehicle.
///
/// A kerb-side turn stays on the near side of the carriageway; a
/// cross-traffic turn cuts through the opposing stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnKind {
    /// Continuing within the straight-on cone.
    Straight,
    /// A shallow turn towards the kerb side.
    GentleKerbSide,
    /// A full turn towards the kerb side.
    SharpKerbSide,
    /// A shallow turn across the opposing stream.
    GentleCrossTraffic,
    /// A full turn across the opposing stream.
    SharpCrossTraffic,
}

impl TurnKind {
    /// Classify the turn from `inbound` to `outbound` bearing under the
    /// given driving side.
    #[must_use]
    pub fn classify(inbound: f64, outbound: f64, side: DrivingSide) -> Self {
        let angle = signed_turn_angle(inbound, outbound);
        if angle.abs() <= STRAIGHT_CONE_DEG {
            return Self::Straight;
        }
        let towards_kerb = match side {
            DrivingSide::Left => angle < 0.0,
            DrivingSide::Right => angle > 0.0,
        };
        match (angle.abs() > SHARP_TURN_DEG, towards_kerb) {
            (false, true) => Self::GentleKerbSide,
            (true, true) => Self::SharpKerbSide,
            (false, false) => Self::GentleCrossTraffic,
            (true, false) => Self::SharpCrossTraffic,
        }
    }
}
