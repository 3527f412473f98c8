//! Criterion weights and thresholds.
//!
//! A [`CriterionConfig`] is the fully resolved output of an external filter
//! collaborator: one weight per criterion plus the thresholds the evaluators
//! compare against. The engine treats it as immutable and never fills in
//! missing pieces, so [`CriterionConfig::validate`] should be called once
//! before scoring begins.
//!
//! All types serialise to and from JSON behind the `serde` feature so named
//! presets can be stored outside the engine.

use std::collections::HashMap;

use thiserror::Error;

use crate::graph::RoadClass;

/// Steepest climb accepted before a route is disqualified, as a grade
/// fraction.
pub const DEFAULT_MAX_UPHILL_GRADE: f64 = 0.05;

/// Steepest descent accepted before a route is disqualified, as a grade
/// fraction.
pub const DEFAULT_MAX_DOWNHILL_GRADE: f64 = 0.05;

/// Descent grade that scores highest; steeper descents decay back towards
/// zero until they hit [`DEFAULT_MAX_DOWNHILL_GRADE`].
pub const DEFAULT_DOWNHILL_SWEET_SPOT: f64 = 0.03;

/// Two-way carriageways narrower than this count as narrow, in metres.
pub const DEFAULT_NARROW_WIDTH_M: f64 = 4.0;

/// Which side of the road traffic drives on.
///
/// Turn ergonomics depend on this: a turn towards the kerb side never
/// crosses the opposing stream, so it is preferred at uncontrolled
/// junctions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DrivingSide {
    /// Left-hand traffic.
    #[default]
    Left,
    /// Right-hand traffic.
    Right,
}

/// Errors returned by [`CriterionConfig::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The desired distance was not a positive finite number.
    #[error("desired distance must be positive and finite, got {value}")]
    InvalidDesiredDistance {
        /// The offending value in metres.
        value: f64,
    },
    /// The tolerance band fell outside `0 < tolerance < desired`.
    #[error("distance tolerance must satisfy 0 < tolerance < desired distance, got {value}")]
    InvalidDistanceTolerance {
        /// The offending value in metres.
        value: f64,
    },
    /// A grade threshold was not a positive finite fraction.
    #[error("{name} must be a positive finite grade fraction, got {value}")]
    InvalidGrade {
        /// Which threshold was rejected.
        name: &'static str,
        /// The offending value.
        value: f64,
    },
    /// The downhill sweet spot reached or exceeded the downhill limit.
    #[error("downhill sweet spot {sweet_spot} must be below the maximum downhill grade {max}")]
    SweetSpotAboveMax {
        /// Configured sweet-spot grade.
        sweet_spot: f64,
        /// Configured maximum downhill grade.
        max: f64,
    },
    /// The narrow-width threshold was not a positive finite number.
    #[error("narrow width threshold must be positive and finite, got {value}")]
    InvalidNarrowWidth {
        /// The offending value in metres.
        value: f64,
    },
    /// A criterion weight was negative, infinite, or NaN.
    #[error("weight for criterion '{name}' must be finite and non-negative, got {value}")]
    InvalidWeight {
        /// Name of the affected criterion.
        name: &'static str,
        /// The offending value.
        value: f64,
    },
    /// A preference value fell outside the normalised range.
    #[error("preference values must lie in 0.0..=1.0, got {value}")]
    PreferenceOutOfRange {
        /// The offending value.
        value: f64,
    },
}

/// One weight per criterion; zero disables a criterion entirely.
///
/// A disabled criterion is skipped by the engine: it contributes no score,
/// cannot disqualify a route, and its graph attributes are never read.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CriterionWeights {
    /// Closeness to the desired distance.
    pub distance: f64,
    /// Road classification preference.
    pub road_type: f64,
    /// Number of junctions traversed.
    pub junction_count: f64,
    /// Junction complexity per kilometre.
    pub junction_complexity: f64,
    /// Turn ergonomics at junctions.
    pub turn_quality: f64,
    /// Climb steepness.
    pub uphill: f64,
    /// Descent steepness.
    pub downhill: f64,
    /// Lane count preference.
    pub lane_count: f64,
    /// One-way share of the route.
    pub one_way: f64,
    /// Narrow two-way share of the route.
    pub narrow_two_way: f64,
    /// Signals at the foot of descents.
    pub downhill_signals: f64,
}

impl Default for CriterionWeights {
    fn default() -> Self {
        Self {
            distance: 1.0,
            road_type: 1.0,
            junction_count: 1.0,
            junction_complexity: 1.0,
            turn_quality: 1.0,
            uphill: 1.0,
            downhill: 1.0,
            lane_count: 1.0,
            one_way: 1.0,
            narrow_two_way: 1.0,
            downhill_signals: 1.0,
        }
    }
}

impl CriterionWeights {
    /// All weights paired with their criterion names, for validation and
    /// reporting.
    #[must_use]
    pub fn named(&self) -> [(&'static str, f64); 11] {
        [
            ("distance", self.distance),
            ("road-type", self.road_type),
            ("junction-count", self.junction_count),
            ("junction-complexity", self.junction_complexity),
            ("turn-quality", self.turn_quality),
            ("uphill", self.uphill),
            ("downhill", self.downhill),
            ("lane-count", self.lane_count),
            ("one-way", self.one_way),
            ("narrow-two-way", self.narrow_two_way),
            ("downhill-signals", self.downhill_signals),
        ]
    }
}

/// Per-road-class preference values in `0.0..=1.0`.
///
/// Classes missing from the table fall back to a neutral default so exotic
/// classifications never fail a lookup.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadPreferences {
    table: HashMap<RoadClass, f64>,
    fallback: f64,
}

impl Default for RoadPreferences {
    /// Quiet streets and primary distributors preferred, shared-use and
    /// pedestrian surfaces avoided.
    fn default() -> Self {
        let table = HashMap::from([
            (RoadClass::Primary, 1.0),
            (RoadClass::Residential, 1.0),
            (RoadClass::Trunk, 2.0 / 3.0),
            (RoadClass::Cycleway, 1.0 / 3.0),
            (RoadClass::Pedestrian, 1.0 / 3.0),
            (RoadClass::Footway, 1.0 / 3.0),
        ]);
        Self {
            table,
            fallback: 0.5,
        }
    }
}

impl RoadPreferences {
    /// The preference for `class`, or the fallback when unlisted.
    #[must_use]
    pub fn preference(&self, class: RoadClass) -> f64 {
        self.table.get(&class).copied().unwrap_or(self.fallback)
    }

    /// Override the preference for one class while consuming `self`.
    #[must_use]
    pub fn with_preference(mut self, class: RoadClass, value: f64) -> Self {
        self.table.insert(class, value);
        self
    }

    /// Override the fallback for unlisted classes while consuming `self`.
    #[must_use]
    pub fn with_fallback(mut self, value: f64) -> Self {
        self.fallback = value;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.table
            .values()
            .chain(std::iter::once(&self.fallback))
            .try_for_each(|&value| check_preference(value))
    }
}

/// Per-lane-count preference values in `0.0..=1.0`.
///
/// Counts missing from the table fall back to the multi-lane default, so
/// anything wider than the table is treated like the widest listed road.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LanePreferences {
    table: HashMap<u8, f64>,
    fallback: f64,
}

impl Default for LanePreferences {
    /// Single-lane streets preferred; preference halves towards wide
    /// arterials.
    fn default() -> Self {
        let table = HashMap::from([(1, 1.0), (2, 0.75), (3, 0.5)]);
        Self {
            table,
            fallback: 0.25,
        }
    }
}

impl LanePreferences {
    /// The preference for `lanes`, or the fallback when unlisted.
    #[must_use]
    pub fn preference(&self, lanes: u8) -> f64 {
        self.table.get(&lanes).copied().unwrap_or(self.fallback)
    }

    /// Override the preference for one lane count while consuming `self`.
    #[must_use]
    pub fn with_preference(mut self, lanes: u8, value: f64) -> Self {
        self.table.insert(lanes, value);
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.table
            .values()
            .chain(std::iter::once(&self.fallback))
            .try_for_each(|&value| check_preference(value))
    }
}

fn check_preference(value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::PreferenceOutOfRange { value });
    }
    Ok(())
}

/// Fully resolved criterion configuration: weights plus thresholds.
///
/// Construct with [`CriterionConfig::new`], adjust the public fields or use
/// the chaining helpers, then hand the value to the engine. The engine
/// validates once at construction and reuses the configuration across
/// evaluations without mutating it.
///
/// # Examples
/// ```
/// use glide_core::{CriterionConfig, DrivingSide};
///
/// let config = CriterionConfig::new(5000.0, 250.0).with_driving_side(DrivingSide::Right);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CriterionConfig {
    /// Per-criterion weights.
    pub weights: CriterionWeights,
    /// Target route length in metres.
    pub desired_distance_m: f64,
    /// Accepted deviation either side of the target, in metres.
    pub distance_tolerance_m: f64,
    /// Steepest acceptable climb as a grade fraction.
    pub max_uphill_grade: f64,
    /// Descent grade that scores highest.
    pub downhill_sweet_spot: f64,
    /// Steepest acceptable descent as a grade fraction.
    pub max_downhill_grade: f64,
    /// Two-way carriageways narrower than this count as narrow, in metres.
    pub narrow_width_m: f64,
    /// Which side of the road traffic drives on.
    pub driving_side: DrivingSide,
    /// Road classification preferences.
    pub road_preferences: RoadPreferences,
    /// Lane count preferences.
    pub lane_preferences: LanePreferences,
}

impl CriterionConfig {
    /// Construct a configuration with the given distance band and default
    /// weights and thresholds.
    #[must_use]
    pub fn new(desired_distance_m: f64, distance_tolerance_m: f64) -> Self {
        Self {
            weights: CriterionWeights::default(),
            desired_distance_m,
            distance_tolerance_m,
            max_uphill_grade: DEFAULT_MAX_UPHILL_GRADE,
            downhill_sweet_spot: DEFAULT_DOWNHILL_SWEET_SPOT,
            max_downhill_grade: DEFAULT_MAX_DOWNHILL_GRADE,
            narrow_width_m: DEFAULT_NARROW_WIDTH_M,
            driving_side: DrivingSide::default(),
            road_preferences: RoadPreferences::default(),
            lane_preferences: LanePreferences::default(),
        }
    }

    /// Replace the weights while consuming `self`.
    #[must_use]
    pub fn with_weights(mut self, weights: CriterionWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Set the driving side while consuming `self`.
    #[must_use]
    pub fn with_driving_side(mut self, side: DrivingSide) -> Self {
        self.driving_side = side;
        self
    }

    /// Replace the road preferences while consuming `self`.
    #[must_use]
    pub fn with_road_preferences(mut self, preferences: RoadPreferences) -> Self {
        self.road_preferences = preferences;
        self
    }

    /// Replace the lane preferences while consuming `self`.
    #[must_use]
    pub fn with_lane_preferences(mut self, preferences: LanePreferences) -> Self {
        self.lane_preferences = preferences;
        self
    }

    /// Check every weight and threshold against its documented range.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] encountered; the order of checks is
    /// unspecified.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.desired_distance_m.is_finite() || self.desired_distance_m <= 0.0 {
            return Err(ConfigError::InvalidDesiredDistance {
                value: self.desired_distance_m,
            });
        }
        if !self.distance_tolerance_m.is_finite()
            || self.distance_tolerance_m <= 0.0
            || self.distance_tolerance_m >= self.desired_distance_m
        {
            return Err(ConfigError::InvalidDistanceTolerance {
                value: self.distance_tolerance_m,
            });
        }
        for (name, value) in [
            ("maximum uphill grade", self.max_uphill_grade),
            ("downhill sweet spot", self.downhill_sweet_spot),
            ("maximum downhill grade", self.max_downhill_grade),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidGrade { name, value });
            }
        }
        if self.downhill_sweet_spot >= self.max_downhill_grade {
            return Err(ConfigError::SweetSpotAboveMax {
                sweet_spot: self.downhill_sweet_spot,
                max: self.max_downhill_grade,
            });
        }
        if !self.narrow_width_m.is_finite() || self.narrow_width_m <= 0.0 {
            return Err(ConfigError::InvalidNarrowWidth {
                value: self.narrow_width_m,
            });
        }
        for (name, value) in self.weights.named() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        self.road_preferences.validate()?;
        self.lane_preferences.validate()
    }
}
