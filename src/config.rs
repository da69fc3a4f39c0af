use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// Half-width of the fixed display window; the view spans `-VIEW_EXTENT..VIEW_EXTENT`.
pub const VIEW_EXTENT: f64 = 20.0;

/// What the driver does when a frame's point set cannot be triangulated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DegeneratePolicy {
    /// Hand the error back to the caller and produce no frame.
    #[default]
    Abort,
    /// Produce the frame without simplices and keep going.
    SkipFrame,
}

/// Driver parameters. None of these are read by the motion model itself
/// except through [`crate::bubble::initialize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub count: usize,
    /// 2 for the planar variant, 3 for the spatial one.
    pub dimensions: usize,
    /// Standard deviation of the initial positions, per coordinate.
    pub position_scale: f64,
    pub size_min: f64,
    pub size_max: f64,
    /// Passed to every `advance` call but does not scale the step.
    pub dt: f64,
    pub frames: usize,
    pub frame_interval_ms: u64,
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub on_degenerate: DegeneratePolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            count: 10,
            dimensions: 2,
            position_scale: 10.0,
            size_min: 1.0,
            size_max: 3.0,
            dt: 0.01,
            frames: 1000,
            frame_interval_ms: 20,
            seed: None,
            on_degenerate: DegeneratePolicy::Abort,
        }
    }
}

impl SimulationConfig {
    pub fn planar() -> Self {
        Self::default()
    }

    pub fn spatial() -> Self {
        Self {
            dimensions: 3,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Checks that a run in `dimensions` dimensions can start from this
    /// configuration. Called before any bubble is created.
    pub fn validate_for(&self, dimensions: usize) -> Result<(), SimulationError> {
        let invalid =
            |msg: String| -> Result<(), SimulationError> { Err(SimulationError::InvalidConfig(msg)) };

        if dimensions == 0 || self.dimensions == 0 {
            return invalid("dimensionality must be positive".to_owned());
        }
        if self.dimensions != dimensions {
            return invalid(format!(
                "configured for {} dimensions but the run is {}-dimensional",
                self.dimensions, dimensions
            ));
        }
        if self.count < dimensions + 1 {
            return invalid(format!(
                "{} bubbles cannot be triangulated in {}D, need at least {}",
                self.count,
                dimensions,
                dimensions + 1
            ));
        }
        if !(self.size_min.is_finite() && self.size_max.is_finite()) {
            return invalid("size range must be finite".to_owned());
        }
        if self.size_min <= 0.0 || self.size_max < self.size_min {
            return invalid(format!(
                "size range [{}, {}] must be positive and ordered",
                self.size_min, self.size_max
            ));
        }
        if !self.position_scale.is_finite() || self.position_scale <= 0.0 {
            return invalid(format!(
                "position scale {} must be positive",
                self.position_scale
            ));
        }
        Ok(())
    }

    /// Applies one `key=value` override, as accepted by the headless runner.
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<(), SimulationError> {
        fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, SimulationError> {
            value.trim().parse().map_err(|_| {
                SimulationError::InvalidConfig(format!("invalid value for {}: {}", key, value))
            })
        }

        match key.trim() {
            "count" => self.count = parse(key, value)?,
            "dimensions" => self.dimensions = parse(key, value)?,
            "position_scale" => self.position_scale = parse(key, value)?,
            "size_min" => self.size_min = parse(key, value)?,
            "size_max" => self.size_max = parse(key, value)?,
            "dt" => self.dt = parse(key, value)?,
            "frames" => self.frames = parse(key, value)?,
            "frame_interval_ms" => self.frame_interval_ms = parse(key, value)?,
            "seed" => self.seed = Some(parse(key, value)?),
            "on_degenerate" => {
                self.on_degenerate = match value.trim() {
                    "abort" => DegeneratePolicy::Abort,
                    "skip" | "skip_frame" => DegeneratePolicy::SkipFrame,
                    other => {
                        return Err(SimulationError::InvalidConfig(format!(
                            "unknown degenerate policy: {}",
                            other
                        )))
                    }
                }
            }
            other => {
                return Err(SimulationError::InvalidConfig(format!(
                    "unknown option: {}",
                    other
                )))
            }
        }
        Ok(())
    }
}
