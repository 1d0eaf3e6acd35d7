//! Error types for the flock simulation.
//!
//! None of these are fatal: each one is reported to the caller and the
//! simulation keeps running with its previous state.

use core::fmt;

/// Names every value that goes through validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    SeparationWeight,
    AlignmentWeight,
    CohesionWeight,
    SensorRayCount,
    SensorConeDegrees,
    SensorRange,
    MaxSeparationAccel,
    MoveSpeed,
    RotationSpeed,
    AgentRadius,
    MaxPopulation,
    DeltaTime,
    WorldBounds,
}

impl Parameter {
    /// Every parameter held by [`crate::FlockParameters`].
    pub const FLOCK: [Parameter; 10] = [
        Parameter::SeparationWeight,
        Parameter::AlignmentWeight,
        Parameter::CohesionWeight,
        Parameter::SensorRayCount,
        Parameter::SensorConeDegrees,
        Parameter::SensorRange,
        Parameter::MaxSeparationAccel,
        Parameter::MoveSpeed,
        Parameter::RotationSpeed,
        Parameter::AgentRadius,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Parameter::SeparationWeight => "separation_weight",
            Parameter::AlignmentWeight => "alignment_weight",
            Parameter::CohesionWeight => "cohesion_weight",
            Parameter::SensorRayCount => "sensor_ray_count",
            Parameter::SensorConeDegrees => "sensor_cone_degrees",
            Parameter::SensorRange => "sensor_range",
            Parameter::MaxSeparationAccel => "max_separation_accel",
            Parameter::MoveSpeed => "move_speed",
            Parameter::RotationSpeed => "rotation_speed",
            Parameter::AgentRadius => "agent_radius",
            Parameter::MaxPopulation => "max_population",
            Parameter::DeltaTime => "delta_time",
            Parameter::WorldBounds => "world_bounds",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value was rejected because it falls outside its declared range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidParameter {
    pub parameter: Parameter,
    pub value: f32,
}

impl InvalidParameter {
    pub fn new(parameter: Parameter, value: f32) -> Self {
        Self { parameter, value }
    }
}

impl fmt::Display for InvalidParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid value {} for parameter {}", self.value, self.parameter)
    }
}

/// A spawn was requested while the population is at its cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityExceeded {
    pub max_population: usize,
}

impl fmt::Display for CapacityExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Population is at its maximum of {} agents",
            self.max_population
        )
    }
}

/// Any error the core can report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlockError {
    CapacityExceeded(CapacityExceeded),
    InvalidParameter(InvalidParameter),
}

impl fmt::Display for FlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlockError::CapacityExceeded(e) => write!(f, "{}", e),
            FlockError::InvalidParameter(e) => write!(f, "{}", e),
        }
    }
}

impl From<CapacityExceeded> for FlockError {
    fn from(e: CapacityExceeded) -> Self {
        FlockError::CapacityExceeded(e)
    }
}

impl From<InvalidParameter> for FlockError {
    fn from(e: InvalidParameter) -> Self {
        FlockError::InvalidParameter(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidParameter {}

#[cfg(feature = "std")]
impl std::error::Error for CapacityExceeded {}

#[cfg(feature = "std")]
impl std::error::Error for FlockError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FlockError::CapacityExceeded(e) => Some(e),
            FlockError::InvalidParameter(e) => Some(e),
        }
    }
}
