use crate::error::{InvalidParameter, Parameter};

/// Most rays a sensor may cast per agent.
pub const MAX_RAY_COUNT: usize = 30;
/// Fewest rays a sensor may cast per agent.
pub const MIN_RAY_COUNT: usize = 3;

const DEFAULT_SEPARATION_WEIGHT: f32 = 0.5;
const DEFAULT_ALIGNMENT_WEIGHT: f32 = 0.5;
const DEFAULT_COHESION_WEIGHT: f32 = 0.5;

/// Tuning values shared by every agent of a flock.
///
/// Every write goes through a setter that checks the declared range; a
/// rejected value leaves the previous one in place.
#[derive(Debug, Clone, PartialEq)]
pub struct FlockParameters {
    separation_weight: f32,
    alignment_weight: f32,
    cohesion_weight: f32,
    sensor_ray_count: usize,
    sensor_cone_degrees: f32,
    sensor_range: f32,
    max_separation_accel: f32,
    move_speed: f32,
    rotation_speed: f32,
    agent_radius: f32,
}

impl Default for FlockParameters {
    fn default() -> Self {
        Self {
            separation_weight: DEFAULT_SEPARATION_WEIGHT,
            alignment_weight: DEFAULT_ALIGNMENT_WEIGHT,
            cohesion_weight: DEFAULT_COHESION_WEIGHT,
            sensor_ray_count: 10,
            sensor_cone_degrees: 270.0,
            sensor_range: 2.0,
            max_separation_accel: 15.0,
            move_speed: 5.0,
            rotation_speed: 360.0,
            agent_radius: 0.15,
        }
    }
}

fn in_range(parameter: Parameter, value: f32, min: f32, max: f32) -> Result<f32, InvalidParameter> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(InvalidParameter::new(parameter, value))
    }
}

fn positive(parameter: Parameter, value: f32) -> Result<f32, InvalidParameter> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(InvalidParameter::new(parameter, value))
    }
}

impl FlockParameters {
    pub fn separation_weight(&self) -> f32 {
        self.separation_weight
    }

    pub fn alignment_weight(&self) -> f32 {
        self.alignment_weight
    }

    pub fn cohesion_weight(&self) -> f32 {
        self.cohesion_weight
    }

    pub fn sensor_ray_count(&self) -> usize {
        self.sensor_ray_count
    }

    /// Full width of the sensing cone, in degrees.
    pub fn sensor_cone_degrees(&self) -> f32 {
        self.sensor_cone_degrees
    }

    pub fn sensor_range(&self) -> f32 {
        self.sensor_range
    }

    pub fn max_separation_accel(&self) -> f32 {
        self.max_separation_accel
    }

    /// World units per second.
    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    /// Degrees per second.
    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    /// Radius of the body other agents' sensor rays can hit.
    pub fn agent_radius(&self) -> f32 {
        self.agent_radius
    }

    pub fn set_separation_weight(&mut self, value: f32) -> Result<(), InvalidParameter> {
        self.separation_weight = in_range(Parameter::SeparationWeight, value, 0.0, 1.0)?;
        Ok(())
    }

    pub fn set_alignment_weight(&mut self, value: f32) -> Result<(), InvalidParameter> {
        self.alignment_weight = in_range(Parameter::AlignmentWeight, value, 0.0, 1.0)?;
        Ok(())
    }

    pub fn set_cohesion_weight(&mut self, value: f32) -> Result<(), InvalidParameter> {
        self.cohesion_weight = in_range(Parameter::CohesionWeight, value, 0.0, 1.0)?;
        Ok(())
    }

    pub fn set_sensor_ray_count(&mut self, value: usize) -> Result<(), InvalidParameter> {
        if !(MIN_RAY_COUNT..=MAX_RAY_COUNT).contains(&value) {
            return Err(InvalidParameter::new(Parameter::SensorRayCount, value as f32));
        }
        self.sensor_ray_count = value;
        Ok(())
    }

    pub fn set_sensor_cone_degrees(&mut self, value: f32) -> Result<(), InvalidParameter> {
        self.sensor_cone_degrees = in_range(Parameter::SensorConeDegrees, value, 0.0, 360.0)?;
        Ok(())
    }

    pub fn set_sensor_range(&mut self, value: f32) -> Result<(), InvalidParameter> {
        self.sensor_range = in_range(Parameter::SensorRange, value, 0.0, 10.0)?;
        Ok(())
    }

    pub fn set_max_separation_accel(&mut self, value: f32) -> Result<(), InvalidParameter> {
        self.max_separation_accel = positive(Parameter::MaxSeparationAccel, value)?;
        Ok(())
    }

    pub fn set_move_speed(&mut self, value: f32) -> Result<(), InvalidParameter> {
        self.move_speed = positive(Parameter::MoveSpeed, value)?;
        Ok(())
    }

    pub fn set_rotation_speed(&mut self, value: f32) -> Result<(), InvalidParameter> {
        self.rotation_speed = positive(Parameter::RotationSpeed, value)?;
        Ok(())
    }

    pub fn set_agent_radius(&mut self, value: f32) -> Result<(), InvalidParameter> {
        let value = positive(Parameter::AgentRadius, value)?;
        self.agent_radius = in_range(Parameter::AgentRadius, value, 0.0, 10.0)?;
        Ok(())
    }

    /// Sets any flock parameter by name.
    ///
    /// `sensor_ray_count` must be a whole number. Parameters that do not
    /// belong to the flock (population cap, world bounds, time step) are
    /// rejected.
    pub fn set(&mut self, parameter: Parameter, value: f32) -> Result<(), InvalidParameter> {
        match parameter {
            Parameter::SeparationWeight => self.set_separation_weight(value),
            Parameter::AlignmentWeight => self.set_alignment_weight(value),
            Parameter::CohesionWeight => self.set_cohesion_weight(value),
            Parameter::SensorRayCount => {
                if !value.is_finite() || value < 0.0 || value != (value as usize) as f32 {
                    return Err(InvalidParameter::new(parameter, value));
                }
                self.set_sensor_ray_count(value as usize)
            }
            Parameter::SensorConeDegrees => self.set_sensor_cone_degrees(value),
            Parameter::SensorRange => self.set_sensor_range(value),
            Parameter::MaxSeparationAccel => self.set_max_separation_accel(value),
            Parameter::MoveSpeed => self.set_move_speed(value),
            Parameter::RotationSpeed => self.set_rotation_speed(value),
            Parameter::AgentRadius => self.set_agent_radius(value),
            Parameter::MaxPopulation | Parameter::DeltaTime | Parameter::WorldBounds => {
                Err(InvalidParameter::new(parameter, value))
            }
        }
    }

    /// Reads any flock parameter by name; `None` for non-flock parameters.
    pub fn get(&self, parameter: Parameter) -> Option<f32> {
        let value = match parameter {
            Parameter::SeparationWeight => self.separation_weight,
            Parameter::AlignmentWeight => self.alignment_weight,
            Parameter::CohesionWeight => self.cohesion_weight,
            Parameter::SensorRayCount => self.sensor_ray_count as f32,
            Parameter::SensorConeDegrees => self.sensor_cone_degrees,
            Parameter::SensorRange => self.sensor_range,
            Parameter::MaxSeparationAccel => self.max_separation_accel,
            Parameter::MoveSpeed => self.move_speed,
            Parameter::RotationSpeed => self.rotation_speed,
            Parameter::AgentRadius => self.agent_radius,
            Parameter::MaxPopulation | Parameter::DeltaTime | Parameter::WorldBounds => {
                return None
            }
        };
        Some(value)
    }

    /// Restores the three steering weights to their defaults.
    pub fn reset_weights(&mut self) {
        self.separation_weight = DEFAULT_SEPARATION_WEIGHT;
        self.alignment_weight = DEFAULT_ALIGNMENT_WEIGHT;
        self.cohesion_weight = DEFAULT_COHESION_WEIGHT;
    }

    /// Changes the move speed by `delta`, keeping it positive.
    pub fn adjust_move_speed(&mut self, delta: f32) -> Result<(), InvalidParameter> {
        self.set_move_speed(self.move_speed + delta)
    }

    /// Changes the rotation speed by `delta` degrees per second, keeping it positive.
    pub fn adjust_rotation_speed(&mut self, delta: f32) -> Result<(), InvalidParameter> {
        self.set_rotation_speed(self.rotation_speed + delta)
    }
}
