//! Linkage configuration
//!
//! Disks and rods are fixed for the duration of a run. The host supplies them
//! as flat lists ([`HostInputs`]); validation turns those into a typed
//! [`LinkageConfig`] or a [`ConfigError`].

use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::geometry::rim_point;
use crate::consts::{DISK_COUNT, PEN_ROD_COUNT, STATIC_ROD_COUNT};
use crate::error::ConfigError;

/// Spin direction of a disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Counter-clockwise (positive angle)
    #[default]
    Ccw,
    /// Clockwise (negative angle)
    Cw,
}

impl Direction {
    /// Host flag convention: `true` means counter-clockwise
    pub fn from_flag(ccw: bool) -> Self {
        if ccw { Direction::Ccw } else { Direction::Cw }
    }

    pub fn sign(self) -> f64 {
        match self {
            Direction::Ccw => 1.0,
            Direction::Cw => -1.0,
        }
    }
}

/// Per-disk parameters as configured
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiskParams {
    pub radius: f64,
    /// Radians per second
    pub speed: f64,
    #[serde(default)]
    pub direction: Direction,
}

impl DiskParams {
    pub fn new(radius: f64, speed: f64) -> Self {
        Self {
            radius,
            speed,
            direction: Direction::Ccw,
        }
    }
}

/// A disk placed in the plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Disk {
    pub center: DVec2,
    pub radius: f64,
    pub angular_speed: f64,
    pub direction: Direction,
}

impl Disk {
    /// Crank angle at phase `t`
    #[inline]
    pub fn angle_at(&self, t: f64) -> f64 {
        self.angular_speed * t * self.direction.sign()
    }

    /// Rim point driving the linkage at phase `t`
    #[inline]
    pub fn rim_point(&self, t: f64) -> DVec2 {
        rim_point(self.center, self.radius, self.angle_at(t))
    }
}

/// Rod lengths of the chain
///
/// + Buffer order: `[a_h, b_h, h_c, h_d, c_e, d_e, e_p]`
///
/// The pen arm `e_p` is present only in the seven-rod chain; without it the
/// joint E is the traced point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RodLengths {
    /// Disk rim A to hinge H
    pub a_h: f64,
    /// Disk rim B to hinge H
    pub b_h: f64,
    /// Extension of A-H beyond H to C
    pub h_c: f64,
    /// Extension of B-H beyond H to D
    pub h_d: f64,
    /// C to apex E
    pub c_e: f64,
    /// D to apex E
    pub d_e: f64,
    /// Extension of C-E beyond E to the pen P
    #[serde(default)]
    pub e_p: Option<f64>,
}

impl RodLengths {
    /// Every rod the same length, no pen arm
    pub fn uniform(length: f64) -> Self {
        Self {
            a_h: length,
            b_h: length,
            h_c: length,
            h_d: length,
            c_e: length,
            d_e: length,
            e_p: None,
        }
    }

    /// Parse a host list of 6 or 7 lengths
    pub fn from_slice(lengths: &[f64]) -> Result<Self, ConfigError> {
        let rods = match *lengths {
            [a_h, b_h, h_c, h_d, c_e, d_e] => Self {
                a_h,
                b_h,
                h_c,
                h_d,
                c_e,
                d_e,
                e_p: None,
            },
            [a_h, b_h, h_c, h_d, c_e, d_e, e_p] => Self {
                a_h,
                b_h,
                h_c,
                h_d,
                c_e,
                d_e,
                e_p: Some(e_p),
            },
            _ => {
                return Err(ConfigError::WrongCardinality {
                    field: "rod_lengths",
                    expected: "6 or 7",
                    actual: lengths.len(),
                });
            }
        };
        rods.validate()?;
        Ok(rods)
    }

    pub fn to_vec(&self) -> Vec<f64> {
        let mut v = vec![self.a_h, self.b_h, self.h_c, self.h_d, self.c_e, self.d_e];
        v.extend(self.e_p);
        v
    }

    pub fn count(&self) -> usize {
        if self.e_p.is_some() {
            PEN_ROD_COUNT
        } else {
            STATIC_ROD_COUNT
        }
    }

    /// The same rods without the pen arm
    pub fn without_pen(mut self) -> Self {
        self.e_p = None;
        self
    }

    /// Ratio extending A-H to C
    pub fn c_ratio(&self) -> f64 {
        self.h_c / self.a_h
    }

    /// Ratio extending B-H to D
    pub fn d_ratio(&self) -> f64 {
        self.h_d / self.b_h
    }

    /// Ratio extending C-E to P, if the chain carries a pen arm
    pub fn pen_ratio(&self) -> Option<f64> {
        self.e_p.map(|e_p| e_p / self.c_e)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        // Divisors of the extension ratios and circle radii must be positive
        let positive = [
            ("a_h", self.a_h),
            ("b_h", self.b_h),
            ("c_e", self.c_e),
            ("d_e", self.d_e),
        ];
        for (name, len) in positive {
            if !len.is_finite() || len <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: "rod_lengths",
                    message: format!("{name} must be a positive length, got {len}"),
                });
            }
        }

        let extensions = [("h_c", Some(self.h_c)), ("h_d", Some(self.h_d)), ("e_p", self.e_p)];
        for (name, len) in extensions
            .into_iter()
            .filter_map(|(name, len)| len.map(|len| (name, len)))
        {
            if !len.is_finite() || len < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: "rod_lengths",
                    message: format!("{name} must be a non-negative length, got {len}"),
                });
            }
        }
        Ok(())
    }
}

/// Complete static description of one pintograph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkageConfig {
    /// Separation of the disk centers along +X
    pub distance: f64,
    pub disks: [DiskParams; DISK_COUNT],
    pub rods: RodLengths,
}

impl Default for LinkageConfig {
    fn default() -> Self {
        let mut rods = RodLengths::uniform(10.0);
        rods.e_p = Some(5.0);
        Self {
            distance: 10.0,
            disks: [DiskParams::new(3.0, 1.0), DiskParams::new(2.0, -1.5)],
            rods,
        }
    }
}

impl LinkageConfig {
    pub fn new(distance: f64, disks: [DiskParams; DISK_COUNT], rods: RodLengths) -> Result<Self, ConfigError> {
        let config = Self { distance, disks, rods };
        config.validate()?;
        Ok(config)
    }

    /// Every rod the same length and no pen arm
    pub fn uniform(distance: f64, disks: [DiskParams; DISK_COUNT], rod: f64) -> Result<Self, ConfigError> {
        Self::new(distance, disks, RodLengths::uniform(rod))
    }

    /// Disks placed at the origin and at `(distance, 0)`
    pub fn placed_disks(&self) -> [Disk; DISK_COUNT] {
        let centers = [DVec2::ZERO, DVec2::new(self.distance, 0.0)];
        let mut out = [Disk {
            center: DVec2::ZERO,
            radius: 0.0,
            angular_speed: 0.0,
            direction: Direction::Ccw,
        }; DISK_COUNT];
        for ((disk, params), center) in out.iter_mut().zip(&self.disks).zip(centers) {
            *disk = Disk {
                center,
                radius: params.radius,
                angular_speed: params.speed,
                direction: params.direction,
            };
        }
        out
    }

    /// Whether the chain ends in a pen arm beyond E
    pub fn has_pen_arm(&self) -> bool {
        self.rods.e_p.is_some()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.distance.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "distance",
                message: format!("must be finite, got {}", self.distance),
            });
        }
        for disk in &self.disks {
            if !disk.radius.is_finite() || disk.radius < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: "radius",
                    message: format!("must be a non-negative length, got {}", disk.radius),
                });
            }
            if !disk.speed.is_finite() {
                return Err(ConfigError::InvalidValue {
                    field: "speed",
                    message: format!("must be finite, got {}", disk.speed),
                });
            }
        }
        self.rods.validate()
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Raw host parameters, one list per input slot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostInputs {
    pub distance: f64,
    pub radii: Vec<f64>,
    pub speeds: Vec<f64>,
    /// `true` = counter-clockwise; both disks CCW when absent from JSON
    #[serde(default = "default_directions")]
    pub directions: Vec<bool>,
    pub rod_lengths: Vec<f64>,
}

impl From<&LinkageConfig> for HostInputs {
    fn from(config: &LinkageConfig) -> Self {
        Self {
            distance: config.distance,
            radii: config.disks.iter().map(|d| d.radius).collect(),
            speeds: config.disks.iter().map(|d| d.speed).collect(),
            directions: config
                .disks
                .iter()
                .map(|d| d.direction == Direction::Ccw)
                .collect(),
            rod_lengths: config.rods.to_vec(),
        }
    }
}

impl HostInputs {
    /// Validate into a configuration with 6 or 7 rods
    pub fn to_config(&self) -> Result<LinkageConfig, ConfigError> {
        let radii = exactly_two("radii", &self.radii)?;
        let speeds = exactly_two("speeds", &self.speeds)?;
        let directions = exactly_two("directions", &self.directions)?.map(Direction::from_flag);

        let mut disks = [DiskParams::new(0.0, 0.0); DISK_COUNT];
        for (i, disk) in disks.iter_mut().enumerate() {
            *disk = DiskParams {
                radius: radii[i],
                speed: speeds[i],
                direction: directions[i],
            };
        }

        LinkageConfig::new(self.distance, disks, RodLengths::from_slice(&self.rod_lengths)?)
    }

    /// Validate into the seven-rod configuration the animated driver needs
    pub fn to_pen_config(&self) -> Result<LinkageConfig, ConfigError> {
        if self.rod_lengths.len() != PEN_ROD_COUNT {
            return Err(ConfigError::WrongCardinality {
                field: "rod_lengths",
                expected: "7",
                actual: self.rod_lengths.len(),
            });
        }
        self.to_config()
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

fn default_directions() -> Vec<bool> {
    vec![true; DISK_COUNT]
}

fn exactly_two<T: Copy>(field: &'static str, values: &[T]) -> Result<[T; DISK_COUNT], ConfigError> {
    <[T; DISK_COUNT]>::try_from(values).map_err(|_| ConfigError::WrongCardinality {
        field,
        expected: "2",
        actual: values.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> HostInputs {
        HostInputs {
            distance: 10.0,
            radii: vec![3.0, 2.0],
            speeds: vec![1.0, -1.5],
            directions: vec![true, true],
            rod_lengths: vec![10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 0.0],
        }
    }

    #[test]
    fn test_host_inputs_to_config() {
        let config = host().to_pen_config().unwrap();
        assert_eq!(config.distance, 10.0);
        assert_eq!(config.disks[1].speed, -1.5);
        assert_eq!(config.rods.e_p, Some(0.0));
        assert_eq!(config.rods.count(), PEN_ROD_COUNT);
    }

    #[test]
    fn test_wrong_disk_cardinality() {
        let mut inputs = host();
        inputs.radii.push(4.0);
        let err = inputs.to_config().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::WrongCardinality { field: "radii", actual: 3, .. }
        ));

        let mut inputs = host();
        inputs.directions = vec![false];
        assert!(matches!(
            inputs.to_config(),
            Err(ConfigError::WrongCardinality { field: "directions", .. })
        ));
    }

    #[test]
    fn test_rod_cardinality() {
        let mut inputs = host();
        inputs.rod_lengths.pop();
        // Six rods: fine for the static chain, rejected by the pen chain
        assert!(inputs.to_config().is_ok());
        assert!(matches!(
            inputs.to_pen_config(),
            Err(ConfigError::WrongCardinality { field: "rod_lengths", actual: 6, .. })
        ));

        inputs.rod_lengths.truncate(3);
        assert!(inputs.to_config().is_err());
    }

    #[test]
    fn test_rejects_non_positive_rods() {
        let mut inputs = host();
        inputs.rod_lengths[0] = 0.0;
        assert!(matches!(inputs.to_config(), Err(ConfigError::InvalidValue { .. })));

        let mut inputs = host();
        inputs.rod_lengths[6] = f64::NAN;
        assert!(matches!(inputs.to_config(), Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_empty_directions_rejected() {
        let mut inputs = host();
        inputs.directions.clear();
        assert!(matches!(
            inputs.to_pen_config(),
            Err(ConfigError::WrongCardinality { field: "directions", actual: 0, .. })
        ));
    }

    #[test]
    fn test_missing_directions_in_json_default_ccw() {
        let json = r#"{"distance":10.0,"radii":[3.0,2.0],"speeds":[1.0,-1.5],"rod_lengths":[10,10,10,10,10,10,0]}"#;
        let inputs = HostInputs::from_json(json).unwrap();
        assert_eq!(inputs.directions, vec![true, true]);
        let config = inputs.to_pen_config().unwrap();
        assert!(config.disks.iter().all(|d| d.direction == Direction::Ccw));
    }

    #[test]
    fn test_direction_sign_flips_angle() {
        let mut config = LinkageConfig::default();
        config.disks[0].direction = Direction::Cw;
        let [a, _] = config.placed_disks();
        assert_eq!(a.angle_at(2.0), -2.0);
        let rim = a.rim_point(std::f64::consts::FRAC_PI_2);
        assert!((rim - DVec2::new(0.0, -3.0)).length() < 1e-12);
    }

    #[test]
    fn test_placed_disks() {
        let [a, b] = LinkageConfig::default().placed_disks();
        assert_eq!(a.center, DVec2::ZERO);
        assert_eq!(b.center, DVec2::new(10.0, 0.0));
        assert_eq!(b.radius, 2.0);
    }

    #[test]
    fn test_host_inputs_from_config_round_trip() {
        let config = LinkageConfig::default();
        let inputs = HostInputs::from(&config);
        assert_eq!(inputs.to_config().unwrap(), config);
    }

    #[test]
    fn test_config_json() {
        let config = LinkageConfig::uniform(8.0, [DiskParams::new(1.0, 2.0), DiskParams::new(1.5, 3.0)], 6.0).unwrap();
        let json = config.to_json().unwrap();
        assert_eq!(LinkageConfig::from_json(&json).unwrap(), config);

        let bad = json.replace("\"a_h\": 6.0", "\"a_h\": -1.0");
        assert!(LinkageConfig::from_json(&bad).is_err());
    }
}
