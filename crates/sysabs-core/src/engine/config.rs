use thiserror::Error;

/// Moduli 2, 3 and 5 suffice for two-image indexing; single-image indexing
/// can need moduli up to 11.
pub const DEFAULT_MODULARITIES: [u32; 3] = [2, 3, 5];
pub const DEFAULT_MAX_VECTOR_NORM: i64 = 6;
pub const DEFAULT_PRESENCE_THRESHOLD: f64 = 0.8;
pub const DEFAULT_MIN_CELL_VOLUME: f64 = 100.0;
pub const DEFAULT_RECURSION_LIMIT: usize = 8;
/// Largest accepted modulus. The lattice scan grows with the cube of the
/// largest modulus, and 11 already covers single-image indexing.
pub const MAX_MODULUS: u32 = 16;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Parameters of condition-table generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub modularities: Vec<u32>,
    /// Largest squared length of a condition vector.
    pub max_vector_norm: i64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            modularities: DEFAULT_MODULARITIES.to_vec(),
            max_vector_norm: DEFAULT_MAX_VECTOR_NORM,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.modularities.is_empty() {
            return Err(ConfigError::InvalidParameter {
                name: "modularities",
                reason: "at least one modulus is required".to_string(),
            });
        }
        if let Some(m) = self.modularities.iter().find(|&&m| m < 2) {
            return Err(ConfigError::InvalidParameter {
                name: "modularities",
                reason: format!("modulus {} is smaller than 2", m),
            });
        }
        if let Some(m) = self.modularities.iter().find(|&&m| m > MAX_MODULUS) {
            return Err(ConfigError::InvalidParameter {
                name: "modularities",
                reason: format!("modulus {} exceeds the maximum of {}", m, MAX_MODULUS),
            });
        }
        for (i, m) in self.modularities.iter().enumerate() {
            if self.modularities[..i].contains(m) {
                return Err(ConfigError::InvalidParameter {
                    name: "modularities",
                    reason: format!("modulus {} is listed more than once", m),
                });
            }
        }
        if self.max_vector_norm < 1 {
            return Err(ConfigError::InvalidParameter {
                name: "max_vector_norm",
                reason: format!("must be at least 1, got {}", self.max_vector_norm),
            });
        }
        Ok(())
    }

    /// Half-width of the cube scanned for lattice points.
    pub fn spiral_radius(&self) -> i32 {
        self.modularities.iter().copied().max().unwrap_or(0) as i32
    }
}

/// Parameters of detection and correction.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionConfig {
    /// Fraction of observations in the zero-remainder class above which an
    /// absence is flagged.
    pub presence_threshold: f64,
    /// Smallest acceptable corrected unit-cell volume, in Å³.
    pub min_cell_volume: f64,
    /// Maximum number of successive corrections in the reindex workflow.
    pub recursion_limit: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            presence_threshold: DEFAULT_PRESENCE_THRESHOLD,
            min_cell_volume: DEFAULT_MIN_CELL_VOLUME,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }
}

impl DetectionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.presence_threshold > 0.0 && self.presence_threshold < 1.0) {
            return Err(ConfigError::InvalidParameter {
                name: "presence_threshold",
                reason: format!("must lie in (0, 1), got {}", self.presence_threshold),
            });
        }
        if !(self.min_cell_volume.is_finite() && self.min_cell_volume >= 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "min_cell_volume",
                reason: format!("must be finite and non-negative, got {}", self.min_cell_volume),
            });
        }
        if self.recursion_limit == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "recursion_limit",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AbsenceConfig {
    pub table: TableConfig,
    pub detection: DetectionConfig,
}

#[derive(Default)]
pub struct AbsenceConfigBuilder {
    modularities: Option<Vec<u32>>,
    max_vector_norm: Option<i64>,
    presence_threshold: Option<f64>,
    min_cell_volume: Option<f64>,
    recursion_limit: Option<usize>,
}

impl AbsenceConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modularities(mut self, modularities: Vec<u32>) -> Self {
        self.modularities = Some(modularities);
        self
    }
    pub fn max_vector_norm(mut self, norm: i64) -> Self {
        self.max_vector_norm = Some(norm);
        self
    }
    pub fn presence_threshold(mut self, threshold: f64) -> Self {
        self.presence_threshold = Some(threshold);
        self
    }
    pub fn min_cell_volume(mut self, volume: f64) -> Self {
        self.min_cell_volume = Some(volume);
        self
    }
    pub fn recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = Some(limit);
        self
    }

    pub fn build(self) -> Result<AbsenceConfig, ConfigError> {
        let table = TableConfig {
            modularities: self
                .modularities
                .ok_or(ConfigError::MissingParameter("modularities"))?,
            max_vector_norm: self
                .max_vector_norm
                .ok_or(ConfigError::MissingParameter("max_vector_norm"))?,
        };
        let detection = DetectionConfig {
            presence_threshold: self
                .presence_threshold
                .ok_or(ConfigError::MissingParameter("presence_threshold"))?,
            min_cell_volume: self
                .min_cell_volume
                .ok_or(ConfigError::MissingParameter("min_cell_volume"))?,
            recursion_limit: self
                .recursion_limit
                .ok_or(ConfigError::MissingParameter("recursion_limit"))?,
        };
        table.validate()?;
        detection.validate()?;
        Ok(AbsenceConfig { table, detection })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_builder() -> AbsenceConfigBuilder {
        AbsenceConfigBuilder::new()
            .modularities(vec![2, 3, 5, 7])
            .max_vector_norm(6)
            .presence_threshold(0.9)
            .min_cell_volume(50.0)
            .recursion_limit(4)
    }

    #[test]
    fn builder_assembles_complete_config() {
        let config = complete_builder().build().unwrap();
        assert_eq!(config.table.modularities, vec![2, 3, 5, 7]);
        assert_eq!(config.table.max_vector_norm, 6);
        assert_eq!(config.detection.presence_threshold, 0.9);
        assert_eq!(config.detection.min_cell_volume, 50.0);
        assert_eq!(config.detection.recursion_limit, 4);
    }

    #[test]
    fn builder_reports_missing_parameter() {
        let result = AbsenceConfigBuilder::new()
            .modularities(vec![2])
            .max_vector_norm(6)
            .presence_threshold(0.8)
            .recursion_limit(8)
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("min_cell_volume")));
    }

    #[test]
    fn builder_validates_values() {
        let result = complete_builder().presence_threshold(1.5).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "presence_threshold",
                ..
            })
        ));
    }

    #[test]
    fn defaults_match_published_constants() {
        let config = AbsenceConfig::default();
        assert_eq!(config.table.modularities, vec![2, 3, 5]);
        assert_eq!(config.table.max_vector_norm, 6);
        assert_eq!(config.detection.presence_threshold, 0.8);
        assert_eq!(config.detection.min_cell_volume, 100.0);
        assert_eq!(config.detection.recursion_limit, 8);
        assert!(config.table.validate().is_ok());
        assert!(config.detection.validate().is_ok());
    }

    #[test]
    fn table_rejects_small_and_duplicate_moduli() {
        let small = TableConfig {
            modularities: vec![2, 1],
            ..TableConfig::default()
        };
        assert!(small.validate().is_err());

        let duplicate = TableConfig {
            modularities: vec![3, 5, 3],
            ..TableConfig::default()
        };
        assert!(duplicate.validate().is_err());

        let empty = TableConfig {
            modularities: vec![],
            ..TableConfig::default()
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn table_rejects_moduli_above_the_maximum() {
        let config = TableConfig {
            modularities: vec![2, 700],
            max_vector_norm: 1,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter {
                name: "modularities",
                ..
            })
        ));

        let largest = TableConfig {
            modularities: vec![MAX_MODULUS],
            max_vector_norm: 1,
        };
        assert!(largest.validate().is_ok());
    }

    #[test]
    fn spiral_radius_is_largest_modulus() {
        let config = TableConfig {
            modularities: vec![3, 11, 2],
            max_vector_norm: 6,
        };
        assert_eq!(config.spiral_radius(), 11);
    }

    #[test]
    fn detection_rejects_zero_recursion_limit() {
        let config = DetectionConfig {
            recursion_limit: 0,
            ..DetectionConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
