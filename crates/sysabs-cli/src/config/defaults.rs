use sysabs::engine::config as core_config;

pub struct DefaultsConfig {
    pub modularities: Vec<u32>,
    pub max_vector_norm: i64,
    pub presence_threshold: f64,
    pub min_cell_volume: f64,
    pub recursion_limit: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            modularities: core_config::DEFAULT_MODULARITIES.to_vec(),
            max_vector_norm: core_config::DEFAULT_MAX_VECTOR_NORM,
            presence_threshold: core_config::DEFAULT_PRESENCE_THRESHOLD,
            min_cell_volume: core_config::DEFAULT_MIN_CELL_VOLUME,
            recursion_limit: core_config::DEFAULT_RECURSION_LIMIT,
        }
    }
}
