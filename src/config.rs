use crate::classifier::models::model_config::ModelConfig;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Domain-specific classifier, consulted first.
    pub primary_model: ModelConfig,
    /// General-purpose classifier with a much broader label set, consulted
    /// when the primary is not confident enough.
    pub secondary_model: ModelConfig,
    pub http_timeout: Duration,
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            primary_model: ModelConfig {
                topology_location: "models/primary/model.onnx".to_string(),
                metadata_location: "models/primary/metadata.json".to_string(),
                input_shape: (224, 224),
            },
            secondary_model: ModelConfig {
                topology_location: "models/mobilenet/model.onnx".to_string(),
                metadata_location: "models/mobilenet/metadata.json".to_string(),
                input_shape: (224, 224),
            },
            http_timeout: Duration::from_secs(30),
            logger_timezone: mountain_standard_time(),
        }
    }
}

fn mountain_standard_time() -> chrono::FixedOffset {
    chrono::FixedOffset::west_opt(7 * 3600).unwrap()
}
