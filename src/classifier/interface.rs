use image::DynamicImage;
use std::sync::Arc;

/// Classifier-native output shape. Each implementation reports its own class
/// naming; `adapt` normalizes this to the canonical candidate type.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub class_name: String,
    pub probability: f32,
}

pub trait ImageClassifier: Send + Sync {
    fn classify(
        &self,
        image: &DynamicImage,
    ) -> Result<Vec<Prediction>, Box<dyn std::error::Error + Send + Sync>>;
}

pub trait ClassifierLoader: Send + Sync {
    fn load(&self) -> Result<Arc<dyn ImageClassifier>, Box<dyn std::error::Error + Send + Sync>>;
}
