use crate::classifier::descriptor::fetch_descriptor;
use crate::classifier::interface::{ClassifierLoader, ImageClassifier, Prediction};
use crate::classifier::models::model_config::ModelConfig;
use crate::classifier::tract::image::resize_image_to_tensor;
use image::DynamicImage;
use serde::Deserialize;
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;
use tract_onnx::prelude::*;

const TOP_PREDICTIONS: usize = 5;

pub struct ImageClassifierTractOnnx {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    labels: Vec<String>,
    input_shape: (u32, u32),
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn classify(
        &self,
        image: &DynamicImage,
    ) -> Result<Vec<Prediction>, Box<dyn std::error::Error + Send + Sync>> {
        let input = resize_image_to_tensor(
            image,
            self.input_shape.1, // width
            self.input_shape.0, // height
        )?;

        let outputs = self.model.run(tvec!(input.into_tvalue()))?;
        let output = outputs.first().ok_or("model produced no output")?;
        let scores = output.to_array_view::<f32>()?;

        let mut predictions: Vec<Prediction> = scores
            .iter()
            .copied()
            .enumerate()
            .filter_map(|(index, probability)| {
                self.labels.get(index).map(|label| Prediction {
                    class_name: label.clone(),
                    probability,
                })
            })
            .collect();

        predictions.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        predictions.truncate(TOP_PREDICTIONS);

        Ok(predictions)
    }
}

/// Loads a classifier from its two descriptor locations: the ONNX topology
/// and the JSON metadata carrying the label list.
pub struct ClassifierLoaderTractOnnx {
    config: ModelConfig,
    http_timeout: Duration,
}

impl ClassifierLoaderTractOnnx {
    pub fn new(config: ModelConfig, http_timeout: Duration) -> Self {
        Self {
            config,
            http_timeout,
        }
    }
}

impl ClassifierLoader for ClassifierLoaderTractOnnx {
    fn load(&self) -> Result<Arc<dyn ImageClassifier>, Box<dyn std::error::Error + Send + Sync>> {
        let topology = fetch_descriptor(&self.config.topology_location, self.http_timeout)?;
        let metadata = fetch_descriptor(&self.config.metadata_location, self.http_timeout)?;
        let labels = parse_metadata(&metadata)?;

        let (height, width) = self.config.input_shape;
        let model = tract_onnx::onnx()
            .model_for_read(&mut Cursor::new(topology))?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(
                    f32::datum_type(),
                    tvec!(1, 3, height as usize, width as usize),
                ),
            )?
            .into_optimized()?
            .into_runnable()?;

        Ok(Arc::new(ImageClassifierTractOnnx {
            model,
            labels,
            input_shape: self.config.input_shape,
        }))
    }
}

#[derive(Debug, Deserialize)]
struct ModelMetadata {
    labels: Vec<String>,
}

fn parse_metadata(bytes: &[u8]) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
    let metadata: ModelMetadata = serde_json::from_slice(bytes)?;
    if metadata.labels.is_empty() {
        return Err("metadata descriptor contains no labels".into());
    }
    Ok(metadata.labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metadata() {
        let labels = parse_metadata(br#"{"labels": ["cat", "dog"]}"#).unwrap();
        assert_eq!(labels, vec!["cat".to_string(), "dog".to_string()]);
    }

    #[test]
    fn test_parse_metadata_rejects_empty() {
        assert!(parse_metadata(br#"{"labels": []}"#).is_err());
    }

    #[test]
    fn test_parse_metadata_rejects_garbage() {
        assert!(parse_metadata(b"not json").is_err());
    }
}
