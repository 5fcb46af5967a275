use crate::classifier::interface::{ClassifierLoader, ImageClassifier, Prediction};
use image::DynamicImage;
use rand::distr::{Distribution, Uniform};
use std::sync::Arc;

const FAKE_LABELS: [&str; 12] = [
    "dog", "cat", "person", "car", "chair", "table", "bird", "tree", "bicycle", "book", "laptop",
    "cup",
];

pub struct ImageClassifierFake {}

impl ImageClassifierFake {
    pub fn new() -> Self {
        Self {}
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(
        &self,
        _image: &DynamicImage,
    ) -> Result<Vec<Prediction>, Box<dyn std::error::Error + Send + Sync>> {
        let mut rng = rand::rng();

        let index_dist = Uniform::new(0, FAKE_LABELS.len())?;
        let probability_dist = Uniform::new(0.0, 1.0)?;

        Ok(vec![Prediction {
            class_name: FAKE_LABELS[index_dist.sample(&mut rng)].to_string(),
            probability: probability_dist.sample(&mut rng),
        }])
    }
}

pub struct ClassifierLoaderFake {
    should_fail: bool,
}

#[allow(dead_code)]
impl ClassifierLoaderFake {
    pub fn new() -> Self {
        Self { should_fail: false }
    }

    pub fn failing() -> Self {
        Self { should_fail: true }
    }
}

impl ClassifierLoader for ClassifierLoaderFake {
    fn load(&self) -> Result<Arc<dyn ImageClassifier>, Box<dyn std::error::Error + Send + Sync>> {
        if self.should_fail {
            return Err("fake loader configured to fail".into());
        }
        Ok(Arc::new(ImageClassifierFake::new()))
    }
}
