use crate::classifier::adapt;
use crate::classifier::interface::{ImageClassifier, Prediction};
use crate::identifier::core::{Effect, Msg};
use crate::identifier::main::Identifier;
use image::DynamicImage;
use std::sync::{Arc, Mutex};

impl Identifier {
    pub fn run_effect(&self, effect: Effect) {
        let _ = self
            .logger
            .info(&format!("effect: {}", effect.to_display_string()));

        match effect {
            Effect::LoadModels => {
                let loaded = self.load_models();
                if let Err(error) = &loaded {
                    let _ = self.logger.error(&format!("model loading failed: {}", error));
                }
                self.send(Msg::ModelsLoadDone(loaded));
            }
            Effect::FetchImage { reference } => {
                let fetched = self.image_fetcher.fetch(&reference);
                self.send(Msg::ImageFetchDone(fetched));
            }
            Effect::PredictPrimary { image } => {
                let predicted = self
                    .classify_with(&self.primary, &image)
                    .map(adapt::from_primary);
                self.send(Msg::PrimaryPredictDone(predicted));
            }
            Effect::ClassifySecondary { image } => {
                let classified = self
                    .classify_with(&self.secondary, &image)
                    .map(adapt::from_secondary);
                self.send(Msg::SecondaryClassifyDone(classified));
            }
        }
    }

    /// The secondary model only starts loading once the primary has loaded.
    fn load_models(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let primary = self.primary_loader.load()?;
        *self.primary.lock().unwrap() = Some(primary);

        let secondary = self.secondary_loader.load()?;
        *self.secondary.lock().unwrap() = Some(secondary);

        Ok(())
    }

    fn classify_with(
        &self,
        slot: &Arc<Mutex<Option<Arc<dyn ImageClassifier>>>>,
        image: &DynamicImage,
    ) -> Result<Vec<Prediction>, Box<dyn std::error::Error + Send + Sync>> {
        let classifier = slot
            .lock()
            .unwrap()
            .clone()
            .ok_or("classifier not loaded")?;
        classifier.classify(image)
    }
}
