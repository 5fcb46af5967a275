use crate::identifier::core::ImageReference;
use crate::image_source::interface::ImageFetcher;
use image::DynamicImage;
use std::time::Duration;

pub struct ImageFetcherHttp {
    client: reqwest::blocking::Client,
}

impl ImageFetcherHttp {
    pub fn new(timeout: Duration) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl ImageFetcher for ImageFetcherHttp {
    fn fetch(
        &self,
        reference: &ImageReference,
    ) -> Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>> {
        match reference {
            ImageReference::Url(url) => {
                let bytes = if url.starts_with("http://") || url.starts_with("https://") {
                    self.client
                        .get(url)
                        .send()?
                        .error_for_status()?
                        .bytes()?
                        .to_vec()
                } else {
                    // A pasted local path still resolves.
                    std::fs::read(url)?
                };
                Ok(image::load_from_memory(&bytes)?)
            }
            ImageReference::Upload { bytes, .. } => Ok(image::load_from_memory(bytes)?),
        }
    }
}
