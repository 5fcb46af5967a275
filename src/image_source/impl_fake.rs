use crate::identifier::core::ImageReference;
use crate::image_source::interface::ImageFetcher;
use image::DynamicImage;

pub struct ImageFetcherFake {
    should_fail: bool,
}

#[allow(dead_code)]
impl ImageFetcherFake {
    pub fn new() -> Self {
        Self { should_fail: false }
    }

    pub fn failing() -> Self {
        Self { should_fail: true }
    }
}

impl ImageFetcher for ImageFetcherFake {
    fn fetch(
        &self,
        _reference: &ImageReference,
    ) -> Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>> {
        if self.should_fail {
            return Err("fake fetcher configured to fail".into());
        }
        Ok(DynamicImage::new_rgb8(64, 64))
    }
}
