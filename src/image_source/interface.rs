use crate::identifier::core::ImageReference;
use image::DynamicImage;

/// Turns the current image reference into decoded pixels. References are
/// not validated before this point; a bad URL or corrupt file surfaces here.
pub trait ImageFetcher: Send + Sync {
    fn fetch(
        &self,
        reference: &ImageReference,
    ) -> Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>>;
}
