use image::{imageops, DynamicImage, RgbImage};
use tract_onnx::prelude::*;

/// Fits the image into the target size, letterboxing non-square inputs so
/// aspect ratio is preserved.
pub fn resize_image(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    if image.width() == image.height() {
        return image.resize_exact(width, height, imageops::FilterType::Triangle);
    }

    let scaled = image.resize(width, height, imageops::FilterType::Triangle);
    let x_offset = (width - scaled.width()) / 2;
    let y_offset = (height - scaled.height()) / 2;

    let mut padded = RgbImage::new(width, height);
    imageops::replace(
        &mut padded,
        &scaled.to_rgb8(),
        x_offset as i64,
        y_offset as i64,
    );

    DynamicImage::ImageRgb8(padded)
}

fn image_to_tensor(image: &DynamicImage) -> Tensor {
    let rgb = image.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);

    tract_ndarray::Array4::from_shape_fn((1, 3, height, width), |(_, c, y, x)| {
        rgb.get_pixel(x as u32, y as u32)[c] as f32 / 255.0
    })
    .into()
}

/// Resizes and converts to the CHW f32 tensor shape classification models
/// expect, values normalized to [0, 1].
pub fn resize_image_to_tensor(
    image: &DynamicImage,
    width: u32,
    height: u32,
) -> Result<Tensor, Box<dyn std::error::Error + Send + Sync>> {
    let resized = resize_image(image, width, height);
    Ok(image_to_tensor(&resized))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn solid_image(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        let mut img = ImageBuffer::new(width, height);
        for pixel in img.pixels_mut() {
            *pixel = Rgb(color);
        }
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_square_image_tensor_shape() {
        let image = solid_image(100, 100, [255, 0, 0]);

        let tensor = resize_image_to_tensor(&image, 224, 224).unwrap();
        assert_eq!(tensor.shape(), &[1, 3, 224, 224]);

        let slice = tensor.as_slice::<f32>().unwrap();
        assert_eq!(slice[0], 1.0); // red channel
        assert_eq!(slice[224 * 224], 0.0); // green channel
        assert_eq!(slice[2 * 224 * 224], 0.0); // blue channel
    }

    #[test]
    fn test_rectangle_image_is_centered() {
        let image = solid_image(200, 100, [255, 0, 0]);

        let tensor = resize_image_to_tensor(&image, 224, 224).unwrap();
        assert_eq!(tensor.shape(), &[1, 3, 224, 224]);

        // The scaled content covers the center; the letterbox bands do not.
        let slice = tensor.as_slice::<f32>().unwrap();
        let center = 112 * 224 + 112;
        assert_eq!(slice[center], 1.0);
        let top_left = 0;
        assert_eq!(slice[top_left], 0.0);
    }

    #[test]
    fn test_normalization() {
        let image = solid_image(64, 64, [128, 128, 128]);

        let tensor = resize_image_to_tensor(&image, 224, 224).unwrap();
        let slice = tensor.as_slice::<f32>().unwrap();

        let expected = 128.0 / 255.0;
        assert!((slice[0] - expected).abs() < 0.0001);
    }
}
