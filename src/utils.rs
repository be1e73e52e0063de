use crate::{Dims, Plane};
use std::path::Path;

/// Helper type used to define the source of an image to decompose
#[derive(Clone)]
pub enum ImageSource<'a> {
    /// A raw buffer of image data, see `image::load_from_memory` for details
    /// on what is supported
    Memory(&'a [u8]),
    /// The path to an image to load from disk. The image format is inferred
    /// from the file extension, see `image::open` for details
    Path(&'a Path),
    /// An already loaded image
    Image(image::DynamicImage),
}

impl<'a> From<image::DynamicImage> for ImageSource<'a> {
    fn from(img: image::DynamicImage) -> Self {
        Self::Image(img)
    }
}

impl<'a, S> From<&'a S> for ImageSource<'a>
where
    S: AsRef<Path> + 'a,
{
    fn from(path: &'a S) -> Self {
        Self::Path(path.as_ref())
    }
}

pub fn load_dynamic_image(src: ImageSource<'_>) -> Result<image::DynamicImage, image::ImageError> {
    match src {
        ImageSource::Memory(data) => image::load_from_memory(data),
        ImageSource::Path(path) => image::open(path),
        ImageSource::Image(img) => Ok(img),
    }
}

/// Loads an image and converts it to a grayscale plane, see
/// [`plane_from_luma`]
pub fn load_plane<'a, I: Into<ImageSource<'a>>>(
    src: I,
) -> Result<Plane<f64>, image::ImageError> {
    let img = load_dynamic_image(src.into())?;
    Ok(plane_from_luma(&img.to_luma8()))
}

/// Converts a grayscale image to a plane with samples in `[0, 1]`
pub fn plane_from_luma(img: &image::GrayImage) -> Plane<f64> {
    let dims = Dims::new(img.width(), img.height());
    Plane::from_fn(dims, |x, y| {
        f64::from(img.get_pixel(x as u32, y as u32)[0]) / 255.0
    })
}

/// Converts a plane with samples in `[0, 1]` back to a grayscale image.
/// Samples outside of that range are clamped.
pub fn plane_to_luma(plane: &Plane<f64>) -> image::GrayImage {
    let dims = plane.dims();
    image::GrayImage::from_fn(dims.width, dims.height, |x, y| {
        let value = plane.get(x as usize, y as usize).max(0.0).min(1.0);
        image::Luma([(value * 255.0).round() as u8])
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn luma_round_trip() {
        let img = image::GrayImage::from_fn(5, 3, |x, y| image::Luma([(x * 50 + y) as u8]));
        let plane = plane_from_luma(&img);

        assert_eq!(plane.dims(), Dims::new(5, 3));
        assert_eq!(plane.get(0, 0), 0.0);
        assert!((plane.get(4, 2) - 202.0 / 255.0).abs() < 1e-12);
        assert_eq!(plane_to_luma(&plane), img);
    }

    #[test]
    fn out_of_range_samples_are_clamped() {
        let plane = Plane::new(Dims::new(3, 1), vec![-0.5, 0.5, 1.7]).unwrap();
        let img = plane_to_luma(&plane);

        assert_eq!(img.get_pixel(0, 0)[0], 0);
        assert_eq!(img.get_pixel(1, 0)[0], 128);
        assert_eq!(img.get_pixel(2, 0)[0], 255);
    }

    #[test]
    fn loads_from_memory() {
        let img = image::GrayImage::from_fn(4, 4, |x, y| image::Luma([(x * 60 + y * 4) as u8]));
        let mut encoded = Vec::new();
        image::DynamicImage::ImageLuma8(img.clone())
            .write_to(&mut encoded, image::ImageOutputFormat::Png)
            .unwrap();

        let plane = load_plane(ImageSource::Memory(&encoded)).unwrap();
        assert_eq!(plane, plane_from_luma(&img));
    }
}
