//! Halving and doubling the resolution of an image held as a spectrum.
//!
//! The spectral methods crop or zero-pad around the zero frequency, aligned
//! through [`window_offset`] in both directions so that a crop followed by a
//! pad puts every retained bin back where it came from. The spatial methods go
//! through the image domain and are only approximations.

use crate::{
    fft::TransformEngine,
    spectrum::{fftshift, ifftshift, window_offset},
    Dims, Error, Plane,
};
use num_complex::Complex64;

/// How [`downsample2`] halves the resolution
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Downsample {
    /// Keep the central `⌈H/2⌉ × ⌈W/2⌉` bins of the spectrum
    Crop,
    /// Drop every other sample in the image domain. Any energy above the new
    /// Nyquist frequency aliases.
    Skip,
}

/// How [`upsample2`] restores the resolution
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Upsample {
    /// Zero-pad the spectrum around its centre
    Crop,
    /// Insert the midpoint between neighbouring samples in the image domain
    Bilinear,
}

/// Halves the resolution of `spectrum` to `⌈H/2⌉ × ⌈W/2⌉`.
///
/// The spectrum must already be band limited to the retained half, which is
/// the caller's job; nothing here checks it.
pub fn downsample2<E: TransformEngine + ?Sized>(
    spectrum: &Plane<Complex64>,
    method: Downsample,
    engine: &E,
) -> Plane<Complex64> {
    let target = spectrum.dims().halved();

    match method {
        Downsample::Crop => {
            let centred = fftshift(spectrum);
            let off_x = window_offset(spectrum.width(), target.width as usize);
            let off_y = window_offset(spectrum.height(), target.height as usize);

            ifftshift(&Plane::from_fn(target, |x, y| {
                centred.get(x + off_x, y + off_y)
            }))
        }
        Downsample::Skip => {
            let mut image = spectrum.clone();
            engine.inverse(&mut image);

            let mut decimated = Plane::from_fn(target, |x, y| image.get(2 * x, 2 * y));
            engine.forward(&mut decimated);
            decimated
        }
    }
}

/// Brings `spectrum` up to `target`, which must lie between the current
/// dimensions and twice them, as produced by the [`downsample2`] of a
/// `target` sized spectrum.
pub fn upsample2<E: TransformEngine + ?Sized>(
    spectrum: &Plane<Complex64>,
    target: Dims,
    method: Upsample,
    engine: &E,
) -> Result<Plane<Complex64>, Error> {
    let source = spectrum.dims();
    let doubled = Dims::new(source.width * 2, source.height * 2);
    if target.width < source.width
        || target.height < source.height
        || target.width > doubled.width
        || target.height > doubled.height
    {
        return Err(Error::shape("upsampling target", doubled, target));
    }

    let upsampled = match method {
        Upsample::Crop => {
            let centred = fftshift(spectrum);
            let (tw, th) = (target.width as usize, target.height as usize);
            let off_x = window_offset(tw, spectrum.width());
            let off_y = window_offset(th, spectrum.height());

            let mut padded = Plane::filled(target, Complex64::default());
            for y in 0..spectrum.height() {
                for x in 0..spectrum.width() {
                    padded.set(x + off_x, y + off_y, centred.get(x, y));
                }
            }
            ifftshift(&padded)
        }
        Upsample::Bilinear => {
            let mut image = spectrum.clone();
            engine.inverse(&mut image);

            let (w, h) = (image.width(), image.height());
            let mut interpolated = Plane::from_fn(target, |x, y| {
                let (x0, x1) = midpoint_sources(x, w);
                let (y0, y1) = midpoint_sources(y, h);

                let top = image.get(x0, y0) + image.get(x1, y0);
                let bottom = image.get(x0, y1) + image.get(x1, y1);
                (top + bottom) * 0.25
            });
            engine.forward(&mut interpolated);
            interpolated
        }
    };

    Ok(upsampled)
}

/// The two source samples averaged into sample `i` of an axis doubled from
/// length `n`: even samples copy, odd samples take the midpoint, and the last
/// one repeats the edge.
#[inline]
fn midpoint_sources(i: usize, n: usize) -> (usize, usize) {
    if i + 1 >= 2 * n - 1 {
        (n - 1, n - 1)
    } else if i % 2 == 0 {
        (i / 2, i / 2)
    } else {
        (i / 2, i / 2 + 1)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fft::CachedPlanner;

    /// A spectrum whose energy sits strictly inside the band kept by a crop
    fn low_frequency_spectrum(dims: Dims) -> Plane<Complex64> {
        let (w, h) = (dims.width as i64, dims.height as i64);
        let limit_x = (dims.halved().width as i64 - 1) / 2;
        let limit_y = (dims.halved().height as i64 - 1) / 2;

        Plane::from_fn(dims, |x, y| {
            let fx = if (x as i64) < (w + 1) / 2 { x as i64 } else { x as i64 - w };
            let fy = if (y as i64) < (h + 1) / 2 { y as i64 } else { y as i64 - h };

            if fx.abs() <= limit_x && fy.abs() <= limit_y {
                Complex64::new((fx * 3 - fy) as f64, (fx + fy * 2) as f64 + 0.5)
            } else {
                Complex64::default()
            }
        })
    }

    #[test]
    fn crop_then_pad_restores_low_frequency_spectra() {
        let engine = CachedPlanner::new();

        for &(w, h) in &[(8, 8), (12, 6), (16, 10)] {
            let dims = Dims::new(w, h);
            let spectrum = low_frequency_spectrum(dims);

            let down = downsample2(&spectrum, Downsample::Crop, &engine);
            assert_eq!(down.dims(), dims.halved());

            let up = upsample2(&down, dims, Upsample::Crop, &engine).unwrap();
            assert_eq!(up, spectrum, "{}x{}", w, h);
        }
    }

    #[test]
    fn crop_keeps_bins_at_their_frequency() {
        let engine = CachedPlanner::new();
        let dims = Dims::new(9, 7);
        let spectrum = Plane::from_fn(dims, |x, y| Complex64::new(x as f64, y as f64));

        let down = downsample2(&spectrum, Downsample::Crop, &engine);
        assert_eq!(down.dims(), Dims::new(5, 4));

        // 5 bins along x hold frequencies 0, 1, 2, -2, -1
        let expected_x = [0, 1, 2, 7, 8];
        // 4 bins along y hold frequencies 0, 1, -2, -1
        let expected_y = [0, 1, 5, 6];
        for (y, &sy) in expected_y.iter().enumerate() {
            for (x, &sx) in expected_x.iter().enumerate() {
                assert_eq!(down.get(x, y), spectrum.get(sx, sy));
            }
        }
    }

    #[test]
    fn skip_decimates_the_image() {
        let engine = CachedPlanner::new();
        let dims = Dims::new(6, 5);
        let image = Plane::from_fn(dims, |x, y| Complex64::new((x + 10 * y) as f64, 0.0));

        let mut spectrum = image.clone();
        engine.forward(&mut spectrum);

        let mut down = downsample2(&spectrum, Downsample::Skip, &engine);
        engine.inverse(&mut down);

        let expected = Plane::from_fn(Dims::new(3, 3), |x, y| image.get(2 * x, 2 * y));
        assert!(down.max_abs_diff(&expected).unwrap() < 1e-9);
    }

    #[test]
    fn bilinear_interpolates_midpoints() {
        let engine = CachedPlanner::new();
        let image = Plane::from_fn(Dims::new(3, 2), |x, y| {
            Complex64::new((x * 2 + y * 4) as f64, 0.0)
        });

        let mut spectrum = image.clone();
        engine.forward(&mut spectrum);

        let mut up = upsample2(&spectrum, Dims::new(6, 4), Upsample::Bilinear, &engine).unwrap();
        engine.inverse(&mut up);

        // a ramp stays a ramp, with the edge sample repeated
        let expected_x = [0.0, 1.0, 2.0, 3.0, 4.0, 4.0];
        let expected_y = [0.0, 2.0, 4.0, 4.0];
        for (y, ey) in expected_y.iter().enumerate() {
            for (x, ex) in expected_x.iter().enumerate() {
                assert!((up.get(x, y).re - (ex + ey)).abs() < 1e-9);
                assert!(up.get(x, y).im.abs() < 1e-9);
            }
        }
    }

    #[test]
    fn bilinear_can_target_odd_sizes() {
        let engine = CachedPlanner::new();
        let image = Plane::filled(Dims::new(4, 3), Complex64::new(2.5, 0.0));

        let mut spectrum = image.clone();
        engine.forward(&mut spectrum);

        let mut up = upsample2(&spectrum, Dims::new(7, 5), Upsample::Bilinear, &engine).unwrap();
        engine.inverse(&mut up);

        let expected = Plane::filled(Dims::new(7, 5), Complex64::new(2.5, 0.0));
        assert!(up.max_abs_diff(&expected).unwrap() < 1e-9);
    }

    #[test]
    fn upsample_rejects_out_of_range_targets() {
        let engine = CachedPlanner::new();
        let spectrum = Plane::filled(Dims::new(4, 4), Complex64::default());

        for target in [Dims::new(3, 4), Dims::new(9, 8), Dims::new(8, 9)].iter() {
            for method in [Upsample::Crop, Upsample::Bilinear].iter() {
                assert!(matches!(
                    upsample2(&spectrum, *target, *method, &engine),
                    Err(Error::ShapeMismatch(_))
                ));
            }
        }
    }
}
