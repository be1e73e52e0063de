use crate::{
    filters,
    grid::FrequencyGrid,
    resample,
    spectrum::conjugate_symmetrize,
    workers, Dims, Error, Plane, Resampling, TransformEngine,
};
use log::debug;
use num_complex::Complex64;

/// Settings the transform runs with, resolved from the session parameters
#[derive(Clone, Debug)]
pub(crate) struct TransformParams {
    pub(crate) depth: usize,
    pub(crate) scales: usize,
    pub(crate) orientations: usize,
    pub(crate) stretch: bool,
    pub(crate) resampling: Resampling,
    pub(crate) max_thread_count: usize,
}

/// The result of decomposing an image.
///
/// Subbands are indexed `[octave][scale][orientation]`. Every subband of
/// octave `d` has the dimensions of the image halved `d` times, rounding up.
/// The high residual matches the image and the low residual matches the
/// octave below the last one.
///
/// A pyramid also remembers the grid stretching and the resampling method it
/// was decomposed with, and is always reconstructed with the same ones.
#[derive(Clone, Debug)]
pub struct Pyramid {
    dims: Dims,
    scales: usize,
    orientations: usize,
    stretch: bool,
    resampling: Resampling,
    subbands: Vec<Vec<Vec<Plane<Complex64>>>>,
    high_residual: Plane<Complex64>,
    low_residual: Plane<Complex64>,
}

impl Pyramid {
    /// Assembles a pyramid from planes produced elsewhere, typically an
    /// edited copy of the parts of another pyramid.
    ///
    /// The image dimensions are taken from the high residual, and every
    /// other plane has to agree with them. The pyramid is assumed to come
    /// from an unstretched grid with spectral resampling, see
    /// [`Pyramid::with_settings`] otherwise.
    pub fn from_parts(
        subbands: Vec<Vec<Vec<Plane<Complex64>>>>,
        high_residual: Plane<Complex64>,
        low_residual: Plane<Complex64>,
    ) -> Result<Self, Error> {
        let dims = high_residual.dims();
        let depth = subbands.len();
        let scales = subbands.first().map_or(0, Vec::len);
        let orientations = subbands
            .first()
            .and_then(|octave| octave.first())
            .map_or(0, Vec::len);

        if depth > 0 {
            if scales == 0 {
                return Err(Error::invalid("scales", 0, 1));
            }
            if orientations == 0 {
                return Err(Error::invalid("orientations", 0, 1));
            }
        }
        check_image_dims(dims, depth as u32)?;

        let grid = Dims::new(orientations as u32, scales as u32);
        for (d, octave) in subbands.iter().enumerate() {
            if let Some(row) = octave.iter().find(|row| row.len() != orientations) {
                let found = Dims::new(row.len() as u32, octave.len() as u32);
                return Err(Error::shape(format!("subbands of octave {}", d), grid, found));
            }
            if octave.len() != scales {
                let found = Dims::new(orientations as u32, octave.len() as u32);
                return Err(Error::shape(format!("subbands of octave {}", d), grid, found));
            }

            let expected = dims.octave(d as u32);
            for (n, row) in octave.iter().enumerate() {
                for (k, band) in row.iter().enumerate() {
                    if band.dims() != expected {
                        return Err(Error::shape(
                            format!("subband ({}, {}, {})", d, n, k),
                            expected,
                            band.dims(),
                        ));
                    }
                }
            }
        }

        let expected = dims.octave(depth as u32);
        if low_residual.dims() != expected {
            return Err(Error::shape("low residual", expected, low_residual.dims()));
        }

        Ok(Self {
            dims,
            scales,
            orientations,
            stretch: false,
            resampling: Resampling::Spectral,
            subbands,
            high_residual,
            low_residual,
        })
    }

    /// Records the grid stretching and resampling method the parts were
    /// decomposed with
    pub fn with_settings(mut self, stretch: bool, resampling: Resampling) -> Self {
        self.stretch = stretch;
        self.resampling = resampling;
        self
    }

    /// Dimensions of the decomposed image
    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Number of octaves
    #[inline]
    pub fn depth(&self) -> usize {
        self.subbands.len()
    }

    /// Number of scales per octave
    #[inline]
    pub fn scales(&self) -> usize {
        self.scales
    }

    /// Number of orientations per scale
    #[inline]
    pub fn orientations(&self) -> usize {
        self.orientations
    }

    /// Whether each frequency axis was normalized on its own
    #[inline]
    pub fn stretch(&self) -> bool {
        self.stretch
    }

    #[inline]
    pub fn resampling(&self) -> Resampling {
        self.resampling
    }

    #[inline]
    pub fn subbands(&self) -> &[Vec<Vec<Plane<Complex64>>>] {
        &self.subbands
    }

    /// The subband of octave `depth` at scale `scale` and orientation
    /// `orientation`.
    ///
    /// # Panics
    /// If any of the indices is out of range.
    pub fn subband(&self, depth: usize, scale: usize, orientation: usize) -> &Plane<Complex64> {
        &self.subbands[depth][scale][orientation]
    }

    #[inline]
    pub fn high_residual(&self) -> &Plane<Complex64> {
        &self.high_residual
    }

    #[inline]
    pub fn low_residual(&self) -> &Plane<Complex64> {
        &self.low_residual
    }

    /// Splits the pyramid into the planes [`Pyramid::from_parts`] takes
    #[allow(clippy::type_complexity)]
    pub fn into_parts(
        self,
    ) -> (
        Vec<Vec<Vec<Plane<Complex64>>>>,
        Plane<Complex64>,
        Plane<Complex64>,
    ) {
        (self.subbands, self.high_residual, self.low_residual)
    }
}

/// An image can go through `depth` octaves if both sides are at least
/// `2^depth` samples long
pub(crate) fn check_image_dims(dims: Dims, depth: u32) -> Result<(), Error> {
    let min = 1u64.checked_shl(depth).unwrap_or(u64::MAX);

    if u64::from(dims.width) < min {
        return Err(Error::invalid("image width", dims.width.into(), min));
    }
    if u64::from(dims.height) < min {
        return Err(Error::invalid("image height", dims.height.into(), min));
    }

    Ok(())
}

fn ensure_finite<F: FnOnce() -> String>(
    plane: Plane<Complex64>,
    describe: F,
) -> Result<Plane<Complex64>, Error> {
    if plane.is_finite() {
        Ok(plane)
    } else {
        Err(Error::NonFinite(describe()))
    }
}

/// Brings a filtered spectrum back to the image domain
fn to_image<E: TransformEngine + ?Sized, F: FnOnce() -> String>(
    engine: &E,
    mut spectrum: Plane<Complex64>,
    describe: F,
) -> Result<Plane<Complex64>, Error> {
    engine.inverse(&mut spectrum);
    ensure_finite(spectrum, describe)
}

pub(crate) fn decompose<E: TransformEngine + ?Sized>(
    params: &TransformParams,
    engine: &E,
    image: &Plane<f64>,
) -> Result<Pyramid, Error> {
    let dims = image.dims();
    check_image_dims(dims, params.depth as u32)?;
    if !image.is_finite() {
        return Err(Error::NonFinite("input image".to_owned()));
    }

    let (scales, orientations) = (params.scales, params.orientations);
    let (downsample, _) = params.resampling.methods();

    let mut spectrum = image.to_complex();
    engine.forward(&mut spectrum);

    let mut grid = FrequencyGrid::new(dims, params.stretch);
    let high_residual = to_image(
        engine,
        grid.apply(&spectrum, filters::high_residual)?,
        || "high residual".to_owned(),
    )?;

    let mut subbands = Vec::with_capacity(params.depth);
    for d in 0..params.depth {
        debug!(
            "decomposing octave {} at {}x{}",
            d,
            spectrum.width(),
            spectrum.height()
        );

        let bands = workers::fan_out(
            scales * orientations,
            params.max_thread_count,
            |job| {
                let (n, k) = (job / orientations, job % orientations);
                let band = grid.apply(&spectrum, |r, theta| {
                    filters::pyramid_filter(r, theta, n, scales, k, orientations)
                })?;

                to_image(engine, band, || format!("subband ({}, {}, {})", d, n, k))
            },
        )?;

        let mut bands = bands.into_iter();
        subbands.push(
            (0..scales)
                .map(|_| bands.by_ref().take(orientations).collect())
                .collect(),
        );

        let low = grid.apply(&spectrum, filters::lowpass)?;
        spectrum = resample::downsample2(&low, downsample, engine);
        grid = FrequencyGrid::new(spectrum.dims(), params.stretch);
    }

    if params.depth == 0 {
        spectrum = grid.apply(&spectrum, filters::half_band_lowpass)?;
    }
    let low_residual = to_image(engine, spectrum, || "low residual".to_owned())?;

    Ok(Pyramid {
        dims,
        scales,
        orientations,
        stretch: params.stretch,
        resampling: params.resampling,
        subbands,
        high_residual,
        low_residual,
    })
}

/// Inverse of [`decompose`]. Only the thread count is taken from `params`,
/// everything else comes from the pyramid.
pub(crate) fn reconstruct<E: TransformEngine + ?Sized>(
    params: &TransformParams,
    engine: &E,
    pyramid: &Pyramid,
) -> Result<Plane<Complex64>, Error> {
    let (scales, orientations) = (pyramid.scales, pyramid.orientations);
    let stretch = pyramid.stretch;
    let (_, upsample) = pyramid.resampling.methods();

    let mut spectrum = pyramid.low_residual.clone();
    engine.forward(&mut spectrum);

    if pyramid.depth() == 0 {
        let grid = FrequencyGrid::new(spectrum.dims(), stretch);
        spectrum = grid.apply(&spectrum, filters::half_band_lowpass)?;
    }

    for (d, octave) in pyramid.subbands.iter().enumerate().rev() {
        let dims = pyramid.dims.octave(d as u32);
        debug!("reconstructing octave {} at {}x{}", d, dims.width, dims.height);

        let grid = FrequencyGrid::new(dims, stretch);
        let upsampled = resample::upsample2(&spectrum, dims, upsample, engine)?;
        spectrum = grid.apply(&upsampled, filters::lowpass)?;

        let contributions = workers::fan_out(
            scales * orientations,
            params.max_thread_count,
            |job| {
                let (n, k) = (job / orientations, job % orientations);

                let mut band = octave[n][k].clone();
                engine.forward(&mut band);
                let filtered = grid.apply(&band, |r, theta| {
                    filters::pyramid_filter(r, theta, n, scales, k, orientations)
                })?;

                // the band only covers half of the orientations, the mirrored
                // conjugate fills in the other half
                let mut both_halves = conjugate_symmetrize(&filtered);
                both_halves.add_assign(&filtered);
                Ok(both_halves)
            },
        )?;

        for contribution in &contributions {
            spectrum.add_assign(contribution);
        }
    }

    let mut high = pyramid.high_residual.clone();
    engine.forward(&mut high);
    let grid = FrequencyGrid::new(pyramid.dims, stretch);
    spectrum.add_assign(&grid.apply(&high, filters::high_residual)?);

    to_image(engine, spectrum, || "reconstructed image".to_owned())
}
