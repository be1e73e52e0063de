use crate::{spectrum::fftfreq, Dims, Error, Plane};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Polar frequency coordinates `(r, θ)` of every bin of a spectrum.
///
/// By default both axes share the sample spacing of the longer one, so the
/// longer axis spans `[-π, π)` and the shorter proportionally less, which keeps
/// filters isotropic on non-square images. With `stretch` each axis spans
/// `[-π, π)` on its own.
///
/// Building the grid is as expensive as one filter evaluation, so a grid is
/// built once per octave and shared by every subband in it.
#[derive(Clone, Debug)]
pub struct FrequencyGrid {
    dims: Dims,
    radius: Vec<f64>,
    angle: Vec<f64>,
}

impl FrequencyGrid {
    pub fn new(dims: Dims, stretch: bool) -> Self {
        let (w, h) = (dims.width as usize, dims.height as usize);
        let longest = w.max(h) as f64;

        let spacing = |n: usize| {
            if stretch {
                1.0 / (2.0 * PI)
            } else {
                1.0 / (2.0 * PI * n as f64 / longest)
            }
        };

        let w_y = fftfreq(h, spacing(h));
        let w_x = fftfreq(w, spacing(w));

        let mut radius = Vec::with_capacity(dims.len());
        let mut angle = Vec::with_capacity(dims.len());
        for fy in &w_y {
            for fx in &w_x {
                radius.push(fy.hypot(*fx));
                angle.push(fy.atan2(*fx));
            }
        }

        Self {
            dims,
            radius,
            angle,
        }
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Evaluates a transfer function at every bin
    pub fn transfer<F: Fn(f64, f64) -> f64>(&self, filter: F) -> Plane<f64> {
        let mut values = Plane::filled(self.dims, 0.0);
        for ((v, r), th) in values
            .as_mut_slice()
            .iter_mut()
            .zip(&self.radius)
            .zip(&self.angle)
        {
            *v = filter(*r, *th);
        }
        values
    }

    /// Multiplies `spectrum` by the transfer function `filter`
    pub fn apply<F: Fn(f64, f64) -> f64>(
        &self,
        spectrum: &Plane<Complex64>,
        filter: F,
    ) -> Result<Plane<Complex64>, Error> {
        if spectrum.dims() != self.dims {
            return Err(Error::shape("filtered spectrum", self.dims, spectrum.dims()));
        }

        let mut filtered = spectrum.clone();
        self.filter_in_place(&mut filtered, filter);
        Ok(filtered)
    }

    fn filter_in_place<F: Fn(f64, f64) -> f64>(
        &self,
        spectrum: &mut Plane<Complex64>,
        filter: F,
    ) {
        for ((c, r), th) in spectrum
            .as_mut_slice()
            .iter_mut()
            .zip(&self.radius)
            .zip(&self.angle)
        {
            *c *= filter(*r, *th);
        }
    }
}

/// One-shot filtering for callers that only filter a spectrum once
pub fn apply_filter<F: Fn(f64, f64) -> f64>(
    spectrum: &Plane<Complex64>,
    filter: F,
    stretch: bool,
) -> Plane<Complex64> {
    let mut filtered = spectrum.clone();
    FrequencyGrid::new(spectrum.dims(), stretch).filter_in_place(&mut filtered, filter);
    filtered
}
