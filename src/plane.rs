//! Row-major 2-D sample buffers used for images, spectra and subbands

use crate::{Dims, Error};
use num_complex::Complex64;

/// A rectangular grid of samples stored row by row.
///
/// Real planes hold spatial images, complex planes hold spectra as well as
/// the complex subbands of a [`Pyramid`](crate::Pyramid).
#[derive(Clone, Debug, PartialEq)]
pub struct Plane<T> {
    dims: Dims,
    data: Vec<T>,
}

impl<T: Copy> Plane<T> {
    /// Wraps an existing row-major buffer, which must hold exactly
    /// `width * height` samples
    pub fn new(dims: Dims, data: Vec<T>) -> Result<Self, Error> {
        if data.len() != dims.len() {
            return Err(Error::shape(
                "sample buffer",
                dims,
                Dims::new(data.len() as u32, 1),
            ));
        }

        Ok(Self { dims, data })
    }

    /// Builds a plane by evaluating `f(x, y)` at every sample
    pub fn from_fn<F: FnMut(usize, usize) -> T>(dims: Dims, mut f: F) -> Self {
        let (w, h) = (dims.width as usize, dims.height as usize);
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                data.push(f(x, y));
            }
        }

        Self { dims, data }
    }

    pub fn filled(dims: Dims, value: T) -> Self {
        Self {
            dims,
            data: vec![value; dims.len()],
        }
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.dims.width as usize
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.dims.height as usize
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[y * self.width() + x]
    }

    #[inline]
    pub(crate) fn set(&mut self, x: usize, y: usize, value: T) {
        let w = self.width();
        self.data[y * w + x] = value;
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<T> {
        self.data
    }

    pub fn map<U, F: FnMut(T) -> U>(&self, f: F) -> Plane<U> {
        Plane {
            dims: self.dims,
            data: self.data.iter().copied().map(f).collect(),
        }
    }
}

impl Plane<f64> {
    pub fn to_complex(&self) -> Plane<Complex64> {
        self.map(|v| Complex64::new(v, 0.0))
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }
}

impl Plane<Complex64> {
    /// The real part, which is what callers keep after reconstruction
    pub fn re(&self) -> Plane<f64> {
        self.map(|c| c.re)
    }

    pub fn im(&self) -> Plane<f64> {
        self.map(|c| c.im)
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|c| c.re.is_finite() && c.im.is_finite())
    }

    /// Largest magnitude of the sample-wise difference, or `None` when the
    /// planes don't have the same dimensions
    pub fn max_abs_diff(&self, other: &Self) -> Option<f64> {
        if self.dims != other.dims {
            return None;
        }

        Some(
            self.data
                .iter()
                .zip(&other.data)
                .map(|(a, b)| (a - b).norm())
                .fold(0.0, f64::max),
        )
    }

    pub(crate) fn add_assign(&mut self, other: &Self) {
        debug_assert_eq!(self.dims, other.dims);
        for (a, b) in self.data.iter_mut().zip(&other.data) {
            *a += *b;
        }
    }
}
