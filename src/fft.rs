//! 2-D discrete Fourier transforms on top of `rustfft`
//!
//! Plan caching is a property of the engine handed to a
//! [`Session`](crate::Session), never of the crate itself.

use crate::Plane;
use num_complex::Complex64;
use rustfft::{Fft, FftDirection, FftPlanner};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Source of 1-D FFT plans, and through the provided methods, of the
/// separable 2-D transforms the pyramid is built on.
///
/// The forward transform is unnormalized, the inverse is scaled by
/// `1 / (width * height)`, so `inverse(forward(x)) == x`.
pub trait TransformEngine: Send + Sync {
    fn plan(&self, len: usize, direction: FftDirection) -> Arc<dyn Fft<f64>>;

    fn forward(&self, plane: &mut Plane<Complex64>) {
        transform_2d(self, plane, FftDirection::Forward);
    }

    fn inverse(&self, plane: &mut Plane<Complex64>) {
        transform_2d(self, plane, FftDirection::Inverse);

        let scale = 1.0 / plane.dims().len() as f64;
        for c in plane.as_mut_slice() {
            *c *= scale;
        }
    }
}

/// Remembers every plan it hands out, keyed by length and direction, so the
/// planning cost is paid once per size. Every subband of an octave shares its
/// dimensions, which makes this the common case.
#[derive(Default)]
pub struct CachedPlanner {
    plans: Mutex<HashMap<(usize, bool), Arc<dyn Fft<f64>>>>,
}

impl CachedPlanner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransformEngine for CachedPlanner {
    fn plan(&self, len: usize, direction: FftDirection) -> Arc<dyn Fft<f64>> {
        // The map only ever gains complete entries, so a poisoned lock is
        // still safe to read from
        let mut plans = self.plans.lock().unwrap_or_else(PoisonError::into_inner);
        plans
            .entry((len, direction == FftDirection::Forward))
            .or_insert_with(|| FftPlanner::new().plan_fft(len, direction))
            .clone()
    }
}

/// Plans from scratch on every call, sharing nothing between calls
#[derive(Default, Clone, Copy)]
pub struct FreshPlanner;

impl TransformEngine for FreshPlanner {
    fn plan(&self, len: usize, direction: FftDirection) -> Arc<dyn Fft<f64>> {
        FftPlanner::new().plan_fft(len, direction)
    }
}

fn transform_2d<E: TransformEngine + ?Sized>(
    engine: &E,
    plane: &mut Plane<Complex64>,
    direction: FftDirection,
) {
    let (width, height) = (plane.width(), plane.height());
    if width == 0 || height == 0 {
        return;
    }

    // Rows are contiguous, so a single call processes every one of them
    let fft_width = engine.plan(width, direction);
    let mut scratch = vec![Complex64::default(); fft_width.get_inplace_scratch_len()];
    fft_width.process_with_scratch(plane.as_mut_slice(), &mut scratch);

    // Columns go through a transposed copy and are written back in place
    let mut transposed = transpose(width, height, plane.as_slice());
    let fft_height = engine.plan(height, direction);
    scratch.resize(fft_height.get_inplace_scratch_len(), Complex64::default());
    fft_height.process_with_scratch(&mut transposed, &mut scratch);

    let buffer = plane.as_mut_slice();
    for (x, column) in transposed.chunks_exact(height).enumerate() {
        for (y, value) in column.iter().enumerate() {
            buffer[y * width + x] = *value;
        }
    }
}

fn transpose<T: Copy + Default>(width: usize, height: usize, matrix: &[T]) -> Vec<T> {
    let mut transposed = vec![T::default(); matrix.len()];
    for (y, row) in matrix.chunks_exact(width).enumerate() {
        for (x, value) in row.iter().enumerate() {
            transposed[x * height + y] = *value;
        }
    }
    transposed
}
