//! Index conventions for spectra laid out in DFT order
//!
//! Bin `i` of a length `n` axis holds frequency `i` for `i < ⌈n/2⌉` and `i - n`
//! past that. A centred ("shifted") axis places the zero frequency at
//! [`zero_frequency_index`].

use crate::Plane;
use num_complex::Complex64;

/// Position of the zero frequency once a length `n` axis is centred
#[inline]
pub fn zero_frequency_index(n: usize) -> usize {
    n / 2
}

/// Where a centred `small` axis starts inside a centred `big` axis so that
/// both zero frequencies coincide
#[inline]
pub fn window_offset(big: usize, small: usize) -> usize {
    zero_frequency_index(big) - zero_frequency_index(small)
}

/// Frequencies of the bins of a length `n` axis for a sample spacing of
/// `spacing`, in DFT order
pub fn fftfreq(n: usize, spacing: f64) -> Vec<f64> {
    let positive = (n + 1) / 2;
    let scale = 1.0 / (n as f64 * spacing);

    (0..n)
        .map(|i| {
            let k = if i < positive {
                i as f64
            } else {
                i as f64 - n as f64
            };
            k * scale
        })
        .collect()
}

/// Moves the zero frequency to the centre of both axes
pub fn fftshift<T: Copy>(plane: &Plane<T>) -> Plane<T> {
    let (w, h) = (plane.width(), plane.height());
    let (sx, sy) = (w / 2, h / 2);
    Plane::from_fn(plane.dims(), |x, y| {
        plane.get((x + w - sx) % w, (y + h - sy) % h)
    })
}

/// Inverse of [`fftshift`], which differs from it on odd lengths
pub fn ifftshift<T: Copy>(plane: &Plane<T>) -> Plane<T> {
    let (w, h) = (plane.width(), plane.height());
    let (sx, sy) = (w / 2, h / 2);
    Plane::from_fn(plane.dims(), |x, y| plane.get((x + sx) % w, (y + sy) % h))
}

/// Returns the spectrum of the complex conjugate of the signal behind `spectrum`:
/// every bin receives the conjugate of its point reflection through the zero
/// frequency.
///
/// An even length axis has a Nyquist bin that is its own reflection, and
/// which therefore has no partner to mirror. That row or column is zeroed
/// instead, so that adding the result to `spectrum` doesn't count the Nyquist
/// content twice.
pub fn conjugate_symmetrize(spectrum: &Plane<Complex64>) -> Plane<Complex64> {
    let (w, h) = (spectrum.width(), spectrum.height());
    let nyquist_x = if w % 2 == 0 { Some(w / 2) } else { None };
    let nyquist_y = if h % 2 == 0 { Some(h / 2) } else { None };

    Plane::from_fn(spectrum.dims(), |x, y| {
        if Some(x) == nyquist_x || Some(y) == nyquist_y {
            Complex64::default()
        } else {
            spectrum.get((w - x) % w, (h - y) % h).conj()
        }
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Dims;

    fn indices(dims: Dims) -> Plane<(usize, usize)> {
        Plane::from_fn(dims, |x, y| (x, y))
    }

    #[test]
    fn frequencies_follow_dft_order() {
        assert_eq!(fftfreq(4, 1.0), vec![0.0, 0.25, -0.5, -0.25]);
        assert_eq!(fftfreq(5, 0.5), vec![0.0, 0.4, 0.8, -0.8, -0.4]);
    }

    #[test]
    fn shift_centres_the_zero_frequency() {
        for &(w, h) in &[(4, 4), (5, 3), (6, 7)] {
            let shifted = fftshift(&indices(Dims::new(w, h)));
            let zx = zero_frequency_index(w as usize);
            let zy = zero_frequency_index(h as usize);

            assert_eq!(shifted.get(zx, zy), (0, 0));
        }
    }

    #[test]
    fn ifftshift_undoes_fftshift() {
        for &(w, h) in &[(4, 4), (5, 3), (1, 6), (7, 9)] {
            let plane = indices(Dims::new(w, h));
            assert_eq!(ifftshift(&fftshift(&plane)), plane);
        }
    }

    #[test]
    fn window_offsets_align_zero_frequencies() {
        assert_eq!(window_offset(100, 50), 25);
        assert_eq!(window_offset(7, 4), 1);
        assert_eq!(window_offset(8, 4), 2);
        assert_eq!(window_offset(9, 5), 2);
    }

    #[test]
    fn symmetrizing_a_real_signal_spectrum_gives_it_back() {
        use crate::fft::{FreshPlanner, TransformEngine};

        // For odd lengths there is no Nyquist bin, and the spectrum of a real
        // signal is already Hermitian
        let mut spectrum = Plane::from_fn(Dims::new(5, 7), |x, y| {
            Complex64::new(((x * 13 + y * 5) % 11) as f64, 0.0)
        });
        FreshPlanner.forward(&mut spectrum);

        let mirrored = conjugate_symmetrize(&spectrum);
        assert!(mirrored.max_abs_diff(&spectrum).unwrap() < 1e-9);
    }

    #[test]
    fn nyquist_row_and_column_are_zeroed() {
        let spectrum = Plane::filled(Dims::new(4, 6), Complex64::new(1.0, 1.0));
        let mirrored = conjugate_symmetrize(&spectrum);

        for y in 0..6 {
            for x in 0..4 {
                let expected = if x == 2 || y == 3 {
                    Complex64::default()
                } else {
                    Complex64::new(1.0, -1.0)
                };
                assert_eq!(mirrored.get(x, y), expected, "at ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn matches_the_shift_flip_roll_construction() {
        // Conjugate, centre, flip both axes, on even axes roll by one and clear
        // the wrapped line, then un-centre
        for &(w, h) in &[(4, 6), (5, 4), (3, 5), (8, 8)] {
            let dims = Dims::new(w, h);
            let spectrum = Plane::from_fn(dims, |x, y| {
                Complex64::new((x * 7 + y) as f64, (y * 3) as f64 - x as f64)
            });

            let (w, h) = (w as usize, h as usize);
            let centred = fftshift(&spectrum.map(|c| c.conj()));
            let flipped = Plane::from_fn(dims, |x, y| centred.get(w - 1 - x, h - 1 - y));
            let rolled = Plane::from_fn(dims, |x, y| {
                if (h % 2 == 0 && y == 0) || (w % 2 == 0 && x == 0) {
                    return Complex64::default();
                }
                let sy = if h % 2 == 0 { y - 1 } else { y };
                let sx = if w % 2 == 0 { x - 1 } else { x };
                flipped.get(sx, sy)
            });
            let expected = ifftshift(&rolled);

            assert_eq!(conjugate_symmetrize(&spectrum), expected, "{}x{}", w, h);
        }
    }
}
