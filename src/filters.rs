//! The filter bank: radial and angular transfer functions over polar
//! frequency coordinates `(r, θ)`, with `r` in radians per sample.
//!
//! `lowpass` and `highpass` roll off over `(π/4, π/2)` with raised-cosine
//! profiles whose squares sum to one across that band. Each subband filter is
//! a log-radius band times an angular window centred on one of `K`
//! orientations spread over half a circle; the other half is the mirrored
//! conjugate, recovered at reconstruction.

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4, PI};

pub fn lowpass(r: f64, _theta: f64) -> f64 {
    if r <= FRAC_PI_4 {
        1.0
    } else if r < FRAC_PI_2 {
        (FRAC_PI_2 * (4.0 * r / PI).log2()).cos()
    } else {
        0.0
    }
}

pub fn highpass(r: f64, _theta: f64) -> f64 {
    if r <= FRAC_PI_4 {
        0.0
    } else if r < FRAC_PI_2 {
        (FRAC_PI_2 * (2.0 * r / PI).log2()).cos()
    } else {
        1.0
    }
}

/// `(K-1)! / sqrt(K (2(K-1))!)`, computed as `1 / sqrt(K * C(2(K-1), K-1))`
/// so that large `K` doesn't overflow the factorials
pub fn angular_norm(orientations: usize) -> f64 {
    let m = orientations.saturating_sub(1);
    let central_binomial = (1..=m).fold(1.0, |acc, i| acc * (m + i) as f64 / i as f64);

    1.0 / (orientations as f64 * central_binomial).sqrt()
}

/// Window centred on orientation `k·π/K`, non-zero within a quarter turn of it
///
/// A single orientation is a half-plane. The bins on its edge are shared
/// with the mirrored half and get `1/√2` from each.
pub fn angular(_r: f64, theta: f64, k: usize, orientations: usize) -> f64 {
    let centre = PI * k as f64 / orientations as f64;
    let distance = (theta - centre).abs();
    let angle = distance.min(2.0 * PI - distance);

    let power = orientations as i32 - 1;
    if power == 0 {
        return if (angle - FRAC_PI_2).abs() < 1e-12 {
            angular_norm(orientations) * FRAC_1_SQRT_2
        } else if angle < FRAC_PI_2 {
            angular_norm(orientations)
        } else {
            0.0
        };
    }

    if angle >= FRAC_PI_2 {
        return 0.0;
    }

    // c * (2 cos)^(K-1) in the log domain, both factors overflow on their own
    // for large K
    let cosine = angle.cos();
    if cosine <= 0.0 {
        return 0.0;
    }
    (angular_norm(orientations).ln() + f64::from(power) * (2.0 * cosine).ln()).exp()
}

/// The log-radius band of scale `n` out of `N` per octave
pub fn bandpass(r: f64, theta: f64, n: usize, scales: usize) -> f64 {
    let upper = 2f64.powf((scales - n - 1) as f64 / scales as f64);
    let lower = 2f64.powf((scales - n) as f64 / scales as f64);

    highpass(r / upper, theta) * lowpass(r / lower, theta)
}

/// Transfer function of the subband at scale `n` and orientation `k`
pub fn pyramid_filter(
    r: f64,
    theta: f64,
    n: usize,
    scales: usize,
    k: usize,
    orientations: usize,
) -> f64 {
    let band = bandpass(r, theta, n, scales);
    if band == 0.0 {
        return 0.0;
    }
    band * angular(r, theta, k, orientations)
}

/// The high residual keeps everything above half of Nyquist
pub fn high_residual(r: f64, theta: f64) -> f64 {
    highpass(r / 2.0, theta)
}

/// Complement of [`high_residual`], which stands in for the whole pyramid
/// when it has no octaves
pub fn half_band_lowpass(r: f64, theta: f64) -> f64 {
    lowpass(r / 2.0, theta)
}

/// Sum of the squared responses of every filter a pyramid of `depth` octaves
/// applies at `(r, θ)`: the high residual, each subband together with its
/// mirrored conjugate, and the lowpass chain leading to the low residual.
///
/// Octave `d` sees the frequency as `2^d · r`, since each downsample doubles
/// the radian frequency of a bin. A value of one means the frequency passes
/// through decomposition and reconstruction unchanged.
pub fn frame_energy(
    r: f64,
    theta: f64,
    depth: usize,
    scales: usize,
    orientations: usize,
) -> f64 {
    let mirrored = if theta > 0.0 { theta - PI } else { theta + PI };

    let mut energy = high_residual(r, theta).powi(2);
    if depth == 0 {
        return energy + half_band_lowpass(r, theta).powi(2);
    }

    let mut carried = 1.0;
    for d in 0..depth {
        let rd = r * 2f64.powi(d as i32);

        for n in 0..scales {
            for k in 0..orientations {
                energy += carried
                    * (pyramid_filter(rd, theta, n, scales, k, orientations).powi(2)
                        + pyramid_filter(rd, mirrored, n, scales, k, orientations).powi(2));
            }
        }

        carried *= lowpass(rd, theta).powi(2);
    }

    energy + carried
}
