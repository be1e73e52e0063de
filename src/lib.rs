// BEGIN - Embark standard lints v0.4
// do not change or add/remove here, but one can add exceptions after this section
// for more info see: <https://github.com/EmbarkStudios/rust-ecosystem/issues/59>
#![deny(unsafe_code)]
#![warn(
    clippy::all,
    clippy::await_holding_lock,
    clippy::char_lit_as_u8,
    clippy::checked_conversions,
    clippy::dbg_macro,
    clippy::debug_assert_with_mut_call,
    clippy::doc_markdown,
    clippy::empty_enum,
    clippy::enum_glob_use,
    clippy::exit,
    clippy::expl_impl_clone_on_copy,
    clippy::explicit_deref_methods,
    clippy::explicit_into_iter_loop,
    clippy::fallible_impl_from,
    clippy::filter_map_next,
    clippy::float_cmp_const,
    clippy::fn_params_excessive_bools,
    clippy::if_let_mutex,
    clippy::implicit_clone,
    clippy::imprecise_flops,
    clippy::inefficient_to_string,
    clippy::invalid_upcast_comparisons,
    clippy::large_types_passed_by_value,
    clippy::let_unit_value,
    clippy::linkedlist,
    clippy::lossy_float_literal,
    clippy::macro_use_imports,
    clippy::manual_ok_or,
    clippy::map_err_ignore,
    clippy::map_flatten,
    clippy::map_unwrap_or,
    clippy::match_on_vec_items,
    clippy::match_same_arms,
    clippy::match_wildcard_for_single_variants,
    clippy::mem_forget,
    clippy::mismatched_target_os,
    clippy::mut_mut,
    clippy::mutex_integer,
    clippy::needless_borrow,
    clippy::needless_continue,
    clippy::option_option,
    clippy::path_buf_push_overwrite,
    clippy::ptr_as_ptr,
    clippy::ref_option_ref,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::same_functions_in_if_condition,
    clippy::semicolon_if_nothing_returned,
    clippy::string_add_assign,
    clippy::string_add,
    clippy::string_lit_as_bytes,
    clippy::string_to_string,
    clippy::todo,
    clippy::trait_duplication_in_bounds,
    clippy::unimplemented,
    clippy::unnested_or_patterns,
    clippy::unused_self,
    clippy::useless_transmute,
    clippy::verbose_file_reads,
    clippy::zero_sized_map_values,
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms
)]
// END - Embark standard lints v0.4

//! `steerable-pyramid` is a light API for the complex steerable pyramid, a
//! multi-scale, multi-orientation decomposition of grayscale images.
//!
//! Each octave splits an image into `scales × orientations` complex
//! subbands whose magnitude measures local energy and whose phase measures
//! local structure. Everything the subbands don't cover ends up in a high
//! residual above them and a low residual below the last octave, so that
//! [`reconstruct`] can put the image back together.
//!
//! All filtering happens in the frequency domain. The image is transformed
//! once, filtered per subband and per octave, and halved between octaves by
//! cropping its spectrum.
//!
//! ## Usage
//! Parameters are set up on a [`SessionBuilder`], following a "builder
//! pattern" where you chain functions together.
//!
//! ```no_run
//! use steerable_pyramid::{utils, Session};
//!
//! let plane = utils::load_plane(&"imgs/1.png").expect("failed to load image");
//!
//! // 3 octaves with 2 scales and 4 orientations each
//! let session = Session::builder()
//!     .depth(3)
//!     .scales(2)
//!     .orientations(4)
//!     .build()
//!     .expect("failed to build session");
//!
//! let pyramid = session.decompose(&plane).expect("failed to decompose");
//! println!("first subband magnitude at origin: {}", pyramid.subband(0, 0, 0).get(0, 0).norm());
//!
//! let restored = session.reconstruct(&pyramid).expect("failed to reconstruct");
//! utils::plane_to_luma(&restored.re())
//!     .save("restored.png")
//!     .expect("failed to save image");
//! ```
mod errors;
pub mod fft;
pub mod filters;
mod grid;
mod plane;
mod pyramid;
pub mod resample;
pub mod session;
pub mod spectrum;
pub mod utils;
mod workers;

pub use image;
pub use num_complex::Complex64;

pub use errors::{Error, InvalidParameter, ShapeMismatch};
pub use fft::{CachedPlanner, FreshPlanner, TransformEngine};
pub use grid::{apply_filter, FrequencyGrid};
pub use plane::Plane;
pub use pyramid::Pyramid;
pub use resample::{Downsample, Upsample};
pub use session::{Session, SessionBuilder};
pub use utils::{load_dynamic_image, load_plane, ImageSource};

/// Simple dimensions struct
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Dims {
    pub width: u32,
    pub height: u32,
}

impl Dims {
    pub fn square(size: u32) -> Self {
        Self {
            width: size,
            height: size,
        }
    }
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of samples covered
    #[inline]
    pub fn len(self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Dimensions after one crop of the spectrum, rounding up
    #[inline]
    pub fn halved(self) -> Self {
        Self {
            width: (self.width + 1) / 2,
            height: (self.height + 1) / 2,
        }
    }

    /// Dimensions of the subbands of octave `depth`, which is also the size
    /// of the low residual of a pyramid `depth` octaves deep
    pub fn octave(self, depth: u32) -> Self {
        (0..depth).fold(self, |dims, _| dims.halved())
    }
}

/// How a [`Session`] changes resolution between octaves
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resampling {
    /// Crop and zero-pad the spectrum, which loses nothing the lowpass
    /// filter kept
    Spectral,
    /// Decimate, then interpolate bilinearly, in the image domain
    Spatial,
}

impl Resampling {
    pub(crate) fn methods(self) -> (Downsample, Upsample) {
        match self {
            Self::Spectral => (Downsample::Crop, Upsample::Crop),
            Self::Spatial => (Downsample::Skip, Upsample::Bilinear),
        }
    }
}

struct Parameters {
    depth: u32,
    scales: u32,
    orientations: u32,
    stretch: bool,
    resampling: Resampling,
    max_thread_count: Option<usize>,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            depth: 3,
            scales: 1,
            orientations: 4,
            stretch: false,
            resampling: Resampling::Spectral,
            max_thread_count: None,
        }
    }
}

impl Parameters {
    fn to_transform_params(&self) -> pyramid::TransformParams {
        pyramid::TransformParams {
            depth: self.depth as usize,
            scales: self.scales as usize,
            orientations: self.orientations as usize,
            stretch: self.stretch,
            resampling: self.resampling,
            max_thread_count: self.max_thread_count.unwrap_or_else(num_cpus::get),
        }
    }
}

/// Decomposes `image` into `depth` octaves of `scales × orientations`
/// subbands, with default settings for everything else.
///
/// See [`SessionBuilder`] for the rest of the knobs.
pub fn decompose(
    image: &Plane<f64>,
    depth: u32,
    scales: u32,
    orientations: u32,
) -> Result<Pyramid, Error> {
    Session::builder()
        .depth(depth)
        .scales(scales)
        .orientations(orientations)
        .build()?
        .decompose(image)
}

/// Reconstructs the image behind a pyramid, with the settings it was
/// decomposed with.
///
/// The real part of the result is the image, the imaginary part is only
/// rounding noise.
pub fn reconstruct(pyramid: &Pyramid) -> Result<Plane<Complex64>, Error> {
    Session::builder().build()?.reconstruct(pyramid)
}
