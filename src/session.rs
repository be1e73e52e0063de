use crate::*;
use log::debug;
use std::sync::Arc;

/// Steerable pyramid session.
///
/// A session holds validated parameters together with the transform engine
/// doing the FFTs, and can decompose and reconstruct any number of images.
///
/// # Example
/// ```no_run
/// let session = steerable_pyramid::Session::builder()
///     .depth(4)
///     .orientations(6)
///     .build().expect("failed to build session");
///
/// let image = steerable_pyramid::Plane::filled(steerable_pyramid::Dims::square(256), 0.5);
/// let pyramid = session.decompose(&image).expect("failed to decompose");
/// let restored = session.reconstruct(&pyramid).expect("failed to reconstruct");
/// ```
pub struct Session {
    engine: Arc<dyn TransformEngine>,
    params: Parameters,
}

impl Session {
    /// Creates a new session with default parameters.
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    /// Splits `image` into subbands and residuals.
    ///
    /// Fails with [`Error::InvalidParameter`] if either side of the image is
    /// shorter than `2^depth`, and with [`Error::NonFinite`] if the image,
    /// or any plane computed from it, holds a NaN or an infinity.
    pub fn decompose(&self, image: &Plane<f64>) -> Result<Pyramid, Error> {
        debug!(
            "decomposing {}x{} image into {} octaves of {}x{} subbands",
            image.width(),
            image.height(),
            self.params.depth,
            self.params.scales,
            self.params.orientations
        );

        crate::pyramid::decompose(
            &self.params.to_transform_params(),
            self.engine.as_ref(),
            image,
        )
    }

    /// Puts the image behind `pyramid` back together.
    ///
    /// The depth, scales, orientations, grid stretching and resampling method
    /// are those the pyramid was decomposed with, not those of this session.
    /// The real part of the result is the image.
    pub fn reconstruct(&self, pyramid: &Pyramid) -> Result<Plane<Complex64>, Error> {
        debug!(
            "reconstructing {}x{} image from {} octaves",
            pyramid.dims().width,
            pyramid.dims().height,
            pyramid.depth()
        );

        crate::pyramid::reconstruct(
            &self.params.to_transform_params(),
            self.engine.as_ref(),
            pyramid,
        )
    }
}

/// Builds a session by setting parameters, calling `build` will check them
/// all before any image is touched
#[derive(Default)]
pub struct SessionBuilder {
    engine: Option<Arc<dyn TransformEngine>>,
    params: Parameters,
}

impl SessionBuilder {
    /// Creates a new `SessionBuilder`, can also be created via
    /// `Session::builder()`
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of octaves. Each octave halves the resolution, so both sides
    /// of a decomposed image must be at least `2^depth` samples long.
    ///
    /// A depth of 0 produces no subbands at all, only a high and a low
    /// residual.
    ///
    /// Default: 3
    pub fn depth(mut self, depth: u32) -> Self {
        self.params.depth = depth;
        self
    }

    /// Number of scales per octave, splitting each octave into log-radius
    /// bands.
    ///
    /// Default: 1
    pub fn scales(mut self, count: u32) -> Self {
        self.params.scales = count;
        self
    }

    /// Number of orientations per scale, spread evenly over half a circle.
    ///
    /// More orientations give narrower angular windows.
    ///
    /// Default: 4
    pub fn orientations(mut self, count: u32) -> Self {
        self.params.orientations = count;
        self
    }

    /// Normalizes each frequency axis on its own, so both span `[-π, π)`
    /// regardless of the aspect ratio of the image. Filters are then no
    /// longer isotropic on non-square images, but even sized ones
    /// reconstruct exactly.
    ///
    /// Default: false
    pub fn stretch(mut self, stretch: bool) -> Self {
        self.params.stretch = stretch;
        self
    }

    /// How resolution changes between octaves.
    ///
    /// `Resampling::Spatial` is only an approximation and loses the perfect
    /// reconstruction of the spectral method.
    ///
    /// Default: `Resampling::Spectral`
    pub fn resampling(mut self, resampling: Resampling) -> Self {
        self.params.resampling = resampling;
        self
    }

    /// The maximum number of threads the subbands of an octave are spread
    /// over.
    ///
    /// Results do not depend on the thread count.
    ///
    /// Default: the number of logical cores of this machine
    pub fn max_thread_count(mut self, count: usize) -> Self {
        self.params.max_thread_count = Some(count);
        self
    }

    /// Replaces the engine computing the FFTs.
    ///
    /// Default: a [`CachedPlanner`] owned by the session
    pub fn transform_engine(mut self, engine: Arc<dyn TransformEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Creates a `Session`, or returns an error if a parameter is out of
    /// range.
    pub fn build(self) -> Result<Session, Error> {
        self.check_parameters_validity()?;

        let engine = self
            .engine
            .unwrap_or_else(|| Arc::new(CachedPlanner::new()));

        Ok(Session {
            engine,
            params: self.params,
        })
    }

    fn check_parameters_validity(&self) -> Result<(), Error> {
        if self.params.scales < 1 {
            return Err(Error::invalid("scales", self.params.scales.into(), 1));
        }

        if self.params.orientations < 1 {
            return Err(Error::invalid(
                "orientations",
                self.params.orientations.into(),
                1,
            ));
        }

        if let Some(count) = self.params.max_thread_count {
            if count < 1 {
                return Err(Error::invalid("max-thread-count", count as u64, 1));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_build() {
        let session = Session::builder().build().unwrap();
        assert_eq!(session.params.depth, 3);
        assert_eq!(session.params.scales, 1);
        assert_eq!(session.params.orientations, 4);
        assert!(!session.params.stretch);
        assert_eq!(session.params.resampling, Resampling::Spectral);
    }

    #[test]
    fn counts_must_be_positive() {
        for builder in vec![
            Session::builder().scales(0),
            Session::builder().orientations(0),
            Session::builder().max_thread_count(0),
        ] {
            assert!(matches!(builder.build(), Err(Error::InvalidParameter(_))));
        }
    }

    #[test]
    fn error_names_the_parameter() {
        let err = Session::builder().orientations(0).build().err().unwrap();
        assert_eq!(
            err.to_string(),
            "parameter 'orientations' - value '0' must be at least 1"
        );
    }

    #[test]
    fn custom_engine_is_used() {
        let engine: Arc<dyn TransformEngine> = Arc::new(FreshPlanner);
        let session = Session::builder()
            .depth(1)
            .transform_engine(Arc::clone(&engine))
            .build()
            .unwrap();

        assert!(Arc::ptr_eq(&session.engine, &engine));
    }
}
