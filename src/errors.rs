use crate::Dims;
use std::fmt;

#[derive(Debug)]
pub struct InvalidParameter {
    pub(crate) name: &'static str,
    pub(crate) value: u64,
    pub(crate) min: u64,
}

impl fmt::Display for InvalidParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parameter '{}' - value '{}' must be at least {}",
            self.name, self.value, self.min
        )
    }
}

#[derive(Debug)]
pub struct ShapeMismatch {
    pub(crate) subject: String,
    pub(crate) expected: Dims,
    pub(crate) found: Dims,
}

impl fmt::Display for ShapeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is {}x{}, but {}x{} was expected",
            self.subject,
            self.found.width,
            self.found.height,
            self.expected.width,
            self.expected.height
        )
    }
}

#[derive(Debug)]
pub enum Error {
    /// A depth, scale or orientation count was out of range, or the image is
    /// too small for the requested depth
    InvalidParameter(InvalidParameter),
    /// A plane handed to the transform doesn't have the shape implied by the
    /// image dimensions and pyramid depth
    ShapeMismatch(ShapeMismatch),
    /// A NaN or infinite sample showed up, either in the input or in one of
    /// the planes the transform produced
    NonFinite(String),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter(ip) => write!(f, "{}", ip),
            Self::ShapeMismatch(sm) => write!(f, "{}", sm),
            Self::NonFinite(what) => write!(f, "{} contains non-finite values", what),
        }
    }
}

impl Error {
    pub(crate) fn invalid(name: &'static str, value: u64, min: u64) -> Self {
        Self::InvalidParameter(InvalidParameter { name, value, min })
    }

    pub(crate) fn shape<S: Into<String>>(subject: S, expected: Dims, found: Dims) -> Self {
        Self::ShapeMismatch(ShapeMismatch {
            subject: subject.into(),
            expected,
            found,
        })
    }
}
