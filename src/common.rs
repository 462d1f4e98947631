//! Types needed in multiple modules

use std::path::PathBuf;

/// Enumeration of binary symbol values
#[derive(Clone, Eq, PartialEq, Debug, Copy)]
pub enum Bit {
    /// Binary symbol `0`
    Zero = 0,
    /// Binary symbol `1`
    One = 1,
}

impl Bit {
    /// Returns the complementary bit.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Bit::Zero => Bit::One,
            Bit::One => Bit::Zero,
        }
    }
}

impl TryFrom<char> for Bit {
    type Error = Error;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '0' => Ok(Bit::Zero),
            '1' => Ok(Bit::One),
            _ => Err(Error::InvalidInput(format!(
                "Expected binary symbol '0' or '1', found {c:?}"
            ))),
        }
    }
}

impl From<Bit> for char {
    fn from(bit: Bit) -> Self {
        match bit {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

impl std::fmt::Display for Bit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

/// Custom error type
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Invalid parameter error (code rate, error probability, simulation sizes)
    #[error("{0}")]
    InvalidParameter(String),
    /// Invalid input error (malformed data)
    #[error("{0}")]
    InvalidInput(String),
    /// Image could not be opened or decoded
    #[error("Failed to load image {path:?}: {source}")]
    ImageLoad {
        /// Path of the image
        path: PathBuf,
        /// Underlying error
        source: image::ImageError,
    },
    /// Image could not be encoded or written
    #[error("Failed to save image {path:?}: {source}")]
    ImageSave {
        /// Path of the image
        path: PathBuf,
        /// Underlying error
        source: image::ImageError,
    },
    /// Number of pixels does not match image dimensions
    #[error("Expected {expected} pixels, found {found}")]
    ShapeMismatch {
        /// Number of pixels implied by the image dimensions
        expected: usize,
        /// Number of pixels actually available
        found: usize,
    },
    /// File read/write error
    #[error("{0}")]
    FileReadWriteError(#[from] std::io::Error),
    /// Serde read/write error
    #[error("{0}")]
    SerdeReadWriteError(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flipped() {
        assert_eq!(Bit::Zero.flipped(), Bit::One);
        assert_eq!(Bit::One.flipped(), Bit::Zero);
    }

    #[test]
    fn test_char_conversions() {
        assert_eq!(Bit::try_from('0').unwrap(), Bit::Zero);
        assert_eq!(Bit::try_from('1').unwrap(), Bit::One);
        assert!(Bit::try_from('2').is_err());
        assert!(Bit::try_from(' ').is_err());
        assert_eq!(char::from(Bit::One), '1');
        assert_eq!(Bit::Zero.to_string(), "0");
    }
}
