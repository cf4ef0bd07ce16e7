//! Error taxonomy: decode, validation, I/O.

use std::path::PathBuf;

/// Planning rejected its inputs. Raised before any file is touched.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// The division count is zero.
    #[error("divisions must be at least 1")]
    ZeroDivisions,
    /// Source image has zero width or height.
    #[error("source image has a zero dimension")]
    ZeroSourceDimension,
    /// The physical long side is zero pixels.
    #[error("page long side must be at least 1 pixel")]
    ZeroLongSide,
    /// Paper ratio is not a finite value in `(0, 1]`.
    #[error("paper ratio must be a short/long ratio in (0, 1]")]
    InvalidPaperRatio,
    /// A computed page dimension truncated below one pixel.
    #[error("page would be {width}x{height} pixels; use fewer divisions")]
    PageTooSmall { width: u32, height: u32 },
    /// A rescaled dimension does not fit in pixel coordinates.
    #[error("rescaled image dimensions are out of range")]
    ScaleOutOfRange,
}

/// Failure of a whole export.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source image could not be read or decoded.
    #[error("cannot decode {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// The parameters do not describe a valid page grid.
    #[error(transparent)]
    Validation(#[from] LayoutError),
    /// The output directory is unusable or a page write failed.
    #[error("cannot write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Unwrap an encoder failure to the I/O error underneath it, if any.
    pub(crate) fn write(path: impl Into<PathBuf>, err: image::ImageError) -> Self {
        let source = match err {
            image::ImageError::IoError(e) => e,
            other => std::io::Error::other(other),
        };
        Self::io(path, source)
    }
}
