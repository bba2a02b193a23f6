use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use crate::assets::decode::{PreparedImage, decode_image, decode_image_file};
use crate::foundation::error::{DrapeError, DrapeResult};

/// Default wait for a product or design decode.
pub const DEFAULT_DECODE_TIMEOUT: Duration = Duration::from_secs(10);

/// Decode state of one bitmap an editing session depends on.
#[derive(Clone, Debug, Default)]
pub enum ImageSlot {
    /// Decode not finished (or not started).
    #[default]
    Pending,
    /// Decoded and ready to composite.
    Ready(PreparedImage),
    /// Load or decode failed; carries the reason.
    Failed(String),
}

impl ImageSlot {
    /// Slot for a finished decode attempt.
    pub fn from_result(res: DrapeResult<PreparedImage>) -> Self {
        match res {
            Ok(img) => Self::Ready(img),
            Err(e) => Self::Failed(e.to_string()),
        }
    }

    /// Return `true` once a bitmap is available.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// The decoded bitmap, if ready.
    pub fn ready(&self) -> Option<&PreparedImage> {
        match self {
            Self::Ready(img) => Some(img),
            _ => None,
        }
    }

    /// The decoded bitmap, or the error a composite request must surface.
    ///
    /// `Pending` maps to `SurfaceNotReady`, `Failed` to `ImageDecodeFailed`.
    pub fn require(&self, what: &str) -> DrapeResult<&PreparedImage> {
        match self {
            Self::Ready(img) => Ok(img),
            Self::Pending => Err(DrapeError::surface_not_ready(format!(
                "{what} image is still decoding"
            ))),
            Self::Failed(reason) => Err(DrapeError::decode_failed(format!("{what}: {reason}"))),
        }
    }
}

/// Where a bitmap's encoded bytes come from.
#[derive(Clone, Debug)]
pub enum ImageSource {
    /// A file on disk.
    File(PathBuf),
    /// Encoded bytes already in memory (e.g. an upload).
    Bytes(Vec<u8>),
}

impl ImageSource {
    fn decode(self) -> DrapeResult<PreparedImage> {
        match self {
            Self::File(path) => decode_image_file(&path),
            Self::Bytes(bytes) => decode_image(&bytes),
        }
    }
}

/// Decode on a worker thread, waiting at most `timeout`.
///
/// A timeout maps to `ImageDecodeFailed`; the worker is detached and its late result dropped.
#[tracing::instrument(skip(source), fields(kind = source_kind(&source)))]
pub fn load_with_timeout(source: ImageSource, timeout: Duration) -> DrapeResult<PreparedImage> {
    let (tx, rx) = mpsc::sync_channel::<DrapeResult<PreparedImage>>(1);
    std::thread::Builder::new()
        .name("drape-decode".to_owned())
        .spawn(move || {
            // Receiver may be gone after a timeout.
            let _ = tx.send(source.decode());
        })
        .map_err(|e| DrapeError::decode_failed(format!("spawn decode worker: {e}")))?;

    match rx.recv_timeout(timeout) {
        Ok(res) => res,
        Err(mpsc::RecvTimeoutError::Timeout) => {
            tracing::warn!(?timeout, "image decode timed out");
            Err(DrapeError::decode_failed(format!(
                "decode did not finish within {} ms",
                timeout.as_millis()
            )))
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(DrapeError::decode_failed(
            "decode worker exited without a result",
        )),
    }
}

/// [`load_with_timeout`] for a file path.
pub fn load_image_with_timeout(path: &Path, timeout: Duration) -> DrapeResult<PreparedImage> {
    load_with_timeout(ImageSource::File(path.to_path_buf()), timeout)
}

fn source_kind(source: &ImageSource) -> &'static str {
    match source {
        ImageSource::File(_) => "file",
        ImageSource::Bytes(_) => "bytes",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/slot.rs"]
mod tests;
