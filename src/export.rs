use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::thread;

use futures::channel::oneshot;
use image::{ImageFormat, RgbaImage};

use crate::error::ExportError;

/// Encode a raster snapshot as PNG bytes
pub fn encode_png(raster: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    if raster.width() == 0 || raster.height() == 0 {
        return Err(ExportError::InvalidState {
            width: raster.width(),
            height: raster.height(),
        });
    }

    let mut bytes = Cursor::new(Vec::new());
    raster.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

/// Encode and write a raster snapshot to `path`
pub fn save_png(raster: &RgbaImage, path: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
    let path = path.as_ref();
    let bytes = encode_png(raster)?;
    fs::write(path, &bytes).map_err(|source| ExportError::Io {
        path: path.to_owned(),
        source,
    })?;
    log::info!(
        "Exported {}x{} raster to {} ({} bytes)",
        raster.width(),
        raster.height(),
        path.display(),
        bytes.len()
    );
    Ok(path.to_owned())
}

/// Completion notification for an export running on a worker thread
#[derive(Debug)]
pub struct ExportHandle {
    receiver: oneshot::Receiver<Result<PathBuf, ExportError>>,
}

impl ExportHandle {
    /// Block until the export finishes
    pub fn wait(self) -> Result<PathBuf, ExportError> {
        futures::executor::block_on(self.receiver).unwrap_or(Err(ExportError::Cancelled))
    }

    /// Non-blocking check; `None` while the worker is still busy
    pub fn try_result(&mut self) -> Option<Result<PathBuf, ExportError>> {
        match self.receiver.try_recv() {
            Ok(Some(result)) => Some(result),
            Ok(None) => None,
            Err(oneshot::Canceled) => Some(Err(ExportError::Cancelled)),
        }
    }
}

/// Export an owned snapshot off the calling thread.
///
/// The snapshot is moved into the worker, so the caller can keep drawing
/// while it is encoded. Dropping the handle makes the export fire-and-forget.
pub fn spawn_export(snapshot: RgbaImage, path: impl Into<PathBuf>) -> ExportHandle {
    let path = path.into();
    let (sender, receiver) = oneshot::channel();

    thread::spawn(move || {
        let result = save_png(&snapshot, &path);
        if let Err(err) = &result {
            log::error!("Export to {} failed: {}", path.display(), err);
        }
        // the receiver may be gone, that's fine
        let _ = sender.send(result);
    });

    ExportHandle { receiver }
}
