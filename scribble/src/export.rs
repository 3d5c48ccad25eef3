//! # Export
//!
//! Encodes rendered snapshots as PNG and writes them to disk off the UI thread. Each request
//! gets its own short-lived worker thread, and results come back over a channel that the
//! owner polls, so the event loop never blocks on compression or I/O.

use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("no directory to export into")]
    NoDirectory,
    #[error("failed to encode png: {0}")]
    Encode(#[from] png::EncodingError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("no free file name for export")]
    NameExhausted,
}

/// The result of one export request, tagged with the ticket [`ExportWorker::request`] returned.
#[derive(Debug)]
pub struct ExportOutcome {
    pub ticket: u64,
    pub result: Result<PathBuf, ExportError>,
}

pub struct ExportWorker {
    dir: Option<PathBuf>,
    prefix: String,
    next_ticket: u64,
    in_flight: usize,
    send: crossbeam::channel::Sender<ExportOutcome>,
    recv: crossbeam::channel::Receiver<ExportOutcome>,
}
impl ExportWorker {
    /// Exports will be written as `<dir>/<prefix>_<unix seconds>.png`.
    #[must_use]
    pub fn new(dir: Option<PathBuf>, prefix: impl Into<String>) -> Self {
        let (send, recv) = crossbeam::channel::unbounded();
        Self {
            dir,
            prefix: prefix.into(),
            next_ticket: 0,
            in_flight: 0,
            send,
            recv,
        }
    }
    /// Hand a rendered bitmap off for encoding. Returns a ticket identifying the eventual outcome.
    pub fn request(&mut self, bitmap: image::RgbaImage) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.in_flight += 1;

        let Some(dir) = self.dir.clone() else {
            // Unwrap OK - we own the receiver, so the channel is open.
            self.send
                .send(ExportOutcome {
                    ticket,
                    result: Err(ExportError::NoDirectory),
                })
                .unwrap();
            return ticket;
        };
        let prefix = self.prefix.clone();
        let send = self.send.clone();
        let spawned = std::thread::Builder::new()
            .name(format!("PNG export #{ticket}"))
            .spawn(move || {
                let result = write_png(&dir, &prefix, &bitmap);
                match &result {
                    Ok(path) => log::info!("exported {}", path.display()),
                    Err(e) => log::error!("export #{ticket} failed: {e}"),
                }
                // Owner may have gone away, nobody left to tell.
                let _ = send.send(ExportOutcome { ticket, result });
            });
        if let Err(e) = spawned {
            log::error!("failed to spawn export worker: {e}");
            // Unwrap OK - as above.
            self.send
                .send(ExportOutcome {
                    ticket,
                    result: Err(e.into()),
                })
                .unwrap();
        }
        ticket
    }
    /// Collect finished exports without blocking.
    pub fn poll(&mut self) -> Vec<ExportOutcome> {
        let done: Vec<_> = self.recv.try_iter().collect();
        self.in_flight -= done.len();
        done
    }
    /// Block until every outstanding export has reported.
    pub fn wait_all(&mut self) -> Vec<ExportOutcome> {
        let mut done = Vec::with_capacity(self.in_flight);
        while self.in_flight > 0 {
            // Can't disconnect while we hold a sender. Every worker reports exactly once.
            let Ok(outcome) = self.recv.recv() else {
                break;
            };
            done.push(outcome);
            self.in_flight -= 1;
        }
        done
    }
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

/// Encode `bitmap` into memory as an RGBA8 PNG.
pub fn encode_png(bitmap: &image::RgbaImage) -> Result<Vec<u8>, png::EncodingError> {
    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, bitmap.width(), bitmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Default);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(bitmap.as_raw())?;
        writer.finish()?;
    }
    Ok(bytes)
}

const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Encode and write to a fresh file in `dir`, never overwriting an existing export.
fn write_png(dir: &Path, prefix: &str, bitmap: &image::RgbaImage) -> Result<PathBuf, ExportError> {
    use std::io::Write;
    let bytes = encode_png(bitmap)?;
    std::fs::create_dir_all(dir)?;

    let seconds = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    // Two saves within the same second get a counter suffix instead of clobbering.
    for attempt in 0..MAX_NAME_ATTEMPTS {
        let name = if attempt == 0 {
            format!("{prefix}_{seconds}.png")
        } else {
            format!("{prefix}_{seconds}_{attempt}.png")
        };
        let path = dir.join(name);
        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
        {
            Ok(mut file) => {
                let written = file.write_all(&bytes).and_then(|()| file.sync_all());
                drop(file);
                return settle(path, written);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Err(ExportError::NameExhausted)
}

/// Keep a freshly created export if it was fully written. Otherwise remove the partial file,
/// freeing its name for the next attempt.
fn settle(path: PathBuf, written: std::io::Result<()>) -> Result<PathBuf, ExportError> {
    match written {
        Ok(()) => Ok(path),
        Err(e) => {
            if let Err(remove) = std::fs::remove_file(&path) {
                log::warn!("failed to remove partial export {}: {remove}", path.display());
            }
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod test {
    use super::{encode_png, settle, ExportError, ExportWorker};
    use scribble_core::Color;

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "scribble-export-{name}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn encoded_png_decodes() {
        let bitmap = image::RgbaImage::from_pixel(3, 2, image::Rgba(Color::RED.to_rgba()));
        let bytes = encode_png(&bitmap).unwrap();
        let decoded = image::load_from_memory_with_format(&bytes, image::ImageFormat::Png)
            .unwrap()
            .into_rgba8();
        assert_eq!(decoded, bitmap);
    }
    #[test]
    fn exports_do_not_clobber() {
        let dir = scratch_dir("clobber");
        let mut worker = ExportWorker::new(Some(dir.clone()), "test");
        let bitmap = image::RgbaImage::new(2, 2);
        let first = worker.request(bitmap.clone());
        let second = worker.request(bitmap);
        assert_ne!(first, second);

        let outcomes = worker.wait_all();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(worker.in_flight(), 0);
        let mut paths: Vec<_> = outcomes
            .into_iter()
            .map(|outcome| outcome.result.unwrap())
            .collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), 2);
        for path in &paths {
            assert!(path.starts_with(&dir));
            assert!(path.file_name().unwrap().to_string_lossy().starts_with("test_"));
            assert_eq!(path.extension().unwrap(), "png");
        }
        std::fs::remove_dir_all(&dir).unwrap();
    }
    #[test]
    fn failed_write_leaves_no_file() {
        let dir = scratch_dir("partial");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("test_0.png");
        std::fs::write(&path, b"\x89PNG truncated").unwrap();

        let result = settle(path.clone(), Err(std::io::Error::other("disk full")));
        assert!(matches!(result, Err(ExportError::Io(_))));
        assert!(!path.exists());

        std::fs::write(&path, b"complete").unwrap();
        assert_eq!(settle(path.clone(), Ok(())).unwrap(), path);
        assert!(path.exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }
    #[test]
    fn missing_directory_reports_failure() {
        let mut worker = ExportWorker::new(None, "test");
        let ticket = worker.request(image::RgbaImage::new(1, 1));
        let outcomes = worker.poll();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].ticket, ticket);
        assert!(matches!(outcomes[0].result, Err(ExportError::NoDirectory)));
        assert!(worker.poll().is_empty());
    }
    #[test]
    fn unwritable_directory_reports_failure() {
        let dir = scratch_dir("unwritable");
        std::fs::create_dir_all(dir.parent().unwrap()).unwrap();
        // A file where the directory should be.
        std::fs::write(&dir, b"not a directory").unwrap();

        let mut worker = ExportWorker::new(Some(dir.clone()), "test");
        worker.request(image::RgbaImage::new(1, 1));
        let outcomes = worker.wait_all();
        assert!(matches!(outcomes[0].result, Err(ExportError::Io(_))));
        std::fs::remove_file(&dir).unwrap();
    }
}
