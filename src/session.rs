//! The editing session: the current working buffer plus the snapshot taken
//! at load time, and the advisory notices the UI shows transiently.

use std::collections::VecDeque;

use crate::buffer::PixelBuffer;
use crate::error::SessionError;
use crate::filter::{FilterEngine, Operation, Transform};

/// Holds the pixels captured right after a load, before any filter runs.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    original: PixelBuffer,
}

impl SnapshotStore {
    /// Capture a deep copy of `buffer`.
    pub fn capture(buffer: &PixelBuffer) -> Self {
        Self {
            original: buffer.clone(),
        }
    }

    pub fn original(&self) -> &PixelBuffer {
        &self.original
    }

    /// A fresh copy of the original, independent of the stored one.
    pub fn restore(&self) -> PixelBuffer {
        self.original.clone()
    }
}

/// An advisory message for the user. Never an error the caller must handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice(pub String);

impl Notice {
    pub fn text(&self) -> &str {
        &self.0
    }
}

/// Result of a session call that silently does nothing on an empty session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// No image is loaded, so there was nothing to do.
    NothingLoaded,
}

#[derive(Debug, Clone)]
struct Loaded {
    current: PixelBuffer,
    snapshot: SnapshotStore,
}

/// Orchestrates load, filtering, revert, reset and export.
///
/// The session is either Empty or Loaded; the current buffer and its
/// snapshot always come and go together.
#[derive(Debug, Default)]
pub struct ImageSession {
    state: Option<Loaded>,
    engine: FilterEngine,
    notices: VecDeque<Notice>,
}

impl ImageSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.state.is_some()
    }

    /// The buffer to display, if any.
    pub fn current(&self) -> Option<&PixelBuffer> {
        self.state.as_ref().map(|s| &s.current)
    }

    /// The pixels captured at load time, if any.
    pub fn original(&self) -> Option<&PixelBuffer> {
        self.state.as_ref().map(|s| s.snapshot.original())
    }

    /// Replace whatever is loaded with `buffer` and snapshot it.
    pub fn load(&mut self, buffer: PixelBuffer) {
        log::info!("loaded {}x{} image", buffer.width(), buffer.height());
        let snapshot = SnapshotStore::capture(&buffer);
        self.state = Some(Loaded {
            current: buffer,
            snapshot,
        });
    }

    /// Apply a filter or channel swap to the current buffer in place.
    pub fn apply(&mut self, op: impl Into<Operation>) -> Outcome {
        let op = op.into();
        let current = self.state.as_mut().map(|s| &mut s.current);
        if self.engine.apply(current, op) {
            Outcome::Done
        } else {
            log::warn!("ignoring {op}: no image loaded");
            Outcome::NothingLoaded
        }
    }

    /// Apply an ad-hoc point-wise transform to the current buffer in place.
    pub fn apply_transform<T: Transform + ?Sized>(&mut self, transform: &T) -> Outcome {
        let current = self.state.as_mut().map(|s| &mut s.current);
        if self.engine.apply_transform(current, transform) {
            Outcome::Done
        } else {
            log::warn!("ignoring transform: no image loaded");
            Outcome::NothingLoaded
        }
    }

    /// Discard every edit since the last load.
    pub fn revert(&mut self) -> Outcome {
        match self.state.as_mut() {
            Some(loaded) => {
                loaded.current = loaded.snapshot.restore();
                log::info!("reverted to original pixels");
                Outcome::Done
            }
            None => {
                log::warn!("ignoring revert: no image loaded");
                Outcome::NothingLoaded
            }
        }
    }

    /// Drop the current image and its snapshot.
    ///
    /// Callers confirm with the user first. On an empty session this queues a
    /// "No photo to remove" notice instead.
    pub fn reset(&mut self) -> Outcome {
        if self.state.take().is_some() {
            log::info!("image removed");
            Outcome::Done
        } else {
            self.notify("No photo to remove");
            Outcome::NothingLoaded
        }
    }

    /// A copy of the current buffer for an exporter to encode.
    pub fn export_snapshot(&self) -> Result<PixelBuffer, SessionError> {
        self.current()
            .cloned()
            .ok_or(SessionError::NothingToExport)
    }

    /// Queue an advisory message for the UI.
    pub fn notify(&mut self, text: impl Into<String>) {
        let notice = Notice(text.into());
        log::info!("notice: {}", notice.text());
        self.notices.push_back(notice);
    }

    /// Take all queued notices, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{Filter, SwapPreset};

    fn sample() -> PixelBuffer {
        PixelBuffer::new(
            2,
            2,
            vec![
                200, 100, 50, 255, //
                0, 0, 0, 0, //
                255, 255, 255, 128, //
                50, 150, 80, 7,
            ],
        )
        .unwrap()
    }

    #[test]
    fn empty_session_calls_are_noops() {
        let mut session = ImageSession::new();
        assert_eq!(session.apply(Filter::Sepia), Outcome::NothingLoaded);
        assert_eq!(session.apply(SwapPreset::Bgr), Outcome::NothingLoaded);
        assert_eq!(
            session.apply_transform(&|r: f64, g: f64, b: f64| [b, g, r]),
            Outcome::NothingLoaded
        );
        assert_eq!(session.revert(), Outcome::NothingLoaded);
        assert!(session.current().is_none());
        assert!(session.original().is_none());
        assert!(session.drain_notices().is_empty());
    }

    #[test]
    fn load_sets_current_and_original_together() {
        let mut session = ImageSession::new();
        session.load(sample());
        assert!(session.is_loaded());
        assert_eq!(session.current(), Some(&sample()));
        assert_eq!(session.original(), Some(&sample()));
    }

    #[test]
    fn apply_mutates_current_only() {
        let mut session = ImageSession::new();
        session.load(sample());
        assert_eq!(session.apply(Filter::Invert), Outcome::Done);
        let current = session.current().unwrap();
        assert_eq!(current.pixel(0).unwrap(), [55, 155, 205, 255]);
        assert_eq!(session.original(), Some(&sample()));
    }

    #[test]
    fn revert_restores_load_time_pixels() {
        let mut session = ImageSession::new();
        session.load(sample());
        for &f in Filter::ALL {
            session.apply(f);
        }
        session.apply(SwapPreset::Grb);
        session.apply_transform(&|r: f64, _g: f64, _b: f64| [r, r, r]);
        assert_ne!(session.current(), Some(&sample()));

        assert_eq!(session.revert(), Outcome::Done);
        assert_eq!(session.current(), Some(&sample()));

        // the snapshot survives further edits and reverts
        session.apply(Filter::HighContrast);
        session.revert();
        assert_eq!(session.current(), Some(&sample()));
    }

    #[test]
    fn reload_replaces_snapshot() {
        let mut session = ImageSession::new();
        session.load(sample());
        session.apply(Filter::Sepia);

        let next = PixelBuffer::filled(1, 1, [1, 2, 3, 4]).unwrap();
        session.load(next.clone());
        session.apply(Filter::Invert);
        session.revert();
        assert_eq!(session.current(), Some(&next));
    }

    #[test]
    fn reset_clears_both_buffers() {
        let mut session = ImageSession::new();
        session.load(sample());
        assert_eq!(session.reset(), Outcome::Done);
        assert!(!session.is_loaded());
        assert!(session.original().is_none());
        assert!(session.drain_notices().is_empty());
    }

    #[test]
    fn reset_when_empty_queues_notice() {
        let mut session = ImageSession::new();
        assert_eq!(session.reset(), Outcome::NothingLoaded);
        assert_eq!(
            session.drain_notices(),
            vec![Notice("No photo to remove".to_string())]
        );
        assert!(session.drain_notices().is_empty());
    }

    #[test]
    fn export_requires_an_image() {
        let mut session = ImageSession::new();
        assert_eq!(
            session.export_snapshot(),
            Err(SessionError::NothingToExport)
        );

        session.load(sample());
        session.apply(Filter::Grayscale);
        let exported = session.export_snapshot().unwrap();
        assert_eq!(Some(&exported), session.current());
        assert_eq!(exported.pixel(0).unwrap(), [116, 116, 116, 255]);
    }
}
