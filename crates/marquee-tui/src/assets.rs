//! Lazy gallery asset loading.
//!
//! Images are decoded from disk only once their gallery scrolls into view.
//! Decoding runs off the event loop on the blocking pool; results come
//! back over an unbounded channel drained once per frame. The lazy store
//! guarantees each source is processed at most once, whatever the outcome.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use tokio::sync::mpsc;
use tracing::debug;

use marquee_core::effects::{LazyState, LazyStore};

use crate::event::ImageLoadResult;

pub struct ImageStore {
    /// Directory image paths are resolved against (the deck file's parent)
    deck_dir: PathBuf,
    store: LazyStore<DynamicImage>,
}

impl ImageStore {
    pub fn new(deck_dir: PathBuf) -> Self {
        Self {
            deck_dir,
            store: LazyStore::new(),
        }
    }

    fn key(src: &Path) -> String {
        src.to_string_lossy().into_owned()
    }

    /// Register a deferred source without loading it
    pub fn register(&mut self, src: &Path) {
        self.store.register(Self::key(src));
    }

    /// Start decoding a source if it has never been requested.
    /// Safe to call on every visibility change; only the first call after
    /// registration spawns work.
    pub fn request(&mut self, src: &Path, tx: &mpsc::UnboundedSender<ImageLoadResult>) {
        if !self.store.request_if_pending(&Self::key(src)) {
            return;
        }

        let resolved = if src.is_absolute() {
            src.to_path_buf()
        } else {
            self.deck_dir.join(src)
        };
        let src = src.to_path_buf();
        let tx = tx.clone();

        tokio::task::spawn_blocking(move || {
            debug!("Decoding image {:?}", resolved);
            match image::open(&resolved) {
                Ok(image) => {
                    let _ = tx.send(ImageLoadResult::Success { src, image });
                }
                Err(e) => {
                    let _ = tx.send(ImageLoadResult::Failure {
                        src,
                        error: e.to_string(),
                    });
                }
            }
        });
    }

    /// Record a completed decode
    pub fn handle_result(&mut self, result: ImageLoadResult) {
        match result {
            ImageLoadResult::Success { src, image } => {
                self.store.set_loaded(&Self::key(&src), image);
            }
            ImageLoadResult::Failure { src, error } => {
                debug!("Image {:?} failed to load: {}", src, error);
                self.store.set_failed(&Self::key(&src), error);
            }
        }
    }

    pub fn state(&self, src: &Path) -> Option<&LazyState<DynamicImage>> {
        self.store.get(&Self::key(src))
    }

    pub fn loaded(&self, src: &Path) -> Option<&DynamicImage> {
        self.store.loaded(&Self::key(src))
    }
}
