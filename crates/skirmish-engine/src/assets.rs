//! Asset manifest and asynchronous loading.
//!
//! Images are measured on a background thread; the only thing the rest of the
//! engine needs from them is their pixel size. The frame loop must not start
//! until the background image has been reported ready.

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError};
use serde::{Deserialize, Serialize};
use skirmish_common::AssetError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Every image the game draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetId {
    /// Full-canvas backdrop; gates the frame loop
    Background,
    /// Ground tile repeated along the ground band
    GroundTile,
    /// Player one body sprite
    PlayerOne,
    /// Player two body sprite
    PlayerTwo,
    /// Attack effect sprite shared by both players
    AttackEffect,
    /// Hit-flash sprite shared by both players
    HitFlash,
}

impl AssetId {
    /// All assets, background first.
    pub const ALL: [Self; 6] = [
        Self::Background,
        Self::GroundTile,
        Self::PlayerOne,
        Self::PlayerTwo,
        Self::AttackEffect,
        Self::HitFlash,
    ];

    /// File name inside the asset directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Background => "pix.jpg",
            Self::GroundTile => "batu.jpg",
            Self::PlayerOne => "char.png",
            Self::PlayerTwo => "s.png",
            Self::AttackEffect => "efek.png",
            Self::HitFlash => "char_hit.png",
        }
    }

    /// Size used when no image is available.
    #[must_use]
    pub const fn placeholder_size(self) -> (u32, u32) {
        match self {
            Self::Background => (1030, 650),
            Self::GroundTile => (64, 64),
            Self::PlayerOne | Self::PlayerTwo | Self::AttackEffect | Self::HitFlash => (40, 60),
        }
    }
}

/// A loaded (or placeholder) image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetInfo {
    /// Which asset
    pub id: AssetId,
    /// Pixel width
    pub width: u32,
    /// Pixel height
    pub height: u32,
    /// Source file, None for placeholders
    pub path: Option<PathBuf>,
}

impl AssetInfo {
    /// Placeholder entry for an asset.
    #[must_use]
    pub fn placeholder(id: AssetId) -> Self {
        let (width, height) = id.placeholder_size();
        Self {
            id,
            width,
            height,
            path: None,
        }
    }

    /// Returns true if this is a placeholder.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.path.is_none()
    }
}

/// Reads one image file for its dimensions.
pub fn read_dimensions(id: AssetId, dir: &Path) -> Result<AssetInfo, AssetError> {
    let path = dir.join(id.file_name());
    if !path.exists() {
        return Err(AssetError::Missing {
            name: id.file_name().to_string(),
            path,
        });
    }

    let decode_error = |reason: String| AssetError::Decode {
        name: id.file_name().to_string(),
        reason,
    };
    // Format is sniffed from content; extensions are not trusted
    let (width, height) = image::io::Reader::open(&path)
        .and_then(image::io::Reader::with_guessed_format)
        .map_err(|e| decode_error(e.to_string()))?
        .into_dimensions()
        .map_err(|e| decode_error(e.to_string()))?;

    Ok(AssetInfo {
        id,
        width,
        height,
        path: Some(path),
    })
}

/// Asset sizes known so far; missing entries read as placeholders.
#[derive(Debug, Clone, Default)]
pub struct AssetStore {
    assets: HashMap<AssetId, AssetInfo>,
}

impl AssetStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store filled with placeholders.
    #[must_use]
    pub fn placeholders() -> Self {
        let mut store = Self::new();
        for id in AssetId::ALL {
            store.insert(AssetInfo::placeholder(id));
        }
        store
    }

    /// Records an asset.
    pub fn insert(&mut self, info: AssetInfo) {
        self.assets.insert(info.id, info);
    }

    /// Returns an asset, falling back to its placeholder.
    #[must_use]
    pub fn get(&self, id: AssetId) -> AssetInfo {
        self.assets
            .get(&id)
            .cloned()
            .unwrap_or_else(|| AssetInfo::placeholder(id))
    }

    /// Returns true if the asset has been recorded.
    #[must_use]
    pub fn contains(&self, id: AssetId) -> bool {
        self.assets.contains_key(&id)
    }

    /// Number of recorded assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// Message from the loader thread.
#[derive(Debug)]
enum LoadEvent {
    Loaded(AssetInfo),
    Failed { id: AssetId, error: AssetError },
}

/// Loads assets on a background thread and tracks readiness.
#[derive(Debug)]
pub struct AssetLoader {
    receiver: Receiver<LoadEvent>,
    handle: Option<JoinHandle<()>>,
    store: AssetStore,
    ready: bool,
}

impl AssetLoader {
    /// Starts loading. With no directory every asset is a placeholder.
    #[must_use]
    pub fn spawn(dir: Option<PathBuf>) -> Self {
        let (sender, receiver) = unbounded();

        let handle = thread::spawn(move || {
            for id in AssetId::ALL {
                let event = match &dir {
                    Some(dir) => match read_dimensions(id, dir) {
                        Ok(info) => LoadEvent::Loaded(info),
                        Err(error) => LoadEvent::Failed { id, error },
                    },
                    None => LoadEvent::Loaded(AssetInfo::placeholder(id)),
                };
                if sender.send(event).is_err() {
                    return;
                }
            }
        });

        Self {
            receiver,
            handle: Some(handle),
            store: AssetStore::new(),
            ready: false,
        }
    }

    /// Handles one loader message.
    fn apply(&mut self, event: LoadEvent) -> Result<(), AssetError> {
        match event {
            LoadEvent::Loaded(info) => {
                debug!(
                    asset = info.id.file_name(),
                    width = info.width,
                    height = info.height,
                    "Asset loaded"
                );
                if info.id == AssetId::Background {
                    self.ready = true;
                }
                self.store.insert(info);
                Ok(())
            },
            LoadEvent::Failed { id, error } if id == AssetId::Background => Err(error),
            LoadEvent::Failed { id, error } => {
                warn!("Using placeholder for {}: {error}", id.file_name());
                self.store.insert(AssetInfo::placeholder(id));
                Ok(())
            },
        }
    }

    /// Applies whatever the loader has reported so far without blocking.
    pub fn poll(&mut self) -> Result<(), AssetError> {
        while let Ok(event) = self.receiver.try_recv() {
            self.apply(event)?;
        }
        Ok(())
    }

    /// Blocks until the background image is ready.
    pub fn wait_until_ready(&mut self, timeout: Duration) -> Result<(), AssetError> {
        let start = Instant::now();
        let name = AssetId::Background.file_name().to_string();

        while !self.ready {
            let remaining = timeout.saturating_sub(start.elapsed());
            match self.receiver.recv_timeout(remaining) {
                Ok(event) => self.apply(event)?,
                Err(RecvTimeoutError::Timeout) => {
                    return Err(AssetError::TimedOut {
                        name,
                        waited_ms: start.elapsed().as_millis() as u64,
                    });
                },
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(AssetError::LoaderDisconnected(name));
                },
            }
        }

        info!(waited_ms = start.elapsed().as_millis() as u64, "Background ready");
        Ok(())
    }

    /// Waits for the loader to finish and returns everything it produced.
    pub fn finish(mut self) -> Result<AssetStore, AssetError> {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Asset loader thread panicked");
            }
        }
        self.poll()?;
        Ok(self.store)
    }

    /// Returns whether the frame loop may start.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Assets reported so far.
    #[must_use]
    pub fn store(&self) -> &AssetStore {
        &self.store
    }
}
