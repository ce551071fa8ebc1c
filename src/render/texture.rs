use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
};

use crate::foundation::core::Vec2;

/// Anything the compositor can draw: only its pixel size matters here.
pub trait Texture {
    fn size(&self) -> Vec2;
}

/// Resolves absolute texture paths to textures.
///
/// `Ok(None)` means the file does not exist. `Err` is a transient read failure (for example a
/// file still being written); the caller skips the sprite for the current frame.
pub trait TextureProvider {
    type Texture: Texture;

    fn get(&mut self, path: &Path) -> io::Result<Option<Self::Texture>>;
}

/// Pixel dimensions of an image file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
}

impl Texture for TextureInfo {
    fn size(&self) -> Vec2 {
        Vec2::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Filesystem texture provider that probes image headers and caches the results.
///
/// Missing files are not cached, so a texture written later is picked up.
#[derive(Debug, Default)]
pub struct FsTextureStore {
    cache: HashMap<PathBuf, Option<TextureInfo>>,
}

impl FsTextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every cached entry, e.g. after the files changed on disk.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl TextureProvider for FsTextureStore {
    type Texture = TextureInfo;

    fn get(&mut self, path: &Path) -> io::Result<Option<TextureInfo>> {
        let key = std::path::absolute(path)?;
        if let Some(cached) = self.cache.get(&key) {
            return Ok(*cached);
        }

        let info = match image::image_dimensions(&key) {
            Ok((width, height)) => Some(TextureInfo { width, height }),
            Err(image::ImageError::IoError(e)) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(None);
            }
            Err(image::ImageError::IoError(e)) => return Err(e),
            Err(e) => {
                tracing::warn!(path = %key.display(), error = %e, "unreadable texture");
                None
            }
        };
        self.cache.insert(key, info);
        Ok(info)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/texture.rs"]
mod tests;
