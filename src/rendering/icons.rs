use crate::{
    core::config::IconSpec,
    traits::{IconLoader, MapSurface},
    Error, Result,
};
use futures::future::try_join_all;
use std::sync::Arc;

/// Encoded icon bytes as returned by an [`IconLoader`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    pub url: String,
    pub bytes: Arc<Vec<u8>>,
}

impl IconImage {
    pub fn new(url: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            url: url.into(),
            bytes: Arc::new(bytes),
        }
    }
}

/// Loads category icons into a surface and patches in a fallback image
/// for ids the renderer asks for but never received
#[derive(Debug, Clone)]
pub struct IconRegistry {
    fallback_url: String,
}

impl IconRegistry {
    pub fn new(fallback_url: impl Into<String>) -> Self {
        Self {
            fallback_url: fallback_url.into(),
        }
    }

    pub fn fallback_url(&self) -> &str {
        &self.fallback_url
    }

    /// Loads every icon concurrently and registers them as `<name>-icon`.
    ///
    /// Nothing is registered unless all loads succeed; the first failure is
    /// returned as [`Error::AssetLoad`]. A load that never resolves stalls
    /// this call, so loaders should apply their own timeout.
    pub async fn preload<L, S>(&self, loader: &L, surface: &mut S, icons: &[IconSpec]) -> Result<usize>
    where
        L: IconLoader + ?Sized,
        S: MapSurface + ?Sized,
    {
        let loads = icons.iter().map(|icon| async move {
            match loader.load(&icon.url).await {
                Ok(image) => Ok((icon, image)),
                Err(e) => {
                    log::error!("Error loading {}: {}", icon.image_id(), e);
                    Err(match e {
                        Error::AssetLoad { .. } => e,
                        other => Error::AssetLoad {
                            icon: icon.name.clone(),
                            reason: other.to_string(),
                        },
                    })
                }
            }
        });

        let loaded = try_join_all(loads).await.map_err(|e| {
            log::error!("Failed to load one or more images: {}", e);
            e
        })?;

        let mut registered = 0;
        for (icon, image) in loaded {
            let id = icon.image_id();
            if !surface.has_image(&id) {
                surface.add_image(&id, image)?;
                registered += 1;
            }
        }
        log::debug!("registered {} of {} icons", registered, icons.len());
        Ok(registered)
    }

    /// Registers the fallback image under `id` if the surface lacks it.
    /// Failures are logged, never returned. Returns whether an image was added.
    pub async fn resolve_missing<L, S>(&self, loader: &L, surface: &mut S, id: &str) -> bool
    where
        L: IconLoader + ?Sized,
        S: MapSurface + ?Sized,
    {
        if surface.has_image(id) {
            return false;
        }
        match loader.load(&self.fallback_url).await {
            Ok(image) if !surface.has_image(id) => match surface.add_image(id, image) {
                Ok(()) => {
                    log::debug!("substituted fallback icon for '{}'", id);
                    true
                }
                Err(e) => {
                    log::warn!("could not register fallback for '{}': {}", id, e);
                    false
                }
            },
            Ok(_) => false,
            Err(e) => {
                log::warn!("fallback icon for '{}' failed to load: {}", id, e);
                false
            }
        }
    }
}
