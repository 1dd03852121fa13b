use std::path::{Path, PathBuf};
use tokio::fs;
use crate::content::{default_pack, ContentPack, DEFAULT_PACK_ID};
use crate::utils::{CardError, CardResult};
use tracing::{info, warn, debug};

pub struct ContentLoader {
    content_directory: PathBuf,
}

impl ContentLoader {
    pub fn new<P: AsRef<Path>>(content_directory: P) -> Self {
        Self {
            content_directory: content_directory.as_ref().to_path_buf(),
        }
    }

    fn pack_path(&self, pack_id: &str) -> PathBuf {
        self.content_directory.join(format!("{}.json", pack_id))
    }

    /// Loads `<content_dir>/<id>.json`. The built-in pack is used when its
    /// id is requested and no file overrides it.
    pub async fn load_pack(&self, pack_id: &str) -> CardResult<ContentPack> {
        let pack_path = self.pack_path(pack_id);

        if !pack_path.exists() {
            if pack_id == DEFAULT_PACK_ID {
                debug!("No override for built-in pack at {:?}", pack_path);
                return Ok(default_pack());
            }
            return Err(CardError::content(format!("Content pack not found: {}", pack_id)));
        }

        info!("Loading content pack from: {:?}", pack_path);

        let content = fs::read_to_string(&pack_path)
            .await
            .map_err(|e| CardError::content(format!("Failed to read content pack: {}", e)))?;

        let pack: ContentPack = serde_json::from_str(&content)
            .map_err(|e| CardError::content(format!("Failed to parse content pack JSON: {}", e)))?;

        if let Err(errors) = pack.validate() {
            return Err(CardError::content(format!(
                "Content pack validation failed: {}",
                errors.join("; ")
            )));
        }

        info!("Loaded content pack: {} ({})", pack.title, pack.id);
        Ok(pack)
    }

    pub async fn list_available_packs(&self) -> CardResult<Vec<PackMetadata>> {
        let mut packs = vec![PackMetadata::from_pack(&default_pack())];

        if !self.content_directory.exists() {
            return Ok(packs);
        }

        let mut entries = fs::read_dir(&self.content_directory)
            .await
            .map_err(|e| CardError::content(format!("Failed to read content directory: {}", e)))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| CardError::content(format!("Failed to read directory entry: {}", e)))?
        {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            match self.load_pack_metadata(&path).await {
                Ok(metadata) => {
                    packs.retain(|existing| existing.id != metadata.id);
                    packs.push(metadata);
                }
                Err(e) => warn!("Failed to read content pack at {:?}: {}", path, e),
            }
        }

        packs.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(packs)
    }

    async fn load_pack_metadata(&self, path: &Path) -> CardResult<PackMetadata> {
        let content = fs::read_to_string(path).await?;
        let value: serde_json::Value = serde_json::from_str(&content)?;

        let count = |key: &str| {
            value
                .get(key)
                .and_then(|v| v.as_array())
                .map(|arr| arr.len())
                .unwrap_or(0)
        };
        let text = |key: &str, fallback: &str| {
            value
                .get(key)
                .and_then(|v| v.as_str())
                .unwrap_or(fallback)
                .to_string()
        };

        Ok(PackMetadata {
            id: text("id", "unknown"),
            title: text("title", "Untitled"),
            description: text("description", "No description available"),
            version: text("version", "1.0.0"),
            photo_count: count("photos"),
            waypoint_count: count("waypoints"),
        })
    }
}

/// Writes the built-in pack as an editable starting point.
pub async fn write_template<P: AsRef<Path>>(path: P) -> CardResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    write_pack(path, &default_pack()).await
}

async fn write_pack(path: &Path, pack: &ContentPack) -> CardResult<()> {
    let json = serde_json::to_string_pretty(pack)?;
    fs::write(path, json)
        .await
        .map_err(|e| CardError::content(format!("Failed to write content pack: {}", e)))
}

#[derive(Debug, Clone)]
pub struct PackMetadata {
    pub id: String,
    pub title: String,
    pub description: String,
    pub version: String,
    pub photo_count: usize,
    pub waypoint_count: usize,
}

impl PackMetadata {
    fn from_pack(pack: &ContentPack) -> Self {
        Self {
            id: pack.id.clone(),
            title: pack.title.clone(),
            description: pack.description.clone(),
            version: pack.version.clone(),
            photo_count: pack.photos.len(),
            waypoint_count: pack.waypoints.len(),
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} (v{}, {} photos, {} stops)", self.title, self.version, self.photo_count, self.waypoint_count)
    }
}
