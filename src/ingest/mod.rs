//! Asset ingestion for dropped files and web images.
//!
//! Turns a drop payload into locally stored assets ready to be placed on a
//! board. Every asset is handled on its own: one failure is logged and the
//! rest of the batch continues.
//!
//! ## Modules
//!
//! - `sources` - Drop payload parsing and source priority
//! - `fetch` - Remote fetch trait, `ureq` client, Pinterest resolution probing
//! - `assets` - Asset store trait, filesystem store, file naming

mod assets;
mod fetch;
mod sources;

pub use assets::{local_asset_name, remote_asset_name, sanitize_file_name, AssetStore, FsAssetStore};
pub use fetch::{is_pinimg_url, resolve_pinimg_url, RemoteFetch, UreqFetch};
pub use sources::{first_img_src, first_uri, http_text, DropSource, DropTarget};

use crate::error::{IngestError, IngestResult};
use crate::types::ReferenceKind;
use base64::Engine;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A stored asset waiting to be placed.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestedAsset {
    pub path: PathBuf,
    pub kind: ReferenceKind,
    /// Natural width over height, 1.0 when unknown
    pub aspect_ratio: f64,
    /// Source URL for web assets
    pub original_url: Option<String>,
}

pub struct Ingestor<F, S> {
    fetch: F,
    store: S,
}

impl<F: RemoteFetch, S: AssetStore> Ingestor<F, S> {
    pub fn new(fetch: F, store: S) -> Self {
        Self { fetch, store }
    }

    pub fn fetch(&self) -> &F {
        &self.fetch
    }

    /// Ingest everything a drop resolved to.
    pub fn ingest(&self, source: &DropSource) -> Vec<IngestedAsset> {
        match source.target() {
            DropTarget::Files(files) => files
                .iter()
                .filter_map(|file| match self.ingest_file(file) {
                    Ok(asset) => Some(asset),
                    Err(IngestError::Unsupported(what)) => {
                        debug!(%what, "skipping non-media file");
                        None
                    }
                    Err(err) => {
                        warn!(file = %file.display(), error = %err, "local import failed");
                        None
                    }
                })
                .collect(),
            DropTarget::Url(url) => match self.ingest_url(&url) {
                Ok(asset) => vec![asset],
                Err(err) => {
                    warn!(%url, error = %err, "web fetch failed");
                    Vec::new()
                }
            },
            DropTarget::Nothing => {
                debug!("drop carried nothing usable");
                Vec::new()
            }
        }
    }

    /// Copy a local image or video into the asset store.
    pub fn ingest_file(&self, source: &Path) -> IngestResult<IngestedAsset> {
        let mime = mime_guess::from_path(source).first();
        let kind = mime
            .as_ref()
            .and_then(|m| ReferenceKind::from_mime(m.essence_str()))
            .ok_or_else(|| IngestError::Unsupported(source.display().to_string()))?;

        let path = self.store.import_file(source, &local_asset_name(source))?;
        let aspect_ratio = aspect_ratio_of(&path, kind);
        info!(path = %path.display(), ?kind, "imported local asset");

        Ok(IngestedAsset {
            path,
            kind,
            aspect_ratio,
            original_url: None,
        })
    }

    /// Download (or decode) a web image and store it.
    pub fn ingest_url(&self, url: &str) -> IngestResult<IngestedAsset> {
        let (bytes, hint, original_url) = if url.starts_with("data:") {
            let (mime, bytes) = decode_data_uri(url)?;
            (bytes, Some(mime), None)
        } else {
            let target = resolve_pinimg_url(&self.fetch, url);
            let bytes = self.fetch.get(&target)?;
            let hint = mime_guess::from_path(url_path(&target)).first().map(|m| m.essence_str().to_string());
            (bytes, hint, Some(target))
        };

        let (kind, extension) = sniff_media(&bytes, hint.as_deref())
            .ok_or_else(|| IngestError::Unsupported(original_url.clone().unwrap_or_else(|| "data URI".into())))?;

        let path = self.store.write_asset(&remote_asset_name(&bytes, &extension), &bytes)?;
        let aspect_ratio = aspect_ratio_of(&path, kind);
        info!(path = %path.display(), bytes = bytes.len(), "stored web asset");

        Ok(IngestedAsset {
            path,
            kind,
            aspect_ratio,
            original_url,
        })
    }
}

/// Decode a base64 `data:` URI into its MIME type and payload.
pub fn decode_data_uri(uri: &str) -> IngestResult<(String, Vec<u8>)> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| IngestError::InvalidDataUri("missing data: prefix".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| IngestError::InvalidDataUri("missing payload".into()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| IngestError::InvalidDataUri("only base64 payloads are supported".into()))?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| IngestError::InvalidDataUri(e.to_string()))?;
    Ok((mime.to_string(), bytes))
}

/// Media kind and file extension from content, falling back to a MIME hint.
fn sniff_media(bytes: &[u8], hint: Option<&str>) -> Option<(ReferenceKind, String)> {
    if let Ok(format) = image::guess_format(bytes) {
        let extension = format.extensions_str().first().copied().unwrap_or("png");
        return Some((ReferenceKind::Image, extension.to_string()));
    }

    let hint = hint?;
    let kind = ReferenceKind::from_mime(hint)?;
    let extension = mime_guess::get_mime_extensions_str(hint)
        .and_then(|exts| exts.first().copied())
        .unwrap_or(match kind {
            ReferenceKind::Image => "png",
            ReferenceKind::Video => "mp4",
        });
    Some((kind, extension.to_string()))
}

/// Path component of a URL, without query or fragment.
fn url_path(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or(url)
}

fn aspect_ratio_of(path: &Path, kind: ReferenceKind) -> f64 {
    if kind == ReferenceKind::Video {
        return 1.0;
    }

    image::ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .ok()
        .and_then(|reader| reader.into_dimensions().ok())
        .filter(|(w, h)| *w > 0 && *h > 0)
        .map(|(w, h)| f64::from(w) / f64::from(h))
        .unwrap_or(1.0)
}
