//! # GlassKit
//!
//! `glasskit` is a frame-based 2D composition engine for decorative "glass"
//! card UI: folder cards stacking rotated photos under a frosted vector
//! shape, gradient reminder cards, capsule badges, and sticker overlays.
//!
//! It provides a Scene Graph, Layout Engine (Taffy), and Renderer (Skia).
//! A single eased phase value drives the subtle "breathing" offsets of the
//! photo stack.

pub mod element;
pub mod shape;
pub mod animation;
pub mod node;
pub mod scene;
pub mod layout;
pub mod render;
pub mod card;
pub mod samples;
pub mod shaders;

pub use element::{Color, Element, LinearGradient};
pub use scene::Scene;
pub use shape::ShapeVariant;

use anyhow::Result;

/// Resolves image identifiers to raw bytes. Identifiers are never mutated;
/// a missing asset surfaces as `Err` and the nodes fall back to placeholder
/// rendering.
pub trait AssetLoader: Send + Sync {
    fn load_bytes(&self, id: &str) -> Result<Vec<u8>>;
}

/// Filesystem loader rooted at `GLASSKIT_ASSETS` (or `assets/`).
pub struct DefaultAssetLoader;

impl AssetLoader for DefaultAssetLoader {
    fn load_bytes(&self, id: &str) -> Result<Vec<u8>> {
        let root = std::env::var("GLASSKIT_ASSETS").unwrap_or_else(|_| "assets".to_string());
        Ok(std::fs::read(std::path::Path::new(&root).join(id))?)
    }
}
