use crate::layout::LayoutEngine;
use crate::scene::{NodeId, Scene};
use skia_safe::{AlphaType, Canvas, ColorSpace, ColorType, ImageInfo};
use std::path::Path;
use thiserror::Error;

/// Draws a node and its children, applying the node's transform stack and
/// breathing drift.
pub fn render_recursive(scene: &Scene, node_id: NodeId, canvas: &Canvas, parent_opacity: f32) {
    if let Some(node) = scene.get_node(node_id) {
        canvas.save();

        // Layout Position
        let layout_x = node.layout_rect.left;
        let layout_y = node.layout_rect.top;

        // Transform Properties
        let t = node.transform;
        let (drift_x, drift_y) = node
            .drift
            .map(|d| d.offset(scene.phase()))
            .unwrap_or((0.0, 0.0));

        // Pivot Calculation (within the layout rect)
        let pivot_x = node.layout_rect.width() * t.pivot.0;
        let pivot_y = node.layout_rect.height() * t.pivot.1;

        // Apply Transform Stack
        // 1. Move to position (layout + authored offset + breathing drift)
        canvas.translate((
            layout_x + t.translate.0 + drift_x,
            layout_y + t.translate.1 + drift_y,
        ));

        // 2. Rotate and scale around the pivot
        canvas.translate((pivot_x, pivot_y));
        canvas.rotate(t.rotation, None);
        canvas.scale(t.scale);
        canvas.translate((-pivot_x, -pivot_y));

        let local_rect =
            skia_safe::Rect::from_wh(node.layout_rect.width(), node.layout_rect.height());

        let mut draw_children = |canvas: &Canvas| {
            for child_id in &node.children {
                render_recursive(scene, *child_id, canvas, parent_opacity);
            }
        };

        node.element
            .render(canvas, local_rect, parent_opacity, &mut draw_children);

        canvas.restore();
    }
}

/// Advances the scene to `time`, recomputes layout, and paints a full frame.
pub fn render_frame(scene: &mut Scene, layout_engine: &mut LayoutEngine, time: f64, canvas: &Canvas) {
    scene.update(time);
    layout_engine.compute_layout(scene);

    canvas.clear(scene.background.to_skia());

    if let Some(root) = scene.root {
        render_recursive(scene, root, canvas, 1.0);
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create a raster surface")]
    Surface,
    #[error("failed to read back rendered pixels")]
    Readback,
    #[error(transparent)]
    Encode(#[from] image::ImageError),
}

/// Renders one frame at `time` and writes it as a PNG.
pub fn export_png(
    scene: &mut Scene,
    layout_engine: &mut LayoutEngine,
    time: f64,
    path: &Path,
) -> Result<(), ExportError> {
    let width = scene.width;
    let height = scene.height;

    let info = ImageInfo::new(
        (width, height),
        ColorType::RGBA8888,
        AlphaType::Unpremul,
        Some(ColorSpace::new_srgb()),
    );

    let mut surface = skia_safe::surfaces::raster(&info, None, None).ok_or(ExportError::Surface)?;
    render_frame(scene, layout_engine, time, surface.canvas());

    let mut bytes = vec![0u8; (width * height * 4) as usize];
    if !surface.read_pixels(&info, &mut bytes, (width * 4) as usize, (0, 0)) {
        return Err(ExportError::Readback);
    }

    let img =
        image::RgbaImage::from_raw(width as u32, height as u32, bytes).ok_or(ExportError::Readback)?;
    img.save(path)?;

    tracing::info!(path = %path.display(), time, "frame exported");
    Ok(())
}
