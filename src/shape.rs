//! Vector silhouettes for the glass folders and containers.
//!
//! Each variant is a fixed table of anchor and control points authored in
//! its own design space. At generation time every coordinate is multiplied
//! by the per-axis scale factors (target / design), so outlines stretch to
//! fit the target rect; aspect distortion is intentional. Generation is a
//! pure function of (variant, width, height) and never fails; degenerate
//! target sizes just collapse the outline.

use glam::Vec2;
use skia_safe::{Path, Rect};

/// Offset (in target units, unscaled) from the notch anchor to the rounded
/// tab corner of [`ShapeVariant::FolderTab`].
pub const TAB_CORNER_OFFSET: f32 = 26.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Vec2),
    LineTo(Vec2),
    CubicTo { c1: Vec2, c2: Vec2, to: Vec2 },
    QuadTo { ctrl: Vec2, to: Vec2 },
    Close,
}

/// A closed outline scaled to a target frame, usable for filling, clipping
/// and stroking.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeOutline {
    commands: Vec<PathCommand>,
    width: f32,
    height: f32,
}

impl ShapeOutline {
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// The target frame the outline was generated for. Outlines are
    /// authored to fill their design space, so this is the outline's
    /// nominal bounding box.
    pub fn frame(&self) -> Rect {
        Rect::from_wh(self.width, self.height)
    }

    pub fn to_skia_path(&self) -> Path {
        let mut path = Path::new();
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    path.move_to((p.x, p.y));
                }
                PathCommand::LineTo(p) => {
                    path.line_to((p.x, p.y));
                }
                PathCommand::CubicTo { c1, c2, to } => {
                    path.cubic_to((c1.x, c1.y), (c2.x, c2.y), (to.x, to.y));
                }
                PathCommand::QuadTo { ctrl, to } => {
                    path.quad_to((ctrl.x, ctrl.y), (to.x, to.y));
                }
                PathCommand::Close => {
                    path.close();
                }
            }
        }
        path
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ShapeVariant {
    /// The plain folder silhouette with a back tab.
    Folder,
    /// The large rounded container with a tab.
    Container,
    /// A plain rounded container panel.
    ContainerWide,
    /// Folder with a notched tab; its tab corner is rounded at generation
    /// time from the normalized slant direction.
    FolderTab,
    /// A shallower folder silhouette.
    FolderSlim,
}

impl ShapeVariant {
    pub fn design_size(self) -> (f32, f32) {
        match self {
            ShapeVariant::Folder => (362.0, 223.0),
            ShapeVariant::Container => (421.0, 309.0),
            ShapeVariant::ContainerWide => (420.0, 260.0),
            ShapeVariant::FolderTab => (380.0, 240.0),
            ShapeVariant::FolderSlim => (362.0, 200.0),
        }
    }

    pub fn outline(self, width: f32, height: f32) -> ShapeOutline {
        let (dw, dh) = self.design_size();
        let mut b = OutlineBuilder::new(width / dw, height / dh);
        match self {
            ShapeVariant::Folder => folder(&mut b),
            ShapeVariant::Container => container(&mut b),
            ShapeVariant::ContainerWide => container_wide(&mut b),
            ShapeVariant::FolderTab => folder_tab(&mut b),
            ShapeVariant::FolderSlim => folder_slim(&mut b),
        }
        ShapeOutline {
            commands: b.commands,
            width,
            height,
        }
    }
}

struct OutlineBuilder {
    sx: f32,
    sy: f32,
    commands: Vec<PathCommand>,
}

impl OutlineBuilder {
    fn new(sx: f32, sy: f32) -> Self {
        Self {
            sx,
            sy,
            commands: Vec::new(),
        }
    }

    fn pt(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(x * self.sx, y * self.sy)
    }

    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.pt(x, y);
        self.commands.push(PathCommand::MoveTo(p));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.pt(x, y);
        self.commands.push(PathCommand::LineTo(p));
    }

    fn cubic_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) {
        let c1 = self.pt(c1x, c1y);
        let c2 = self.pt(c2x, c2y);
        let to = self.pt(x, y);
        self.commands.push(PathCommand::CubicTo { c1, c2, to });
    }

    fn quad_to_scaled(&mut self, ctrl: Vec2, to: Vec2) {
        self.commands.push(PathCommand::QuadTo { ctrl, to });
    }

    fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }
}

fn folder(b: &mut OutlineBuilder) {
    b.move_to(170.664, 0.0);
    b.line_to(30.002, 0.0);
    b.cubic_to(12.455, 0.0, -1.346, 14.994, 0.105, 32.48);
    b.line_to(13.627, 195.48);
    b.cubic_to(14.918, 211.034, 27.918, 223.0, 43.525, 223.0);
    b.line_to(318.369, 223.0);
    b.cubic_to(333.523, 223.0, 346.298, 211.698, 348.145, 196.657);
    b.line_to(361.777, 85.657);
    b.cubic_to(363.973, 67.772, 350.02, 52.0, 332.001, 52.0);
    b.line_to(235.656, 52.0);
    b.cubic_to(228.846, 52.0, 222.385, 48.982, 218.015, 43.758);
    b.line_to(188.305, 8.242);
    b.cubic_to(183.935, 3.019, 177.475, 0.0, 170.664, 0.0);
    b.close();
}

fn container(b: &mut OutlineBuilder) {
    b.move_to(157.818, 0.0);
    b.line_to(30.0018, 0.0);
    b.cubic_to(12.5177, 0.0, -1.262, 14.8915, 0.0919, 32.3231);
    b.line_to(19.4317, 281.323);
    b.cubic_to(20.6449, 296.944, 33.6741, 309.0, 49.3416, 309.0);
    b.line_to(370.371, 309.0);
    b.cubic_to(385.809, 309.0, 398.727, 297.284, 400.228, 281.919);
    b.line_to(420.364, 75.9186);
    b.cubic_to(422.088, 58.2807, 408.228, 43.0002, 390.506, 43.0002);
    b.line_to(222.345, 43.0002);
    b.cubic_to(213.607, 43.0002, 205.303, 39.1907, 199.604, 32.5674);
    b.line_to(180.558, 10.4329);
    b.cubic_to(174.859, 3.80964, 166.556, 0.0, 157.818, 0.0);
    b.close();
}

fn container_wide(b: &mut OutlineBuilder) {
    b.move_to(28.0, 0.0);
    b.line_to(392.0, 0.0);
    b.cubic_to(407.464, 0.0, 420.0, 12.536, 420.0, 28.0);
    b.line_to(420.0, 232.0);
    b.cubic_to(420.0, 247.464, 407.464, 260.0, 392.0, 260.0);
    b.line_to(28.0, 260.0);
    b.cubic_to(12.536, 260.0, 0.0, 247.464, 0.0, 232.0);
    b.line_to(0.0, 28.0);
    b.cubic_to(0.0, 12.536, 12.536, 0.0, 28.0, 0.0);
    b.close();
}

fn folder_tab(b: &mut OutlineBuilder) {
    b.move_to(150.0, 0.0);
    b.line_to(30.0, 0.0);
    b.cubic_to(13.0, 0.0, -1.0, 14.5, 0.2, 31.5);
    b.line_to(12.8, 208.5);
    b.cubic_to(14.0, 225.9, 27.4, 240.0, 44.9, 240.0);
    b.line_to(336.2, 240.0);
    b.cubic_to(352.1, 240.0, 365.4, 228.2, 367.3, 212.4);
    b.line_to(379.6, 93.4);
    b.cubic_to(381.9, 74.8, 367.4, 58.0, 348.6, 58.0);
    b.line_to(248.9, 58.0);

    // The tab corner is rounded from the slant direction: place the curve
    // end a fixed offset from the notch anchor, along the normalized
    // anchor-to-slant vector, then bend through the anchor itself.
    let anchor = b.pt(224.3, 58.0);
    let slant_end = b.pt(191.4, 18.7);
    let dir = (slant_end - anchor).normalize_or_zero();
    let corner = anchor + dir * TAB_CORNER_OFFSET;
    b.quad_to_scaled(anchor, corner);

    b.line_to(191.4, 18.7);
    b.cubic_to(182.2, 7.6, 166.8, 0.0, 150.0, 0.0);
    b.close();
}

fn folder_slim(b: &mut OutlineBuilder) {
    b.move_to(150.45, 0.0);
    b.line_to(28.7, 0.0);
    b.cubic_to(11.9, 0.0, -1.3, 13.4, 0.1, 29.1);
    b.line_to(11.2, 175.3);
    b.cubic_to(12.4, 189.2, 24.8, 200.0, 38.8, 200.0);
    b.line_to(320.9, 200.0);
    b.cubic_to(335.4, 200.0, 347.6, 189.8, 349.4, 176.3);
    b.line_to(361.8, 71.9);
    b.cubic_to(363.9, 55.9, 350.6, 41.5, 334.4, 41.5);
    b.line_to(210.8, 41.5);
    b.cubic_to(204.7, 41.5, 198.9, 38.8, 195.0, 34.1);
    b.line_to(166.2, 7.4);
    b.cubic_to(162.3, 2.7, 156.5, 0.0, 150.45, 0.0);
    b.close();
}

pub const ALL_VARIANTS: [ShapeVariant; 5] = [
    ShapeVariant::Folder,
    ShapeVariant::Container,
    ShapeVariant::ContainerWide,
    ShapeVariant::FolderTab,
    ShapeVariant::FolderSlim,
];
