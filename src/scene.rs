use crate::animation::{Breather, Drift};
use crate::element::{Color, Element};
use crate::AssetLoader;
use cosmic_text::FontSystem;
use skia_safe::{Data, Image};
use std::sync::{Arc, Mutex};

/// A unique identifier for a node in the scene graph.
pub type NodeId = usize;

/// Per-node transform, applied around the pivot after layout positioning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate: (f32, f32),
    /// Degrees, clockwise.
    pub rotation: f32,
    pub scale: (f32, f32),
    /// Normalized within the layout rect.
    pub pivot: (f32, f32),
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translate: (0.0, 0.0),
            rotation: 0.0,
            scale: (1.0, 1.0),
            pivot: (0.5, 0.5),
        }
    }
}

/// A wrapper around an `Element` that adds scene graph relationships.
pub struct SceneNode {
    /// The actual visual element (Box, Photo, Glass, ...)
    pub element: Box<dyn Element>,
    /// Indices of child nodes, in back-to-front paint order.
    pub children: Vec<NodeId>,
    /// Index of parent node.
    pub parent: Option<NodeId>,
    /// The computed layout rectangle relative to the parent (set by
    /// `LayoutEngine`).
    pub layout_rect: skia_safe::Rect,
    pub transform: Transform,
    /// Breathing delta consumed at render time; `None` for static layers.
    pub drift: Option<Drift>,
    pub dirty_style: bool,
}

impl SceneNode {
    pub fn new(element: Box<dyn Element>) -> Self {
        Self {
            element,
            children: Vec::new(),
            parent: None,
            layout_rect: skia_safe::Rect::default(),
            transform: Transform::default(),
            drift: None,
            dirty_style: true,
        }
    }
}

/// The central engine state: an arena of nodes under a single root, plus
/// the breathing driver the photo layers sample.
pub struct Scene {
    /// The Arena of all nodes. Using `Option` allows for removal/recycling.
    pub nodes: Vec<Option<SceneNode>>,
    pub root: Option<NodeId>,
    /// Output width in pixels.
    pub width: i32,
    /// Output height in pixels.
    pub height: i32,
    pub background: Color,
    pub breather: Breather,
    phase: f32,
    /// Asset loader for resolving image identifiers to bytes.
    pub asset_loader: Arc<dyn AssetLoader>,
    pub font_system: Arc<Mutex<FontSystem>>,
}

impl Scene {
    /// Creates a new Scene with breathing enabled from t = 0.
    pub fn new(width: i32, height: i32, asset_loader: Arc<dyn AssetLoader>) -> Self {
        let mut breather = Breather::default();
        breather.set_enabled(true, 0.0);
        Self {
            nodes: Vec::new(),
            root: None,
            width,
            height,
            background: Color::WHITE,
            breather,
            phase: 0.0,
            asset_loader,
            font_system: Arc::new(Mutex::new(FontSystem::new())),
        }
    }

    /// Adds a new element to the scene graph and returns its ID.
    pub fn add_node(&mut self, element: Box<dyn Element>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Some(SceneNode::new(element)));
        id
    }

    /// Establishes a parent-child relationship between two nodes. Children
    /// paint in insertion order, back to front.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(p_node) = self.nodes.get_mut(parent).and_then(|n| n.as_mut()) {
            p_node.children.push(child);
        }
        if let Some(c_node) = self.nodes.get_mut(child).and_then(|n| n.as_mut()) {
            c_node.parent = Some(parent);
        }
    }

    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    /// Returns a mutable reference to the SceneNode.
    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id).and_then(|n| n.as_mut())
    }

    /// Returns a shared reference to the SceneNode.
    pub fn get_node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id).and_then(|n| n.as_ref())
    }

    /// Resolves an image identifier through the asset loader. Failures are
    /// logged and surface as `None`, which the nodes render as placeholder.
    pub fn load_image(&self, id: &str) -> Option<Image> {
        match self.asset_loader.load_bytes(id) {
            Ok(bytes) => {
                let image = Image::from_encoded(Data::new_copy(&bytes));
                if image.is_none() {
                    tracing::debug!(asset = id, "asset bytes did not decode as an image");
                }
                image
            }
            Err(e) => {
                tracing::debug!(asset = id, error = %e, "asset not found");
                None
            }
        }
    }

    /// The breathing phase computed by the last `update`.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn set_breathing(&mut self, on: bool, time: f64) {
        tracing::debug!(enabled = on, time, "breathing toggled");
        self.breather.set_enabled(on, time);
        self.phase = self.breather.phase(time);
    }

    /// Advances every element and the breathing phase to `time`.
    pub fn update(&mut self, time: f64) {
        self.phase = self.breather.phase(time);
        for node_opt in self.nodes.iter_mut() {
            if let Some(node) = node_opt {
                node.element.update(time);
            }
        }
    }

    /// Queues a property transition on a node's element.
    pub fn animate(
        &mut self,
        id: NodeId,
        property: &str,
        start: f32,
        target: f32,
        duration: f64,
        easing: &str,
    ) {
        if let Some(node) = self.get_node_mut(id) {
            node.element
                .animate_property(property, start, target, duration, easing);
        }
    }
}
