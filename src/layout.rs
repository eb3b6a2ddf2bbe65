use crate::scene::{NodeId, Scene};
use taffy::prelude::*;

/// Manages the layout computation using the Taffy engine.
///
/// `LayoutEngine` synchronizes the Scene Graph with Taffy's internal tree,
/// computes the layout, and writes the results back to
/// `SceneNode::layout_rect` (parent-relative rects).
pub struct LayoutEngine {
    taffy: TaffyTree,
    // Persistent map for mapping Scene NodeId -> Taffy NodeId
    node_map: std::collections::HashMap<NodeId, taffy::NodeId>,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self {
            taffy: TaffyTree::new(),
            node_map: std::collections::HashMap::new(),
        }
    }

    /// Computes the layout for the current frame.
    ///
    /// # Process
    /// 1. **Sync Phase A**: Creates new Taffy nodes for new SceneNodes and
    ///    updates styles for dirty nodes.
    /// 2. **Sync Phase B**: Updates parent-child relationships in Taffy to
    ///    match the Scene Graph.
    /// 3. **Compute**: Triggers `taffy.compute_layout` from the root.
    /// 4. **Write Back**: Copies the computed (x, y, w, h) back to the
    ///    SceneNodes.
    pub fn compute_layout(&mut self, scene: &mut Scene) {
        // 1. Sync Phase A: Ensure Nodes Exist & Update Styles
        for (id, node_opt) in scene.nodes.iter_mut().enumerate() {
            if let Some(node) = node_opt {
                let t_id = if let Some(&existing_t_id) = self.node_map.get(&id) {
                    existing_t_id
                } else {
                    let style = node.element.layout_style();
                    let new_t_id = self.taffy.new_leaf(style).unwrap();
                    self.node_map.insert(id, new_t_id);
                    new_t_id
                };

                if node.dirty_style {
                    let style = node.element.layout_style();
                    self.taffy.set_style(t_id, style).unwrap();
                    node.dirty_style = false;
                }
            } else {
                // Node is deleted in the scene
                if let Some(t_id) = self.node_map.remove(&id) {
                    self.taffy.remove(t_id).ok();
                }
            }
        }

        // 2. Sync Phase B: Update Relationships (Children)
        for (id, node_opt) in scene.nodes.iter().enumerate() {
            if let Some(node) = node_opt {
                if let Some(&t_id) = self.node_map.get(&id) {
                    let mut children_t_ids = Vec::with_capacity(node.children.len());

                    for &child_id in &node.children {
                        if let Some(&child_t_id) = self.node_map.get(&child_id) {
                            children_t_ids.push(child_t_id);
                        }
                    }

                    // Taffy's set_children is a no-op when unchanged.
                    self.taffy.set_children(t_id, &children_t_ids).unwrap();
                }
            }
        }

        // 3. Compute Layout from the root
        let Some(root_id) = scene.root else { return };
        if scene.get_node(root_id).is_none() {
            return;
        }
        let Some(&root_t_id) = self.node_map.get(&root_id) else {
            return;
        };

        self.taffy
            .compute_layout(
                root_t_id,
                Size {
                    width: AvailableSpace::Definite(scene.width as f32),
                    height: AvailableSpace::Definite(scene.height as f32),
                },
            )
            .unwrap();

        // 4. Write back results to the SceneNodes
        self.write_back_recursive(scene, root_id);
    }

    fn write_back_recursive(&self, scene: &mut Scene, node_id: NodeId) {
        if let Some(t_id) = self.node_map.get(&node_id) {
            let layout = self.taffy.layout(*t_id).unwrap();

            let children = {
                let node = scene.get_node_mut(node_id).unwrap();
                node.layout_rect = skia_safe::Rect::from_xywh(
                    layout.location.x,
                    layout.location.y,
                    layout.size.width,
                    layout.size.height,
                );
                node.children.clone()
            };

            for child_id in children {
                self.write_back_recursive(scene, child_id);
            }
        }
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}
