use anyhow::Result;
use glasskit::card::{
    abs_style, build_folder_card, build_reminder_card, CardConfig, ReminderConfig, BACKDROP_SIZE,
    CARD_STACK_HEIGHT, CARD_WIDTH, FOLDER_SIZE, PHOTO_LAYERS, PHOTO_SIZE,
};
use glasskit::layout::LayoutEngine;
use glasskit::node::{BoxNode, EffectNode, GlassNode, LabelNode, PhotoNode, StickerNode};
use glasskit::render::render_frame;
use glasskit::{AssetLoader, Color, Scene, ShapeVariant};
use std::sync::Arc;

struct MockLoader;
impl AssetLoader for MockLoader {
    fn load_bytes(&self, _id: &str) -> Result<Vec<u8>> {
        Ok(vec![0; 10])
    }
}

fn sample_config() -> CardConfig {
    CardConfig {
        title: "Japan 2027".to_string(),
        image_refs: vec!["a.jpg".into(), "b.jpg".into(), "c.jpg".into()],
        background_gradient: vec![Color::rgb8(0x48, 0x43, 0x4E), Color::rgb8(0x35, 0x30, 0x39)],
        sticker_ref: Some("sticker.svg".to_string()),
        show_date: true,
    }
}

fn scene_with_root() -> (Scene, usize) {
    let mut scene = Scene::new(390, 844, Arc::new(MockLoader));
    let mut root_el = BoxNode::new();
    root_el.style = abs_style(0.0, 0.0, 390.0, 844.0);
    let root = scene.add_node(Box::new(root_el));
    scene.set_root(root);
    (scene, root)
}

#[test]
fn folder_card_layer_order_and_rects() {
    let (mut scene, root) = scene_with_root();
    let card = build_folder_card(&mut scene, &sample_config(), ShapeVariant::Folder, (8.0, 90.0));
    scene.add_child(root, card);

    let mut surface = skia_safe::surfaces::raster_n32_premul((390, 844)).unwrap();
    let mut layout = LayoutEngine::new();
    render_frame(&mut scene, &mut layout, 0.0, surface.canvas());

    // Card root: the shadowed stack plus the date caption
    let card_node = scene.get_node(card).unwrap();
    assert_eq!(card_node.children.len(), 2, "stack + date line");
    assert!((card_node.layout_rect.left - 8.0).abs() < 0.1);
    assert!((card_node.layout_rect.top - 90.0).abs() < 0.1);

    let stack_id = card_node.children[0];
    let stack = scene.get_node(stack_id).unwrap();
    assert!(stack.element.as_any().downcast_ref::<EffectNode>().is_some());

    // Back to front: backdrop, three photos, glass, sticker
    assert_eq!(stack.children.len(), 6);
    let backdrop = scene.get_node(stack.children[0]).unwrap();
    assert!(backdrop.element.as_any().downcast_ref::<BoxNode>().is_some());
    assert!((backdrop.layout_rect.left - (CARD_WIDTH - BACKDROP_SIZE.0) / 2.0).abs() < 0.1);
    assert!((backdrop.layout_rect.width() - BACKDROP_SIZE.0).abs() < 0.1);
    assert!((backdrop.layout_rect.height() - BACKDROP_SIZE.1).abs() < 0.1);

    // Photos are painted deepest-first, so the first photo child carries the
    // last authored layer pose
    for (child_idx, layer_idx) in [(1usize, 2usize), (2, 1), (3, 0)] {
        let photo = scene.get_node(stack.children[child_idx]).unwrap();
        assert!(photo.element.as_any().downcast_ref::<PhotoNode>().is_some());
        assert_eq!(photo.transform.rotation, PHOTO_LAYERS[layer_idx].rotation);
        assert_eq!(photo.transform.translate, PHOTO_LAYERS[layer_idx].offset);
        assert_eq!(photo.drift, Some(PHOTO_LAYERS[layer_idx].drift));
        assert!((photo.layout_rect.width() - PHOTO_SIZE.0).abs() < 0.1);
        assert!((photo.layout_rect.height() - PHOTO_SIZE.1).abs() < 0.1);
        assert!((photo.layout_rect.top - (CARD_STACK_HEIGHT - PHOTO_SIZE.1)).abs() < 0.1);
    }

    let glass = scene.get_node(stack.children[4]).unwrap();
    assert!(glass.element.as_any().downcast_ref::<GlassNode>().is_some());
    assert!((glass.layout_rect.left - 0.0).abs() < 0.1);
    assert!((glass.layout_rect.top - (CARD_STACK_HEIGHT - FOLDER_SIZE.1)).abs() < 0.1);
    assert!((glass.layout_rect.width() - FOLDER_SIZE.0).abs() < 0.1);
    assert!((glass.layout_rect.height() - FOLDER_SIZE.1).abs() < 0.1);

    // The title badge lives inside the glass layer
    assert_eq!(glass.children.len(), 1);
    let badge = scene.get_node(glass.children[0]).unwrap();
    assert!(badge.element.as_any().downcast_ref::<LabelNode>().is_some());

    let sticker = scene.get_node(stack.children[5]).unwrap();
    let sticker_el = sticker.element.as_any().downcast_ref::<StickerNode>().unwrap();
    // Mock bytes decode as neither SVG nor raster: empty sticker, no panic
    assert!(!sticker_el.has_content());
    assert_eq!(sticker.transform.rotation, -12.0);
}

#[test]
fn layer_order_is_invariant_under_phase() {
    let (mut scene, root) = scene_with_root();
    let card = build_folder_card(&mut scene, &sample_config(), ShapeVariant::Folder, (8.0, 90.0));
    scene.add_child(root, card);

    let mut surface = skia_safe::surfaces::raster_n32_premul((390, 844)).unwrap();
    let mut layout = LayoutEngine::new();

    render_frame(&mut scene, &mut layout, 0.0, surface.canvas());
    let stack_id = scene.get_node(card).unwrap().children[0];
    let before = scene.get_node(stack_id).unwrap().children.clone();
    let rest_phase = scene.phase();

    render_frame(&mut scene, &mut layout, 1.5, surface.canvas());
    assert_eq!(scene.get_node(stack_id).unwrap().children, before);
    assert!(scene.phase() > rest_phase);

    render_frame(&mut scene, &mut layout, 3.0, surface.canvas());
    assert_eq!(scene.get_node(stack_id).unwrap().children, before);
}

#[test]
fn missing_assets_fall_back_to_placeholders() {
    let (mut scene, root) = scene_with_root();
    let card = build_folder_card(&mut scene, &sample_config(), ShapeVariant::Folder, (0.0, 0.0));
    scene.add_child(root, card);

    let stack_id = scene.get_node(card).unwrap().children[0];
    let photo_id = scene.get_node(stack_id).unwrap().children[1];
    let photo = scene.get_node(photo_id).unwrap();
    let photo_el = photo.element.as_any().downcast_ref::<PhotoNode>().unwrap();
    assert!(photo_el.image.is_none(), "undecodable bytes must not become an image");

    // Still renders
    let mut surface = skia_safe::surfaces::raster_n32_premul((390, 844)).unwrap();
    let mut layout = LayoutEngine::new();
    render_frame(&mut scene, &mut layout, 0.0, surface.canvas());
}

#[test]
fn fewer_image_refs_build_fewer_photo_layers() {
    let (mut scene, root) = scene_with_root();
    let mut config = sample_config();
    config.image_refs.truncate(2);
    config.sticker_ref = None;
    let card = build_folder_card(&mut scene, &config, ShapeVariant::FolderSlim, (0.0, 0.0));
    scene.add_child(root, card);

    let stack_id = scene.get_node(card).unwrap().children[0];
    // backdrop + 2 photos + glass
    assert_eq!(scene.get_node(stack_id).unwrap().children.len(), 4);
}

#[test]
fn reminder_card_builds_and_renders() {
    let (mut scene, root) = scene_with_root();
    let config = ReminderConfig {
        title: "Water the plants".to_string(),
        emoji: "\u{1F331}".to_string(),
        time: "Morning".to_string(),
        gradient: vec![Color::new(0.65, 0.80, 0.78, 1.0), Color::new(0.55, 0.75, 0.72, 1.0)],
    };
    let card = build_reminder_card(&mut scene, &config, 169.0, (20.0, 160.0));
    scene.add_child(root, card);

    let mut surface = skia_safe::surfaces::raster_n32_premul((390, 844)).unwrap();
    let mut layout = LayoutEngine::new();
    render_frame(&mut scene, &mut layout, 0.0, surface.canvas());

    let card_node = scene.get_node(card).unwrap();
    // title, time, arrow chip
    assert_eq!(card_node.children.len(), 3);
    assert!((card_node.layout_rect.width() - 169.0).abs() < 0.1);

    let chip = scene.get_node(card_node.children[2]).unwrap();
    assert!(chip.element.as_any().downcast_ref::<BoxNode>().is_some());
    assert_eq!(chip.children.len(), 1);
}
