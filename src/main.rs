use anyhow::Result;
use glasskit::card::{abs_style, build_folder_card, build_reminder_card, CARD_WIDTH, REMINDER_HEIGHT};
use glasskit::layout::LayoutEngine;
use glasskit::node::{BoxNode, EffectNode, EffectType, GlassNode, LabelNode};
use glasskit::render::export_png;
use glasskit::{samples, AssetLoader, Color, DefaultAssetLoader, Scene, ShapeVariant};
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let out_dir = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| "out".to_string()));
    std::fs::create_dir_all(&out_dir)?;

    let loader: Arc<dyn AssetLoader> = Arc::new(DefaultAssetLoader);

    folders_page(loader.clone(), &out_dir)?;
    home_page(loader, &out_dir)?;

    tracing::info!(dir = %out_dir.display(), "done");
    Ok(())
}

/// The glass-folders screen: two folder cards and a large container panel.
fn folders_page(loader: Arc<dyn AssetLoader>, out_dir: &Path) -> Result<()> {
    let mut scene = Scene::new(390, 844, loader);
    scene.background = Color::new(0.96, 0.96, 0.97, 1.0);

    let mut root_el = BoxNode::new();
    root_el.style = abs_style(0.0, 0.0, 390.0, 844.0);
    let root = scene.add_node(Box::new(root_el));
    scene.set_root(root);

    let fs = scene.font_system.clone();
    let mut header = LabelNode::new("Glass Containers", 20.0, fs).with_weight(700);
    header.style = abs_style(112.0, 28.0, 200.0, 28.0);
    let header_id = scene.add_node(Box::new(header));
    scene.add_child(root, header_id);

    let overrides = out_dir.join("cards.json");
    let cards = if overrides.exists() {
        samples::load_card_overrides(&overrides)?
    } else {
        samples::folder_cards()
    };

    let mut x = 8.0;
    for config in &cards {
        let card = build_folder_card(&mut scene, config, ShapeVariant::Folder, (x, 90.0));
        scene.add_child(root, card);
        x += CARD_WIDTH + 12.0;
    }

    let mut panel_wrap = EffectNode::new(vec![EffectType::DropShadow {
        blur: 12.0,
        offset_x: 0.0,
        offset_y: 6.0,
        color: Color::BLACK.with_alpha(0.12),
    }]);
    panel_wrap.style = abs_style(25.0, 330.0, 340.0, 250.0);
    let wrap_id = scene.add_node(Box::new(panel_wrap));
    scene.add_child(root, wrap_id);

    let mut panel = GlassNode::new(ShapeVariant::Container);
    panel.style = abs_style(0.0, 0.0, 340.0, 250.0);
    let panel_id = scene.add_node(Box::new(panel));
    scene.add_child(wrap_id, panel_id);

    // The panel fades in on first display
    scene.animate(wrap_id, "opacity", 0.0, 1.0, 0.3, "ease_out");

    let mut layout = LayoutEngine::new();

    // One breathing cycle: rest, mid-leg, peak
    export_png(&mut scene, &mut layout, 0.0, &out_dir.join("folders_rest.png"))?;
    export_png(&mut scene, &mut layout, 1.5, &out_dir.join("folders_mid.png"))?;
    export_png(&mut scene, &mut layout, 3.0, &out_dir.join("folders_peak.png"))?;

    // Disable at the peak and watch the stack settle
    scene.set_breathing(false, 3.0);
    export_png(&mut scene, &mut layout, 3.15, &out_dir.join("folders_settling.png"))?;
    export_png(&mut scene, &mut layout, 4.0, &out_dir.join("folders_settled.png"))?;

    Ok(())
}

/// The home screen: hero text and the 2x2 reminder grid.
fn home_page(loader: Arc<dyn AssetLoader>, out_dir: &Path) -> Result<()> {
    let mut scene = Scene::new(390, 844, loader);
    scene.background = Color::new(0.97, 0.96, 0.95, 1.0);

    let mut root_el = BoxNode::new();
    root_el.style = abs_style(0.0, 0.0, 390.0, 844.0);
    let root = scene.add_node(Box::new(root_el));
    scene.set_root(root);

    let fs = scene.font_system.clone();
    for (i, line) in ["Let's be real...", "you forget stuff.", "We don't \u{1F60E}"]
        .iter()
        .enumerate()
    {
        let mut hero = LabelNode::new(*line, 24.0, fs.clone()).with_weight(700);
        hero.style = abs_style(20.0, 36.0 + i as f32 * 32.0, 350.0, 30.0);
        let id = scene.add_node(Box::new(hero));
        scene.add_child(root, id);
    }

    let card_w = (390.0 - 2.0 * 20.0 - 12.0) / 2.0;
    for (i, reminder) in samples::reminders().iter().enumerate() {
        let col = (i % 2) as f32;
        let row = (i / 2) as f32;
        let origin = (
            20.0 + col * (card_w + 12.0),
            160.0 + row * (REMINDER_HEIGHT + 12.0),
        );
        let card = build_reminder_card(&mut scene, reminder, card_w, origin);
        scene.add_child(root, card);
    }

    let mut layout = LayoutEngine::new();
    export_png(&mut scene, &mut layout, 0.0, &out_dir.join("home.png"))?;

    Ok(())
}
