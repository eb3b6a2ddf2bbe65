//! Card composition: assembles the layered node trees for folder cards and
//! reminder cards from immutable config value objects.
//!
//! Layer order is significant and fixed: backdrop, photos back-to-front,
//! the glass lid (with its title badge), then the sticker. The breathing
//! drift only ever moves the photo layers; it never reorders anything.

use crate::animation::Drift;
use crate::element::{Color, LinearGradient};
use crate::node::{BoxNode, EffectNode, EffectType, GlassNode, LabelNode, PhotoNode, StickerNode};
use crate::scene::{NodeId, Scene};
use crate::shape::ShapeVariant;
use chrono::Local;
use taffy::geometry::{Rect as TaffyRect, Size as TaffySize};
use taffy::style::{Dimension, LengthPercentageAuto, Position, Style};

pub const CARD_WIDTH: f32 = 181.0;
pub const CARD_STACK_HEIGHT: f32 = 140.0;
/// Stack plus the date caption line.
pub const CARD_HEIGHT: f32 = 164.0;
pub const BACKDROP_SIZE: (f32, f32) = (159.0, 140.0);
pub const PHOTO_SIZE: (f32, f32) = (128.0, 92.0);
pub const FOLDER_SIZE: (f32, f32) = (181.0, 111.5);
pub const STACK_SCALE: f32 = 0.84;

pub const REMINDER_HEIGHT: f32 = 130.0;

/// Authored pose of one photo layer. Index 0 is the front-most photo.
#[derive(Debug, Clone, Copy)]
pub struct PhotoLayer {
    pub rotation: f32,
    pub offset: (f32, f32),
    pub drift: Drift,
}

pub const PHOTO_LAYERS: [PhotoLayer; 3] = [
    PhotoLayer {
        rotation: 85.0,
        offset: (-24.0, -40.0),
        drift: Drift::new(0.5, -1.0),
    },
    PhotoLayer {
        rotation: 95.0,
        offset: (-3.0, -38.0),
        drift: Drift::new(-0.5, 1.0),
    },
    PhotoLayer {
        rotation: 105.0,
        offset: (21.0, -35.0),
        drift: Drift::new(1.0, -0.5),
    },
];

/// Immutable folder-card configuration, supplied by the caller.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CardConfig {
    pub title: String,
    /// 1 to 3 image identifiers, front photo first.
    pub image_refs: Vec<String>,
    /// At least two stops, top to bottom.
    pub background_gradient: Vec<Color>,
    #[serde(default)]
    pub sticker_ref: Option<String>,
    #[serde(default)]
    pub show_date: bool,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ReminderConfig {
    pub title: String,
    pub emoji: String,
    pub time: String,
    pub gradient: Vec<Color>,
}

/// Absolutely positioned style anchored to the parent's top-left.
pub fn abs_style(left: f32, top: f32, width: f32, height: f32) -> Style {
    Style {
        position: Position::Absolute,
        inset: TaffyRect {
            left: LengthPercentageAuto::length(left),
            right: LengthPercentageAuto::auto(),
            top: LengthPercentageAuto::length(top),
            bottom: LengthPercentageAuto::auto(),
        },
        size: TaffySize {
            width: Dimension::length(width),
            height: Dimension::length(height),
        },
        ..Default::default()
    }
}

/// Absolutely positioned style anchored to the parent's bottom-left.
pub fn abs_style_bottom(left: f32, bottom: f32, width: f32, height: f32) -> Style {
    Style {
        position: Position::Absolute,
        inset: TaffyRect {
            left: LengthPercentageAuto::length(left),
            right: LengthPercentageAuto::auto(),
            top: LengthPercentageAuto::auto(),
            bottom: LengthPercentageAuto::length(bottom),
        },
        size: TaffySize {
            width: Dimension::length(width),
            height: Dimension::length(height),
        },
        ..Default::default()
    }
}

/// Builds the five-layer folder card and returns its root node.
///
/// Back to front: gradient backdrop, photo stack (each rotated and offset,
/// breathing drift attached), glass lid with the title badge, optional
/// sticker, plus the optional date caption under the stack.
pub fn build_folder_card(
    scene: &mut Scene,
    config: &CardConfig,
    variant: ShapeVariant,
    origin: (f32, f32),
) -> NodeId {
    tracing::debug!(title = %config.title, ?variant, "building folder card");
    let fs = scene.font_system.clone();

    let mut root_el = BoxNode::new();
    root_el.style = abs_style(origin.0, origin.1, CARD_WIDTH, CARD_HEIGHT);
    let root = scene.add_node(Box::new(root_el));

    // The whole stack casts one soft shadow and is scaled down slightly.
    let mut stack_el = EffectNode::new(vec![EffectType::DropShadow {
        blur: 12.0,
        offset_x: 0.0,
        offset_y: 6.0,
        color: Color::BLACK.with_alpha(0.12),
    }]);
    stack_el.style = abs_style(0.0, 0.0, CARD_WIDTH, CARD_STACK_HEIGHT);
    let stack = scene.add_node(Box::new(stack_el));
    scene.add_child(root, stack);
    if let Some(node) = scene.get_node_mut(stack) {
        node.transform.scale = (STACK_SCALE, STACK_SCALE);
    }

    // Backdrop card, behind the folder
    let mut backdrop = BoxNode::gradient(LinearGradient::vertical(&config.background_gradient), 15.0);
    backdrop.style = abs_style(
        (CARD_WIDTH - BACKDROP_SIZE.0) / 2.0,
        CARD_STACK_HEIGHT - BACKDROP_SIZE.1,
        BACKDROP_SIZE.0,
        BACKDROP_SIZE.1,
    );
    let backdrop_id = scene.add_node(Box::new(backdrop));
    scene.add_child(stack, backdrop_id);

    // Photo layers, painted back to front
    let count = config.image_refs.len().min(PHOTO_LAYERS.len());
    for i in (0..count).rev() {
        let image = scene.load_image(&config.image_refs[i]);
        let mut photo = PhotoNode::new(image);
        photo.style = abs_style(
            (CARD_WIDTH - PHOTO_SIZE.0) / 2.0,
            CARD_STACK_HEIGHT - PHOTO_SIZE.1,
            PHOTO_SIZE.0,
            PHOTO_SIZE.1,
        );
        let photo_id = scene.add_node(Box::new(photo));
        scene.add_child(stack, photo_id);

        let layer = &PHOTO_LAYERS[i];
        if let Some(node) = scene.get_node_mut(photo_id) {
            node.transform.rotation = layer.rotation;
            node.transform.translate = layer.offset;
            node.drift = Some(layer.drift);
        }
    }

    // Glass lid, in front of the photos
    let mut glass = GlassNode::new(variant);
    glass.style = abs_style(
        0.0,
        CARD_STACK_HEIGHT - FOLDER_SIZE.1,
        FOLDER_SIZE.0,
        FOLDER_SIZE.1,
    );
    let glass_id = scene.add_node(Box::new(glass));
    scene.add_child(stack, glass_id);

    // Title badge, bottom-leading inside the lid
    let mut badge = LabelNode::badge(config.title.clone(), 12.0, fs.clone());
    badge.style = abs_style_bottom(18.0, 10.0, FOLDER_SIZE.0 - 36.0, 30.0);
    let badge_id = scene.add_node(Box::new(badge));
    scene.add_child(glass_id, badge_id);

    // Sticker, above the lid
    if let Some(sticker_ref) = &config.sticker_ref {
        let mut sticker_el = match scene.asset_loader.load_bytes(sticker_ref) {
            Ok(bytes) => StickerNode::from_bytes(&bytes),
            Err(e) => {
                tracing::debug!(asset = %sticker_ref, error = %e, "sticker not found");
                StickerNode::empty()
            }
        };
        sticker_el.style = abs_style(CARD_WIDTH - 50.0, 6.0, 44.0, 44.0);
        let sticker_id = scene.add_node(Box::new(sticker_el));
        scene.add_child(stack, sticker_id);
        if let Some(node) = scene.get_node_mut(sticker_id) {
            node.transform.rotation = -12.0;
        }
    }

    if config.show_date {
        let text = format!("Created on: {}", Local::now().format("%d %B %Y"));
        let mut date = LabelNode::new(text, 10.0, fs);
        date.color = Color::BLACK.with_alpha(0.5);
        date.style = abs_style(24.0, CARD_STACK_HEIGHT + 8.0, CARD_WIDTH - 24.0, 16.0);
        let date_id = scene.add_node(Box::new(date));
        scene.add_child(root, date_id);
    }

    root
}

/// Builds a gradient reminder card and returns its root node.
pub fn build_reminder_card(
    scene: &mut Scene,
    config: &ReminderConfig,
    width: f32,
    origin: (f32, f32),
) -> NodeId {
    let fs = scene.font_system.clone();

    let mut card = BoxNode::gradient(LinearGradient::diagonal(&config.gradient), 16.0);
    card.style = abs_style(origin.0, origin.1, width, REMINDER_HEIGHT);
    let root = scene.add_node(Box::new(card));

    let mut title = LabelNode::new(
        format!("{} {}", config.title, config.emoji),
        15.0,
        fs.clone(),
    )
    .with_weight(600);
    title.color = Color::BLACK.with_alpha(0.8);
    title.style = abs_style(14.0, 14.0, width - 28.0, 44.0);
    let title_id = scene.add_node(Box::new(title));
    scene.add_child(root, title_id);

    let mut time = LabelNode::new(config.time.clone(), 11.0, fs.clone());
    time.color = Color::BLACK.with_alpha(0.5);
    time.style = abs_style(14.0, REMINDER_HEIGHT - 30.0, width * 0.5, 16.0);
    let time_id = scene.add_node(Box::new(time));
    scene.add_child(root, time_id);

    let mut chip = BoxNode::new();
    chip.bg_color = Some(Color::BLACK.with_alpha(0.08));
    chip.corner_radius = 13.0;
    chip.style = abs_style(width - 40.0, REMINDER_HEIGHT - 40.0, 26.0, 26.0);
    let chip_id = scene.add_node(Box::new(chip));
    scene.add_child(root, chip_id);

    let mut arrow = LabelNode::new("\u{2197}", 11.0, fs);
    arrow.color = Color::BLACK.with_alpha(0.4);
    arrow.style = abs_style(7.0, 5.0, 14.0, 16.0);
    let arrow_id = scene.add_node(Box::new(arrow));
    scene.add_child(chip_id, arrow_id);

    root
}
