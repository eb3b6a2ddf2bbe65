use crate::animation::{parse_easing, Animated};
use crate::element::{Color, Element, LinearGradient};
use crate::shaders;
use crate::shape::ShapeVariant;
use cosmic_text::{Attrs, Buffer, FontSystem, Metrics, Shaping, Weight};
use skia_safe::{
    canvas::SaveLayerRec,
    canvas::SrcRectConstraint,
    font_style::{Slant as SkSlant, Weight as SkWeight, Width as SkWidth},
    image_filters, Canvas, ClipOp, Data, FontMgr, FontStyle, Image, Paint, PaintStyle, RRect,
    Rect, RuntimeEffect, TextBlobBuilder, TileMode,
};
use std::any::Any;
use std::fmt;
use std::sync::{Arc, Mutex};
use taffy::style::Style;
use tiny_skia::Pixmap;
use usvg::{Options, Tree};

// --- Effects ---

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectType {
    Blur(f32),
    DropShadow {
        blur: f32,
        offset_x: f32,
        offset_y: f32,
        color: Color,
    },
}

pub fn build_effect_filter(effects: &[EffectType]) -> Option<skia_safe::ImageFilter> {
    let mut current_filter = None;
    for effect in effects {
        match *effect {
            EffectType::Blur(sigma) => {
                current_filter =
                    image_filters::blur((sigma, sigma), TileMode::Decal, current_filter, None);
            }
            EffectType::DropShadow {
                blur,
                offset_x,
                offset_y,
                color,
            } => {
                current_filter = image_filters::drop_shadow(
                    (offset_x, offset_y),
                    (blur, blur),
                    color.to_skia(),
                    None,
                    current_filter,
                    None,
                );
            }
        }
    }
    current_filter
}

/// Applies its effect chain and group opacity to everything its children
/// draw, through an isolated layer. Used for the whole-card drop shadow.
#[derive(Debug, Clone)]
pub struct EffectNode {
    pub effects: Vec<EffectType>,
    pub opacity: Animated<f32>,
    pub style: Style,
}

impl EffectNode {
    pub fn new(effects: Vec<EffectType>) -> Self {
        Self {
            effects,
            opacity: Animated::new(1.0),
            style: Style::default(),
        }
    }
}

impl Element for EffectNode {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn layout_style(&self) -> Style {
        self.style.clone()
    }

    fn set_layout_style(&mut self, style: Style) {
        self.style = style;
    }

    fn update(&mut self, time: f64) -> bool {
        self.opacity.update(time);
        true
    }

    fn render(&self, canvas: &Canvas, _rect: Rect, opacity: f32, draw_children: &mut dyn FnMut(&Canvas)) {
        let filter = build_effect_filter(&self.effects);

        let mut paint = Paint::default();
        paint.set_alpha_f(self.opacity.current_value * opacity);
        if let Some(f) = filter {
            paint.set_image_filter(f);
        }

        // Do not restrict bounds to rect, otherwise shadows/blurs are clipped
        canvas.save_layer(&SaveLayerRec::default().paint(&paint));
        draw_children(canvas);
        canvas.restore();
    }

    fn animate_property(&mut self, property: &str, start: f32, target: f32, duration: f64, easing: &str) {
        if property == "opacity" {
            self.opacity
                .add_segment(start, target, duration, parse_easing(easing));
        }
    }
}

// --- Box Node ---

/// Rounded-rect backdrop: solid or linear-gradient fill, optional border,
/// optional drop shadow, optional child clipping.
#[derive(Debug, Clone)]
pub struct BoxNode {
    pub style: Style,
    pub fill: Option<LinearGradient>,
    pub bg_color: Option<Color>,
    pub opacity: Animated<f32>,
    pub corner_radius: f32,
    pub border_width: f32,
    pub border_color: Option<Color>,
    pub shadow: Option<EffectType>,
    pub clip_children: bool,
}

impl BoxNode {
    pub fn new() -> Self {
        Self {
            style: Style::default(),
            fill: None,
            bg_color: None,
            opacity: Animated::new(1.0),
            corner_radius: 0.0,
            border_width: 0.0,
            border_color: None,
            shadow: None,
            clip_children: false,
        }
    }

    pub fn gradient(fill: LinearGradient, corner_radius: f32) -> Self {
        let mut node = Self::new();
        node.fill = Some(fill);
        node.corner_radius = corner_radius;
        node
    }
}

impl Default for BoxNode {
    fn default() -> Self {
        Self::new()
    }
}

impl Element for BoxNode {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn layout_style(&self) -> Style {
        self.style.clone()
    }

    fn set_layout_style(&mut self, style: Style) {
        self.style = style;
    }

    fn update(&mut self, time: f64) -> bool {
        self.opacity.update(time);
        true
    }

    fn render(&self, canvas: &Canvas, rect: Rect, opacity: f32, draw_children: &mut dyn FnMut(&Canvas)) {
        let local_opacity = self.opacity.current_value * opacity;
        let radius = self.corner_radius;
        let rrect = RRect::new_rect_xy(&rect, radius, radius);

        canvas.save();

        if self.clip_children {
            canvas.clip_rrect(rrect, ClipOp::Intersect, true);
        }

        let mut paint = Paint::default();
        paint.set_anti_alias(true);

        if let Some(shadow) = self.shadow {
            if let Some(f) = build_effect_filter(&[shadow]) {
                paint.set_image_filter(f);
            }
        }

        if let Some(gradient) = &self.fill {
            if let Some(shader) = gradient.to_shader(rect, local_opacity) {
                paint.set_shader(shader);
                canvas.draw_rrect(rrect, &paint);
            }
        } else if let Some(bg) = self.bg_color {
            let mut c = bg;
            c.a *= local_opacity;
            paint.set_color4f(c.to_color4f(), None);
            canvas.draw_rrect(rrect, &paint);
        }

        draw_children(canvas);

        canvas.restore();

        let bw = self.border_width;
        if bw > 0.0 {
            let mut border_paint = Paint::default();
            border_paint.set_anti_alias(true);
            border_paint.set_style(PaintStyle::Stroke);
            border_paint.set_stroke_width(bw);

            let mut c = self.border_color.unwrap_or(Color::BLACK);
            c.a *= local_opacity;
            border_paint.set_color4f(c.to_color4f(), None);

            canvas.draw_rrect(rrect, &border_paint);
        }
    }

    fn animate_property(&mut self, property: &str, start: f32, target: f32, duration: f64, easing: &str) {
        if property == "opacity" {
            self.opacity
                .add_segment(start, target, duration, parse_easing(easing));
        }
    }
}

// --- Photo Node ---

/// One photo of the stacked-photos illusion: the image center-cropped into
/// a rounded rect, outlined with a light stroke and drop-shadowed. A
/// missing or undecodable asset renders the placeholder gradient instead.
#[derive(Debug, Clone)]
pub struct PhotoNode {
    pub image: Option<Image>,
    pub corner_radius: f32,
    pub stroke_width: f32,
    pub stroke_color: Color,
    pub shadow: EffectType,
    pub placeholder: LinearGradient,
    pub opacity: Animated<f32>,
    pub style: Style,
}

impl PhotoNode {
    pub fn new(image: Option<Image>) -> Self {
        Self {
            image,
            corner_radius: 16.0,
            stroke_width: 2.5,
            stroke_color: Color::WHITE,
            shadow: EffectType::DropShadow {
                blur: 10.0,
                offset_x: 0.0,
                offset_y: 4.0,
                color: Color::BLACK.with_alpha(0.15),
            },
            placeholder: LinearGradient::diagonal(&[
                Color::new(0.82, 0.82, 0.84, 1.0),
                Color::new(0.66, 0.66, 0.70, 1.0),
            ]),
            opacity: Animated::new(1.0),
            style: Style::default(),
        }
    }

    pub fn from_encoded(data: &[u8]) -> Self {
        Self::new(Image::from_encoded(Data::new_copy(data)))
    }
}

impl Element for PhotoNode {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn layout_style(&self) -> Style {
        self.style.clone()
    }

    fn set_layout_style(&mut self, style: Style) {
        self.style = style;
    }

    fn update(&mut self, time: f64) -> bool {
        self.opacity.update(time);
        true
    }

    fn render(&self, canvas: &Canvas, rect: Rect, parent_opacity: f32, draw_children: &mut dyn FnMut(&Canvas)) {
        let op = self.opacity.current_value * parent_opacity;
        let rrect = RRect::new_rect_xy(&rect, self.corner_radius, self.corner_radius);

        // Shadow first, as its own pass, so the clip doesn't swallow it
        if let EffectType::DropShadow {
            blur,
            offset_x,
            offset_y,
            color,
        } = self.shadow
        {
            if let Some(f) = image_filters::drop_shadow_only(
                (offset_x, offset_y),
                (blur, blur),
                color.with_alpha(color.a * op).to_skia(),
                None,
                None,
                None,
            ) {
                let mut shadow_paint = Paint::default();
                shadow_paint.set_anti_alias(true);
                shadow_paint.set_image_filter(f);
                shadow_paint.set_color4f(Color::WHITE.with_alpha(op).to_color4f(), None);
                canvas.draw_rrect(rrect, &shadow_paint);
            }
        }

        canvas.save();
        canvas.clip_rrect(rrect, ClipOp::Intersect, true);

        if let Some(img) = &self.image {
            let mut paint = Paint::default();
            paint.set_anti_alias(true);
            paint.set_alpha_f(op);

            let sampling = skia_safe::SamplingOptions::new(
                skia_safe::FilterMode::Linear,
                skia_safe::MipmapMode::Linear,
            );

            // Center-crop to fill the frame
            let (iw, ih) = (img.width() as f32, img.height() as f32);
            if iw > 0.0 && ih > 0.0 && rect.width() > 0.0 && rect.height() > 0.0 {
                let scale = (rect.width() / iw).max(rect.height() / ih);
                let sw = rect.width() / scale;
                let sh = rect.height() / scale;
                let src = Rect::from_xywh((iw - sw) / 2.0, (ih - sh) / 2.0, sw, sh);
                canvas.draw_image_rect_with_sampling_options(
                    img,
                    Some((&src, SrcRectConstraint::Fast)),
                    rect,
                    sampling,
                    &paint,
                );
            }
        } else {
            let mut paint = Paint::default();
            paint.set_anti_alias(true);
            if let Some(shader) = self.placeholder.to_shader(rect, op) {
                paint.set_shader(shader);
                canvas.draw_rrect(rrect, &paint);
            }
        }

        canvas.restore();

        if self.stroke_width > 0.0 {
            let mut stroke = Paint::default();
            stroke.set_anti_alias(true);
            stroke.set_style(PaintStyle::Stroke);
            stroke.set_stroke_width(self.stroke_width);
            let c = self.stroke_color.with_alpha(self.stroke_color.a * op);
            stroke.set_color4f(c.to_color4f(), None);
            canvas.draw_rrect(rrect, &stroke);
        }

        draw_children(canvas);
    }

    fn animate_property(&mut self, property: &str, start: f32, target: f32, duration: f64, easing: &str) {
        if property == "opacity" {
            self.opacity
                .add_segment(start, target, duration, parse_easing(easing));
        }
    }
}

// --- Glass Node ---

/// The frosted lid: the shape outline clipped, what lies behind it blurred
/// through a backdrop layer, then a top-to-bottom translucency gradient and
/// a faint speckle pass on top. Children (the title badge) draw above.
pub struct GlassNode {
    pub variant: ShapeVariant,
    pub fill: LinearGradient,
    pub frost_blur: f32,
    pub frost_noise: f32,
    pub opacity: Animated<f32>,
    // Outer None = not compiled yet, inner None = compilation failed
    frost_effect: Mutex<Option<Option<RuntimeEffect>>>,
    pub style: Style,
}

impl GlassNode {
    pub fn new(variant: ShapeVariant) -> Self {
        Self {
            variant,
            fill: LinearGradient::vertical(&[
                Color::WHITE.with_alpha(0.8),
                Color::WHITE.with_alpha(0.08),
            ]),
            frost_blur: 14.0,
            frost_noise: 0.05,
            opacity: Animated::new(1.0),
            frost_effect: Mutex::new(None),
            style: Style::default(),
        }
    }
}

impl Clone for GlassNode {
    fn clone(&self) -> Self {
        Self {
            variant: self.variant,
            fill: self.fill.clone(),
            frost_blur: self.frost_blur,
            frost_noise: self.frost_noise,
            opacity: self.opacity.clone(),
            frost_effect: Mutex::new(None),
            style: self.style.clone(),
        }
    }
}

impl fmt::Debug for GlassNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlassNode")
            .field("variant", &self.variant)
            .field("frost_blur", &self.frost_blur)
            .finish()
    }
}

impl Element for GlassNode {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn layout_style(&self) -> Style {
        self.style.clone()
    }

    fn set_layout_style(&mut self, style: Style) {
        self.style = style;
    }

    fn update(&mut self, time: f64) -> bool {
        self.opacity.update(time);
        true
    }

    fn render(&self, canvas: &Canvas, rect: Rect, parent_opacity: f32, draw_children: &mut dyn FnMut(&Canvas)) {
        let op = self.opacity.current_value * parent_opacity;

        let outline = self.variant.outline(rect.width(), rect.height());
        let mut path = outline.to_skia_path();
        path.offset((rect.left, rect.top));

        canvas.save();
        canvas.clip_path(&path, ClipOp::Intersect, true);

        // Frost: blur whatever is already behind the shape
        if self.frost_blur > 0.0 {
            if let Some(filter) =
                image_filters::blur((self.frost_blur, self.frost_blur), TileMode::Clamp, None, None)
            {
                canvas.save_layer(&SaveLayerRec::default().backdrop(&filter));
                canvas.restore();
            }
        }

        let mut paint = Paint::default();
        paint.set_anti_alias(true);
        if let Some(shader) = self.fill.to_shader(rect, op) {
            paint.set_shader(shader);
            canvas.draw_path(&path, &paint);
        }

        if self.frost_noise > 0.0 {
            let mut guard = self.frost_effect.lock().unwrap();
            if guard.is_none() {
                match RuntimeEffect::make_for_shader(shaders::FROST_SPECKLE, None) {
                    Ok(effect) => *guard = Some(Some(effect)),
                    Err(e) => {
                        tracing::warn!("frost shader compilation failed: {e}");
                        *guard = Some(None);
                    }
                }
            }
            if let Some(Some(effect)) = guard.as_ref() {
                let intensity = self.frost_noise * op;
                let uniforms = Data::new_copy(&intensity.to_le_bytes());
                if let Some(shader) = effect.make_shader(uniforms, &[], None) {
                    let mut speckle = Paint::default();
                    speckle.set_anti_alias(true);
                    speckle.set_shader(shader);
                    canvas.draw_path(&path, &speckle);
                }
            }
        }

        canvas.restore();

        draw_children(canvas);
    }

    fn animate_property(&mut self, property: &str, start: f32, target: f32, duration: f64, easing: &str) {
        if property == "opacity" {
            self.opacity
                .add_segment(start, target, duration, parse_easing(easing));
        }
    }
}

// --- Label Node ---

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapsuleStyle {
    pub background: Color,
    pub padding_x: f32,
    pub padding_y: f32,
}

/// Single-line text, shaped by cosmic-text and drawn as Skia text blobs.
/// With a `capsule`, a pill-shaped badge sized to the measured content is
/// painted behind the text, anchored to the node's bottom-leading corner.
pub struct LabelNode {
    pub text: String,
    pub font_size: f32,
    pub color: Color,
    pub weight: u16,
    pub capsule: Option<CapsuleStyle>,
    pub opacity: Animated<f32>,
    buffer: Mutex<Option<Buffer>>,
    font_system: Arc<Mutex<FontSystem>>,
    pub style: Style,
}

impl LabelNode {
    pub fn new(text: impl Into<String>, font_size: f32, font_system: Arc<Mutex<FontSystem>>) -> Self {
        let mut node = Self {
            text: text.into(),
            font_size,
            color: Color::BLACK,
            weight: 400,
            capsule: None,
            opacity: Animated::new(1.0),
            buffer: Mutex::new(None),
            font_system,
            style: Style::default(),
        };
        node.init_buffer();
        node
    }

    pub fn badge(text: impl Into<String>, font_size: f32, font_system: Arc<Mutex<FontSystem>>) -> Self {
        let mut node = Self::new(text, font_size, font_system).with_weight(700);
        node.capsule = Some(CapsuleStyle {
            background: Color::WHITE,
            padding_x: 8.0,
            padding_y: 4.0,
        });
        node
    }

    /// Weight participates in shaping, so changing it rebuilds the buffer.
    pub fn with_weight(mut self, weight: u16) -> Self {
        self.weight = weight;
        self.init_buffer();
        self
    }

    fn init_buffer(&mut self) {
        let mut fs = self.font_system.lock().unwrap();
        let mut buffer = Buffer::new(&mut fs, Metrics::new(self.font_size, self.font_size * 1.2));

        let attrs = Attrs::new().weight(Weight(self.weight));
        buffer.set_text(&mut fs, &self.text, &attrs, Shaping::Advanced, None);

        *self.buffer.lock().unwrap() = Some(buffer);
    }
}

impl Clone for LabelNode {
    fn clone(&self) -> Self {
        let mut node = Self {
            text: self.text.clone(),
            font_size: self.font_size,
            color: self.color,
            weight: self.weight,
            capsule: self.capsule,
            opacity: self.opacity.clone(),
            buffer: Mutex::new(None),
            font_system: self.font_system.clone(),
            style: self.style.clone(),
        };
        node.init_buffer();
        node
    }
}

impl fmt::Debug for LabelNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelNode")
            .field("text", &self.text)
            .field("font_size", &self.font_size)
            .field("capsule", &self.capsule)
            .finish()
    }
}

impl Element for LabelNode {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn layout_style(&self) -> Style {
        self.style.clone()
    }

    fn set_layout_style(&mut self, style: Style) {
        self.style = style;
    }

    fn update(&mut self, time: f64) -> bool {
        self.opacity.update(time);
        true
    }

    fn render(&self, canvas: &Canvas, rect: Rect, parent_opacity: f32, draw_children: &mut dyn FnMut(&Canvas)) {
        let op = self.opacity.current_value * parent_opacity;

        let mut buf_guard = self.buffer.lock().unwrap();
        if let Some(buffer) = buf_guard.as_mut() {
            let mut fs = self.font_system.lock().unwrap();
            buffer.set_size(&mut fs, Some(rect.width().max(1.0)), Some(rect.height().max(1.0)));
            buffer.shape_until_scroll(&mut fs, false);

            let mut content_w: f32 = 0.0;
            let mut content_h: f32 = 0.0;
            for run in buffer.layout_runs() {
                content_w = content_w.max(run.line_w);
                content_h += run.line_height;
            }

            let (text_x, text_y) = if let Some(c) = self.capsule {
                let cap_w = content_w + c.padding_x * 2.0;
                let cap_h = content_h + c.padding_y * 2.0;
                let cap = Rect::from_xywh(rect.left, rect.bottom - cap_h, cap_w, cap_h);
                let rr = RRect::new_rect_xy(&cap, cap_h / 2.0, cap_h / 2.0);

                let mut bg = Paint::default();
                bg.set_anti_alias(true);
                let bc = c.background.with_alpha(c.background.a * op);
                bg.set_color4f(bc.to_color4f(), None);
                canvas.draw_rrect(rr, &bg);

                (cap.left + c.padding_x, cap.top + c.padding_y)
            } else {
                (rect.left, rect.top)
            };

            let font_mgr = FontMgr::default();
            let weight = SkWeight::from(self.weight as i32);
            let font_style = FontStyle::new(weight, SkWidth::NORMAL, SkSlant::Upright);
            if let Some(typeface) = font_mgr.match_family_style("Sans Serif", font_style) {
                let font = skia_safe::Font::new(typeface, Some(self.font_size));

                let mut paint = Paint::default();
                paint.set_anti_alias(true);
                let c = self.color.with_alpha(self.color.a * op);
                paint.set_color4f(c.to_color4f(), None);

                for run in buffer.layout_runs() {
                    let origin_y = text_y + run.line_y;
                    for glyph in run.glyphs.iter() {
                        let mut builder = TextBlobBuilder::new();
                        let glyph_id = glyph.glyph_id as u16;
                        let blob_buffer = builder.alloc_run(&font, 1, (0.0, 0.0), None);
                        blob_buffer[0] = glyph_id;

                        if let Some(blob) = builder.make() {
                            canvas.draw_text_blob(&blob, (text_x + glyph.x, origin_y + glyph.y), &paint);
                        }
                    }
                }
            }
        }

        draw_children(canvas);
    }

    fn animate_property(&mut self, property: &str, start: f32, target: f32, duration: f64, easing: &str) {
        if property == "opacity" {
            self.opacity
                .add_segment(start, target, duration, parse_easing(easing));
        }
    }
}

// --- Sticker Node ---

enum StickerSource {
    Svg(Arc<Tree>),
    Raster(Image),
}

/// Decorative overlay above the glass layer. SVG sources rasterize lazily
/// per target size and the result is cached; raster sources draw directly.
pub struct StickerNode {
    source: Option<StickerSource>,
    cache: Mutex<Option<(u32, u32, Image)>>,
    pub opacity: Animated<f32>,
    pub style: Style,
}

impl StickerNode {
    /// Accepts either SVG or an encoded raster image; anything that parses
    /// as neither becomes an empty sticker.
    pub fn from_bytes(data: &[u8]) -> Self {
        let source = match Tree::from_data(data, &Options::default()) {
            Ok(tree) => Some(StickerSource::Svg(Arc::new(tree))),
            Err(_) => Image::from_encoded(Data::new_copy(data)).map(StickerSource::Raster),
        };
        Self {
            source,
            cache: Mutex::new(None),
            opacity: Animated::new(1.0),
            style: Style::default(),
        }
    }

    pub fn empty() -> Self {
        Self {
            source: None,
            cache: Mutex::new(None),
            opacity: Animated::new(1.0),
            style: Style::default(),
        }
    }

    pub fn has_content(&self) -> bool {
        self.source.is_some()
    }
}

impl Clone for StickerNode {
    fn clone(&self) -> Self {
        let source = match &self.source {
            Some(StickerSource::Svg(tree)) => Some(StickerSource::Svg(tree.clone())),
            Some(StickerSource::Raster(img)) => Some(StickerSource::Raster(img.clone())),
            None => None,
        };
        Self {
            source,
            cache: Mutex::new(None),
            opacity: self.opacity.clone(),
            style: self.style.clone(),
        }
    }
}

impl fmt::Debug for StickerNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StickerNode")
            .field("has_content", &self.source.is_some())
            .finish()
    }
}

impl Element for StickerNode {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn layout_style(&self) -> Style {
        self.style.clone()
    }

    fn set_layout_style(&mut self, style: Style) {
        self.style = style;
    }

    fn update(&mut self, time: f64) -> bool {
        self.opacity.update(time);
        true
    }

    fn render(&self, canvas: &Canvas, rect: Rect, parent_opacity: f32, draw_children: &mut dyn FnMut(&Canvas)) {
        let width = rect.width().ceil() as u32;
        let height = rect.height().ceil() as u32;

        if width == 0 || height == 0 {
            draw_children(canvas);
            return;
        }

        let op = self.opacity.current_value * parent_opacity;
        let mut paint = Paint::default();
        paint.set_anti_alias(true);
        paint.set_alpha_f(op);

        match &self.source {
            Some(StickerSource::Raster(img)) => {
                let sampling = skia_safe::SamplingOptions::new(
                    skia_safe::FilterMode::Linear,
                    skia_safe::MipmapMode::Linear,
                );
                canvas.draw_image_rect_with_sampling_options(img, None, rect, sampling, &paint);
            }
            Some(StickerSource::Svg(tree)) => {
                let mut cache_guard = self.cache.lock().unwrap();

                let needs_update = if let Some((w, h, _)) = *cache_guard {
                    w != width || h != height
                } else {
                    true
                };

                if needs_update {
                    let tree_size = tree.size();

                    // Aspect ratio: contain
                    let sx = width as f32 / tree_size.width();
                    let sy = height as f32 / tree_size.height();
                    let scale = sx.min(sy);

                    let tx = (width as f32 - tree_size.width() * scale) / 2.0;
                    let ty = (height as f32 - tree_size.height() * scale) / 2.0;
                    let transform =
                        tiny_skia::Transform::from_scale(scale, scale).post_translate(tx, ty);

                    if let Some(mut pixmap) = Pixmap::new(width, height) {
                        resvg::render(tree, transform, &mut pixmap.as_mut());

                        let data = Data::new_copy(pixmap.data());
                        let image_info = skia_safe::ImageInfo::new(
                            (width as i32, height as i32),
                            skia_safe::ColorType::RGBA8888,
                            skia_safe::AlphaType::Premul,
                            Some(skia_safe::ColorSpace::new_srgb()),
                        );

                        if let Some(img) =
                            skia_safe::images::raster_from_data(&image_info, data, (width * 4) as usize)
                        {
                            *cache_guard = Some((width, height, img));
                        }
                    }
                }

                if let Some((_, _, img)) = cache_guard.as_ref() {
                    canvas.draw_image_rect(img, None, rect, &paint);
                }
            }
            None => {}
        }

        draw_children(canvas);
    }

    fn animate_property(&mut self, property: &str, start: f32, target: f32, duration: f64, easing: &str) {
        if property == "opacity" {
            self.opacity
                .add_segment(start, target, duration, parse_easing(easing));
        }
    }
}
