use skia_safe::{gradient_shader, Canvas, Color4f, Point, Rect, Shader, TileMode};
use std::any::Any;
use taffy::style::Style;

/// A visual element in the scene graph.
pub trait Element: std::fmt::Debug {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    // 1. Layout Phase: Return CSS-like style for Taffy
    fn layout_style(&self) -> Style;
    fn set_layout_style(&mut self, style: Style);

    // 2. Update Phase: Advance animations to 'time'
    // Returns true if the element needs a redraw
    fn update(&mut self, time: f64) -> bool;

    // 3. Render Phase: Draw to Skia canvas
    // 'rect' is the local rect provided by Taffy calculations; children are
    // drawn via the continuation so elements can clip or layer around them.
    fn render(&self, canvas: &Canvas, rect: Rect, opacity: f32, draw_children: &mut dyn FnMut(&Canvas));

    // 4. Animation Interface
    fn animate_property(&mut self, _property: &str, _start: f32, _target: f32, _duration: f64, _easing: &str) {}
}

/// Normalized RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const TRANSPARENT: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// 8-bit channel constructor, handy for design-tool hex values.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    pub fn with_alpha(mut self, a: f32) -> Self {
        self.a = a;
        self
    }

    pub fn to_color4f(self) -> Color4f {
        Color4f::new(self.r, self.g, self.b, self.a)
    }

    pub fn to_skia(self) -> skia_safe::Color {
        skia_safe::Color::from_argb(
            (self.a.clamp(0.0, 1.0) * 255.0) as u8,
            (self.r.clamp(0.0, 1.0) * 255.0) as u8,
            (self.g.clamp(0.0, 1.0) * 255.0) as u8,
            (self.b.clamp(0.0, 1.0) * 255.0) as u8,
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::TRANSPARENT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientStop {
    pub color: Color,
    pub position: f32,
}

/// A linear gradient with endpoints in the unit square of the target rect.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LinearGradient {
    pub stops: Vec<GradientStop>,
    pub start: (f32, f32),
    pub end: (f32, f32),
}

impl LinearGradient {
    /// Top edge to bottom edge.
    pub fn vertical(colors: &[Color]) -> Self {
        Self::along((0.5, 0.0), (0.5, 1.0), colors)
    }

    /// Top-leading corner to bottom-trailing corner.
    pub fn diagonal(colors: &[Color]) -> Self {
        Self::along((0.0, 0.0), (1.0, 1.0), colors)
    }

    pub fn along(start: (f32, f32), end: (f32, f32), colors: &[Color]) -> Self {
        let n = colors.len().max(2);
        let stops = colors
            .iter()
            .enumerate()
            .map(|(i, c)| GradientStop {
                color: *c,
                position: i as f32 / (n - 1) as f32,
            })
            .collect();
        Self { stops, start, end }
    }

    pub fn with_stops(start: (f32, f32), end: (f32, f32), stops: Vec<GradientStop>) -> Self {
        Self { stops, start, end }
    }

    /// Builds a Skia shader spanning `rect`, with all alphas scaled by
    /// `opacity`.
    pub fn to_shader(&self, rect: Rect, opacity: f32) -> Option<Shader> {
        let p0 = Point::new(
            rect.left + self.start.0 * rect.width(),
            rect.top + self.start.1 * rect.height(),
        );
        let p1 = Point::new(
            rect.left + self.end.0 * rect.width(),
            rect.top + self.end.1 * rect.height(),
        );
        let colors: Vec<skia_safe::Color> = self
            .stops
            .iter()
            .map(|s| s.color.with_alpha(s.color.a * opacity).to_skia())
            .collect();
        let positions: Vec<f32> = self.stops.iter().map(|s| s.position).collect();

        gradient_shader::linear(
            (p0, p1),
            colors.as_slice(),
            Some(positions.as_slice()),
            TileMode::Clamp,
            None,
            None,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb8_maps_hex_channels() {
        let c = Color::rgb8(0x48, 0x43, 0x4E);
        assert!((c.r - 72.0 / 255.0).abs() < 1e-6);
        assert!((c.g - 67.0 / 255.0).abs() < 1e-6);
        assert!((c.b - 78.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn gradient_positions_span_unit_interval() {
        let g = LinearGradient::vertical(&[Color::WHITE, Color::BLACK, Color::TRANSPARENT]);
        assert_eq!(g.stops.len(), 3);
        assert_eq!(g.stops[0].position, 0.0);
        assert_eq!(g.stops[2].position, 1.0);
        assert!((g.stops[1].position - 0.5).abs() < 1e-6);
    }
}
