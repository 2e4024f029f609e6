use std::rc::Rc;

use tex_layout::{Environment, FontContext, FontId, MathBox, MathStyle};

/// Fixed, easily checked metrics standing in for a real math font.
pub struct TestFont {
    pub size: f32,
    pub scale: f32,
}

impl TestFont {
    pub fn with_size(size: f32) -> TestFont {
        TestFont { size, scale: 1.0 }
    }
}

impl Default for TestFont {
    fn default() -> TestFont {
        TestFont::with_size(10.0)
    }
}

// Glyphs shrink to 70% in script and 50% in script-script sizes, as a
// typical math font sets them up.
fn class_scale(style: MathStyle) -> f32 {
    match style.spacing_class() {
        0 | 1 => 1.0,
        2 => 0.7,
        _ => 0.5,
    }
}

impl FontContext for TestFont {
    fn size(&self) -> f32 {
        self.size
    }

    fn space(&self, style: MathStyle) -> f32 {
        self.size / 3.0 * class_scale(style)
    }

    fn scale_factor(&self) -> f32 {
        self.scale
    }

    fn math_font(&self) -> FontId {
        2
    }

    fn quad(&self, style: MathStyle, _font: FontId) -> f32 {
        self.size * class_scale(style)
    }

    fn x_height(&self, style: MathStyle, _font: FontId) -> f32 {
        0.43 * self.size * class_scale(style)
    }
}

pub fn display_env() -> Environment {
    Environment::new(MathStyle::Display, Rc::new(TestFont::default()))
}

#[allow(dead_code)]
pub fn env_with(style: MathStyle, size: f32) -> Environment {
    Environment::new(style, Rc::new(TestFont::with_size(size)))
}

#[allow(dead_code)]
pub fn sym(width: f32) -> MathBox {
    MathBox::glyph(width, 7.0, 2.0, 1, 88)
}
