use crate::types::MathStyle;

/// Identifier of a font face inside the metrics provider.
pub type FontId = i32;

/// Sentinel meaning that no font has been selected yet.
pub const NO_FONT: FontId = -1;

/// The font metrics the layout core consumes.
///
/// Implemented by the embedding application on top of its font loader; the
/// core never inspects glyph outlines, only these few numbers. All values
/// are in points.
pub trait FontContext {
    /// The design size of the font.
    fn size(&self) -> f32;

    /// The inter-word space for the given style.
    fn space(&self, style: MathStyle) -> f32;

    /// The scale the provider applies on top of the design size.
    fn scale_factor(&self) -> f32;

    /// The math-italic font used when no other font has been selected.
    fn math_font(&self) -> FontId;

    /// The width of an em quad of `font` for the given style.
    fn quad(&self, style: MathStyle, font: FontId) -> f32;

    /// The height of a lowercase x of `font` for the given style.
    fn x_height(&self, style: MathStyle, font: FontId) -> f32;
}
