use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use once_cell::unsync::OnceCell;

use super::font::{FontContext, FontId, NO_FONT};
use crate::types::{Length, MathStyle, Unit};

/// The style/font/width context at one point of a formula.
///
/// An `Environment` is immutable from the caller's point of view: the style
/// transition methods (`cramp_style`, `num_style`, …) return a shared
/// environment for the sub-formula position instead of mutating `self`, and
/// repeated calls return the identical cached instance. Use [`copy`] to
/// obtain an independent environment whose settings can be changed without
/// disturbing ancestors.
///
/// [`copy`]: Environment::copy
pub struct Environment {
    style: MathStyle,
    font: Rc<dyn FontContext>,
    // last font used while assembling boxes; glue and kerning need a
    // concrete font even between two spacing-only atoms
    last_font_id: Cell<FontId>,
    text_width: f32,
    text_style: Option<String>,
    small_caps: bool,
    scale_factor: f32,
    interline: Length,

    derived: DerivedCache,
}

/// Lazily populated sub-environments, one slot per transition kind. The
/// parent is the sole owner; callers only ever see shared references.
#[derive(Default)]
struct DerivedCache {
    cramp: OnceCell<Rc<Environment>>,
    num: OnceCell<Rc<Environment>>,
    dnom: OnceCell<Rc<Environment>>,
    sub: OnceCell<Rc<Environment>>,
    sup: OnceCell<Rc<Environment>>,
    root: OnceCell<Rc<Environment>>,
}

impl Environment {
    /// Creates a root environment with no width bound (no line wrapping)
    /// and an interline space of one x-height.
    pub fn new(style: MathStyle, font: Rc<dyn FontContext>) -> Environment {
        Environment {
            style,
            font,
            last_font_id: Cell::new(NO_FONT),
            text_width: f32::INFINITY,
            text_style: None,
            small_caps: false,
            scale_factor: 1.0,
            interline: Length::new(1.0, Unit::Ex),
            derived: DerivedCache::default(),
        }
    }

    /// Creates a root environment bounded to the given text width.
    pub fn with_text_width(
        style: MathStyle,
        font: Rc<dyn FontContext>,
        width: Length,
    ) -> Environment {
        let mut env = Environment::new(style, font);
        env.text_width = width.to_points(&env);
        env
    }

    // Sub-formula positions start from a fresh context: the style changes,
    // font and text settings carry over, the width bound does not (wrapping
    // only ever happens at the outermost level).
    fn derive(&self, style: MathStyle) -> Environment {
        let mut env = Environment::new(style, Rc::clone(&self.font));
        env.text_style = self.text_style.clone();
        env.small_caps = self.small_caps;
        env.scale_factor = self.scale_factor;
        env
    }

    /// This environment with the cramped bit forced on.
    pub fn cramp_style(&self) -> Rc<Environment> {
        let cached = self
            .derived
            .cramp
            .get_or_init(|| Rc::new(self.derive(self.style.cramped())));
        Rc::clone(cached)
    }

    /// The environment for the numerator of a fraction.
    pub fn num_style(&self) -> Rc<Environment> {
        let cached = self
            .derived
            .num
            .get_or_init(|| Rc::new(self.derive(self.style.numerator())));
        Rc::clone(cached)
    }

    /// The environment for the denominator of a fraction, always cramped.
    pub fn dnom_style(&self) -> Rc<Environment> {
        let cached = self
            .derived
            .dnom
            .get_or_init(|| Rc::new(self.derive(self.style.denominator())));
        Rc::clone(cached)
    }

    /// The environment for a subscript, always cramped.
    pub fn sub_style(&self) -> Rc<Environment> {
        let cached = self
            .derived
            .sub
            .get_or_init(|| Rc::new(self.derive(self.style.subscript())));
        Rc::clone(cached)
    }

    /// The environment for a superscript.
    pub fn sup_style(&self) -> Rc<Environment> {
        let cached = self
            .derived
            .sup
            .get_or_init(|| Rc::new(self.derive(self.style.superscript())));
        Rc::clone(cached)
    }

    /// The environment for the index of a radical.
    pub fn root_style(&self) -> Rc<Environment> {
        let cached = self
            .derived
            .root
            .get_or_init(|| Rc::new(self.derive(self.style.root())));
        Rc::clone(cached)
    }

    /// An independent environment with identical settings. Changes made to
    /// the copy are not visible to `self` or to any cached derivation.
    pub fn copy(&self) -> Environment {
        Environment {
            style: self.style,
            font: Rc::clone(&self.font),
            last_font_id: Cell::new(self.last_font_id.get()),
            text_width: self.text_width,
            text_style: self.text_style.clone(),
            small_caps: self.small_caps,
            scale_factor: self.scale_factor,
            interline: self.interline,
            derived: DerivedCache::default(),
        }
    }

    /// Like [`copy`](Environment::copy), swapping in another font context.
    pub fn copy_with_font(&self, font: Rc<dyn FontContext>) -> Environment {
        let mut env = self.copy();
        env.font = font;
        env
    }

    pub fn style(&self) -> MathStyle {
        self.style
    }

    pub fn set_style(&mut self, style: MathStyle) {
        self.style = style;
        self.derived = DerivedCache::default();
    }

    /// The absolute font size in points, including the provider's scale.
    pub fn size(&self) -> f32 {
        self.font.size() * self.font.scale_factor()
    }

    /// The inter-word space for the current style, pre-scaled by this
    /// environment's scale factor.
    pub fn space(&self) -> f32 {
        self.font.space(self.style) * self.scale_factor
    }

    /// The maximum line width in points; `f32::INFINITY` means no wrapping.
    pub fn text_width(&self) -> f32 {
        self.text_width
    }

    pub fn set_text_width(&mut self, width: Length) {
        self.text_width = width.to_points(self);
    }

    /// The space between split lines, in points.
    pub fn interline(&self) -> f32 {
        self.interline.to_points(self)
    }

    pub fn set_interline(&mut self, interline: Length) {
        self.interline = interline;
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    pub fn set_scale_factor(&mut self, factor: f32) {
        self.scale_factor = factor;
    }

    pub fn text_style(&self) -> Option<&str> {
        self.text_style.as_deref()
    }

    pub fn set_text_style(&mut self, style: Option<String>) {
        self.text_style = style;
    }

    pub fn small_caps(&self) -> bool {
        self.small_caps
    }

    pub fn set_small_caps(&mut self, small_caps: bool) {
        self.small_caps = small_caps;
    }

    pub fn font(&self) -> &Rc<dyn FontContext> {
        &self.font
    }

    /// Records the font a box was just built with.
    pub fn set_last_font_id(&self, id: FontId) {
        self.last_font_id.set(id);
    }

    /// The font of the most recently built box, falling back to the math
    /// italic font when nothing has been built yet.
    pub fn last_font_id(&self) -> FontId {
        let id = self.last_font_id.get();
        if id == NO_FONT {
            self.font.math_font()
        } else {
            id
        }
    }

    /// The quad width for the current style and last used font.
    pub fn quad(&self) -> f32 {
        self.font.quad(self.style, self.last_font_id())
    }

    /// The x-height for the current style and last used font.
    pub fn x_height(&self) -> f32 {
        self.font.x_height(self.style, self.last_font_id())
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Environment")
            .field("style", &self.style)
            .field("text_width", &self.text_width)
            .field("scale_factor", &self.scale_factor)
            .field("small_caps", &self.small_caps)
            .finish()
    }
}
