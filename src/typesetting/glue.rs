//! The inter-atom spacing rules.
//!
//! Spacing between two adjacent atoms depends on their types and on the
//! current style; explicit skip commands go straight to a named rule. Rules
//! are expressed in mu (1/18 of the font size) so spacing follows the font
//! and shrinks with the style the way the glyphs do.

use std::sync::{Arc, RwLock};

use log::debug;
use once_cell::sync::Lazy;

use super::environment::Environment;
use super::math_box::MathBox;
use crate::types::{AtomType, SpaceType};

const TYPE_COUNT: usize = 8;
const STYLE_COUNT: usize = 4;

/// One named spacing rule: nominal space plus stretch and shrink, in mu.
#[derive(Debug, Clone, PartialEq)]
pub struct GlueSpec {
    space: f32,
    stretch: f32,
    shrink: f32,
    name: String,
}

impl GlueSpec {
    pub fn new<S: Into<String>>(space: f32, stretch: f32, shrink: f32, name: S) -> GlueSpec {
        GlueSpec {
            space,
            stretch,
            shrink,
            name: name.into(),
        }
    }

    pub fn space(&self) -> f32 {
        self.space
    }

    pub fn stretch(&self) -> f32 {
        self.stretch
    }

    pub fn shrink(&self) -> f32 {
        self.shrink
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // A zero-height spacing box of this rule's size in the environment.
    fn create_box(&self, env: &Environment) -> MathBox {
        let mu = mu_size(env);
        MathBox::glue(self.space * mu, self.stretch * mu, self.shrink * mu)
    }
}

/// The process-wide spacing configuration: the named rules and the table
/// selecting a rule per (left type, right type, spacing class).
#[derive(Debug, Clone)]
pub struct GlueSettings {
    specs: Vec<GlueSpec>,
    table: [[[u8; STYLE_COUNT]; TYPE_COUNT]; TYPE_COUNT],
}

// Cell values index into `specs`; the four entries per cell are the spacing
// classes display, text, script and script-script. Script classes drop the
// spaces that only appear in large styles.
const NONE: [u8; STYLE_COUNT] = [0, 0, 0, 0];
const THIN: [u8; STYLE_COUNT] = [1, 1, 1, 1];
const THIN_LARGE: [u8; STYLE_COUNT] = [1, 1, 0, 0];
const MED_LARGE: [u8; STYLE_COUNT] = [2, 2, 0, 0];
const THICK_LARGE: [u8; STYLE_COUNT] = [3, 3, 0, 0];

// The classic inter-atom spacing chart. Rows are the left type, columns the
// right type, in the order Ord, Op, Bin, Rel, Open, Close, Punct, Inner.
// Note the asymmetries: Op before Bin is impossible and gets nothing, Bin
// before Op gets a med skip; Close before Punct gets nothing while Punct
// before Close gets a thin skip.
#[rustfmt::skip]
const RULES: [[[u8; STYLE_COUNT]; TYPE_COUNT]; TYPE_COUNT] = [
    [NONE,        THIN,        MED_LARGE, THICK_LARGE, NONE,        NONE,       NONE,       THIN_LARGE], // Ord
    [THIN,        THIN,        NONE,      THICK_LARGE, NONE,        NONE,       NONE,       THIN_LARGE], // Op
    [MED_LARGE,   MED_LARGE,   NONE,      NONE,        MED_LARGE,   NONE,       NONE,       MED_LARGE],  // Bin
    [THICK_LARGE, THICK_LARGE, NONE,      NONE,        THICK_LARGE, NONE,       NONE,       THICK_LARGE],// Rel
    [NONE,        NONE,        NONE,      NONE,        NONE,        NONE,       NONE,       NONE],       // Open
    [NONE,        THIN,        MED_LARGE, THICK_LARGE, NONE,        NONE,       NONE,       THIN_LARGE], // Close
    [THIN_LARGE,  THIN_LARGE,  NONE,      THIN_LARGE,  THIN_LARGE,  THIN_LARGE, THIN_LARGE, THIN_LARGE], // Punct
    [THIN_LARGE,  THIN,        MED_LARGE, THICK_LARGE, THIN_LARGE,  NONE,       THIN_LARGE, THIN_LARGE], // Inner
];

static NO_SPACE: Lazy<GlueSpec> = Lazy::new(|| GlueSpec::new(0.0, 0.0, 0.0, "none"));

impl GlueSettings {
    /// The built-in rules: the plain-TeX thin, med and thick mu-skips and
    /// the classic inter-atom table.
    pub fn builtin() -> GlueSettings {
        GlueSettings {
            specs: vec![
                GlueSpec::new(0.0, 0.0, 0.0, "none"),
                GlueSpec::new(3.0, 0.0, 0.0, "thin"),
                GlueSpec::new(4.0, 2.0, 4.0, "med"),
                GlueSpec::new(5.0, 5.0, 0.0, "thick"),
            ],
            table: RULES,
        }
    }

    /// Custom rules, e.g. loaded from a settings file. Table cells that
    /// index past `specs` fall back to no space.
    pub fn new(
        specs: Vec<GlueSpec>,
        table: [[[u8; STYLE_COUNT]; TYPE_COUNT]; TYPE_COUNT],
    ) -> GlueSettings {
        GlueSettings { specs, table }
    }

    /// Looks a rule up by name, falling back to the all-zero rule for
    /// unknown names.
    pub fn named(&self, name: &str) -> &GlueSpec {
        self.specs
            .iter()
            .find(|spec| spec.name == name)
            .unwrap_or(&NO_SPACE)
    }

    // The rule for an adjacent pair in the given spacing class. Pairs
    // outside the table produce no space.
    fn pair(&self, left: AtomType, right: AtomType, class: usize) -> &GlueSpec {
        let (l, r) = match (left.spacing_index(), right.spacing_index()) {
            (Some(l), Some(r)) => (l, r),
            _ => return &NO_SPACE,
        };
        let index = usize::from(self.table[l][r][class]);
        self.specs.get(index).unwrap_or(&NO_SPACE)
    }
}

static SETTINGS: Lazy<RwLock<Arc<GlueSettings>>> =
    Lazy::new(|| RwLock::new(Arc::new(GlueSettings::builtin())));

/// A snapshot of the current spacing configuration.
pub fn settings() -> Arc<GlueSettings> {
    SETTINGS
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

/// Replaces the process-wide spacing configuration. The swap is atomic:
/// concurrent readers see either the old table or the new one, never a
/// partially rebuilt state, and the old table is dropped once its last
/// snapshot goes away.
pub fn reload(new: GlueSettings) {
    debug!("replacing glue settings ({} rules)", new.specs.len());
    *SETTINGS
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner()) = Arc::new(new);
}

// Style-dependent spacing scale: full size in display and text, reduced in
// the script styles to follow the glyph sizes.
fn factor(env: &Environment) -> f32 {
    let style_scale = match env.style().spacing_class() {
        0 | 1 => 1.0,
        2 => 0.7,
        _ => 0.5,
    };
    style_scale * env.scale_factor()
}

// The size of one mu in points for the environment.
fn mu_size(env: &Environment) -> f32 {
    env.size() / 18.0 * factor(env)
}

/// The spacing box to insert between two adjacent atoms, possibly of zero
/// width. Unknown pairings never fail; they produce no space.
pub fn get(left: AtomType, right: AtomType, env: &Environment) -> MathBox {
    settings()
        .pair(left, right, env.style().spacing_class())
        .create_box(env)
}

/// The spacing box for an explicit skip command. Negative skip types
/// negate the width.
pub fn get_skip(skip: SpaceType, env: &Environment) -> MathBox {
    let mut glue = settings().named(skip.rule_name()).create_box(env);
    if skip.is_negative() {
        glue.width = -glue.width;
    }
    glue
}

/// The nominal space between two adjacent atoms, in points.
pub fn space(left: AtomType, right: AtomType, env: &Environment) -> f32 {
    settings()
        .pair(left, right, env.style().spacing_class())
        .space()
        * mu_size(env)
}

/// The nominal space of an explicit skip command, in points.
pub fn skip_space(skip: SpaceType, env: &Environment) -> f32 {
    let space = settings().named(skip.rule_name()).space() * mu_size(env);
    if skip.is_negative() {
        -space
    } else {
        space
    }
}
