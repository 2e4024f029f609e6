use std::str::FromStr;

use thiserror::Error;

use crate::typesetting::Environment;

/// The TeX typesetting style governing the size and spacing of a formula
/// position.
///
/// Styles are ordered by rank: `Display` is the largest, and every odd rank
/// is the cramped variant of the even rank just above it. Cramped styles
/// suppress the extra vertical allowances used e.g. for superscripts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum MathStyle {
    Display = 0,
    DisplayCramped = 1,
    Text = 2,
    TextCramped = 3,
    Script = 4,
    ScriptCramped = 5,
    ScriptScript = 6,
    ScriptScriptCramped = 7,
}

impl MathStyle {
    /// The numeric rank of the style. Larger ranks are typeset tighter.
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Returns true if the style is cramped.
    pub fn is_cramped(self) -> bool {
        self.rank() % 2 == 1
    }

    /// The same style with the cramped bit forced on. Cramped styles map to
    /// themselves.
    pub fn cramped(self) -> MathStyle {
        use self::MathStyle::*;
        match self {
            Display | DisplayCramped => DisplayCramped,
            Text | TextCramped => TextCramped,
            Script | ScriptCramped => ScriptCramped,
            ScriptScript | ScriptScriptCramped => ScriptScriptCramped,
        }
    }

    /// The style used to lay out the numerator of a fraction. Cramped-ness
    /// is preserved; script-script styles stay where they are.
    pub fn numerator(self) -> MathStyle {
        use self::MathStyle::*;
        match self {
            Display => Text,
            DisplayCramped => TextCramped,
            Text => Script,
            TextCramped => ScriptCramped,
            Script | ScriptScript => ScriptScript,
            ScriptCramped | ScriptScriptCramped => ScriptScriptCramped,
        }
    }

    /// The style used to lay out the denominator of a fraction.
    /// Denominators are always typeset cramped.
    pub fn denominator(self) -> MathStyle {
        self.numerator().cramped()
    }

    /// The style used to lay out a superscript.
    pub fn superscript(self) -> MathStyle {
        use self::MathStyle::*;
        match self {
            Display | Text => Script,
            DisplayCramped | TextCramped => ScriptCramped,
            Script | ScriptScript => ScriptScript,
            ScriptCramped | ScriptScriptCramped => ScriptScriptCramped,
        }
    }

    /// The style used to lay out a subscript. Subscripts are always cramped.
    pub fn subscript(self) -> MathStyle {
        self.superscript().cramped()
    }

    /// The style used to lay out the index of a radical.
    pub fn root(self) -> MathStyle {
        MathStyle::ScriptScript
    }

    /// The spacing class of the style: 0 display, 1 text, 2 script,
    /// 3 script-script. Cramped variants share the class of their base
    /// style.
    pub fn spacing_class(self) -> usize {
        usize::from(self.rank() / 2)
    }
}

/// Classification of a formula atom for inter-atom spacing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AtomType {
    /// An ordinary symbol, like a variable or a digit.
    Ordinary,
    /// A large operator, like a sum or an integral sign.
    BigOperator,
    /// A binary operator, like a plus sign.
    BinaryOperator,
    /// A relation, like an equals sign.
    Relation,
    /// An opening delimiter.
    Opening,
    /// A closing delimiter.
    Closing,
    /// A punctuation symbol, like a comma.
    Punctuation,
    /// A subformula treated as a single unit, like a fraction.
    Inner,
    /// A pseudo-type for boxes that never take part in spacing decisions.
    None,
}

impl AtomType {
    /// The row/column of the type in the spacing rule table, or `None` for
    /// pseudo-types outside the table.
    pub(crate) fn spacing_index(self) -> Option<usize> {
        use self::AtomType::*;
        match self {
            Ordinary => Some(0),
            BigOperator => Some(1),
            BinaryOperator => Some(2),
            Relation => Some(3),
            Opening => Some(4),
            Closing => Some(5),
            Punctuation => Some(6),
            Inner => Some(7),
            None => Option::None,
        }
    }
}

/// A named explicit spacing command.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SpaceType {
    /// No space at all.
    None,
    /// The space of `\,`.
    ThinMuSkip,
    /// The space of `\:`.
    MedMuSkip,
    /// The space of `\;`.
    ThickMuSkip,
    /// The space of `\!`.
    NegThinMuSkip,
    NegMedMuSkip,
    NegThickMuSkip,
}

impl SpaceType {
    /// Returns true for the negated skip variants.
    pub fn is_negative(self) -> bool {
        use self::SpaceType::*;
        matches!(self, NegThinMuSkip | NegMedMuSkip | NegThickMuSkip)
    }

    /// The name of the glue rule backing this skip.
    pub fn rule_name(self) -> &'static str {
        use self::SpaceType::*;
        match self {
            None => "none",
            ThinMuSkip | NegThinMuSkip => "thin",
            MedMuSkip | NegMedMuSkip => "med",
            ThickMuSkip | NegThickMuSkip => "thick",
        }
    }
}

/// A length unit understood by the layout core.
///
/// `Em`, `Ex` and `Mu` are font-relative and resolve through the current
/// environment; the remaining units are absolute.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Unit {
    /// The quad width of the current font.
    Em,
    /// The x-height of the current font.
    Ex,
    /// The math unit, 1/18 of a quad.
    Mu,
    /// The printer's point.
    Pt,
    /// The big (PostScript) point, 1/72 of an inch.
    Bp,
    /// The pica, 12 points.
    Pc,
    /// The inch, 72.27 points.
    In,
    Cm,
    Mm,
    /// The didot point.
    Dd,
    /// The cicero, 12 didot points.
    Cc,
    /// The scaled point, 1/65536 of a point.
    Sp,
}

/// Error returned when a unit tag is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown unit '{0}'")]
pub struct UnknownUnit(pub String);

impl FromStr for Unit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Unit, UnknownUnit> {
        match s {
            "em" => Ok(Unit::Em),
            "ex" => Ok(Unit::Ex),
            "mu" => Ok(Unit::Mu),
            "pt" => Ok(Unit::Pt),
            "bp" => Ok(Unit::Bp),
            "pc" | "pica" => Ok(Unit::Pc),
            "in" => Ok(Unit::In),
            "cm" => Ok(Unit::Cm),
            "mm" => Ok(Unit::Mm),
            "dd" => Ok(Unit::Dd),
            "cc" => Ok(Unit::Cc),
            "sp" => Ok(Unit::Sp),
            _ => Err(UnknownUnit(s.to_owned())),
        }
    }
}

impl Unit {
    /// The size of one of this unit in points. Font-relative units are
    /// resolved for the environment's current style and last used font.
    pub fn points(self, env: &Environment) -> f32 {
        match self {
            Unit::Em => env.quad(),
            Unit::Ex => env.x_height(),
            Unit::Mu => env.quad() / 18.0,
            Unit::Pt => 1.0,
            Unit::Bp => 72.27 / 72.0,
            Unit::Pc => 12.0,
            Unit::In => 72.27,
            Unit::Cm => 72.27 / 2.54,
            Unit::Mm => 72.27 / 25.4,
            Unit::Dd => 1238.0 / 1157.0,
            Unit::Cc => 12.0 * 1238.0 / 1157.0,
            Unit::Sp => 1.0 / 65536.0,
        }
    }
}

/// A value paired with its unit.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Length {
    pub value: f32,
    pub unit: Unit,
}

impl Length {
    pub fn new(value: f32, unit: Unit) -> Length {
        Length { value, unit }
    }

    pub fn zero() -> Length {
        Length::new(0.0, Unit::Pt)
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0.0
    }

    /// Converts the length to points in the given environment.
    pub fn to_points(&self, env: &Environment) -> f32 {
        self.value * self.unit.points(env)
    }
}

#[cfg(test)]
mod tests {
    use super::MathStyle::*;
    use super::*;

    #[test]
    fn fraction_styles() {
        assert_eq!(Display.numerator(), Text);
        assert_eq!(Display.denominator(), TextCramped);
        assert_eq!(Text.numerator(), Script);
        assert_eq!(ScriptScript.numerator(), ScriptScript);
        assert_eq!(ScriptScriptCramped.denominator(), ScriptScriptCramped);
        assert!(Display.denominator().is_cramped());
    }

    #[test]
    fn script_styles() {
        assert_eq!(Display.superscript(), Script);
        assert_eq!(DisplayCramped.superscript(), ScriptCramped);
        assert_eq!(Text.subscript(), ScriptCramped);
        assert_eq!(Script.superscript(), ScriptScript);
        assert_eq!(ScriptCramped.subscript(), ScriptScriptCramped);
        assert_eq!(TextCramped.root(), ScriptScript);
    }

    #[test]
    fn cramping_is_idempotent() {
        for &style in &[Display, Text, Script, ScriptScript] {
            let cramped = style.cramped();
            assert!(cramped.is_cramped());
            assert_eq!(cramped.cramped(), cramped);
            assert_eq!(cramped.spacing_class(), style.spacing_class());
        }
    }

    #[test]
    fn unit_parsing() {
        assert_eq!("pt".parse::<Unit>(), Ok(Unit::Pt));
        assert_eq!("mu".parse::<Unit>(), Ok(Unit::Mu));
        assert_eq!("pica".parse::<Unit>(), Ok(Unit::Pc));
        assert_eq!(
            "furlong".parse::<Unit>(),
            Err(UnknownUnit("furlong".into()))
        );
    }
}
