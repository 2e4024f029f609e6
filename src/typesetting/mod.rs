pub mod environment;
pub mod font;
pub mod glue;
pub mod math_box;
pub mod splitter;

pub use self::environment::Environment;
pub use self::font::{FontContext, FontId, NO_FONT};
pub use self::math_box::{BoxContent, HorizontalBox, MathBox, VerticalBox};
pub use self::splitter::{split, split_for, SplitResult};

use crate::types::AtomType;

/// Assembles already-built atom boxes into a horizontal list, inserting the
/// inter-atom glue the spacing rules call for and marking each glue gap as
/// a legal line-break position.
///
/// Binary operators that cannot act as such (at the start of the list, or
/// next to an operator, relation, opening delimiter or punctuation) are
/// treated as ordinary symbols, following the classic reclassification
/// rule.
pub fn make_row(items: Vec<(AtomType, MathBox)>, env: &Environment) -> MathBox {
    let types: Vec<AtomType> = items.iter().map(|(atom_type, _)| *atom_type).collect();
    let mut hbox = HorizontalBox::new();
    let mut prev: Option<AtomType> = None;
    for (i, (atom_type, item)) in items.into_iter().enumerate() {
        let next = types.get(i + 1).copied();
        let effective = effective_type(prev, atom_type, next);
        if let Some(left) = prev {
            let space = glue::get(left, effective, env);
            if space.width != 0.0 {
                hbox.push_breakable(space);
            }
        }
        hbox.push(item);
        prev = Some(effective);
    }
    hbox.into_box()
}

// A binary operator needs something to operate on to both sides; anywhere
// else it is spaced like an ordinary symbol.
fn effective_type(prev: Option<AtomType>, current: AtomType, next: Option<AtomType>) -> AtomType {
    use crate::types::AtomType::*;
    if current != BinaryOperator {
        return current;
    }
    match prev {
        Option::None | Some(BigOperator) | Some(BinaryOperator) | Some(Relation)
        | Some(Opening) | Some(Punctuation) => return Ordinary,
        _ => {}
    }
    match next {
        Some(Relation) | Some(Closing) | Some(Punctuation) => Ordinary,
        _ => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AtomType::*;

    #[test]
    fn binary_operators_degrade_to_ordinary() {
        assert_eq!(
            effective_type(Option::None, BinaryOperator, Some(Ordinary)),
            Ordinary
        );
        assert_eq!(
            effective_type(Some(Opening), BinaryOperator, Some(Ordinary)),
            Ordinary
        );
        assert_eq!(
            effective_type(Some(Ordinary), BinaryOperator, Some(Closing)),
            Ordinary
        );
        assert_eq!(
            effective_type(Some(Ordinary), BinaryOperator, Some(Ordinary)),
            BinaryOperator
        );
        assert_eq!(
            effective_type(Some(Relation), Relation, Option::None),
            Relation
        );
    }
}
