//! Horizontal lists: binary demotion and inter-atom glue.

use crate::atom::{Atom, AtomType};
use crate::boxes::{HBox, HChild, MathBox};
use crate::environment::Environment;
use crate::glue;
use crate::types::ParseError;
use crate::MathContext;

/// Lay out a sequence of atoms as one horizontal list.
///
/// Binary operators with nothing to bind on one side are demoted to
/// ordinary atoms first, then glue from the spacing table is inserted
/// between each adjacent pair. Kern atoms contribute their width without
/// disturbing the spacing context around them.
pub fn build_row(
    ctx: &MathContext,
    env: &Environment<'_>,
    atoms: &[Atom],
) -> Result<MathBox, ParseError> {
    let types = effective_types(atoms);
    let mut children: Vec<HChild> = Vec::with_capacity(atoms.len());
    let mut previous: Option<AtomType> = None;
    let mut previous_char: Option<char> = None;
    for (atom, atom_type) in atoms.iter().zip(&types) {
        let mut spaced = false;
        if let (Some(left), Some(right)) = (previous, *atom_type) {
            let spacing = glue::between(left, right, env.style);
            if spacing != glue::Glue::NONE {
                children.push(HChild::plain(MathBox::Glue {
                    width: spacing.space_pt(env),
                    stretch: env.mu_to_pt(spacing.stretch),
                    shrink: env.mu_to_pt(spacing.shrink),
                }));
                spaced = true;
            }
        }
        let current_char = match atom {
            Atom::Symbol { character, .. } => Some(*character),
            _ => None,
        };
        if let (false, Some(left), Some(right)) = (spaced, previous_char, current_char) {
            let kern = env.backend().kern(left, right, env.font_style);
            if kern != 0.0 {
                children.push(HChild::plain(MathBox::Kern {
                    width: env.em_to_pt(kern),
                }));
            }
        }
        children.push(HChild::plain(super::create_box(ctx, env, atom)?));
        if atom_type.is_some() {
            previous = *atom_type;
            previous_char = current_char;
        }
    }
    Ok(MathBox::HBox(HBox::new(children)))
}

/// Spacing categories after binary demotion. Atoms without a category
/// (kerns, empty groups) yield `None` and stay transparent to spacing.
fn effective_types(atoms: &[Atom]) -> Vec<Option<AtomType>> {
    let mut types: Vec<Option<AtomType>> = atoms.iter().map(Atom::atom_type).collect();
    let mut last: Option<usize> = None;
    for i in 0..types.len() {
        let Some(current) = types[i] else { continue };
        let before = last.and_then(|j| types[j]);
        // A binary with no left operand reads as ordinary.
        if current == AtomType::Bin && !binds_on_left(before) {
            types[i] = Some(AtomType::Ord);
        }
        // A binary cannot precede a relation, closer, or punctuation.
        if matches!(
            current,
            AtomType::Rel | AtomType::Close | AtomType::Punct
        ) {
            if let Some(j) = last {
                if types[j] == Some(AtomType::Bin) {
                    types[j] = Some(AtomType::Ord);
                }
            }
        }
        last = Some(i);
    }
    types
}

fn binds_on_left(before: Option<AtomType>) -> bool {
    matches!(
        before,
        Some(AtomType::Ord) | Some(AtomType::Close) | Some(AtomType::Inner)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Atom;

    fn symbol(character: char, atom_type: AtomType) -> Atom {
        Atom::Symbol {
            character,
            atom_type,
        }
    }

    #[test]
    fn leading_binary_is_demoted() {
        let atoms = [
            symbol('\u{2212}', AtomType::Bin),
            symbol('x', AtomType::Ord),
        ];
        let types = effective_types(&atoms);
        assert_eq!(types[0], Some(AtomType::Ord));
        assert_eq!(types[1], Some(AtomType::Ord));
    }

    #[test]
    fn binary_between_ordinaries_survives() {
        let atoms = [
            symbol('a', AtomType::Ord),
            symbol('+', AtomType::Bin),
            symbol('b', AtomType::Ord),
        ];
        let types = effective_types(&atoms);
        assert_eq!(types[1], Some(AtomType::Bin));
    }

    #[test]
    fn binary_before_relation_is_demoted() {
        let atoms = [
            symbol('a', AtomType::Ord),
            symbol('+', AtomType::Bin),
            symbol('=', AtomType::Rel),
        ];
        let types = effective_types(&atoms);
        assert_eq!(types[1], Some(AtomType::Ord));
    }

    #[test]
    fn binary_after_operator_is_demoted() {
        let atoms = [
            symbol('\u{2211}', AtomType::Op),
            symbol('+', AtomType::Bin),
            symbol('b', AtomType::Ord),
        ];
        let types = effective_types(&atoms);
        assert_eq!(types[1], Some(AtomType::Ord));
    }

    #[test]
    fn kern_is_transparent_to_demotion() {
        let atoms = [
            symbol('a', AtomType::Ord),
            Atom::Kern(crate::units::Dimension::ZERO),
            symbol('+', AtomType::Bin),
            symbol('b', AtomType::Ord),
        ];
        let types = effective_types(&atoms);
        assert_eq!(types[1], None);
        assert_eq!(types[2], Some(AtomType::Bin));
    }
}
