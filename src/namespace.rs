//! Scoped name table with TeX grouping semantics.
//!
//! Used for the per-session macro registry: `{` opens a group, `}` closes it
//! and restores every name the group changed. Deletions record `None` on the
//! undo stack so they revert too.

use crate::types::{ParseError, ParseErrorKind};

/// Hash map used for name lookup throughout the crate.
pub type KeyMap<K, V> = rapidhash::RapidHashMap<K, V>;

/// A string-keyed [`KeyMap`].
pub type Mapping<V> = KeyMap<String, V>;

/// A two-layer table: immutable builtins underneath session-scoped values.
#[derive(Debug, Clone)]
pub struct Namespace<V: Clone> {
    current: Mapping<V>,
    builtins: Mapping<V>,
    undef_stack: Vec<Mapping<Option<V>>>,
}

impl<V: Clone> Namespace<V> {
    pub fn new(builtins: Mapping<V>, globals: Mapping<V>) -> Self {
        Self {
            current: globals,
            builtins,
            undef_stack: Vec::new(),
        }
    }

    /// Open a new group; later `set`s are undone by the matching
    /// [`Namespace::end_group`].
    pub fn begin_group(&mut self) {
        self.undef_stack.push(Mapping::default());
    }

    /// Close the innermost group, restoring all names it changed.
    pub fn end_group(&mut self) -> Result<(), ParseError> {
        let undefs = self.undef_stack.pop().ok_or_else(|| {
            ParseError::new(ParseErrorKind::UnmatchedCloseGroup)
        })?;
        for (name, value) in undefs {
            match value {
                Some(value) => {
                    self.current.insert(name, value);
                }
                None => {
                    self.current.remove(&name);
                }
            }
        }
        Ok(())
    }

    /// Close every open group, as at the end of input.
    pub fn end_groups(&mut self) -> Result<(), ParseError> {
        while !self.undef_stack.is_empty() {
            self.end_group()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.current.contains_key(name) || self.builtins.contains_key(name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&V> {
        self.current.get(name).or_else(|| self.builtins.get(name))
    }

    /// The names this session defined on top of the builtins.
    pub fn session_entries(&self) -> impl Iterator<Item = (String, V)> + '_ {
        self.current.iter().map(|(k, v)| (k.clone(), v.clone()))
    }

    /// Define, redefine or (with `None`) delete a name.
    ///
    /// With `global` the change bypasses the undo stack and erases any
    /// pending restores for the name, like TeX's `\global`.
    pub fn set(&mut self, name: &str, value: Option<V>, global: bool) {
        if global {
            for undefs in &mut self.undef_stack {
                undefs.remove(name);
            }
        } else if let Some(undefs) = self.undef_stack.last_mut() {
            undefs
                .entry(name.to_owned())
                .or_insert_with(|| self.current.get(name).cloned());
        }
        match value {
            Some(value) => {
                self.current.insert(name.to_owned(), value);
            }
            None => {
                self.current.remove(name);
            }
        }
    }
}

impl<V: Clone> Default for Namespace<V> {
    fn default() -> Self {
        Self::new(Mapping::default(), Mapping::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_changes_are_undone() {
        let mut ns: Namespace<i32> = Namespace::default();
        ns.set("a", Some(1), false);
        ns.begin_group();
        ns.set("a", Some(2), false);
        ns.set("b", Some(3), false);
        assert_eq!(ns.get("a"), Some(&2));
        ns.end_group().unwrap();
        assert_eq!(ns.get("a"), Some(&1));
        assert!(!ns.has("b"));
    }

    #[test]
    fn global_set_survives_group_end() {
        let mut ns: Namespace<i32> = Namespace::default();
        ns.begin_group();
        ns.set("a", Some(1), false);
        ns.set("a", Some(2), true);
        ns.end_group().unwrap();
        assert_eq!(ns.get("a"), Some(&2));
    }

    #[test]
    fn builtins_shine_through_and_are_shadowable() {
        let mut builtins = Mapping::default();
        builtins.insert("pi".to_owned(), 314);
        let mut ns = Namespace::new(builtins, Mapping::default());
        assert_eq!(ns.get("pi"), Some(&314));
        ns.begin_group();
        ns.set("pi", Some(3), false);
        assert_eq!(ns.get("pi"), Some(&3));
        ns.end_group().unwrap();
        assert_eq!(ns.get("pi"), Some(&314));
    }

    #[test]
    fn unbalanced_end_group_errors() {
        let mut ns: Namespace<i32> = Namespace::default();
        assert!(ns.end_group().is_err());
    }
}
