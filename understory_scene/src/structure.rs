// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The structure-preservation invariant for children replacement.
//!
//! Structure nodes hold architecturally fixed positions among their siblings, so a
//! replacement of a children list may add, remove, or reorder anything except them.
//! Formally: the subsequence of structure nodes, compared by identity, must be the same
//! before and after. [`structure_preserved`] checks exactly that, independent of any scene.

use core::fmt;

use crate::types::NodeId;

/// First position at which the structure subsequences of two lists differ.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct StructureMismatch {
    /// Index into the structure subsequence (not into the full list).
    pub position: usize,
}

impl fmt::Display for StructureMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "structure nodes differ at structure position {}",
            self.position
        )
    }
}

impl core::error::Error for StructureMismatch {}

/// Check that `old` and `new` have the same structure subsequence.
///
/// `is_structure` selects the structure entries; both subsequences keep their
/// relative order and are compared pairwise by equality. Nothing is allocated:
/// the two filtered sequences are walked in lockstep and the first divergence is reported.
///
/// ```
/// use understory_scene::structure_preserved;
///
/// // Uppercase letters are structure entries.
/// let is_structure = |c: char| c.is_ascii_uppercase();
/// assert!(structure_preserved(&['A', 'x', 'B'], &['y', 'A', 'B', 'z'], is_structure).is_ok());
///
/// let err = structure_preserved(&['A', 'B'], &['B', 'A'], is_structure).unwrap_err();
/// assert_eq!(err.position, 0);
/// ```
pub fn structure_preserved<K, F>(
    old: &[K],
    new: &[K],
    is_structure: F,
) -> Result<(), StructureMismatch>
where
    K: Copy + PartialEq,
    F: Fn(K) -> bool,
{
    let is_structure = &is_structure;
    let mut old_structure = old.iter().copied().filter(|k| is_structure(*k));
    let mut new_structure = new.iter().copied().filter(|k| is_structure(*k));
    let mut position = 0;
    loop {
        match (old_structure.next(), new_structure.next()) {
            (None, None) => return Ok(()),
            (a, b) if a == b => position += 1,
            _ => return Err(StructureMismatch { position }),
        }
    }
}

/// Reasons a children replacement is rejected.
///
/// Returned by [`Scene::try_set_children_list`](crate::Scene::try_set_children_list).
/// In every case the scene is left exactly as it was.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ChildrenError {
    /// The target node is not a floating inner node.
    NotFloating(NodeId),
    /// The target or one of the new children is not a live node.
    StaleNode(NodeId),
    /// The new list does not preserve the structure subsequence.
    StructureMismatch(StructureMismatch),
}

impl fmt::Display for ChildrenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFloating(id) => write!(f, "{id:?} is not a floating inner node"),
            Self::StaleNode(id) => write!(f, "{id:?} does not refer to a live node"),
            Self::StructureMismatch(m) => m.fmt(f),
        }
    }
}

impl core::error::Error for ChildrenError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::StructureMismatch(m) => Some(m),
            _ => None,
        }
    }
}

impl From<StructureMismatch> for ChildrenError {
    fn from(m: StructureMismatch) -> Self {
        Self::StructureMismatch(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upper(c: char) -> bool {
        c.is_ascii_uppercase()
    }

    #[test]
    fn floating_entries_are_free() {
        assert!(structure_preserved(&['a', 'b'], &[], upper).is_ok());
        assert!(structure_preserved(&[], &['a', 'b', 'c'], upper).is_ok());
        assert!(structure_preserved(&['a', 'X', 'b'], &['b', 'X', 'a', 'c'], upper).is_ok());
    }

    #[test]
    fn removing_structure_fails_at_its_position() {
        let err = structure_preserved(&['X', 'a', 'Y'], &['X', 'a'], upper).unwrap_err();
        assert_eq!(err, StructureMismatch { position: 1 });
    }

    #[test]
    fn adding_structure_fails() {
        let err = structure_preserved(&['X'], &['X', 'Y'], upper).unwrap_err();
        assert_eq!(err.position, 1);
        let err = structure_preserved(&[], &['Y'], upper).unwrap_err();
        assert_eq!(err.position, 0);
    }

    #[test]
    fn reordering_structure_fails() {
        let err = structure_preserved(&['X', 'Y', 'Z'], &['X', 'Z', 'Y'], upper).unwrap_err();
        assert_eq!(err.position, 1);
    }

    #[test]
    fn swapping_identity_fails() {
        // Same count, different identity.
        let err = structure_preserved(&['X', 'a'], &['Y', 'a'], upper).unwrap_err();
        assert_eq!(err.position, 0);
    }

    #[test]
    fn mismatch_is_the_error_source() {
        use core::error::Error as _;
        let err = ChildrenError::from(StructureMismatch { position: 3 });
        assert!(err.source().is_some());
        assert!(ChildrenError::NotFloating(NodeId::new(0, 1)).source().is_none());
    }
}
