//! The transit catalog handed to the planner.

use std::collections::HashSet;

use super::{DomainError, LineId, TransitLine};

/// An immutable snapshot of all bus lines.
///
/// Line identifiers are unique within a catalog; the planner relies on this
/// to tell lines apart when composing transfers. An empty catalog is valid.
#[derive(Debug, Clone, Default)]
pub struct TransitCatalog {
    lines: Vec<TransitLine>,
}

impl TransitCatalog {
    /// Build a catalog, rejecting duplicate line identifiers.
    ///
    /// Lines with structural problems (e.g. no stops) are accepted here and
    /// skipped at planning time.
    pub fn new(lines: Vec<TransitLine>) -> Result<Self, DomainError> {
        let mut seen: HashSet<&LineId> = HashSet::with_capacity(lines.len());
        for line in &lines {
            if !seen.insert(line.id()) {
                return Err(DomainError::DuplicateLine(line.id().clone()));
            }
        }
        Ok(Self { lines })
    }

    /// An empty catalog.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[TransitLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
