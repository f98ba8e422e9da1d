use super::drawing::Drawing;

/// Committed drawings in insertion order, which is also paint order.
/// Only grows or empties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationStore {
    drawings: Vec<Drawing>,
    revision: u64,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, drawing: Drawing) {
        self.drawings.push(drawing);
        self.revision += 1;
    }

    /// Empties the store. Bumps the revision even when already empty.
    pub fn clear(&mut self) {
        self.drawings.clear();
        self.revision += 1;
    }

    pub fn drawings(&self) -> &[Drawing] {
        &self.drawings
    }

    pub fn len(&self) -> usize {
        self.drawings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawings.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}
