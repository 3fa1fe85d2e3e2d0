//! History-aware annotation collection
//!
//! The store is the only writer of the annotation list and the undo stack.
//! Every committed mutation pushes one full snapshot first, so popping a
//! snapshot exactly reverses the last mutation.

use crate::domain::{Annotation, AnnotationId, Point};

#[derive(Clone, Debug, Default)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
    history: Vec<Vec<Annotation>>,
    selected: Option<AnnotationId>,
}

impl AnnotationStore {
    /// Annotations in z-order (last is drawn on top)
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn get(&self, id: &AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| &a.id == id)
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Number of undo steps available
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn selected(&self) -> Option<&AnnotationId> {
        self.selected.as_ref()
    }

    pub fn selected_annotation(&self) -> Option<&Annotation> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    /// Select an existing annotation; unknown ids clear the selection
    pub fn select(&mut self, id: Option<AnnotationId>) {
        self.selected = id.filter(|id| self.get(id).is_some());
    }

    /// Full copy of the collection, for drag snapshots
    pub fn snapshot(&self) -> Vec<Annotation> {
        self.annotations.clone()
    }

    pub fn add(&mut self, annotation: Annotation) {
        log::debug!("Adding {:?} annotation {}", annotation.kind(), annotation.id);
        self.history.push(self.annotations.clone());
        self.annotations.push(annotation);
        self.selected = None;
    }

    /// Move an annotation in place without recording history.
    ///
    /// Used for live drag feedback; the drag is recorded as one step by
    /// [`AnnotationStore::commit_snapshot`]. Returns false for unknown ids.
    pub fn update_position(&mut self, id: &AnnotationId, anchor: Point) -> bool {
        match self.annotations.iter_mut().find(|a| &a.id == id) {
            Some(annotation) => {
                annotation.shape.set_anchor(anchor);
                true
            }
            None => false,
        }
    }

    /// Record `before` as an undo step if the collection has changed since.
    ///
    /// Returns whether a history entry was pushed.
    pub fn commit_snapshot(&mut self, before: Vec<Annotation>) -> bool {
        if before == self.annotations {
            return false;
        }
        self.history.push(before);
        true
    }

    /// Remove an annotation. Returns false (and records nothing) for unknown ids.
    pub fn delete(&mut self, id: &AnnotationId) -> bool {
        let Some(index) = self.annotations.iter().position(|a| &a.id == id) else {
            return false;
        };
        log::debug!("Deleting annotation {}", id);
        self.history.push(self.annotations.clone());
        self.annotations.remove(index);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        true
    }

    pub fn clear_all(&mut self) {
        if !self.annotations.is_empty() || !self.history.is_empty() {
            self.history.push(std::mem::take(&mut self.annotations));
        }
        self.selected = None;
    }

    /// Restore the most recent snapshot. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.selected = None;
        match self.history.pop() {
            Some(previous) => {
                self.annotations = previous;
                true
            }
            None => false,
        }
    }

    /// Drop annotations, history, and selection (new image)
    pub fn reset(&mut self) {
        self.annotations.clear();
        self.history.clear();
        self.selected = None;
    }
}
