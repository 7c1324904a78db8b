use egui::Pos2;

use super::drag_state::PointerTracker;
use super::types::{ContainerId, Element, HoverTarget};

/// The one in-flight drag gesture.
///
/// While a session exists, the dragged element lives *only* here: it has already been lifted out
/// of its source container, and it goes back into exactly one container (or nowhere) when the
/// session is resolved.
#[derive(Debug)]
pub struct DragSession<T> {
    id: u64,
    source: ContainerId,
    source_index: usize,
    element: Element<T>,
    hover: Option<HoverTarget>,
    pointer: PointerTracker,
}

impl<T> DragSession<T> {
    pub(super) fn new(
        id: u64,
        source: ContainerId,
        source_index: usize,
        element: Element<T>,
        pointer: Pos2,
    ) -> Self {
        Self {
            id,
            source,
            source_index,
            element,
            hover: None,
            pointer: PointerTracker::new(pointer),
        }
    }

    /// Serial number, unique per coordinator. Only used for logging.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn source(&self) -> ContainerId {
        self.source
    }

    /// Index the element had in its source when the drag started. Never re-read afterwards.
    pub fn source_index(&self) -> usize {
        self.source_index
    }

    pub fn element(&self) -> &Element<T> {
        &self.element
    }

    pub fn hover(&self) -> Option<HoverTarget> {
        self.hover
    }

    /// Hover index, but only if the last hover target is `container`.
    pub fn hover_index_in(&self, container: ContainerId) -> Option<usize> {
        self.hover
            .filter(|h| h.container == container)
            .map(|h| h.index)
    }

    pub fn has_moved(&self) -> bool {
        self.pointer.has_moved()
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub(super) fn pointer_mut(&mut self) -> &mut PointerTracker {
        &mut self.pointer
    }

    pub(super) fn set_hover(&mut self, hover: Option<HoverTarget>) -> bool {
        let changed = self.hover != hover;
        self.hover = hover;
        changed
    }

    pub(super) fn into_element(self) -> Element<T> {
        self.element
    }
}
