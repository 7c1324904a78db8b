//! Cross-container drag-and-transfer for array visualizers.
//!
//! Any number of [`ArrayContainerView`]s can be on screen at once, each backed by one container in
//! a [`ContainerRegistry`]. A single [`DragCoordinator`] owns the one in-flight drag and decides,
//! on release, whether the dragged element is reordered, moved to another container, put back,
//! or discarded.
//!
//! Typical frame:
//!
//! ```ignore
//! coordinator.begin_frame();
//! for id in arena.container_ids() {
//!     ArrayContainerView::new(id).show(ui, &mut coordinator, &mut arena);
//! }
//! if let Some(resolution) = coordinator.end_frame(ui.ctx(), &mut arena) {
//!     // react to the move / discard
//! }
//! ```

mod coordinator;
mod debug;
mod drag_state;
mod error;
mod geometry;
mod integrity;
mod options;
mod registry;
mod release;
mod resolve;
mod session;
mod types;
mod view;

#[cfg(test)]
mod view_tests;

pub use coordinator::DragCoordinator;
pub use drag_state::PointerTracker;
pub use error::TransferError;
pub use geometry::{SlotAxis, container_under_pointer, insertion_index, slot_rects};
pub use options::TransferOptions;
pub use registry::{ContainerArena, ContainerRegistry};
pub use release::FrameInput;
pub use session::DragSession;
pub use types::{
    Container, ContainerId, Element, ElementId, ElementPhase, HoverTarget, Resolution,
};
pub use view::{ArrayContainerView, ArrayStyle};
