//! Drag elements between any number of array visualizers in [`egui`].
//!
//! Each on-screen array is a [`ArrayContainerView`] over one container of a
//! [`ContainerRegistry`] (usually a [`ContainerArena`]). A single [`DragCoordinator`] owns the one
//! drag gesture in flight and resolves it on release: reorder within the same array, move into
//! another array, put back (click, Escape), or discard (dropped outside every array).
//!
//! See [`transfer`] for the frame protocol.

#![forbid(unsafe_code)]

pub mod transfer;

pub use transfer::{
    ArrayContainerView, ArrayStyle, Container, ContainerArena, ContainerId, ContainerRegistry,
    DragCoordinator, DragSession, Element, ElementId, ElementPhase, FrameInput, HoverTarget,
    Resolution, SlotAxis, TransferError, TransferOptions,
};
