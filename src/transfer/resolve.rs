//! Turning a finished drag session into a concrete mutation.
//!
//! Resolution is split in two:
//! - [`plan_resolution`] decides *where* the element goes, looking only at the session, the drop
//!   target and container lengths. It never mutates anything.
//! - [`apply_plan`] performs that decision against a [`ContainerRegistry`] with a single atomic
//!   `replace` of the destination sequence.

use super::options::TransferOptions;
use super::registry::ContainerRegistry;
use super::session::DragSession;
use super::types::{ContainerId, Resolution};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum InsertKind {
    Restore,
    Reorder,
    Move,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DiscardReason {
    ReleasedOutside,
    TargetVanished,
    SourceVanished,
    RegistryRejected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Placement {
    Insert {
        container: ContainerId,
        index: usize,
        kind: InsertKind,
    },
    Discard(DiscardReason),
}

/// Put the element back into its source, at its original index (clamped).
pub(crate) fn plan_restore<T>(
    session: &DragSession<T>,
    len_of: impl Fn(ContainerId) -> Option<usize>,
) -> Placement {
    match len_of(session.source()) {
        Some(len) => Placement::Insert {
            container: session.source(),
            index: session.source_index().min(len),
            kind: InsertKind::Restore,
        },
        None => Placement::Discard(DiscardReason::SourceVanished),
    }
}

/// Decide where the dragged element goes when the pointer is released over `drop`
/// (`None`: outside every container).
pub(crate) fn plan_resolution<T>(
    session: &DragSession<T>,
    drop: Option<ContainerId>,
    options: &TransferOptions,
    len_of: impl Fn(ContainerId) -> Option<usize>,
) -> Placement {
    // A press-and-release without real movement is a click, whatever is under the pointer.
    if !session.has_moved() {
        return plan_restore(session, len_of);
    }

    let Some(drop) = drop else {
        return if options.discard_on_release_outside {
            Placement::Discard(DiscardReason::ReleasedOutside)
        } else {
            plan_restore(session, len_of)
        };
    };

    let Some(len) = len_of(drop) else {
        return Placement::Discard(DiscardReason::TargetVanished);
    };

    // A hover index only means something for the container it was computed against.
    let hover_index = session.hover_index_in(drop);

    if drop == session.source() {
        Placement::Insert {
            container: drop,
            index: hover_index.unwrap_or(session.source_index()).min(len),
            kind: InsertKind::Reorder,
        }
    } else {
        Placement::Insert {
            container: drop,
            index: hover_index.unwrap_or(len).min(len),
            kind: InsertKind::Move,
        }
    }
}

/// Carry out `placement`, consuming the session.
pub(crate) fn apply_plan<T: Clone>(
    registry: &mut impl ContainerRegistry<T>,
    session: DragSession<T>,
    placement: Placement,
) -> Resolution<T> {
    let source = session.source();
    let source_index = session.source_index();

    let (container, index, kind) = match placement {
        Placement::Insert {
            container,
            index,
            kind,
        } => (container, index, kind),
        Placement::Discard(reason) => {
            if reason == DiscardReason::SourceVanished {
                log::warn!(
                    "session {} source {source} vanished; discarding {}",
                    session.id(),
                    session.element().id
                );
            } else {
                log::debug!(
                    "session DISCARD id={} element={} reason={reason:?}",
                    session.id(),
                    session.element().id
                );
            }
            return Resolution::Discarded {
                from: source,
                from_index: source_index,
                element: session.into_element(),
            };
        }
    };

    let Some(current) = registry.elements(container) else {
        log::warn!(
            "resolve target {container} vanished between planning and apply; discarding {}",
            session.element().id
        );
        return apply_plan(
            registry,
            session,
            Placement::Discard(DiscardReason::TargetVanished),
        );
    };

    let element_id = session.element().id;
    let index = index.min(current.len());
    let mut next = Vec::with_capacity(current.len() + 1);
    next.extend_from_slice(current);
    next.insert(index, session.element().clone());

    if !registry.replace(container, next) {
        log::warn!("registry rejected replacing {container}; discarding {element_id}");
        return apply_plan(
            registry,
            session,
            Placement::Discard(DiscardReason::RegistryRejected),
        );
    }

    match kind {
        InsertKind::Restore => Resolution::Restored {
            container,
            index,
            element: element_id,
        },
        InsertKind::Reorder => Resolution::Reordered {
            container,
            from: source_index,
            to: index,
            element: element_id,
        },
        InsertKind::Move => Resolution::Moved {
            from: source,
            from_index: source_index,
            to: container,
            to_index: index,
            element: element_id,
        },
    }
}
