use std::collections::BTreeMap;

use egui::{Pos2, Rect};

use super::debug::DebugLog;
use super::error::TransferError;
use super::integrity;
use super::options::TransferOptions;
use super::registry::ContainerRegistry;
use super::resolve::{apply_plan, plan_resolution, plan_restore};
use super::session::DragSession;
use super::types::{ContainerId, Element, ElementId, HoverTarget, Resolution};
use super::view::ArrayStyle;

/// Sole owner of the (at most one) in-flight [`DragSession`].
///
/// Construct one per UI and hand it `&mut` to every container view; containers never talk to
/// each other directly. Every operation is synchronous and either fully applies or does nothing.
///
/// Event flow:
/// - a container calls [`Self::begin_drag`] on pointer-down over one of its elements,
/// - containers under the pointer call [`Self::update_hover`] on every pointer move,
/// - exactly one place (usually [`Self::end_frame`]) calls [`Self::resolve`] on pointer-up,
///   or [`Self::cancel`] on Escape / teardown.
#[derive(Debug)]
pub struct DragCoordinator<T> {
    pub(super) options: TransferOptions,

    session: Option<DragSession<T>>,
    next_session_id: u64,

    pub(super) frame: u64,
    pub(super) release_action_frame: Option<u64>,
    pub(super) container_rects: BTreeMap<ContainerId, Rect>,
    pub(super) slot_rects: ahash::HashMap<ContainerId, Vec<Rect>>,
    pub(super) session_started_frame: Option<u64>,

    /// Style of the view the current drag started in; the ghost is painted with it.
    pub(super) ghost_style: ArrayStyle,

    pub(super) debug_log: DebugLog,
    last_integrity_hash: u64,
}

impl<T> Default for DragCoordinator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DragCoordinator<T> {
    pub fn new() -> Self {
        Self::new_with_options(TransferOptions::default())
    }

    pub fn new_with_options(options: TransferOptions) -> Self {
        Self {
            options,
            session: None,
            next_session_id: 1,
            frame: 0,
            release_action_frame: None,
            container_rects: BTreeMap::new(),
            slot_rects: ahash::HashMap::default(),
            session_started_frame: None,
            ghost_style: ArrayStyle::default(),
            debug_log: DebugLog::default(),
            last_integrity_hash: 0,
        }
    }

    pub fn options(&self) -> &TransferOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut TransferOptions {
        &mut self.options
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession<T>> {
        self.session.as_ref()
    }

    pub fn hover(&self) -> Option<HoverTarget> {
        self.session.as_ref().and_then(DragSession::hover)
    }

    pub fn dragged_element(&self) -> Option<&Element<T>> {
        self.session.as_ref().map(DragSession::element)
    }

    pub fn ghost_style(&self) -> &ArrayStyle {
        &self.ghost_style
    }

    /// Is `container` the source of the current drag?
    pub fn is_source(&self, container: ContainerId) -> bool {
        self.session.as_ref().is_some_and(|s| s.source() == container)
    }

    /// Lift the element at `index` out of `source` and start dragging it.
    ///
    /// The element is removed from the source sequence right away; until the session is resolved
    /// or cancelled, the coordinator holds the only copy.
    ///
    /// # Errors
    ///
    /// - [`TransferError::AlreadyDragging`] if a session is open (the first gesture wins),
    /// - [`TransferError::StaleReference`] if `source` does not exist,
    /// - [`TransferError::IndexOutOfRange`] if `index` is not a slot of `source`.
    ///
    /// On error, nothing changes.
    pub fn begin_drag(
        &mut self,
        registry: &mut impl ContainerRegistry<T>,
        source: ContainerId,
        index: usize,
        pointer: Pos2,
    ) -> Result<ElementId, TransferError>
    where
        T: Clone,
    {
        if let Some(active) = &self.session {
            log::debug!(
                "begin_drag rejected: session {} from {} still open",
                active.id(),
                active.source()
            );
            return Err(TransferError::AlreadyDragging {
                active_source: active.source(),
            });
        }

        let Some(current) = registry.elements(source) else {
            return Err(TransferError::StaleReference { container: source });
        };
        if index >= current.len() {
            return Err(TransferError::IndexOutOfRange {
                container: source,
                index,
                len: current.len(),
            });
        }

        let mut remaining = current.to_vec();
        let element = remaining.remove(index);
        if !registry.replace(source, remaining) {
            return Err(TransferError::StaleReference { container: source });
        }

        let id = self.next_session_id.max(1);
        self.next_session_id = id.saturating_add(1);
        let element_id = element.id;

        log::debug!("session START id={id} source={source} index={index} element={element_id}");
        self.debug_log_event(format!(
            "session START id={id} source={source} index={index} element={element_id}"
        ));

        self.session = Some(DragSession::new(id, source, index, element, pointer));
        self.session_started_frame = Some(self.frame);
        Ok(element_id)
    }

    /// Record the latest pointer position. Latches "has moved" once the pointer has travelled
    /// beyond [`TransferOptions::drag_threshold`]. No-op without a session.
    pub fn track_pointer(&mut self, pointer: Pos2) {
        let options = &self.options;
        let Some(session) = &mut self.session else {
            return;
        };
        if session
            .pointer_mut()
            .observe(pointer, |d| options.exceeds_drag_threshold(d))
        {
            let id = session.id();
            log::trace!("session MOVED id={id}");
            self.debug_log_event(format!("session MOVED id={id}"));
        }
    }

    /// Report what is under the pointer. `None` means "not over any container".
    ///
    /// Preview only: never touches any container sequence. The index is clamped to
    /// `0..=len` of the target container.
    ///
    /// # Errors
    ///
    /// Both errors are benign (see [`TransferError::is_benign`]):
    /// - [`TransferError::NoActiveSession`]: nothing is being dragged, nothing changes;
    /// - [`TransferError::StaleReference`]: the target does not exist; the hover target is cleared.
    pub fn update_hover(
        &mut self,
        registry: &impl ContainerRegistry<T>,
        target: Option<HoverTarget>,
        pointer: Pos2,
    ) -> Result<(), TransferError> {
        if self.session.is_none() {
            return Err(TransferError::NoActiveSession);
        }
        self.track_pointer(pointer);

        let (hover, stale) = match target {
            None => (None, None),
            Some(target) => match registry.len_of(target.container) {
                Some(len) => (
                    Some(HoverTarget::new(target.container, target.index.min(len))),
                    None,
                ),
                None => (None, Some(target.container)),
            },
        };

        let Some(session) = &mut self.session else {
            return Err(TransferError::NoActiveSession);
        };
        if session.set_hover(hover) {
            let id = session.id();
            log::trace!("session HOVER id={id} target={hover:?}");
            self.debug_log_event(format!("session HOVER id={id} target={hover:?}"));
        }

        match stale {
            Some(container) => Err(TransferError::StaleReference { container }),
            None => Ok(()),
        }
    }

    /// Finish the drag with the pointer released over `drop` (`None`: outside every container).
    ///
    /// Returns `None` if there was no session (duplicate release events are harmless).
    pub fn resolve(
        &mut self,
        registry: &mut impl ContainerRegistry<T>,
        drop: Option<ContainerId>,
    ) -> Option<Resolution<T>>
    where
        T: Clone,
    {
        let Some(session) = self.session.take() else {
            log::trace!("resolve ignored: no active session");
            return None;
        };
        self.session_started_frame = None;

        let placement = plan_resolution(&session, drop, &self.options, |id| registry.len_of(id));
        let session_id = session.id();
        let resolution = apply_plan(registry, session, placement);

        log::debug!(
            "session RESOLVE id={session_id} drop={drop:?} -> {:?}",
            ResolutionSummary(&resolution)
        );
        self.debug_log_event(format!(
            "session RESOLVE id={session_id} drop={drop:?} -> {:?}",
            ResolutionSummary(&resolution)
        ));
        self.check_integrity(registry);
        Some(resolution)
    }

    /// Abort the drag and put the element back exactly where it was.
    ///
    /// Returns `None` if there was no session.
    pub fn cancel(&mut self, registry: &mut impl ContainerRegistry<T>) -> Option<Resolution<T>>
    where
        T: Clone,
    {
        let Some(session) = self.session.take() else {
            log::trace!("cancel ignored: no active session");
            return None;
        };
        self.session_started_frame = None;

        let placement = plan_restore(&session, |id| registry.len_of(id));
        let session_id = session.id();
        let resolution = apply_plan(registry, session, placement);

        log::debug!(
            "session CANCEL id={session_id} -> {:?}",
            ResolutionSummary(&resolution)
        );
        self.debug_log_event(format!(
            "session CANCEL id={session_id} -> {:?}",
            ResolutionSummary(&resolution)
        ));
        self.check_integrity(registry);
        Some(resolution)
    }

    /// Teardown hook: must run *before* `container` is removed from the registry.
    ///
    /// - If the drag started in `container`, it is cancelled (the element goes back into the
    ///   container and leaves together with it).
    /// - If `container` is only the current hover target, the hover target is cleared.
    pub fn container_will_be_destroyed(
        &mut self,
        registry: &mut impl ContainerRegistry<T>,
        container: ContainerId,
    ) where
        T: Clone,
    {
        self.container_rects.remove(&container);
        self.slot_rects.remove(&container);

        let Some(session) = &mut self.session else {
            return;
        };

        if session.source() == container {
            log::debug!(
                "source {container} destroyed mid-drag; cancelling session {}",
                session.id()
            );
            self.cancel(registry);
            return;
        }

        if session.hover().is_some_and(|h| h.container == container) {
            session.set_hover(None);
            let id = session.id();
            log::debug!("hover target {container} destroyed; session {id} re-targeted to none");
            self.debug_log_event(format!(
                "session HOVER id={id} target=None (destroyed {container})"
            ));
        }
    }

    fn check_integrity(&mut self, registry: &impl ContainerRegistry<T>) {
        if !self.options.debug_integrity {
            return;
        }

        let issues = integrity::registry_integrity_issues(registry, self.session.as_ref());
        let hash = if issues.is_empty() {
            0
        } else {
            integrity::hash_issues(&issues)
        };
        let prev = std::mem::replace(&mut self.last_integrity_hash, hash);
        if prev == hash {
            return;
        }

        if issues.is_empty() {
            self.debug_integrity_log_event("integrity OK");
            return;
        }

        log::warn!("integrity FAIL issues={}\n{}", issues.len(), issues.join("\n"));
        self.debug_integrity_log_event(format!("integrity FAIL issues={}", issues.len()));
        for issue in issues {
            self.debug_integrity_log_event(issue);
        }
    }
}

/// Compact `Debug` for log lines, without requiring `T: Debug`.
struct ResolutionSummary<'a, T>(&'a Resolution<T>);

impl<T> std::fmt::Debug for ResolutionSummary<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Resolution::Restored {
                container,
                index,
                element,
            } => write!(f, "Restored({element} at {container}[{index}])"),
            Resolution::Reordered {
                container,
                from,
                to,
                element,
            } => write!(f, "Reordered({element} {container}[{from}] -> [{to}])"),
            Resolution::Moved {
                from,
                from_index,
                to,
                to_index,
                element,
            } => write!(
                f,
                "Moved({element} {from}[{from_index}] -> {to}[{to_index}])"
            ),
            Resolution::Discarded {
                from,
                from_index,
                element,
            } => write!(f, "Discarded({} from {from}[{from_index}])", element.id),
        }
    }
}
