/// Options for [`super::DragCoordinator`].
#[derive(Clone, Debug)]
pub struct TransferOptions {
    /// Pointer distance (in points) from the press position before a gesture counts as a drag.
    ///
    /// Releasing before the pointer has travelled this far is a click: the element goes back to
    /// where it was, regardless of what is under the pointer.
    pub drag_threshold: f32,

    /// Dead band (in points) around a slot midpoint in which the previously reported hover index is
    /// kept. Avoids the insertion marker flickering when the pointer jitters on a boundary.
    pub hover_hysteresis: f32,

    /// If true, releasing a dragged element outside every container removes it for good
    /// ("drag it off the array to delete it").
    ///
    /// If false, such a release puts the element back where it came from.
    pub discard_on_release_outside: bool,

    /// If true, pressing Escape during a drag cancels it and restores the element.
    pub cancel_on_escape: bool,

    /// If true, record coordinator events (begin/hover target changes/resolution) in a small ring
    /// buffer, for easy copy-paste from an on-screen debug panel.
    pub debug_event_log: bool,

    /// Maximum number of debug log lines to keep (ring buffer).
    pub debug_event_log_capacity: usize,

    /// If true, check registry integrity (no duplicated elements, valid hover index) after every
    /// resolution and report issues through `log::warn!` and the debug log.
    pub debug_integrity: bool,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            drag_threshold: 4.0,
            hover_hysteresis: 2.0,
            discard_on_release_outside: true,
            cancel_on_escape: true,
            debug_event_log: false,
            debug_event_log_capacity: 200,
            debug_integrity: cfg!(debug_assertions),
        }
    }
}

impl TransferOptions {
    pub(crate) fn exceeds_drag_threshold(&self, distance: f32) -> bool {
        distance > self.drag_threshold.max(0.0)
    }
}
