use egui::{Context, Pos2, Rect};

use super::DragCoordinator;
use super::geometry::container_under_pointer;
use super::registry::ContainerRegistry;
use super::types::{ContainerId, Resolution};

/// The pointer/keyboard facts [`DragCoordinator::process_frame_input`] needs from one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Latest pointer position, `None` if the pointer left the window.
    pub pointer: Option<Pos2>,

    /// The primary button (the one that starts drags) was released this frame.
    pub released: bool,

    /// The primary button is currently held.
    pub button_down: bool,

    /// Escape was pressed this frame.
    pub escape: bool,
}

impl FrameInput {
    pub fn from_ctx(ctx: &Context) -> Self {
        ctx.input(|i| Self {
            pointer: i.pointer.latest_pos(),
            released: i.pointer.primary_released(),
            button_down: i.pointer.primary_down(),
            escape: i.key_pressed(egui::Key::Escape),
        })
    }
}

impl<T> DragCoordinator<T> {
    /// Call once at the start of each frame, before any container view is shown.
    pub fn begin_frame(&mut self) {
        self.frame = self.frame.wrapping_add(1);
        self.container_rects.clear();
        self.slot_rects.clear();
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Make `container` hit-testable for this frame. Called by container views.
    pub fn register_container(&mut self, container: ContainerId, rect: Rect, slots: Vec<Rect>) {
        self.container_rects.insert(container, rect);
        self.slot_rects.insert(container, slots);
    }

    pub fn container_rect(&self, container: ContainerId) -> Option<Rect> {
        self.container_rects.get(&container).copied()
    }

    pub fn slot_rects(&self, container: ContainerId) -> Option<&[Rect]> {
        self.slot_rects.get(&container).map(Vec::as_slice)
    }

    /// The container registered this frame whose rect is under `pointer` (smallest wins).
    pub fn container_under_pointer(&self, pointer: Pos2) -> Option<ContainerId> {
        container_under_pointer(&self.container_rects, pointer)
    }

    /// At most one release-driven action per frame, however many places observe the same
    /// pointer-up.
    pub(super) fn try_take_release_action(&mut self, kind: &'static str) -> bool {
        if self.release_action_frame == Some(self.frame) {
            log::trace!("release action {kind} ignored: already taken this frame");
            self.debug_log_event(format!("release IGNORED kind={kind}"));
            return false;
        }
        self.release_action_frame = Some(self.frame);
        true
    }

    /// Drive the session from one frame's input:
    /// - Escape cancels (if [`super::TransferOptions::cancel_on_escape`]),
    /// - a release resolves against the container under the pointer,
    /// - a session whose button is no longer held without an observed release is cancelled.
    ///
    /// Returns the resolution, if the session ended this frame.
    pub fn process_frame_input(
        &mut self,
        registry: &mut impl ContainerRegistry<T>,
        input: FrameInput,
    ) -> Option<Resolution<T>>
    where
        T: Clone,
    {
        if !self.is_dragging() {
            return None;
        }

        if let Some(pointer) = input.pointer {
            self.track_pointer(pointer);
        }

        if input.escape && self.options.cancel_on_escape {
            if !self.try_take_release_action("escape") {
                return None;
            }
            return self.cancel(registry);
        }

        if input.released {
            if !self.try_take_release_action("release") {
                return None;
            }
            let drop = input
                .pointer
                .and_then(|pointer| self.container_under_pointer(pointer));
            return self.resolve(registry, drop);
        }

        let started_this_frame = self.session_started_frame == Some(self.frame);
        if !input.button_down && !started_this_frame {
            if !self.try_take_release_action("lost_release") {
                return None;
            }
            log::debug!("pointer released without a release event; cancelling drag");
            return self.cancel(registry);
        }

        None
    }

    /// Call once at the end of each frame, after all container views: the single place that
    /// resolves drags. Also paints the dragged element under the pointer.
    pub fn end_frame(
        &mut self,
        ctx: &Context,
        registry: &mut impl ContainerRegistry<T>,
    ) -> Option<Resolution<T>>
    where
        T: Clone + std::fmt::Display,
    {
        let resolution = self.process_frame_input(registry, FrameInput::from_ctx(ctx));

        if self.is_dragging() {
            ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
            self.paint_drag_ghost(ctx, &self.ghost_style);
            ctx.request_repaint();
        }

        resolution
    }
}
