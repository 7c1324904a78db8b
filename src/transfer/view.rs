use egui::{
    Align2, Color32, Context, CornerRadius, FontId, Pos2, Rect, Sense, Stroke, StrokeKind, Ui, Vec2,
};

use super::DragCoordinator;
use super::error::TransferError;
use super::geometry::{SlotAxis, insertion_index, slot_rects};
use super::registry::ContainerRegistry;
use super::types::{ContainerId, ElementPhase, HoverTarget};

/// Sizes used to lay out and paint one array container.
#[derive(Clone, Debug)]
pub struct ArrayStyle {
    pub slot_size: Vec2,
    pub spacing: f32,
    pub padding: f32,
    pub corner_radius: u8,

    /// Space reserved even for short arrays, so an empty array is still a drop target.
    pub min_slots: usize,
}

impl Default for ArrayStyle {
    fn default() -> Self {
        Self {
            slot_size: Vec2::new(40.0, 40.0),
            spacing: 4.0,
            padding: 6.0,
            corner_radius: 4,
            min_slots: 1,
        }
    }
}

fn phase_fill(phase: ElementPhase, visuals: &egui::Visuals) -> Color32 {
    match phase {
        ElementPhase::Settled => visuals.widgets.inactive.bg_fill,
        ElementPhase::Entering => Color32::from_rgb(70, 140, 90),
        ElementPhase::Leaving => Color32::from_rgb(160, 70, 70),
        ElementPhase::Peeking => Color32::from_rgb(200, 160, 60),
    }
}

/// One array container on screen.
///
/// Implements the container side of a drag: starts drags on primary press over an element,
/// reports the hover insertion index while the pointer is over it, and paints the insertion
/// marker. It never resolves drags itself; that is [`DragCoordinator::end_frame`]'s job.
#[derive(Clone, Debug)]
pub struct ArrayContainerView {
    id: ContainerId,
    axis: SlotAxis,
    style: ArrayStyle,
}

impl ArrayContainerView {
    pub fn new(id: ContainerId) -> Self {
        Self {
            id,
            axis: SlotAxis::Horizontal,
            style: ArrayStyle::default(),
        }
    }

    #[must_use]
    pub fn axis(mut self, axis: SlotAxis) -> Self {
        self.axis = axis;
        self
    }

    #[must_use]
    pub fn style(mut self, style: ArrayStyle) -> Self {
        self.style = style;
        self
    }

    fn desired_size(&self, len: usize) -> Vec2 {
        let slots = len.max(self.style.min_slots).max(1) as f32;
        let s = &self.style;
        let (along, across) = match self.axis {
            SlotAxis::Horizontal => (s.slot_size.x, s.slot_size.y),
            SlotAxis::Vertical => (s.slot_size.y, s.slot_size.x),
        };
        let along = slots * along + (slots - 1.0) * s.spacing + 2.0 * s.padding;
        let across = across + 2.0 * s.padding;
        match self.axis {
            SlotAxis::Horizontal => Vec2::new(along, across),
            SlotAxis::Vertical => Vec2::new(across, along),
        }
    }

    fn layout_slots(&self, rect: Rect, len: usize) -> Vec<Rect> {
        let origin = rect.min + Vec2::splat(self.style.padding);
        slot_rects(origin, len, self.style.slot_size, self.style.spacing, self.axis)
    }

    pub fn show<T: Clone + std::fmt::Display>(
        self,
        ui: &mut Ui,
        coordinator: &mut DragCoordinator<T>,
        registry: &mut impl ContainerRegistry<T>,
    ) -> egui::Response {
        let Some(len) = registry.len_of(self.id) else {
            return ui.allocate_response(Vec2::ZERO, Sense::hover());
        };

        let (rect, response) = ui.allocate_exact_size(self.desired_size(len), Sense::hover());
        let mut slots = self.layout_slots(rect, len);

        // Only the part inside the clip rect (e.g. of a `ScrollArea`) is under the pointer.
        let visible = rect.intersect(ui.clip_rect());
        let hittable = |pos: Pos2| visible.is_positive() && visible.contains(pos);

        let (pressed, press_origin, pointer) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.press_origin(),
                i.pointer.latest_pos(),
            )
        });

        // Pointer-down over one of our elements lifts it.
        let mut began = false;
        if pressed && !coordinator.is_dragging() {
            let press = press_origin.or(pointer);
            if let Some((index, pos)) =
                press.filter(|&pos| hittable(pos)).and_then(|pos| {
                    Some((slots.iter().position(|s| s.contains(pos))?, pos))
                })
            {
                match coordinator.begin_drag(registry, self.id, index, pos) {
                    Ok(_) => {
                        began = true;
                        coordinator.ghost_style = self.style.clone();
                        slots = self.layout_slots(rect, registry.len_of(self.id).unwrap_or(0));
                    }
                    Err(err) => log::debug!("container {} could not start drag: {err}", self.id),
                }
            }
        }

        if visible.is_positive() {
            coordinator.register_container(self.id, visible, slots.clone());
        }

        // Hover is reported from the frame after the press, against the shortened sequence.
        if coordinator.is_dragging() && !began {
            if let Some(pos) = pointer {
                let last_target = coordinator.hover().is_some_and(|h| h.container == self.id);
                if hittable(pos) {
                    let previous = coordinator.session().and_then(|s| s.hover_index_in(self.id));
                    let index = insertion_index(
                        &slots,
                        pos,
                        self.axis,
                        previous,
                        coordinator.options().hover_hysteresis,
                    );
                    ignore_benign(coordinator.update_hover(
                        registry,
                        Some(HoverTarget::new(self.id, index)),
                        pos,
                    ));
                } else if last_target {
                    ignore_benign(coordinator.update_hover(registry, None, pos));
                }
            }
        }

        if ui.is_rect_visible(rect) {
            self.paint(ui, rect, &slots, coordinator, registry);
        }

        response
    }

    fn paint<T: std::fmt::Display>(
        &self,
        ui: &Ui,
        rect: Rect,
        slots: &[Rect],
        coordinator: &DragCoordinator<T>,
        registry: &impl ContainerRegistry<T>,
    ) {
        let visuals = ui.visuals();
        let painter = ui.painter();
        let radius = CornerRadius::same(self.style.corner_radius);

        let hover_index = coordinator.session().and_then(|s| s.hover_index_in(self.id));
        let frame_stroke = if hover_index.is_some() {
            visuals.selection.stroke
        } else {
            visuals.widgets.noninteractive.bg_stroke
        };
        painter.rect_filled(rect, radius, visuals.extreme_bg_color);
        painter.rect_stroke(rect, radius, frame_stroke, StrokeKind::Inside);

        let elements = registry.elements(self.id).unwrap_or_default();
        for (slot, element) in slots.iter().zip(elements) {
            painter.rect_filled(*slot, radius, phase_fill(element.phase, visuals));
            painter.text(
                slot.center(),
                Align2::CENTER_CENTER,
                element.value.to_string(),
                FontId::proportional(14.0),
                visuals.text_color(),
            );
        }

        // Where the element will land, or (source only) the slot it was lifted from.
        let marker = match hover_index {
            Some(index) => Some((index, visuals.selection.stroke)),
            None => coordinator
                .session()
                .filter(|s| s.source() == self.id)
                .map(|s| (s.source_index().min(slots.len()), visuals.widgets.inactive.fg_stroke)),
        };
        if let Some((index, stroke)) = marker {
            let [a, b] = self.marker_segment(rect, slots, index);
            painter.line_segment([a, b], Stroke::new(stroke.width.max(2.0), stroke.color));
        }
    }

    fn marker_segment(&self, rect: Rect, slots: &[Rect], index: usize) -> [Pos2; 2] {
        let half = self.style.spacing * 0.5;
        let inner = rect.shrink(self.style.padding);
        match self.axis {
            SlotAxis::Horizontal => {
                let x = match (slots.get(index), slots.last()) {
                    (Some(slot), _) => slot.left() - half,
                    (None, Some(last)) => last.right() + half,
                    (None, None) => inner.left(),
                };
                [Pos2::new(x, inner.top()), Pos2::new(x, inner.bottom())]
            }
            SlotAxis::Vertical => {
                let y = match (slots.get(index), slots.last()) {
                    (Some(slot), _) => slot.top() - half,
                    (None, Some(last)) => last.bottom() + half,
                    (None, None) => inner.top(),
                };
                [Pos2::new(inner.left(), y), Pos2::new(inner.right(), y)]
            }
        }
    }
}

fn ignore_benign(result: Result<(), TransferError>) {
    if let Err(err) = result {
        if err.is_benign() {
            log::trace!("hover update ignored: {err}");
        } else {
            log::warn!("hover update failed: {err}");
        }
    }
}

impl<T: std::fmt::Display> DragCoordinator<T> {
    /// Paint the dragged element on top of everything, following the pointer.
    pub fn paint_drag_ghost(&self, ctx: &Context, style: &ArrayStyle) {
        let Some(session) = self.session() else {
            return;
        };
        if !session.has_moved() {
            return;
        }

        let ctx_style = ctx.style();
        let visuals = &ctx_style.visuals;
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Tooltip,
            egui::Id::new("egui_array_transfer_drag_ghost"),
        ));
        let rect = Rect::from_center_size(session.pointer().last(), style.slot_size);
        let radius = CornerRadius::same(style.corner_radius);

        painter.rect_filled(rect, radius, visuals.selection.bg_fill.gamma_multiply(0.85));
        painter.rect_stroke(rect, radius, visuals.selection.stroke, StrokeKind::Outside);
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            session.element().value.to_string(),
            FontId::proportional(14.0),
            visuals.strong_text_color(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desired_size_reserves_min_slots() {
        let view = ArrayContainerView::new(ContainerId(1));
        let empty = view.desired_size(0);
        let one = view.desired_size(1);
        assert_eq!(empty, one);
        assert_eq!(one, Vec2::new(40.0 + 12.0, 40.0 + 12.0));
        assert_eq!(view.desired_size(3).x, 3.0 * 40.0 + 2.0 * 4.0 + 12.0);
    }

    #[test]
    fn vertical_layout_swaps_axes() {
        let view = ArrayContainerView::new(ContainerId(1)).axis(SlotAxis::Vertical);
        assert_eq!(view.desired_size(2), Vec2::new(52.0, 2.0 * 40.0 + 4.0 + 12.0));
    }

    #[test]
    fn marker_between_and_after_slots() {
        let view = ArrayContainerView::new(ContainerId(1));
        let rect = Rect::from_min_size(Pos2::ZERO, view.desired_size(2));
        let slots = view.layout_slots(rect, 2);

        let [top, bottom] = view.marker_segment(rect, &slots, 1);
        assert_eq!(top.x, slots[1].left() - 2.0);
        assert!(top.y < bottom.y);

        let [end, _] = view.marker_segment(rect, &slots, 2);
        assert_eq!(end.x, slots[1].right() + 2.0);
    }
}
