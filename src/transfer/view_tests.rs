use egui::{Event, Modifiers, PointerButton, Pos2, Rect, Vec2};

use super::{
    ArrayContainerView, ArrayStyle, ContainerArena, ContainerId, DragCoordinator, Resolution,
};

struct Harness {
    ctx: egui::Context,
    arena: ContainerArena<i32>,
    coordinator: DragCoordinator<i32>,
    a: ContainerId,
    b: ContainerId,
    a_style: ArrayStyle,

    /// Replaces the panel's clip rect, like a `ScrollArea` scrolled to the top would.
    clip: Option<Rect>,
}

impl Harness {
    fn new() -> Self {
        let mut arena = ContainerArena::new();
        let a = arena.create_container("A", [10, 20, 30]);
        let b = arena.create_container("B", [99]);
        Self {
            ctx: egui::Context::default(),
            arena,
            coordinator: DragCoordinator::new(),
            a,
            b,
            a_style: ArrayStyle::default(),
            clip: None,
        }
    }

    /// Run one pass with `events`, showing A above B. Returns what `end_frame` resolved.
    fn pass(&mut self, events: Vec<Event>) -> Option<Resolution<i32>> {
        let raw = egui::RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0))),
            events,
            ..Default::default()
        };

        self.ctx.begin_pass(raw);
        self.coordinator.begin_frame();
        let (a, b, clip) = (self.a, self.b, self.clip);
        let a_style = self.a_style.clone();
        let coordinator = &mut self.coordinator;
        let arena = &mut self.arena;
        egui::CentralPanel::default().show(&self.ctx, |ui| {
            if let Some(clip) = clip {
                ui.set_clip_rect(clip);
            }
            ArrayContainerView::new(a)
                .style(a_style)
                .show(ui, coordinator, arena);
            ui.add_space(20.0);
            ArrayContainerView::new(b).show(ui, coordinator, arena);
        });
        let resolution = self.coordinator.end_frame(&self.ctx, &mut self.arena);
        let _ = self.ctx.end_pass();
        resolution
    }

    fn slot(&self, container: ContainerId, index: usize) -> Rect {
        self.coordinator
            .slot_rects(container)
            .and_then(|slots| slots.get(index).copied())
            .unwrap_or_else(|| panic!("slot {index} of {container} not registered"))
    }
}

fn moved(pos: Pos2) -> Event {
    Event::PointerMoved(pos)
}

fn button(pos: Pos2, pressed: bool) -> Event {
    button_of(PointerButton::Primary, pos, pressed)
}

fn button_of(button: PointerButton, pos: Pos2, pressed: bool) -> Event {
    Event::PointerButton {
        pos,
        button,
        pressed,
        modifiers: Modifiers::NONE,
    }
}

#[test]
fn views_register_rects_every_frame() {
    let mut h = Harness::new();
    h.pass(vec![moved(Pos2::new(1.0, 1.0))]);

    let a_rect = h.coordinator.container_rect(h.a).expect("A registered");
    let b_rect = h.coordinator.container_rect(h.b).expect("B registered");
    assert!(a_rect.max.y <= b_rect.min.y, "A is laid out above B");
    assert_eq!(h.coordinator.slot_rects(h.a).map(<[Rect]>::len), Some(3));
    assert_eq!(h.coordinator.slot_rects(h.b).map(<[Rect]>::len), Some(1));
    assert_eq!(h.coordinator.container_under_pointer(b_rect.center()), Some(h.b));
}

#[test]
fn drag_from_one_array_into_another() {
    let mut h = Harness::new();
    h.pass(vec![moved(Pos2::new(1.0, 1.0))]);

    // Press on A[1] (`20`).
    let press = h.slot(h.a, 1).center();
    assert!(h.pass(vec![moved(press), button(press, true)]).is_none());
    assert!(h.coordinator.is_dragging());
    assert_eq!(h.arena.values(h.a), Some(vec![10, 30]));

    // Move over the left half of B[0] (`99`): insertion index 0.
    let over_b = h.slot(h.b, 0).left_center() + Vec2::new(2.0, 0.0);
    assert!(h.pass(vec![moved(over_b)]).is_none());
    let hover = h.coordinator.hover().expect("hovering B");
    assert_eq!((hover.container, hover.index), (h.b, 0));

    // Release over B.
    let resolution = h.pass(vec![moved(over_b), button(over_b, false)]);
    assert!(matches!(resolution, Some(Resolution::Moved { to_index: 0, .. })));
    assert!(!h.coordinator.is_dragging());
    assert_eq!(h.arena.values(h.a), Some(vec![10, 30]));
    assert_eq!(h.arena.values(h.b), Some(vec![20, 99]));
}

#[test]
fn click_on_element_changes_nothing() {
    let mut h = Harness::new();
    h.pass(vec![moved(Pos2::new(1.0, 1.0))]);

    let press = h.slot(h.a, 0).center();
    h.pass(vec![moved(press), button(press, true)]);
    let resolution = h.pass(vec![button(press, false)]);

    assert!(matches!(resolution, Some(Resolution::Restored { index: 0, .. })));
    assert_eq!(h.arena.values(h.a), Some(vec![10, 20, 30]));
    assert_eq!(h.arena.values(h.b), Some(vec![99]));
}

#[test]
fn dragging_off_every_array_discards() {
    let mut h = Harness::new();
    h.pass(vec![moved(Pos2::new(1.0, 1.0))]);

    let press = h.slot(h.a, 2).center();
    h.pass(vec![moved(press), button(press, true)]);

    let outside = Pos2::new(700.0, 500.0);
    h.pass(vec![moved(outside)]);
    let resolution = h.pass(vec![button(outside, false)]);

    assert!(resolution.is_some_and(|r| r.is_discard()));
    assert_eq!(h.arena.values(h.a), Some(vec![10, 20]));
    assert_eq!(h.arena.total_len(), 3);
}

#[test]
fn secondary_click_does_not_end_primary_drag() {
    let mut h = Harness::new();
    h.pass(vec![moved(Pos2::new(1.0, 1.0))]);

    let press = h.slot(h.a, 1).center();
    h.pass(vec![moved(press), button(press, true)]);

    let outside = Pos2::new(700.0, 500.0);
    h.pass(vec![moved(outside)]);

    // Right click while the primary button is still held.
    let resolution = h.pass(vec![
        button_of(PointerButton::Secondary, outside, true),
        button_of(PointerButton::Secondary, outside, false),
    ]);
    assert!(resolution.is_none(), "{resolution:?}");
    assert!(h.coordinator.is_dragging());
    assert_eq!(h.arena.total_len(), 3);

    let resolution = h.pass(vec![button(outside, false)]);
    assert!(resolution.is_some_and(|r| r.is_discard()));
    assert_eq!(h.arena.values(h.a), Some(vec![10, 30]));
}

#[test]
fn clipped_away_container_is_not_a_drop_target() {
    let mut h = Harness::new();
    h.pass(vec![moved(Pos2::new(1.0, 1.0))]);

    let a_rect = h.coordinator.container_rect(h.a).expect("A registered");
    let b_center = h.coordinator.container_rect(h.b).expect("B registered").center();

    // Only A stays inside the clip rect.
    h.clip = Some(Rect::from_min_max(
        Pos2::ZERO,
        Pos2::new(800.0, a_rect.max.y + 5.0),
    ));
    h.pass(vec![moved(Pos2::new(1.0, 1.0))]);
    assert!(h.coordinator.container_rect(h.a).is_some());
    assert_eq!(h.coordinator.container_rect(h.b), None);

    let press = h.slot(h.a, 1).center();
    h.pass(vec![moved(press), button(press, true)]);
    h.pass(vec![moved(b_center)]);
    assert_eq!(h.coordinator.hover(), None);

    let resolution = h.pass(vec![button(b_center, false)]);
    assert!(resolution.is_some_and(|r| r.is_discard()));
    assert_eq!(h.arena.values(h.b), Some(vec![99]));
}

#[test]
fn ghost_uses_style_of_source_view() {
    let mut h = Harness::new();
    h.a_style = ArrayStyle {
        slot_size: Vec2::new(64.0, 32.0),
        ..Default::default()
    };
    h.pass(vec![moved(Pos2::new(1.0, 1.0))]);

    let press = h.slot(h.a, 0).center();
    h.pass(vec![moved(press), button(press, true)]);
    assert!(h.coordinator.is_dragging());
    assert_eq!(h.coordinator.ghost_style().slot_size, Vec2::new(64.0, 32.0));
}
