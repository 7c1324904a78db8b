use std::collections::BTreeMap;

use egui::{Pos2, Rect};

use super::types::ContainerId;

/// Layout direction of a container's slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SlotAxis {
    #[default]
    Horizontal,
    Vertical,
}

impl SlotAxis {
    fn along(self, pos: Pos2) -> f32 {
        match self {
            Self::Horizontal => pos.x,
            Self::Vertical => pos.y,
        }
    }
}

/// Insertion index for `pointer` among the rendered `slots` (in sequence order).
///
/// The index is the number of slot midpoints the pointer has crossed along `axis`; a pointer
/// exactly on a midpoint counts as having crossed it. With a `previous` index, the result sticks to
/// it while the pointer stays within `hysteresis` of the midpoint separating the two candidates.
///
/// Always within `0..=slots.len()`.
pub fn insertion_index(
    slots: &[Rect],
    pointer: Pos2,
    axis: SlotAxis,
    previous: Option<usize>,
    hysteresis: f32,
) -> usize {
    let p = axis.along(pointer);
    let midpoints = || slots.iter().map(|r| axis.along(r.center()));

    let candidate = midpoints().take_while(|&mid| p >= mid).count();

    let Some(previous) = previous.filter(|&prev| prev <= slots.len()) else {
        return candidate;
    };
    if previous == candidate || hysteresis <= 0.0 {
        return candidate;
    }

    // Only hold on to `previous` if the candidate is its direct neighbor; big jumps (fast moves)
    // are taken at face value.
    let boundary = if candidate == previous + 1 {
        midpoints().nth(previous)
    } else if candidate + 1 == previous {
        midpoints().nth(candidate)
    } else {
        None
    };

    match boundary {
        Some(mid) if (p - mid).abs() <= hysteresis => previous,
        _ => candidate,
    }
}

/// Which registered container is under `pointer`.
///
/// If several rects contain the pointer (nested or overlapping containers), the smallest one wins.
pub fn container_under_pointer(
    rects: &BTreeMap<ContainerId, Rect>,
    pointer: Pos2,
) -> Option<ContainerId> {
    fn area(rect: Rect) -> f32 {
        rect.width() * rect.height()
    }

    rects
        .iter()
        .filter(|(_, rect)| rect.contains(pointer))
        .min_by(|a, b| area(*a.1).total_cmp(&area(*b.1)))
        .map(|(id, _)| *id)
}

/// Lay out `count` slots of `slot_size` starting at `origin`, `spacing` apart.
pub fn slot_rects(
    origin: Pos2,
    count: usize,
    slot_size: egui::Vec2,
    spacing: f32,
    axis: SlotAxis,
) -> Vec<Rect> {
    (0..count)
        .map(|i| {
            let offset = i as f32 * (slot_extent(slot_size, axis) + spacing);
            let min = match axis {
                SlotAxis::Horizontal => origin + egui::vec2(offset, 0.0),
                SlotAxis::Vertical => origin + egui::vec2(0.0, offset),
            };
            Rect::from_min_size(min, slot_size)
        })
        .collect()
}

fn slot_extent(slot_size: egui::Vec2, axis: SlotAxis) -> f32 {
    match axis {
        SlotAxis::Horizontal => slot_size.x,
        SlotAxis::Vertical => slot_size.y,
    }
}

#[cfg(test)]
mod tests {
    use egui::{Vec2, pos2, vec2};

    use super::*;

    fn row(count: usize) -> Vec<Rect> {
        // Slots at x = 0..40, 50..90, 100..140, ... (midpoints 20, 70, 120, ...).
        slot_rects(Pos2::ZERO, count, vec2(40.0, 40.0), 10.0, SlotAxis::Horizontal)
    }

    #[test]
    fn counts_crossed_midpoints() {
        let slots = row(3);
        let at = |x: f32| insertion_index(&slots, pos2(x, 20.0), SlotAxis::Horizontal, None, 0.0);
        assert_eq!(at(-30.0), 0);
        assert_eq!(at(5.0), 0);
        assert_eq!(at(25.0), 1);
        assert_eq!(at(95.0), 2);
        assert_eq!(at(500.0), 3);
    }

    #[test]
    fn exact_midpoint_counts_as_crossed() {
        let slots = row(2);
        assert_eq!(
            insertion_index(&slots, pos2(20.0, 0.0), SlotAxis::Horizontal, None, 0.0),
            1
        );
    }

    #[test]
    fn empty_container_inserts_at_zero() {
        assert_eq!(
            insertion_index(&[], pos2(123.0, 4.0), SlotAxis::Horizontal, Some(3), 2.0),
            0
        );
    }

    #[test]
    fn hysteresis_keeps_previous_near_boundary() {
        let slots = row(3);
        // Just past the first midpoint (20): candidate 1, but previous 0 is kept.
        assert_eq!(
            insertion_index(&slots, pos2(21.0, 0.0), SlotAxis::Horizontal, Some(0), 2.0),
            0
        );
        // Well past it: switch.
        assert_eq!(
            insertion_index(&slots, pos2(30.0, 0.0), SlotAxis::Horizontal, Some(0), 2.0),
            1
        );
        // Coming back, just before the midpoint: stick with 1.
        assert_eq!(
            insertion_index(&slots, pos2(19.0, 0.0), SlotAxis::Horizontal, Some(1), 2.0),
            1
        );
        // Large jump ignores hysteresis.
        assert_eq!(
            insertion_index(&slots, pos2(121.0, 0.0), SlotAxis::Horizontal, Some(0), 50.0),
            3
        );
    }

    #[test]
    fn vertical_axis_uses_y() {
        let slots = slot_rects(Pos2::ZERO, 2, Vec2::splat(20.0), 0.0, SlotAxis::Vertical);
        assert_eq!(
            insertion_index(&slots, pos2(500.0, 25.0), SlotAxis::Vertical, None, 0.0),
            1
        );
    }

    #[test]
    fn smallest_rect_wins() {
        let mut rects = BTreeMap::new();
        rects.insert(
            ContainerId(1),
            Rect::from_min_size(Pos2::ZERO, vec2(400.0, 400.0)),
        );
        rects.insert(
            ContainerId(2),
            Rect::from_min_size(pos2(10.0, 10.0), vec2(50.0, 50.0)),
        );

        assert_eq!(
            container_under_pointer(&rects, pos2(20.0, 20.0)),
            Some(ContainerId(2))
        );
        assert_eq!(
            container_under_pointer(&rects, pos2(300.0, 300.0)),
            Some(ContainerId(1))
        );
        assert_eq!(container_under_pointer(&rects, pos2(-1.0, 0.0)), None);
    }
}
