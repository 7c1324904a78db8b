#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use eframe::egui;
use egui_array_transfer::{
    ArrayContainerView, ContainerArena, ContainerId, DragCoordinator, Resolution, SlotAxis,
    TransferOptions,
};

struct App {
    arena: ContainerArena<i32>,
    coordinator: DragCoordinator<i32>,
    next_value: i32,
    vertical: bool,
    show_debug: bool,
    last_event: String,
}

impl Default for App {
    fn default() -> Self {
        let mut arena = ContainerArena::new();
        arena.create_container("stack", [3, 1, 4]);
        arena.create_container("queue", [1, 5]);
        arena.create_container("scratch", []);

        let options = TransferOptions {
            debug_event_log: true,
            ..Default::default()
        };

        Self {
            arena,
            coordinator: DragCoordinator::new_with_options(options),
            next_value: 9,
            vertical: false,
            show_debug: false,
            last_event: String::new(),
        }
    }
}

impl App {
    fn next_value(&mut self) -> i32 {
        // Small, readable values that still repeat now and then.
        self.next_value = (self.next_value * 7 + 3) % 50;
        self.next_value
    }

    fn container_row(&mut self, ui: &mut egui::Ui, id: ContainerId) -> bool {
        let mut destroy = false;
        let idle = !self.coordinator.is_dragging();
        let name = self
            .arena
            .get(id)
            .map(|c| format!("{} ({id})", c.name))
            .unwrap_or_default();

        ui.horizontal(|ui| {
            ui.strong(name);
            if ui.add_enabled(idle, egui::Button::new("Push")).clicked() {
                let value = self.next_value();
                self.arena.settle(id);
                self.arena.push(id, value);
            }
            if ui.add_enabled(idle, egui::Button::new("Pop")).clicked() {
                self.arena.settle(id);
                if let Some(element) = self.arena.pop(id) {
                    self.last_event = format!("popped {} from {id}", element.value);
                }
            }
            if ui.add_enabled(idle, egui::Button::new("Peek")).clicked() {
                self.arena.settle(id);
                if let Some(value) = self.arena.peek(id) {
                    self.last_event = format!("top of {id} is {value}");
                }
            }
            if ui.add_enabled(idle, egui::Button::new("Remove array")).clicked() {
                destroy = true;
            }
        });

        let axis = if self.vertical {
            SlotAxis::Vertical
        } else {
            SlotAxis::Horizontal
        };
        ArrayContainerView::new(id)
            .axis(axis)
            .show(ui, &mut self.coordinator, &mut self.arena);
        ui.add_space(12.0);

        destroy
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.coordinator.begin_frame();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let idle = !self.coordinator.is_dragging();
                if ui.add_enabled(idle, egui::Button::new("Add array")).clicked() {
                    let name = format!("array {}", self.arena.container_count() + 1);
                    self.arena.create_container(name, []);
                }
                ui.checkbox(&mut self.vertical, "Vertical");
                ui.checkbox(&mut self.show_debug, "Debug log");
                ui.separator();
                ui.label(format!("{} elements", self.arena.total_len()));
                if !self.last_event.is_empty() {
                    ui.separator();
                    ui.label(&self.last_event);
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let mut doomed = Vec::new();
                for id in self.arena.iter().map(|c| c.id).collect::<Vec<_>>() {
                    if self.container_row(ui, id) {
                        doomed.push(id);
                    }
                }
                for id in doomed {
                    self.arena.destroy_container(&mut self.coordinator, id);
                }
            });
        });

        if let Some(resolution) = self.coordinator.end_frame(ctx, &mut self.arena) {
            self.last_event = match resolution {
                Resolution::Restored { .. } => "put back".to_owned(),
                Resolution::Reordered {
                    container, from, to, ..
                } => format!("reordered {container}: {from} -> {to}"),
                Resolution::Moved {
                    from, to, to_index, ..
                } => format!("moved {from} -> {to}[{to_index}]"),
                Resolution::Discarded { element, .. } => format!("discarded {}", element.value),
            };
        }

        if self.show_debug {
            self.coordinator.ui_debug_window(ctx);
        }
    }
}

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_title("egui_array_transfer: array playground"),
        ..Default::default()
    };
    eframe::run_native(
        "egui_array_transfer: array playground",
        options,
        Box::new(|_cc| Ok(Box::new(App::default()))),
    )
}
