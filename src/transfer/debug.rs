use std::collections::VecDeque;

use egui::Context;

use super::coordinator::DragCoordinator;

/// Bounded in-memory event log, one line per coordinator event, prefixed with the frame number.
#[derive(Debug, Default)]
pub(super) struct DebugLog {
    lines: VecDeque<String>,
}

impl DebugLog {
    pub(super) fn push(&mut self, capacity: usize, frame: u64, message: String) {
        let cap = capacity.clamp(1, 10_000);
        while self.lines.len() >= cap {
            self.lines.pop_front();
        }
        self.lines.push_back(format!("[frame {frame}] {message}"));
    }

    pub(super) fn clear(&mut self) {
        self.lines.clear();
    }

    #[cfg(test)]
    pub(super) fn len(&self) -> usize {
        self.lines.len()
    }

    pub(super) fn text(&self) -> String {
        self.lines.iter().cloned().collect::<Vec<_>>().join("\n")
    }
}

impl<T> DragCoordinator<T> {
    pub(super) fn debug_log_event(&mut self, message: impl Into<String>) {
        if !self.options.debug_event_log {
            return;
        }
        let capacity = self.options.debug_event_log_capacity;
        self.debug_log.push(capacity, self.frame, message.into());
    }

    pub(super) fn debug_integrity_log_event(&mut self, message: impl Into<String>) {
        if !self.options.debug_integrity {
            return;
        }
        let capacity = self.options.debug_event_log_capacity;
        self.debug_log.push(capacity, self.frame, message.into());
    }

    /// Everything recorded so far, one event per line.
    pub fn debug_log_text(&self) -> String {
        self.debug_log.text()
    }

    pub fn debug_log_clear(&mut self) {
        self.debug_log.clear();
    }

    /// A small window showing the current session and the event log.
    pub fn ui_debug_window(&mut self, ctx: &Context)
    where
        T: std::fmt::Debug,
    {
        let session_text = match self.session() {
            Some(session) => format!(
                "session id={} source={} index={} element={:?} hover={:?} moved={}",
                session.id(),
                session.source(),
                session.source_index(),
                session.element().value,
                session.hover(),
                session.has_moved()
            ),
            None => "no active session".to_owned(),
        };
        let log_text = self.debug_log_text();
        let mut clear = false;

        egui::Window::new("Transfer Debug")
            .id(egui::Id::new("egui_array_transfer_debug_window"))
            .default_pos(egui::Pos2::new(12.0, 12.0))
            .resizable(true)
            .show(ctx, |ui| {
                ui.label(session_text);
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Copy event log").clicked() {
                        ctx.copy_text(log_text.clone());
                    }
                    if ui.button("Clear event log").clicked() {
                        clear = true;
                    }
                });
                ui.separator();
                egui::ScrollArea::vertical()
                    .id_salt("event_log")
                    .max_height(240.0)
                    .show(ui, |ui| {
                        ui.label(log_text);
                    });
            });

        if clear {
            self.debug_log_clear();
        }
    }
}
