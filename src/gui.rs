use crate::config::ViewerConfig;
use crate::{DecodeResult, ViewerError, dropped, load, save_rendered, statics};
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use std::path::{Path, PathBuf};

pub fn run_gui(config: ViewerConfig) -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 600.0])
            .with_min_inner_size([600.0, 400.0])
            .with_drag_and_drop(config.drag_and_drop),
        ..Default::default()
    };
    eframe::run_native(
        statics::EN_APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(PlistViewApp::new(config)))),
    )
}

/// Which representation of the current file the preview shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Decoded,
    Raw,
}

#[derive(Debug)]
struct LoadedFile {
    path: PathBuf,
    result: DecodeResult,
    // Rendered once per load; `None` unless the file decoded.
    rendered: Option<String>,
}

/// Everything the window shows, minus the drawing.
/// Each selection replaces `current` with a fresh load; nothing is cached across selections.
#[derive(Debug, Default)]
pub struct ViewerState {
    files: Vec<PathBuf>,
    selected: Option<usize>,
    current: Option<LoadedFile>,
    pub view_mode: ViewMode,
    status: String,
    drag_and_drop: bool,
}

impl ViewerState {
    pub fn new(initial_files: Vec<PathBuf>, drag_and_drop: bool) -> Self {
        let mut state = Self {
            drag_and_drop,
            ..Default::default()
        };
        if !drag_and_drop {
            state.status = statics::EN_STATUS_DND_UNAVAILABLE.to_string();
        }
        if !initial_files.is_empty() {
            state.replace_files(initial_files);
        }
        state
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn drag_and_drop(&self) -> bool {
        self.drag_and_drop
    }

    pub fn current(&self) -> Option<(&Path, &DecodeResult)> {
        self.current
            .as_ref()
            .map(|loaded| (loaded.path.as_path(), &loaded.result))
    }

    /// Open... semantics: the picked files replace the list and the first one is shown.
    pub fn replace_files(&mut self, paths: Vec<PathBuf>) {
        if paths.is_empty() {
            return;
        }
        self.files = paths;
        self.select(0);
    }

    /// Drop semantics: append to the list and show the last dropped file.
    /// A path that is already listed is not added again; its existing entry is selected.
    pub fn append_dropped(&mut self, paths: Vec<PathBuf>) {
        let mut target = None;
        for path in paths {
            let idx = match self.files.iter().position(|p| *p == path) {
                Some(idx) => idx,
                None => {
                    self.files.push(path);
                    self.files.len() - 1
                }
            };
            target = Some(idx);
        }

        match target {
            Some(idx) => self.select(idx),
            None => self.status = statics::EN_STATUS_NO_DROPPED_FILES.to_string(),
        }
    }

    pub fn select(&mut self, idx: usize) {
        let Some(path) = self.files.get(idx).cloned() else {
            return;
        };

        let result = load(&path);
        let rendered = result.rendered_json().ok();
        self.view_mode = if result.is_decoded() {
            ViewMode::Decoded
        } else {
            ViewMode::Raw
        };
        self.status = result.status_line(&path);
        self.selected = Some(idx);
        self.current = Some(LoadedFile {
            path,
            result,
            rendered,
        });
    }

    pub fn select_next(&mut self) {
        let next = self.selected.map_or(0, |i| i + 1);
        if next < self.files.len() {
            self.select(next);
        }
    }

    pub fn select_previous(&mut self) {
        if let Some(prev) = self.selected.and_then(|i| i.checked_sub(1)) {
            self.select(prev);
        }
    }

    /// Text for the preview pane in the current view mode.
    pub fn display_text(&self) -> &str {
        let Some(loaded) = &self.current else {
            return statics::EN_HOME_INSTRUCTIONS;
        };
        match self.view_mode {
            ViewMode::Decoded => loaded
                .rendered
                .as_deref()
                .unwrap_or(statics::EN_NO_DECODED_JSON),
            ViewMode::Raw => loaded
                .result
                .raw_text()
                .unwrap_or(statics::EN_NO_RAW_TEXT),
        }
    }

    /// The rendered JSON offered by Save JSON / Copy JSON.
    pub fn json_for_export(&self) -> Result<&str, ViewerError> {
        self.current
            .as_ref()
            .and_then(|loaded| loaded.rendered.as_deref())
            .ok_or(ViewerError::NoDecodedContent)
    }

    /// Suggested file name for Save JSON: the current file's stem with `.json`.
    pub fn export_file_name(&self) -> Option<String> {
        let loaded = self.current.as_ref()?;
        let stem = loaded.path.file_stem()?;
        Some(format!(
            "{}.{}",
            stem.to_string_lossy(),
            statics::JSON_EXTENSION
        ))
    }
}

struct PlistViewApp {
    state: ViewerState,
    dialog_dir: Option<PathBuf>,
}

impl PlistViewApp {
    fn new(config: ViewerConfig) -> Self {
        let dialog_dir = config
            .files
            .first()
            .and_then(|p| p.parent())
            .map(PathBuf::from);
        Self {
            state: ViewerState::new(config.files, config.drag_and_drop),
            dialog_dir,
        }
    }

    fn selectable_row_left(
        ui: &mut egui::Ui,
        selected: bool,
        text: &str,
        row_h: f32,
    ) -> egui::Response {
        let w = ui.available_width();
        let (rect, response) = ui.allocate_exact_size(egui::vec2(w, row_h), egui::Sense::click());
        let response = response.on_hover_cursor(egui::CursorIcon::PointingHand);

        let visuals = ui.style().interact_selectable(&response, selected);
        if ui.is_rect_visible(rect) {
            ui.painter()
                .rect_filled(rect, visuals.corner_radius, visuals.bg_fill);

            let font_id = egui::TextStyle::Button.resolve(ui.style());
            let text_pos = rect.left_center() + egui::vec2(6.0, 0.0);
            ui.painter().text(
                text_pos,
                egui::Align2::LEFT_CENTER,
                text,
                font_id,
                visuals.text_color(),
            );
        }

        response
    }

    fn show_message(title: &str, description: &str, level: rfd::MessageLevel) {
        rfd::MessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(description)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }

    fn remember_dir(&mut self, path: &Path) {
        self.dialog_dir = path.parent().map(PathBuf::from);
    }

    fn open_files(&mut self) {
        let mut dlg = rfd::FileDialog::new()
            .set_title(statics::EN_DIALOG_OPEN_TITLE)
            .add_filter(statics::EN_FILTER_PLIST, statics::PLIST_EXTENSIONS)
            .add_filter(statics::EN_FILTER_ALL, &["*"]);
        if let Some(dir) = self.dialog_dir.clone() {
            dlg = dlg.set_directory(dir);
        }

        let Some(paths) = dlg.pick_files() else {
            return;
        };
        if let Some(first) = paths.first() {
            self.remember_dir(first);
        }
        self.state.replace_files(paths);
    }

    fn save_json(&mut self) {
        let json = match self.state.json_for_export() {
            Ok(json) => json.to_string(),
            Err(_) => {
                Self::show_message(
                    statics::EN_BTN_SAVE_JSON,
                    statics::EN_MSG_NO_DECODED,
                    rfd::MessageLevel::Info,
                );
                return;
            }
        };

        let mut dlg = rfd::FileDialog::new()
            .add_filter(statics::EN_FILTER_JSON, &[statics::JSON_EXTENSION]);
        if let Some(name) = self.state.export_file_name() {
            dlg = dlg.set_file_name(name);
        }
        if let Some(dir) = self.dialog_dir.clone() {
            dlg = dlg.set_directory(dir);
        }

        let Some(path) = dlg.save_file() else {
            return;
        };

        match save_rendered(&path, &json) {
            Ok(()) => {
                self.remember_dir(&path);
                Self::show_message(
                    statics::EN_MSG_SAVED_TITLE,
                    &format!("Saved JSON to: {}", path.display()),
                    rfd::MessageLevel::Info,
                );
            }
            Err(e) => {
                log::error!("{e:#}");
                Self::show_message(
                    statics::EN_MSG_SAVE_FAILED_TITLE,
                    &format!("Failed to save: {e:#}"),
                    rfd::MessageLevel::Error,
                );
            }
        }
    }

    fn copy_json(&mut self, ctx: &egui::Context) {
        match self.state.json_for_export() {
            Ok(json) => {
                ctx.copy_text(json.to_string());
                Self::show_message(
                    statics::EN_MSG_COPIED_TITLE,
                    statics::EN_MSG_COPIED,
                    rfd::MessageLevel::Info,
                );
            }
            Err(_) => Self::show_message(
                statics::EN_BTN_COPY_JSON,
                statics::EN_MSG_NO_DECODED,
                rfd::MessageLevel::Info,
            ),
        }
    }

    fn handle_input(&mut self, ctx: &egui::Context) {
        if self.state.drag_and_drop() {
            let dropped = ctx.input(|i| i.raw.dropped_files.clone());
            if !dropped.is_empty() {
                self.state
                    .append_dropped(dropped::paths_from_dropped(&dropped));
            }
        }

        if ctx.wants_keyboard_input() {
            return;
        }

        // Pasted file paths or URIs (e.g. copied in a file manager) behave like a drop.
        let pasted: Vec<String> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|e| match e {
                    egui::Event::Paste(text) => Some(text.clone()),
                    _ => None,
                })
                .collect()
        });
        for payload in pasted {
            self.state.append_dropped(dropped::normalize(&payload));
        }

        if ctx.input(|i| i.key_pressed(egui::Key::ArrowDown)) {
            self.state.select_next();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowUp)) {
            self.state.select_previous();
        }
    }

    fn render_file_list(&mut self, ui: &mut egui::Ui) {
        let row_h = 20.0;
        let mut clicked = None;

        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::remainder().resizable(false))
            .header(row_h, |mut header| {
                header.col(|ui| {
                    ui.strong(statics::EN_HEADING_FILES);
                });
            })
            .body(|mut body| {
                for (idx, path) in self.state.files().iter().enumerate() {
                    body.row(row_h, |mut row| {
                        row.col(|ui| {
                            let name = path
                                .file_name()
                                .map(|n| n.to_string_lossy().into_owned())
                                .unwrap_or_else(|| path.display().to_string());
                            let selected = self.state.selected() == Some(idx);
                            let response = Self::selectable_row_left(ui, selected, &name, row_h)
                                .on_hover_text(path.display().to_string());
                            if response.clicked() {
                                clicked = Some(idx);
                            }
                        });
                    });
                }
            });

        if let Some(idx) = clicked {
            self.state.select(idx);
        }
    }
}

impl eframe::App for PlistViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                if ui.button(statics::EN_BTN_OPEN).clicked() {
                    self.open_files();
                }
                if ui.button(statics::EN_BTN_SAVE_JSON).clicked() {
                    self.save_json();
                }
                if ui.button(statics::EN_BTN_COPY_JSON).clicked() {
                    self.copy_json(ctx);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.radio_value(
                        &mut self.state.view_mode,
                        ViewMode::Decoded,
                        statics::EN_VIEW_DECODED,
                    );
                    ui.radio_value(
                        &mut self.state.view_mode,
                        ViewMode::Raw,
                        statics::EN_VIEW_RAW,
                    );
                });
            });
        });

        // The bottom status bar must be shown before side/central panels so it reserves
        // space across the full window width.
        egui::TopBottomPanel::bottom("bottom_status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.state.status());
            });
        });

        egui::SidePanel::left("files_panel")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                self.render_file_list(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.strong(statics::EN_HEADING_PREVIEW);
            ui.separator();

            let hovering =
                self.state.drag_and_drop() && ctx.input(|i| !i.raw.hovered_files.is_empty());
            if hovering {
                ui.centered_and_justified(|ui| {
                    ui.heading(statics::EN_DROP_HINT);
                });
                return;
            }

            egui::ScrollArea::both()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let mut text = self.state.display_text();
                    ui.add(
                        egui::TextEdit::multiline(&mut text)
                            .font(egui::TextStyle::Monospace)
                            .desired_width(f32::INFINITY),
                    );
                });
        });
    }
}
