use crate::identifier::core::{ImageReference, Model, Msg};
use crate::identifier::render::{view, MainView, ResultsView, ViewModel};
use eframe::egui;
use std::collections::HashMap;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn run_ui(model: Arc<Mutex<Model>>, msg_sender: Sender<Msg>) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([720.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Image Identification",
        options,
        Box::new(move |_cc| Box::new(IdentifierApp::new(model, msg_sender))),
    )
}

struct IdentifierApp {
    model: Arc<Mutex<Model>>,
    msg_sender: Sender<Msg>,
    url_input: String,
    // Upload previews keyed by the allocation identity of their bytes.
    textures: HashMap<usize, egui::TextureHandle>,
}

impl IdentifierApp {
    fn new(model: Arc<Mutex<Model>>, msg_sender: Sender<Msg>) -> Self {
        Self {
            model,
            msg_sender,
            url_input: String::new(),
            textures: HashMap::new(),
        }
    }

    fn send(&self, msg: Msg) {
        let _ = self.msg_sender.send(msg);
    }

    fn show_main(&mut self, ui: &mut egui::Ui, main: &MainView) {
        ui.vertical_centered(|ui| {
            ui.heading("Image Identification");
        });
        ui.add_space(12.0);

        ui.horizontal(|ui| {
            if ui.button("Upload Image").clicked() {
                self.pick_file();
            }
            ui.label("OR");
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.url_input).hint_text("Paste image URL"),
            );
            if response.changed() {
                self.send(Msg::UrlChanged(self.url_input.clone()));
            }
        });

        ui.add_space(12.0);

        if let Some(reference) = main.image.clone() {
            self.show_image(ui, &reference);
            ui.add_space(8.0);
            if main.can_identify && ui.button("Identify Image").clicked() {
                self.send(Msg::IdentifyRequested);
            }
        }

        ui.add_space(8.0);
        self.show_results(ui, &main.results);

        if let Some(error) = &main.error {
            ui.add_space(8.0);
            ui.colored_label(egui::Color32::RED, error);
        }

        if !main.history.is_empty() {
            ui.add_space(12.0);
            ui.separator();
            ui.label("Recent Images");
            self.show_history(ui, &main.history);
        }
    }

    fn pick_file(&self) {
        let picked = rfd::FileDialog::new()
            .add_filter("image", &["png", "jpg", "jpeg", "gif", "bmp", "webp"])
            .pick_file();

        // Cancelling the dialog leaves the current selection untouched.
        if let Some(path) = picked {
            match std::fs::read(&path) {
                Ok(bytes) => {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
                    self.send(Msg::FilePicked {
                        name,
                        bytes: Arc::new(bytes),
                    });
                }
                Err(_) => self.send(Msg::FileSelectionCleared),
            }
        }
    }

    fn show_image(&mut self, ui: &mut egui::Ui, reference: &ImageReference) {
        match reference {
            ImageReference::Upload { name, bytes } => {
                match self.upload_texture(ui.ctx(), name, bytes) {
                    Some(texture) => {
                        ui.add(
                            egui::Image::new(&texture)
                                .max_width(360.0)
                                .max_height(280.0),
                        );
                    }
                    None => {
                        ui.label(format!("Could not preview {}", name));
                    }
                }
            }
            ImageReference::Url(url) => {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.label(egui::RichText::new(url.clone()).monospace());
                });
            }
        }
    }

    fn show_results(&self, ui: &mut egui::Ui, results: &ResultsView) {
        match results {
            ResultsView::Empty => {}
            ResultsView::LoadingResults => {
                ui.horizontal(|ui| {
                    ui.add(egui::Spinner::new());
                    ui.label("Loading Results...");
                });
            }
            ResultsView::Candidates(rows) => {
                for row in rows {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(&row.label).strong());
                        ui.label(format!("{:.2}%", row.percent));
                        if row.best_guess {
                            ui.label(
                                egui::RichText::new("Best Guess")
                                    .color(egui::Color32::DARK_GREEN)
                                    .strong(),
                            );
                        }
                    });
                }
            }
        }
    }

    fn show_history(&mut self, ui: &mut egui::Ui, history: &[ImageReference]) {
        egui::ScrollArea::horizontal().show(ui, |ui| {
            ui.horizontal(|ui| {
                for (index, reference) in history.iter().enumerate() {
                    let clicked = match reference {
                        ImageReference::Upload { name, bytes } => {
                            match self.upload_texture(ui.ctx(), name, bytes) {
                                Some(texture) => ui
                                    .add(egui::ImageButton::new(
                                        egui::Image::new(&texture)
                                            .fit_to_exact_size(egui::vec2(72.0, 72.0)),
                                    ))
                                    .clicked(),
                                None => ui.button(truncate_label(name)).clicked(),
                            }
                        }
                        ImageReference::Url(url) => ui.button(truncate_label(url)).clicked(),
                    };
                    if clicked {
                        self.send(Msg::HistorySelected(index));
                    }
                }
            });
        });
    }

    fn upload_texture(
        &mut self,
        ctx: &egui::Context,
        name: &str,
        bytes: &Arc<Vec<u8>>,
    ) -> Option<egui::TextureHandle> {
        let key = Arc::as_ptr(bytes) as usize;
        if let Some(texture) = self.textures.get(&key) {
            return Some(texture.clone());
        }

        let decoded = image::load_from_memory(bytes).ok()?;
        let rgba = decoded.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        let color_image =
            egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_flat_samples().as_slice());

        let texture = ctx.load_texture(name.to_string(), color_image, egui::TextureOptions::LINEAR);
        self.textures.insert(key, texture.clone());
        Some(texture)
    }
}

impl eframe::App for IdentifierApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // The reducer loop runs on its own thread; poll its snapshot.
        ctx.request_repaint_after(Duration::from_millis(100));

        let snapshot = self.model.lock().unwrap().clone();
        let view_model = view(&snapshot);

        egui::CentralPanel::default().show(ctx, |ui| match &view_model {
            ViewModel::LoadingModels => {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.add(egui::Spinner::new().size(48.0));
                    ui.add_space(12.0);
                    ui.label("Loading Models...");
                });
            }
            ViewModel::LoadFailed => {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.colored_label(
                        egui::Color32::RED,
                        "The classification models failed to load. Restart to try again.",
                    );
                });
            }
            ViewModel::Main(main) => self.show_main(ui, main),
        });
    }
}

fn truncate_label(text: &str) -> String {
    const MAX: usize = 24;
    if text.chars().count() > MAX {
        let prefix: String = text.chars().take(MAX).collect();
        format!("{}...", prefix)
    } else {
        text.to_string()
    }
}
