pub mod egui_app;
