mod config;
mod device;
mod error;
mod schema;
mod session;

use eframe::egui;
use eframe::egui::Color32;
use tracing::{info, error};
use tracing_subscriber::{fmt, EnvFilter};

use std::path::PathBuf;

const WINDOW_TITLE: &str = "ESP32 NVS Manager";

fn initial_port(configured: Option<String>, ports: &[String]) -> String {
    configured
        .or_else(|| ports.first().cloned())
        .unwrap_or_default()
}

struct ManagerApp {
    ports: Vec<String>,
    selected_port: String,
    session: session::Session,
    status: String,
    status_is_error: bool,
}

impl ManagerApp {
    fn new(cfg: config::Config) -> Self {
        let ports = device::list_ports();
        let selected_port = initial_port(cfg.device, &ports);

        ManagerApp {
            ports,
            selected_port,
            session: session::Session::default(),
            status: String::new(),
            status_is_error: false,
        }
    }

    fn set_status(&mut self, text: impl Into<String>, is_error: bool) {
        self.status = text.into();
        self.status_is_error = is_error;
    }

    fn toggle_connection(&mut self) {
        if self.session.is_connected() {
            self.session.disconnect();
            info!("Disconnected");
            self.set_status("Disconnected", false);
            return;
        }

        if let Err(e) = self.session.connect(&self.selected_port) {
            error!("{}", e);
            self.set_status(e.to_string(), true);
            return;
        }

        match self.session.fetch_schema() {
            Ok(()) => {
                info!(
                    "Loaded {} parameters from {}",
                    self.session.schema.len(),
                    self.selected_port
                );
                self.set_status(format!("Connected to {}", self.selected_port), false);
            }
            Err(e) => {
                error!("{}", e);
                self.set_status(e.to_string(), true);
            }
        }
    }

    fn save_all(&mut self) {
        match self.session.save_all() {
            Ok(()) => {
                info!("Saved {} parameters", self.session.schema.len());
                self.set_status("All settings saved and applied!", false);
            }
            Err(e) => {
                error!("{}", e);
                self.set_status(e.to_string(), true);
            }
        }
    }
}

impl eframe::App for ManagerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Refresh").clicked() {
                    self.ports = device::list_ports();
                }

                let ports = self.ports.clone();
                egui::ComboBox::from_label("")
                    .selected_text(self.selected_port.clone())
                    .show_ui(ui, |ui| {
                        for port in ports.iter() {
                            ui.selectable_value(&mut self.selected_port, port.clone(), port);
                        }
                    });

                if self.session.is_connected() {
                    if ui.button("Disconnect").clicked() {
                        self.toggle_connection();
                    }
                } else {
                    let connect = egui::Button::new("Connect");
                    if ui.add_enabled(!self.selected_port.is_empty(), connect).clicked() {
                        self.toggle_connection();
                    }
                }
            });

            ui.separator();
            ui.heading("Device Parameters");

            egui::ScrollArea::vertical().show(ui, |ui| {
                egui::Grid::new("parameters").num_columns(3).show(ui, |ui| {
                    let session = &mut self.session;
                    for p in &session.schema {
                        ui.label(&p.label);
                        if let Some(text) = session.edits.get_mut(&p.key) {
                            ui.text_edit_singleline(text);
                        }
                        ui.label(
                            egui::RichText::new(p.range_hint().unwrap_or_default())
                                .color(Color32::GRAY),
                        );
                        ui.end_row();
                    }
                });
            });

            ui.separator();

            let can_save = self.session.is_connected() && !self.session.schema.is_empty();
            let save = egui::Button::new(egui::RichText::new("Save All").color(Color32::WHITE))
                .fill(Color32::DARK_GREEN);
            if ui.add_enabled(can_save, save).clicked() {
                self.save_all();
            }

            if !self.status.is_empty() {
                let color = if self.status_is_error {
                    Color32::RED
                } else {
                    Color32::GREEN
                };
                ui.label(egui::RichText::new(self.status.clone()).color(color));
            }
        });
    }
}

fn init_tracing() {
    fmt()
        .with_env_filter(EnvFilter::new("info"))
        .init();
}

fn main() {
    init_tracing();

    let cfg = match config::read_config(&PathBuf::from("./config.json")) {
        Ok(cfg) => cfg,
        Err(e) => {
            panic!("Startup error: {}", e);
        },
    };

    let app = ManagerApp::new(cfg);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([480.0, 420.0]),
        ..Default::default()
    };

    info!("Starting {}", WINDOW_TITLE);

    let _ = eframe::run_native(WINDOW_TITLE, options, Box::new(|_cc| Box::new(app)));
}
