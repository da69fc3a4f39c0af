use std::f32::consts::PI;

use egui::{Color32, Pos2, Rect, Stroke};

use crate::config::{DegeneratePolicy, SimulationConfig, VIEW_EXTENT};
use crate::simulation::{AnyFrame, AnySimulation};

/// On-screen radius, in points, of a bubble with unit marker area.
const MARKER_SCALE: f32 = 3.0;

/// Only the configuration and view survive a restart; the bubbles are
/// re-created every time the app starts.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct BubblesApp {
    config: SimulationConfig,
    /// Rotation of the 3D view around the vertical axis, in radians.
    yaw: f32,

    #[serde(skip)]
    simulation: Option<AnySimulation>,
    #[serde(skip)]
    frame: Option<AnyFrame>,
    #[serde(skip)]
    status: Option<String>,
    #[serde(skip)]
    paused: bool,
    #[serde(skip)]
    last_tick: f64,
}

impl Default for BubblesApp {
    fn default() -> Self {
        Self {
            config: SimulationConfig::default(),
            yaw: 0.0,
            simulation: None,
            frame: None,
            status: None,
            paused: false,
            last_tick: 0.0,
        }
    }
}

impl BubblesApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app: Self = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        app.restart();
        app
    }

    fn restart(&mut self) {
        self.frame = None;
        self.status = None;
        self.simulation = match AnySimulation::new(self.config.clone()) {
            Ok(sim) => {
                match sim.snapshot() {
                    Ok(frame) => self.frame = Some(frame),
                    Err(err) => self.status = Some(err.to_string()),
                }
                Some(sim)
            }
            Err(err) => {
                log::warn!("cannot start simulation: {}", err);
                self.status = Some(err.to_string());
                None
            }
        };
    }

    fn step(&mut self) {
        let Some(sim) = self.simulation.as_mut() else {
            return;
        };
        match sim.tick() {
            Ok(frame) => self.frame = Some(frame),
            Err(err) => {
                log::error!("simulation stopped: {}", err);
                self.status = Some(format!("stopped: {}", err));
                self.simulation = None;
            }
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Simulation");
        ui.horizontal(|ui| {
            ui.radio_value(&mut self.config.dimensions, 2, "2D");
            ui.radio_value(&mut self.config.dimensions, 3, "3D");
        });
        ui.add(egui::Slider::new(&mut self.config.count, 3..=200).text("Bubbles"));
        ui.add(
            egui::Slider::new(&mut self.config.position_scale, 1.0..=20.0)
                .text("Position scale"),
        );
        ui.add(egui::Slider::new(&mut self.config.size_min, 0.1..=5.0).text("Min size"));
        ui.add(egui::Slider::new(&mut self.config.size_max, 0.1..=5.0).text("Max size"));
        ui.add(egui::Slider::new(&mut self.config.frames, 1..=10_000).text("Frames"));
        ui.add(
            egui::Slider::new(&mut self.config.frame_interval_ms, 5..=500)
                .text("Frame interval (ms)"),
        );

        ui.horizontal(|ui| {
            let mut fixed = self.config.seed.is_some();
            ui.checkbox(&mut fixed, "Seed");
            if fixed {
                let mut seed = self.config.seed.unwrap_or(1);
                ui.add(egui::DragValue::new(&mut seed).speed(1));
                self.config.seed = Some(seed);
            } else {
                self.config.seed = None;
            }
        });

        let mut skip = self.config.on_degenerate == DegeneratePolicy::SkipFrame;
        if ui.checkbox(&mut skip, "Skip degenerate frames").changed() {
            self.config.on_degenerate = if skip {
                DegeneratePolicy::SkipFrame
            } else {
                DegeneratePolicy::Abort
            };
        }

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Restart").clicked() {
                self.restart();
            }
            let label = if self.paused { "Resume" } else { "Pause" };
            if ui.button(label).clicked() {
                self.paused = !self.paused;
            }
            if ui.button("Step").clicked() {
                self.step();
            }
        });
        if self.config.dimensions == 3 {
            ui.add(egui::Slider::new(&mut self.yaw, -PI..=PI).text("View yaw"));
        }

        ui.separator();
        if let Some(frame) = &self.frame {
            ui.label(format!(
                "Frame {} / {} | {} simplices | {} edges",
                frame.index(),
                self.config.frames,
                frame.simplex_count(),
                frame.edges().len()
            ));
            let negative = frame.sizes().iter().filter(|s| **s < 0.0).count();
            if negative > 0 {
                ui.label(format!("{} bubbles have negative size", negative));
            }
        }
        if let Some(status) = &self.status {
            ui.colored_label(Color32::RED, status.as_str());
        }
    }

    fn draw(&self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::hover());
        let side = response.rect.width().min(response.rect.height());
        let view = Rect::from_center_size(response.rect.center(), egui::vec2(side, side));
        let painter = painter.with_clip_rect(view);
        painter.rect_filled(view, 0.0, Color32::WHITE);

        let Some(frame) = &self.frame else {
            return;
        };

        let px_per_unit = side / (2.0 * VIEW_EXTENT as f32);
        let to_screen = |p: [f64; 2]| {
            Pos2::new(
                view.center().x + p[0] as f32 * px_per_unit,
                view.center().y - p[1] as f32 * px_per_unit,
            )
        };
        let points: Vec<Pos2> = display_points(frame, self.yaw)
            .into_iter()
            .map(to_screen)
            .collect();

        let edge_stroke = Stroke::new(1.0, Color32::BLACK);
        for [a, b] in frame.edges() {
            painter.line_segment([points[a], points[b]], edge_stroke);
        }

        let areas = match frame {
            AnyFrame::Planar(f) => f.marker_areas(),
            AnyFrame::Spatial(f) => f.marker_areas(),
        };
        let fill = Color32::from_rgba_unmultiplied(31, 119, 180, 160);
        for (center, area) in points.iter().zip(areas) {
            let radius = area.sqrt() as f32 * MARKER_SCALE;
            painter.circle(*center, radius, fill, Stroke::NONE);
        }
    }
}

/// Positions on the display plane. 3D frames are turned by `yaw` around
/// the vertical axis before dropping depth.
fn display_points(frame: &AnyFrame, yaw: f32) -> Vec<[f64; 2]> {
    match frame {
        AnyFrame::Planar(f) => f.projected_xy(),
        AnyFrame::Spatial(f) => {
            let (sin, cos) = (yaw as f64).sin_cos();
            f.positions
                .iter()
                .map(|p| [p[0] * cos + p[2] * sin, p[1]])
                .collect()
        }
    }
}

impl eframe::App for BubblesApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let interval = self.config.frame_interval();
        let running = !self.paused
            && self
                .simulation
                .as_ref()
                .is_some_and(|sim| !sim.is_finished());

        if running {
            let now = ctx.input(|i| i.time);
            if now - self.last_tick >= interval.as_secs_f64() {
                self.last_tick = now;
                self.step();
            }
            ctx.request_repaint_after(interval);
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.heading("Bubbles");
            ui.label("Random-walking bubbles with their Delaunay triangulation redrawn every frame.");
        });

        egui::SidePanel::left("controls").show(ctx, |ui| self.controls(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw(ui));

        if ctx.input(|i| {
            i.key_pressed(egui::Key::R) && i.modifiers.matches_logically(egui::Modifiers::CTRL)
        }) {
            self.restart();
        }
    }
}
