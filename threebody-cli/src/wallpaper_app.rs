//! Animated wallpaper window for the three-body simulation
//!
//! Draws fading trails and glowing heads for each body, resets on click and
//! reloads the configuration file whenever it changes on disk.

use eframe::egui;
use notify::{Event, RecommendedWatcher, Watcher};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Instant;
use threebody_core::{Rgb, Simulation, Viewport};

/// Radius of a body's solid core, in pixels
const BODY_RADIUS: f32 = 6.0;

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(8, 10, 18);

const HINT: &str = "Three-body wallpaper · click to reset";

/// Wallpaper application state
pub struct WallpaperApp {
    config_path: Option<PathBuf>,
    sim_opt: Option<Simulation>,
    last_load_error: Option<String>,
    time_scale: f64,
    last_frame: Instant,
    sized: bool,
    frame_seed: f64,
    #[allow(dead_code)] // Kept alive to maintain file watching
    file_watcher: Option<RecommendedWatcher>,
    file_receiver: mpsc::Receiver<notify::Result<Event>>,
    needs_reload: bool,
}

impl WallpaperApp {
    pub fn new(config_path: Option<PathBuf>, _cc: &eframe::CreationContext<'_>) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut watcher = None;

        if let Some(path) = &config_path {
            watcher = notify::recommended_watcher(move |res| {
                // Receiver may already be gone during shutdown
                let _ = tx.send(res);
            })
            .ok();

            if let Some(ref mut w) = watcher {
                if let Err(e) = w.watch(path, notify::RecursiveMode::NonRecursive) {
                    log::warn!("not watching {}: {}", path.display(), e);
                }
            }
        }

        let mut app = Self {
            config_path,
            sim_opt: None,
            last_load_error: None,
            time_scale: 0.7,
            last_frame: Instant::now(),
            sized: false,
            frame_seed: 0.0,
            file_watcher: watcher,
            file_receiver: rx,
            needs_reload: false,
        };

        app.reload_simulation(Viewport::default());

        app
    }

    fn reload_simulation(&mut self, viewport: Viewport) {
        let was_running = self.sim_opt.as_ref().map_or(true, Simulation::is_running);

        let loaded = crate::load_config(self.config_path.as_deref())
            .and_then(|config| Ok(Simulation::new(config, viewport)?));

        match loaded {
            Ok(mut sim) => {
                if !was_running {
                    sim.stop();
                }
                self.time_scale = sim.config().time_scale;
                self.sim_opt = Some(sim);
                self.last_load_error = None;
            }
            Err(e) => {
                log::error!("failed to load configuration: {}", e);
                self.last_load_error = Some(format!("{}", e));
                self.sim_opt = None;
            }
        }
    }

    fn check_file_changes(&mut self, viewport: Viewport) {
        while let Ok(event) = self.file_receiver.try_recv() {
            match event {
                // only the configuration file is watched
                Ok(Event {
                    kind: notify::EventKind::Modify(_) | notify::EventKind::Create(_),
                    ..
                }) => {
                    self.needs_reload = true;
                }
                Ok(_) => {}
                Err(e) => {
                    log::warn!("file watcher error: {}", e);
                }
            }
        }

        if self.needs_reload {
            log::info!("configuration changed, reloading");
            self.reload_simulation(viewport);
            self.needs_reload = false;
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if let Some(sim) = self.sim_opt.as_mut() {
                let label = if sim.is_running() { "⏸ Stop" } else { "▶ Start" };
                if ui.button(label).clicked() {
                    sim.toggle();
                }

                if ui.button("⏮ Reset").clicked() {
                    sim.reset();
                }

                if ui.button("⏭ Step").clicked() {
                    let dt = sim.config().max_substep;
                    sim.step(dt);
                }

                ui.separator();

                ui.label("Time scale:");
                ui.add(egui::Slider::new(&mut self.time_scale, 0.2..=2.0));

                ui.separator();

                ui.label(format!("t = {:.1}s", sim.elapsed()));
            }
        });
    }

    fn draw_scene(&self, painter: &egui::Painter, rect: egui::Rect) {
        painter.rect_filled(rect, 0.0, BACKGROUND);

        // faint drifting star field
        for i in 0..4 {
            let i = i as f64;
            let sx = ((self.frame_seed + i * 12.3).sin() * 0.5 + 0.5) as f32 * rect.width();
            let sy = ((self.frame_seed * 1.7 + i * 7.9).cos() * 0.5 + 0.5) as f32 * rect.height();
            painter.circle_filled(
                rect.min + egui::vec2(sx, sy),
                0.9,
                egui::Color32::from_white_alpha(24),
            );
        }

        let Some(sim) = self.sim_opt.as_ref() else {
            return;
        };

        let to_screen = |p: glam::DVec2| rect.min + egui::vec2(p.x as f32, p.y as f32);

        for body in sim.snapshot() {
            let points: Vec<egui::Pos2> = body.trail.iter().map(to_screen).collect();
            let segments = points.len().saturating_sub(1).max(1) as f32;
            for (k, pair) in points.windows(2).enumerate() {
                // older segments fade out
                let alpha = (200.0 * (k + 1) as f32 / segments) as u8;
                painter.line_segment(
                    [pair[0], pair[1]],
                    egui::Stroke::new(2.0, color(body.color, alpha)),
                );
            }

            let head = to_screen(body.trail.latest().unwrap_or(body.position));
            painter.circle_filled(head, BODY_RADIUS * 3.0, color(body.color, 20));
            painter.circle_filled(head, BODY_RADIUS * 2.2, color(body.color, 50));
            painter.circle_filled(head, BODY_RADIUS, color(body.color, 242));
        }

        painter.text(
            rect.right_bottom() - egui::vec2(8.0, 8.0),
            egui::Align2::RIGHT_BOTTOM,
            HINT,
            egui::FontId::monospace(12.0),
            egui::Color32::from_white_alpha(200),
        );
    }
}

fn color(rgb: Rgb, alpha: u8) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(rgb.0, rgb.1, rgb.2, alpha)
}

impl eframe::App for WallpaperApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f64();
        self.last_frame = now;

        egui::TopBottomPanel::top("controls").show(ctx, |ui| self.controls(ui));

        if self.last_load_error.is_some() {
            egui::TopBottomPanel::bottom("errors").show(ctx, |ui| {
                ui.set_max_height(100.0);
                if let Some(ref error) = self.last_load_error {
                    ui.label(
                        egui::RichText::new(format!("Error: {}", error))
                            .color(egui::Color32::RED),
                    );
                }
            });
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::click());
                let rect = response.rect;
                let viewport = Viewport::new(rect.width() as f64, rect.height() as f64);

                self.check_file_changes(viewport);

                if let Some(sim) = self.sim_opt.as_mut() {
                    sim.resize(viewport);
                    // the first frame reveals the real canvas size
                    if !self.sized {
                        sim.reset();
                        self.sized = true;
                    }

                    if response.clicked() || ctx.input(|i| i.key_pressed(egui::Key::R)) {
                        sim.reset();
                    }
                    if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
                        sim.toggle();
                    }

                    sim.advance(dt, self.time_scale);
                }

                self.draw_scene(&painter, rect);
            });

        self.frame_seed += 0.002;

        if self.sim_opt.as_ref().is_some_and(Simulation::is_running) {
            ctx.request_repaint();
        }
    }
}
