// app.rs - eframe host for the simulation view

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use cas_view::{CursorShape, FrameOutcome, SimulationView, Space};
use egui::{Align2, Color32, CursorIcon, FontId, Pos2, Rect, TextureHandle, TextureOptions};
use log::{error, info};
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use crate::automaton::{self, ElementaryProducer};
use crate::canvas::PixelCanvas;
use crate::settings::DesktopConfig;

/// Key that brings the view back to its initial position and zoom.
const RESET_KEY: char = 'r';

pub struct SimulationApp {
    config: DesktopConfig,
    view: SimulationView,
    canvas: PixelCanvas,
    texture: Option<TextureHandle>,
    space: Arc<RwLock<Space>>,
    running: Arc<AtomicBool>,
    runtime: Runtime,
    producer: JoinHandle<()>,
    pointer_captured: bool,
    last_error: Option<String>,
}

impl SimulationApp {
    pub fn new(config: DesktopConfig, runtime: Runtime) -> Self {
        let width = config.view.viewport.width;
        let height = config.view.viewport.height;

        let mut view = SimulationView::new(config.view_config());
        view.setup(width, height);

        let space = Arc::new(RwLock::new(automaton::new_space(&config.simulation)));
        view.set_universe(space.clone());

        let running = Arc::new(AtomicBool::new(true));
        let producer = spawn_producer(&runtime, &config, space.clone(), running.clone());

        Self {
            canvas: PixelCanvas::new(width as usize, height as usize),
            texture: None,
            view,
            space,
            running,
            runtime,
            producer,
            pointer_captured: false,
            last_error: None,
            config,
        }
    }

    /// Throws the current run away and starts from the initial condition.
    fn restart(&mut self) {
        info!("Restarting simulation");
        self.producer.abort();
        self.space = Arc::new(RwLock::new(automaton::new_space(&self.config.simulation)));
        self.view.set_universe(self.space.clone());
        self.view.reset();
        self.producer = spawn_producer(&self.runtime, &self.config, self.space.clone(), self.running.clone());
        self.last_error = None;
    }

    fn generation(&self) -> Option<usize> {
        self.space.read().ok().map(|space| space.generation())
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let running = self.running.load(Ordering::Relaxed);
            let button_text = if running { "⏸ Pause" } else { "▶ Run" };
            if ui.button(button_text).clicked() {
                self.running.store(!running, Ordering::Relaxed);
            }

            if ui.button("⟲ Restart").clicked() {
                self.restart();
            }

            if ui.button("⌖ Reset view").clicked() {
                self.view.reset();
            }

            ui.separator();

            ui.label(format!("Rule {}", self.config.simulation.rule));
            if let Some(generation) = self.generation() {
                ui.label(format!("Generation: {}", generation));
            }
            ui.label(format!("Scale: {:.2}", self.view.view_state().scale()));
            let inspector = if self.view.view_state().inspector { "on" } else { "off" };
            ui.label(format!("Inspector: {}", inspector));
            ui.label(format!("Last gesture: {:?}", self.view.interaction()));
        });

        let keys = self.config.view.keys;
        ui.label(format!(
            "Drag to pan. '{}' zoom out, '{}' zoom in, '{}' inspector, '{}' reset view.",
            keys.zoom_out, keys.zoom_in, keys.toggle_inspector, RESET_KEY
        ));
    }

    /// Forwards this frame's pointer and key events to the view.
    fn forward_input(&mut self, ctx: &egui::Context, canvas_rect: Rect) {
        let events = ctx.input(|i| i.events.clone());
        let typing = ctx.wants_keyboard_input();

        for event in events {
            match event {
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    let local = pos - canvas_rect.min;
                    if pressed && canvas_rect.contains(pos) {
                        self.pointer_captured = true;
                        self.view.on_pointer_down(local.x, local.y);
                    } else if !pressed && self.pointer_captured {
                        self.pointer_captured = false;
                        self.view.on_pointer_up(local.x, local.y);
                    }
                }
                egui::Event::Text(text) if !typing => {
                    for key in text.chars() {
                        if key == RESET_KEY {
                            self.view.reset();
                        } else {
                            self.view.on_key(key);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn upload(&mut self, ctx: &egui::Context) -> egui::TextureId {
        let image = self.canvas.to_image();
        if let Some(texture) = &mut self.texture {
            texture.set(image, TextureOptions::NEAREST);
            return texture.id();
        }
        let texture = ctx.load_texture("simulation", image, TextureOptions::NEAREST);
        let id = texture.id();
        self.texture = Some(texture);
        id
    }
}

impl eframe::App for SimulationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.heading("Cellular Automata Simulator");
            self.toolbar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let size = ui.available_size().floor();
            let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
            let rect = response.rect;

            let pixel_size = [size.x as usize, size.y as usize];
            if pixel_size != self.canvas.size() {
                self.canvas.resize(pixel_size[0], pixel_size[1]);
                self.view.setup(size.x, size.y);
            }

            self.forward_input(ctx, rect);

            let outcome = match self.view.render_frame(&mut self.canvas) {
                Ok(outcome) => outcome,
                Err(e) => {
                    if self.last_error.is_none() {
                        error!("Rendering failed: {:#}", e);
                    }
                    self.last_error = Some(format!("{:#}", e));
                    FrameOutcome::Welcome
                }
            };

            let texture = self.upload(ctx);
            let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
            painter.image(texture, rect, uv, Color32::WHITE);

            if outcome == FrameOutcome::Welcome {
                let message = self
                    .last_error
                    .as_deref()
                    .unwrap_or("Welcome! The first generation is on its way.");
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    message,
                    FontId::proportional(25.0),
                    Color32::DARK_GRAY,
                );
            }

            if response.hovered() {
                ctx.set_cursor_icon(match self.canvas.cursor() {
                    CursorShape::Default => CursorIcon::Default,
                    CursorShape::Move => CursorIcon::Move,
                    CursorShape::Crosshair => CursorIcon::Crosshair,
                });
            }
        });

        // The history keeps growing, keep drawing.
        ctx.request_repaint();
    }
}

fn spawn_producer(
    runtime: &Runtime,
    config: &DesktopConfig,
    space: Arc<RwLock<Space>>,
    running: Arc<AtomicBool>,
) -> JoinHandle<()> {
    let producer = ElementaryProducer::new(&config.simulation, running);
    runtime.spawn(async move {
        if let Err(e) = producer.run(space).await {
            error!("Producer stopped: {:#}", e);
        }
    })
}
