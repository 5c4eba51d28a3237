use eframe::egui;
use image::DynamicImage;
use web_time::Instant;

use photo_filter_lab::config::{StudioConfig, ThemeChoice};
use photo_filter_lab::error::ImageIoError;
use photo_filter_lab::filter::{Filter, SwapPreset};
use photo_filter_lab::image_io;
use photo_filter_lab::session::{ImageSession, Outcome};

/// Side panel buttons, in display order.
#[derive(Debug, Clone, Copy)]
enum Control {
    Filter(Filter),
    Swap(SwapPreset),
    ClearChanges,
    Download,
}

const CONTROLS: &[Control] = &[
    Control::Filter(Filter::Grayscale),
    Control::Filter(Filter::Sepia),
    Control::Filter(Filter::Invert),
    Control::Filter(Filter::SmartInvert),
    Control::Swap(SwapPreset::Rbg),
    Control::Swap(SwapPreset::Bgr),
    Control::Swap(SwapPreset::Gbr),
    Control::Swap(SwapPreset::Grb),
    Control::Filter(Filter::PreservePrimaryColors),
    Control::Filter(Filter::ColorBoost),
    Control::Filter(Filter::HighContrast),
    Control::Filter(Filter::BlueTone),
    Control::ClearChanges,
    Control::Download,
];

impl Control {
    fn label(self) -> &'static str {
        match self {
            Control::Filter(f) => f.name(),
            Control::Swap(p) => p.name(),
            Control::ClearChanges => "Clear Changes",
            Control::Download => "Download",
        }
    }
}

pub struct FilterStudioApp {
    session: ImageSession,
    config: StudioConfig,
    preview_texture: Option<egui::TextureHandle>,
    needs_redraw: bool,
    /// Last measured size of the image frame; the loader fits images into it.
    frame_size: Option<egui::Vec2>,
    popup: Option<(String, Instant)>,
    confirm_remove: bool,
    light_theme: bool,
}

impl FilterStudioApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = StudioConfig::default();
        let light_theme = match config.theme {
            ThemeChoice::Light => true,
            ThemeChoice::Dark => false,
            ThemeChoice::System => cc.egui_ctx.system_theme() == Some(egui::Theme::Light),
        };
        set_theme(&cc.egui_ctx, light_theme);

        let mut app = Self {
            session: ImageSession::new(),
            config,
            preview_texture: None,
            needs_redraw: false,
            frame_size: None,
            popup: None,
            confirm_remove: false,
            light_theme,
        };
        if app.config.theme == ThemeChoice::System {
            let detected = if light_theme {
                ThemeChoice::Light
            } else {
                ThemeChoice::Dark
            };
            app.show_popup(format!("Auto theme detected: {}", detected.name()));
        }
        app
    }

    fn show_popup(&mut self, msg: impl Into<String>) {
        self.popup = Some((msg.into(), Instant::now()));
    }

    fn open_image(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tiff", "tif"])
            .pick_file()
        {
            let decoded = image_io::load_image(&path);
            self.load_decoded(decoded);
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.first().cloned());
        let Some(file) = dropped else {
            return;
        };
        let decoded = if let Some(path) = &file.path {
            image_io::load_image(path)
        } else if let Some(bytes) = &file.bytes {
            image_io::decode_image(bytes)
        } else {
            return;
        };
        self.load_decoded(decoded);
    }

    fn load_decoded(&mut self, decoded: Result<DynamicImage, ImageIoError>) {
        let (frame_w, frame_h) = match self.frame_size {
            Some(size) => (size.x.max(1.0) as u32, size.y.max(1.0) as u32),
            None => (self.config.frame_width, self.config.frame_height),
        };
        let fitted = decoded.and_then(|img| {
            image_io::fit_to_frame(&img, frame_w, frame_h, self.config.fit_margin)
        });
        match fitted {
            Ok(buffer) => {
                self.session.load(buffer);
                self.needs_redraw = true;
            }
            Err(e) => {
                log::error!("Error loading image: {e}");
                self.show_popup(format!("Could not load image: {e}"));
            }
        }
    }

    fn run_control(&mut self, control: Control) {
        let outcome = match control {
            Control::Filter(f) => self.session.apply(f),
            Control::Swap(p) => self.session.apply(p),
            Control::ClearChanges => self.session.revert(),
            Control::Download => {
                self.download();
                return;
            }
        };
        if outcome == Outcome::Done {
            self.needs_redraw = true;
        }
    }

    fn download(&mut self) {
        let snapshot = match self.session.export_snapshot() {
            Ok(buf) => buf,
            Err(e) => {
                self.show_popup(e.to_string());
                return;
            }
        };
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name(self.config.export_file_name.as_str())
            .save_file()
        {
            if let Err(e) = image_io::save_png(&snapshot, &path) {
                log::error!("Error saving image: {e}");
                self.show_popup(format!("Could not save image: {e}"));
            }
        }
    }

    fn request_remove(&mut self) {
        if self.session.is_loaded() {
            self.confirm_remove = true;
        } else {
            self.session.reset();
        }
    }

    fn redraw(&mut self, ctx: &egui::Context) {
        self.preview_texture = self.session.current().map(|buf| {
            let size = [buf.width() as usize, buf.height() as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, buf.samples());
            ctx.load_texture("preview", color_image, egui::TextureOptions::LINEAR)
        });
    }

    fn ui_confirm_remove(&mut self, ctx: &egui::Context) {
        if !self.confirm_remove {
            return;
        }
        egui::Window::new("Remove photo")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Are you sure you want to remove the photo?");
                ui.horizontal(|ui| {
                    if ui.button("Remove").clicked() {
                        self.session.reset();
                        self.needs_redraw = true;
                        self.confirm_remove = false;
                    }
                    if ui.button("Cancel").clicked() {
                        self.confirm_remove = false;
                    }
                });
            });
    }

    fn ui_popup(&mut self, ctx: &egui::Context) {
        let Some((msg, shown_at)) = &self.popup else {
            return;
        };
        let elapsed = shown_at.elapsed();
        if elapsed >= self.config.notice_duration {
            self.popup = None;
            return;
        }
        egui::Area::new(egui::Id::new("notice_popup"))
            .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -24.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(msg.as_str());
                });
            });
        ctx.request_repaint_after(self.config.notice_duration - elapsed);
    }
}

fn set_theme(ctx: &egui::Context, light: bool) {
    ctx.set_theme(if light {
        egui::Theme::Light
    } else {
        egui::Theme::Dark
    });
}

fn paint_drop_overlay(ctx: &egui::Context) {
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("drop_overlay"),
    ));
    let screen = ctx.screen_rect();
    painter.rect_filled(screen, 0.0, egui::Color32::from_black_alpha(160));
    painter.text(
        screen.center(),
        egui::Align2::CENTER_CENTER,
        "Drop image to load",
        egui::FontId::proportional(28.0),
        egui::Color32::WHITE,
    );
}

impl eframe::App for FilterStudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        // Top panel: file operations and theme
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open Image").clicked() {
                    self.open_image();
                }
                if ui.button("Remove Photo").clicked() {
                    self.request_remove();
                }
                ui.separator();

                let glyph = if self.light_theme { "☀" } else { "🌙" };
                if ui.button(glyph).on_hover_text("Toggle theme").clicked() {
                    self.light_theme = !self.light_theme;
                    set_theme(ctx, self.light_theme);
                }

                if let Some(buf) = self.session.current() {
                    ui.separator();
                    ui.label(format!("{}x{}", buf.width(), buf.height()));
                }
            });
        });

        // Left panel: filters
        egui::SidePanel::left("filters")
            .default_width(200.0)
            .resizable(false)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for &control in CONTROLS {
                        let button = egui::Button::new(control.label())
                            .min_size(egui::vec2(ui.available_width(), 0.0));
                        if ui.add(button).clicked() {
                            self.run_control(control);
                        }
                    }
                });
            });

        for notice in self.session.drain_notices() {
            self.show_popup(notice.0);
        }

        if self.needs_redraw {
            self.redraw(ctx);
            self.needs_redraw = false;
        }

        // Central panel: image preview
        egui::CentralPanel::default().show(ctx, |ui| {
            self.frame_size = Some(ui.available_size());
            if let Some(tex) = &self.preview_texture {
                ui.centered_and_justified(|ui| {
                    ui.image(egui::load::SizedTexture::new(tex.id(), tex.size_vec2()));
                });
            } else {
                ui.centered_and_justified(|ui| {
                    ui.label("Open or drop an image to begin");
                });
            }
        });

        if ctx.input(|i| !i.raw.hovered_files.is_empty()) {
            paint_drop_overlay(ctx);
        }

        self.ui_confirm_remove(ctx);
        self.ui_popup(ctx);
    }
}
