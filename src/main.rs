mod app;

fn main() -> eframe::Result {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 760.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Photo Filter Lab")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Photo Filter Lab",
        options,
        Box::new(|cc| Ok(Box::new(app::FilterStudioApp::new(cc)))),
    )
}
