//! Headless filter runner.
//!
//! Loads one image, applies the named operations in order and writes a PNG.
//!
//! Usage: filter_cli [--frame WxH] <input> <output.png> [operation ...]
//!
//! Operations are filter keys (grayscale, sepia, invert, smartInvert,
//! preservePrimaryColors, colorBoost, highContrast, blueTone), swap presets
//! (rbg, bgr, gbr, grb), or `clear` to revert to the loaded pixels.

use std::path::PathBuf;
use std::process::ExitCode;

use photo_filter_lab::config::StudioConfig;
use photo_filter_lab::filter::Operation;
use photo_filter_lab::image_io;
use photo_filter_lab::session::ImageSession;

enum Step {
    Apply(Operation),
    Clear,
}

struct Args {
    frame: Option<(u32, u32)>,
    input: PathBuf,
    output: PathBuf,
    steps: Vec<Step>,
}

fn parse_frame(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("frame must look like 900x600, got {s}"))?;
    let w = w.parse().map_err(|e| format!("bad frame width {w}: {e}"))?;
    let h = h.parse().map_err(|e| format!("bad frame height {h}: {e}"))?;
    Ok((w, h))
}

fn parse_args(mut raw: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut frame = None;
    let mut positional = Vec::new();
    while let Some(arg) = raw.next() {
        if arg == "--frame" {
            let value = raw.next().ok_or("--frame needs a value")?;
            frame = Some(parse_frame(&value)?);
        } else {
            positional.push(arg);
        }
    }

    let mut positional = positional.into_iter();
    let input = positional.next().ok_or("missing input path")?.into();
    let output = positional.next().ok_or("missing output path")?.into();
    let steps = positional
        .map(|name| {
            if name.eq_ignore_ascii_case("clear") {
                Ok(Step::Clear)
            } else {
                name.parse().map(Step::Apply).map_err(|e| e.to_string())
            }
        })
        .collect::<Result<_, String>>()?;

    Ok(Args {
        frame,
        input,
        output,
        steps,
    })
}

fn run(args: Args) -> Result<(), String> {
    let config = StudioConfig::default();
    let img = image_io::load_image(&args.input).map_err(|e| e.to_string())?;
    let buffer = match args.frame {
        Some((w, h)) => image_io::fit_to_frame(&img, w, h, config.fit_margin),
        None => image_io::to_pixel_buffer(&img),
    }
    .map_err(|e| e.to_string())?;
    println!(
        "Loaded {} ({}x{})",
        args.input.display(),
        buffer.width(),
        buffer.height()
    );

    let mut session = ImageSession::new();
    session.load(buffer);
    for step in args.steps {
        match step {
            Step::Apply(op) => {
                session.apply(op);
                println!("  applied {op}");
            }
            Step::Clear => {
                session.revert();
                println!("  cleared changes");
            }
        }
    }

    let snapshot = session.export_snapshot().map_err(|e| e.to_string())?;
    image_io::save_png(&snapshot, &args.output).map_err(|e| e.to_string())?;
    println!("Saved {}", args.output.display());
    Ok(())
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let result = parse_args(std::env::args().skip(1)).and_then(run);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("usage: filter_cli [--frame WxH] <input> <output.png> [operation ...]");
            ExitCode::FAILURE
        }
    }
}
