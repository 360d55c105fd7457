// Allow unused code for designed-but-not-yet-used APIs
// Remove these as the codebase matures
#![allow(dead_code)]

mod display;
mod geometry;
mod math2d;
mod modes;
mod raster;
mod shapes;

use display::{Display, InputEvent, PixelBuffer, RenderTarget, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use modes::{DeformMode, DrawMode, Mode, MorphMode, TransformMode};
use raster::Rgb;
use sdl2::keyboard::Keycode;
use shapes::Scene;

const SCENE_PATH: &str = "scene.json";

const BACKGROUND: Rgb = (200, 255, 200);
const FILL: Rgb = (255, 255, 255);
const OUTLINE: Rgb = (0, 0, 0);

/// Parse command line arguments and return (width, height, vsync)
fn parse_args() -> (u32, u32, bool) {
    let args: Vec<String> = std::env::args().collect();
    let mut width = DEFAULT_WIDTH;
    let mut height = DEFAULT_HEIGHT;
    let mut vsync = true;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--no-vsync" => vsync = false,
            "--width" | "-w" => {
                if i + 1 < args.len() {
                    if let Ok(w) = args[i + 1].parse::<u32>() {
                        width = w;
                    }
                    i += 1;
                }
            },
            "--height" | "-h" => {
                if i + 1 < args.len() {
                    if let Ok(h) = args[i + 1].parse::<u32>() {
                        height = h;
                    }
                    i += 1;
                }
            },
            "--resolution" | "-r" => {
                if i + 1 < args.len() {
                    // Parse WxH format (e.g., 1024x768)
                    let parts: Vec<&str> = args[i + 1].split('x').collect();
                    if parts.len() == 2 {
                        if let (Ok(w), Ok(h)) = (parts[0].parse::<u32>(), parts[1].parse::<u32>()) {
                            width = w;
                            height = h;
                        }
                    }
                    i += 1;
                }
            },
            "--help" => {
                println!("Usage: polydraw [OPTIONS]");
                println!();
                println!("Options:");
                println!(
                    "  --width W, -w W       Set window width (default: {})",
                    DEFAULT_WIDTH
                );
                println!(
                    "  --height H, -h H      Set window height (default: {})",
                    DEFAULT_HEIGHT
                );
                println!("  --resolution WxH, -r WxH  Set resolution (e.g., 1024x768)");
                println!("  --no-vsync            Disable VSync for uncapped framerate");
                println!("  --help                Show this help message");
                std::process::exit(0);
            },
            _ => {},
        }
        i += 1;
    }

    (width, height, vsync)
}

/// All per-session mode state, recreated wholesale on reset/load so no mode
/// can hold a stale polygon index
struct ModeSet {
    draw: DrawMode,
    deform: DeformMode,
    transform: TransformMode,
    morph: MorphMode,
}

impl ModeSet {
    fn new() -> Self {
        Self {
            draw: DrawMode::new(),
            deform: DeformMode::new(),
            transform: TransformMode::new(),
            morph: MorphMode::new(),
        }
    }
}

fn main() -> Result<(), String> {
    let (width, height, vsync) = parse_args();

    let (mut display, texture_creator) = Display::with_options("polydraw", width, height, vsync)?;
    let mut target = RenderTarget::with_size(&texture_creator, width, height)?;
    let mut buffer = PixelBuffer::with_size(width, height);

    let mut scene = Scene::new("default");
    let mut mode = Mode::Draw;
    let mut session = ModeSet::new();
    let mut warned = false;

    println!("=== polydraw ===");
    println!("Resolution: {}x{}", width, height);
    println!("Press 1-4 for different modes:");
    println!("  1: DRAW  2: DEFORM  3: TRANSFORM  4: MORPH");
    println!("  R - Reset scene");
    println!("  S - Save scene to {}", SCENE_PATH);
    println!("  L - Load scene from {}", SCENE_PATH);
    println!("  Escape - Quit");
    println!();
    println!("{}", mode.instructions());

    'main: loop {
        // Handle input
        for event in display.poll_events() {
            if matches!(event, InputEvent::Quit) {
                break 'main;
            }

            if let InputEvent::KeyDown(key) = &event {
                // Transform sub-modes share letter keys with the global
                // bindings; an active selection takes them first
                let transform_active = mode == Mode::Transform && session.transform.has_selection();
                let switch_mode = |new_mode: Mode, mode: &mut Mode| {
                    if *mode != new_mode {
                        *mode = new_mode;
                        println!("{}", new_mode.instructions());
                    }
                };
                match *key {
                    Keycode::Escape => break 'main,
                    Keycode::Num1 => {
                        switch_mode(Mode::Draw, &mut mode);
                        continue;
                    },
                    Keycode::Num2 => {
                        switch_mode(Mode::Deform, &mut mode);
                        continue;
                    },
                    Keycode::Num3 => {
                        switch_mode(Mode::Transform, &mut mode);
                        continue;
                    },
                    Keycode::Num4 => {
                        switch_mode(Mode::Morph, &mut mode);
                        continue;
                    },
                    Keycode::R => {
                        scene.clear();
                        session = ModeSet::new();
                        println!("Scene reset");
                        continue;
                    },
                    Keycode::S if !transform_active => {
                        if let Err(e) = scene.save(SCENE_PATH) {
                            eprintln!("Failed to save: {}", e);
                        } else {
                            println!("Scene saved to {}", SCENE_PATH);
                        }
                        continue;
                    },
                    Keycode::L => {
                        match Scene::load(SCENE_PATH) {
                            Ok(loaded) => {
                                scene = loaded;
                                session = ModeSet::new();
                                println!("Scene loaded from {}", SCENE_PATH);
                            },
                            Err(e) => eprintln!("Failed to load: {}", e),
                        }
                        continue;
                    },
                    _ => {},
                }
            }

            // Everything else belongs to the active mode
            match mode {
                Mode::Draw => session.draw.handle_event(&event, &mut scene),
                Mode::Deform => session.deform.handle_event(&event, &mut scene),
                Mode::Transform => {
                    session
                        .transform
                        .handle_event(&event, &mut scene, width, height);
                },
                Mode::Morph => session.morph.handle_event(&event, &scene),
            }
        }

        session.transform.sync(&scene);
        if mode == Mode::Morph {
            session.morph.update(&mut scene);
        }

        // Draw
        buffer.clear(BACKGROUND.0, BACKGROUND.1, BACKGROUND.2);

        // Recompute the derived flags before anything reads them
        for poly in &mut scene.polygons {
            poly.refresh_complex();
        }
        let mut intersecting = scene.polygons.iter().any(shapes::Polygon::is_complex);
        if mode == Mode::Draw && session.draw.preview_intersects(&scene) {
            intersecting = true;
        }
        if intersecting && !warned {
            eprintln!("Warning: a polygon is self-intersecting.");
        }
        warned = intersecting;

        for poly in &scene.polygons {
            raster::scan_fill(&mut buffer, FILL, poly);
            raster::draw_polygon_outline(&mut buffer, OUTLINE, poly);
        }

        // Mode overlay on top of the filled scene
        match mode {
            Mode::Draw => session.draw.render(&mut buffer, &scene),
            Mode::Deform => session.deform.render(&mut buffer, &scene),
            Mode::Transform => session.transform.render(&mut buffer, &scene),
            Mode::Morph => session.morph.render(&mut buffer, &scene),
        }

        // Present
        display.present(&mut target, &buffer)?;
    }

    Ok(())
}
