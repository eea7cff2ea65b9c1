use std::time::Instant;

use spherust::colors;
use spherust::prelude::*;
use spherust::window::{WINDOW_HEIGHT, WINDOW_WIDTH};

/// Initial orientation and per-frame rotation step, in radians.
const INITIAL_ANGLE: f32 = 1.9;
const ANGLE_ROTATION: f32 = 0.1;

const DEFAULT_SCENE_FILE: &str = "sphere_sample_points.txt";
const SCREENSHOT_FILE: &str = "frame.png";

fn save_screenshot(frame: &[u32], width: u32, height: u32) -> Result<(), image::ImageError> {
    let mut img = image::RgbaImage::new(width, height);
    for (i, px) in frame.iter().enumerate() {
        let x = i as u32 % width;
        let y = i as u32 / width;
        let r = ((px >> 16) & 0xFF) as u8;
        let g = ((px >> 8) & 0xFF) as u8;
        let b = (px & 0xFF) as u8;
        img.put_pixel(x, y, image::Rgba([r, g, b, 255]));
    }
    img.save(SCREENSHOT_FILE)
}

fn main() -> Result<(), String> {
    env_logger::init();

    let scene_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SCENE_FILE.to_string());

    let mut scene = SphereData::from_file(&scene_path).map_err(|e| e.to_string())?;
    log::info!("loaded {} spheres from {}", scene.len(), scene_path);

    let mut window = Window::new("Spherust", WINDOW_WIDTH, WINDOW_HEIGHT)?;
    let mut fb = FrameBuffer::new(WINDOW_WIDTH, WINDOW_HEIGHT);
    let mut frame = vec![colors::BACKGROUND; (WINDOW_WIDTH * WINDOW_HEIGHT) as usize];

    let mut limiter = FrameLimiter::new(&window);
    let mut fps = FpsCounter::new();

    let mut angle = INITIAL_ANGLE;
    let mut rotation_ms = 0.0_f64;

    'running: loop {
        match window.poll_events() {
            WindowEvent::Quit => break 'running,
            WindowEvent::ToggleShading => {
                let next = match fb.shading_mode() {
                    ShadingMode::Flat => ShadingMode::Phong,
                    ShadingMode::Phong => ShadingMode::Flat,
                };
                fb.set_shading_mode(next);
                log::info!("shading: {next}");
            }
            WindowEvent::Screenshot => {
                fb.resolve_into(&mut frame);
                save_screenshot(&frame, WINDOW_WIDTH, WINDOW_HEIGHT)
                    .map_err(|e| e.to_string())?;
                log::info!("saved {SCREENSHOT_FILE}");
            }
            WindowEvent::None => {}
        }

        fb.clear();
        let render_start = Instant::now();
        scene.render(&fb, angle);
        let render_ms = render_start.elapsed().as_secs_f64() * 1000.0;

        fps.record(render_ms);
        rotation_ms += render_ms;
        log::debug!("{:.1} fps ({:.2} ms)", fps.fps(), fps.average_ms());

        fb.resolve_into(&mut frame);
        window.present(bytemuck::cast_slice(&frame))?;

        angle += ANGLE_ROTATION;
        if angle >= std::f32::consts::TAU {
            log::info!("full rotation rendered in {:.2} s", rotation_ms / 1000.0);
            rotation_ms = 0.0;
            angle = 0.0;
        }

        let _delta = limiter.wait_and_get_delta(&window);
    }

    Ok(())
}
