use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

pub const WINDOW_WIDTH: u32 = 1024;
pub const WINDOW_HEIGHT: u32 = 1024;
pub const FPS: u64 = 60;
pub const FRAME_TARGET_TIME: f64 = 1000.0 / FPS as f64;

/// Frame times averaged by [`FpsCounter`].
const FRAME_TIME_HISTORY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
    /// Toggle between flat and Phong shading.
    ToggleShading,
    /// Save the current frame to disk.
    Screenshot,
}

pub struct FrameLimiter {
    previous_frame_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
        }
    }

    /// Waits if necessary to maintain frame rate and returns the delta time in milliseconds.
    /// Delta time represents the time elapsed since the last call to this method.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time - self.previous_frame_time;

        if delta_time < FRAME_TARGET_TIME as u64 {
            let time_to_wait = (FRAME_TARGET_TIME as u64) - delta_time;
            std::thread::sleep(std::time::Duration::from_millis(time_to_wait));
            current_time = window.timer().ticks64();
            delta_time = current_time - self.previous_frame_time;
        }

        self.previous_frame_time = current_time;
        delta_time
    }
}

/// Rolling average over the last [`FRAME_TIME_HISTORY`] frame render times.
pub struct FpsCounter {
    history: [f64; FRAME_TIME_HISTORY],
    cursor: usize,
    recorded: usize,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            history: [0.0; FRAME_TIME_HISTORY],
            cursor: 0,
            recorded: 0,
        }
    }

    /// Record one frame's render time in milliseconds.
    pub fn record(&mut self, frame_ms: f64) {
        self.history[self.cursor] = frame_ms;
        self.cursor = (self.cursor + 1) % FRAME_TIME_HISTORY;
        self.recorded = (self.recorded + 1).min(FRAME_TIME_HISTORY);
    }

    /// Average frame time over the recorded history, in milliseconds.
    pub fn average_ms(&self) -> f64 {
        if self.recorded == 0 {
            return 0.0;
        }
        self.history[..self.recorded].iter().sum::<f64>() / self.recorded as f64
    }

    pub fn fps(&self) -> f64 {
        let avg = self.average_ms();
        if avg > 0.0 {
            1000.0 / avg
        } else {
            0.0
        }
    }
}

pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    texture: sdl2::render::Texture<'static>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;

        // SAFETY: texture_creator is heap-allocated and lives as long as Window.
        // We ensure texture is dropped before texture_creator by struct field order.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;

        Ok(Self {
            canvas,
            texture_creator,
            texture,
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    pub fn poll_events(&mut self) -> WindowEvent {
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return WindowEvent::Quit,
                Event::KeyDown {
                    keycode: Some(Keycode::F),
                    ..
                } => return WindowEvent::ToggleShading,
                Event::KeyDown {
                    keycode: Some(Keycode::S),
                    ..
                } => return WindowEvent::Screenshot,
                _ => {}
            }
        }
        WindowEvent::None
    }

    pub fn present(&mut self, buffer: &[u8]) -> Result<(), String> {
        self.texture
            .update(None, buffer, (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas.copy(
            &self.texture,
            None,
            Some(Rect::new(0, 0, self.width, self.height)),
        )?;
        self.canvas.present();
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_counter_averages_recorded_frames() {
        let mut counter = FpsCounter::new();
        counter.record(10.0);
        counter.record(30.0);
        assert!((counter.average_ms() - 20.0).abs() < 1e-9);
        assert!((counter.fps() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn fps_counter_history_is_bounded() {
        let mut counter = FpsCounter::new();
        for _ in 0..100 {
            counter.record(5.0);
        }
        counter.record(25.0);
        // Only the last 16 samples contribute: fifteen 5s and one 25.
        let expected = (15.0 * 5.0 + 25.0) / 16.0;
        assert!((counter.average_ms() - expected).abs() < 1e-9);
    }

    #[test]
    fn empty_fps_counter_reports_zero() {
        let counter = FpsCounter::new();
        assert_eq!(counter.average_ms(), 0.0);
        assert_eq!(counter.fps(), 0.0);
    }
}
