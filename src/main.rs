// What you SEE:
// • Pale-blue flakes drift down a dark blue sky at a steady 160 px/s.
// • G toggles the diagnostic gradient (frame timing / channel order check).
// • ESC or closing the window quits.

use minifb::{Key, KeyRepeat, Window, WindowOptions};
use snowfall::{Error, FrameBuffer, State, DEFAULT_CAPACITY, PIXEL_BYTES};
use std::time::{Duration, Instant};

const WIDTH: usize = 960;
const HEIGHT: usize = 540;

fn main() -> Result<(), Error> {
    env_logger::init();

    let mut window = Window::new("Snowfall", WIDTH, HEIGHT, WindowOptions::default())
        .map_err(|e| Error::WindowInit(e.to_string()))?;
    window.set_target_fps(60);

    // Reusable pixel storage; minifb presents it as u32 words, the renderer
    // writes it as bytes.
    let mut pixels = vec![0u32; WIDTH * HEIGHT];
    let mut state = State::new(DEFAULT_CAPACITY);

    // Debug toggle: show the scrolling gradient instead of the particles.
    let mut show_gradient = false;
    let mut frames: u64 = 0;

    // FPS reporting, once per second.
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut last_frame_time = Instant::now();

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let now = Instant::now();
        let dt = (now - last_frame_time).as_secs_f64();
        last_frame_time = now;

        if window.is_key_pressed(Key::G, KeyRepeat::No) {
            show_gradient = !show_gradient;
        }

        {
            let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut pixels);
            let mut fb = FrameBuffer::new(bytes, WIDTH, HEIGHT, WIDTH * PIXEL_BYTES)?;
            if show_gradient {
                fb.render_gradient(frames);
            } else {
                state.update_and_render(&mut fb, dt);
            }
        }
        frames += 1;

        window
            .update_with_buffer(&pixels, WIDTH, HEIGHT)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;

        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f64();
            log::info!(
                "fps {:.1}, live particles {}",
                frames_this_second as f64 / secs,
                state.live()
            );
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}
