//! Loading indicator animation state

use std::time::{Duration, Instant};

/// Spinner frames cycled while the saved application is fetched
pub const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Pulsing spinner shown during start-up hydration
#[derive(Debug)]
pub struct LoadingState {
    pub start_time: Instant,
    /// Current frame index into [`SPINNER_FRAMES`]
    pub frame: usize,
    /// Brightness in 0.0..=1.0, eased in and out every pulse
    pub intensity: f32,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingState {
    const FRAME_DURATION: Duration = Duration::from_millis(80);
    const PULSE_DURATION: Duration = Duration::from_millis(1200);

    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            frame: 0,
            intensity: 0.0,
        }
    }

    /// Update animation state based on elapsed time
    pub fn update(&mut self) {
        self.update_at(self.start_time.elapsed());
    }

    fn update_at(&mut self, elapsed: Duration) {
        let frame_ms = Self::FRAME_DURATION.as_millis();
        self.frame = ((elapsed.as_millis() / frame_ms) as usize) % SPINNER_FRAMES.len();

        let pulse_ms = Self::PULSE_DURATION.as_millis();
        let progress = (elapsed.as_millis() % pulse_ms) as f32 / pulse_ms as f32;
        // Up for the first half, back down for the second
        let half = if progress < 0.5 {
            progress * 2.0
        } else {
            (1.0 - progress) * 2.0
        };
        self.intensity = simple_easing::cubic_in_out(half);
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.frame % SPINNER_FRAMES.len()]
    }
}
