/// Knobs shared by the renderers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Steps slower than this many seconds are highlighted
    pub slow_step_secs: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            slow_step_secs: DEFAULT_SLOW_STEP_SECS,
        }
    }
}

pub const DEFAULT_SLOW_STEP_SECS: f64 = 5.0;

impl RenderOptions {
    pub fn is_slow(&self, elapsed_seconds: f64) -> bool {
        elapsed_seconds > self.slow_step_secs
    }
}
