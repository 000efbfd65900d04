use crate::app::render_schedule::SPINNER_INTERVAL;

const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Advances one frame per `SPINNER_INTERVAL`.
pub fn spinner_char(time_ms: u128) -> &'static str {
    let step = SPINNER_INTERVAL.as_millis().max(1);
    SPINNER_FRAMES[(time_ms / step) as usize % SPINNER_FRAMES.len()]
}
