mod cooldown_limiter;
mod input_sanitizer;

pub use cooldown_limiter::{CooldownExceeded, CooldownLimiter};
pub use input_sanitizer::InputSanitizer;
