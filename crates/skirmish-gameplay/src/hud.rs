//! HUD helpers: countdown formatting and health bar fill.

/// Formats a millisecond countdown as `MM:SS`.
///
/// Fractions of a second are floored and negative values show as `00:00`.
#[must_use]
pub fn format_time(milliseconds: f64) -> String {
    let total_seconds = (milliseconds / 1000.0).floor().max(0.0) as u64;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Fraction of a health bar to fill, clamped to `0.0..=1.0`.
#[must_use]
pub fn health_fraction(health: i32, max_health: i32) -> f32 {
    if max_health <= 0 {
        return 0.0;
    }
    (health as f32 / max_health as f32).clamp(0.0, 1.0)
}
