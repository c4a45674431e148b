// Presentation helpers shared by the view components

/// Resistance for display, one decimal place. Internal math keeps full precision.
pub fn format_resistance(value: f64) -> String {
    format!("{:.1}", value)
}

/// Health bar colour band.
pub fn health_color(health: u32, max_health: u32) -> &'static str {
    let max = max_health.max(1);
    if health * 2 > max {
        "#3fb950"
    } else if health * 5 > max {
        "#d29922"
    } else {
        "#f85149"
    }
}

/// Millisecond delay in the form `setTimeout` takes, saturating at `i32::MAX`.
pub fn timeout_ms(ms: u32) -> i32 {
    i32::try_from(ms).unwrap_or(i32::MAX)
}
