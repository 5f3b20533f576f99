use luxafor_api::Color;

/// Statuses without an explicit mapping fall back to this color, so the
/// engine always has a command to send.
pub const FALLBACK_COLOR: Color = Color::Blue;

/// Map a presence status code to the light color for it.
///
/// Total over all inputs: unknown or empty codes map to [`FALLBACK_COLOR`].
pub fn map_status(status: &str) -> Color {
    match status {
        "available" => Color::Green,
        "away" => Color::Yellow,
        "busy" => Color::Red,
        _ => FALLBACK_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_map_to_their_colors() {
        assert_eq!(map_status("available"), Color::Green);
        assert_eq!(map_status("away"), Color::Yellow);
        assert_eq!(map_status("busy"), Color::Red);
    }

    #[test]
    fn unknown_and_empty_statuses_fall_back() {
        assert_eq!(map_status(""), FALLBACK_COLOR);
        assert_eq!(map_status("in_a_meeting"), FALLBACK_COLOR);
        assert_eq!(map_status("BUSY"), FALLBACK_COLOR);
        assert_eq!(map_status("🍅"), FALLBACK_COLOR);
    }

    #[test]
    fn mapping_is_idempotent() {
        for _ in 0..3 {
            assert_eq!(map_status("busy"), Color::Red);
        }
    }
}
