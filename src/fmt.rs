//! Shared formatting utilities for percentages and console output

use console::Emoji;

/// Camera emoji for capture/compare operations
pub const CAMERA: Emoji = Emoji("📸 ", "");

/// Checkmark emoji for success
pub const CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// Crossmark emoji for failure
pub const CROSSMARK: Emoji = Emoji("❌", "[FAIL]");

/// Sparkles emoji for completion/success
pub const SPARKLES: Emoji = Emoji("✨", "*");

/// Chart emoji for metrics/statistics
pub const CHART: Emoji = Emoji("📊", "~");

/// Warning emoji for caution/alerts
pub const WARNING: Emoji = Emoji("⚠️", "!");

/// Round a percentage to three decimal places, the precision stored in
/// the results document.
///
/// # Examples
///
/// ```
/// use shotdiff::fmt::round_percent;
///
/// assert_eq!(round_percent(12.34567), 12.346);
/// assert_eq!(round_percent(0.0004), 0.0);
/// ```
pub fn round_percent(percent: f64) -> f64 {
    (percent * 1000.0).round() / 1000.0
}

/// Format a percentage with three decimals, e.g. `"1.250%"`.
///
/// # Examples
///
/// ```
/// use shotdiff::fmt::format_percent;
///
/// assert_eq!(format_percent(1.25), "1.250%");
/// ```
pub fn format_percent(percent: f64) -> String {
    format!("{:.3}%", percent)
}

/// Whether emoji output was disabled with `--no-emoji`.
pub fn emoji_disabled() -> bool {
    std::env::var_os("NO_EMOJI").is_some()
}

/// Render an emoji, honouring `--no-emoji` in addition to terminal support.
pub fn icon(emoji: &Emoji<'_, '_>) -> String {
    if emoji_disabled() {
        emoji.1.to_string()
    } else {
        emoji.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_percent_keeps_three_decimals() {
        assert_eq!(round_percent(0.0), 0.0);
        assert_eq!(round_percent(100.0), 100.0);
        assert_eq!(round_percent(33.333333), 33.333);
        assert_eq!(round_percent(0.0005), 0.001);
    }

    #[test]
    fn test_format_percent_pads_decimals() {
        assert_eq!(format_percent(0.0), "0.000%");
        assert_eq!(format_percent(12.5), "12.500%");
    }
}
