//! Text output formatting with optional ANSI styling.

use ghbar_core::ResponseEnvelope;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats one poll result as a single line.
    ///
    /// With colors on, the configured `#RRGGBB` color is applied as a
    /// truecolor escape and urgent lines are bold (red when uncolored).
    pub fn format_envelope(&self, envelope: &ResponseEnvelope) -> String {
        let text = envelope.full_text.as_str();
        if !self.use_colors {
            return text.to_string();
        }

        let color = envelope.color.as_deref().and_then(hex_to_ansi);
        match (color, envelope.urgent) {
            (Some(color), true) => format!("{BOLD}{color}{text}{RESET}"),
            (Some(color), false) => format!("{color}{text}{RESET}"),
            (None, true) => format!("{BOLD}{RED}{text}{RESET}"),
            (None, false) => text.to_string(),
        }
    }
}

/// Converts `#RRGGBB` into a 24-bit foreground escape.
pub(crate) fn hex_to_ansi(color: &str) -> Option<String> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
    Some(format!("\x1b[38;2;{r};{g};{b}m"))
}
