// Text Utilities
// Width-aware helpers for single-line terminal text

/// Clip a line to `max_width` characters, ending with an ellipsis when
/// anything was cut
pub fn clip_text(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let count = text.chars().count();
    if count <= max_width {
        return text.to_string();
    }

    let mut clipped: String = text.chars().take(max_width.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

/// Center a line within `width`, padding with spaces on the left
pub fn center_text(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count >= width {
        return clip_text(text, width);
    }

    let pad = (width - count) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_keeps_short_text() {
        assert_eq!(clip_text("City", 10), "City");
        assert_eq!(clip_text("City", 4), "City");
    }

    #[test]
    fn test_clip_truncates_with_ellipsis() {
        assert_eq!(clip_text("Customer Name", 6), "Custo…");
    }

    #[test]
    fn test_clip_zero_width() {
        assert_eq!(clip_text("anything", 0), "");
    }

    #[test]
    fn test_clip_counts_chars_not_bytes() {
        assert_eq!(clip_text("Bücher", 6), "Bücher");
        assert_eq!(clip_text("Bücher", 5), "Büch…");
    }

    #[test]
    fn test_center_pads_left() {
        assert_eq!(center_text("ab", 6), "  ab");
    }

    #[test]
    fn test_center_clips_overlong_text() {
        assert_eq!(center_text("overlong", 4), "ove…");
    }
}
