use crate::geometry::TextStyle;

/// Greedy word wrap at the style's glyph width. Words longer than a whole
/// line are hard-split so a line never exceeds the given width. The
/// style's left indent is taken out of the usable width.
pub fn wrap_text(text: &str, style: &TextStyle, width: f64) -> Vec<String> {
    let usable = (width - style.left_indent).max(style.char_width());
    let max_chars = (usable / style.char_width()).floor() as usize;
    let max_chars = max_chars.max(1);

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0_usize;

    for word in text.split_whitespace() {
        for piece in split_long_word(word, max_chars) {
            let piece_len = piece.chars().count();
            let needed = if current_len == 0 {
                piece_len
            } else {
                current_len + 1 + piece_len
            };
            if needed > max_chars && current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(piece);
            current_len += piece_len;
        }
    }
    if current_len > 0 {
        lines.push(current);
    }

    lines
}

/// Total wrapped height of a paragraph: one leading per line.
pub fn wrapped_height(text: &str, style: &TextStyle, width: f64) -> f64 {
    wrap_text(text, style, width).len() as f64 * style.leading
}

fn split_long_word(word: &str, max_chars: usize) -> Vec<&str> {
    if word.chars().count() <= max_chars {
        return vec![word];
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (offset, _) in word.char_indices() {
        if count == max_chars {
            pieces.push(&word[start..offset]);
            start = offset;
            count = 0;
        }
        count += 1;
    }
    pieces.push(&word[start..]);
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::styles;

    // INFO is 10 pt Courier: 6 pt per character.
    fn width_for_chars(n: usize) -> f64 {
        n as f64 * 6.0
    }

    #[test]
    fn short_text_is_one_line() {
        let lines = wrap_text("Nome: a.bin", &styles::INFO, width_for_chars(40));
        assert_eq!(lines, vec!["Nome: a.bin".to_string()]);
    }

    #[test]
    fn wraps_at_word_boundaries() {
        let lines = wrap_text("um dois tres quatro", &styles::INFO, width_for_chars(8));
        assert_eq!(lines, vec!["um dois", "tres", "quatro"]);
    }

    #[test]
    fn collapses_runs_of_whitespace() {
        let lines = wrap_text("a   b\n\tc", &styles::INFO, width_for_chars(40));
        assert_eq!(lines, vec!["a b c".to_string()]);
    }

    #[test]
    fn hard_splits_overlong_words() {
        let digest = "d".repeat(64);
        let lines = wrap_text(&digest, &styles::INFO, width_for_chars(30));
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 30);
        assert_eq!(lines[1].len(), 30);
        assert_eq!(lines[2].len(), 4);
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(wrap_text("", &styles::INFO, width_for_chars(10)).is_empty());
        assert_eq!(wrapped_height("", &styles::INFO, width_for_chars(10)), 0.0);
    }

    #[test]
    fn indent_reduces_usable_width() {
        // FILE_INFO carries a 12 pt indent: two characters fewer per line.
        let text = "abcdef abcdef";
        let plain = wrap_text(text, &styles::INFO, width_for_chars(13));
        assert_eq!(plain.len(), 1);
        let indented = wrap_text(text, &styles::FILE_INFO, width_for_chars(13));
        assert_eq!(indented.len(), 2);
    }

    #[test]
    fn height_counts_lines() {
        let h = wrapped_height("um dois tres", &styles::INFO, width_for_chars(4));
        assert_eq!(h, 3.0 * styles::INFO.leading);
    }
}
