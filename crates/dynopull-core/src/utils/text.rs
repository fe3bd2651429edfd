//! Message splitting for chat size limits.

/// Maximum message length accepted by the Telegram Bot API.
///
/// Telegram counts UTF-16 code units, not bytes or chars.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Split `text` into chunks of at most `limit` UTF-16 code units.
///
/// Chunks break on line boundaries where possible; a single line longer
/// than `limit` is split mid-line. Only the newline a chunk ends on is
/// removed; other whitespace is kept. Chunks that are entirely whitespace
/// are dropped because the Bot API rejects them, so blank input yields no
/// chunks.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_inclusive('\n') {
        let line_len = utf16_len(line);

        if current_len + line_len > limit {
            flush(&mut chunks, &mut current);
            current_len = 0;
        }

        if line_len <= limit {
            current.push_str(line);
            current_len += line_len;
            continue;
        }

        for c in line.chars() {
            let width = c.len_utf16();
            if current_len + width > limit {
                flush(&mut chunks, &mut current);
                current_len = 0;
            }
            current.push(c);
            current_len += width;
        }
    }
    flush(&mut chunks, &mut current);

    chunks
}

fn utf16_len(s: &str) -> usize {
    s.chars().map(char::len_utf16).sum()
}

fn flush(chunks: &mut Vec<String>, current: &mut String) {
    let chunk = current.strip_suffix('\n').unwrap_or(current.as_str());
    if !chunk.trim().is_empty() {
        chunks.push(chunk.to_string());
    }
    current.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        assert_eq!(split_message("[]\n", 4096), vec!["[]".to_string()]);
    }

    #[test]
    fn test_blank_text_yields_nothing() {
        assert!(split_message("", 10).is_empty());
        assert!(split_message(" \n\n  \n", 10).is_empty());
    }

    #[test]
    fn test_splits_on_line_boundaries() {
        let text = "alpha\nbravo\ncharlie\n";
        let chunks = split_message(text, 12);
        assert_eq!(chunks, vec!["alpha\nbravo", "charlie"]);
    }

    #[test]
    fn test_long_line_is_hard_split() {
        let text = "a".repeat(25);
        let chunks = split_message(&text, 10);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 10);
        assert_eq!(chunks[2].len(), 5);
    }

    #[test]
    fn test_hard_split_keeps_whitespace() {
        let text = "aaaa bbbb cccc";
        let chunks = split_message(text, 5);
        assert_eq!(chunks, vec!["aaaa ", "bbbb ", "cccc"]);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_indentation_is_preserved() {
        let text = "[\n  {\n    \"name\": \"web\"  \n  }\n]\n";
        let chunks = split_message(text, 30);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks.join("\n") + "\n", text);
    }

    #[test]
    fn test_chunks_respect_utf16_limit() {
        // Each emoji is two UTF-16 code units
        let text = "😀".repeat(5);
        let chunks = split_message(&text, 4);
        assert_eq!(chunks.len(), 3);
        for chunk in &chunks {
            assert!(utf16_len(chunk) <= 4);
        }
    }

    #[test]
    fn test_large_json_output_fits_limit() {
        let line = format!("{{\"name\": \"{}\"}},\n", "x".repeat(80));
        let text = line.repeat(200);
        let chunks = split_message(&text, TELEGRAM_MESSAGE_LIMIT);
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| utf16_len(c) <= TELEGRAM_MESSAGE_LIMIT));
        let rejoined: usize = chunks.iter().map(|c| c.matches("name").count()).sum();
        assert_eq!(rejoined, 200);
    }
}
