/// Split `text` on `\n`, `\r\n` and lone `\r`, the way a text-mode reader
/// with universal newlines does. A trailing terminator does not produce an
/// extra empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                start = i + 1;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    if start < bytes.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Unicode whitespace plus the information separators U+001C..=U+001F.
fn is_strippable(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Drop the header (first line, whatever it holds), then keep every line
/// that is non-blank once trimmed.
pub fn data_lines(text: &str) -> Vec<String> {
    split_lines(text)
        .into_iter()
        .skip(1)
        .map(|line| line.trim_matches(is_strippable))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
