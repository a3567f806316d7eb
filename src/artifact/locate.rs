// Mon Aug 17 2026 - Alex

/// Assigns source lines to tree nodes by scanning the raw text forward in
/// document order. Parsers in use report positions only for syntax errors,
/// so key lines are recovered from the text itself. The cursor never moves
/// backwards, which keeps repeated keys (e.g. `image:` under several
/// services) attached to distinct lines.
pub struct LineResolver<'a> {
    lines: Vec<&'a str>,
    cursor: usize,
}

impl<'a> LineResolver<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines().collect(),
            cursor: 0,
        }
    }

    /// Line (1-based) where `key` is introduced, searching from the cursor.
    /// Falls back to `parent_line` when the key cannot be located, e.g. keys
    /// synthesized during normalization.
    pub fn resolve_key(&mut self, key: &str, parent_line: usize) -> usize {
        for (offset, line) in self.lines[self.cursor..].iter().enumerate() {
            if line_defines_key(line, key) {
                let index = self.cursor + offset;
                self.cursor = index;
                return index + 1;
            }
        }
        parent_line
    }

    /// Line of the next occurrence of a scalar value, used for sequence items.
    pub fn resolve_value(&mut self, value: &str, parent_line: usize) -> usize {
        if value.is_empty() {
            return parent_line;
        }
        for (offset, line) in self.lines[self.cursor..].iter().enumerate() {
            if line.contains(value) {
                let index = self.cursor + offset;
                self.cursor = index;
                return index + 1;
            }
        }
        parent_line
    }

    pub fn current_line(&self) -> usize {
        self.cursor + 1
    }
}

// A line "defines" a key when the key appears as a standalone token followed
// by a separator (`:` or `=`), optionally quoted, or inside a TOML section
// header.
fn line_defines_key(line: &str, key: &str) -> bool {
    if key.is_empty() {
        return false;
    }

    let bytes = line.as_bytes();
    let mut from = 0;
    while let Some(pos) = line[from..].find(key) {
        let start = from + pos;
        let end = start + key.len();

        let before_ok = start == 0
            || matches!(
                bytes[start - 1],
                b' ' | b'\t' | b'"' | b'\'' | b'[' | b'{' | b',' | b'.' | b'-'
            );

        let rest = &line[end..];
        let rest = rest.strip_prefix('"').or_else(|| rest.strip_prefix('\'')).unwrap_or(rest);
        let trimmed = rest.trim_start();
        let after_ok = trimmed.starts_with(':')
            || trimmed.starts_with('=')
            || trimmed.starts_with(']')
            || trimmed.starts_with('.');

        if before_ok && after_ok {
            return true;
        }
        from = end;
    }
    false
}

/// Byte offset to (line, column), both 1-based. Used for TOML error spans.
pub fn offset_to_line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for (index, ch) in source.char_indices() {
        if index >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}
