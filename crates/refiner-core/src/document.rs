/// Split text into lines that keep their terminators.
///
/// Concatenating the result gives back the input exactly. Empty input yields
/// no lines. Only `\n` ends a line; a lone `\r` (classic Mac) does not.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_owned).collect()
}

pub fn join_lines(lines: &[String]) -> String {
    lines.concat()
}

/// Line content without its trailing `\n` / `\r\n`.
pub fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

pub(crate) fn has_line_ending(line: &str) -> bool {
    line.ends_with('\n')
}
