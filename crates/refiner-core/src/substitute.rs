/// Ordered literal replacements; each one runs on the output of the previous.
const MATH_DELIMITER_RULES: [(&str, &str); 7] = [
    (r"\(", "$"),
    (r"\)", "$"),
    (r"\$", "$"),
    (" $ ", "$"),
    ("$ ", "$"),
    (" $", "$"),
    ("-$", "- $"),
];

/// Rewrite LaTeX-style inline math delimiters to `$` and tighten the spacing
/// around them.
pub fn normalize_math_delimiters(line: &str) -> String {
    MATH_DELIMITER_RULES
        .iter()
        .fold(line.to_owned(), |acc, (from, to)| acc.replace(from, to))
}
