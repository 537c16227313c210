/// Reduce a title to its comparable form.
///
/// Hyphens become spaces, everything that is neither a letter (any script)
/// nor a space is dropped, and whitespace runs collapse to a single space.
/// Case is left untouched.
pub fn normalize_title(input: &str) -> String {
    let kept: String = input
        .chars()
        .map(|c| if c == '-' { ' ' } else { c })
        .filter(|c| *c == ' ' || c.is_alphabetic())
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}
