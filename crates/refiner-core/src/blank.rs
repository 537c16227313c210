use crate::document::{split_lines, strip_line_ending};
use crate::normalize::normalize_title;
use std::path::Path;

/// Detects placeholder documents: the only content is a heading that
/// repeats the file name, with at most one trailing empty line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlankDetector {
    /// Lowercase heading and file name before comparing them
    pub fold_case: bool,
}

impl BlankDetector {
    pub fn new(fold_case: bool) -> Self {
        Self { fold_case }
    }

    /// `lines` keep their terminators, as produced by [`split_lines`].
    pub fn is_blank_document(&self, file_name: &str, lines: &[String]) -> bool {
        let lines: Vec<&str> = lines.iter().map(|l| strip_line_ending(l)).collect();

        let mut content = lines.iter().map(|l| l.trim()).filter(|l| !l.is_empty());
        let (Some(header_line), None) = (content.next(), content.next()) else {
            return false;
        };

        if !header_line.starts_with('#') {
            return false;
        }

        let only_heading = match lines.as_slice() {
            [_] => true,
            [_, second] => second.is_empty(),
            _ => false,
        };
        if !only_heading {
            return false;
        }

        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();

        self.titles_match(header_line.trim_start_matches('#').trim(), stem)
    }

    /// Read `path` and check it.
    ///
    /// A file that cannot be read is reported and treated as not blank.
    pub fn is_blank_file(&self, path: &Path) -> bool {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let file_name = path
                    .file_name()
                    .and_then(|s| s.to_str())
                    .unwrap_or_default();
                self.is_blank_document(file_name, &split_lines(&text))
            }
            Err(err) => {
                log::error!("Error reading file {}: {err}", path.display());
                false
            }
        }
    }

    fn titles_match(&self, header: &str, stem: &str) -> bool {
        let header = normalize_title(header);
        let stem = normalize_title(stem);
        if self.fold_case {
            header.to_lowercase() == stem.to_lowercase()
        } else {
            header == stem
        }
    }
}

/// [`BlankDetector::is_blank_document`] with exact (case-sensitive) comparison
pub fn is_blank_document(file_name: &str, lines: &[String]) -> bool {
    BlankDetector::default().is_blank_document(file_name, lines)
}

/// [`BlankDetector::is_blank_file`] with exact (case-sensitive) comparison
pub fn is_blank_file(path: &Path) -> bool {
    BlankDetector::default().is_blank_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn blank(name: &str, text: &str) -> bool {
        is_blank_document(name, &split_lines(text))
    }

    #[test]
    fn single_matching_heading_is_blank() {
        assert!(blank("Foo-Bar.md", "# Foo Bar"));
        assert!(blank("Foo-Bar.md", "# Foo Bar\n"));
        assert!(blank("Foo Bar.md", "### Foo Bar"));
    }

    #[test]
    fn heading_must_match_file_name() {
        assert!(!blank("other.md", "# Foo Bar"));
    }

    #[test]
    fn comparison_is_case_sensitive_by_default() {
        assert!(!blank("FOO-BAR.md", "# foo bar\n"));
        assert!(!blank("foo-bar.md", "# Foo Bar"));
        assert!(blank("foo-bar.md", "# foo bar"));
    }

    #[test]
    fn fold_case_detector() {
        let detector = BlankDetector::new(true);
        let lines = split_lines("# foo bar\n");
        assert!(detector.is_blank_document("FOO-BAR.md", &lines));
        assert!(detector.is_blank_document("foo-bar.md", &lines));
        assert!(!detector.is_blank_document("other.md", &lines));
    }

    #[test]
    fn symbols_and_digits_are_ignored_on_both_sides() {
        assert!(blank("01-Intro (draft).md", "# Intro: draft!"));
        assert!(blank("Über-Größe.md", "#Über Größe"));
    }

    #[test]
    fn one_trailing_empty_line_is_tolerated() {
        assert!(blank("Foo.md", "# Foo\n\n"));
        assert!(!blank("Foo.md", "# Foo\n\n\n"));
        assert!(!blank("Foo.md", "# Foo\n   \n"));
    }

    #[test]
    fn leading_empty_line_is_not_blank() {
        assert!(!blank("Foo.md", "\n# Foo"));
    }

    #[test]
    fn two_content_lines_are_never_blank() {
        assert!(!blank("Foo.md", "# Foo\nFoo\n"));
        assert!(!blank("Foo.md", "# Foo\n# Foo\n"));
    }

    #[test]
    fn non_heading_or_empty_is_not_blank() {
        assert!(!blank("Foo.md", "Foo\n"));
        assert!(!blank("Foo.md", ""));
        assert!(!blank("Foo.md", "\n\n"));
    }

    #[test]
    fn crlf_single_heading_is_blank() {
        assert!(blank("Foo.md", "# Foo\r\n"));
        assert!(blank("Foo.md", "# Foo\r\n\r\n"));
    }

    #[test]
    fn reads_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Release Notes.md");
        fs::write(&path, "# Release Notes\n").unwrap();
        assert!(is_blank_file(&path));

        fs::write(&path, "# Release Notes\nshipped\n").unwrap();
        assert!(!is_blank_file(&path));
    }

    #[test]
    fn unreadable_file_is_not_blank() {
        let dir = tempdir().unwrap();
        assert!(!is_blank_file(&dir.path().join("missing.md")));

        let invalid = dir.path().join("bytes.md");
        fs::write(&invalid, [0xff, 0xfe, 0x00]).unwrap();
        assert!(!is_blank_file(&invalid));
    }
}
