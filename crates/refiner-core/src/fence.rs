use crate::document::has_line_ending;
use serde::{Deserialize, Serialize};

/// Tokens that delimit a diagram block and mark an edge inside it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FenceSyntax {
    /// Bare fence token, also the closing line
    pub fence: String,

    /// Language tag that follows the fence on the opening line
    pub language: String,

    /// Directional arrow token
    pub arrow: String,
}

impl Default for FenceSyntax {
    fn default() -> Self {
        Self {
            fence: "```".to_string(),
            language: "mermaid".to_string(),
            arrow: "-->".to_string(),
        }
    }
}

impl FenceSyntax {
    pub fn opening(&self) -> String {
        format!("{}{}", self.fence, self.language)
    }

    fn is_bare_fence(&self, line: &str) -> bool {
        line.trim() == self.fence
    }

    /// Closing fence terminated like `anchor`, so CRLF files stay CRLF
    fn closing_line(&self, anchor: &str) -> String {
        let ending = if anchor.ends_with("\r\n") { "\r\n" } else { "\n" };
        format!("{}{ending}", self.fence)
    }
}

/// Scanner state, fresh for every pass over a file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockScan {
    pub in_block: bool,
    pub last_arrow: Option<usize>,
}

impl BlockScan {
    fn open(&mut self) {
        self.in_block = true;
        self.last_arrow = None;
    }

    fn close(&mut self) {
        *self = Self::default();
    }
}

/// A synthetic line to insert before `position`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub position: usize,
    pub text: String,
}

/// Walk the lines once and collect the closing fences that are missing
/// after the last arrow of each diagram block.
///
/// Positions come out in ascending order.
pub fn plan_insertions(lines: &[String], syntax: &FenceSyntax) -> Vec<Insertion> {
    let opening = syntax.opening();
    let mut scan = BlockScan::default();
    let mut insertions = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        if !scan.in_block && line.trim().starts_with(&opening) {
            scan.open();
        } else if scan.in_block {
            if line.contains(&syntax.arrow) {
                scan.last_arrow = Some(idx);
            }
            if syntax.is_bare_fence(line) {
                if let Some(arrow) = scan.last_arrow {
                    insertions.extend(closing_after(lines, arrow, syntax));
                }
                scan.close();
            }
        }
    }

    // Unterminated block at end of file
    if scan.in_block {
        if let Some(arrow) = scan.last_arrow {
            insertions.extend(closing_after(lines, arrow, syntax));
        }
    }

    insertions
}

fn closing_after(lines: &[String], arrow: usize, syntax: &FenceSyntax) -> Option<Insertion> {
    let next = arrow + 1;
    match lines.get(next) {
        Some(line) if syntax.is_bare_fence(line) => None,
        _ => Some(Insertion {
            position: next,
            text: syntax.closing_line(&lines[arrow]),
        }),
    }
}

/// Insert the planned lines, highest position first so pending positions
/// stay valid. Existing lines are never replaced.
pub fn apply_insertions(lines: &mut Vec<String>, mut insertions: Vec<Insertion>) {
    insertions.sort_by(|a, b| b.position.cmp(&a.position));

    for insertion in insertions {
        let position = insertion.position.min(lines.len());
        if let Some(anchor) = position.checked_sub(1).and_then(|i| lines.get_mut(i)) {
            if !has_line_ending(anchor) {
                anchor.push('\n');
            }
        }
        lines.insert(position, insertion.text);
    }
}

/// Plan and apply fence repairs; returns how many fences were inserted.
pub fn repair_lines(lines: &mut Vec<String>, syntax: &FenceSyntax) -> usize {
    let insertions = plan_insertions(lines, syntax);
    let count = insertions.len();
    if count > 0 {
        log::debug!("inserting {count} closing fence(s)");
        apply_insertions(lines, insertions);
    }
    count
}
