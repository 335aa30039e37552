//! Splitting markdown documents into frontmatter and body, and putting them
//! back together.

use super::frontmatter::Frontmatter;

const DELIMITER: &str = "---";

/// Where the line scanner is relative to the frontmatter block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// No delimiter seen yet
    Before,
    InFrontmatter,
    After,
}

/// Whether to write a `---` block when the frontmatter is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStyle {
    /// New files: no block at all for empty frontmatter
    OmitWhenEmpty,
    /// Rewrites: always a block, a bare `---`/`---` pair when empty
    Always,
}

/// Frontmatter plus body lines
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub frontmatter: Frontmatter,
    pub body: Vec<String>,
}

fn is_delimiter(line: &str) -> bool {
    line.trim() == DELIMITER
}

/// Split file text into lines; a trailing newline does not add an empty line
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

/// Lines strictly between the opening and closing delimiters.
///
/// The opening delimiter must be the first line, and an unterminated block
/// counts as no block.
pub fn frontmatter_lines(lines: &[String]) -> Option<&[String]> {
    let (first, rest) = lines.split_first()?;
    if !is_delimiter(first) {
        return None;
    }
    let close = rest.iter().position(|line| is_delimiter(line))?;
    Some(&rest[..close])
}

/// Lines outside any `---` delimited block, in order.
///
/// Every delimiter line advances the scanner and is dropped, wherever it
/// appears: the first opens a block, the second closes it, later ones are
/// skipped. A block that never closes swallows the rest of the file.
pub fn body_lines(lines: &[String]) -> Vec<String> {
    let mut body = Vec::new();
    let mut state = ScanState::Before;

    for line in lines {
        if is_delimiter(line) {
            state = match state {
                ScanState::Before => ScanState::InFrontmatter,
                ScanState::InFrontmatter | ScanState::After => ScanState::After,
            };
            continue;
        }

        if state != ScanState::InFrontmatter {
            body.push(line.clone());
        }
    }

    body
}

/// Parse the frontmatter block of already-split lines
pub fn parse_frontmatter(lines: &[String]) -> Result<Frontmatter, String> {
    match frontmatter_lines(lines) {
        Some(block) => Frontmatter::parse(&block.join("\n")),
        None => Ok(Frontmatter::new()),
    }
}

impl Document {
    pub fn new(frontmatter: Frontmatter, body: Vec<String>) -> Self {
        Self { frontmatter, body }
    }

    pub fn from_lines(lines: &[String]) -> Result<Self, String> {
        Ok(Self {
            frontmatter: parse_frontmatter(lines)?,
            body: body_lines(lines),
        })
    }

    pub fn to_lines(&self, style: BlockStyle) -> Result<Vec<String>, String> {
        let mut lines = Vec::new();

        if style == BlockStyle::Always || !self.frontmatter.is_empty() {
            lines.push(DELIMITER.to_string());
            lines.extend(self.frontmatter.to_yaml_lines()?);
            lines.push(DELIMITER.to_string());
        }

        lines.extend(self.body.iter().cloned());
        Ok(lines)
    }

    /// Complete file content: lines joined by `\n`, no trailing newline added
    pub fn render(&self, style: BlockStyle) -> Result<String, String> {
        Ok(self.to_lines(style)?.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;

    fn lines(text: &str) -> Vec<String> {
        split_lines(text)
    }

    #[test]
    fn test_split_lines_trailing_newline() {
        assert_eq!(lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(lines("a\nb"), vec!["a", "b"]);
        assert_eq!(lines("a\r\nb"), vec!["a", "b"]);
        assert!(lines("").is_empty());
    }

    #[test]
    fn test_body_after_frontmatter() {
        let text = "---\ntitle: Test File\nauthor: Test Author\n---\nThis is the content.";
        assert_eq!(body_lines(&lines(text)), vec!["This is the content."]);
    }

    #[test]
    fn test_body_without_frontmatter() {
        let text = "# Heading\n\nSome text.";
        assert_eq!(body_lines(&lines(text)), vec!["# Heading", "", "Some text."]);
    }

    #[test]
    fn test_body_drops_every_delimiter() {
        let text = "---\ntitle: x\n---\nabove\n---\nbelow";
        assert_eq!(body_lines(&lines(text)), vec!["above", "below"]);
    }

    #[test]
    fn test_late_delimiter_opens_block() {
        let text = "intro\n---\noutro";
        assert_eq!(body_lines(&lines(text)), vec!["intro"]);

        let text = "intro\n---\nk: v\n---\nrest";
        assert_eq!(body_lines(&lines(text)), vec!["intro", "rest"]);
        // only a first-line block counts as frontmatter
        assert!(parse_frontmatter(&lines(text)).unwrap().is_empty());
    }

    #[test]
    fn test_unterminated_block_swallows_body() {
        let text = "---\ntitle: x\nstill going\nmore";
        assert!(body_lines(&lines(text)).is_empty());
        assert!(frontmatter_lines(&lines(text)).is_none());
        assert!(parse_frontmatter(&lines(text)).unwrap().is_empty());
    }

    #[test]
    fn test_delimiters_are_trimmed() {
        let text = "---  \ntitle: x\n  ---\nbody";
        let block = lines(text);
        assert_eq!(frontmatter_lines(&block).unwrap(), &["title: x".to_string()]);
        assert_eq!(body_lines(&block), vec!["body"]);
    }

    #[test]
    fn test_parse_frontmatter() {
        let text = "---\ntitle: Test File\nauthor: Test Author\n---\nThis is the content.";
        let fm = parse_frontmatter(&lines(text)).unwrap();
        assert_eq!(fm.get("title").and_then(Value::as_str), Some("Test File"));
        assert_eq!(fm.len(), 2);

        assert!(parse_frontmatter(&lines("no block here")).unwrap().is_empty());
        assert!(parse_frontmatter(&[]).unwrap().is_empty());
        assert!(parse_frontmatter(&lines("---\n---\nbody")).unwrap().is_empty());
    }

    #[test]
    fn test_parse_frontmatter_keeps_indentation() {
        let text = "---\nmeta:\n  author: A\n  year: 2024\n---\nbody";
        let fm = parse_frontmatter(&lines(text)).unwrap();
        let meta = fm.get("meta").and_then(Value::as_mapping).unwrap();
        assert_eq!(meta.len(), 2);
    }

    #[test]
    fn test_parse_frontmatter_malformed() {
        let text = "---\ntitle: [broken\n---\nbody";
        assert!(parse_frontmatter(&lines(text)).is_err());
    }

    #[test]
    fn test_render_omits_empty_block_for_new_files() {
        let doc = Document::new(Frontmatter::new(), vec!["Just text.".to_string()]);
        assert_eq!(doc.render(BlockStyle::OmitWhenEmpty).unwrap(), "Just text.");
        assert_eq!(doc.render(BlockStyle::Always).unwrap(), "---\n---\nJust text.");
    }

    #[test]
    fn test_render_with_frontmatter() {
        let mut fm = Frontmatter::new();
        fm.insert("title", "New");
        let doc = Document::new(fm, vec!["Body line.".to_string()]);
        assert_eq!(
            doc.render(BlockStyle::OmitWhenEmpty).unwrap(),
            "---\ntitle: New\n---\nBody line."
        );
    }

    #[test]
    fn test_from_lines_round_trip() {
        let text = "---\ntitle: Test File\nauthor: Test Author\n---\nline one\n\nline three";
        let doc = Document::from_lines(&lines(text)).unwrap();
        assert_eq!(doc.render(BlockStyle::Always).unwrap(), text);
    }
}
