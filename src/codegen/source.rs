//! Line-oriented builder for emitted source text.

const INDENT: &str = "    ";

/// Accumulates lines of generated code at explicit indentation levels.
#[derive(Debug, Default)]
pub(crate) struct SourceBuilder {
    text: String,
}

impl SourceBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends one line indented by `depth` levels.
    pub(crate) fn line(&mut self, depth: usize, content: impl AsRef<str>) -> &mut Self {
        let content = content.as_ref();
        if !content.is_empty() {
            for _ in 0..depth {
                self.text.push_str(INDENT);
            }
            self.text.push_str(content);
        }
        self.text.push('\n');
        self
    }

    /// Appends every line of a multi-line block, each indented by `depth` levels.
    pub(crate) fn block(&mut self, depth: usize, content: &str) -> &mut Self {
        for line in content.lines() {
            self.line(depth, line);
        }
        self
    }

    pub(crate) fn blank(&mut self) -> &mut Self {
        self.text.push('\n');
        self
    }

    pub(crate) fn finish(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indents_non_empty_lines_only() {
        let mut out = SourceBuilder::new();
        out.line(0, "fn main() {").line(1, "body();").line(1, "").line(0, "}");
        assert_eq!(out.finish(), "fn main() {\n    body();\n\n}\n");
    }

    #[test]
    fn block_reindents_each_line() {
        let mut out = SourceBuilder::new();
        out.block(1, "a\n  b");
        assert_eq!(out.finish(), "    a\n      b\n");
    }
}
