//! Indented text buffer shared by every emitter.

const INDENT: &str = "    ";

/// Writes a blank line before every section but the first.
#[derive(Debug, Default, Clone, Copy)]
pub struct Separator {
    started: bool,
}

impl Separator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, w: &mut CodeWriter) {
        if self.started {
            w.blank();
        }
        self.started = true;
    }

    pub fn reset(&mut self) {
        self.started = false;
    }
}

/// Line oriented output with a current indentation level.
#[derive(Debug, Default, Clone)]
pub struct CodeWriter {
    output: String,
    level: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indent(&mut self) {
        self.level += 1;
    }

    pub fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    pub fn level(&self) -> usize {
        self.level
    }

    /// Runs `f` one level deeper.
    pub fn indented(&mut self, f: impl FnOnce(&mut Self)) {
        self.indent();
        f(self);
        self.dedent();
    }

    /// Writes one indented line. An empty line carries no indentation.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            self.pad();
            self.output.push_str(text);
        }
        self.output.push('\n');
    }

    pub fn blank(&mut self) {
        self.output.push('\n');
    }

    /// Writes `text` and enters a block.
    pub fn open(&mut self, text: impl AsRef<str>) {
        self.line(text);
        self.indent();
    }

    /// Leaves a block and writes `text`.
    pub fn close(&mut self, text: impl AsRef<str>) {
        self.dedent();
        self.line(text);
    }

    /// Copies multi-line text, indenting every non-empty line.
    pub fn text(&mut self, text: &str) {
        for line in text.trim_end_matches('\n').split('\n') {
            self.line(line.trim_end());
        }
    }

    /// Appends without indentation or newline.
    pub fn push(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn pad(&mut self) {
        for _ in 0..self.level {
            self.output.push_str(INDENT);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.output
    }

    /// Output with trailing blank lines folded into one newline.
    pub fn finish(self) -> String {
        let mut output = self.output;
        let len = output.trim_end().len();
        output.truncate(len);
        output.push('\n');
        output
    }
}
