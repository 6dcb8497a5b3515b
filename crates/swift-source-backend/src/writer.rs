// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Writer wrapper for generating Swift code with proper indentation

const INDENT: &str = "    ";

pub struct SwiftWriter {
    output: String,
    indent_level: usize,
    at_line_start: bool,
}

impl SwiftWriter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            at_line_start: true,
        }
    }

    /// Emit a string without a trailing newline.
    pub fn emit(&mut self, text: &str) {
        if self.at_line_start && !text.is_empty() {
            for _ in 0..self.indent_level {
                self.output.push_str(INDENT);
            }
            self.at_line_start = false;
        }
        self.output.push_str(text);
    }

    /// Emit a string followed by a newline.
    pub fn emit_line(&mut self, text: &str) {
        self.emit(text);
        self.output.push('\n');
        self.at_line_start = true;
    }

    /// Emit an empty line, collapsing runs of blanks.
    pub fn blank_line(&mut self) {
        if self.output.ends_with("\n\n") || self.output.is_empty() {
            return;
        }
        self.output.push('\n');
        self.at_line_start = true;
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn unindent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Execute a function with increased indentation.
    pub fn with_indent(&mut self, f: impl FnOnce(&mut Self)) {
        self.indent();
        f(self);
        self.unindent();
    }

    /// Extract the final output.
    pub fn extract_result(self) -> String {
        self.output
    }
}

impl Default for SwiftWriter {
    fn default() -> Self {
        Self::new()
    }
}
