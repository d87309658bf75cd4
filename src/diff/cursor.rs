/// Cursor over the lines of raw diff text.
///
/// Carries the two-line lookahead needed to recognize bare `---`/`+++`
/// section starts in diffs that have no `diff --git` headers.
pub(crate) struct LineCursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
            pos: 0,
        }
    }

    /// Current line without consuming it
    pub(crate) fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    /// Line after the current one
    pub(crate) fn peek_second(&self) -> Option<&'a str> {
        self.lines.get(self.pos + 1).copied()
    }

    /// Consume the current line and return it
    pub(crate) fn advance(&mut self) -> Option<&'a str> {
        let line = self.peek();
        if line.is_some() {
            self.pos += 1;
        }
        line
    }

    /// Whether the cursor sits at the start of a file section.
    ///
    /// A section starts at a `diff --git` line, or at a `--- ` line
    /// immediately followed by a `+++ ` line when no git header is present.
    pub(crate) fn at_section_start(&self) -> bool {
        match self.peek() {
            Some(line) if line.starts_with("diff --git ") => true,
            Some(line) if line.starts_with("--- ") => self
                .peek_second()
                .is_some_and(|next| next.starts_with("+++ ")),
            _ => false,
        }
    }
}
