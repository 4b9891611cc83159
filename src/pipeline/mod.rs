//! The pull-based transform from input lines to styled output rows.
//!
//! ```text
//! lines ─▶ normalize_line ─▶ DiffParser ─▶ RenderContext ─▶ rows
//! ```
//!
//! Nothing runs until a row is requested. Each call to
//! [`Pipeline::next`](Iterator::next) reads input only until at least one
//! row is ready, so memory is bounded by the hunk being read.

mod input;

use std::collections::VecDeque;
use std::io::BufRead;

use crate::diff::{DiffEvent, DiffParser};
use crate::error::{Error, Result};
use crate::render::RenderContext;
use crate::style::StyledString;

pub use input::{normalize_line, LineReader};

/// Iterator of styled rows over an iterator of input lines.
pub struct Pipeline<I> {
    ctx: RenderContext,
    lines: I,
    parser: DiffParser,
    events: Vec<DiffEvent>,
    rows: VecDeque<StyledString>,
    /// Reported once `rows` is drained.
    error: Option<Error>,
    done: bool,
}

impl<R: BufRead> Pipeline<LineReader<R>> {
    /// Pipeline over the lines of a byte stream.
    pub fn from_reader(ctx: RenderContext, reader: R) -> Self {
        Self::new(ctx, LineReader::new(reader))
    }
}

impl<I> Pipeline<I>
where
    I: Iterator<Item = Result<String>>,
{
    /// Pipeline over already-split lines.
    pub fn new(ctx: RenderContext, lines: I) -> Self {
        Self {
            ctx,
            lines,
            parser: DiffParser::new(),
            events: Vec::new(),
            rows: VecDeque::new(),
            error: None,
            done: false,
        }
    }

    /// The rendering context.
    pub const fn context(&self) -> &RenderContext {
        &self.ctx
    }

    /// Pull one input line through the parser. Returns `false` at the end.
    fn advance(&mut self) -> Result<bool> {
        match self.lines.next() {
            Some(line) => {
                let line = line?;
                let line = normalize_line(&line, self.ctx.config().tab_width);
                self.parser.push_line(&line, &mut self.events)?;
                Ok(true)
            }
            None => {
                self.parser.finish(&mut self.events);
                Ok(false)
            }
        }
    }

    /// Render the queued events into rows.
    fn render_events(&mut self) -> Result<()> {
        let mut out = Vec::new();
        for event in self.events.drain(..) {
            self.ctx.render_event(&event, &mut out)?;
            self.rows.extend(out.drain(..));
        }
        Ok(())
    }
}

impl<I> Iterator for Pipeline<I>
where
    I: Iterator<Item = Result<String>>,
{
    type Item = Result<StyledString>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(row) = self.rows.pop_front() {
                return Some(Ok(row));
            }
            if let Some(err) = self.error.take() {
                return Some(Err(err));
            }
            if self.done {
                return None;
            }
            // Events completed by a failing line are still rendered.
            let step = self.advance();
            let rendered = self.render_events();
            match step.and_then(|more| rendered.map(|()| more)) {
                Ok(more) => self.done = !more,
                Err(err) => {
                    self.done = true;
                    self.error = Some(err);
                }
            }
        }
    }
}
