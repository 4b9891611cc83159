//! Aligning the sides of a hunk into display rows.

use std::collections::VecDeque;
use std::ops::Range;

use super::headers::push_fitted;
use super::line::{blank_row, format_line, HunkLine, LineRoles};
use super::RenderContext;
use crate::diff::{Hunk, HunkPart, LineKind};
use crate::error::Result;
use crate::highlight::changed_ranges;
use crate::style::{StyledString, ThemeRole};

/// How the sides of a hunk are arranged on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One column per side.
    SideBySide,
    /// Sides interleaved in a single column.
    Unified,
}

/// A buffered line with its kind split off and its line number assigned.
#[derive(Debug, Clone, Copy)]
struct Cell<'a> {
    kind: LineKind,
    text: &'a str,
    number: Option<i64>,
}

/// Per-side view of the hunk: numbered cells plus highlight ranges.
struct Side<'a> {
    part: &'a HunkPart,
    cells: Vec<Option<Cell<'a>>>,
    changed: Vec<Option<Vec<Range<usize>>>>,
    /// Renders as filler on every row.
    missing: bool,
}

impl<'a> Side<'a> {
    fn new(part: &'a HunkPart, missing: bool) -> Self {
        let mut counter = part.start_line;
        let cells = part
            .lines
            .iter()
            .map(|line| {
                let (kind, text) = LineKind::split(line.as_deref()?);
                let number = if kind == LineKind::NoNewline {
                    None
                } else {
                    counter += 1;
                    Some(counter - 1)
                };
                Some(Cell { kind, text, number })
            })
            .collect();
        Self {
            part,
            cells,
            changed: vec![None; part.lines.len()],
            missing,
        }
    }

    fn cell(&self, row: usize) -> Option<Cell<'a>> {
        self.cells.get(row).copied().flatten()
    }

    fn kind_at(&self, row: usize) -> Option<LineKind> {
        self.cell(row).map(|c| c.kind)
    }

    fn format(
        &self,
        ctx: &RenderContext,
        cell: Cell<'_>,
        row: usize,
        width: usize,
    ) -> Result<Vec<StyledString>> {
        let line = HunkLine {
            kind: cell.kind,
            text: cell.text,
            number: cell.number,
            file_name: &self.part.label,
            changed: self.changed.get(row).and_then(Option::as_deref),
        };
        format_line(ctx, &line, width)
    }
}

/// Append the header row(s) and the body rows of `hunk`.
pub(super) fn render_hunk(
    ctx: &RenderContext,
    hunk: &Hunk,
    out: &mut Vec<StyledString>,
) -> Result<()> {
    let mut header = StyledString::new();
    header.append_str(&hunk.header, [ctx.style(ThemeRole::HunkHeader)]);
    push_fitted(ctx, &header, out);

    if hunk.parts.is_empty() {
        return Ok(());
    }

    // Without any file name there is no file to be missing.
    let any_named = hunk.parts.iter().any(|p| !p.is_missing());
    let mut sides: Vec<Side<'_>> = hunk
        .parts
        .iter()
        .map(|part| Side::new(part, any_named && part.is_missing()))
        .collect();
    if ctx.config().highlight_line_changes {
        highlight_changed_words(ctx, &mut sides, hunk.row_count());
    }

    let layout = ctx.layout_for(sides.len());
    log::trace!(
        "{}: {} sides, {} rows, {layout:?} at width {}",
        hunk.header,
        sides.len(),
        hunk.row_count(),
        ctx.screen_width()
    );
    match layout {
        Layout::SideBySide => side_by_side(ctx, &sides, hunk.row_count(), out),
        Layout::Unified => unified(ctx, &sides, hunk.row_count(), out),
    }
}

/// Pair each parent deletion with the insertion on the same row and record
/// the word ranges that differ.
fn highlight_changed_words(ctx: &RenderContext, sides: &mut [Side<'_>], rows: usize) {
    let Some((current, parents)) = sides.split_last_mut() else {
        return;
    };
    let ratio = ctx.config().highlight_change_ratio;
    for row in 0..rows {
        let Some(new) = current.cell(row).filter(|c| c.kind == LineKind::Inserted) else {
            continue;
        };
        for parent in parents.iter_mut() {
            let Some(old) = parent.cell(row).filter(|c| c.kind == LineKind::Deleted) else {
                continue;
            };
            let changes = ctx.word_diff.diff_words(old.text, new.text);
            if let Some(ranges) = changed_ranges(&changes, ratio) {
                parent.changed[row] = Some(ranges.old);
                if current.changed[row].is_none() {
                    current.changed[row] = Some(ranges.new);
                }
            }
        }
    }
}

fn side_by_side(
    ctx: &RenderContext,
    sides: &[Side<'_>],
    rows: usize,
    out: &mut Vec<StyledString>,
) -> Result<()> {
    let column = ctx.screen_width() / sides.len();
    for row in 0..rows {
        let mut blocks = Vec::with_capacity(sides.len());
        for side in sides {
            let (block, role) = match side.cell(row) {
                Some(cell) if !side.missing => (
                    side.format(ctx, cell, row, column)?,
                    LineRoles::for_kind(cell.kind).line,
                ),
                _ => (Vec::new(), ThemeRole::MissingLine),
            };
            blocks.push((block, role));
        }

        let height = blocks.iter().map(|(b, _)| b.len()).max().unwrap_or(0).max(1);
        for (block, role) in &mut blocks {
            while block.len() < height {
                block.push(blank_row(ctx, column, *role));
            }
        }
        for i in 0..height {
            let mut line = StyledString::new();
            for (block, _) in &blocks {
                line.append_spanned(&block[i]);
            }
            out.push(line);
        }
    }
    Ok(())
}

/// Single-column layout. Parent deletions appear where they are; lines of
/// the current side wait until the next common row, so every change run
/// reads as its deletions followed by its insertions.
fn unified(
    ctx: &RenderContext,
    sides: &[Side<'_>],
    rows: usize,
    out: &mut Vec<StyledString>,
) -> Result<()> {
    let width = ctx.screen_width();
    let Some((current, parents)) = sides.split_last() else {
        return Ok(());
    };
    let mut pending: VecDeque<usize> = VecDeque::new();

    for row in 0..rows {
        let common = match current.kind_at(row) {
            Some(LineKind::Context) => true,
            Some(LineKind::NoNewline) => sides
                .iter()
                .all(|s| s.kind_at(row) == Some(LineKind::NoNewline)),
            _ => false,
        };

        if common {
            drain(ctx, current, &mut pending, width, out)?;
            let first = &sides[0];
            if let Some(cell) = first.cell(row) {
                out.extend(first.format(ctx, cell, row, width)?);
            }
            continue;
        }

        for parent in parents {
            if let Some(cell) = parent.cell(row) {
                out.extend(parent.format(ctx, cell, row, width)?);
            }
        }
        if current.cell(row).is_some() {
            pending.push_back(row);
        }
    }
    drain(ctx, current, &mut pending, width, out)
}

fn drain(
    ctx: &RenderContext,
    side: &Side<'_>,
    pending: &mut VecDeque<usize>,
    width: usize,
    out: &mut Vec<StyledString>,
) -> Result<()> {
    while let Some(row) = pending.pop_front() {
        if let Some(cell) = side.cell(row) {
            out.extend(side.format(ctx, cell, row, width)?);
        }
    }
    Ok(())
}
