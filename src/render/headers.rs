//! Rows outside hunks: commit headers and messages, file names, separators.

use super::RenderContext;
use crate::style::{StyledString, ThemeRole};
use crate::text::fit_to_width;

const SEPARATOR_CHAR: char = '─';
const FILE_INDICATOR: char = '■';

/// Fit `row` to the screen and push the resulting rows with the theme
/// default underneath.
pub(super) fn push_fitted(ctx: &RenderContext, row: &StyledString, out: &mut Vec<StyledString>) {
    let width = ctx.screen_width();
    for mut line in fit_to_width(row, width, ctx.config().wrap_lines) {
        let len = line.len();
        line.add_span(0, len, ctx.style(ThemeRole::Default));
        out.push(line);
    }
}

pub(super) fn passthrough(ctx: &RenderContext, text: &str, out: &mut Vec<StyledString>) {
    let mut row = StyledString::new();
    row.append_str(text, [ctx.style(ThemeRole::Default)]);
    out.push(row);
}

pub(super) fn commit_header(
    ctx: &RenderContext,
    label: &str,
    rest: &str,
    out: &mut Vec<StyledString>,
) {
    let rest_role = match label {
        "commit" => Some(ThemeRole::CommitSha),
        "Author:" | "Commit:" => Some(ThemeRole::CommitAuthor),
        "Date:" | "AuthorDate:" | "CommitDate:" => Some(ThemeRole::CommitDate),
        _ => None,
    };
    let mut row = StyledString::new();
    row.append_str(label, [ctx.style(ThemeRole::CommitHeaderLabel)]);
    match rest_role {
        Some(role) => row.append_str(rest, [ctx.style(role)]),
        None => row.append_plain(rest),
    };
    push_fitted(ctx, &row, out);
}

pub(super) fn commit_body(
    ctx: &RenderContext,
    text: &str,
    is_title: bool,
    out: &mut Vec<StyledString>,
) {
    let mut row = StyledString::new();
    row.append_plain(text);
    let len = row.len();
    if is_title {
        row.add_span(0, len, ctx.style(ThemeRole::CommitTitle));
    }
    row.add_span(0, len, ctx.style(ThemeRole::CommitMessage));
    push_fitted(ctx, &row, out);
}

/// Rule, ` ■■ name`, rule.
///
/// The indicator shows whether the file was added, deleted or modified.
pub(super) fn file_header(ctx: &RenderContext, old: &str, new: &str, out: &mut Vec<StyledString>) {
    let deleted = ctx.style(ThemeRole::DeletedLine);
    let inserted = ctx.style(ThemeRole::InsertedLine);
    let indicator: String = std::iter::repeat(FILE_INDICATOR).take(2).collect();

    let mut row = StyledString::new();
    row.append_plain(" ");
    if old.is_empty() {
        row.append_str(&indicator, [inserted]);
    } else if new.is_empty() {
        row.append_str(&indicator, [deleted]);
    } else {
        let half = FILE_INDICATOR.to_string();
        row.append_str(&half, [deleted]).append_str(&half, [inserted]);
    }
    row.append_plain(" ");

    let name = if old.is_empty() || old == new {
        new.to_string()
    } else if new.is_empty() {
        old.to_string()
    } else {
        format!("{old} -> {new}")
    };
    row.append_str(&name, [ctx.style(ThemeRole::FileName)]);

    out.push(separator(ctx));
    push_fitted(ctx, &row, out);
    out.push(separator(ctx));
}

/// A full-width horizontal rule.
pub(super) fn separator(ctx: &RenderContext) -> StyledString {
    let rule: String = std::iter::repeat(SEPARATOR_CHAR)
        .take(ctx.screen_width())
        .collect();
    let mut row = StyledString::new();
    row.append_str(&rule, [ctx.style(ThemeRole::Border), ctx.style(ThemeRole::Default)]);
    row
}
