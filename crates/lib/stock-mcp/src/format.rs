//! Shared text rendering helpers for tool output.

use std::collections::HashMap;
use std::fmt;

use stock_core::records::Instrument;

/// Displays a possibly-null upstream scalar, `-` when missing.
pub struct Val<T>(pub Option<T>);

impl<T: fmt::Display> fmt::Display for Val<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => write!(f, "{value}"),
            None => f.write_str("-"),
        }
    }
}

/// Displays a number followed by its unit, or `-` alone when missing.
pub struct Unit(pub Option<f64>, pub &'static str);

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{value}{}", self.1),
            None => f.write_str("-"),
        }
    }
}

/// Stable partition of `items` by instrument code.
///
/// Groups appear in first-seen order and keep their rows in input order.
pub fn group_by_code<R: Instrument>(items: &[R]) -> Vec<(&str, Vec<&R>)> {
    let mut groups: Vec<(&str, Vec<&R>)> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();
    for item in items {
        let code = item.ts_code();
        let slot = *slots.entry(code).or_insert_with(|| {
            groups.push((code, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(item);
    }
    groups
}

/// Writes one `{code} {heading}:` block per instrument, numbering rows from 1
/// within each block.
pub fn write_groups<R, F>(
    f: &mut fmt::Formatter<'_>,
    items: &[R],
    heading: &str,
    mut entry: F,
) -> fmt::Result
where
    R: Instrument,
    F: FnMut(&mut fmt::Formatter<'_>, usize, &R) -> fmt::Result,
{
    for (code, rows) in group_by_code(items) {
        writeln!(f, "{code} {heading}:")?;
        for (index, row) in rows.into_iter().enumerate() {
            entry(f, index + 1, row)?;
        }
        writeln!(f)?;
    }
    Ok(())
}

/// Trailing hint when the upstream truncated the result set.
pub fn write_more_note(f: &mut fmt::Formatter<'_>, has_more: bool) -> fmt::Result {
    if has_more {
        writeln!(f, "注意: 仍有更多数据未返回，请缩小查询范围后重试。")?;
    }
    Ok(())
}
