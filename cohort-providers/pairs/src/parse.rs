//! Line splitting shared by the pair and grouping readers.

/// Splits on the first tab, or the first comma when the line has no tab.
pub(crate) fn split_pair(line: &str) -> Option<(&str, &str)> {
    line.split_once('\t').or_else(|| line.split_once(','))
}

/// Splits a whole row into trimmed, non-empty cells.
pub(crate) fn split_cells(line: &str) -> Vec<&str> {
    let separator = if line.contains('\t') { '\t' } else { ',' };
    line.split(separator)
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .collect()
}

pub(crate) fn is_comment(line: &str) -> bool {
    line.starts_with('#')
}

pub(crate) fn is_header(teacher: &str, student: &str) -> bool {
    teacher.eq_ignore_ascii_case("teacher") && student.eq_ignore_ascii_case("student")
}
