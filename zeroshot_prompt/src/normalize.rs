/// Trims leading and trailing whitespace from every line and re-joins the lines with `\n`.
///
/// Templates are written as indented literals; this is the only place that indentation is
/// removed. It runs after interpolation, so interpolated text is normalized as well.
/// `\r\n` line endings are accepted and emitted as `\n`.
pub fn strip_all_lines(text: &str) -> String {
    text.lines().map(str::trim).collect::<Vec<_>>().join("\n")
}
