/// A contiguous, 1-indexed inclusive range of lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineWindow {
    pub start_line: usize,
    pub end_line: usize,
    pub content: String,
}

/// Split `content` into overlapping windows of `window_lines` lines.
///
/// Windows made only of whitespace are skipped. The last window always ends on
/// the last line. Callers must ensure `overlap_lines < window_lines`.
pub fn split_windows(content: &str, window_lines: usize, overlap_lines: usize) -> Vec<LineWindow> {
    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() || window_lines == 0 {
        return Vec::new();
    }

    let step = window_lines.saturating_sub(overlap_lines).max(1);
    let mut windows = Vec::new();
    let mut start = 0usize;
    loop {
        let end = (start + window_lines).min(lines.len());
        let slice = &lines[start..end];
        if slice.iter().any(|line| !line.trim().is_empty()) {
            windows.push(LineWindow {
                start_line: start + 1,
                end_line: end,
                content: slice.join("\n"),
            });
        }
        if end == lines.len() {
            break;
        }
        start += step;
    }
    windows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_file_is_one_window() {
        let windows = split_windows("a\nb\nc", 40, 10);
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].start_line, 1);
        assert_eq!(windows[0].end_line, 3);
        assert_eq!(windows[0].content, "a\nb\nc");
    }

    #[test]
    fn windows_overlap_and_cover_the_tail() {
        let content: Vec<String> = (1..=10).map(|i| format!("line{i}")).collect();
        let windows = split_windows(&content.join("\n"), 4, 1);

        let ranges: Vec<(usize, usize)> = windows.iter().map(|w| (w.start_line, w.end_line)).collect();
        assert_eq!(ranges, vec![(1, 4), (4, 7), (7, 10)]);
    }

    #[test]
    fn blank_content_has_no_windows() {
        assert!(split_windows("", 4, 1).is_empty());
        assert!(split_windows("\n   \n\t\n", 4, 1).is_empty());
    }
}
