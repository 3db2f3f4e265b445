/// A single input line, without its `'\n'` terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRecord<'a> {
    pub text: &'a str,
}

impl<'a> LineRecord<'a> {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Split on `'\n'` only, keeping the empty tail produced by a trailing newline.
///
/// Unlike `str::lines`, `"a\n"` yields two records (`"a"` and `""`) and the
/// empty string yields one empty record, so section bodies round-trip the
/// exact newline structure of their source.
pub fn split_lines(text: &str) -> impl Iterator<Item = LineRecord<'_>> {
    text.split('\n').map(|text| LineRecord { text })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_trailing_empty_line() {
        let lines: Vec<&str> = split_lines("a\nb\n").map(|line| line.text).collect();
        assert_eq!(lines, vec!["a", "b", ""]);
    }

    #[test]
    fn empty_input_is_one_blank_line() {
        let lines: Vec<LineRecord<'_>> = split_lines("").collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].is_blank());
    }

    #[test]
    fn whitespace_only_lines_are_blank() {
        let line = LineRecord { text: " \t " };
        assert!(line.is_blank());
    }
}
