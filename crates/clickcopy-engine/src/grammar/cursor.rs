/// A cursor over a string slice for delimiter matching.
///
/// Positions are byte offsets into `s`; advancing always moves by whole
/// chars so every position the cursor reports is a char boundary.
#[derive(Clone)]
pub struct Cursor<'a> {
    pub s: &'a str,
    pub i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor positioned at byte offset `i` of `s`.
    pub fn at(s: &'a str, i: usize) -> Self {
        Self { s, i }
    }

    /// Peeks at the current char without advancing.
    pub fn peek(&self) -> Option<char> {
        self.s.get(self.i..)?.chars().next()
    }

    /// Checks if the remaining input starts with `pat`.
    pub fn starts_with(&self, pat: &str) -> bool {
        self.s.get(self.i..).is_some_and(|rest| rest.starts_with(pat))
    }

    /// Advances by one char, returning it.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.i += c.len_utf8();
        Some(c)
    }

    /// Consumes `pat` if the input starts with it.
    pub fn eat(&mut self, pat: &str) -> bool {
        if self.starts_with(pat) {
            self.i += pat.len();
            true
        } else {
            false
        }
    }

    /// Consumes exactly `times` consecutive copies of `pat`, or nothing.
    pub fn eat_repeated(&mut self, pat: &str, times: usize) -> bool {
        let saved = self.i;
        for _ in 0..times {
            if !self.eat(pat) {
                self.i = saved;
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::at("hello", 0);
        assert_eq!(cur.peek(), Some('h'));
        assert_eq!(cur.bump(), Some('h'));
        assert_eq!(cur.i, 1);
    }

    #[test]
    fn bump_moves_by_whole_chars() {
        let mut cur = Cursor::at("•x", 0);
        assert_eq!(cur.bump(), Some('•'));
        assert_eq!(cur.i, '•'.len_utf8());
        assert_eq!(cur.peek(), Some('x'));
    }

    #[test]
    fn starts_with_pattern_longer_than_remaining() {
        let cur = Cursor::at("ab", 1);
        assert!(!cur.starts_with("bc"));
        assert!(cur.starts_with("b"));
    }

    #[test]
    fn eat_repeated_is_all_or_nothing() {
        let mut cur = Cursor::at("[[[x", 0);
        assert!(!cur.eat_repeated("[[", 2));
        assert_eq!(cur.i, 0);
        assert!(cur.eat_repeated("[[", 1));
        assert_eq!(cur.i, 2);
    }

    #[test]
    fn bump_at_eof_returns_none() {
        let mut cur = Cursor::at("x", 1);
        assert_eq!(cur.bump(), None);
        assert_eq!(cur.peek(), None);
    }

    #[test]
    fn out_of_range_position_matches_nothing() {
        let cur = Cursor::at("hi", 10);
        assert_eq!(cur.peek(), None);
        assert!(!cur.starts_with("h"));
    }
}
