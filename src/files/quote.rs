//! POSIX single-quote escaping
//!
//! Every path or content value embedded in a guest shell command goes
//! through [`single_quote`]. Inside single quotes the shell interprets
//! nothing, so the only character needing treatment is the quote itself,
//! escaped with the classic `'"'"'` dance.

/// Wrap a value in single quotes, escaping embedded single quotes.
pub fn single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\"'\"'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Evaluate a quoted word the way a POSIX shell would: alternating
    /// single-quoted and double-quoted segments concatenate.
    fn shell_unquote(word: &str) -> Option<String> {
        let mut out = String::new();
        let mut chars = word.chars();
        loop {
            match chars.next() {
                None => return Some(out),
                Some('\'') => loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => out.push(c),
                        None => return None, // unterminated quote
                    }
                },
                Some('"') => loop {
                    match chars.next() {
                        Some('"') => break,
                        Some(c) => out.push(c),
                        None => return None,
                    }
                },
                Some(_) => return None, // bare character outside quotes
            }
        }
    }

    #[test]
    fn plain_value() {
        assert_eq!(single_quote("hello"), "'hello'");
    }

    #[test]
    fn embedded_single_quote() {
        assert_eq!(single_quote("it's"), "'it'\"'\"'s'");
        assert_eq!(shell_unquote(&single_quote("it's")).unwrap(), "it's");
    }

    #[test]
    fn backslashes_survive_unchanged() {
        assert_eq!(single_quote(r"a\b\c"), r"'a\b\c'");
        assert_eq!(shell_unquote(&single_quote(r"a\b\c")).unwrap(), r"a\b\c");
    }

    #[test]
    fn newlines_survive_unchanged() {
        let value = "line one\nline two\n";
        assert_eq!(shell_unquote(&single_quote(value)).unwrap(), value);
    }

    #[test]
    fn shell_metacharacters_are_inert() {
        let value = "$(rm -rf /); `echo hi` && $HOME | > file";
        assert_eq!(shell_unquote(&single_quote(value)).unwrap(), value);
    }

    proptest! {
        /// Quoting then shell-evaluating reproduces the input exactly, for
        /// any value including quotes, backslashes and newlines.
        #[test]
        fn quote_round_trips_through_shell_rules(value in "[ -~\n]*") {
            prop_assert_eq!(shell_unquote(&single_quote(&value)), Some(value));
        }
    }
}
