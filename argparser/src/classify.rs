/// Category of a single argument-vector token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Positional,
    /// `-abc`: one or more short options, possibly with an inline value.
    ShortCluster,
    /// `--name` or `--name=value`.
    LongOption,
    /// The bare `--`.
    Terminator,
}

/// ```
/// use argparser::{classify, Token};
///
/// assert_eq!(classify("-"), Token::Positional);
/// assert_eq!(classify("-vx"), Token::ShortCluster);
/// assert_eq!(classify("--"), Token::Terminator);
/// ```
pub fn classify(arg: &str) -> Token {
    match arg.as_bytes() {
        [b'-', b'-'] => Token::Terminator,
        [b'-', b'-', ..] => Token::LongOption,
        [b'-', _, ..] => Token::ShortCluster,
        _ => Token::Positional,
    }
}
