/// Cleans extracted text for tokenization
///
/// Non-breaking spaces and line breaks become plain spaces and every character
/// is lower-cased. Total and side-effect free.
///
/// # Examples
///
/// ```
/// use catalog_crawler::catalog::normalize;
///
/// assert_eq!(normalize("Intro\u{a0}to\nPROGRAMMING"), "intro to programming");
/// ```
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '\u{a0}' | '\n' | '\r' => ' ',
            other => other,
        })
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_nbsp() {
        assert_eq!(normalize("CMSC\u{a0}12100"), "cmsc 12100");
    }

    #[test]
    fn test_replaces_newlines() {
        assert_eq!(normalize("one\ntwo\r\nthree"), "one two  three");
    }

    #[test]
    fn test_lowercases() {
        assert_eq!(normalize("Data STRUCTURES"), "data structures");
    }

    #[test]
    fn test_empty() {
        assert_eq!(normalize(""), "");
    }
}
