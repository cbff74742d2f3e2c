//! Case folding shared by title matching and snippet search.

/// Lowercase `c` when its lowercase form is a single char; otherwise keep it.
///
/// Folding never changes the char count, so an index into the folded text is
/// an index into the original.
pub fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

pub fn fold_case(s: &str) -> String {
    s.chars().map(fold_char).collect()
}
