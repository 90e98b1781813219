//! Entry directory naming.

/// Turns an entry display name into a directory name.
///
/// Lower-cases the name, collapses each run of non-word characters (anything
/// other than a Unicode alphanumeric or `_`) into a single `-`, and trims
/// hyphens from both ends. Applying it twice gives the same result as once.
#[must_use]
pub fn sanitize_entry_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_sep = false;
    for ch in name.to_lowercase().chars() {
        if is_word_char(ch) {
            out.push(ch);
            prev_sep = false;
        } else if !prev_sep {
            out.push('-');
            prev_sep = true;
        }
    }
    out.trim_matches('-').to_string()
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
