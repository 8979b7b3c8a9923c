/// Escape a string for a POSIX shell command line
///
/// Every character other than an ASCII letter, digit or `_` is preceded by a
/// backslash.
pub fn safequote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() * 2);
    for c in s.chars() {
        if !(c.is_ascii_alphanumeric() || c == '_') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted
}
