//! Reserved-character escaping for `query_string` values.

/// Characters reserved by the Elasticsearch query-string syntax.
const RESERVED: &[char] = &[
    '+', '-', '=', '&', '|', '>', '<', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '?',
    ':', '\\', '/',
];

/// Escapes query-string reserved characters.
///
/// Every reserved character is prefixed with a single backslash, so
/// `kimchy!` becomes `kimchy\!`. The doubled operators `&&` and `||` are
/// escaped per character.
///
/// ```
/// assert_eq!(esdsl::escape_query_string("kimchy!"), r"kimchy\!");
/// assert_eq!(esdsl::escape_query_string("a && b"), r"a \&\& b");
/// ```
pub fn escape_query_string(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if RESERVED.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
