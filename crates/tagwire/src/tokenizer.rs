//! Top-level token splitter for record and list bodies.
//!
//! A serialized record or list body is a run of space-separated sibling
//! values, where each sibling may itself contain spaces inside nested
//! `{}`/`[]` pairs or inside a quoted string. The splitter tracks nesting
//! depth and quote state so it only breaks at the top level.

/// Splits `body` into its top-level sibling tokens.
///
/// Quote marks and brackets are retained in the emitted tokens so each
/// token is independently re-parseable. Malformed input (unbalanced
/// brackets, an unterminated quote) produces a best-effort token list
/// rather than an error; the downstream decoder rejects what it cannot
/// parse.
pub fn tokenize(body: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut buf = String::new();
    let mut depth: i32 = 0;
    let mut in_quotes = false;

    for c in body.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                buf.push(c);
            }
            ' ' if depth == 0 && !in_quotes => {
                if !buf.is_empty() {
                    tokens.push(std::mem::take(&mut buf));
                }
            }
            '{' | '[' => {
                depth += 1;
                buf.push(c);
            }
            '}' | ']' => {
                depth -= 1;
                buf.push(c);
            }
            _ => buf.push(c),
        }
    }

    if !buf.is_empty() {
        tokens.push(buf);
    }

    tokens
}
