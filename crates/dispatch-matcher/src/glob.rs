//! Glob patterns for branch references.
//!
//! Supported syntax: `*` (any run of characters, including `/`), `?` (one
//! character), `[abc]`, `[a-z]` and `[!a-z]` classes, `{a,b}` alternatives
//! and `\` escapes. Patterns are compiled to an anchored [`Regex`].

use regex::Regex;

#[derive(Debug, Clone)]
pub struct GlobPattern {
    regex: Regex,
}

impl GlobPattern {
    /// Compile a glob. Returns `None` for patterns that are not valid globs.
    pub fn new(pattern: &str) -> Option<Self> {
        let body = translate(pattern)?;
        let regex = Regex::new(&format!("^(?s:{})$", body)).ok()?;
        Some(Self { regex })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Match `text` against `pattern`; invalid patterns never match.
pub fn glob_match(pattern: &str, text: &str) -> bool {
    GlobPattern::new(pattern).is_some_and(|glob| glob.is_match(text))
}

fn translate(pattern: &str) -> Option<String> {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut chars = pattern.chars().peekable();
    let mut depth = 0usize;

    while let Some(c) = chars.next() {
        match c {
            '*' => {
                while chars.peek() == Some(&'*') {
                    chars.next();
                }
                out.push_str(".*");
            }
            '?' => out.push('.'),
            '\\' => push_literal(&mut out, chars.next()?),
            '[' => {
                let mut class = String::from("[");
                if matches!(chars.peek(), Some('!') | Some('^')) {
                    chars.next();
                    class.push('^');
                }
                let mut items = 0;
                loop {
                    let lo = match chars.next()? {
                        ']' if items > 0 => break,
                        '\\' => chars.next()?,
                        other => other,
                    };
                    push_class_char(&mut class, lo);
                    if chars.peek() == Some(&'-') {
                        chars.next();
                        let hi = match chars.next()? {
                            ']' => {
                                // trailing `-` is literal
                                push_class_char(&mut class, '-');
                                break;
                            }
                            '\\' => chars.next()?,
                            other => other,
                        };
                        if hi < lo {
                            return None;
                        }
                        class.push('-');
                        push_class_char(&mut class, hi);
                    }
                    items += 1;
                }
                class.push(']');
                out.push_str(&class);
            }
            '{' => {
                depth += 1;
                out.push_str("(?:");
            }
            ',' if depth > 0 => out.push('|'),
            '}' if depth > 0 => {
                depth -= 1;
                out.push(')');
            }
            other => push_literal(&mut out, other),
        }
    }

    (depth == 0).then_some(out)
}

fn push_literal(out: &mut String, c: char) {
    let mut buf = [0u8; 4];
    out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}

fn push_class_char(class: &mut String, c: char) {
    if matches!(c, '\\' | '[' | ']' | '^' | '-' | '&' | '~') {
        class.push('\\');
    }
    class.push(c);
}
