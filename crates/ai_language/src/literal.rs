//! Word list literal exchanged with the normalizer
//!
//! Input is written as `['w1', 'w2']`. Output is read back in the same
//! shape; items may use either quote kind, since the tool prints whatever
//! its runtime's list repr produces (`"Ma'a"` for a word with an apostrophe).

use crate::error::NormalizationError;

/// Render words as a single-quoted list literal
pub fn encode(words: &[String]) -> String {
    let mut out = String::from("[");
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push('\'');
        for c in word.chars() {
            if matches!(c, '\\' | '\'') {
                out.push('\\');
            }
            out.push(c);
        }
        out.push('\'');
    }
    out.push(']');
    out
}

/// Parse a list literal into its items, in order
///
/// Surrounding whitespace is ignored. Unquoted items are taken up to the
/// next comma and trimmed.
///
/// # Errors
///
/// Returns `NormalizationError::MalformedOutput` when the text is not
/// bracketed or an item is not properly delimited.
pub fn parse(raw: &str) -> Result<Vec<String>, NormalizationError> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| malformed("expected a bracketed list", trimmed))?;

    let mut items = Vec::new();
    let mut chars = inner.chars().peekable();

    loop {
        skip_whitespace(&mut chars);
        let Some(&first) = chars.peek() else {
            break;
        };

        let item = if first == '\'' || first == '"' {
            chars.next();
            let item = read_quoted(&mut chars, first)
                .ok_or_else(|| malformed("unterminated quote", trimmed))?;
            skip_whitespace(&mut chars);
            item
        } else {
            let mut bare = String::new();
            while let Some(&c) = chars.peek() {
                if c == ',' {
                    break;
                }
                bare.push(c);
                chars.next();
            }
            bare.trim().to_string()
        };
        items.push(item);

        match chars.next() {
            None => break,
            Some(',') => {
                skip_whitespace(&mut chars);
                if chars.peek().is_none() {
                    // trailing comma
                    break;
                }
            },
            Some(_) => return Err(malformed("expected ',' between items", trimmed)),
        }
    }

    Ok(items)
}

fn skip_whitespace(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
}

/// Read up to the closing `quote`, resolving backslash escapes
fn read_quoted(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    quote: char,
) -> Option<String> {
    let mut item = String::new();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next()? {
                'n' => item.push('\n'),
                't' => item.push('\t'),
                other => item.push(other),
            },
            c if c == quote => return Some(item),
            c => item.push(c),
        }
    }
    None
}

fn malformed(reason: &str, raw: &str) -> NormalizationError {
    NormalizationError::MalformedOutput(format!("{reason}: {}", crate::error::excerpt(raw)))
}
