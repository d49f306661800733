//! `$VAR` / `${VAR}` / `~` expansion for paths read from the config file.

/// Expand `raw`, resolving variables through `lookup`.
///
/// Unset variables expand to the empty string, as in a shell.
pub fn expand_with<F>(raw: &str, home: Option<&str>, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    if let Some(home) = home
        && (rest == "~" || rest.starts_with("~/"))
    {
        out.push_str(home);
        rest = &rest[1..];
    }

    let mut chars = rest.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }

        match chars.peek().copied() {
            Some((_, '{')) => {
                let start = idx + 2;
                match rest[start..].find('}') {
                    Some(len) => {
                        let name = &rest[start..start + len];
                        out.push_str(&lookup(name).unwrap_or_default());
                        // skip past the closing brace
                        while let Some((i, _)) = chars.next() {
                            if i == start + len {
                                break;
                            }
                        }
                    }
                    None => out.push(c),
                }
            }
            Some((_, next)) if next == '_' || next.is_ascii_alphanumeric() => {
                let start = idx + 1;
                let mut end = start;
                while let Some(&(i, n)) = chars.peek() {
                    if n == '_' || n.is_ascii_alphanumeric() {
                        end = i + n.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                out.push_str(&lookup(&rest[start..end]).unwrap_or_default());
            }
            _ => out.push(c),
        }
    }

    out
}
