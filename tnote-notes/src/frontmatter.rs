use std::fmt::Write as _;

use yaml_rust2::{Yaml, YamlLoader};

use crate::errors::FrontmatterError;

const DELIMITER: &str = "---";

/// Decoded metadata block of a note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    pub title: String,
    pub date: String,
    pub tags: Vec<String>,
}

impl Frontmatter {
    /// Render the block as written at the top of a note file, including both
    /// delimiter lines.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(DELIMITER);
        out.push('\n');
        out.push_str("title: ");
        push_quoted(&mut out, &self.title);
        out.push_str("\ndate: ");
        push_quoted(&mut out, &self.date);
        out.push_str("\ntags: [");
        for (idx, tag) in self.tags.iter().enumerate() {
            if idx > 0 {
                out.push_str(", ");
            }
            push_quoted(&mut out, tag);
        }
        out.push_str("]\n");
        out.push_str(DELIMITER);
        out.push('\n');
        out
    }
}

/// Decode the frontmatter at the start of `raw`.
///
/// The first line must be `---`. Missing fields default to empty values;
/// unknown keys are ignored.
pub fn parse_frontmatter(raw: &str) -> Result<Frontmatter, FrontmatterError> {
    let (block, _body) = split_frontmatter(raw)?;

    let docs = YamlLoader::load_from_str(block).map_err(|e| FrontmatterError::Yaml(e.to_string()))?;
    let doc = match docs.into_iter().next() {
        None | Some(Yaml::Null) => return Ok(Frontmatter::default()),
        Some(doc @ Yaml::Hash(_)) => doc,
        Some(_) => return Err(FrontmatterError::NotAMapping),
    };

    Ok(Frontmatter {
        title: scalar_field(&doc, "title")?,
        date: scalar_field(&doc, "date")?,
        tags: tags_field(&doc)?,
    })
}

/// Split a note into its metadata block and body, both without delimiters.
pub fn split_frontmatter(raw: &str) -> Result<(&str, &str), FrontmatterError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut lines = raw.split_inclusive('\n');

    let start = match lines.next() {
        Some(first) if is_delimiter(first) => first.len(),
        _ => return Err(FrontmatterError::MissingOpeningDelimiter),
    };

    let mut offset = start;
    for line in lines {
        if is_delimiter(line) {
            return Ok((&raw[start..offset], &raw[offset + line.len()..]));
        }
        offset += line.len();
    }

    Err(FrontmatterError::Unterminated)
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(['\n', '\r']) == DELIMITER
}

fn scalar_field(doc: &Yaml, key: &'static str) -> Result<String, FrontmatterError> {
    scalar_text(&doc[key]).ok_or(FrontmatterError::InvalidField {
        field: key,
        expected: "a string",
    })
}

fn tags_field(doc: &Yaml) -> Result<Vec<String>, FrontmatterError> {
    let invalid = FrontmatterError::InvalidField {
        field: "tags",
        expected: "a list of strings",
    };

    match &doc["tags"] {
        Yaml::Array(items) => items
            .iter()
            .map(scalar_text)
            .collect::<Option<Vec<_>>>()
            .ok_or(invalid),
        Yaml::Null | Yaml::BadValue => Ok(Vec::new()),
        single => scalar_text(single).map(|tag| vec![tag]).ok_or(invalid),
    }
}

/// Textual form of a scalar; missing and null become empty.
fn scalar_text(value: &Yaml) -> Option<String> {
    match value {
        Yaml::String(s) | Yaml::Real(s) => Some(s.clone()),
        Yaml::Integer(n) => Some(n.to_string()),
        Yaml::Boolean(b) => Some(b.to_string()),
        Yaml::Null | Yaml::BadValue => Some(String::new()),
        Yaml::Array(_) | Yaml::Hash(_) | Yaml::Alias(_) => None,
    }
}

/// Append `value` as a YAML double-quoted scalar.
fn push_quoted(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() || matches!(c, '\u{2028}' | '\u{2029}' | '\u{feff}') => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flow_style_tags() {
        let raw = "---\ntitle: Groceries\ndate: 2024-01-01\ntags: [home, errands]\n---\n\nmilk\n";

        let front = parse_frontmatter(raw).expect("parse front matter");
        assert_eq!(front.title, "Groceries");
        assert_eq!(front.date, "2024-01-01");
        assert_eq!(front.tags, vec!["home", "errands"]);
    }

    #[test]
    fn parses_block_style_and_single_tag() {
        let raw = "---\ntitle: x\ntags:\n  - a\n  - b\n---\n";
        assert_eq!(parse_frontmatter(raw).unwrap().tags, vec!["a", "b"]);

        let raw = "---\ntags: solo\n---\n";
        assert_eq!(parse_frontmatter(raw).unwrap().tags, vec!["solo"]);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let front = parse_frontmatter("---\nauthor: someone\n---\nbody").unwrap();
        assert_eq!(front, Frontmatter::default());

        let front = parse_frontmatter("---\n---\n").unwrap();
        assert_eq!(front, Frontmatter::default());

        let front = parse_frontmatter("---\ntitle:\ntags:\n---\n").unwrap();
        assert_eq!(front, Frontmatter::default());
    }

    #[test]
    fn non_string_scalars_keep_their_text() {
        let front = parse_frontmatter("---\ntitle: 42\ndate: 2024\ntags: [1, true, 2.5]\n---\n").unwrap();
        assert_eq!(front.title, "42");
        assert_eq!(front.date, "2024");
        assert_eq!(front.tags, vec!["1", "true", "2.5"]);
    }

    #[test]
    fn missing_opening_delimiter_is_an_error() {
        let err = parse_frontmatter("title: nope\n---\n").unwrap_err();
        assert_eq!(err, FrontmatterError::MissingOpeningDelimiter);

        let err = parse_frontmatter("").unwrap_err();
        assert_eq!(err, FrontmatterError::MissingOpeningDelimiter);

        let err = parse_frontmatter("\n---\ntitle: late\n---\n").unwrap_err();
        assert_eq!(err, FrontmatterError::MissingOpeningDelimiter);
    }

    #[test]
    fn unterminated_block_is_an_error() {
        let err = parse_frontmatter("---\ntitle: open\n").unwrap_err();
        assert_eq!(err, FrontmatterError::Unterminated);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let err = parse_frontmatter("---\ntags: [unclosed\n---\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::Yaml(_)));

        let err = parse_frontmatter("---\n- a\n- b\n---\n").unwrap_err();
        assert_eq!(err, FrontmatterError::NotAMapping);

        let err = parse_frontmatter("---\ntags: {a: b}\n---\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::InvalidField { field: "tags", .. }));

        let err = parse_frontmatter("---\ntitle: [a]\n---\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::InvalidField { field: "title", .. }));
    }

    #[test]
    fn crlf_and_bom_are_tolerated() {
        let raw = "\u{feff}---\r\ntitle: win\r\ntags: [a]\r\n---\r\nbody\r\n";
        let (block, body) = split_frontmatter(raw).unwrap();
        assert_eq!(body, "body\r\n");
        assert!(block.contains("title: win"));
        assert_eq!(parse_frontmatter(raw).unwrap().title, "win");
    }

    #[test]
    fn body_is_left_untouched() {
        let raw = "---\ntitle: t\n---\nline one\n---\nline three\n";
        let (_, body) = split_frontmatter(raw).unwrap();
        assert_eq!(body, "line one\n---\nline three\n");
    }

    #[test]
    fn render_then_parse_keeps_fields() {
        let cases = [
            Frontmatter {
                title: "Plain title".to_string(),
                date: "2024-03-09".to_string(),
                tags: vec!["work".to_string(), "ideas".to_string()],
            },
            Frontmatter {
                title: "Quotes \"and\" \\slashes\\: colons, [brackets] #hash".to_string(),
                date: "yesterday-ish".to_string(),
                tags: vec!["a, b".to_string(), "c]".to_string(), "a, b".to_string()],
            },
            Frontmatter {
                title: "  padded\twith\ncontrol\u{7}chars  ".to_string(),
                date: String::new(),
                tags: vec!["true".to_string(), "42".to_string(), "ünïcødé".to_string()],
            },
            Frontmatter::default(),
        ];

        for front in cases {
            let rendered = front.render();
            assert!(rendered.starts_with("---\n"));
            assert_eq!(parse_frontmatter(&rendered).unwrap(), front, "{rendered}");
        }
    }
}
