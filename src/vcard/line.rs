//! vCard content lines: `[group.]NAME[;PARAM[=v1,v2]]*:value`.
//!
//! Reading unfolds continuation lines and unescapes values; writing escapes,
//! folds at 75 octets and terminates every line with CRLF.

pub const BEGIN: &str = "BEGIN";
pub const END: &str = "END";
pub const VERSION: &str = "VERSION";
pub const CARD: &str = "VCARD";
pub const VCARD_VERSION: &str = "3.0";

const CRLF: &str = "\r\n";
const MAX_LINE_OCTETS: usize = 75;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    pub name: String,
    pub params: Vec<Param>,
    pub value: String,
}

impl ContentLine {
    /// Parses one unfolded line. Returns `None` for text that is not a
    /// content line at all (no name or no `:`).
    pub fn parse(raw: &str) -> Option<Self> {
        let colon = find_unquoted(raw, ':')?;
        let (head, value) = (&raw[..colon], &raw[colon + 1..]);

        let mut parts = split_unquoted(head, ';').into_iter();
        let qualified = parts.next()?.trim();
        // Groups ("item1.TEL") only tie properties together for display.
        let name = match qualified.rfind('.') {
            Some(dot) => &qualified[dot + 1..],
            None => qualified,
        };
        if name.is_empty() {
            return None;
        }

        let params = parts.filter_map(parse_param).collect();

        Some(Self {
            name: name.to_ascii_uppercase(),
            params,
            value: unescape(value),
        })
    }

    pub fn is_marker(&self, marker: &str) -> bool {
        self.name == marker && self.value.trim().eq_ignore_ascii_case(CARD)
    }

    /// First non-empty `TYPE` value, if the property carries one.
    pub fn type_tag(&self) -> Option<&str> {
        self.params
            .iter()
            .filter(|p| p.name.eq_ignore_ascii_case("TYPE"))
            .flat_map(|p| p.values.iter())
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
    }
}

fn parse_param(raw: &str) -> Option<Param> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match find_unquoted(raw, '=') {
        Some(eq) => Some(Param {
            name: raw[..eq].trim().to_ascii_uppercase(),
            values: split_unquoted(&raw[eq + 1..], ',')
                .into_iter()
                .map(|v| v.trim().trim_matches('"').to_string())
                .collect(),
        }),
        // vCard 2.1 style `TEL;CELL:...`
        None => Some(Param {
            name: "TYPE".to_string(),
            values: vec![raw.trim_matches('"').to_string()],
        }),
    }
}

fn find_unquoted(s: &str, needle: char) -> Option<usize> {
    let mut quoted = false;
    for (i, c) in s.char_indices() {
        match c {
            '"' => quoted = !quoted,
            c if c == needle && !quoted => return Some(i),
            _ => {}
        }
    }
    None
}

fn split_unquoted(s: &str, sep: char) -> Vec<&str> {
    let mut out = Vec::new();
    let mut quoted = false;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '"' => quoted = !quoted,
            c if c == sep && !quoted => {
                out.push(&s[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    out.push(&s[start..]);
    out
}

/// Joins folded lines back together. Accepts both CRLF and bare LF.
pub fn unfold(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for physical in text.split('\n') {
        let physical = physical.strip_suffix('\r').unwrap_or(physical);
        match physical.chars().next() {
            Some(' ') | Some('\t') if !lines.is_empty() => {
                if let Some(last) = lines.last_mut() {
                    last.push_str(&physical[1..]);
                }
            }
            _ => lines.push(physical.to_string()),
        }
    }
    lines
}

pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out
}

pub fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(c @ ('\\' | ',' | ';' | ':')) => out.push(c),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Appends `NAME[;TYPE=tag]:value` to `out`, folded and CRLF-terminated.
pub fn write_property(out: &mut String, name: &str, type_tag: Option<&str>, value: &str) {
    let mut line = String::from(name);
    if let Some(tag) = type_tag {
        line.push_str(";TYPE=");
        line.push_str(tag);
    }
    line.push(':');
    line.push_str(&escape(value));
    write_folded(out, &line);
}

pub fn write_marker(out: &mut String, marker: &str) {
    write_folded(out, &format!("{}:{}", marker, CARD));
}

fn write_folded(out: &mut String, line: &str) {
    let mut rest = line;
    let mut budget = MAX_LINE_OCTETS;
    loop {
        if rest.len() <= budget {
            out.push_str(rest);
            out.push_str(CRLF);
            return;
        }
        let mut cut = budget;
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        out.push_str(&rest[..cut]);
        out.push_str(CRLF);
        out.push(' ');
        rest = &rest[cut..];
        // The leading space of a continuation counts against the limit.
        budget = MAX_LINE_OCTETS - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_typed_property() {
        let line = ContentLine::parse("TEL;TYPE=cell:555-1000").unwrap();
        assert_eq!(line.name, "TEL");
        assert_eq!(line.type_tag(), Some("cell"));
        assert_eq!(line.value, "555-1000");
    }

    #[test]
    fn first_type_value_wins() {
        let line = ContentLine::parse("TEL;TYPE=work,voice;TYPE=pref:1").unwrap();
        assert_eq!(line.type_tag(), Some("work"));
    }

    #[test]
    fn bare_parameter_is_a_type() {
        let line = ContentLine::parse("TEL;HOME:1").unwrap();
        assert_eq!(line.type_tag(), Some("HOME"));
    }

    #[test]
    fn quoted_parameter_values_are_unwrapped() {
        let line = ContentLine::parse("EMAIL;TYPE=\"home\":a@b.example").unwrap();
        assert_eq!(line.type_tag(), Some("home"));
        assert_eq!(line.value, "a@b.example");
    }

    #[test]
    fn group_prefix_is_dropped_and_name_uppercased() {
        let line = ContentLine::parse("item1.email;type=WORK:x@y.example").unwrap();
        assert_eq!(line.name, "EMAIL");
        assert_eq!(line.type_tag(), Some("WORK"));
    }

    #[test]
    fn missing_type_yields_none() {
        let line = ContentLine::parse("TEL:555").unwrap();
        assert_eq!(line.type_tag(), None);
        let line = ContentLine::parse("TEL;TYPE=:555").unwrap();
        assert_eq!(line.type_tag(), None);
    }

    #[test]
    fn value_may_contain_colons() {
        let line = ContentLine::parse("NOTE:see: here").unwrap();
        assert_eq!(line.value, "see: here");
    }

    #[test]
    fn text_without_colon_is_not_a_line() {
        assert_eq!(ContentLine::parse("garbage"), None);
        assert_eq!(ContentLine::parse(":value"), None);
    }

    #[test]
    fn markers_are_recognized_case_insensitively() {
        assert!(ContentLine::parse("begin:vcard").unwrap().is_marker(BEGIN));
        assert!(ContentLine::parse("END:VCARD").unwrap().is_marker(END));
        assert!(!ContentLine::parse("BEGIN:VCALENDAR").unwrap().is_marker(BEGIN));
    }

    #[test]
    fn unfold_joins_continuations() {
        let lines = unfold("FN:Mr.Jo\r\n hn Doe\r\nTEL;TYPE=cell:1\n\tX");
        assert_eq!(lines, vec!["FN:Mr.John Doe", "TEL;TYPE=cell:1X"]);
    }

    #[test]
    fn escape_roundtrips_special_characters() {
        let raw = "a,b;c\\d\ne";
        assert_eq!(escape(raw), "a\\,b\\;c\\\\d\\ne");
        assert_eq!(unescape(&escape(raw)), raw);
    }

    #[test]
    fn unescape_keeps_unknown_sequences() {
        assert_eq!(unescape("a\\tb"), "a\\tb");
        assert_eq!(unescape("trailing\\"), "trailing\\");
    }

    #[test]
    fn short_lines_are_not_folded() {
        let mut out = String::new();
        write_property(&mut out, "TEL", Some("CELL"), "555-1000");
        assert_eq!(out, "TEL;TYPE=CELL:555-1000\r\n");
    }

    #[test]
    fn long_lines_fold_within_limit() {
        let mut out = String::new();
        let value = "é".repeat(80);
        write_property(&mut out, "FN", None, &value);
        for physical in out.split("\r\n").filter(|l| !l.is_empty()) {
            assert!(physical.len() <= MAX_LINE_OCTETS, "{} octets", physical.len());
        }
        let unfolded = unfold(&out);
        assert_eq!(unfolded[0], format!("FN:{}", value));
    }
}
