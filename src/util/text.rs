use std::borrow::Cow;

/// Make untrusted API text safe to print on one terminal line.
///
/// Removes ANSI CSI (`ESC [ ... final`) and OSC (`ESC ] ... BEL|ST`)
/// sequences, drops other C0 controls and DEL, and turns tab / CR / LF into
/// single spaces. Returns the input unchanged when nothing needs removing.
pub fn terminal_safe(s: &str) -> Cow<'_, str> {
    let needs_clean = s.chars().any(|c| c.is_control());
    if !needs_clean {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\x1b' => match chars.peek() {
                Some('[') => {
                    chars.next();
                    // Parameter and intermediate bytes run until a final byte in @..=~
                    for c in chars.by_ref() {
                        if ('\x40'..='\x7e').contains(&c) {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    while let Some(c) = chars.next() {
                        if c == '\x07' {
                            break;
                        }
                        if c == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            },
            '\t' | '\n' | '\r' => {
                if !out.ends_with(' ') {
                    out.push(' ');
                }
            }
            c if c.is_control() => {}
            c => out.push(c),
        }
    }

    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_borrowed() {
        let s = "Rust 2024 edition lands";
        assert!(matches!(terminal_safe(s), Cow::Borrowed(_)));
    }

    #[test]
    fn test_strips_csi() {
        assert_eq!(terminal_safe("\x1b[31mred\x1b[0m title"), "red title");
    }

    #[test]
    fn test_strips_osc_hyperlink() {
        let s = "\x1b]8;;https://evil.example\x07click\x1b]8;;\x1b\\ here";
        assert_eq!(terminal_safe(s), "click here");
    }

    #[test]
    fn test_newlines_collapse_to_space() {
        assert_eq!(terminal_safe("line one\r\n\tline two"), "line one line two");
    }

    #[test]
    fn test_drops_bare_controls() {
        assert_eq!(terminal_safe("a\x00b\x07c\x7fd"), "abcd");
    }

    #[test]
    fn test_keeps_unicode() {
        assert_eq!(terminal_safe("日本語\nニュース"), "日本語 ニュース");
    }
}
