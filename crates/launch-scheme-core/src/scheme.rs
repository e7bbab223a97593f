//! URL scheme names.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A lowercased URL scheme name such as `shizou`.
///
/// Restricted to RFC 3986 scheme syntax (`ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`),
/// which also makes it a valid file name stem, registry key name and MIME subtype.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scheme(String);

impl Scheme {
    pub fn parse(raw: &str) -> Result<Self> {
        let name = raw.trim().to_ascii_lowercase();
        let invalid = |reason: &str| Error::InvalidScheme {
            scheme: raw.to_string(),
            reason: reason.to_string(),
        };

        let mut chars = name.chars();
        match chars.next() {
            None => return Err(invalid("scheme is empty")),
            Some(c) if !c.is_ascii_alphabetic() => {
                return Err(invalid("must start with a letter"));
            }
            Some(_) => {}
        }
        if let Some(c) = chars.find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')))
        {
            return Err(invalid(&format!("character '{c}' is not allowed")));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters, as consumed by the launcher scripts.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    /// `"<scheme>:"`, the prefix every dispatched URL starts with.
    pub fn prefix(&self) -> String {
        format!("{}:", self.0)
    }

    /// Capitalizes the first letter of each alphanumeric run (`my-tv` -> `My-Tv`).
    pub fn title_case(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        let mut at_word_start = true;
        for c in self.0.chars() {
            if c.is_ascii_alphabetic() {
                if at_word_start {
                    out.push(c.to_ascii_uppercase());
                } else {
                    out.push(c);
                }
                at_word_start = false;
            } else {
                out.push(c);
                at_word_start = !c.is_ascii_digit();
            }
        }
        out
    }
}

impl FromStr for Scheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Scheme {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lowercases() {
        assert_eq!(Scheme::parse("ShIzOu").unwrap().as_str(), "shizou");
        assert_eq!(Scheme::parse("  FOO ").unwrap().as_str(), "foo");
    }

    #[test]
    fn test_parse_accepts_rfc3986_punctuation() {
        assert!(Scheme::parse("web+mpv").is_ok());
        assert!(Scheme::parse("my-player.v2").is_ok());
    }

    #[test]
    fn test_parse_rejects_invalid() {
        for bad in ["", "   ", "1abc", "-abc", "foo bar", "foo/bar", "foo:bar", "föo"] {
            let err = Scheme::parse(bad).unwrap_err();
            assert!(
                matches!(err, Error::InvalidScheme { .. }),
                "expected rejection for {bad:?}"
            );
        }
    }

    #[test]
    fn test_title_case() {
        assert_eq!(Scheme::parse("foo").unwrap().title_case(), "Foo");
        assert_eq!(Scheme::parse("my-tv").unwrap().title_case(), "My-Tv");
        assert_eq!(Scheme::parse("web+mpv").unwrap().title_case(), "Web+Mpv");
        assert_eq!(Scheme::parse("a1b").unwrap().title_case(), "A1b");
    }

    #[test]
    fn test_prefix_and_char_len() {
        let scheme = Scheme::parse("bar").unwrap();
        assert_eq!(scheme.prefix(), "bar:");
        assert_eq!(scheme.char_len(), 3);
    }
}
