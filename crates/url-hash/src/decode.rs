use std::borrow::Cow;
use std::fmt;

use percent_encoding::percent_decode_str;
use serde::Deserialize;

/// How the hash value is post-processed after the `#` is stripped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HashDecoding {
    /// Return the fragment content exactly as supplied.
    #[default]
    Verbatim,
    /// Unescape `%XX` sequences; invalid UTF-8 becomes U+FFFD.
    Percent,
}

impl HashDecoding {
    pub const ALL: &'static [HashDecoding] = &[HashDecoding::Verbatim, HashDecoding::Percent];

    pub fn as_str(self) -> &'static str {
        match self {
            HashDecoding::Verbatim => "verbatim",
            HashDecoding::Percent => "percent",
        }
    }

    pub fn apply(self, value: &str) -> Cow<'_, str> {
        match self {
            HashDecoding::Verbatim => Cow::Borrowed(value),
            HashDecoding::Percent => percent_decode_str(value).decode_utf8_lossy(),
        }
    }
}

impl fmt::Display for HashDecoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_config_names() {
        let names: Vec<String> = HashDecoding::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["verbatim", "percent"]);
    }

    #[test]
    fn malformed_escapes_pass_through() {
        assert_eq!(HashDecoding::Percent.apply("100%"), "100%");
        assert_eq!(HashDecoding::Percent.apply("%zz"), "%zz");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        assert_eq!(HashDecoding::Percent.apply("a%FFb"), "a\u{FFFD}b");
    }
}
