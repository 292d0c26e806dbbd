//! Output formatters for url-hash results.

use serde::Serialize;

/// One resolved input, as emitted by the CLI.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct HashRecord {
    pub input: String,
    pub fragment: String,
    pub hash: String,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OutputFormat {
    #[default]
    Plain,
    Json,
}

/// Render records; plain output is one hash per line.
pub fn render(
    records: &[HashRecord],
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    let out = match format {
        OutputFormat::Plain => {
            let mut out = String::new();
            for record in records {
                out.push_str(&record.hash);
                out.push('\n');
            }
            out
        }
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(records)?;
            out.push('\n');
            out
        }
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(input: &str, fragment: &str, hash: &str) -> HashRecord {
        HashRecord {
            input: input.into(),
            fragment: fragment.into(),
            hash: hash.into(),
        }
    }

    #[test]
    fn plain_emits_one_hash_per_line() {
        let records = vec![
            record("#example.org", "#example.org", "example.org"),
            record("#", "#", ""),
        ];
        assert_eq!(
            render(&records, OutputFormat::Plain).expect("render plain"),
            "example.org\n\n"
        );
    }

    #[test]
    fn plain_with_no_records_is_empty() {
        assert_eq!(render(&[], OutputFormat::Plain).expect("render empty"), "");
    }

    #[test]
    fn json_lists_records_with_all_fields() {
        let records = vec![record(
            "https://gitpod.io/#example.org",
            "#example.org",
            "example.org",
        )];
        let rendered = render(&records, OutputFormat::Json).expect("render json");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");
        assert_eq!(
            value,
            serde_json::json!([{
                "input": "https://gitpod.io/#example.org",
                "fragment": "#example.org",
                "hash": "example.org"
            }])
        );
    }
}
