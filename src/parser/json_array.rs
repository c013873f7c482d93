// file: src/parser/json_array.rs
// description: tolerant extraction of a JSON array embedded in free-form model output
// reference: https://docs.rs/serde_json

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseFailure {
    #[error("response was empty")]
    EmptyResponse,

    #[error("no JSON array found in response")]
    NoArray,

    #[error("unbalanced brackets starting at byte {0}")]
    Unbalanced(usize),

    #[error("malformed JSON array: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("array contained no entries")]
    EmptyArray,
}

/// Byte range of the first balanced `[...]` span, skipping brackets inside strings.
pub fn find_array_span(text: &str) -> Result<(usize, usize), ParseFailure> {
    let start = text.find('[').ok_or(ParseFailure::NoArray)?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((start, start + offset + 1));
                }
            }
            _ => {}
        }
    }

    Err(ParseFailure::Unbalanced(start))
}

/// Parse the first balanced JSON array in `text`. Surrounding prose is ignored.
pub fn extract_json_array(text: &str) -> Result<Vec<Value>, ParseFailure> {
    if text.trim().is_empty() {
        return Err(ParseFailure::EmptyResponse);
    }

    let (start, end) = find_array_span(text)?;
    let values: Vec<Value> = serde_json::from_str(&text[start..end])?;

    if values.is_empty() {
        return Err(ParseFailure::EmptyArray);
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_extracts_array_from_prose() {
        let response = "Here is the corrected JSON:\n```json\n[{\"a\": 1}, {\"b\": [2, 3]}]\n```\nDone.";
        let values = extract_json_array(response).unwrap();
        assert_eq!(values, vec![json!({"a": 1}), json!({"b": [2, 3]})]);
    }

    #[test]
    fn test_brackets_inside_strings_are_ignored() {
        let response = r#"[{"note": "closing ] early", "quote": "say \"[\""}] trailing ]"#;
        let values = extract_json_array(response).unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0]["note"], "closing ] early");
    }

    #[test]
    fn test_first_array_wins() {
        let values = extract_json_array("[{\"x\": 1}] and later [{\"y\": 2}]").unwrap();
        assert_eq!(values, vec![json!({"x": 1})]);
    }

    #[test]
    fn test_no_array() {
        assert!(matches!(
            extract_json_array("{\"entity\": \"no array\"}"),
            Err(ParseFailure::NoArray)
        ));
    }

    #[test]
    fn test_unbalanced() {
        assert!(matches!(
            extract_json_array("Result: [{\"a\": 1},"),
            Err(ParseFailure::Unbalanced(8))
        ));
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(
            extract_json_array("[{\"a\": 1,}]"),
            Err(ParseFailure::Malformed(_))
        ));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(matches!(extract_json_array("  \n"), Err(ParseFailure::EmptyResponse)));
        assert!(matches!(extract_json_array("[]"), Err(ParseFailure::EmptyArray)));
    }
}
