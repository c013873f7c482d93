// file: src/utils/template.rs
// description: prompt templates for the generation service
// reference: placeholders are substituted in a single pass

use std::collections::HashMap;

const QA_TEMPLATE: &str = "Generate factual Q&A pairs based on the text below. Ensure questions are context-aware.
Generate as many Q&A pairs, such that they cover the entire text. Keep the answers concise and factual.
Infer the correct timestamp from the text itself. If the timestamp is unclear, default to the article's date: {timestamp}.

Format:
Timestamp: <inferred timestamp or article date>
Q: <question>
A: <answer>

Text: {text}";

const REFINE_TEMPLATE: &str = "Check and refine the following part of the Temporal Knowledge Graph (TKG) to ensure it correctly represents the article.

**Article:**
{article}

**TKG Chunk:**
{entries}

- Ensure all timestamps, entities, and relationships are correct.
- Ensure that the timestamps are a proper date, and not some text. If no proper timestamp can be found, use the previous timestamp.
- If key details are missing, add them.
- Return only the corrected JSON.

Respond in valid JSON format.";

const FORMAT_TEMPLATE: &str = "The following is an article along with some extracted Q&A pairs.

### Article:
{article}

### Existing Q&A:
{qa}

### Task:
Format the Q&A pairs by inserting appropriate timestamps before each question. Use the article's content to infer the most accurate timestamps based on context. If no exact timestamp is found, default to the article's date: {timestamp}. Do NOT use today's date.

### Output Format:
Timestamp: <correct timestamp>
Q: <question>
A: <answer>";

#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn with_custom_template(template: String) -> Self {
        Self { template }
    }

    pub fn qa() -> Self {
        Self::with_custom_template(QA_TEMPLATE.to_string())
    }

    pub fn refine() -> Self {
        Self::with_custom_template(REFINE_TEMPLATE.to_string())
    }

    pub fn timestamp_format() -> Self {
        Self::with_custom_template(FORMAT_TEMPLATE.to_string())
    }

    pub fn render(&self, values: &[(&str, &str)]) -> String {
        let values: HashMap<&str, &str> = values.iter().copied().collect();
        self.render_with_map(&values)
    }

    /// Substitute `{name}` placeholders. Inserted values are never rescanned,
    /// and unknown placeholders are left as written.
    pub fn render_with_map(&self, values: &HashMap<&str, &str>) -> String {
        let mut result = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(open) = rest.find('{') {
            result.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            match after.find('}') {
                Some(close) if values.contains_key(&after[..close]) => {
                    result.push_str(values[&after[..close]]);
                    rest = &after[close + 1..];
                }
                _ => {
                    result.push('{');
                    rest = after;
                }
            }
        }

        result.push_str(rest);
        result
    }

    pub fn placeholders(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut rest = self.template.as_str();

        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) => {
                    let name = &after[..close];
                    if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                        names.push(name);
                    }
                    rest = &after[close + 1..];
                }
                None => break,
            }
        }

        names
    }
}
