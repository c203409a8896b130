//! Prompt rendering for the structured extraction call.

use serde::{Deserialize, Serialize};

/// Which output schema the model is asked to fill in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptVariant {
    /// Full itemized receipt breakdown.
    Detailed,
    /// Single title/amount/category summary.
    Aggregate,
}

const HEADER: &str =
    "You are an intelligent assistant that extracts structured data from OCR text of a receipt.";

const INSTRUCTION: &str =
    "Only return raw JSON. Do not add explanations or wrap in code blocks.";

const DETAILED_SCHEMA: &str = r#"Please parse the text and return the data in the following JSON format:

{
  "merchant_info": {
    "name": "string",
    "address": ["string"],
    "phone": "string"
  },
  "receipt_info": {
    "date": "string",
    "time": "string",
    "server": "string",
    "table": "string"
  },
  "items": [
    {
      "name": "string",
      "price": float
    }
  ],
  "totals": {
    "subtotal": float,
    "tax": float,
    "service_charge": {
      "percent": int,
      "amount": float
    },
    "total": float
  },
  "tip_suggestions": {
    "15%": float,
    "18%": float,
    "20%": float
  }
}"#;

const AGGREGATE_SCHEMA: &str = r#"Please summarize the receipt and return the data in the following JSON format:

{
  "title": "string",
  "amount": float,
  "category": "one of: Food, Transport, Housing, Utilities, Entertainment, Shopping, Health, Other"
}"#;

/// Render the fixed extraction prompt with the OCR text embedded verbatim.
///
/// Pure template assembly: arbitrary or empty `raw_text` still yields a
/// well-formed prompt. The two variants differ only in the schema block.
pub fn build_prompt(variant: PromptVariant, raw_text: &str) -> String {
    let schema = match variant {
        PromptVariant::Detailed => DETAILED_SCHEMA,
        PromptVariant::Aggregate => AGGREGATE_SCHEMA,
    };

    format!("{HEADER}\n\nOCR Text:\n{raw_text}\n\n{schema}\n\n{INSTRUCTION}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn embeds_raw_text_verbatim() {
        let raw = "Cafe Luna\nEspresso 3.50\n<garbled> %%$ ";
        let prompt = build_prompt(PromptVariant::Detailed, raw);
        assert!(prompt.contains(raw));
    }

    #[test]
    fn empty_text_still_renders_template() {
        let prompt = build_prompt(PromptVariant::Aggregate, "");
        assert!(prompt.starts_with(HEADER));
        assert!(prompt.contains("OCR Text:\n\n"));
        assert!(prompt.trim_end().ends_with(INSTRUCTION));
    }

    #[test]
    fn variants_differ_only_in_schema_block() {
        let detailed = build_prompt(PromptVariant::Detailed, "x");
        let aggregate = build_prompt(PromptVariant::Aggregate, "x");

        assert_ne!(detailed, aggregate);
        for prompt in [&detailed, &aggregate] {
            assert!(prompt.starts_with(HEADER));
            assert!(prompt.contains("OCR Text:\nx\n"));
            assert!(prompt.trim_end().ends_with(INSTRUCTION));
        }
        assert!(detailed.contains("\"tip_suggestions\""));
        assert!(aggregate.contains("\"category\""));
    }

    #[test]
    fn rendering_is_deterministic() {
        let a = build_prompt(PromptVariant::Detailed, "same input");
        let b = build_prompt(PromptVariant::Detailed, "same input");
        assert_eq!(a, b);
    }
}
