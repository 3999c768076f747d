// Document extraction: the record the model reads off a bill, the reference
// profiles it is checked against, and parsing of the model's reply.

pub mod models;
pub mod parse;
pub mod profiles;

/// Instruction sent alongside the bill image.
pub const EXTRACTION_PROMPT: &str = r#"
You are a document extraction and fraud detection assistant. From the hospital bill image, extract:
- Name (exact as written)
- Age (number only)
- Reason (treatment/diagnosis)
- Hospital (full name)
- Total bill amount (numbers only, no currency symbols)
- Date of service (if visible)
- Doctor name (if visible)

Also analyze for potential fraud indicators:
- Document quality and authenticity
- Suspicious patterns in amounts
- Unusual hospital names
- Missing critical information

Return in JSON format:
{
  "name": "...",
  "age": "...",
  "reason": "...",
  "hospital": "...",
  "amount": "...",
  "date": "...",
  "doctor": "...",
  "document_quality": "good/medium/poor",
  "suspicious_patterns": ["pattern1", "pattern2"],
  "missing_info": ["info1", "info2"]
}
"#;
