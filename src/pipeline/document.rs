// Bill analysis pipeline: image -> model extraction -> parse -> profile
// lookup -> fraud score.
//
// Shared by POST /upload and `claimsense extract`. The model call and the
// profile lookup are injected so neither caller owns a global client.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::extraction::models::ExtractedClaim;
use crate::extraction::parse::parse_model_output;
use crate::extraction::profiles::ProfileDirectory;
use crate::extraction::EXTRACTION_PROMPT;
use crate::fraud::{self, RiskVerdict};
use crate::gemini::{ContentGenerator, Part};

/// An uploaded bill with a MIME type the model accepts.
#[derive(Debug, Clone)]
pub struct DocumentImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl DocumentImage {
    /// Validate an upload. The content is sniffed first; the declared
    /// content type is only trusted when sniffing finds nothing.
    pub fn new(bytes: Vec<u8>, declared_type: Option<&str>) -> Result<Self> {
        if bytes.is_empty() {
            anyhow::bail!("Uploaded file is empty");
        }

        let mime_type = match sniff_document_mime(&bytes) {
            Some(mime) => mime.to_string(),
            None => match declared_type.map(str::trim) {
                Some(t) if t.starts_with("image/") => t.to_string(),
                _ => anyhow::bail!("Unsupported document type; upload a JPEG, PNG, WEBP, GIF or PDF"),
            },
        };

        Ok(Self { mime_type, bytes })
    }
}

/// Identify a document by its magic bytes.
pub fn sniff_document_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some("image/png"),
        [b'G', b'I', b'F', b'8', ..] => Some("image/gif"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        [b'%', b'P', b'D', b'F', ..] => Some("application/pdf"),
        _ => None,
    }
}

/// Extracted fields with the fraud verdict attached, as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ClaimAnalysis {
    #[serde(flatten)]
    pub extracted: ExtractedClaim,
    pub fraud_detection: RiskVerdict,
}

impl ClaimAnalysis {
    /// Attach `verdict` to the extracted fields.
    ///
    /// A `fraud_detection` key the model put in its own output is dropped so
    /// the engine's verdict is the only one serialized.
    pub fn new(mut extracted: ExtractedClaim, verdict: RiskVerdict) -> Self {
        extracted.extra.remove("fraud_detection");
        Self {
            extracted,
            fraud_detection: verdict,
        }
    }
}

/// Run the full analysis for one bill.
///
/// `mobile` selects the reference profile; `None` uses the directory default.
pub async fn analyze_document(
    generator: &dyn ContentGenerator,
    profiles: &dyn ProfileDirectory,
    image: DocumentImage,
    mobile: Option<&str>,
) -> Result<ClaimAnalysis> {
    info!(
        mime_type = %image.mime_type,
        bytes = image.bytes.len(),
        "Extracting claim fields"
    );

    let reply = generator
        .generate(vec![
            Part::text(EXTRACTION_PROMPT),
            Part::InlineData {
                mime_type: image.mime_type,
                data: image.bytes,
            },
        ])
        .await
        .context("Document extraction failed")?;

    let extracted = parse_model_output(&reply)?;

    let profile = profiles
        .lookup(mobile)
        .await
        .context("Profile lookup failed")?;

    let fraud_detection = fraud::score(&extracted, profile.as_ref());

    info!(
        fraud_score = fraud_detection.fraud_score,
        risk_level = %fraud_detection.risk_level,
        has_profile = profile.is_some(),
        "Document analyzed"
    );

    Ok(ClaimAnalysis::new(extracted, fraud_detection))
}
