// Composition tests: verifying that the pure pieces chain together.
//
// These tests exercise the data flow between modules:
//   model reply -> parse -> profile lookup -> fraud score -> response JSON
// and the chat path:
//   message -> language -> template -> prompt
// without any network calls.

use claimsense::chat::prompts::{build_prompt, choose_template};
use claimsense::chat::ConversationTurn;
use claimsense::extraction::parse::parse_model_output;
use claimsense::extraction::profiles::{ProfileDirectory, StaticProfiles};
use claimsense::fraud::{score, RiskLevel};
use claimsense::language::{detect_language, Language};
use claimsense::pipeline::document::ClaimAnalysis;

const MODEL_REPLY: &str = r#"Sure! Here is the extracted information:
```json
{
  "name": "Vandan Dalvi",
  "age": "26",
  "reason": "Appendectomy",
  "hospital": "Sample Multispeciality Hospital",
  "amount": "75000",
  "date": "2024-03-14",
  "doctor": "Dr. Mehta",
  "document_quality": "medium",
  "suspicious_patterns": ["Amount appears handwritten"],
  "missing_info": []
}
```"#;

#[tokio::test]
async fn model_reply_to_verdict() {
    let extracted = parse_model_output(MODEL_REPLY).unwrap();
    let profiles = StaticProfiles::demo();
    let profile = profiles.lookup(None).await.unwrap();

    let verdict = score(&extracted, profile.as_ref());

    // high amount + hospital + prior claims; 75,000 is not a round multiple
    assert_eq!(verdict.fraud_score, 20 + 30 + 10);
    assert_eq!(verdict.risk_level, RiskLevel::High);
    assert_eq!(verdict.fraud_reasons.len(), 3);
}

#[tokio::test]
async fn other_policy_holder_adds_name_mismatch() {
    let extracted = parse_model_output(MODEL_REPLY).unwrap();
    let profiles = StaticProfiles::demo();
    let profile = profiles.lookup(Some("9123456780")).await.unwrap();

    let verdict = score(&extracted, profile.as_ref());
    assert_eq!(verdict.fraud_score, 20 + 30 + 10 + 25);
    assert_eq!(
        verdict.fraud_reasons.last().map(String::as_str),
        Some("Name mismatch with user profile")
    );
}

#[test]
fn analysis_json_merges_fields_and_verdict() {
    let extracted = parse_model_output(MODEL_REPLY).unwrap();
    let verdict = score(&extracted, None);
    let analysis = ClaimAnalysis::new(extracted, verdict);

    let json = serde_json::to_value(&analysis).unwrap();
    assert_eq!(json["name"], "Vandan Dalvi");
    assert_eq!(json["document_quality"], "medium");
    assert_eq!(json["suspicious_patterns"][0], "Amount appears handwritten");
    assert_eq!(json["fraud_detection"]["fraud_score"], 50);
    assert_eq!(json["fraud_detection"]["risk_level"], "High");
    assert_eq!(json["fraud_detection"]["is_suspicious"], true);
}

#[test]
fn model_supplied_verdict_is_replaced() {
    let extracted = parse_model_output(
        r#"{"name": "A", "amount": "100", "fraud_detection": {"fraud_score": 0}}"#,
    )
    .unwrap();
    let verdict = score(&extracted, None);
    let analysis = ClaimAnalysis::new(extracted, verdict);

    let text = serde_json::to_string(&analysis).unwrap();
    assert_eq!(text.matches("\"fraud_detection\"").count(), 1, "{text}");

    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["fraud_detection"]["risk_level"], "Low");
    assert_eq!(json["fraud_detection"]["is_suspicious"], false);
    assert_eq!(json["fraud_detection"]["fraud_reasons"], serde_json::json!([]));
}

#[test]
fn raw_reply_scores_without_amount_rules() {
    let extracted = parse_model_output("The image is too blurry to read.").unwrap();
    let verdict = score(&extracted, None);
    assert_eq!(verdict.fraud_score, 0);

    let json = serde_json::to_value(&ClaimAnalysis::new(extracted, verdict)).unwrap();
    assert_eq!(json["raw"], "The image is too blurry to read.");
}

#[test]
fn chat_prompt_carries_detected_language() {
    let turn: ConversationTurn = serde_json::from_str(
        r#"{
            "message": "maza paisa kadhi yeil",
            "eligibility": false,
            "reason": "Hospital not in network",
            "messageCount": 2,
            "extracted": {"name": "Vandan Dalvi", "amount": "75000"}
        }"#,
    )
    .unwrap();

    let language = detect_language(&turn.message);
    assert_eq!(language, Language::Marathi);

    let mut rng = rand::rng();
    let template = choose_template(turn.eligibility, &mut rng);
    let prompt = build_prompt(&turn, language, template);

    assert!(prompt.contains("RESPOND IN THE SAME LANGUAGE AS THE USER: MARATHI"));
    assert!(prompt.contains("Hospital not in network"));
    assert!(prompt.contains("User's name: Vandan Dalvi"));
    assert!(prompt.contains("Claim amount: ₹75000"));
    assert!(prompt.contains("message #2 in an ongoing conversation"));
}
