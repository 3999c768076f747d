// Prompt construction for the claim assistant.
//
// Each reply picks one of three templates at random so consecutive answers
// don't read identically. The choice is cosmetic: every template carries the
// same context block and the same language instruction.

use rand::seq::IndexedRandom;
use rand::Rng;

use super::ConversationTurn;
use crate::language::Language;

/// Support line the assistant hands out when asked for contact details.
pub const SUPPORT_CONTACT: &str = "9038844756";

/// One phrasing of the assistant prompt.
///
/// `situation` and `guidelines` may contain `{amount}`, `{reason}` and
/// `{contact}` placeholders.
#[derive(Debug)]
pub struct PromptTemplate {
    pub persona: &'static str,
    pub situation: &'static str,
    pub guidelines: &'static [&'static str],
    pub word_limit: u32,
}

/// Templates for users whose claim was approved.
pub static APPROVED_TEMPLATES: [PromptTemplate; 3] = [
    PromptTemplate {
        persona: "You are a helpful insurance assistant. Generate a unique, natural response to the user's question.",
        situation: "User has an approved claim of ₹{amount}.",
        guidelines: &[
            "Answer their specific question in a unique way",
            "If they ask for contact info, provide: {contact}",
            "Make each response different and personal",
            "Avoid generic phrases like \"you're very welcome\" or \"don't hesitate\"",
            "Be conversational but vary your language",
            "Don't repeat the same greeting or closing phrases",
            "Make it sound like a real person having a conversation",
        ],
        word_limit: 100,
    },
    PromptTemplate {
        persona: "You are a friendly insurance helper. Create a fresh, unique response.",
        situation: "User's ₹{amount} claim is approved.",
        guidelines: &[
            "Respond to their actual question with originality",
            "For contact requests: {contact}",
            "Avoid repetitive language patterns",
            "Don't use the same phrases every time",
            "Be helpful but vary your approach",
            "Make each response feel unique and personal",
            "Avoid template-like responses",
        ],
        word_limit: 80,
    },
    PromptTemplate {
        persona: "You are a caring insurance assistant. Provide fresh, unique answers.",
        situation: "User's claim of ₹{amount} is eligible.",
        guidelines: &[
            "Answer what they're asking in a new way",
            "Contact number: {contact}",
            "Avoid repetitive language",
            "Make each response different",
            "Be empathetic but vary your tone",
            "Don't use the same structure every time",
            "Make it feel like a real conversation",
        ],
        word_limit: 90,
    },
];

/// Templates for users whose claim was rejected.
pub static REJECTED_TEMPLATES: [PromptTemplate; 3] = [
    PromptTemplate {
        persona: "You are a helpful insurance assistant. Generate a unique response to help the user.",
        situation: "User's claim was rejected due to: {reason}.",
        guidelines: &[
            "Answer their question in a fresh, unique way",
            "If they ask for contact info, provide: {contact}",
            "Explain the rejection clearly but vary your approach",
            "Avoid repetitive language patterns",
            "Don't use the same phrases every time",
            "Make each response feel personal and unique",
            "Avoid template-like responses",
        ],
        word_limit: 80,
    },
    PromptTemplate {
        persona: "You are a caring insurance helper. Create a unique, supportive response.",
        situation: "Claim rejected because: {reason}.",
        guidelines: &[
            "Respond to their question with originality",
            "For contact requests: {contact}",
            "Be supportive but vary your language",
            "Avoid repetitive phrases",
            "Make each response different",
            "Don't use the same structure every time",
            "Make it feel like a real conversation",
        ],
        word_limit: 70,
    },
    PromptTemplate {
        persona: "You are a helpful insurance assistant. Provide unique, solution-focused answers.",
        situation: "Claim couldn't be approved: {reason}.",
        guidelines: &[
            "Answer their question in a fresh way",
            "Contact number: {contact}",
            "Suggest alternatives with originality",
            "Avoid repetitive language",
            "Make each response unique",
            "Don't use template phrases",
            "Make it feel personal and different",
        ],
        word_limit: 75,
    },
];

/// Pick a template uniformly from the set matching the claim outcome.
pub fn choose_template<R: Rng + ?Sized>(eligible: bool, rng: &mut R) -> &'static PromptTemplate {
    let templates: &'static [PromptTemplate] = if eligible {
        &APPROVED_TEMPLATES
    } else {
        &REJECTED_TEMPLATES
    };
    // both sets are non-empty
    templates.choose(rng).unwrap_or(&templates[0])
}

/// The context block shared by every template.
pub fn conversation_context(turn: &ConversationTurn, language: Language) -> String {
    let position = if turn.is_initial_message {
        "the initial greeting".to_string()
    } else {
        format!("message #{} in an ongoing conversation", turn.message_count)
    };
    let status = if turn.eligibility {
        "Eligible"
    } else {
        "Not Eligible"
    };
    let rejection = if turn.eligibility {
        "N/A"
    } else {
        turn.reason.as_str()
    };
    let history = if turn.conversation_history.is_empty() {
        "No previous messages"
    } else {
        turn.conversation_history.as_str()
    };

    format!(
        "CONVERSATION CONTEXT:\n\
         - This is {position}\n\
         - User's name: {name}\n\
         - Claim amount: ₹{amount}\n\
         - Eligibility status: {status}\n\
         - Rejection reason: {rejection}\n\
         - Previous conversation: {history}\n\
         - User's language: {language}\n",
        name = turn.user_name(),
        amount = turn.claim_amount(),
    )
}

/// Assemble the full prompt for one turn.
pub fn build_prompt(
    turn: &ConversationTurn,
    language: Language,
    template: &PromptTemplate,
) -> String {
    let fill = |s: &str| {
        s.replace("{amount}", turn.claim_amount())
            .replace("{reason}", &turn.reason)
            .replace("{contact}", SUPPORT_CONTACT)
    };

    let mut prompt = String::new();
    prompt.push_str(template.persona);
    prompt.push_str("\n\n");
    prompt.push_str(&conversation_context(turn, language));
    prompt.push_str("\nCONTEXT: ");
    prompt.push_str(&fill(template.situation));
    prompt.push_str("\n\nRESPONSE GUIDELINES:\n");
    for line in template.guidelines {
        prompt.push_str("- ");
        prompt.push_str(&fill(line));
        prompt.push('\n');
    }
    prompt.push_str(&format!("- Keep it under {} words\n", template.word_limit));
    prompt.push_str(&format!(
        "- RESPOND IN THE SAME LANGUAGE AS THE USER: {}\n",
        language.as_str().to_uppercase()
    ));
    prompt.push_str(&format!("\nUser asked: \"{}\"\n", turn.message));
    prompt
}
