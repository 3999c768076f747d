// Chat reply pipeline: detect the message language, pick a prompt template,
// ask the model.

use anyhow::{Context, Result};
use tracing::info;

use crate::chat::prompts::{build_prompt, choose_template};
use crate::chat::{ChatReply, ConversationTurn};
use crate::gemini::{ContentGenerator, Part};
use crate::language::detect_language;

/// Generate the assistant's reply to one conversation turn.
pub async fn reply(generator: &dyn ContentGenerator, turn: &ConversationTurn) -> Result<ChatReply> {
    let language = detect_language(&turn.message);

    // ThreadRng is !Send; keep it out of scope across the await below.
    let template = {
        let mut rng = rand::rng();
        choose_template(turn.eligibility, &mut rng)
    };
    let prompt = build_prompt(turn, language, template);

    info!(
        language = %language,
        eligible = turn.eligibility,
        message_count = turn.message_count,
        "Generating chat reply"
    );

    let reply = generator
        .generate(vec![Part::Text(prompt)])
        .await
        .context("Chat reply generation failed")?;

    Ok(ChatReply { reply, language })
}
