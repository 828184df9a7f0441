//! Memory-assistant prompt construction.

/// Builds the answer prompt from a user question and assembled capture
/// context (most recent capture first).
#[must_use]
pub fn build_answer_prompt(question: &str, context: &str) -> String {
    format!(
        r#"You are Rewind, an AI memory assistant. Your task is to analyze screenshots from a user's computer and help them remember what they were doing. Be conversational, friendly, and concise.

User Question: "{question}"

Here are the relevant screenshots, from most recent to oldest:

{context}

When responding:
1. Start with a brief, natural acknowledgment of the question.
2. Provide a clear, direct answer to the question if possible.
3. Describe what you see in the screenshots in a conversational way, focusing on the most relevant information.
4. If you notice any interesting details or patterns across the screenshots, point them out.
5. If the question asks about timing, be specific about dates and times.
6. End with a brief, relevant conclusion or observation.

Remember, you're helping the user recall their recent activities, so be helpful and specific."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_question_and_context() {
        let prompt = build_answer_prompt("what was I reading?", "Timestamp: ...\nContent:\nrust docs");
        assert!(prompt.contains(r#"User Question: "what was I reading?""#));
        assert!(prompt.contains("rust docs"));
        assert!(prompt.contains("from most recent to oldest"));
    }
}
