use textcraft_core::{Audience, EmailKind, InsightKind, OperationKind, StyleKind};

/// Build the instruction prompt for one transformation request. Pure string
/// concatenation; deterministic for a given (text, kind, audience).
///
/// The audience modifier applies to the style and email families only; the
/// insight family always ignores it.
pub fn build_prompt(text: &str, kind: &OperationKind, audience: Audience) -> String {
    match kind {
        OperationKind::Style(style) => style_prompt(text, style, audience),
        OperationKind::Email(email) => email_prompt(text, email, audience),
        OperationKind::Insight(insight) => analysis_prompt(text, insight),
    }
}

fn style_prompt(text: &str, kind: &StyleKind, audience: Audience) -> String {
    let mut prompt = format!("Transform the following text: \"{}\"\n\n", text);

    prompt.push_str(match kind {
        StyleKind::Formal => {
            "Convert this text into formal, professional language suitable for business \
             communication. Use proper grammar, avoid contractions, and maintain a respectful tone."
        }
        StyleKind::Casual => {
            "Make this text more casual and conversational. Use contractions, simple language, \
             and a friendly tone as if speaking to a friend."
        }
        StyleKind::Joke => {
            "Add humor to this text. Make it funny and light-hearted. You can add puns, jokes, \
             or a humorous twist."
        }
        StyleKind::Shakespearean => {
            "Rewrite this text in Shakespearean style. Use archaic English, poetic language, \
             and phrases typical of Shakespeare's works."
        }
        StyleKind::Emoji => {
            "Add relevant emojis throughout this text to enhance its meaning. Don't overdo it, \
             but place them strategically to complement the message."
        }
        StyleKind::Grammar => {
            "Fix any grammatical errors, improve sentence structure, and enhance readability \
             while maintaining the original meaning."
        }
        StyleKind::Concise => {
            "Make this text more concise. Eliminate unnecessary words, replace verbose phrases \
             with simpler alternatives, and make it shorter without losing essential meaning."
        }
        StyleKind::Custom(_) => "Improve this text to make it clearer and more effective.",
    });

    if let Some(block) = style_audience_block(audience) {
        prompt.push_str("\n\n");
        prompt.push_str(block);
    }

    prompt.push_str("\n\nOnly return the transformed text without any explanations or additional notes.");
    prompt
}

fn email_prompt(text: &str, kind: &EmailKind, audience: Audience) -> String {
    let mut prompt = format!("Polish the following email draft: \"{}\"\n\n", text);

    prompt.push_str(match kind {
        EmailKind::Professional => {
            "Format this as a professional business email. Use appropriate greetings and \
             closings, maintain formal language, and ensure clear communication of the main \
             points. Organize the content with proper paragraphs."
        }
        EmailKind::Followup => {
            "Format this as a follow-up email. Be polite but direct, reference previous \
             communications, and include a clear call to action or next steps. Keep it concise \
             and actionable."
        }
        EmailKind::Networking => {
            "Format this as a networking email. Be personable yet professional, demonstrate \
             genuine interest, and make a clear connection point. Include a simple call to \
             action like a coffee meeting or call."
        }
        EmailKind::Application => {
            "Format this as a job application email. Highlight relevant qualifications, \
             demonstrate enthusiasm for the role, and maintain professional language. Include a \
             clear reference to the position and your fit for it."
        }
        EmailKind::Outreach => {
            "Format this as a cold outreach email. Be concise, personalized, and value-focused. \
             Make a clear connection to the recipient's interests or needs, and include a \
             simple call to action."
        }
        EmailKind::Custom(_) => {
            "Improve this email to make it clearer, more professional, and more effective."
        }
    });

    if let Some(block) = email_audience_block(audience) {
        prompt.push_str("\n\n");
        prompt.push_str(block);
    }

    prompt.push_str(
        "\n\nFormat the email properly with appropriate greeting and closing. Only return the \
         polished email without any explanations or additional notes.",
    );
    prompt
}

fn analysis_prompt(text: &str, kind: &InsightKind) -> String {
    let mut prompt = format!("Analyze the following text: \"{}\"\n\n", text);

    prompt.push_str(match kind {
        InsightKind::Sentiment => {
            "Perform sentiment analysis on this text. Determine if the overall sentiment is \
             positive, negative, or neutral. Provide a sentiment score on a scale of 0 to 1 \
             (where 0 is extremely negative, 0.5 is neutral, and 1 is extremely positive). Also \
             identify the primary emotions expressed and provide a brief analysis of the \
             sentiment patterns.\n\n\
             Return the results in the following JSON format:\n\
             {\n\
             \x20 \"sentiment\": \"[Positive/Negative/Neutral]\",\n\
             \x20 \"score\": [number between 0 and 1],\n\
             \x20 \"confidence\": \"[High/Medium/Low]\",\n\
             \x20 \"emotions\": [\n\
             \x20   {\"name\": \"[emotion]\", \"score\": [number between 0 and 1]},\n\
             \x20   ...\n\
             \x20 ],\n\
             \x20 \"analysis\": \"[brief summary of sentiment analysis]\"\n\
             }"
        }
        InsightKind::Readability => {
            "Analyze the readability of this text. Calculate the Flesch-Kincaid grade level, \
             identify the text complexity, and suggest improvements for readability. Also \
             determine the average sentence length and average word length.\n\n\
             Return the results in the following JSON format:\n\
             {\n\
             \x20 \"fleschKincaid\": [grade level as number],\n\
             \x20 \"grade\": \"[grade level description]\",\n\
             \x20 \"complexity\": \"[Low/Medium/High]\",\n\
             \x20 \"avgSentenceLength\": [number],\n\
             \x20 \"avgWordLength\": [number],\n\
             \x20 \"suggestions\": [\n\
             \x20   \"[suggestion 1]\",\n\
             \x20   \"[suggestion 2]\",\n\
             \x20   ...\n\
             \x20 ]\n\
             }"
        }
        InsightKind::Keywords => {
            "Extract key topics, phrases, and important terms from this text. Identify frequent \
             words, important concepts, and their relevance to the overall topic.\n\n\
             Return the results in the following JSON format:\n\
             {\n\
             \x20 \"keywords\": [\n\
             \x20   {\"word\": \"[keyword]\", \"count\": [frequency], \"relevance\": [score between 0 and 1]},\n\
             \x20   ...\n\
             \x20 ]\n\
             }"
        }
        InsightKind::Language => {
            "Analyze the language patterns, style, voice, and tone of this text. Identify formal \
             vs. informal language, active vs. passive voice, and overall writing style.\n\n\
             Return the results in the following JSON format:\n\
             {\n\
             \x20 \"formality\": \"[Very Formal/Formal/Neutral/Casual/Very Casual]\",\n\
             \x20 \"tone\": \"[Professional/Friendly/Academic/Conversational/etc]\",\n\
             \x20 \"voice\": \"[percentage]% Active, [percentage]% Passive\",\n\
             \x20 \"style\": \"[Descriptive/Narrative/Persuasive/Expository/etc]\",\n\
             \x20 \"characteristics\": [\n\
             \x20   \"[characteristic 1]\",\n\
             \x20   \"[characteristic 2]\",\n\
             \x20   ...\n\
             \x20 ]\n\
             }"
        }
        InsightKind::Suggestion => {
            "Analyze this text and provide specific suggestions to improve its clarity, impact, \
             and effectiveness. Consider structure, word choice, tone, and overall messaging.\n\n\
             Return the results in the following JSON format:\n\
             {\n\
             \x20 \"strengths\": [\n\
             \x20   \"[strength 1]\",\n\
             \x20   \"[strength 2]\",\n\
             \x20   ...\n\
             \x20 ],\n\
             \x20 \"weaknesses\": [\n\
             \x20   \"[weakness 1]\",\n\
             \x20   \"[weakness 2]\",\n\
             \x20   ...\n\
             \x20 ],\n\
             \x20 \"suggestions\": [\n\
             \x20   {\"area\": \"[area for improvement]\", \"recommendation\": \"[specific suggestion]\"},\n\
             \x20   ...\n\
             \x20 ],\n\
             \x20 \"improvedVersion\": \"[brief example of improved text]\"\n\
             }"
        }
        InsightKind::Custom(_) => {
            "Provide a general analysis of this text, including readability, tone, and key \
             points.\n\n\
             Return the results in a structured JSON format with relevant metrics and \
             observations."
        }
    });

    prompt.push_str(
        "\n\nEnsure the response is ONLY the JSON object without any additional text, \
         explanations or markdown formatting.",
    );
    prompt
}

fn style_audience_block(audience: Audience) -> Option<&'static str> {
    match audience {
        Audience::General => None,
        Audience::Child => Some(
            "The audience is a 5-year-old child. Use simple language, short sentences, and \
             concepts that a young child would understand.",
        ),
        Audience::Expert => Some(
            "The audience consists of technical experts. Feel free to use domain-appropriate \
             terminology and sophisticated concepts.",
        ),
        Audience::Marketer => Some(
            "The audience is marketing professionals. Add persuasive language, emphasize \
             benefits, and make the text more compelling and action-oriented.",
        ),
    }
}

fn email_audience_block(audience: Audience) -> Option<&'static str> {
    match audience {
        Audience::General => None,
        Audience::Child => Some("The recipient is a young audience. Use simple language and friendly tone."),
        Audience::Expert => Some(
            "The recipient is a technical expert. Feel free to use domain-appropriate \
             terminology and sophisticated concepts.",
        ),
        Audience::Marketer => Some(
            "The recipient works in marketing. Use persuasive language and focus on benefits \
             and value propositions.",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TAGS: &[&str] = &[
        "formal",
        "casual",
        "joke",
        "shakespearean",
        "emoji",
        "grammar",
        "concise",
        "email_professional",
        "email_followup",
        "email_networking",
        "email_application",
        "email_outreach",
        "insight_sentiment",
        "insight_readability",
        "insight_keywords",
        "insight_language",
        "insight_suggestion",
    ];

    #[test]
    fn every_kind_embeds_the_input_text_verbatim() {
        let text = "the quarterly numbers look weird";
        for tag in ALL_TAGS {
            let kind = OperationKind::parse_wire_tag(tag);
            let prompt = build_prompt(text, &kind, Audience::General);
            assert!(prompt.contains(text), "missing input text for {}", tag);
        }
    }

    #[test]
    fn family_specific_openers() {
        let formal = build_prompt("x", &OperationKind::parse_wire_tag("formal"), Audience::General);
        assert!(formal.starts_with("Transform the following text:"));

        let email = build_prompt(
            "x",
            &OperationKind::parse_wire_tag("email_followup"),
            Audience::General,
        );
        assert!(email.starts_with("Polish the following email draft:"));

        let insight = build_prompt(
            "x",
            &OperationKind::parse_wire_tag("insight_sentiment"),
            Audience::General,
        );
        assert!(insight.starts_with("Analyze the following text:"));
    }

    #[test]
    fn unknown_kinds_use_the_generic_instruction() {
        let prompt = build_prompt("x", &OperationKind::parse_wire_tag("pirate"), Audience::General);
        assert!(prompt.contains("Improve this text to make it clearer and more effective."));

        let prompt = build_prompt(
            "x",
            &OperationKind::parse_wire_tag("email_apology"),
            Audience::General,
        );
        assert!(prompt.contains("Improve this email"));

        let prompt = build_prompt(
            "x",
            &OperationKind::parse_wire_tag("insight_novelty"),
            Audience::General,
        );
        assert!(prompt.contains("general analysis"));
    }

    #[test]
    fn insight_prompts_request_the_documented_key_sets() {
        let cases: &[(&str, &[&str])] = &[
            (
                "insight_sentiment",
                &["\"sentiment\"", "\"score\"", "\"confidence\"", "\"emotions\"", "\"analysis\""],
            ),
            (
                "insight_readability",
                &[
                    "\"fleschKincaid\"",
                    "\"grade\"",
                    "\"complexity\"",
                    "\"avgSentenceLength\"",
                    "\"avgWordLength\"",
                    "\"suggestions\"",
                ],
            ),
            ("insight_keywords", &["\"keywords\"", "\"word\"", "\"count\"", "\"relevance\""]),
            (
                "insight_language",
                &["\"formality\"", "\"tone\"", "\"voice\"", "\"style\"", "\"characteristics\""],
            ),
            (
                "insight_suggestion",
                &["\"strengths\"", "\"weaknesses\"", "\"suggestions\"", "\"improvedVersion\""],
            ),
        ];
        for (tag, keys) in cases {
            let prompt = build_prompt("x", &OperationKind::parse_wire_tag(tag), Audience::General);
            for key in *keys {
                assert!(prompt.contains(key), "{} prompt missing {}", tag, key);
            }
            assert!(prompt.contains("ONLY the JSON object"), "{} missing JSON-only trailer", tag);
        }
    }

    #[test]
    fn audience_modifier_applies_to_style_and_email_only() {
        let style = build_prompt("x", &OperationKind::parse_wire_tag("casual"), Audience::Child);
        assert!(style.contains("5-year-old child"));

        let email = build_prompt(
            "x",
            &OperationKind::parse_wire_tag("email_professional"),
            Audience::Expert,
        );
        assert!(email.contains("technical expert"));

        let insight = build_prompt(
            "x",
            &OperationKind::parse_wire_tag("insight_keywords"),
            Audience::Marketer,
        );
        assert!(!insight.contains("marketing professionals"));
        assert!(!insight.contains("persuasive language"));
    }

    #[test]
    fn general_audience_adds_no_block() {
        let with = build_prompt("x", &OperationKind::parse_wire_tag("formal"), Audience::General);
        assert!(!with.contains("audience"));
    }
}
