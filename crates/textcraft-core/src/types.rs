use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const EMAIL_PREFIX: &str = "email_";
const INSIGHT_PREFIX: &str = "insight_";

/// Operation family, the coarse discriminant used by history filters and
/// stats breakdowns. On the wire a record's family is implied by its kind
/// tag prefix; internally it is always explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Style,
    Email,
    Insight,
}

impl Family {
    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Style => "style",
            Family::Email => "email",
            Family::Insight => "insight",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Family {
    type Err = crate::TextCraftError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "style" => Ok(Family::Style),
            "email" => Ok(Family::Email),
            "insight" => Ok(Family::Insight),
            other => Err(crate::TextCraftError::Validation(format!(
                "unknown family: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StyleKind {
    Formal,
    Casual,
    Joke,
    Shakespearean,
    Emoji,
    Grammar,
    Concise,
    /// Unrecognized bare tag. The prompt builder answers it with the
    /// generic rewrite instruction; the tag round-trips unchanged.
    Custom(String),
}

impl StyleKind {
    fn parse(tag: &str) -> Self {
        match tag {
            "formal" => StyleKind::Formal,
            "casual" => StyleKind::Casual,
            "joke" => StyleKind::Joke,
            "shakespearean" => StyleKind::Shakespearean,
            "emoji" => StyleKind::Emoji,
            "grammar" => StyleKind::Grammar,
            "concise" => StyleKind::Concise,
            other => StyleKind::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            StyleKind::Formal => "formal",
            StyleKind::Casual => "casual",
            StyleKind::Joke => "joke",
            StyleKind::Shakespearean => "shakespearean",
            StyleKind::Emoji => "emoji",
            StyleKind::Grammar => "grammar",
            StyleKind::Concise => "concise",
            StyleKind::Custom(tag) => tag,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EmailKind {
    Professional,
    Followup,
    Networking,
    Application,
    Outreach,
    Custom(String),
}

impl EmailKind {
    fn parse(sub: &str) -> Self {
        match sub {
            "professional" => EmailKind::Professional,
            "followup" => EmailKind::Followup,
            "networking" => EmailKind::Networking,
            "application" => EmailKind::Application,
            "outreach" => EmailKind::Outreach,
            other => EmailKind::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EmailKind::Professional => "professional",
            EmailKind::Followup => "followup",
            EmailKind::Networking => "networking",
            EmailKind::Application => "application",
            EmailKind::Outreach => "outreach",
            EmailKind::Custom(sub) => sub,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InsightKind {
    Sentiment,
    Readability,
    Keywords,
    Language,
    Suggestion,
    Custom(String),
}

impl InsightKind {
    fn parse(sub: &str) -> Self {
        match sub {
            "sentiment" => InsightKind::Sentiment,
            "readability" => InsightKind::Readability,
            "keywords" => InsightKind::Keywords,
            "language" => InsightKind::Language,
            "suggestion" => InsightKind::Suggestion,
            other => InsightKind::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            InsightKind::Sentiment => "sentiment",
            InsightKind::Readability => "readability",
            InsightKind::Keywords => "keywords",
            InsightKind::Language => "language",
            InsightKind::Suggestion => "suggestion",
            InsightKind::Custom(sub) => sub,
        }
    }
}

/// The kind of transformation a record represents.
///
/// The `email_`/`insight_` wire prefixes exist only in [`parse_wire_tag`]
/// and [`wire_tag`]; everywhere else the family is an explicit variant.
///
/// [`parse_wire_tag`]: OperationKind::parse_wire_tag
/// [`wire_tag`]: OperationKind::wire_tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Style(StyleKind),
    Email(EmailKind),
    Insight(InsightKind),
}

impl OperationKind {
    /// Parse a wire tag. Total: unknown subtypes land in the family's
    /// `Custom` variant, unknown bare tags in `Style(Custom)`.
    pub fn parse_wire_tag(tag: &str) -> Self {
        if let Some(sub) = tag.strip_prefix(EMAIL_PREFIX) {
            OperationKind::Email(EmailKind::parse(sub))
        } else if let Some(sub) = tag.strip_prefix(INSIGHT_PREFIX) {
            OperationKind::Insight(InsightKind::parse(sub))
        } else {
            OperationKind::Style(StyleKind::parse(tag))
        }
    }

    pub fn wire_tag(&self) -> String {
        match self {
            OperationKind::Style(kind) => kind.as_str().to_string(),
            OperationKind::Email(kind) => format!("{}{}", EMAIL_PREFIX, kind.as_str()),
            OperationKind::Insight(kind) => format!("{}{}", INSIGHT_PREFIX, kind.as_str()),
        }
    }

    pub fn family(&self) -> Family {
        match self {
            OperationKind::Style(_) => Family::Style,
            OperationKind::Email(_) => Family::Email,
            OperationKind::Insight(_) => Family::Insight,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.wire_tag())
    }
}

impl Serialize for OperationKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.wire_tag())
    }
}

impl<'de> Deserialize<'de> for OperationKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        if tag.is_empty() {
            return Err(de::Error::custom("transformation type must not be empty"));
        }
        Ok(OperationKind::parse_wire_tag(&tag))
    }
}

/// Target audience for style and email transformations. Never applied to
/// the insight family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    #[default]
    General,
    Child,
    Expert,
    Marketer,
}

impl Audience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Audience::General => "general",
            Audience::Child => "child",
            Audience::Expert => "expert",
            Audience::Marketer => "marketer",
        }
    }
}

impl std::str::FromStr for Audience {
    type Err = crate::TextCraftError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "general" => Ok(Audience::General),
            "child" => Ok(Audience::Child),
            "expert" => Ok(Audience::Expert),
            "marketer" => Ok(Audience::Marketer),
            other => Err(crate::TextCraftError::Validation(format!(
                "unknown audience: {}",
                other
            ))),
        }
    }
}

/// Which generation backend produced a transformation. Recorded per record
/// for traceability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Gemini,
    Huggingface,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Gemini => "gemini",
            Backend::Huggingface => "huggingface",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_tags_round_trip() {
        for tag in [
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
        ] {
            let kind = OperationKind::parse_wire_tag(tag);
            assert_eq!(kind.wire_tag(), tag);
        }
    }

    #[test]
    fn unknown_tags_fall_back_by_prefix() {
        assert_eq!(
            OperationKind::parse_wire_tag("pirate"),
            OperationKind::Style(StyleKind::Custom("pirate".into()))
        );
        assert_eq!(
            OperationKind::parse_wire_tag("email_apology"),
            OperationKind::Email(EmailKind::Custom("apology".into()))
        );
        assert_eq!(
            OperationKind::parse_wire_tag("insight_grammar"),
            OperationKind::Insight(InsightKind::Custom("grammar".into()))
        );
        // custom tags still round-trip losslessly
        assert_eq!(
            OperationKind::parse_wire_tag("email_apology").wire_tag(),
            "email_apology"
        );
    }

    #[test]
    fn family_follows_prefix() {
        assert_eq!(OperationKind::parse_wire_tag("formal").family(), Family::Style);
        assert_eq!(
            OperationKind::parse_wire_tag("email_outreach").family(),
            Family::Email
        );
        assert_eq!(
            OperationKind::parse_wire_tag("insight_keywords").family(),
            Family::Insight
        );
    }

    #[test]
    fn serde_uses_wire_tag() {
        let kind = OperationKind::Insight(InsightKind::Sentiment);
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, "\"insight_sentiment\"");
        let back: OperationKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kind);
    }

    #[test]
    fn empty_tag_is_rejected() {
        assert!(serde_json::from_str::<OperationKind>("\"\"").is_err());
    }

    #[test]
    fn audience_defaults_to_general() {
        assert_eq!(Audience::default(), Audience::General);
        let parsed: Audience = serde_json::from_str("\"marketer\"").unwrap();
        assert_eq!(parsed, Audience::Marketer);
        assert!(serde_json::from_str::<Audience>("\"everyone\"").is_err());
    }
}
