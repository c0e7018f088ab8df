//! Reminder generation with validation and a deterministic fallback.

use std::sync::Arc;
use std::time::Duration;

use brain_core::{Brain, BrainError};
use serde::Deserialize;

use crate::request::ContentRequest;
use crate::selector::{pick, VariantSelector, VariantSlot};

/// Maximum subject length, in characters.
pub const MAX_SUBJECT_CHARS: usize = 100;

const ELLIPSIS: &str = "...";

/// Closing phrases a PS is inserted in front of.
const SIGNATURE_MARKERS: &[&str] = &[
    "best regards",
    "kind regards",
    "warm regards",
    "best,",
    "cheers",
    "thanks,",
    "thank you,",
    "sincerely",
];

/// Where a reminder's content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    Generated,
    Fallback,
}

/// A validated reminder, ready to enqueue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedReminder {
    pub subject: String,
    /// HTML body with `<br>` line breaks.
    pub body: String,
    pub source: ContentSource,
}

impl GeneratedReminder {
    pub fn is_fallback(&self) -> bool {
        self.source == ContentSource::Fallback
    }
}

#[derive(Debug, Deserialize)]
struct RawReminder {
    subject: Option<String>,
    body: Option<String>,
}

/// Generates reminders through a [`Brain`].
///
/// Generation never fails from the caller's point of view: a brain error,
/// a timeout or malformed output produces the templated fallback instead.
pub struct ReminderGenerator {
    brain: Arc<dyn Brain>,
    selector: Arc<dyn VariantSelector>,
    timeout: Duration,
}

impl ReminderGenerator {
    pub fn new(brain: Arc<dyn Brain>, selector: Arc<dyn VariantSelector>, timeout: Duration) -> Self {
        Self {
            brain,
            selector,
            timeout,
        }
    }

    /// Generate a reminder for a request.
    pub async fn generate(&self, request: &ContentRequest) -> GeneratedReminder {
        let prompt = request.to_prompt();
        let stage = request.directive.strategy.stage;

        let outcome = match tokio::time::timeout(self.timeout, self.brain.generate(&prompt)).await {
            Ok(Ok(text)) => parse_reminder(&text),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(BrainError::Timeout),
        };

        match outcome {
            Ok((subject, body)) => {
                tracing::debug!(
                    brain = self.brain.name(),
                    stage = %stage,
                    prompt = %prompt.fingerprint(),
                    "Generated reminder"
                );
                self.finish(request, &subject, &body)
            }
            Err(e) => {
                tracing::warn!(
                    brain = self.brain.name(),
                    stage = %stage,
                    error = %e,
                    "Generation failed, using fallback reminder"
                );
                fallback(request)
            }
        }
    }

    fn finish(&self, request: &ContentRequest, subject: &str, body: &str) -> GeneratedReminder {
        let strategy = request.directive.strategy;
        let mut body = normalize_body(body);

        if let Some(ps) = pick(
            self.selector.as_ref(),
            strategy.stage,
            VariantSlot::Postscript,
            strategy.extras.postscripts,
        ) {
            body = insert_postscript(&body, ps);
        }

        GeneratedReminder {
            subject: truncate_subject(subject),
            body,
            source: ContentSource::Generated,
        }
    }
}

/// Deterministic reminder built from the lead's name and company only.
pub fn fallback(request: &ContentRequest) -> GeneratedReminder {
    let first_name = if request.lead.first_name.is_empty() {
        "there"
    } else {
        request.lead.first_name.as_str()
    };
    let company = if request.lead.company_name.is_empty() {
        "your team"
    } else {
        request.lead.company_name.as_str()
    };

    let mut body = format!(
        "Hi {},<br><br>I wanted to follow up on my previous note about {}. \
         Would it make sense to find a few minutes to talk this week?<br><br>Best regards",
        first_name, company
    );
    if !request.sender_name.trim().is_empty() {
        body.push_str(",<br>");
        body.push_str(request.sender_name.trim());
    }

    GeneratedReminder {
        subject: reply_subject(&request.original_subject),
        body,
        source: ContentSource::Fallback,
    }
}

/// `Re: <original>`, bounded to [`MAX_SUBJECT_CHARS`].
fn reply_subject(original: &str) -> String {
    let mut rest = original.trim();
    while rest.get(..3).is_some_and(|prefix| prefix.eq_ignore_ascii_case("re:")) {
        rest = rest[3..].trim_start();
    }
    if rest.is_empty() {
        return "Following up".to_string();
    }
    truncate_subject(&format!("Re: {}", rest))
}

/// Pull a `{subject, body}` pair out of generator output.
fn parse_reminder(text: &str) -> Result<(String, String), BrainError> {
    let json = extract_json(text);
    let raw: RawReminder = serde_json::from_str(json)
        .map_err(|e| BrainError::InvalidResponse(format!("not a JSON object: {}", e)))?;

    let subject = raw.subject.map(|s| s.trim().to_string()).unwrap_or_default();
    let body = raw.body.map(|b| b.trim().to_string()).unwrap_or_default();

    if subject.is_empty() {
        return Err(BrainError::InvalidResponse("missing subject".to_string()));
    }
    if body.is_empty() {
        return Err(BrainError::InvalidResponse("missing body".to_string()));
    }

    Ok((subject, body))
}

/// Extract JSON from a response that may contain markdown or other text.
fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();

    if trimmed.starts_with('{') {
        return extract_balanced_json(trimmed);
    }

    if let Some(start) = trimmed.find("```json") {
        let json_start = start + 7;
        if let Some(end) = trimmed[json_start..].find("```") {
            return extract_balanced_json(trimmed[json_start..json_start + end].trim());
        }
    }

    if let Some(start) = trimmed.find('{') {
        return extract_balanced_json(&trimmed[start..]);
    }

    trimmed
}

/// Cut a string starting with `{` at its matching closing brace.
fn extract_balanced_json(s: &str) -> &str {
    if !s.starts_with('{') {
        return s;
    }

    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in s.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return &s[..=i];
                }
            }
            _ => {}
        }
    }

    s
}

/// Bound a subject to [`MAX_SUBJECT_CHARS`], ending in an ellipsis when cut.
pub fn truncate_subject(subject: &str) -> String {
    let subject = subject.trim();
    if subject.chars().count() <= MAX_SUBJECT_CHARS {
        return subject.to_string();
    }

    let keep = MAX_SUBJECT_CHARS - ELLIPSIS.len();
    let mut truncated: String = subject.chars().take(keep).collect();
    truncated.truncate(truncated.trim_end().len());
    truncated.push_str(ELLIPSIS);
    truncated
}

fn looks_like_html(body: &str) -> bool {
    let lower = body.to_ascii_lowercase();
    lower.contains("<br") || lower.contains("<p>") || lower.contains("<p ") || lower.contains("</")
}

/// Convert plain-text line breaks to `<br>`. HTML bodies pass through.
pub fn normalize_body(body: &str) -> String {
    let unified = body.replace("\r\n", "\n").replace("\\n", "\n");
    let unified = unified.trim();
    if looks_like_html(unified) {
        return unified.to_string();
    }

    unified
        .split('\n')
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Insert a PS before the last signature marker, or append it.
pub fn insert_postscript(body: &str, postscript: &str) -> String {
    let lower = body.to_ascii_lowercase();
    let marker_at = SIGNATURE_MARKERS
        .iter()
        .filter_map(|marker| lower.rfind(marker))
        .max();

    match marker_at {
        Some(at) => format!("{}P.S. {}<br><br>{}", &body[..at], postscript, &body[at..]),
        None => format!("{}<br><br>P.S. {}", body, postscript),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjuster::adjust;
    use crate::catalog::strategy_for;
    use crate::engagement::{classify, Interaction};
    use crate::request::{LeadProfile, TimingContext};
    use crate::selector::RotatingSelector;
    use chrono::{TimeZone, Utc};
    use database::Stage;
    use mock_brain::{DelayedBrain, FailingBrain, ScriptedBrain};

    fn request(stage: Stage, original_subject: &str) -> ContentRequest {
        let interaction = Interaction {
            opened: false,
            replied: false,
            meeting_booked: false,
            days_since_sent: 4,
        };
        ContentRequest {
            directive: adjust(strategy_for(stage), classify(&interaction), &interaction),
            lead: LeadProfile {
                first_name: "Dana".to_string(),
                last_name: "Reyes".to_string(),
                company_name: "Acme".to_string(),
                title: None,
                department: None,
                industry: None,
                company_size: None,
            },
            product: None,
            timing: TimingContext::at(Utc.with_ymd_and_hms(2025, 5, 6, 10, 0, 0).unwrap()),
            days_since_sent: 4,
            opener: None,
            call_to_action: None,
            original_subject: original_subject.to_string(),
            sender_name: "Jordan".to_string(),
        }
    }

    fn generator(brain: impl Brain + 'static) -> ReminderGenerator {
        ReminderGenerator::new(
            Arc::new(brain),
            Arc::new(RotatingSelector),
            Duration::from_millis(200),
        )
    }

    #[tokio::test]
    async fn test_generate_with_postscript_before_signature() {
        let brain = ScriptedBrain::json("Checking in", "Hi Dana,\nAny thoughts?\n\nBest regards,\nJordan");
        let reminder = generator(brain).generate(&request(Stage::Initial, "Hello")).await;

        assert_eq!(reminder.source, ContentSource::Generated);
        assert_eq!(reminder.subject, "Checking in");
        let ps = strategy_for(Stage::Initial).extras.postscripts[0];
        assert_eq!(
            reminder.body,
            format!("Hi Dana,<br>Any thoughts?<br><br>P.S. {}<br><br>Best regards,<br>Jordan", ps)
        );
    }

    #[tokio::test]
    async fn test_stage_without_postscript() {
        let brain = ScriptedBrain::json("Checking in", "Hi Dana,\nAny thoughts?");
        let reminder = generator(brain).generate(&request(Stage::R3, "Hello")).await;
        assert!(!reminder.body.contains("P.S."));
    }

    #[tokio::test]
    async fn test_long_subject_truncated() {
        let brain = ScriptedBrain::json(&"x".repeat(150), "Body");
        let reminder = generator(brain).generate(&request(Stage::R3, "Hello")).await;
        assert_eq!(reminder.subject.chars().count(), MAX_SUBJECT_CHARS);
        assert!(reminder.subject.ends_with("..."));
    }

    #[tokio::test]
    async fn test_malformed_output_falls_back() {
        for reply in ["not json at all", r#"{"subject": "", "body": "x"}"#, r#"{"body": "x"}"#] {
            let reminder = generator(ScriptedBrain::new(reply))
                .generate(&request(Stage::R1, "Pipeline review"))
                .await;
            assert!(reminder.is_fallback(), "reply {:?} should fall back", reply);
            assert_eq!(reminder.subject, "Re: Pipeline review");
        }
    }

    #[tokio::test]
    async fn test_brain_error_falls_back() {
        let reminder = generator(FailingBrain::default())
            .generate(&request(Stage::R1, "Pipeline review"))
            .await;
        assert!(reminder.is_fallback());
        assert!(reminder.body.contains("Dana"));
        assert!(reminder.body.contains("Acme"));
        assert!(reminder.body.ends_with("Jordan"));
    }

    #[tokio::test]
    async fn test_timeout_falls_back() {
        let slow = DelayedBrain::with_millis(ScriptedBrain::json("Late", "Too late"), 5_000);
        let reminder = generator(slow).generate(&request(Stage::R2, "Pipeline review")).await;
        assert!(reminder.is_fallback());
        assert_eq!(reminder.subject, "Re: Pipeline review");
    }

    #[test]
    fn test_extract_json_variants() {
        assert_eq!(extract_json(r#"{"a": 1}}"#), r#"{"a": 1}"#);
        assert_eq!(
            extract_json("Sure!\n```json\n{\"subject\": \"s\"}\n```"),
            r#"{"subject": "s"}"#
        );
        assert_eq!(extract_json(r#"Here: {"b": "}"} trailing"#), r#"{"b": "}"}"#);
    }

    #[test]
    fn test_parse_reminder_with_braces_inside_strings() {
        let reply = r#"Here is the reminder:
{"subject": "Your {Q2} forecast", "body": "Hi Dana,<br><br>We mapped \"{pipeline}\" stages for you.<br><br>Best regards"}
Let me know if you want changes."#;

        let (subject, body) = parse_reminder(reply).unwrap();
        assert_eq!(subject, "Your {Q2} forecast");
        assert_eq!(
            body,
            "Hi Dana,<br><br>We mapped \"{pipeline}\" stages for you.<br><br>Best regards"
        );
    }

    #[test]
    fn test_reply_subject() {
        assert_eq!(reply_subject("Re: RE: Intro"), "Re: Intro");
        assert_eq!(reply_subject("   "), "Following up");

        let long = reply_subject(&"y".repeat(120));
        assert!(long.starts_with("Re: y"));
        assert_eq!(long.chars().count(), MAX_SUBJECT_CHARS);
    }

    #[test]
    fn test_truncate_subject_counts_chars() {
        let subject = "é".repeat(101);
        let truncated = truncate_subject(&subject);
        assert_eq!(truncated.chars().count(), MAX_SUBJECT_CHARS);
        assert_eq!(truncate_subject("short"), "short");
    }

    #[test]
    fn test_normalize_body() {
        assert_eq!(normalize_body("a\r\nb\n\nc"), "a<br>b<br><br>c");
        assert_eq!(normalize_body("a\\nb"), "a<br>b");
        assert_eq!(normalize_body("<p>a</p>\n<p>b</p>"), "<p>a</p>\n<p>b</p>");
    }

    #[test]
    fn test_insert_postscript_without_marker() {
        assert_eq!(insert_postscript("Hi", "More soon."), "Hi<br><br>P.S. More soon.");
    }

    #[test]
    fn test_insert_postscript_uses_last_marker() {
        let body = "Thanks, that helps.<br><br>Cheers,<br>Jordan";
        assert_eq!(
            insert_postscript(body, "One more thing."),
            "Thanks, that helps.<br><br>P.S. One more thing.<br><br>Cheers,<br>Jordan"
        );
    }
}
