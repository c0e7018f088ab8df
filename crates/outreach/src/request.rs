//! Content request assembly.
//!
//! A [`ContentRequest`] is everything the generator needs for one reminder:
//! the resolved directive, facts about the lead and product, and timing
//! context taken from the injected clock. Building one has no side effects.

use std::fmt::Write as _;

use brain_core::GenerationPrompt;
use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use database::{Account, Company, Lead, OutboundMessage, Product, ProductBenefit};

use crate::adjuster::Directive;
use crate::clock::Clock;
use crate::engagement::Interaction;
use crate::selector::{pick, VariantSelector, VariantSlot};

/// Maximum number of benefit phrases passed to the generator.
pub const MAX_BENEFITS: usize = 3;

const SYSTEM_PROMPT: &str = "You write short, personal B2B sales follow-up emails. \
Write like a thoughtful human, not a marketer. Never invent facts, numbers or customer names. \
Keep the body under 150 words.";

/// Lead attributes used for personalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadProfile {
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    pub title: Option<String>,
    pub department: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<String>,
}

impl LeadProfile {
    pub fn new(lead: &Lead, company: &Company) -> Self {
        Self {
            first_name: lead.first_name.trim().to_string(),
            last_name: lead.last_name.trim().to_string(),
            company_name: company.name.trim().to_string(),
            title: lead.title.clone(),
            department: lead.department.clone(),
            industry: company.industry.clone(),
            company_size: company.size_bucket.clone(),
        }
    }
}

/// A campaign's product with its benefit phrases, loaded once per campaign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignProduct {
    pub product: Product,
    pub benefits: Vec<ProductBenefit>,
}

/// Product facts selected for one lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFacts {
    pub name: String,
    pub benefits: Vec<String>,
}

fn same_attribute(a: Option<&str>, b: Option<&str>) -> bool {
    match (a.map(str::trim), b.map(str::trim)) {
        (Some(a), Some(b)) => !a.is_empty() && a.eq_ignore_ascii_case(b),
        _ => false,
    }
}

impl ProductFacts {
    /// Select up to [`MAX_BENEFITS`] benefits whose ideal customer profile
    /// shares an industry or a company size with the lead.
    pub fn for_lead(product: &CampaignProduct, lead: &LeadProfile) -> Self {
        let benefits = product
            .benefits
            .iter()
            .filter(|b| {
                same_attribute(b.icp_industry.as_deref(), lead.industry.as_deref())
                    || same_attribute(b.icp_company_size.as_deref(), lead.company_size.as_deref())
            })
            .take(MAX_BENEFITS)
            .map(|b| b.benefit.clone())
            .collect();

        Self {
            name: product.product.name.clone(),
            benefits,
        }
    }
}

/// Coarse part of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPart {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl DayPart {
    fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => DayPart::Morning,
            12..=16 => DayPart::Afternoon,
            17..=21 => DayPart::Evening,
            _ => DayPart::Night,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DayPart::Morning => "morning",
            DayPart::Afternoon => "afternoon",
            DayPart::Evening => "evening",
            DayPart::Night => "night",
        }
    }
}

/// Northern-hemisphere meteorological season.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
        }
    }
}

/// When the reminder is being written, in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingContext {
    pub day_part: DayPart,
    pub weekday: Weekday,
    pub season: Season,
    /// Business-calendar moment worth mentioning, if any.
    pub period_note: Option<&'static str>,
}

impl TimingContext {
    pub fn at(now: DateTime<Utc>) -> Self {
        let month = now.month();
        let period_note = match (month, now.day()) {
            (12, 15..) => Some("year-end planning"),
            (1, ..=15) => Some("new-year planning"),
            (3 | 6 | 9, 15..) => Some("quarter close"),
            _ => None,
        };

        Self {
            day_part: DayPart::from_hour(now.hour()),
            weekday: now.weekday(),
            season: Season::from_month(month),
            period_note,
        }
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday, Weekday::Sat | Weekday::Sun)
    }

    fn describe(&self) -> String {
        let mut text = format!(
            "{} {}, {}",
            self.weekday,
            self.day_part.label(),
            self.season.label()
        );
        if let Some(note) = self.period_note {
            let _ = write!(text, " ({})", note);
        }
        text
    }
}

/// Everything needed to generate one reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRequest {
    pub directive: Directive,
    pub lead: LeadProfile,
    pub product: Option<ProductFacts>,
    pub timing: TimingContext,
    pub days_since_sent: i64,
    pub opener: Option<&'static str>,
    pub call_to_action: Option<&'static str>,
    pub original_subject: String,
    pub sender_name: String,
}

/// Source records for one lead's request.
#[derive(Debug, Clone, Copy)]
pub struct LeadContext<'a> {
    pub lead: &'a Lead,
    pub company: &'a Company,
    pub account: &'a Account,
    pub original: &'a OutboundMessage,
    pub product: Option<&'a CampaignProduct>,
}

/// Builds [`ContentRequest`]s against an injected clock and selector.
pub struct ContentRequestBuilder<'a> {
    clock: &'a dyn Clock,
    selector: &'a dyn VariantSelector,
}

impl<'a> ContentRequestBuilder<'a> {
    pub fn new(clock: &'a dyn Clock, selector: &'a dyn VariantSelector) -> Self {
        Self { clock, selector }
    }

    pub fn build(
        &self,
        directive: Directive,
        interaction: &Interaction,
        context: LeadContext<'_>,
    ) -> ContentRequest {
        let strategy = directive.strategy;
        let lead = LeadProfile::new(context.lead, context.company);
        let product = context.product.map(|p| ProductFacts::for_lead(p, &lead));

        ContentRequest {
            directive,
            product,
            timing: TimingContext::at(self.clock.now()),
            days_since_sent: interaction.days_since_sent,
            opener: pick(self.selector, strategy.stage, VariantSlot::Opener, strategy.openers),
            call_to_action: pick(
                self.selector,
                strategy.stage,
                VariantSlot::CallToAction,
                strategy.calls_to_action,
            ),
            original_subject: context.original.subject.clone(),
            sender_name: context.account.sender_name.clone(),
            lead,
        }
    }
}

impl ContentRequest {
    /// Render the request as a generation prompt asking for a JSON object
    /// with `subject` and `body`.
    pub fn to_prompt(&self) -> GenerationPrompt {
        let directive = &self.directive;
        let strategy = directive.strategy;
        let mut user = String::new();

        let _ = writeln!(
            user,
            "Write follow-up email #{} in a sequence. The original email subject was \"{}\".",
            strategy.stage.ordinal() + 1,
            self.original_subject
        );

        let _ = writeln!(user, "\nRecipient:");
        let _ = writeln!(user, "- Name: {} {}", self.lead.first_name, self.lead.last_name);
        let _ = writeln!(user, "- Company: {}", self.lead.company_name);
        for (label, value) in [
            ("Title", &self.lead.title),
            ("Department", &self.lead.department),
            ("Industry", &self.lead.industry),
            ("Company size", &self.lead.company_size),
        ] {
            if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
                let _ = writeln!(user, "- {}: {}", label, value);
            }
        }

        if let Some(product) = &self.product {
            let _ = writeln!(user, "\nProduct: {}", product.name);
            for benefit in &product.benefits {
                let _ = writeln!(user, "- {}", benefit);
            }
        }

        let _ = writeln!(user, "\nStrategy: {} ({})", strategy.name, strategy.approach);
        let _ = writeln!(user, "- Tone: {}. {}", strategy.tone, directive.tone_modifier);
        let _ = writeln!(user, "- Lean on: {}", strategy.trigger);
        let _ = writeln!(
            user,
            "- Urgency: {}. {}",
            directive.urgency.label(),
            directive.urgency.guidance()
        );
        if let Some(framing) = strategy.extras.urgency_framing {
            let _ = writeln!(user, "- {}", framing);
        }
        if directive.opened_no_reply {
            let _ = writeln!(
                user,
                "- They opened earlier emails but have not replied. Do not mention that you know this."
            );
        }
        if strategy.extras.unsubscribe_offer {
            let _ = writeln!(
                user,
                "- Offer to stop emailing if this is not relevant."
            );
        }
        if let Some(opener) = self.opener {
            let _ = writeln!(user, "- Suggested opening: \"{}\"", opener);
        }
        if let Some(cta) = self.call_to_action {
            let _ = writeln!(user, "- Suggested call to action: \"{}\"", cta);
        }

        let _ = writeln!(
            user,
            "\nTiming: {}. Days since last email: {}.",
            self.timing.describe(),
            self.days_since_sent.max(0)
        );
        let _ = write!(
            user,
            "\nSign off as {}. Keep the subject under 100 characters. \
             Reply with a JSON object with \"subject\" and \"body\" fields only.",
            self.sender_name
        );

        GenerationPrompt::new(SYSTEM_PROMPT, user).expect_json_fields(["subject", "body"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjuster::adjust;
    use crate::catalog::strategy_for;
    use crate::clock::FixedClock;
    use crate::engagement::classify;
    use crate::selector::RotatingSelector;
    use chrono::TimeZone;
    use database::Stage;

    fn benefit(id: i64, text: &str, industry: Option<&str>, size: Option<&str>) -> ProductBenefit {
        ProductBenefit {
            id,
            product_id: "p1".to_string(),
            benefit: text.to_string(),
            icp_industry: industry.map(String::from),
            icp_company_size: size.map(String::from),
            position: id,
        }
    }

    fn product() -> CampaignProduct {
        CampaignProduct {
            product: Product {
                id: "p1".to_string(),
                name: "Pipeline Pro".to_string(),
                description: String::new(),
            },
            benefits: vec![
                benefit(1, "Cuts claims backlog", Some("Insurance"), None),
                benefit(2, "Scales with small teams", None, Some("11-50")),
                benefit(3, "Faster close for SaaS", Some("saas"), None),
                benefit(4, "Audit-ready reporting", Some("SaaS"), Some("11-50")),
                benefit(5, "Works for startups", None, Some("11-50")),
            ],
        }
    }

    fn profile(industry: Option<&str>, size: Option<&str>) -> LeadProfile {
        LeadProfile {
            first_name: "Dana".to_string(),
            last_name: "Reyes".to_string(),
            company_name: "Acme".to_string(),
            title: Some("VP Sales".to_string()),
            department: None,
            industry: industry.map(String::from),
            company_size: size.map(String::from),
        }
    }

    #[test]
    fn test_benefits_match_on_industry_or_size() {
        let facts = ProductFacts::for_lead(&product(), &profile(Some("SaaS"), None));
        assert_eq!(facts.benefits, vec!["Faster close for SaaS", "Audit-ready reporting"]);

        let facts = ProductFacts::for_lead(&product(), &profile(Some("saas"), Some("11-50")));
        assert_eq!(facts.benefits.len(), MAX_BENEFITS);
        assert_eq!(facts.benefits[0], "Scales with small teams");
    }

    #[test]
    fn test_no_benefits_without_overlap() {
        let facts = ProductFacts::for_lead(&product(), &profile(None, None));
        assert_eq!(facts.name, "Pipeline Pro");
        assert!(facts.benefits.is_empty());
    }

    #[test]
    fn test_timing_context() {
        let monday_morning = Utc.with_ymd_and_hms(2025, 3, 17, 9, 30, 0).unwrap();
        let timing = TimingContext::at(monday_morning);
        assert_eq!(timing.day_part, DayPart::Morning);
        assert_eq!(timing.weekday, Weekday::Mon);
        assert_eq!(timing.season, Season::Spring);
        assert_eq!(timing.period_note, Some("quarter close"));
        assert!(!timing.is_weekend());

        let saturday_night = Utc.with_ymd_and_hms(2025, 7, 5, 23, 0, 0).unwrap();
        let timing = TimingContext::at(saturday_night);
        assert_eq!(timing.day_part, DayPart::Night);
        assert_eq!(timing.season, Season::Summer);
        assert_eq!(timing.period_note, None);
        assert!(timing.is_weekend());
    }

    #[test]
    fn test_build_and_render_prompt() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 3, 10, 14, 0, 0).unwrap());
        let selector = RotatingSelector;
        let builder = ContentRequestBuilder::new(&clock, &selector);

        let lead = Lead {
            id: "l1".to_string(),
            account_id: "a1".to_string(),
            company_id: "co1".to_string(),
            first_name: " Dana ".to_string(),
            last_name: "Reyes".to_string(),
            email: "dana@acme.test".to_string(),
            title: Some("VP Sales".to_string()),
            department: None,
        };
        let company = Company {
            id: "co1".to_string(),
            name: "Acme".to_string(),
            industry: Some("SaaS".to_string()),
            size_bucket: None,
        };
        let account = Account {
            id: "a1".to_string(),
            name: "Sales".to_string(),
            sender_name: "Jordan".to_string(),
            sender_email: "jordan@vendor.test".to_string(),
        };
        let original = OutboundMessage {
            id: "m1".to_string(),
            campaign_id: "c1".to_string(),
            run_id: "r1".to_string(),
            lead_id: "l1".to_string(),
            subject: "Quick question about your pipeline".to_string(),
            body: "Hi".to_string(),
            sent_at: "2025-03-05T14:00:00Z".to_string(),
        };
        let product = product();

        let interaction = Interaction {
            opened: true,
            replied: false,
            meeting_booked: false,
            days_since_sent: 5,
        };
        let directive = adjust(strategy_for(Stage::R1), classify(&interaction), &interaction);
        let request = builder.build(
            directive,
            &interaction,
            LeadContext {
                lead: &lead,
                company: &company,
                account: &account,
                original: &original,
                product: Some(&product),
            },
        );

        assert_eq!(request.lead.first_name, "Dana");
        assert_eq!(request.opener, Some(strategy_for(Stage::R1).openers[1]));
        assert_eq!(request.timing.day_part, DayPart::Afternoon);

        let prompt = request.to_prompt();
        assert_eq!(prompt.json_fields, vec!["subject", "body"]);
        assert!(prompt.user.contains("Dana Reyes"));
        assert!(prompt.user.contains("Pipeline Pro"));
        assert!(prompt.user.contains("Faster close for SaaS"));
        assert!(prompt.user.contains("Urgency: moderate"));
        assert!(prompt.user.contains("have not replied"));
        assert!(prompt.user.contains("Sign off as Jordan"));
        assert!(!prompt.user.contains("Department"));
    }
}
