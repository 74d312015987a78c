//! Routing policy
//!
//! Decides which opinion supplies the final category and team. Priority is
//! not the policy's concern; the orchestrator always takes the maximum.

use crate::domain::entities::{Category, Opinion, SourceId};

/// Strategy for picking the opinion whose category and team win
pub trait RoutingPolicy: Send + Sync {
    /// Returns `None` only when `opinions` is empty
    fn select<'a>(&self, opinions: &'a [Opinion]) -> Option<&'a Opinion>;
}

/// Category kinds a precedence rule can match on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryMatch {
    /// A specific technical area
    Technical,
    /// "Urgent Customer Issue"
    UrgentCustomer,
    /// Anything other than the generic "General Inquiry"
    NotGeneralInquiry,
    Any,
}

impl CategoryMatch {
    pub fn matches(&self, category: &Category) -> bool {
        match self {
            CategoryMatch::Technical => category.is_technical(),
            CategoryMatch::UrgentCustomer => category.is_urgent_customer(),
            CategoryMatch::NotGeneralInquiry => !category.is_general_inquiry(),
            CategoryMatch::Any => true,
        }
    }
}

/// "Take category and team from `source` if its category matches"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecedenceRule {
    pub source: SourceId,
    pub matcher: CategoryMatch,
}

impl PrecedenceRule {
    pub fn new(source: impl Into<SourceId>, matcher: CategoryMatch) -> Self {
        Self {
            source: source.into(),
            matcher,
        }
    }

    fn find<'a>(&self, opinions: &'a [Opinion]) -> Option<&'a Opinion> {
        opinions
            .iter()
            .find(|op| op.source == self.source && self.matcher.matches(&op.output.category))
    }
}

/// Ordered precedence rules; first match wins.
///
/// Falls back to the first opinion when no rule matches, which only happens
/// for analyzer sets that do not include the sources the rules name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecedencePolicy {
    rules: Vec<PrecedenceRule>,
}

impl PrecedencePolicy {
    pub fn new(rules: Vec<PrecedenceRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[PrecedenceRule] {
        &self.rules
    }
}

impl Default for PrecedencePolicy {
    /// Technical specificity first, then customer urgency, then any specific
    /// customer classification, then the technical fallback.
    fn default() -> Self {
        Self::new(vec![
            PrecedenceRule::new(SourceId::technical(), CategoryMatch::Technical),
            PrecedenceRule::new(SourceId::customer(), CategoryMatch::UrgentCustomer),
            PrecedenceRule::new(SourceId::customer(), CategoryMatch::NotGeneralInquiry),
            PrecedenceRule::new(SourceId::technical(), CategoryMatch::Any),
        ])
    }
}

impl RoutingPolicy for PrecedencePolicy {
    fn select<'a>(&self, opinions: &'a [Opinion]) -> Option<&'a Opinion> {
        let matched = self
            .rules
            .iter()
            .enumerate()
            .find_map(|(index, rule)| rule.find(opinions).map(|op| (index, op)));

        match matched {
            Some((index, opinion)) => {
                tracing::trace!(rule = index, source = %opinion.source, "Precedence rule matched");
                Some(opinion)
            }
            None => opinions.first(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Priority, TechnicalArea};
    use crate::test_utils::test_output;

    fn technical(category: Category, team: &str) -> Opinion {
        Opinion::new(
            SourceId::technical(),
            test_output(category, Priority::Medium, team),
        )
    }

    fn customer(category: Category, team: &str) -> Opinion {
        Opinion::new(
            SourceId::customer(),
            test_output(category, Priority::Medium, team),
        )
    }

    fn selected_team(opinions: &[Opinion]) -> String {
        PrecedencePolicy::default()
            .select(opinions)
            .unwrap()
            .output
            .recommended_team
            .clone()
    }

    #[test]
    fn technical_area_beats_everything() {
        let opinions = [
            technical(Category::Technical(TechnicalArea::Api), "Engineering"),
            customer(Category::UrgentCustomer, "Account Manager"),
        ];
        assert_eq!(selected_team(&opinions), "Engineering");
    }

    #[test]
    fn urgent_customer_beats_generic_technical() {
        let opinions = [
            technical(Category::GeneralTechnical, "Support Tier 2"),
            customer(Category::UrgentCustomer, "Account Manager"),
        ];
        assert_eq!(selected_team(&opinions), "Account Manager");
    }

    #[test]
    fn specific_customer_category_beats_generic_technical() {
        let opinions = [
            technical(Category::GeneralTechnical, "Support Tier 2"),
            customer(Category::Billing, "Billing Support"),
        ];
        assert_eq!(selected_team(&opinions), "Billing Support");
    }

    #[test]
    fn generic_on_both_sides_falls_back_to_technical() {
        let opinions = [
            technical(Category::GeneralTechnical, "Support Tier 2"),
            customer(Category::GeneralInquiry, "Customer Success"),
        ];
        assert_eq!(selected_team(&opinions), "Support Tier 2");
    }

    #[test]
    fn rules_do_not_depend_on_opinion_order() {
        let opinions = [
            customer(Category::UrgentCustomer, "Account Manager"),
            technical(Category::Technical(TechnicalArea::Network), "DevOps"),
        ];
        assert_eq!(selected_team(&opinions), "DevOps");
    }

    #[test]
    fn unknown_sources_fall_back_to_first_opinion() {
        let opinions = [
            Opinion::new(
                "sentiment",
                test_output(Category::GeneralInquiry, Priority::Low, "Support Tier 1"),
            ),
            Opinion::new(
                "language",
                test_output(
                    Category::Custom("Localization".into()),
                    Priority::Low,
                    "L10n",
                ),
            ),
        ];
        assert_eq!(selected_team(&opinions), "Support Tier 1");
    }

    #[test]
    fn empty_opinions_select_nothing() {
        assert!(PrecedencePolicy::default().select(&[]).is_none());
    }

    #[test]
    fn custom_rules_are_honored() {
        let policy = PrecedencePolicy::new(vec![PrecedenceRule::new(
            SourceId::customer(),
            CategoryMatch::Any,
        )]);
        let opinions = [
            technical(Category::Technical(TechnicalArea::Api), "Engineering"),
            customer(Category::GeneralInquiry, "Customer Success"),
        ];
        assert_eq!(
            policy.select(&opinions).unwrap().output.recommended_team,
            "Customer Success"
        );
        assert_eq!(policy.rules().len(), 1);
    }

    #[test]
    fn category_matchers() {
        assert!(CategoryMatch::Technical.matches(&Category::Technical(TechnicalArea::Api)));
        assert!(!CategoryMatch::Technical.matches(&Category::GeneralTechnical));
        assert!(CategoryMatch::NotGeneralInquiry.matches(&Category::GeneralTechnical));
        assert!(!CategoryMatch::NotGeneralInquiry.matches(&Category::GeneralInquiry));
        assert!(CategoryMatch::Any.matches(&Category::Error));
    }
}
