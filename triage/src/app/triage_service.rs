//! Triage service
//!
//! The full pipeline for one ticket: validate the raw record, collect every
//! analyzer's opinion, then hand them to the orchestrator. Batches fan out
//! over tokio blocking tasks and come back in input order.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::orchestrator::Orchestrator;
use super::routing_policy::{PrecedencePolicy, RoutingPolicy};
use crate::adapters::{CustomerContextAnalyzer, TechnicalAnalyzer};
use crate::config::{Config, DEFAULT_MAX_CONCURRENCY};
use crate::domain::entities::{AgentOutput, Opinion, Ticket};
use crate::domain::ports::Analyzer;
use crate::error::AppError;

/// Service that turns raw ticket records into final routing decisions
pub struct TriageService<P = PrecedencePolicy>
where
    P: RoutingPolicy,
{
    analyzers: Vec<Arc<dyn Analyzer>>,
    orchestrator: Orchestrator<P>,
    max_concurrency: usize,
}

impl TriageService<PrecedencePolicy> {
    pub fn new(analyzers: Vec<Arc<dyn Analyzer>>) -> Self {
        Self {
            analyzers,
            orchestrator: Orchestrator::new(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    /// Technical and customer context analyzers, tuned by `config`
    pub fn from_config(config: &Config) -> Self {
        let technical: Arc<dyn Analyzer> = Arc::new(TechnicalAnalyzer::new());
        let customer: Arc<dyn Analyzer> = Arc::new(
            CustomerContextAnalyzer::new().with_thresholds(config.thresholds.clone()),
        );
        Self::new(vec![technical, customer]).with_max_concurrency(config.max_concurrency)
    }
}

impl Default for TriageService<PrecedencePolicy> {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl<P> TriageService<P>
where
    P: RoutingPolicy + 'static,
{
    /// Swap the routing policy, keeping analyzers and limits
    pub fn with_policy<Q: RoutingPolicy>(self, policy: Q) -> TriageService<Q> {
        TriageService {
            analyzers: self.analyzers,
            orchestrator: Orchestrator::with_policy(policy),
            max_concurrency: self.max_concurrency,
        }
    }

    /// Values below 1 are treated as 1
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    pub fn analyzers(&self) -> &[Arc<dyn Analyzer>] {
        &self.analyzers
    }

    /// Every analyzer's opinion, in registration order
    pub fn analyze(&self, ticket: &Ticket) -> Vec<Opinion> {
        self.analyzers
            .iter()
            .map(|analyzer| {
                let opinion = analyzer.opinion(ticket);
                debug!(
                    ticket_id = %ticket.ticket_id,
                    source = %opinion.source,
                    category = %opinion.output.category,
                    priority = %opinion.output.priority,
                    team = %opinion.output.recommended_team,
                    "Analyzer opinion"
                );
                opinion
            })
            .collect()
    }

    /// Decide an already validated ticket
    pub fn process_validated(&self, ticket: &Ticket) -> AgentOutput {
        let opinions = self.analyze(ticket);
        self.orchestrator.resolve(ticket, &opinions)
    }

    /// Decide a raw record. Never fails: records that do not validate get the
    /// Error / Critical / System Admin output.
    pub fn process_ticket(&self, raw: &Value) -> AgentOutput {
        match Ticket::from_raw(raw) {
            Ok(ticket) => self.process_validated(&ticket),
            Err(err) => {
                let ticket_id = raw
                    .get("ticket_id")
                    .and_then(|id| id.as_str())
                    .unwrap_or("N/A");
                warn!(
                    ticket_id,
                    error = %err,
                    "Ticket failed validation"
                );
                AgentOutput::validation_failure(&err)
            }
        }
    }

    /// Decide a batch of raw records concurrently.
    ///
    /// At most `max_concurrency` records are analyzed at once. Outputs are in
    /// input order. Invalid records still yield their error output; only a
    /// worker that panics or is cancelled fails the batch.
    pub async fn process_batch(
        self: &Arc<Self>,
        records: Vec<Value>,
    ) -> Result<Vec<AgentOutput>, AppError> {
        let total = records.len();
        info!(total, max_concurrency = self.max_concurrency, "Processing batch");

        let permits = Arc::new(Semaphore::new(self.max_concurrency));
        let mut workers = JoinSet::new();

        for (index, record) in records.into_iter().enumerate() {
            let permit = permits
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| AppError::Internal(format!("Worker limit closed: {}", e)))?;
            let service = Arc::clone(self);
            workers.spawn_blocking(move || {
                let output = service.process_ticket(&record);
                drop(permit);
                (index, output)
            });
        }

        let mut outputs: Vec<Option<AgentOutput>> = vec![None; total];
        while let Some(joined) = workers.join_next().await {
            let (index, output) = joined?;
            outputs[index] = Some(output);
        }

        outputs
            .into_iter()
            .enumerate()
            .map(|(index, output)| {
                output.ok_or_else(|| {
                    AppError::Internal(format!("No output produced for record {}", index))
                })
            })
            .collect()
    }
}

/// Parse a JSON document holding an array of raw ticket records
pub fn parse_records(json: &str) -> Result<Vec<Value>, AppError> {
    match serde_json::from_str(json)? {
        Value::Array(records) => Ok(records),
        other => Err(AppError::InvalidBatch(format!(
            "expected a JSON array of ticket records, got {}",
            match other {
                Value::Object(_) => "an object",
                Value::String(_) => "a string",
                Value::Number(_) => "a number",
                Value::Bool(_) => "a boolean",
                _ => "null",
            }
        ))),
    }
}

/// Read and parse a JSON file of raw ticket records
pub async fn read_records(path: impl AsRef<Path>) -> Result<Vec<Value>, AppError> {
    let json = tokio::fs::read_to_string(path.as_ref()).await?;
    parse_records(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::routing_policy::{CategoryMatch, PrecedenceRule};
    use crate::domain::entities::{Category, Priority, SourceId, TechnicalArea};
    use crate::test_utils::{raw_ticket, test_output, PanickingAnalyzer, StaticAnalyzer};
    use serde_json::json;

    fn static_service(
        technical: AgentOutput,
        customer: AgentOutput,
    ) -> (TriageService, Arc<StaticAnalyzer>) {
        let tech = Arc::new(StaticAnalyzer::new(SourceId::technical(), technical));
        let cust = Arc::new(StaticAnalyzer::new(SourceId::customer(), customer));
        let analyzers: Vec<Arc<dyn Analyzer>> = vec![tech.clone(), cust];
        (TriageService::new(analyzers), tech)
    }

    #[test]
    fn default_service_runs_both_analyzers() {
        let service = TriageService::default();
        let sources: Vec<SourceId> = service.analyzers().iter().map(|a| a.source()).collect();
        assert_eq!(sources, vec![SourceId::technical(), SourceId::customer()]);
        assert_eq!(service.max_concurrency(), DEFAULT_MAX_CONCURRENCY);
    }

    #[test]
    fn security_question_from_enterprise_goes_to_engineering() {
        let raw = json!({
            "ticket_id": "SUP-005",
            "customer_tier": "enterprise",
            "subject": "Urgent: Security vulnerability?",
            "message": "Our security team flagged that your API responses include internal server paths",
            "previous_tickets": 20,
            "monthly_revenue": 50000,
            "account_age_days": 900
        });
        let service = TriageService::default();

        let ticket = Ticket::from_raw(&raw).unwrap();
        let opinions = service.analyze(&ticket);
        assert_eq!(opinions[0].output.priority, Priority::Medium);
        assert_eq!(opinions[1].output.priority, Priority::High);

        let output = service.process_ticket(&raw);
        assert_eq!(output.priority, Priority::High);
        assert_eq!(output.category, Category::Technical(TechnicalArea::Api));
        assert_eq!(output.recommended_team, "Engineering");
    }

    #[test]
    fn missing_field_yields_error_output() {
        let mut raw = raw_ticket("BAD-1");
        raw.as_object_mut().unwrap().remove("subject");

        let (service, tech) = static_service(
            test_output(Category::GeneralTechnical, Priority::Low, "Support Tier 2"),
            test_output(Category::GeneralInquiry, Priority::Low, "Customer Success"),
        );
        let output = service.process_ticket(&raw);

        assert_eq!(output.category, Category::Error);
        assert_eq!(output.priority, Priority::Critical);
        assert_eq!(output.recommended_team, "System Admin");
        assert!(output.reasoning.contains("subject"));
        assert_eq!(tech.call_count(), 0);
    }

    #[test]
    fn every_missing_field_yields_error_output() {
        let service = TriageService::default();
        let fields = [
            "ticket_id",
            "customer_tier",
            "subject",
            "message",
            "previous_tickets",
            "monthly_revenue",
            "account_age_days",
        ];
        for field in fields {
            let mut raw = raw_ticket("BAD-2");
            raw.as_object_mut().unwrap().remove(field);

            let output = service.process_ticket(&raw);
            assert_eq!(output.category, Category::Error, "{}", field);
            assert_eq!(output.priority, Priority::Critical, "{}", field);
            assert_eq!(output.recommended_team, "System Admin", "{}", field);
            let missing = format!("{}: field required", field);
            assert!(output.reasoning.contains(&missing), "{}", output.reasoning);
        }
    }

    #[test]
    fn valid_ticket_consults_every_analyzer_once() {
        let (service, tech) = static_service(
            test_output(Category::GeneralTechnical, Priority::Low, "Support Tier 2"),
            test_output(Category::Billing, Priority::Medium, "Billing Support"),
        );
        let output = service.process_ticket(&raw_ticket("T-1"));
        assert_eq!(tech.call_count(), 1);
        assert_eq!(output.category, Category::Billing);
        assert_eq!(output.priority, Priority::Medium);
    }

    #[test]
    fn custom_policy_flows_through_service() {
        let (service, _) = static_service(
            test_output(
                Category::Technical(TechnicalArea::Api),
                Priority::Low,
                "Engineering",
            ),
            test_output(Category::GeneralInquiry, Priority::Low, "Customer Success"),
        );
        let service = service.with_policy(PrecedencePolicy::new(vec![PrecedenceRule::new(
            SourceId::customer(),
            CategoryMatch::Any,
        )]));
        let output = service.process_ticket(&raw_ticket("T-2"));
        assert_eq!(output.recommended_team, "Customer Success");
    }

    #[test]
    fn concurrency_is_at_least_one() {
        let service = TriageService::default().with_max_concurrency(0);
        assert_eq!(service.max_concurrency(), 1);
    }

    #[tokio::test]
    async fn batch_preserves_input_order() {
        let service = Arc::new(TriageService::default().with_max_concurrency(3));
        let records: Vec<Value> = (0..20).map(|i| raw_ticket(&format!("T-{}", i))).collect();
        let expected: Vec<AgentOutput> =
            records.iter().map(|r| service.process_ticket(r)).collect();

        let outputs = service.process_batch(records).await.unwrap();
        assert_eq!(outputs, expected);
    }

    #[tokio::test]
    async fn batch_keeps_invalid_records_in_place() {
        let service = Arc::new(TriageService::default());
        let records = vec![raw_ticket("A"), json!("not a ticket"), raw_ticket("C")];

        let outputs = service.process_batch(records).await.unwrap();
        assert_eq!(outputs.len(), 3);
        assert_ne!(outputs[0].category, Category::Error);
        assert_eq!(outputs[1].category, Category::Error);
        assert_ne!(outputs[2].category, Category::Error);
    }

    #[tokio::test]
    async fn empty_batch_is_empty() {
        let service = Arc::new(TriageService::default());
        assert!(service.process_batch(Vec::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn panicking_analyzer_fails_the_batch() {
        let analyzer: Arc<dyn Analyzer> = Arc::new(PanickingAnalyzer);
        let service = Arc::new(TriageService::new(vec![analyzer]));
        let err = service
            .process_batch(vec![raw_ticket("P-1")])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Worker(_)));
    }

    #[test]
    fn parse_records_requires_an_array() {
        let records = parse_records(r#"[{"ticket_id": "1"}, 2]"#).unwrap();
        assert_eq!(records.len(), 2);

        let err = parse_records(r#"{"ticket_id": "1"}"#).unwrap_err();
        assert!(matches!(err, AppError::InvalidBatch(_)));

        let err = parse_records("[1, 2").unwrap_err();
        assert!(matches!(err, AppError::Json(_)));
    }

    #[tokio::test]
    async fn read_records_from_file() {
        let path = std::env::temp_dir().join(format!("triage-{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, r#"[{"ticket_id": "F-1"}]"#).await.unwrap();
        let records = read_records(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();
        assert_eq!(records[0]["ticket_id"], "F-1");

        let err = read_records(&path).await.unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
