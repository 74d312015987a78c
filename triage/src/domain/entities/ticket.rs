//! Ticket domain entity
//!
//! A support request submitted for triage. Built once from an untyped JSON
//! record at the boundary and never mutated afterwards.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{FieldError, ValidationError};

/// Customer subscription tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerTier {
    Free,
    Premium,
    Enterprise,
}

impl CustomerTier {
    /// Premium and enterprise accounts are high-value
    pub fn is_high_value(&self) -> bool {
        matches!(self, CustomerTier::Premium | CustomerTier::Enterprise)
    }
}

impl std::fmt::Display for CustomerTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CustomerTier::Free => write!(f, "free"),
            CustomerTier::Premium => write!(f, "premium"),
            CustomerTier::Enterprise => write!(f, "enterprise"),
        }
    }
}

impl std::str::FromStr for CustomerTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(CustomerTier::Free),
            "premium" => Ok(CustomerTier::Premium),
            "enterprise" => Ok(CustomerTier::Enterprise),
            _ => Err(format!("Unknown customer tier: {}", s)),
        }
    }
}

/// A validated support ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Opaque request identifier
    pub ticket_id: String,
    pub customer_tier: CustomerTier,
    pub subject: String,
    pub message: String,
    pub previous_tickets: u32,
    pub monthly_revenue: f64,
    pub account_age_days: u32,
}

impl Ticket {
    /// Validate an untyped record into a ticket.
    ///
    /// Every field is checked before returning so the error names all
    /// offending fields at once. Unknown extra fields are ignored.
    pub fn from_raw(raw: &Value) -> Result<Self, ValidationError> {
        let record = raw
            .as_object()
            .ok_or_else(|| ValidationError::NotAnObject(json_type(raw)))?;

        let mut reader = FieldReader::new(record);
        let ticket_id = reader.string("ticket_id");
        let customer_tier = reader.tier("customer_tier");
        let subject = reader.string("subject");
        let message = reader.string("message");
        let previous_tickets = reader.count("previous_tickets");
        let monthly_revenue = reader.amount("monthly_revenue");
        let account_age_days = reader.count("account_age_days");

        let (
            Some(ticket_id),
            Some(customer_tier),
            Some(subject),
            Some(message),
            Some(previous_tickets),
            Some(monthly_revenue),
            Some(account_age_days),
        ) = (
            ticket_id,
            customer_tier,
            subject,
            message,
            previous_tickets,
            monthly_revenue,
            account_age_days,
        )
        else {
            return Err(ValidationError::Fields(reader.into_errors()));
        };

        Ok(Self {
            ticket_id,
            customer_tier,
            subject,
            message,
            previous_tickets,
            monthly_revenue,
            account_age_days,
        })
    }
}

/// Reads typed fields out of a JSON object, collecting violations as it goes.
/// A `None` return always has a matching entry in `errors`.
struct FieldReader<'a> {
    record: &'a Map<String, Value>,
    errors: Vec<FieldError>,
}

impl<'a> FieldReader<'a> {
    fn new(record: &'a Map<String, Value>) -> Self {
        Self {
            record,
            errors: Vec::new(),
        }
    }

    fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    fn get(&mut self, field: &'static str) -> Option<&'a Value> {
        let value = self.record.get(field);
        if value.is_none() {
            self.errors.push(FieldError::Missing { field });
        }
        value
    }

    fn wrong_type(&mut self, field: &'static str, expected: &'static str, value: &Value) {
        self.errors.push(FieldError::WrongType {
            field,
            expected,
            found: json_type(value),
        });
    }

    fn string(&mut self, field: &'static str) -> Option<String> {
        let value = self.get(field)?;
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                self.wrong_type(field, "string", value);
                None
            }
        }
    }

    fn tier(&mut self, field: &'static str) -> Option<CustomerTier> {
        let raw = self.string(field)?;
        match raw.parse() {
            Ok(tier) => Some(tier),
            Err(_) => {
                self.errors.push(FieldError::UnknownTier { field, value: raw });
                None
            }
        }
    }

    /// Non-negative whole number. Floats with no fractional part are accepted.
    fn count(&mut self, field: &'static str) -> Option<u32> {
        let value = self.get(field)?;
        let Value::Number(number) = value else {
            self.wrong_type(field, "integer", value);
            return None;
        };

        if let Some(n) = number.as_u64() {
            return match u32::try_from(n) {
                Ok(n) => Some(n),
                Err(_) => {
                    self.out_of_range(field, format!("must be at most {}", u32::MAX));
                    None
                }
            };
        }
        if number.as_i64().is_some() {
            self.out_of_range(field, "must be greater than or equal to 0".to_string());
            return None;
        }

        let n = number.as_f64().unwrap_or(f64::NAN);
        if n.fract() != 0.0 || !n.is_finite() {
            self.errors.push(FieldError::WrongType {
                field,
                expected: "integer",
                found: "fractional number",
            });
            None
        } else if n < 0.0 {
            self.out_of_range(field, "must be greater than or equal to 0".to_string());
            None
        } else if n > f64::from(u32::MAX) {
            self.out_of_range(field, format!("must be at most {}", u32::MAX));
            None
        } else {
            Some(n as u32)
        }
    }

    /// Non-negative finite decimal. Integers are widened.
    fn amount(&mut self, field: &'static str) -> Option<f64> {
        let value = self.get(field)?;
        let Some(n) = value.as_f64() else {
            self.wrong_type(field, "number", value);
            return None;
        };
        if !n.is_finite() || n < 0.0 {
            self.out_of_range(field, "must be a finite number >= 0".to_string());
            return None;
        }
        Some(n)
    }

    fn out_of_range(&mut self, field: &'static str, constraint: String) {
        self.errors.push(FieldError::OutOfRange { field, constraint });
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
