//! Detection content entities

use serde::{Deserialize, Serialize};

// ============================================================================
// Analytic Rule
// ============================================================================

/// Scheduled or near-real-time analytic rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticRule {
    pub id: String,
    pub name: String,
    pub description: String,
    pub severity: Severity,
    pub kind: RuleKind,
    /// ISO 8601 duration
    pub query_period: String,
    /// ISO 8601 duration
    pub query_frequency: String,
    pub trigger_operator: TriggerOperator,
    pub trigger_threshold: i64,
    pub tactics: Vec<String>,
    pub relevant_techniques: Vec<String>,
    pub query: String,
    pub entity_mappings: Vec<EntityMapping>,
    pub required_data_connectors: Vec<RequiredDataConnector>,
    pub version: String,
    pub enabled: bool,
}

impl Default for AnalyticRule {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            description: String::new(),
            severity: Severity::default(),
            kind: RuleKind::default(),
            query_period: DEFAULT_RULE_WINDOW.to_string(),
            query_frequency: DEFAULT_RULE_WINDOW.to_string(),
            trigger_operator: TriggerOperator::default(),
            trigger_threshold: 0,
            tactics: Vec::new(),
            relevant_techniques: Vec::new(),
            query: String::new(),
            entity_mappings: Vec::new(),
            required_data_connectors: Vec::new(),
            version: DEFAULT_CONTENT_VERSION.to_string(),
            enabled: true,
        }
    }
}

pub(crate) const DEFAULT_RULE_WINDOW: &str = "PT5H";
pub(crate) const DEFAULT_CONTENT_VERSION: &str = "1.0.0";

/// Alert severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    High,
    #[default]
    Medium,
    Low,
    Informational,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Informational => "Informational",
        }
    }

    /// Parse a severity in any letter case (`high`, `HIGH`, `High`)
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "high" => Some(Severity::High),
            "medium" => Some(Severity::Medium),
            "low" => Some(Severity::Low),
            "informational" => Some(Severity::Informational),
            _ => None,
        }
    }
}

/// Analytic rule kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleKind {
    #[default]
    Scheduled,
    NRT,
}

impl RuleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::Scheduled => "Scheduled",
            RuleKind::NRT => "NRT",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "scheduled" => Some(RuleKind::Scheduled),
            "nrt" => Some(RuleKind::NRT),
            _ => None,
        }
    }
}

/// Comparison applied to the query result count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerOperator {
    #[default]
    GreaterThan,
    LessThan,
    Equal,
    NotEqual,
}

impl TriggerOperator {
    /// Short form used in exported YAML
    pub fn shorthand(self) -> &'static str {
        match self {
            TriggerOperator::GreaterThan => "gt",
            TriggerOperator::LessThan => "lt",
            TriggerOperator::Equal => "eq",
            TriggerOperator::NotEqual => "ne",
        }
    }

    /// Accept short or long spelling in any case; unknown values map to `GreaterThan`
    pub fn from_any(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "gt" | "greaterthan" => TriggerOperator::GreaterThan,
            "lt" | "lessthan" => TriggerOperator::LessThan,
            "eq" | "equal" => TriggerOperator::Equal,
            "ne" | "notequal" => TriggerOperator::NotEqual,
            _ => TriggerOperator::GreaterThan,
        }
    }
}

// ============================================================================
// Shared Pieces
// ============================================================================

/// Entity extracted from query results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityMapping {
    pub entity_type: String,
    pub field_mappings: Vec<FieldMapping>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldMapping {
    pub identifier: String,
    pub column_name: String,
}

/// Connector whose data a piece of content needs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequiredDataConnector {
    pub connector_id: String,
    pub data_types: Vec<String>,
}

// ============================================================================
// Hunting Query
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HuntingQuery {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tactics: Vec<String>,
    pub relevant_techniques: Vec<String>,
    pub query: String,
    pub entity_mappings: Vec<EntityMapping>,
    pub required_data_connectors: Vec<RequiredDataConnector>,
    pub version: String,
}

impl Default for HuntingQuery {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            description: String::new(),
            tactics: Vec::new(),
            relevant_techniques: Vec::new(),
            query: String::new(),
            entity_mappings: Vec::new(),
            required_data_connectors: Vec::new(),
            version: DEFAULT_CONTENT_VERSION.to_string(),
        }
    }
}

// ============================================================================
// ASIM Parser
// ============================================================================

/// ASIM normalization parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AsimParser {
    pub id: String,
    pub name: String,
    /// Empty when unknown
    pub target_schema: String,
    pub query: String,
    pub version: String,
}

impl Default for AsimParser {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            target_schema: String::new(),
            query: String::new(),
            version: DEFAULT_CONTENT_VERSION.to_string(),
        }
    }
}

/// Normalized schemas a parser can target
pub const ASIM_SCHEMAS: [&str; 10] = [
    "AuditEvent",
    "Authentication",
    "Dhcp",
    "Dns",
    "FileEvent",
    "NetworkSession",
    "ProcessEvent",
    "RegistryEvent",
    "UserManagement",
    "WebSession",
];

// ============================================================================
// Workbook
// ============================================================================

/// Workbook with its gallery JSON kept as raw text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Workbook {
    pub id: String,
    pub name: String,
    pub description: String,
    pub from_template_id: String,
    /// Gallery JSON as pasted; may be empty or invalid
    pub serialized_data: String,
    pub version: String,
}

impl Default for Workbook {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            description: String::new(),
            from_template_id: String::new(),
            serialized_data: String::new(),
            version: "1.0".to_string(),
        }
    }
}
