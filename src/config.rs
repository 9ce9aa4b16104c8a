//! Configuration types for connector projects
//!
//! This module contains the in-memory model the compiler reads: one
//! [`Project`] holding the shared [`Solution`], the list of connectors and
//! the detection content. Field names follow the camelCase vocabulary of
//! the generated documents so project files read like the output.

use crate::auth::PollerAuth;
use crate::content::{AnalyticRule, AsimParser, HuntingQuery, Workbook};
use crate::pagination::PollerPaging;
use crate::types::{ColumnType, ConnectorKind, JsonObject, Method, ResponseFormat, StringMap};
use serde::{Deserialize, Serialize};

/// Name of the mandatory time column
pub const TIME_GENERATED: &str = "TimeGenerated";

// ============================================================================
// Top-Level Project
// ============================================================================

/// Complete project: solution metadata, connectors and detection content
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    /// Packaging metadata shared by every connector
    pub solution: Solution,

    /// Connectors packaged in this solution
    pub connectors: Vec<ConnectorData>,

    /// Scheduled and near-real-time analytic rules
    pub analytic_rules: Vec<AnalyticRule>,

    /// Hunting queries
    pub hunting_queries: Vec<HuntingQuery>,

    /// ASIM normalization parsers
    pub asim_parsers: Vec<AsimParser>,

    /// Workbooks
    pub workbooks: Vec<Workbook>,
}

impl Project {
    /// Find a connector by its id
    pub fn connector(&self, connector_id: &str) -> Option<&ConnectorData> {
        self.connectors
            .iter()
            .find(|c| c.meta.connector_id == connector_id)
    }

    /// Name used for the package root folder and the solution data file
    ///
    /// Falls back to the first connector id when the solution is unnamed.
    pub fn solution_name(&self) -> String {
        if !self.solution.name.is_empty() {
            return self.solution.name.clone();
        }
        self.connectors
            .first()
            .map(|c| c.meta.connector_id.clone())
            .unwrap_or_default()
    }
}

// ============================================================================
// Connector
// ============================================================================

/// One connector: identity, table, data flow, UI and optional poller settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectorData {
    pub meta: Meta,
    pub schema: TableSchema,
    pub data_flow: DataFlow,
    #[serde(rename = "connectorUI")]
    pub connector_ui: ConnectorUi,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poller_config: Option<PollerConfig>,
}

/// Connector identity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Meta {
    /// Alphanumeric id starting with a letter; drives every derived name
    pub connector_id: String,
    pub title: String,
    pub publisher: String,
    pub description_markdown: String,
    /// Raw logo markup, already sanitized upstream
    pub logo: String,
    pub connector_kind: ConnectorKind,
}

// ============================================================================
// Table Schema
// ============================================================================

/// Column of a custom log table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl Column {
    /// Create a column
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }

    /// The mandatory `TimeGenerated` datetime column
    pub fn time_generated() -> Self {
        Self::new(TIME_GENERATED, ColumnType::Datetime)
    }

    /// Whether this is the time column
    pub fn is_time_generated(&self) -> bool {
        self.name == TIME_GENERATED
    }
}

/// Custom log table schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableSchema {
    /// Table name, ending in `_CL`
    pub table_name: String,
    /// Ordered columns, `TimeGenerated` first
    pub columns: Vec<Column>,
}

impl Default for TableSchema {
    fn default() -> Self {
        Self {
            table_name: String::new(),
            columns: vec![Column::time_generated()],
        }
    }
}

impl TableSchema {
    /// Create a schema, pinning `TimeGenerated` as the first column
    ///
    /// Any `TimeGenerated` entry in `columns` is dropped in favour of the
    /// canonical datetime column at position zero.
    pub fn new(table_name: impl Into<String>, columns: Vec<Column>) -> Self {
        let mut all = vec![Column::time_generated()];
        all.extend(columns.into_iter().filter(|c| !c.is_time_generated()));
        Self {
            table_name: table_name.into(),
            columns: all,
        }
    }

    /// Columns other than `TimeGenerated`, in declaration order
    pub fn non_time_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| !c.is_time_generated())
    }
}

// ============================================================================
// Data Flow
// ============================================================================

/// Ingestion pipeline settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataFlow {
    /// Input stream name, starting with `Custom-`
    pub stream_name: String,
    /// Transformation query; passed through verbatim
    pub transform_kql: String,
    /// Use `input_columns` instead of the table columns
    pub input_columns_override: bool,
    pub input_columns: Vec<Column>,
}

impl Default for DataFlow {
    fn default() -> Self {
        Self {
            stream_name: String::new(),
            transform_kql: default_transform_kql(),
            input_columns_override: false,
            input_columns: Vec::new(),
        }
    }
}

fn default_transform_kql() -> String {
    "source | extend TimeGenerated = now()".to_string()
}

// ============================================================================
// Connector UI
// ============================================================================

/// Gallery metadata shown for the connector
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectorUi {
    pub graph_queries: Vec<GraphQuery>,
    pub sample_queries: Vec<SampleQuery>,
    pub connectivity_criteria: Vec<ConnectivityCriteria>,
    pub permissions: Permissions,
    pub instruction_steps: Vec<InstructionStep>,
}

/// Chart query on the connector page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQuery {
    pub metric_name: String,
    pub legend: String,
    pub base_query: String,
}

/// Example query on the connector page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleQuery {
    pub description: String,
    pub query: String,
}

/// How the portal decides a connector is connected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConnectivityCriteria {
    /// Connected when the custom queries return data
    IsConnectedQuery {
        #[serde(default)]
        value: Vec<String>,
    },
    /// Connected when any connector instance exists
    HasDataConnectors {
        #[serde(default)]
        value: Vec<String>,
    },
}

/// Permissions required to deploy the connector
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Permissions {
    pub resource_provider: Vec<ResourceProviderPermission>,
    pub customs: Vec<CustomPermission>,
}

/// Permission on an Azure resource provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceProviderPermission {
    pub provider: String,
    pub permissions_display_text: String,
    pub provider_display_name: String,
    pub scope: String,
    #[serde(default)]
    pub required_permissions: RequiredPermissions,
}

/// Access flags for a resource provider permission
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequiredPermissions {
    pub write: bool,
    pub read: bool,
    pub delete: bool,
    pub action: bool,
}

/// Free-form permission requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPermission {
    pub name: String,
    pub description: String,
}

/// Step of the connection instructions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionStep {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub instructions: Vec<Instruction>,
}

/// Single instruction block; parameters are passed through untouched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    #[serde(rename = "type")]
    pub instruction_type: InstructionType,
    #[serde(default)]
    pub parameters: JsonObject,
}

/// Kind of instruction block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstructionType {
    Markdown,
    CopyableLabel,
    DeployPushConnectorButton,
    ConnectionToggleButton,
    Textbox,
    OAuthForm,
    Dropdown,
    InfoMessage,
    InstructionStepsGroup,
    InstallAgent,
}

impl InstructionType {
    /// Wire name of the instruction type
    pub fn as_str(self) -> &'static str {
        match self {
            InstructionType::Markdown => "Markdown",
            InstructionType::CopyableLabel => "CopyableLabel",
            InstructionType::DeployPushConnectorButton => "DeployPushConnectorButton",
            InstructionType::ConnectionToggleButton => "ConnectionToggleButton",
            InstructionType::Textbox => "Textbox",
            InstructionType::OAuthForm => "OAuthForm",
            InstructionType::Dropdown => "Dropdown",
            InstructionType::InfoMessage => "InfoMessage",
            InstructionType::InstructionStepsGroup => "InstructionStepsGroup",
            InstructionType::InstallAgent => "InstallAgent",
        }
    }
}

// ============================================================================
// Poller Config
// ============================================================================

/// REST API polling settings (only for `RestApiPoller` connectors)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    pub auth: PollerAuth,
    pub request: PollerRequest,
    pub response: PollerResponse,
    pub paging: PollerPaging,
}

/// Request settings for a polling connector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PollerRequest {
    pub api_endpoint: String,
    pub http_method: Method,
    pub start_time_attribute_name: String,
    pub end_time_attribute_name: String,
    pub query_window_in_min: u32,
    pub query_time_format: String,
    #[serde(rename = "rateLimitQPS")]
    pub rate_limit_qps: u32,
    pub retry_count: u32,
    pub timeout_in_seconds: u32,
    pub headers: StringMap,
    pub query_parameters: StringMap,
    pub query_parameters_template: String,
    /// Only meaningful for POST requests
    pub is_post_payload_json: bool,
}

impl Default for PollerRequest {
    fn default() -> Self {
        Self {
            api_endpoint: String::new(),
            http_method: Method::GET,
            start_time_attribute_name: String::new(),
            end_time_attribute_name: String::new(),
            query_window_in_min: 5,
            query_time_format: "yyyy-MM-ddTHH:mm:ssZ".to_string(),
            rate_limit_qps: 10,
            retry_count: 3,
            timeout_in_seconds: 60,
            headers: StringMap::new(),
            query_parameters: StringMap::new(),
            query_parameters_template: String::new(),
            is_post_payload_json: true,
        }
    }
}

/// Response parsing settings for a polling connector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PollerResponse {
    pub events_json_paths: Vec<String>,
    pub success_status_json_path: String,
    pub success_status_value: String,
    pub is_gzip_compressed: bool,
    pub format: ResponseFormat,
    pub convert_child_properties_to_array: bool,
}

impl Default for PollerResponse {
    fn default() -> Self {
        Self {
            events_json_paths: vec!["$".to_string()],
            success_status_json_path: String::new(),
            success_status_value: String::new(),
            is_gzip_compressed: false,
            format: ResponseFormat::Json,
            convert_child_properties_to_array: false,
        }
    }
}

// ============================================================================
// Solution
// ============================================================================

/// Marketplace packaging metadata shared by all connectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Solution {
    pub name: String,
    pub publisher_id: String,
    pub offer_id: String,
    pub version: String,
    pub categories: Categories,
    pub support: Support,
    /// `YYYY-MM-DD`
    pub first_publish_date: String,
}

impl Default for Solution {
    fn default() -> Self {
        Self {
            name: String::new(),
            publisher_id: String::new(),
            offer_id: String::new(),
            version: "1.0.0".to_string(),
            categories: Categories::default(),
            support: Support::default(),
            first_publish_date: chrono::Utc::now().format("%Y-%m-%d").to_string(),
        }
    }
}

/// Marketplace categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Categories {
    pub domains: Vec<String>,
    pub verticals: Vec<String>,
}

impl Default for Categories {
    fn default() -> Self {
        Self {
            domains: vec!["Security - Threat Protection".to_string()],
            verticals: Vec::new(),
        }
    }
}

/// Support contact
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Support {
    pub name: String,
    pub email: String,
    pub tier: SupportTier,
    pub link: String,
}

/// Support tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupportTier {
    Microsoft,
    #[default]
    Partner,
    Community,
}

impl SupportTier {
    pub fn as_str(self) -> &'static str {
        match self {
            SupportTier::Microsoft => "Microsoft",
            SupportTier::Partner => "Partner",
            SupportTier::Community => "Community",
        }
    }
}
