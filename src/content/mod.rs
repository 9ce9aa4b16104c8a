//! Detection content module
//!
//! Analytic rules, hunting queries, ASIM parsers and workbooks travel with
//! the connectors in a solution package. This module converts them between
//! the in-memory entities and the text formats used in the Sentinel content
//! repository, in both directions.
//!
//! # Overview
//!
//! - Export: rules, hunting queries and parsers to YAML; workbooks to JSON
//! - Import: hand-pasted YAML/JSON back to entities, tolerating the looser
//!   variants people paste (shorthand durations, `gt` operators,
//!   `FunctionName`-style parser fields)

mod export;
mod import;
mod types;
mod workbook;

pub use export::{analytic_rule_yaml, asim_parser_yaml, hunting_query_yaml};
pub use import::{parse_analytic_rule, parse_asim_parser, parse_hunting_query, target_schema};
pub use types::{
    AnalyticRule, AsimParser, EntityMapping, FieldMapping, HuntingQuery, RequiredDataConnector,
    RuleKind, Severity, TriggerOperator, Workbook, ASIM_SCHEMAS,
};
pub use workbook::{
    parse_workbook, template_id_for, workbook_document, workbook_json, WORKBOOK_SCHEMA,
};
