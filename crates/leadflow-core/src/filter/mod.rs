mod ast;
mod parser;
mod pipeline;

use thiserror::Error;

pub use ast::LeadFilter;
pub use parser::parse_filter;
pub use pipeline::filter_leads;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterParseError {
    #[error("empty value for {0}:")]
    EmptyValue(&'static str),
    #[error("invalid status: {0}")]
    InvalidStatus(String),
    #[error("invalid score selector: {0}")]
    InvalidScore(String),
    #[error("invalid team member id: {0}")]
    InvalidAssignee(String),
    #[error("duplicate {0} selector")]
    Duplicate(&'static str),
}
