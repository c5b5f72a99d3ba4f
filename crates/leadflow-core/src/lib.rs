pub mod dashboard;
pub mod domain;
pub mod dto;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod rules;
pub mod time;
pub mod transfer;
pub mod workflow;

pub use dashboard::{
    compute_dashboard, DashboardOptions, DashboardStats, GroupOrder, RevenueSource,
};
pub use domain::*;
pub use dto::*;
pub use error::CoreError;
pub use filter::{filter_leads, parse_filter, FilterParseError, LeadFilter};
pub use gateway::{GatewayError, LeadGateway};
pub use rules::*;
pub use transfer::{export_leads, ImportError, ImportReport, ImportRowError};
pub use workflow::OpError;
