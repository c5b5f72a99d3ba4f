mod export;
mod import;

pub use export::{export_leads, EXPORT_HEADER};
pub use import::{
    import_leads, parse_candidates, ImportError, ImportReport, ImportRowError, ParsedRow,
};
