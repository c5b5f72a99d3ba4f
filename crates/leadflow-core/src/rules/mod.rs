pub mod score;
pub mod status;
pub mod validation;

pub use score::{bucket, color_class, Score, ScoreBucket, ScoreTier};
pub use status::{LeadStatus, StatusChange, StatusSet, PIPELINE_STATUSES, STANDARD_STATUSES};
pub use validation::{
    validate, FieldError, LeadCandidate, Validation, ValidationError, DEFAULT_SOURCE,
};
