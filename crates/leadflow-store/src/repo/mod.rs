pub mod interactions;
pub mod leads;
pub mod team;

pub use interactions::InteractionsRepo;
pub use leads::LeadsRepo;
pub use team::{TeamMemberNew, TeamRepo};
