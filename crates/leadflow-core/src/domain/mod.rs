pub mod email;
pub mod ids;
pub mod interaction;
pub mod lead;
pub mod phone;
pub mod team;

pub use email::{is_valid_email, normalize_email};
pub use ids::{InteractionId, LeadId, TeamMemberId};
pub use interaction::{Interaction, InteractionKind, InteractionNew};
pub use lead::{Lead, LeadNew, LeadUpdate};
pub use phone::is_valid_phone;
pub use team::{assignable_members, TeamMember, TeamRole};
