use crate::domain::ids::TeamMemberId;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeamRole {
    Admin,
    Manager,
    SalesRep,
}

impl TeamRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamRole::Admin => "ADMIN",
            TeamRole::Manager => "MANAGER",
            TeamRole::SalesRep => "SALES_REP",
        }
    }
}

impl fmt::Display for TeamRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TeamRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace(['-', ' '], "_").as_str() {
            "ADMIN" => Ok(TeamRole::Admin),
            "MANAGER" => Ok(TeamRole::Manager),
            "SALES_REP" | "REP" => Ok(TeamRole::SalesRep),
            _ => Err(CoreError::InvalidTeamRole(s.trim().to_string())),
        }
    }
}

/// Owned by the user-management collaborator; read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: TeamMemberId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: TeamRole,
    pub is_active: bool,
}

impl TeamMember {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// Members that may be offered as a new assignment choice.
pub fn assignable_members(members: &[TeamMember]) -> Vec<&TeamMember> {
    members.iter().filter(|member| member.is_active).collect()
}
