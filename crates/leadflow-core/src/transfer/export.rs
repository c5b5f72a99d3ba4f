use crate::domain::Lead;
use crate::time::format_rfc3339;

pub const EXPORT_HEADER: [&str; 14] = [
    "id",
    "first_name",
    "last_name",
    "email",
    "phone",
    "company",
    "title",
    "status",
    "score",
    "source",
    "notes",
    "assigned_to",
    "created_at",
    "updated_at",
];

/// Serializes `leads` in the given order. Optional fields export as empty
/// cells, which the importer reads back as absent.
pub fn export_leads(leads: &[Lead]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADER)?;
    for lead in leads {
        writer.write_record([
            lead.id.to_string(),
            lead.first_name.clone(),
            lead.last_name.clone(),
            lead.email.clone(),
            lead.phone.clone().unwrap_or_default(),
            lead.company.clone().unwrap_or_default(),
            lead.title.clone().unwrap_or_default(),
            lead.status.to_string(),
            lead.score.to_string(),
            lead.source.clone(),
            lead.notes.clone().unwrap_or_default(),
            lead.assigned_to.map(|id| id.to_string()).unwrap_or_default(),
            format_rfc3339(lead.created_at),
            format_rfc3339(lead.updated_at),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))
}
