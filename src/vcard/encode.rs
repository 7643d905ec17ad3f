use super::line;
use super::mapping::{self, Field, PropertyKind};
use crate::model::ContactRecord;

/// Order in which tagged properties follow `FN` inside a card.
const EMIT_ORDER: [Field; 5] = [
    Field::PersonalPhoneNumber,
    Field::PersonalEmail,
    Field::HomePhoneNumber,
    Field::WorkPhoneNumber,
    Field::WorkEmail,
];

/// Encodes `records` as concatenated vCards, one per record, in input order.
pub fn encode(records: &[ContactRecord]) -> Vec<u8> {
    let mut out = String::new();
    for record in records {
        encode_card(&mut out, record);
    }
    out.into_bytes()
}

/// Appends a single card for `record` to `out`.
///
/// Required fields are written even when empty; nothing is validated here.
pub fn encode_card(out: &mut String, record: &ContactRecord) {
    line::write_marker(out, line::BEGIN);
    line::write_property(out, line::VERSION, None, line::VCARD_VERSION);
    line::write_property(
        out,
        PropertyKind::FormattedName.name(),
        None,
        &formatted_name(record),
    );

    for field in EMIT_ORDER {
        if let Some(value) = field_value(record, field) {
            let mapping = mapping::mapping_for(field);
            line::write_property(out, mapping.kind.name(), mapping.tag.as_str(), value);
        }
    }

    line::write_marker(out, line::END);
}

/// Title and first name are joined without a separator; the decoder's name
/// split relies on the title's trailing period.
pub fn formatted_name(record: &ContactRecord) -> String {
    format!("{}{} {}", record.title, record.first_name, record.last_name)
}

fn field_value(record: &ContactRecord, field: Field) -> Option<&str> {
    match field {
        Field::PersonalPhoneNumber => Some(record.personal_phone_number.as_str()),
        Field::PersonalEmail => Some(record.personal_email.as_str()),
        Field::HomePhoneNumber => record.home_phone_number.as_deref(),
        Field::WorkPhoneNumber => record.work_phone_number.as_deref(),
        Field::WorkEmail => record.work_email.as_deref(),
    }
}
