//! The correspondence between structured contact fields and vCard properties.
//!
//! Both the encoder and the decoder go through [`FIELD_MAPPINGS`]; neither
//! spells out a property name or type tag on its own.

/// The vCard properties the codec understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    FormattedName,
    Telephone,
    Email,
}

impl PropertyKind {
    /// Property name as written on export.
    pub const fn name(self) -> &'static str {
        match self {
            PropertyKind::FormattedName => "FN",
            PropertyKind::Telephone => "TEL",
            PropertyKind::Email => "EMAIL",
        }
    }

    /// Case-insensitive lookup; anything else is not ours to interpret.
    pub fn from_name(name: &str) -> Option<Self> {
        [
            PropertyKind::FormattedName,
            PropertyKind::Telephone,
            PropertyKind::Email,
        ]
        .into_iter()
        .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

/// Classification of a `TYPE` parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Cell,
    Home,
    Work,
    Unrecognized,
}

impl TypeTag {
    /// Total: every input lands on exactly one variant.
    pub fn classify(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("cell") {
            TypeTag::Cell
        } else if raw.eq_ignore_ascii_case("home") {
            TypeTag::Home
        } else if raw.eq_ignore_ascii_case("work") {
            TypeTag::Work
        } else {
            TypeTag::Unrecognized
        }
    }

    /// Wire spelling; `None` for [`TypeTag::Unrecognized`].
    pub const fn as_str(self) -> Option<&'static str> {
        match self {
            TypeTag::Cell => Some("CELL"),
            TypeTag::Home => Some("HOME"),
            TypeTag::Work => Some("WORK"),
            TypeTag::Unrecognized => None,
        }
    }
}

/// Multi-valued contact fields that travel as tagged properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    PersonalPhoneNumber,
    HomePhoneNumber,
    WorkPhoneNumber,
    PersonalEmail,
    WorkEmail,
}

impl Field {
    /// Fields every decoded record must carry.
    pub const fn is_required(self) -> bool {
        matches!(self, Field::PersonalPhoneNumber | Field::PersonalEmail)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pub field: Field,
    pub kind: PropertyKind,
    pub tag: TypeTag,
}

impl FieldMapping {
    /// `TEL;TYPE=CELL` style label used in error reports.
    pub fn describe(&self) -> String {
        match self.tag.as_str() {
            Some(tag) => format!("{};TYPE={}", self.kind.name(), tag),
            None => self.kind.name().to_string(),
        }
    }
}

pub static FIELD_MAPPINGS: [FieldMapping; 5] = [
    FieldMapping {
        field: Field::PersonalPhoneNumber,
        kind: PropertyKind::Telephone,
        tag: TypeTag::Cell,
    },
    FieldMapping {
        field: Field::HomePhoneNumber,
        kind: PropertyKind::Telephone,
        tag: TypeTag::Home,
    },
    FieldMapping {
        field: Field::WorkPhoneNumber,
        kind: PropertyKind::Telephone,
        tag: TypeTag::Work,
    },
    FieldMapping {
        field: Field::PersonalEmail,
        kind: PropertyKind::Email,
        tag: TypeTag::Home,
    },
    FieldMapping {
        field: Field::WorkEmail,
        kind: PropertyKind::Email,
        tag: TypeTag::Work,
    },
];

/// The table row for `field`. Rows are listed in [`Field`] declaration order.
pub fn mapping_for(field: Field) -> &'static FieldMapping {
    match field {
        Field::PersonalPhoneNumber => &FIELD_MAPPINGS[0],
        Field::HomePhoneNumber => &FIELD_MAPPINGS[1],
        Field::WorkPhoneNumber => &FIELD_MAPPINGS[2],
        Field::PersonalEmail => &FIELD_MAPPINGS[3],
        Field::WorkEmail => &FIELD_MAPPINGS[4],
    }
}

/// The structured field a tagged property feeds, if any.
pub fn field_for(kind: PropertyKind, tag: TypeTag) -> Option<Field> {
    FIELD_MAPPINGS
        .iter()
        .find(|m| m.kind == kind && m.tag == tag)
        .map(|m| m.field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_is_case_insensitive() {
        assert_eq!(TypeTag::classify("cell"), TypeTag::Cell);
        assert_eq!(TypeTag::classify("HoMe"), TypeTag::Home);
        assert_eq!(TypeTag::classify(" WORK "), TypeTag::Work);
    }

    #[test]
    fn classify_falls_back_to_unrecognized() {
        assert_eq!(TypeTag::classify("office"), TypeTag::Unrecognized);
        assert_eq!(TypeTag::classify("voice"), TypeTag::Unrecognized);
        assert_eq!(TypeTag::classify(""), TypeTag::Unrecognized);
    }

    #[test]
    fn telephone_tags_map_to_phone_fields() {
        assert_eq!(
            field_for(PropertyKind::Telephone, TypeTag::Cell),
            Some(Field::PersonalPhoneNumber)
        );
        assert_eq!(
            field_for(PropertyKind::Telephone, TypeTag::Home),
            Some(Field::HomePhoneNumber)
        );
        assert_eq!(
            field_for(PropertyKind::Telephone, TypeTag::Work),
            Some(Field::WorkPhoneNumber)
        );
    }

    #[test]
    fn email_has_no_cell_mapping() {
        assert_eq!(field_for(PropertyKind::Email, TypeTag::Cell), None);
        assert_eq!(
            field_for(PropertyKind::Email, TypeTag::Home),
            Some(Field::PersonalEmail)
        );
    }

    #[test]
    fn unrecognized_never_maps() {
        assert_eq!(field_for(PropertyKind::Telephone, TypeTag::Unrecognized), None);
        assert_eq!(field_for(PropertyKind::Email, TypeTag::Unrecognized), None);
    }

    #[test]
    fn every_field_has_exactly_one_row() {
        for field in [
            Field::PersonalPhoneNumber,
            Field::HomePhoneNumber,
            Field::WorkPhoneNumber,
            Field::PersonalEmail,
            Field::WorkEmail,
        ] {
            assert_eq!(FIELD_MAPPINGS.iter().filter(|m| m.field == field).count(), 1);
            assert_eq!(mapping_for(field).field, field);
        }
    }

    #[test]
    fn property_names_lookup() {
        assert_eq!(PropertyKind::from_name("tel"), Some(PropertyKind::Telephone));
        assert_eq!(PropertyKind::from_name("Email"), Some(PropertyKind::Email));
        assert_eq!(PropertyKind::from_name("FN"), Some(PropertyKind::FormattedName));
        assert_eq!(PropertyKind::from_name("N"), None);
    }

    #[test]
    fn describe_uses_wire_spelling() {
        assert_eq!(mapping_for(Field::PersonalPhoneNumber).describe(), "TEL;TYPE=CELL");
        assert_eq!(mapping_for(Field::WorkEmail).describe(), "EMAIL;TYPE=WORK");
    }
}
