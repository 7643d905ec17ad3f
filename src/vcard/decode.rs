use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::line::{self, ContentLine};
use super::mapping::{self, Field, PropertyKind, TypeTag};
use crate::error::ContactResult;
use crate::model::{ContactDraft, ContactRecord, Id, User};

/// What to do with a `TEL`/`EMAIL` whose type tag has no mapped field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnmappedTagPolicy {
    #[default]
    Drop,
    Reject,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    pub unmapped_tag: UnmappedTagPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub enum MalformedReason {
    #[error("formatted name has {tokens} token(s), expected at least 3")]
    NameTooShort { tokens: usize },

    #[error("type tag is missing")]
    MissingTypeTag,

    #[error("type tag '{tag}' is not mapped to any field")]
    UnmappedTag { tag: String },

    #[error("required property is missing")]
    MissingProperty,

    #[error("card is not closed by END:VCARD")]
    Unterminated,

    #[error("BEGIN:VCARD inside an open card")]
    NestedCard,
}

/// A card that could not be turned into a [`ContactRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("record {index}, property {property}: {reason}")]
pub struct MalformedRecord {
    /// Zero-based position of the card in the document.
    pub index: usize,
    pub property: String,
    pub reason: MalformedReason,
}

pub type DecodedCard = Result<ContactRecord, MalformedRecord>;

/// The three structured parts of a formatted name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParts {
    pub title: String,
    pub first_name: String,
    pub last_name: String,
}

/// Splits `"Mr.John Doe"` into `Mr.` / `John` / `Doe`.
///
/// Tokens are separated by runs of periods and whitespace. The first token
/// always gets a period appended; tokens past the third are ignored. On
/// failure returns how many tokens were found.
pub fn split_formatted_name(value: &str) -> Result<NameParts, usize> {
    let tokens: Vec<&str> = value
        .split(|c: char| c == '.' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();
    match tokens.as_slice() {
        [title, first, last, ..] => Ok(NameParts {
            title: format!("{}.", title),
            first_name: first.to_string(),
            last_name: last.to_string(),
        }),
        short => Err(short.len()),
    }
}

/// Decodes every card of `document` independently, in document order.
///
/// The outer error covers the document as a whole (not UTF-8); per-card
/// problems are reported in place so the caller can choose between
/// rejecting everything and skipping the bad cards.
pub fn decode_cards(
    document: &[u8],
    owner_id: Id<User>,
    options: &DecodeOptions,
) -> ContactResult<Vec<DecodedCard>> {
    let text = std::str::from_utf8(document)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut cards = Vec::new();
    let mut current: Option<CardBuilder> = None;

    for raw in line::unfold(text) {
        if raw.trim().is_empty() {
            continue;
        }
        let Some(content) = ContentLine::parse(&raw) else {
            continue;
        };

        if content.is_marker(line::BEGIN) {
            if let Some(open) = current.take() {
                cards.push(Err(open.malformed(line::BEGIN, MalformedReason::NestedCard)));
            }
            current = Some(CardBuilder::new(cards.len()));
        } else if content.is_marker(line::END) {
            if let Some(open) = current.take() {
                cards.push(open.finish(owner_id));
            }
        } else if let Some(open) = current.as_mut() {
            open.accept(&content, options);
        }
    }

    if let Some(open) = current {
        cards.push(Err(open.malformed(line::END, MalformedReason::Unterminated)));
    }

    Ok(cards)
}

/// Decodes `document` and attaches every record to `owner`, all or nothing.
///
/// The first malformed card fails the call and leaves `owner` untouched.
pub fn decode(
    document: &[u8],
    owner: &mut User,
    options: &DecodeOptions,
) -> ContactResult<Vec<ContactRecord>> {
    let records = decode_cards(document, owner.id, options)?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    for record in &records {
        owner.attach(record.clone());
    }
    Ok(records)
}

#[derive(Default)]
struct TaggedValues {
    personal_phone_number: Option<String>,
    home_phone_number: Option<String>,
    work_phone_number: Option<String>,
    personal_email: Option<String>,
    work_email: Option<String>,
}

impl TaggedValues {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::PersonalPhoneNumber => &mut self.personal_phone_number,
            Field::HomePhoneNumber => &mut self.home_phone_number,
            Field::WorkPhoneNumber => &mut self.work_phone_number,
            Field::PersonalEmail => &mut self.personal_email,
            Field::WorkEmail => &mut self.work_email,
        }
    }
}

struct CardBuilder {
    index: usize,
    formatted_name: Option<String>,
    values: TaggedValues,
    failure: Option<MalformedRecord>,
}

impl CardBuilder {
    fn new(index: usize) -> Self {
        Self {
            index,
            formatted_name: None,
            values: TaggedValues::default(),
            failure: None,
        }
    }

    fn malformed(&self, property: &str, reason: MalformedReason) -> MalformedRecord {
        MalformedRecord {
            index: self.index,
            property: property.to_string(),
            reason,
        }
    }

    fn fail(&mut self, property: String, reason: MalformedReason) {
        // Only the first problem of a card is reported.
        if self.failure.is_none() {
            self.failure = Some(MalformedRecord {
                index: self.index,
                property,
                reason,
            });
        }
    }

    fn accept(&mut self, content: &ContentLine, options: &DecodeOptions) {
        let Some(kind) = PropertyKind::from_name(&content.name) else {
            return;
        };

        if kind == PropertyKind::FormattedName {
            self.formatted_name = Some(content.value.clone());
            return;
        }

        let Some(raw_tag) = content.type_tag() else {
            self.fail(kind.name().to_string(), MalformedReason::MissingTypeTag);
            return;
        };

        match mapping::field_for(kind, TypeTag::classify(raw_tag)) {
            // Repeated tags overwrite: the last property wins.
            Some(field) => *self.values.slot(field) = Some(content.value.clone()),
            None => match options.unmapped_tag {
                UnmappedTagPolicy::Drop => {}
                UnmappedTagPolicy::Reject => self.fail(
                    format!("{};TYPE={}", kind.name(), raw_tag),
                    MalformedReason::UnmappedTag {
                        tag: raw_tag.to_string(),
                    },
                ),
            },
        }
    }

    fn finish(mut self, owner_id: Id<User>) -> DecodedCard {
        if let Some(failure) = self.failure.take() {
            return Err(failure);
        }

        let fn_name = PropertyKind::FormattedName.name();
        let formatted_name = self
            .formatted_name
            .take()
            .ok_or_else(|| self.malformed(fn_name, MalformedReason::MissingProperty))?;
        let name = split_formatted_name(&formatted_name)
            .map_err(|tokens| self.malformed(fn_name, MalformedReason::NameTooShort { tokens }))?;

        let personal_phone_number = self.required(Field::PersonalPhoneNumber)?;
        let personal_email = self.required(Field::PersonalEmail)?;

        let draft = ContactDraft {
            title: name.title,
            first_name: name.first_name,
            last_name: name.last_name,
            work_email: self.values.work_email.take(),
            personal_email,
            home_phone_number: self.values.home_phone_number.take(),
            personal_phone_number,
            work_phone_number: self.values.work_phone_number.take(),
        };
        Ok(ContactRecord::create(owner_id, draft))
    }

    fn required(&mut self, field: Field) -> Result<String, MalformedRecord> {
        debug_assert!(field.is_required());
        let value = self.values.slot(field).take();
        match value {
            Some(value) => Ok(value),
            None => Err(self.malformed(
                &mapping::mapping_for(field).describe(),
                MalformedReason::MissingProperty,
            )),
        }
    }
}
