//! vCard export and import of contact records.

pub mod mapping;
pub mod line;
pub mod encode;
pub mod decode;

pub use decode::{
    decode, decode_cards, split_formatted_name, DecodeOptions, DecodedCard, MalformedReason,
    MalformedRecord, NameParts, UnmappedTagPolicy,
};
pub use encode::{encode, formatted_name};

/// Media type of exported documents.
pub const MEDIA_TYPE: &str = "text/vcard";

/// Attachment name of exported documents.
pub const EXPORT_FILENAME: &str = "contacts.vcf";
