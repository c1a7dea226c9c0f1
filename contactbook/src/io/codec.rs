//! Serializers for the backing file.
//!
//! Both formats sit behind [`ContactCodec`]. They differ in what survives a
//! round-trip:
//!
//! - [`JsonCodec`] keeps every key/value pair of every record.
//! - [`TabularCodec`] keeps only `name`, `phone` and `email`; anything else is
//!   dropped on write. Values are joined with `,` unescaped, so a value that
//!   contains a comma produces a row that fails to load.

use std::collections::BTreeMap;

use anyhow::{Context, Result, anyhow, bail};
use clap::ValueEnum;
use jsonschema::Draft;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

use crate::contact::Contact;

const CONTACTS_SCHEMA: &str = include_str!("../../schemas/contacts/v1.schema.json");
const TABULAR_HEADER: [&str; 3] = ["name", "phone", "email"];
const DELIMITER: char = ',';

/// Converts a whole contact list to and from file contents.
pub trait ContactCodec {
    /// Short format name used in logs and errors.
    fn name(&self) -> &'static str;
    /// Whether fields beyond `name`, `phone` and `email` survive `serialize`.
    fn preserves_extra_fields(&self) -> bool;
    fn serialize(&self, contacts: &[Contact]) -> Result<String>;
    fn deserialize(&self, contents: &str) -> Result<Vec<Contact>>;
}

/// Backing file format selected by configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    /// Structured records (JSON array of objects).
    #[default]
    Json,
    /// Flat three-column table (CSV).
    Csv,
}

impl FileFormat {
    pub fn codec(self) -> &'static dyn ContactCodec {
        match self {
            FileFormat::Json => &JsonCodec,
            FileFormat::Csv => &TabularCodec,
        }
    }
}

/// Pretty-printed JSON array, 4-space indent, validated against the embedded
/// schema on read.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl ContactCodec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn preserves_extra_fields(&self) -> bool {
        true
    }

    fn serialize(&self, contacts: &[Contact]) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        contacts
            .serialize(&mut ser)
            .context("serialize contacts json")?;
        let mut payload = String::from_utf8(buf).context("contacts json is not utf-8")?;
        payload.push('\n');
        Ok(payload)
    }

    fn deserialize(&self, contents: &str) -> Result<Vec<Contact>> {
        let value: Value = serde_json::from_str(contents).context("parse contacts json")?;
        validate_schema(&value)?;
        serde_json::from_value(value).context("deserialize contacts")
    }
}

/// Validate a parsed contact list against the v1 schema (Draft 2020-12).
fn validate_schema(instance: &Value) -> Result<()> {
    let schema: Value = serde_json::from_str(CONTACTS_SCHEMA).context("parse contacts schema")?;
    let compiled = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .map_err(|err| anyhow!("invalid contacts schema: {}", err))?;
    let messages: Vec<String> = compiled
        .iter_errors(instance)
        .map(|err| err.to_string())
        .collect();
    if !messages.is_empty() {
        bail!("contacts schema validation failed:\n- {}", messages.join("\n- "));
    }
    Ok(())
}

/// `name,phone,email` header followed by one unquoted row per contact.
#[derive(Debug, Clone, Copy, Default)]
pub struct TabularCodec;

impl ContactCodec for TabularCodec {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn preserves_extra_fields(&self) -> bool {
        false
    }

    fn serialize(&self, contacts: &[Contact]) -> Result<String> {
        let mut out = TABULAR_HEADER.join(",");
        out.push('\n');
        for contact in contacts {
            let row = [
                contact.name.as_str(),
                contact.phone.as_str(),
                contact.email.as_str(),
            ];
            out.push_str(&row.join(","));
            out.push('\n');
        }
        Ok(out)
    }

    fn deserialize(&self, contents: &str) -> Result<Vec<Contact>> {
        let mut lines = contents
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .enumerate();

        let Some((_, header)) = lines.next() else {
            return Ok(Vec::new());
        };
        let columns: Vec<&str> = header.split(DELIMITER).collect();
        for required in TABULAR_HEADER {
            if !columns.contains(&required) {
                bail!("csv header missing column `{}`: {}", required, header);
            }
        }

        let mut contacts = Vec::new();
        for (index, line) in lines {
            if line.is_empty() {
                continue;
            }
            let values: Vec<&str> = line.split(DELIMITER).collect();
            if values.len() != columns.len() {
                bail!(
                    "csv line {}: expected {} fields, found {}",
                    index + 1,
                    columns.len(),
                    values.len()
                );
            }
            contacts.push(row_to_contact(&columns, &values));
        }
        Ok(contacts)
    }
}

fn row_to_contact(columns: &[&str], values: &[&str]) -> Contact {
    let mut fields: BTreeMap<String, String> = columns
        .iter()
        .zip(values)
        .map(|(column, value)| ((*column).to_string(), (*value).to_string()))
        .collect();
    let mut take = |key: &str| fields.remove(key).unwrap_or_default();
    let name = take("name");
    let phone = take("phone");
    let email = take("email");
    Contact {
        name,
        phone,
        email,
        extra: fields,
    }
}
