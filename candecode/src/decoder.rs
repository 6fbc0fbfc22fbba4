use crate::error::DecodeError;
use crate::messages::{self, BrakeStatus, EngineLoad, EngineSpeed, TransmissionSwitches};
use crate::sample::{Sample, Value};

/// Name of the field carrying the untouched payload of `id`, e.g. `can201_total`
pub fn raw_field_name(id: u32) -> String {
    format!("can{:X}_total", id)
}

/// How a table entry turns payload bytes into named fields
#[derive(Debug, Clone, Copy)]
pub enum DecodeKind {
    /// Hand-written transform for an identifier with a known layout
    Fixed(fn(&[u8]) -> Result<Sample, DecodeError>),
    /// Layout unknown: only the raw payload is reported
    Passthrough,
}

/// One entry of the decoder table: identifier, field schema and decode function.
///
/// The schema pairs every field name with the typed value it holds before
/// the first frame arrives.
#[derive(Debug, Clone)]
pub struct Decoder {
    id: u32,
    fields: Vec<(String, Value)>,
    kind: DecodeKind,
}

impl Decoder {
    /// Decoder with a fixed transform. `fields` lists what the transform emits,
    /// in order; the raw payload field is appended automatically.
    pub fn fixed(id: u32, fields: &[(&str, Value)], decode: fn(&[u8]) -> Result<Sample, DecodeError>) -> Self {
        let mut schema: Vec<(String, Value)> = fields.iter().map(|(n, v)| (n.to_string(), v.clone())).collect();
        schema.push((raw_field_name(id), Value::Raw(Vec::new())));
        Self {
            id,
            fields: schema,
            kind: DecodeKind::Fixed(decode),
        }
    }

    pub fn passthrough(id: u32) -> Self {
        Self {
            id,
            fields: vec![(raw_field_name(id), Value::Raw(Vec::new()))],
            kind: DecodeKind::Passthrough,
        }
    }

    /// Decoder shipped with the crate for `id`. Identifiers without a known
    /// layout fall back to passthrough.
    pub fn builtin(id: u32) -> Self {
        match id {
            messages::can200::ID => Self::fixed(id, messages::can200::FIELDS, |data| {
                BrakeStatus::from_bytes(data).map(BrakeStatus::into_sample)
            }),
            messages::can201::ID => Self::fixed(id, messages::can201::FIELDS, |data| {
                EngineSpeed::from_bytes(data).map(EngineSpeed::into_sample)
            }),
            messages::can231::ID => Self::fixed(id, messages::can231::FIELDS, |data| {
                TransmissionSwitches::from_bytes(data).map(TransmissionSwitches::into_sample)
            }),
            messages::can240::ID => Self::fixed(id, messages::can240::FIELDS, |data| {
                EngineLoad::from_bytes(data).map(EngineLoad::into_sample)
            }),
            _ => Self::passthrough(id),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Every field this decoder can produce, in emission order, with its initial value
    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn kind(&self) -> DecodeKind {
        self.kind
    }

    /// Decode a payload. Pure: identical payloads give identical samples.
    pub fn decode(&self, data: &[u8]) -> Result<Sample, DecodeError> {
        let mut sample = match self.kind {
            DecodeKind::Fixed(decode) => decode(data)?,
            DecodeKind::Passthrough => Sample::new(self.id),
        };
        sample.push(raw_field_name(self.id), Value::Raw(data.to_vec()));
        Ok(sample)
    }
}
