use std::collections::BTreeMap;

use crate::decoder::Decoder;
use crate::error::RegistryError;
use crate::messages::PASSTHROUGH_IDS;
use crate::sample::Value;

pub const STANDARD_ID_MASK: u32 = 0x7FF;
pub const EXTENDED_ID_MASK: u32 = 0x1FFF_FFFF;

/// An acceptance filter for the bus transport: a frame passes when
/// `frame_id & mask == id & mask`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdFilter {
    pub id: u32,
    pub mask: u32,
    pub extended: bool,
}

impl IdFilter {
    pub fn matches(&self, frame_id: u32) -> bool {
        frame_id & self.mask == self.id & self.mask
    }
}

/// Table of decoders keyed by identifier.
///
/// Filled once at startup and read-only afterwards. The identifier set also
/// drives the transport filters so unrelated traffic never reaches decode.
#[derive(Debug, Clone, Default)]
pub struct DecoderRegistry {
    decoders: BTreeMap<u32, Decoder>,
}

impl DecoderRegistry {
    pub fn new() -> Self {
        Self { decoders: BTreeMap::new() }
    }

    /// All identifiers this crate knows about: the four decoded messages plus
    /// the passthrough set
    pub fn with_default_decoders() -> Self {
        let mut decoders = BTreeMap::new();
        for id in [0x200, 0x201, 0x231, 0x240].iter().chain(PASSTHROUGH_IDS) {
            decoders.insert(*id, Decoder::builtin(*id));
        }
        Self { decoders }
    }

    /// Registry holding the built-in decoder for each of `ids`
    pub fn from_ids(ids: &[u32]) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for id in ids {
            registry.register(Decoder::builtin(*id))?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, decoder: Decoder) -> Result<(), RegistryError> {
        let id = decoder.id();
        if id > EXTENDED_ID_MASK {
            return Err(RegistryError::InvalidIdentifier(id));
        }
        if self.decoders.contains_key(&id) {
            return Err(RegistryError::DuplicateIdentifier(id));
        }
        self.decoders.insert(id, decoder);
        Ok(())
    }

    pub fn lookup(&self, id: u32) -> Option<&Decoder> {
        self.decoders.get(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.decoders.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    /// Union of every decoder's fields with their initial values, in identifier order.
    /// The first decoder to declare a name sets its initial value.
    pub fn initial_fields(&self) -> Vec<(String, Value)> {
        let mut fields: Vec<(String, Value)> = Vec::new();
        for decoder in self.decoders.values() {
            for (name, value) in decoder.fields() {
                if !fields.iter().any(|(n, _)| n == name) {
                    fields.push((name.clone(), value.clone()));
                }
            }
        }
        fields
    }

    pub fn field_names(&self) -> Vec<String> {
        self.initial_fields().into_iter().map(|(n, _)| n).collect()
    }

    /// One exact-match filter per registered identifier
    pub fn filters(&self, extended: bool) -> Vec<IdFilter> {
        let mask = if extended { EXTENDED_ID_MASK } else { STANDARD_ID_MASK };
        self.ids()
            .map(|id| IdFilter { id, mask, extended })
            .collect()
    }

    /// Software equivalent of the transport filters
    pub fn accepts(&self, id: u32) -> bool {
        self.decoders.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_contents() {
        let registry = DecoderRegistry::with_default_decoders();
        let ids: Vec<u32> = registry.ids().collect();
        assert_eq!(ids, vec![0x200, 0x201, 0x211, 0x212, 0x215, 0x231, 0x240, 0x420, 0x430]);
    }

    #[test]
    fn test_lookup_unknown_is_none() {
        let registry = DecoderRegistry::with_default_decoders();
        assert!(registry.lookup(0x123).is_none());
        assert!(registry.lookup(0x201).is_some());
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = DecoderRegistry::new();
        registry.register(Decoder::builtin(0x201)).unwrap();
        assert_eq!(
            registry.register(Decoder::passthrough(0x201)),
            Err(RegistryError::DuplicateIdentifier(0x201))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_identifier_range() {
        let mut registry = DecoderRegistry::new();
        assert_eq!(
            registry.register(Decoder::passthrough(0x2000_0000)),
            Err(RegistryError::InvalidIdentifier(0x2000_0000))
        );
        assert!(registry.register(Decoder::passthrough(EXTENDED_ID_MASK)).is_ok());
    }

    #[test]
    fn test_from_ids() {
        let registry = DecoderRegistry::from_ids(&[0x201, 0x231]).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(DecoderRegistry::from_ids(&[0x201, 0x201]).is_err());
    }

    #[test]
    fn test_field_names_union() {
        let registry = DecoderRegistry::from_ids(&[0x231, 0x201]).unwrap();
        assert_eq!(
            registry.field_names(),
            vec![
                "rpm", "speed", "accpos", "can201_unknown1", "can201_total",
                "clutch", "gear_neutral", "can231_total",
            ]
        );
    }

    #[test]
    fn test_initial_fields_are_typed_zeros() {
        let registry = DecoderRegistry::from_ids(&[0x200, 0x420]).unwrap();
        assert_eq!(
            registry.initial_fields(),
            vec![
                ("brake".to_string(), Value::Bool(false)),
                ("can200_total".to_string(), Value::Raw(vec![])),
                ("can420_total".to_string(), Value::Raw(vec![])),
            ]
        );
    }

    #[test]
    fn test_filters() {
        let registry = DecoderRegistry::from_ids(&[0x201, 0x231]).unwrap();
        let filters = registry.filters(false);
        assert_eq!(
            filters,
            vec![
                IdFilter { id: 0x201, mask: 0x7FF, extended: false },
                IdFilter { id: 0x231, mask: 0x7FF, extended: false },
            ]
        );
        assert!(filters[0].matches(0x201));
        assert!(!filters[0].matches(0x202));

        let extended = registry.filters(true);
        assert!(extended.iter().all(|f| f.mask == EXTENDED_ID_MASK && f.extended));
    }
}
