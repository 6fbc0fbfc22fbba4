/// Errors raised while decoding a frame payload
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// The payload is shorter than the highest byte the decoder reads.
    #[error("payload for 0x{id:03X} too short ({got} bytes, need {needed})")]
    Truncated { id: u32, needed: usize, got: usize },
}

/// Errors raised while building the decoder table
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    #[error("a decoder for 0x{0:03X} is already registered")]
    DuplicateIdentifier(u32),

    #[error("identifier 0x{0:X} does not fit in 29 bits")]
    InvalidIdentifier(u32),
}

pub(crate) fn ensure_len(id: u32, data: &[u8], needed: usize) -> Result<(), DecodeError> {
    if data.len() < needed {
        return Err(DecodeError::Truncated { id, needed, got: data.len() });
    }
    Ok(())
}
