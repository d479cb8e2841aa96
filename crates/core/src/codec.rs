//! Codificação da lista no slot: JSON, um array de objetos
//! `{ id, name, image, price, rating?, discount?, viewedAt }`.

use bytes::Bytes;

use recents_common::CodecError;

use crate::ProductView;

/// Decodifica o conteúdo do slot. Payload vazio equivale a lista vazia.
pub fn decode(data: &[u8]) -> Result<Vec<ProductView>, CodecError> {
    if data.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    serde_json::from_slice(data).map_err(|e| CodecError::Malformed(e.to_string()))
}

/// Codifica a lista. Preço não finito vira `null` em JSON e tornaria o slot
/// ilegível, então é recusado antes de qualquer escrita.
pub fn encode(items: &[ProductView]) -> Result<Bytes, CodecError> {
    if let Some(item) = items.iter().find(|item| !item.price.is_finite()) {
        return Err(CodecError::Encode(format!(
            "preço não finito ({}) no produto {}",
            item.price, item.id
        )));
    }
    serde_json::to_vec(items)
        .map(Bytes::from)
        .map_err(|e| CodecError::Encode(e.to_string()))
}
