use model::{ModelKind, Predictor, TRANSFORM_VERSION};
use serde::{Deserialize, Serialize};

use crate::error::{ArtifactErr, Result};

const MAGIC: [u8; 4] = *b"TDSM";
const FORMAT_VERSION: u32 = 1;

type HeaderLen = u32;
const HEADER_LEN_SIZE: usize = size_of::<HeaderLen>();

/// JSON metadata preceding the weight block. The transform version rides
/// along with the weights so a predictor can never be scored against a
/// feature layout it was not trained on.
#[derive(Debug, Serialize, Deserialize)]
struct Header {
    format_version: u32,
    transform_version: u32,
    kind: String,
    feature_len: usize,
    intercept: f32,
}

fn kind_label(kind: ModelKind) -> &'static str {
    match kind {
        ModelKind::Logistic => "logistic",
        ModelKind::Margin => "margin",
    }
}

fn parse_kind(label: &str) -> Option<ModelKind> {
    match label {
        "logistic" => Some(ModelKind::Logistic),
        "margin" => Some(ModelKind::Margin),
        _ => None,
    }
}

/// Serializes a predictor into the artifact wire format: magic, big-endian
/// header length, JSON header, then the raw weight block.
///
/// # Arguments
/// * `model` - The predictor to serialize.
///
/// # Returns
/// The encoded artifact bytes.
pub fn encode(model: &Predictor) -> Vec<u8> {
    let header = Header {
        format_version: FORMAT_VERSION,
        transform_version: TRANSFORM_VERSION,
        kind: kind_label(model.kind()).to_string(),
        feature_len: model.feature_len(),
        intercept: model.intercept(),
    };

    // SAFETY: Serialize impl for `Header` is derived and not implemented
    //         by hand. Nor has a non string-key map inside.
    let header_json = serde_json::to_vec(&header).unwrap();

    let weight_bytes: &[u8] = bytemuck::cast_slice(model.weights());
    let mut buf =
        Vec::with_capacity(MAGIC.len() + HEADER_LEN_SIZE + header_json.len() + weight_bytes.len());

    buf.extend_from_slice(&MAGIC);
    buf.extend_from_slice(&(header_json.len() as HeaderLen).to_be_bytes());
    buf.extend_from_slice(&header_json);
    buf.extend_from_slice(weight_bytes);
    buf
}

/// Deserializes an artifact, validating magic, format version, transform
/// version and weight block length before constructing the predictor.
///
/// # Arguments
/// * `buf` - The raw artifact bytes, from disk or a fresh fetch.
///
/// # Returns
/// A fully constructed `Predictor`, or the first corruption found.
pub fn decode(buf: &[u8]) -> Result<Predictor> {
    let prelude = MAGIC.len() + HEADER_LEN_SIZE;
    if buf.len() < prelude {
        return Err(ArtifactErr::Truncated { got: buf.len() });
    }
    if buf[..MAGIC.len()] != MAGIC {
        return Err(ArtifactErr::BadMagic);
    }

    // SAFETY: We sliced exactly `HEADER_LEN_SIZE` bytes just above.
    let header_len =
        HeaderLen::from_be_bytes(buf[MAGIC.len()..prelude].try_into().unwrap()) as usize;

    let body = &buf[prelude..];
    if body.len() < header_len {
        return Err(ArtifactErr::Truncated { got: buf.len() });
    }

    let header: Header =
        serde_json::from_slice(&body[..header_len]).map_err(ArtifactErr::BadHeader)?;

    if header.format_version != FORMAT_VERSION {
        return Err(ArtifactErr::UnsupportedFormat {
            got: header.format_version,
            expected: FORMAT_VERSION,
        });
    }
    if header.transform_version != TRANSFORM_VERSION {
        return Err(ArtifactErr::TransformVersionMismatch {
            got: header.transform_version,
            expected: TRANSFORM_VERSION,
        });
    }

    let kind = parse_kind(&header.kind).ok_or_else(|| ArtifactErr::UnknownKind {
        got: header.kind.clone(),
    })?;

    let weight_bytes = &body[header_len..];
    let expected = header.feature_len * size_of::<f32>();
    if weight_bytes.len() != expected {
        return Err(ArtifactErr::WeightBlockMismatch {
            got: weight_bytes.len(),
            expected,
        });
    }

    // Copies into a fresh allocation, so the source slice may be unaligned.
    let weights: Vec<f32> = bytemuck::pod_collect_to_vec(weight_bytes);

    Ok(Predictor::new(kind, weights, header.intercept))
}
