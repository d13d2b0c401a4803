use crate::{
    predicate::{Operands, Predicate},
    value::Value,
};
use sha2::{Digest, Sha256};

/// Stable digest of one predicate's structure.
pub(crate) fn fingerprint_predicate<E>(predicate: &Predicate<E>) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hash_predicate(&mut hasher, predicate);

    hasher.finalize().into()
}

fn hash_predicate<E>(hasher: &mut Sha256, predicate: &Predicate<E>) {
    write_tag(hasher, 0x50);
    write_str(hasher, &predicate.attribute().qualified_name());
    write_tag(hasher, predicate.kind().tag());

    match predicate.operands() {
        Operands::None => write_tag(hasher, 0x60),
        Operands::One(value) => {
            write_tag(hasher, 0x61);
            write_value(hasher, value);
        }
        Operands::Two(first, second) => {
            write_tag(hasher, 0x62);
            write_value(hasher, first);
            write_value(hasher, second);
        }
    }

    write_tag(hasher, predicate.inclusion().tag());
}

///
/// Encode one value with a kind tag into the hash stream.
///

fn write_value(hasher: &mut Sha256, value: &Value) {
    match value {
        Value::Bool(v) => {
            write_tag(hasher, 0x01);
            write_tag(hasher, u8::from(*v));
        }
        Value::Char(v) => {
            write_tag(hasher, 0x02);
            write_u32(hasher, u32::from(*v));
        }
        Value::Float(v) => {
            write_tag(hasher, 0x03);
            hasher.update(v.to_bits().to_be_bytes());
        }
        Value::Int(v) => {
            write_tag(hasher, 0x04);
            hasher.update(v.to_be_bytes());
        }
        Value::List(items) => {
            write_tag(hasher, 0x05);
            write_len_u32(hasher, items.len());
            for item in items {
                write_value(hasher, item);
            }
        }
        Value::Null => write_tag(hasher, 0x06),
        Value::Text(v) => {
            write_tag(hasher, 0x07);
            write_str(hasher, v);
        }
        Value::Uint(v) => {
            write_tag(hasher, 0x08);
            hasher.update(v.to_be_bytes());
        }
    }
}

///
/// Encode one string with length prefix into the hash stream.
///

fn write_str(hasher: &mut Sha256, value: &str) {
    write_len_u32(hasher, value.len());
    hasher.update(value.as_bytes());
}

/// Encode a platform-sized length as u32 with deterministic saturation.
fn write_len_u32(hasher: &mut Sha256, len: usize) {
    let len = u32::try_from(len).unwrap_or(u32::MAX);
    write_u32(hasher, len);
}

fn write_u32(hasher: &mut Sha256, value: u32) {
    hasher.update(value.to_be_bytes());
}

fn write_tag(hasher: &mut Sha256, tag: u8) {
    hasher.update([tag]);
}
