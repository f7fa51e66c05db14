//! Combination key codec.
//!
//! A key is `name:value` pairs joined by `,` in specification order, e.g.
//! `color:red,size:S`. The three reserved characters are percent-encoded inside
//! names and values (`%` → `%25`, `:` → `%3A`, `,` → `%2C`), so every pair
//! contains exactly one raw `:` and distinct combinations never share a key.
//! Text without reserved characters is emitted unchanged.

use crate::combination::Combination;

/// Key used when the product has no variants.
pub const DEFAULT_KEY: &str = "default";

/// String identity of a variant inside a warehouse's stock map.
pub type CombinationKey = String;

const PAIR_SEP: char = ',';
const NAME_SEP: char = ':';

/// Encode a combination. Order-sensitive: the same pairs in another order
/// produce a different key.
pub fn encode_key(combination: &Combination) -> CombinationKey {
    let mut key = String::new();
    for (i, (name, value)) in combination.pairs().iter().enumerate() {
        if i > 0 {
            key.push(PAIR_SEP);
        }
        escape_into(&mut key, name);
        key.push(NAME_SEP);
        escape_into(&mut key, value);
    }
    key
}

/// Inverse of [`encode_key`], for diagnostics.
///
/// Returns `None` for [`DEFAULT_KEY`], the empty string and anything
/// `encode_key` could not have produced.
pub fn decode_key(key: &str) -> Option<Combination> {
    if key.is_empty() || key == DEFAULT_KEY {
        return None;
    }

    let mut pairs = Vec::new();
    for part in key.split(PAIR_SEP) {
        let (name, value) = part.split_once(NAME_SEP)?;
        if value.contains(NAME_SEP) {
            return None;
        }
        pairs.push((unescape(name)?, unescape(value)?));
    }
    Some(Combination::from_pairs(pairs))
}

fn escape_into(out: &mut String, raw: &str) {
    for ch in raw.chars() {
        match ch {
            '%' => out.push_str("%25"),
            ':' => out.push_str("%3A"),
            ',' => out.push_str("%2C"),
            _ => out.push(ch),
        }
    }
}

fn unescape(encoded: &str) -> Option<String> {
    let mut out = String::with_capacity(encoded.len());
    let mut rest = encoded;
    while let Some(idx) = rest.find('%') {
        out.push_str(&rest[..idx]);
        let code = rest.get(idx + 1..idx + 3)?;
        out.push(match code {
            "25" => '%',
            "3A" => ':',
            "2C" => ',',
            _ => return None,
        });
        rest = &rest[idx + 3..];
    }
    out.push_str(rest);
    Some(out)
}
