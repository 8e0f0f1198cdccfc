//! Seed resolution.
//!
//! A seed turns a rule name into the class identifier used both in selectors
//! and by the class picker. Every seed function must be deterministic: equal
//! inputs always give equal identifiers.

use std::fmt;
use std::sync::Arc;

/// Signature of a seed transform.
pub type SeedFunction = dyn Fn(&str) -> String + Send + Sync;

/// How rule names are transformed.
#[derive(Clone, Default)]
pub enum SeedSpec {
    /// Names are used as written.
    #[default]
    Identity,
    /// Names are prefixed with the seed and base64-encoded.
    Prefix(String),
    /// A caller-supplied pure function.
    Custom(Arc<SeedFunction>),
}

impl SeedSpec {
    pub fn custom(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        SeedSpec::Custom(Arc::new(f))
    }
}

impl fmt::Debug for SeedSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedSpec::Identity => f.write_str("Identity"),
            SeedSpec::Prefix(seed) => f.debug_tuple("Prefix").field(seed).finish(),
            SeedSpec::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<&str> for SeedSpec {
    fn from(seed: &str) -> Self {
        SeedSpec::Prefix(seed.to_string())
    }
}

impl From<String> for SeedSpec {
    fn from(seed: String) -> Self {
        SeedSpec::Prefix(seed)
    }
}

impl From<Option<String>> for SeedSpec {
    fn from(seed: Option<String>) -> Self {
        seed.map_or(SeedSpec::Identity, SeedSpec::Prefix)
    }
}

/// A resolved seed, cheap to clone and safe to share across threads.
#[derive(Clone)]
pub struct SeedFn(Arc<SeedFunction>);

impl SeedFn {
    pub fn identity() -> Self {
        SeedFn(Arc::new(|id: &str| id.to_string()))
    }

    pub fn apply(&self, id: &str) -> String {
        (self.0)(id)
    }
}

impl Default for SeedFn {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for SeedFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SeedFn(..)")
    }
}

/// Resolve a seed specification into a name transform.
pub fn resolve_seed(spec: SeedSpec) -> SeedFn {
    match spec {
        SeedSpec::Identity => SeedFn::identity(),
        SeedSpec::Prefix(seed) => {
            SeedFn(Arc::new(move |id: &str| encode_base64(format!("{seed}{id}").as_bytes())))
        }
        SeedSpec::Custom(f) => SeedFn(f),
    }
}

/// Standard base64 with `=` padding.
pub fn encode_base64(input: &[u8]) -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

    let mut output = String::with_capacity(input.len().div_ceil(3) * 4);

    for chunk in input.chunks(3) {
        let b0 = chunk[0];
        let b1 = chunk.get(1).copied().unwrap_or(0);
        let b2 = chunk.get(2).copied().unwrap_or(0);

        let n = (u32::from(b0) << 16) | (u32::from(b1) << 8) | u32::from(b2);

        output.push(ALPHABET[(n >> 18) as usize & 0x3F] as char);
        output.push(ALPHABET[(n >> 12) as usize & 0x3F] as char);
        output.push(if chunk.len() > 1 {
            ALPHABET[(n >> 6) as usize & 0x3F] as char
        } else {
            '='
        });
        output.push(if chunk.len() > 2 {
            ALPHABET[n as usize & 0x3F] as char
        } else {
            '='
        });
    }

    output
}
