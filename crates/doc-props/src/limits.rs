//! Size limits for block property bags.
//!
//! These limits keep a single block's property bag bounded when it is
//! hydrated from, or written back to, an untrusted document snapshot.

/// Maximum length in bytes of a property's display name.
pub const MAX_PROP_NAME_LEN: usize = 256;

/// Maximum length in bytes of a string-encoded property value (1 MB).
pub const MAX_PROP_VALUE_LEN: usize = 1024 * 1024;

/// Maximum number of custom properties on one block.
pub const MAX_PROPS_PER_BLOCK: usize = 1_000;

/// Separator between the display name and the type tag in a property key.
pub const KEY_SEPARATOR: char = ':';

/// Upper bound on suffix probing when a default name is already taken.
pub const MAX_DEFAULT_NAME_PROBES: usize = MAX_PROPS_PER_BLOCK + 1;
