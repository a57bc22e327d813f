/// Type tag for arrays.
pub const TAG_ARRAY: char = 'a';
/// Type tag for strings.
pub const TAG_STRING: char = 's';
/// Type tag for integers.
pub const TAG_INT: char = 'i';

pub const FIELD_SEP: char = ':';
pub const QUOTE: char = '"';
pub const TERMINATOR: char = ';';
pub const OPEN_BRACE: char = '{';
pub const CLOSE_BRACE: char = '}';

/// How far past a string's declared extent the builder scans for the
/// real `";` terminator before falling back to a backward search.
pub const RESYNC_WINDOW: usize = 10;

/// Content substituted for a leaf whose extent could not be reconciled
/// with its declared length.
pub const ANOMALY_TEXT: &str = "ERROR PARSING";
