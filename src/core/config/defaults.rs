pub const THRESHOLD: f64 = 0.8;
pub const WINDOW_SIZE: usize = 3;
pub const CONTEXT_CAPACITY: usize = 10;

pub const MAX_DEPTH: usize = 10;
pub const BFS_MAX_DEPTH: usize = 5;
/// Start nodes picked by degree when none are configured.
pub const AUTO_START_NODES: usize = 5;

/// Fragments at or below this many characters are not sentences.
pub const MIN_SENTENCE_CHARS: usize = 5;
pub const MAX_TRIPLETS: usize = 3;

pub const CONFIG_FILE_NAME: &str = "config.yml";
