pub mod api;
pub mod models;

/// Longest accepted visitor name, in characters.
pub const NAME_MAX_CHARS: usize = 40;

/// Longest accepted message, in characters.
pub const MESSAGE_MAX_CHARS: usize = 240;
