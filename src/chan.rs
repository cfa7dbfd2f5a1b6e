//! Channel name recognition.

/// Prefixes that mark a target as a channel rather than a nickname.
pub const CHANNEL_PREFIXES: [char; 2] = ['#', '&'];

/// An extension trait for telling channel targets from nickname targets.
pub trait ChannelExt {
    /// Returns true if this target names a channel (starts with `#` or `&`).
    fn is_channel_name(&self) -> bool;
}

impl ChannelExt for str {
    fn is_channel_name(&self) -> bool {
        self.starts_with(CHANNEL_PREFIXES)
    }
}

impl ChannelExt for String {
    fn is_channel_name(&self) -> bool {
        self.as_str().is_channel_name()
    }
}
