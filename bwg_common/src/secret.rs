use std::{
    fmt,
    fmt::{Debug, Display},
};

/// A wrapper that keeps signing keys and API secrets out of logs. `Debug` and `Display` both print `****`;
/// access to the inner value is always an explicit [`Secret::reveal`] call at the use site.
#[derive(Clone, Default)]
pub struct Secret<T>
where T: Clone + Default
{
    value: T,
}

impl<T: Clone + Default> Secret<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn reveal(&self) -> &T {
        &self.value
    }
}

impl Secret<String> {
    /// The raw key bytes, as HS256 signing and verification want them.
    pub fn reveal_bytes(&self) -> &[u8] {
        self.value.as_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl<T: Clone + Default> Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

impl<T: Clone + Default> Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}
