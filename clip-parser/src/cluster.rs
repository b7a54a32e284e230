/// A short option cluster, or what's left of one, such as the `abc` in
/// `-abc`. A cluster always has at least one option in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cluster<'arg> {
    bytes: &'arg [u8],
    option: u8,
    rest: &'arg [u8],
}

impl<'arg> Cluster<'arg> {
    /// Returns `None` if `bytes` is empty.
    #[inline]
    #[must_use]
    pub fn new(bytes: &'arg [u8]) -> Option<Self> {
        let (&option, rest) = bytes.split_first()?;

        Some(Self {
            bytes,
            option,
            rest,
        })
    }

    /// The first option in the cluster
    #[inline]
    #[must_use]
    pub fn option(&self) -> u8 {
        self.option
    }

    /// Everything after the first option
    #[inline]
    #[must_use]
    pub fn rest(&self) -> &'arg [u8] {
        self.rest
    }

    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &'arg [u8] {
        self.bytes
    }
}
