use bitflags::bitflags;

bitflags! {
    /// Summarizes which kinds of entries an inventory diff contains.
    ///
    /// Subscribers that only care about, say, removals can test a whole diff
    /// with a single mask check instead of scanning every entry.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct DiffKinds: u8 {
        const ADDED    = 1 << 0;
        const MODIFIED = 1 << 1;
        const REMOVED  = 1 << 2;
    }
}
