//! File group handle
//!
//! `SinkId` is the position of a file group in its configuration. The
//! registry keeps one optional file sink per group in a `Vec`, and routing
//! results index straight into it.

/// Position of a file group in a compiled routing table
///
/// ```
/// use fuellog_routing::SinkId;
///
/// let sinks = ["fuel_master.log", "driver_communication.log"];
/// assert_eq!(sinks[SinkId::new(1).as_usize()], "driver_communication.log");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SinkId(u16);

impl SinkId {
    /// Highest addressable group position
    pub const MAX: u16 = u16::MAX;

    /// Handle for the group at `position`
    #[must_use]
    pub const fn new(position: u16) -> Self {
        Self(position)
    }

    /// Position for slice indexing
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}
