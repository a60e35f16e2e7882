// Packet descriptor carried by the TX/RX rings

// no pointers in PacketDescriptor; the payload is referenced by handle only

/// The hardware should report delivery of this frame.
pub const TX_FLAG_ACK_REQUIRED: u16 = 0x0001;

/// Metadata describing one packet buffer.
///
/// The ring copies descriptors by value and never touches the memory that
/// `data` / `paddr` refer to. That memory belongs to whoever allocated it.
/// ABI-stable: `#[repr(C)]`, 24 bytes, no interior padding.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PacketDescriptor {
    /// Opaque handle (usually a virtual address) of the payload buffer.
    pub data: u64,
    /// Physical address used for DMA.
    pub paddr: u32,
    pub len: u16,
    pub flags: u16,
    pub timestamp: u64,
}

impl PacketDescriptor {
    pub fn new(paddr: u32, len: u16, flags: u16) -> Self {
        Self {
            paddr,
            len,
            flags,
            ..Self::default()
        }
    }

    #[inline]
    pub fn has_flag(&self, flag: u16) -> bool {
        self.flags & flag == flag
    }
}
