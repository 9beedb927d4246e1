// Tue Aug 04 2026 - Alex

use bitflags::bitflags;
use std::fmt;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ChunkFlags: u8 {
        const BUSY = 0x01;
        const EXTRA = 0x02;
        const FILL = 0x04;
        const LAST = 0x10;
        const FLAG1 = 0x20;
        const FLAG2 = 0x40;
        const FLAG3 = 0x80;
    }
}

// Render order is ascending bit value; the aggregate group comes last, the
// same way the allocator's own debug output lists it.
const RENDER_TABLE: &[(u8, &str)] = &[
    (0x01, "BUSY"),
    (0x02, "EXTRA"),
    (0x04, "FILL"),
    (0x10, "LAST"),
    (0x20, "FLAG1"),
    (0x40, "FLAG2"),
    (0x80, "FLAG3"),
    (0xe0, "FLAGS"),
];

impl ChunkFlags {
    pub fn from_raw(raw: u8) -> Self {
        // 0x08 and any future bits outside the table are dropped silently.
        Self::from_bits_truncate(raw)
    }

    pub fn is_busy(&self) -> bool {
        self.contains(ChunkFlags::BUSY)
    }

    pub fn render(&self) -> String {
        let bits = self.bits();
        let names: Vec<&str> = RENDER_TABLE
            .iter()
            .filter(|(bit, _)| bits & bit != 0)
            .map(|&(_, name)| name)
            .collect();
        format!("[{}]", names.join(" "))
    }
}

impl fmt::Display for ChunkFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
