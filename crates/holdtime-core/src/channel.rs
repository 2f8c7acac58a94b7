use serde::Serialize;

/// A logical lane tracked by the analyzer, identified by a single key bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct KeyChannel {
    pub mask: u32,
    pub label: &'static str,
}

impl KeyChannel {
    pub const fn new(mask: u32, label: &'static str) -> Self {
        Self { mask, label }
    }

    /// Whether this lane is held in the given key bitmask.
    pub fn is_held(self, keys: u32) -> bool {
        keys & self.mask != 0
    }
}

/// The four lanes of a 4K recording, in display order.
///
/// The bits are not contiguous: the frame bitmask reserves bits 2 and 4 for
/// inputs that are not lanes.
pub const MANIA_4K_CHANNELS: [KeyChannel; 4] = [
    KeyChannel::new(1 << 0, "Key 1"),
    KeyChannel::new(1 << 1, "Key 2"),
    KeyChannel::new(1 << 3, "Key 3"),
    KeyChannel::new(1 << 5, "Key 4"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_masks_are_single_distinct_bits() {
        for (i, a) in MANIA_4K_CHANNELS.iter().enumerate() {
            assert_eq!(a.mask.count_ones(), 1, "{} is not a single bit", a.label);
            for b in &MANIA_4K_CHANNELS[i + 1..] {
                assert_ne!(a.mask, b.mask);
            }
        }
    }

    #[test]
    fn test_channel_order() {
        let labels: Vec<_> = MANIA_4K_CHANNELS.iter().map(|c| c.label).collect();
        assert_eq!(labels, ["Key 1", "Key 2", "Key 3", "Key 4"]);
        let masks: Vec<_> = MANIA_4K_CHANNELS.iter().map(|c| c.mask).collect();
        assert_eq!(masks, [0b1, 0b10, 0b1000, 0b10_0000]);
    }

    #[test]
    fn test_is_held() {
        let key3 = MANIA_4K_CHANNELS[2];
        assert!(key3.is_held(0b1000));
        assert!(key3.is_held(0b1011));
        assert!(!key3.is_held(0b0100));
        assert!(!key3.is_held(0));
    }
}
