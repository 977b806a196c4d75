//! Closed set of emotion identifiers.
//!
//! The discriminant order is significant: duration and weight tables in
//! [`crate::config`] are indexed by it.

/// Number of emotion identifiers, including `Normal` and `BootIntro`.
pub const EMOTION_COUNT: usize = 20;

/// Every animation the face can play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum EmotionId {
    /// Idle look: wandering, blinking eyes over a drifting tint.
    #[default]
    Normal = 0,
    Sad,
    Confuse,
    Love,
    Cyclop,
    Shock,
    Drunk,
    Furious,
    Angry,
    Doubt,
    Angry2,
    Smile,
    BanhChung,
    Deadpool,
    FortuneTeller,
    CarveSession,
    Sleepy,
    Cry,
    Fireworks,
    /// Boot sequence. Played once from `CycleState::Booting`, never selected.
    BootIntro,
}

impl EmotionId {
    /// All identifiers in table order.
    pub const ALL: [Self; EMOTION_COUNT] = [
        Self::Normal,
        Self::Sad,
        Self::Confuse,
        Self::Love,
        Self::Cyclop,
        Self::Shock,
        Self::Drunk,
        Self::Furious,
        Self::Angry,
        Self::Doubt,
        Self::Angry2,
        Self::Smile,
        Self::BanhChung,
        Self::Deadpool,
        Self::FortuneTeller,
        Self::CarveSession,
        Self::Sleepy,
        Self::Cry,
        Self::Fireworks,
        Self::BootIntro,
    ];

    /// Table index of this identifier.
    #[inline]
    pub const fn index(self) -> usize { self as usize }

    /// Look up an identifier by table index.
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < EMOTION_COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Lower-case snake name, used by configuration files and logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Sad => "sad",
            Self::Confuse => "confuse",
            Self::Love => "love",
            Self::Cyclop => "cyclop",
            Self::Shock => "shock",
            Self::Drunk => "drunk",
            Self::Furious => "furious",
            Self::Angry => "angry",
            Self::Doubt => "doubt",
            Self::Angry2 => "angry2",
            Self::Smile => "smile",
            Self::BanhChung => "banh_chung",
            Self::Deadpool => "deadpool",
            Self::FortuneTeller => "fortune_teller",
            Self::CarveSession => "carve_session",
            Self::Sleepy => "sleepy",
            Self::Cry => "cry",
            Self::Fireworks => "fireworks",
            Self::BootIntro => "boot_intro",
        }
    }

    /// Parse a name produced by [`EmotionId::name`].
    pub fn from_name(name: &str) -> Option<Self> { Self::ALL.iter().copied().find(|id| id.name() == name) }

    /// Whether the weighted selector may pick this identifier.
    #[inline]
    pub const fn is_selectable(self) -> bool { !matches!(self, Self::Normal | Self::BootIntro) }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for (i, id) in EmotionId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i, "{} should sit at index {i}", id.name());
            assert_eq!(EmotionId::from_index(i), Some(*id));
        }
        assert_eq!(EmotionId::from_index(EMOTION_COUNT), None);
    }

    #[test]
    fn test_name_lookup() {
        assert_eq!(EmotionId::from_name("banh_chung"), Some(EmotionId::BanhChung));
        assert_eq!(EmotionId::from_name("fireworks"), Some(EmotionId::Fireworks));
        assert_eq!(EmotionId::from_name("FIREWORKS"), None);
        assert_eq!(EmotionId::from_name(""), None);
    }

    #[test]
    fn test_selectable_excludes_idle_and_boot() {
        assert!(!EmotionId::Normal.is_selectable());
        assert!(!EmotionId::BootIntro.is_selectable());
        assert!(EmotionId::Sad.is_selectable());
        assert_eq!(EmotionId::ALL.iter().filter(|id| id.is_selectable()).count(), 18);
    }
}
