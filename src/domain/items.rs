// Item kinds and their reward table.

/// Collectible item kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Coin,
    Star,
    Health,
}

/// What collecting one item of a kind grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemRewards {
    /// Score delta.
    pub value: u32,
    pub xp: u32,
    pub heal: i32,
    /// Relative chance of this kind in a spawn draw.
    pub spawn_weight: u32,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Coin, ItemKind::Star, ItemKind::Health];

    pub const fn rewards(self) -> ItemRewards {
        match self {
            ItemKind::Coin => ItemRewards {
                value: 10,
                xp: 10,
                heal: 0,
                spawn_weight: 70,
            },
            ItemKind::Star => ItemRewards {
                value: 50,
                xp: 50,
                heal: 0,
                spawn_weight: 20,
            },
            ItemKind::Health => ItemRewards {
                value: 0,
                xp: 20,
                heal: 30,
                spawn_weight: 10,
            },
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ItemKind::Coin => "coin",
            ItemKind::Star => "star",
            ItemKind::Health => "health",
        }
    }

    /// Maps a roll in `[0, total_weight)` onto a kind.
    pub fn from_roll(roll: u32) -> ItemKind {
        let mut acc = 0;
        for kind in Self::ALL {
            acc += kind.rewards().spawn_weight;
            if roll < acc {
                return kind;
            }
        }
        ItemKind::Coin
    }

    pub fn total_weight() -> u32 {
        Self::ALL.iter().map(|k| k.rewards().spawn_weight).sum()
    }
}
