//! Status effect kinds.
//!
//! One enum covers every status the engine knows. Kinds split by where they
//! land:
//!
//! - **Stacking** (combatant): `Bleed`, `Poison`, `Burn`, `Heal`
//! - **Timed exclusive** (combatant): `Shock`, `Sturdy`
//! - **Card-level**: `Freeze`, `Haste`, `Slow`, `Echo`, `PriceInflate`,
//!   `PriceExtort`, `Polymorph`

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Every status effect kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusEffectKind {
    /// Damage over time through shield, 1.5s ticks.
    Bleed,
    /// Damage over time ignoring shield, 3s ticks.
    Poison,
    /// Self-depleting damage over time through shield, 0.5s ticks.
    Burn,
    /// Heal over time, 2s ticks.
    Heal,
    /// Halts a card's cooldown.
    Freeze,
    /// Speeds up a card's cooldown.
    Haste,
    /// Slows down a card's cooldown.
    Slow,
    /// Bonus casts on a card's next trigger.
    Echo,
    /// Combatant takes more damage.
    Shock,
    /// Combatant takes less damage.
    Sturdy,
    /// Raises a card's price.
    PriceInflate,
    /// Lowers a card's price.
    PriceExtort,
    /// Temporarily replaces a card with another.
    Polymorph,
}

impl StatusEffectKind {
    /// Kinds that accumulate stacks on a combatant and tick periodically.
    pub const STACKING: [StatusEffectKind; 4] = [
        StatusEffectKind::Bleed,
        StatusEffectKind::Poison,
        StatusEffectKind::Burn,
        StatusEffectKind::Heal,
    ];

    /// Whether this kind is a combatant stack counter.
    #[must_use]
    pub fn is_stacking(self) -> bool {
        matches!(
            self,
            StatusEffectKind::Bleed
                | StatusEffectKind::Poison
                | StatusEffectKind::Burn
                | StatusEffectKind::Heal
        )
    }

    /// Whether this kind is a combatant damage-taken modifier.
    #[must_use]
    pub fn is_damage_modifier(self) -> bool {
        matches!(self, StatusEffectKind::Shock | StatusEffectKind::Sturdy)
    }

    /// Whether this kind applies to a card rather than a combatant.
    #[must_use]
    pub fn is_card_level(self) -> bool {
        !self.is_stacking() && !self.is_damage_modifier()
    }

    /// Whether this kind harms its recipient.
    #[must_use]
    pub fn is_debuff(self) -> bool {
        matches!(
            self,
            StatusEffectKind::Bleed
                | StatusEffectKind::Poison
                | StatusEffectKind::Burn
                | StatusEffectKind::Freeze
                | StatusEffectKind::Slow
                | StatusEffectKind::Shock
                | StatusEffectKind::PriceExtort
                | StatusEffectKind::Polymorph
        )
    }
}

impl FromStr for StatusEffectKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bleed" => Ok(StatusEffectKind::Bleed),
            "poison" => Ok(StatusEffectKind::Poison),
            "burn" => Ok(StatusEffectKind::Burn),
            "heal" | "regen" => Ok(StatusEffectKind::Heal),
            "freeze" => Ok(StatusEffectKind::Freeze),
            "haste" => Ok(StatusEffectKind::Haste),
            "slow" => Ok(StatusEffectKind::Slow),
            "echo" => Ok(StatusEffectKind::Echo),
            "shock" => Ok(StatusEffectKind::Shock),
            "sturdy" => Ok(StatusEffectKind::Sturdy),
            "inflate" | "price_inflate" => Ok(StatusEffectKind::PriceInflate),
            "extort" | "price_extort" => Ok(StatusEffectKind::PriceExtort),
            "polymorph" => Ok(StatusEffectKind::Polymorph),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for StatusEffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StatusEffectKind::Bleed => "bleed",
            StatusEffectKind::Poison => "poison",
            StatusEffectKind::Burn => "burn",
            StatusEffectKind::Heal => "heal",
            StatusEffectKind::Freeze => "freeze",
            StatusEffectKind::Haste => "haste",
            StatusEffectKind::Slow => "slow",
            StatusEffectKind::Echo => "echo",
            StatusEffectKind::Shock => "shock",
            StatusEffectKind::Sturdy => "sturdy",
            StatusEffectKind::PriceInflate => "price_inflate",
            StatusEffectKind::PriceExtort => "price_extort",
            StatusEffectKind::Polymorph => "polymorph",
        };
        write!(f, "{}", s)
    }
}
