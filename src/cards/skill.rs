//! Card skills.
//!
//! A skill is what a card does when its cooldown runs out. The set is
//! closed: templates pick a variant and the battle coordinator resolves it,
//! because resolution needs both combatants, the card arena and the RNG.
//!
//! Amounts come from the triggering card, not from the variant: `Strike`
//! uses the card's current damage, `Afflict(Bleed)` uses the template's
//! bleed amount, and so on. Variants only carry what a template cannot
//! express as a stat.

use serde::{Deserialize, Serialize};

use crate::effects::StatusEffectKind;

/// Closed set of skill behaviors.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Skill {
    /// Does nothing. Passive aura holders and placeholder cards.
    #[default]
    Idle,

    /// Damage the opposing combatant (crit-capable).
    Strike,

    /// Shield the owning combatant (crit-capable).
    Guard,

    /// Heal the owning combatant (crit-capable).
    Mend,

    /// Strike, then permanently gain `growth` damage for this battle.
    Rampage { growth: f32 },

    /// Hurt the owner for `self_damage`, then shield it. The shield is the
    /// card's current shield, or `enraged_shield` while the owner is enraged.
    BloodOath { self_damage: f32, enraged_shield: f32 },

    /// Apply a combatant-level status to the opposing combatant.
    Afflict(StatusEffectKind),

    /// Apply a combatant-level status to the owning combatant.
    Bolster(StatusEffectKind),

    /// Apply a card-level status to `count` random opposing cards.
    Hex { kind: StatusEffectKind, count: usize },

    /// Apply a card-level status to `count` random allied cards.
    Inspire { kind: StatusEffectKind, count: usize },

    /// Spawn the template's summon payload into the owner's roster.
    Summon,

    /// Shuffle the opposing roster.
    Scramble,

    /// Swap `swaps` random pairs of opposing slots.
    Disrupt { swaps: usize },

    /// Run several skills in order.
    Sequence(Vec<Skill>),
}

impl Skill {
    /// Check if the skill has no effect.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        match self {
            Skill::Idle => true,
            Skill::Sequence(steps) => steps.iter().all(Skill::is_idle),
            _ => false,
        }
    }
}
