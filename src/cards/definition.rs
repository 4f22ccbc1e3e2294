//! Card templates - static card data.
//!
//! `CardTemplate` holds the immutable properties of a card type. For
//! example, a barbarian warrior strikes for 20 every 7 seconds - these are
//! part of the template.
//!
//! Runtime state (current cooldown, freeze, echo, growth, transformation)
//! lives in `Card`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::skill::Skill;
use crate::core::Side;
use crate::effects::StatusEffectKind;

/// Card rarity tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    #[default]
    Bronze,
    Silver,
    Gold,
}

/// How many times a card can trigger before it breaks.
///
/// `Finite(0)` is not a valid template durability. `with_durability` and
/// `CardRegistry::register` reject it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Durability {
    Finite(u32),
    #[default]
    Infinite,
}

impl Durability {
    /// Use up one trigger. Returns true when the card is now exhausted.
    pub fn consume(&mut self) -> bool {
        match self {
            Durability::Finite(left) => {
                *left = left.saturating_sub(1);
                *left == 0
            }
            Durability::Infinite => false,
        }
    }

    /// Remaining triggers, `None` if unlimited.
    #[must_use]
    pub fn remaining(self) -> Option<u32> {
        match self {
            Durability::Finite(left) => Some(left),
            Durability::Infinite => None,
        }
    }
}

/// A numeric card stat that auras and growth can modify.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardStat {
    Damage,
    Shield,
    Heal,
    CritChance,
}

/// Passive buff a card grants to its immediate neighbors.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aura {
    pub stat: CardStat,
    pub amount: f32,
}

/// Summon payload: what to spawn and how many.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummonPayload {
    pub identifier: String,
    pub count: usize,
}

/// Static card template.
///
/// ## Example
///
/// ```
/// use rust_autobattle::cards::{CardTemplate, Skill};
/// use rust_autobattle::effects::StatusEffectKind;
///
/// let bloodletter = CardTemplate::new("bloodletter", 8.0)
///     .with_skill(Skill::Afflict(StatusEffectKind::Bleed))
///     .with_status(StatusEffectKind::Bleed, 3.0);
///
/// assert_eq!(bloodletter.status_amount(StatusEffectKind::Bleed), 3.0);
/// assert_eq!(bloodletter.name_key, "card_bloodletter_name");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardTemplate {
    /// Lookup identifier (e.g. `"goblin"`).
    pub identifier: String,

    pub name_key: String,
    pub description_key: Option<String>,
    pub flavor_key: Option<String>,
    pub rarity: Rarity,
    pub tags: Vec<String>,

    /// Side that may own this card. `None` means either.
    pub faction: Option<Side>,

    /// Seconds between triggers.
    pub cooldown: f32,

    pub damage: f32,
    pub shield: f32,
    pub heal: f32,
    pub crit_chance: f32,

    pub skill: Skill,
    /// Runs once when the card is destroyed.
    pub deathrattle: Option<Skill>,

    pub durability: Durability,
    pub price: u32,

    pub immunities: SmallVec<[StatusEffectKind; 2]>,
    pub auras: SmallVec<[Aura; 1]>,

    /// Status amounts this card's skill applies (stacks or seconds).
    pub statuses: SmallVec<[(StatusEffectKind, f32); 2]>,

    /// Substitute identifier for polymorph skills.
    pub polymorph_into: Option<String>,

    pub summon: Option<SummonPayload>,

    /// Ready neighbors triggered alongside this card.
    pub chain_triggers: u32,
}

impl CardTemplate {
    /// Create a template with a cooldown and no behavior.
    #[must_use]
    pub fn new(identifier: impl Into<String>, cooldown: f32) -> Self {
        let identifier = identifier.into();
        Self {
            name_key: format!("card_{identifier}_name"),
            identifier,
            description_key: None,
            flavor_key: None,
            rarity: Rarity::default(),
            tags: Vec::new(),
            faction: None,
            cooldown,
            damage: 0.0,
            shield: 0.0,
            heal: 0.0,
            crit_chance: 0.0,
            skill: Skill::Idle,
            deathrattle: None,
            durability: Durability::Infinite,
            price: 0,
            immunities: SmallVec::new(),
            auras: SmallVec::new(),
            statuses: SmallVec::new(),
            polymorph_into: None,
            summon: None,
            chain_triggers: 0,
        }
    }

    #[must_use]
    pub fn with_name_key(mut self, key: impl Into<String>) -> Self {
        self.name_key = key.into();
        self
    }

    #[must_use]
    pub fn with_description_key(mut self, key: impl Into<String>) -> Self {
        self.description_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_flavor_key(mut self, key: impl Into<String>) -> Self {
        self.flavor_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Restrict the card to one side.
    #[must_use]
    pub fn with_faction(mut self, side: Side) -> Self {
        self.faction = Some(side);
        self
    }

    #[must_use]
    pub fn with_damage(mut self, damage: f32) -> Self {
        self.damage = damage;
        self
    }

    #[must_use]
    pub fn with_shield(mut self, shield: f32) -> Self {
        self.shield = shield;
        self
    }

    #[must_use]
    pub fn with_heal(mut self, heal: f32) -> Self {
        self.heal = heal;
        self
    }

    #[must_use]
    pub fn with_crit_chance(mut self, chance: f32) -> Self {
        self.crit_chance = chance;
        self
    }

    #[must_use]
    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skill = skill;
        self
    }

    #[must_use]
    pub fn with_deathrattle(mut self, skill: Skill) -> Self {
        self.deathrattle = Some(skill);
        self
    }

    /// Limit how many times the card triggers.
    ///
    /// Panics on `Durability::Finite(0)`.
    #[must_use]
    pub fn with_durability(mut self, durability: Durability) -> Self {
        assert_ne!(
            durability,
            Durability::Finite(0),
            "card `{}` needs at least one use",
            self.identifier
        );
        self.durability = durability;
        self
    }

    #[must_use]
    pub fn with_price(mut self, price: u32) -> Self {
        self.price = price;
        self
    }

    #[must_use]
    pub fn with_immunity(mut self, kind: StatusEffectKind) -> Self {
        if !self.immunities.contains(&kind) {
            self.immunities.push(kind);
        }
        self
    }

    #[must_use]
    pub fn with_aura(mut self, stat: CardStat, amount: f32) -> Self {
        self.auras.push(Aura { stat, amount });
        self
    }

    /// Set the amount of `kind` this card's skill applies.
    #[must_use]
    pub fn with_status(mut self, kind: StatusEffectKind, amount: f32) -> Self {
        match self.statuses.iter_mut().find(|(k, _)| *k == kind) {
            Some(entry) => entry.1 = amount,
            None => self.statuses.push((kind, amount)),
        }
        self
    }

    #[must_use]
    pub fn with_polymorph_into(mut self, identifier: impl Into<String>) -> Self {
        self.polymorph_into = Some(identifier.into());
        self
    }

    #[must_use]
    pub fn with_summon(mut self, identifier: impl Into<String>, count: usize) -> Self {
        self.summon = Some(SummonPayload {
            identifier: identifier.into(),
            count,
        });
        self
    }

    #[must_use]
    pub fn with_chain_triggers(mut self, count: u32) -> Self {
        self.chain_triggers = count;
        self
    }

    /// Amount of `kind` the skill applies (0 if none).
    #[must_use]
    pub fn status_amount(&self, kind: StatusEffectKind) -> f32 {
        self.statuses
            .iter()
            .find(|(k, _)| *k == kind)
            .map_or(0.0, |(_, amount)| *amount)
    }

    /// Base value of a stat before auras and growth.
    #[must_use]
    pub fn base_stat(&self, stat: CardStat) -> f32 {
        match stat {
            CardStat::Damage => self.damage,
            CardStat::Shield => self.shield,
            CardStat::Heal => self.heal,
            CardStat::CritChance => self.crit_chance,
        }
    }

    /// Aura amount this template grants for `stat`.
    #[must_use]
    pub fn aura_for(&self, stat: CardStat) -> f32 {
        self.auras
            .iter()
            .filter(|a| a.stat == stat)
            .map(|a| a.amount)
            .sum()
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    #[must_use]
    pub fn is_immune_to(&self, kind: StatusEffectKind) -> bool {
        self.immunities.contains(&kind)
    }
}
