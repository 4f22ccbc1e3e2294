use crate::cards::{
    CardRegistry, CardStat, CardTemplate, Rarity, Skill, DEFAULT_POLYMORPH_SUBSTITUTE,
};
use crate::core::Side;
use crate::effects::StatusEffectKind;

/// Identifiers of the player-side starter cards.
pub const MERCENARY_IDS: [&str; 9] = [
    "barbarian_warrior",
    "barbarian_shieldbearer",
    "bloodletter",
    "frost_fowl",
    "furious_warrior",
    "healer",
    "regenerator",
    "blood_oath_shieldbearer",
    "rallying_standard",
];

/// Identifiers of the monster-side starter cards.
pub const MONSTER_IDS: [&str; 2] = ["goblin", "witch"];

/// Build a registry holding every starter card.
///
/// ```
/// use rust_autobattle::catalog::{starter_registry, MERCENARY_IDS, MONSTER_IDS};
///
/// let registry = starter_registry();
/// assert_eq!(registry.len(), MERCENARY_IDS.len() + MONSTER_IDS.len() + 1);
/// assert!(registry.contains("sheep"));
/// ```
#[must_use]
pub fn starter_registry() -> CardRegistry {
    let mut registry = CardRegistry::new();
    for template in mercenaries().into_iter().chain(monsters()) {
        registry.register(template);
    }
    registry.register(sheep());
    registry
}

fn mercenary(identifier: &str, cooldown: f32) -> CardTemplate {
    CardTemplate::new(identifier, cooldown)
        .with_faction(Side::Player)
        .with_description_key(format!("card_{identifier}_desc"))
}

fn monster(identifier: &str, cooldown: f32) -> CardTemplate {
    CardTemplate::new(identifier, cooldown)
        .with_faction(Side::Monster)
        .with_tag("tag_monster")
}

fn mercenaries() -> Vec<CardTemplate> {
    vec![
        mercenary("barbarian_warrior", 7.0)
            .with_tag("tag_barbarian")
            .with_damage(20.0)
            .with_skill(Skill::Strike)
            .with_price(2),
        mercenary("barbarian_shieldbearer", 7.0)
            .with_tag("tag_barbarian")
            .with_shield(20.0)
            .with_crit_chance(0.1)
            .with_skill(Skill::Guard)
            .with_price(3),
        mercenary("bloodletter", 8.0)
            .with_status(StatusEffectKind::Bleed, 3.0)
            .with_skill(Skill::Afflict(StatusEffectKind::Bleed))
            .with_price(2),
        mercenary("frost_fowl", 10.0)
            .with_tag("tag_beast")
            .with_status(StatusEffectKind::Freeze, 1.0)
            .with_skill(Skill::Hex {
                kind: StatusEffectKind::Freeze,
                count: 1,
            })
            .with_immunity(StatusEffectKind::Freeze)
            .with_price(2),
        mercenary("furious_warrior", 7.0)
            .with_rarity(Rarity::Silver)
            .with_tag("tag_barbarian")
            .with_damage(10.0)
            .with_skill(Skill::Rampage { growth: 5.0 })
            .with_price(4),
        mercenary("healer", 12.0)
            .with_heal(20.0)
            .with_skill(Skill::Mend)
            .with_price(2),
        mercenary("regenerator", 10.0)
            .with_rarity(Rarity::Silver)
            .with_status(StatusEffectKind::Heal, 1.0)
            .with_skill(Skill::Bolster(StatusEffectKind::Heal))
            .with_price(4),
        mercenary("blood_oath_shieldbearer", 5.0)
            .with_rarity(Rarity::Silver)
            .with_tag("tag_barbarian")
            .with_shield(20.0)
            .with_skill(Skill::BloodOath {
                self_damage: 5.0,
                enraged_shield: 45.0,
            })
            .with_price(4),
        // Item: never triggers in practice, only lends its aura.
        mercenary("rallying_standard", 99_999.0)
            .with_rarity(Rarity::Silver)
            .with_tag("tag_item")
            .with_aura(CardStat::CritChance, 0.5)
            .with_price(3),
    ]
}

fn monsters() -> Vec<CardTemplate> {
    vec![
        monster("goblin", 6.0)
            .with_tag("tag_goblin")
            .with_damage(20.0)
            .with_skill(Skill::Strike),
        monster("witch", 10.0)
            .with_status(StatusEffectKind::Polymorph, 5.0)
            .with_polymorph_into(DEFAULT_POLYMORPH_SUBSTITUTE)
            .with_skill(Skill::Hex {
                kind: StatusEffectKind::Polymorph,
                count: 1,
            }),
    ]
}

fn sheep() -> CardTemplate {
    CardTemplate::new(DEFAULT_POLYMORPH_SUBSTITUTE, 99.0)
        .with_tag("tag_beast")
        .with_flavor_key("card_sheep_desc")
        .with_damage(1.0)
}
