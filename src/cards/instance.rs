//! Card instances - runtime card state.
//!
//! `Card` is one card sitting in a roster during a battle. It owns the
//! mutable state a template does not: current cooldown, freeze and
//! haste/slow timers, echo casts, in-battle growth, price modifiers,
//! remaining durability and (for polymorph substitutes) the handle of the
//! card it replaced.
//!
//! A card never reaches outside itself. It reports what happened through
//! return values (`CooldownTick`, `StatusApplication`) and the coordinator
//! acts on them.
//!
//! ## Cooldown Order
//!
//! Each tick `update_cooldown` runs exactly one of:
//!
//! 1. transformed and the timer ran out: `RevertRequested`, nothing else
//! 2. frozen: freeze timer counts down, cooldown does not
//! 3. otherwise: cooldown counts down at the haste/slow rate

use serde::{Deserialize, Serialize};

use super::definition::{CardStat, CardTemplate, Durability};
use crate::core::{BattleConfig, CardHandle, GameRng, Side};
use crate::effects::{ExclusiveTimer, StatusEffectKind};

/// Substitute used by polymorph when no identifier is given.
pub const DEFAULT_POLYMORPH_SUBSTITUTE: &str = "sheep";

/// Result of advancing a card's cooldown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CooldownTick {
    /// Still counting down.
    Counting,
    /// Cooldown reached zero; the card should trigger.
    Ready,
    /// Frozen this tick; nothing counted down.
    Frozen,
    /// Transformation expired; the owner should restore the original.
    RevertRequested,
}

/// Outcome of applying a card-level status.
#[derive(Clone, Debug, PartialEq)]
pub enum StatusApplication {
    Applied,
    /// The card's template rejects this kind.
    Immune,
    /// Not a card-level kind.
    Ignored,
    /// The owning side must swap this card for `into` for `duration` seconds.
    PolymorphRequested { into: String, duration: f32 },
}

impl StatusApplication {
    /// Whether this counts as a successful application.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(
            self,
            StatusApplication::Applied | StatusApplication::PolymorphRequested { .. }
        )
    }
}

/// Link from a polymorph substitute back to the card it replaced.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    pub original: CardHandle,
    pub remaining: f32,
}

/// A card in a battle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    template: CardTemplate,
    owner: Side,
    slot_index: usize,
    original_slot_index: usize,

    cooldown: f32,
    frozen: Option<f32>,
    tempo: ExclusiveTimer<StatusEffectKind>,
    echo: u32,
    growth: f32,

    price_inflate: u32,
    price_extort: u32,

    durability: Durability,
    transformation: Option<Transformation>,
}

impl Card {
    /// Create a card with a full cooldown.
    #[must_use]
    pub fn new(template: CardTemplate, owner: Side, slot_index: usize) -> Self {
        Self {
            cooldown: template.cooldown,
            durability: template.durability,
            template,
            owner,
            slot_index,
            original_slot_index: slot_index,
            frozen: None,
            tempo: ExclusiveTimer::new(),
            echo: 0,
            growth: 0.0,
            price_inflate: 0,
            price_extort: 0,
            transformation: None,
        }
    }

    // === Identity ===

    #[must_use]
    pub fn template(&self) -> &CardTemplate {
        &self.template
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.template.identifier
    }

    #[must_use]
    pub fn name_key(&self) -> &str {
        &self.template.name_key
    }

    #[must_use]
    pub fn owner(&self) -> Side {
        self.owner
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.template.has_tag(tag)
    }

    /// Slot the card currently occupies.
    #[must_use]
    pub fn slot_index(&self) -> usize {
        self.slot_index
    }

    /// Formation slot, fixed at creation.
    #[must_use]
    pub fn original_slot_index(&self) -> usize {
        self.original_slot_index
    }

    pub(crate) fn set_slot_index(&mut self, index: usize) {
        self.slot_index = index;
    }

    pub(crate) fn set_original_slot_index(&mut self, index: usize) {
        self.original_slot_index = index;
    }

    // === Cooldown ===

    /// Seconds between triggers.
    #[must_use]
    pub fn cooldown_time(&self) -> f32 {
        self.template.cooldown
    }

    /// Seconds until the next trigger (may be negative after overshoot).
    #[must_use]
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    pub fn set_cooldown(&mut self, seconds: f32) {
        self.cooldown = seconds;
    }

    /// Restart the countdown from the full cooldown.
    pub fn reset_cooldown(&mut self) {
        self.cooldown = self.template.cooldown;
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.cooldown <= 0.0
    }

    /// Advance timers by `dt`.
    pub fn update_cooldown(&mut self, dt: f32, config: &BattleConfig) -> CooldownTick {
        if let Some(transformation) = &mut self.transformation {
            transformation.remaining -= dt;
            if transformation.remaining <= 0.0 {
                return CooldownTick::RevertRequested;
            }
        }

        if let Some(remaining) = self.frozen {
            let remaining = remaining - dt;
            self.frozen = (remaining > 0.0).then_some(remaining);
            return CooldownTick::Frozen;
        }

        let rate = match self.tempo.active() {
            Some(StatusEffectKind::Haste) => config.haste_rate,
            Some(StatusEffectKind::Slow) => config.slow_rate,
            _ => 1.0,
        };
        self.tempo.tick(dt);
        self.cooldown -= dt * rate;

        if self.cooldown <= 0.0 {
            CooldownTick::Ready
        } else {
            CooldownTick::Counting
        }
    }

    /// Number of casts for this trigger. Consumes banked echo.
    pub fn take_casts(&mut self) -> u32 {
        1 + std::mem::take(&mut self.echo)
    }

    /// Restart the cooldown after a trigger, carrying any overshoot.
    pub fn finish_trigger(&mut self) {
        self.cooldown = self.template.cooldown + self.cooldown.min(0.0);
    }

    /// Use up one durability. Returns true when the card should break.
    pub fn consume_durability(&mut self) -> bool {
        self.durability.consume()
    }

    #[must_use]
    pub fn durability(&self) -> Durability {
        self.durability
    }

    #[must_use]
    pub fn chain_triggers(&self) -> u32 {
        self.template.chain_triggers
    }

    // === Status ===

    /// Apply a card-level status.
    ///
    /// `amount` is seconds for freeze/haste/slow/polymorph, casts for echo
    /// and price points for inflate/extort. `extra` names the polymorph
    /// substitute.
    pub fn apply_status_effect(
        &mut self,
        kind: StatusEffectKind,
        amount: f32,
        extra: Option<&str>,
    ) -> StatusApplication {
        if self.template.is_immune_to(kind) {
            return StatusApplication::Immune;
        }

        match kind {
            StatusEffectKind::Freeze => {
                let remaining = self.frozen.unwrap_or(0.0).max(amount);
                self.frozen = Some(remaining);
            }
            StatusEffectKind::Haste | StatusEffectKind::Slow => {
                self.tempo.apply(kind, amount);
            }
            StatusEffectKind::Echo => {
                self.echo += amount.max(0.0).round() as u32;
            }
            StatusEffectKind::PriceInflate => {
                self.price_inflate += amount.max(0.0).round() as u32;
            }
            StatusEffectKind::PriceExtort => {
                self.price_extort += amount.max(0.0).round() as u32;
            }
            StatusEffectKind::Polymorph => {
                return StatusApplication::PolymorphRequested {
                    into: extra.unwrap_or(DEFAULT_POLYMORPH_SUBSTITUTE).to_string(),
                    duration: amount,
                };
            }
            _ => return StatusApplication::Ignored,
        }

        StatusApplication::Applied
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen.is_some()
    }

    #[must_use]
    pub fn freeze_remaining(&self) -> f32 {
        self.frozen.unwrap_or(0.0)
    }

    #[must_use]
    pub fn is_hasted(&self) -> bool {
        self.tempo.is(StatusEffectKind::Haste)
    }

    #[must_use]
    pub fn is_slowed(&self) -> bool {
        self.tempo.is(StatusEffectKind::Slow)
    }

    /// Remaining seconds of haste or slow.
    #[must_use]
    pub fn tempo_remaining(&self, kind: StatusEffectKind) -> f32 {
        self.tempo.remaining(kind)
    }

    /// Banked echo casts.
    #[must_use]
    pub fn echo(&self) -> u32 {
        self.echo
    }

    /// Drop in-battle growth, echo, haste/slow and price modifiers.
    pub fn clear_battle_buffs(&mut self) {
        self.growth = 0.0;
        self.echo = 0;
        self.tempo.clear();
        self.price_inflate = 0;
        self.price_extort = 0;
    }

    pub fn clear_frozen(&mut self) {
        self.frozen = None;
    }

    // === Stats ===

    /// Stat before auras: base plus in-battle growth.
    #[must_use]
    pub fn stat(&self, stat: CardStat) -> f32 {
        match stat {
            CardStat::Damage => self.template.damage + self.growth,
            other => self.template.base_stat(other),
        }
    }

    /// Permanently add damage for the rest of the battle.
    pub fn grow(&mut self, amount: f32) {
        self.growth += amount;
    }

    #[must_use]
    pub fn growth(&self) -> f32 {
        self.growth
    }

    /// Aura this card grants to `recipient` for `stat`.
    ///
    /// Auras only reach cards on the same side.
    #[must_use]
    pub fn aura_buff_to(&self, recipient: &Card, stat: CardStat) -> f32 {
        if recipient.owner != self.owner {
            return 0.0;
        }
        self.template.aura_for(stat)
    }

    // === Economy ===

    #[must_use]
    pub fn net_price(&self) -> u32 {
        let price = i64::from(self.template.price) + i64::from(self.price_inflate)
            - i64::from(self.price_extort);
        price.max(0) as u32
    }

    // === Transformation ===

    /// The card this substitute replaced, if transformed.
    #[must_use]
    pub fn transformation(&self) -> Option<Transformation> {
        self.transformation
    }

    #[must_use]
    pub fn is_transformed(&self) -> bool {
        self.transformation.is_some()
    }

    pub(crate) fn set_transformation(&mut self, original: CardHandle, duration: f32) {
        self.transformation = Some(Transformation {
            original,
            remaining: duration,
        });
    }
}

/// Roll a critical hit.
///
/// Returns the configured crit multiplier on success and 1.0 otherwise.
/// A non-positive chance never draws from the RNG.
pub fn roll_crit(chance: f32, rng: &mut GameRng, config: &BattleConfig) -> f32 {
    if chance > 0.0 && rng.gen_chance(chance) {
        config.crit_multiplier
    } else {
        1.0
    }
}
