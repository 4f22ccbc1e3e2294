//! Skill resolution.
//!
//! Resolves one cast of a `Skill` for the card behind `handle`. Amounts are
//! read from the card at cast time, so growth and neighbor auras gained
//! between casts are picked up.

use tracing::{debug, warn};

use super::coordinator::BattleCoordinator;
use crate::cards::{roll_crit, CardStat, Skill};
use crate::core::{CardHandle, Side};
use crate::effects::StatusEffectKind;

impl BattleCoordinator {
    /// Resolve one cast of `skill` for the card behind `handle`.
    ///
    /// The card may be gone by the time a later step of a `Sequence` runs;
    /// stat reads then come back as zero.
    pub(crate) fn resolve_skill(&mut self, side: Side, handle: CardHandle, skill: &Skill) {
        let target = side.opponent();

        match skill {
            Skill::Idle => {}

            Skill::Strike => {
                let damage = self.crit_scaled(side, handle, CardStat::Damage);
                self.combatants[target].take_damage(damage, &self.config);
            }

            Skill::Guard => {
                let shield = self.crit_scaled(side, handle, CardStat::Shield);
                self.combatants[side].add_shield(shield);
            }

            Skill::Mend => {
                let heal = self.crit_scaled(side, handle, CardStat::Heal);
                self.combatants[side].add_health(heal);
            }

            Skill::Rampage { growth } => {
                let damage = self.crit_scaled(side, handle, CardStat::Damage);
                self.combatants[target].take_damage(damage, &self.config);
                if let Some(card) = self.arena.get_mut(handle) {
                    card.grow(*growth);
                }
            }

            Skill::BloodOath {
                self_damage,
                enraged_shield,
            } => {
                let shield = if self.combatants[side].is_enraged() {
                    *enraged_shield
                } else {
                    self.current_stat(side, handle, CardStat::Shield)
                };
                self.combatants[side].take_damage(*self_damage, &self.config);
                self.combatants[side].add_shield(shield);
            }

            Skill::Afflict(kind) => {
                let amount = self.template_status(handle, *kind);
                self.combatants[target].apply_status(*kind, amount);
            }

            Skill::Bolster(kind) => {
                let amount = self.template_status(handle, *kind);
                self.combatants[side].apply_status(*kind, amount);
            }

            Skill::Hex { kind, count } => self.scatter(side, handle, target, *kind, *count),

            Skill::Inspire { kind, count } => self.scatter(side, handle, side, *kind, *count),

            Skill::Summon => {
                let Some(payload) = self
                    .arena
                    .get(handle)
                    .and_then(|card| card.template().summon.clone())
                else {
                    return;
                };
                for _ in 0..payload.count {
                    if self.spawn(side, &payload.identifier).is_err() {
                        break;
                    }
                }
            }

            Skill::Scramble => self.shuffle(target),

            Skill::Disrupt { swaps } => {
                self.disrupt(target, *swaps);
            }

            Skill::Sequence(steps) => {
                for step in steps {
                    if !self.is_running() {
                        break;
                    }
                    self.resolve_skill(side, handle, step);
                }
            }
        }
    }

    /// Current stat times a crit roll on the card's current crit chance.
    fn crit_scaled(&mut self, side: Side, handle: CardHandle, stat: CardStat) -> f32 {
        let base = self.current_stat(side, handle, stat);
        let chance = self.current_stat(side, handle, CardStat::CritChance);
        let multiplier = roll_crit(chance, &mut self.crit_rng, &self.config);
        if multiplier > 1.0 {
            debug!(%side, ?stat, base, multiplier, "critical hit");
        }
        base * multiplier
    }

    fn template_status(&self, handle: CardHandle, kind: StatusEffectKind) -> f32 {
        self.arena
            .get(handle)
            .map_or(0.0, |card| card.template().status_amount(kind))
    }

    fn scatter(
        &mut self,
        side: Side,
        handle: CardHandle,
        target: Side,
        kind: StatusEffectKind,
        count: usize,
    ) {
        let amount = self.template_status(handle, kind);
        let substitute = self
            .arena
            .get(handle)
            .and_then(|card| card.template().polymorph_into.clone());

        if let Err(err) =
            self.apply_status_to_random_cards(target, count, kind, amount, substitute.as_deref())
        {
            warn!(%side, %kind, %err, "card status application failed");
        }
    }
}
