//! Card registry for template lookup.
//!
//! The `CardRegistry` stores every card template a battle may create and
//! turns an identifier into a fresh `Card`. Roster setup, summons and
//! polymorph substitutes all go through `create_card`.

use rustc_hash::FxHashMap;

use super::definition::{CardTemplate, Durability};
use super::instance::Card;
use crate::core::{BattleError, Side};

/// Registry of card templates keyed by identifier.
///
/// ## Example
///
/// ```
/// use rust_autobattle::cards::{CardRegistry, CardTemplate, Skill};
/// use rust_autobattle::core::Side;
///
/// let mut registry = CardRegistry::new();
/// registry.register(
///     CardTemplate::new("goblin", 6.0)
///         .with_damage(20.0)
///         .with_skill(Skill::Strike),
/// );
///
/// let goblin = registry.create_card("goblin", Side::Monster, 3).unwrap();
/// assert_eq!(goblin.slot_index(), 3);
/// assert!(registry.create_card("dragon", Side::Monster, 0).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    templates: FxHashMap<String, CardTemplate>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card template.
    ///
    /// Panics if a template with the same identifier already exists, or if
    /// its durability is `Finite(0)`.
    pub fn register(&mut self, template: CardTemplate) {
        if self.templates.contains_key(&template.identifier) {
            panic!("Card `{}` already registered", template.identifier);
        }
        if template.durability == Durability::Finite(0) {
            panic!("Card `{}` needs at least one use", template.identifier);
        }
        self.templates.insert(template.identifier.clone(), template);
    }

    /// Register a template (builder pattern).
    #[must_use]
    pub fn with(mut self, template: CardTemplate) -> Self {
        self.register(template);
        self
    }

    /// Build a new card from a template.
    ///
    /// Fails with `UnknownCard` for unregistered identifiers and with
    /// `OwnerMismatch` when the template is restricted to the other side.
    pub fn create_card(
        &self,
        identifier: &str,
        owner: Side,
        slot_index: usize,
    ) -> Result<Card, BattleError> {
        let template = self
            .templates
            .get(identifier)
            .ok_or_else(|| BattleError::UnknownCard(identifier.to_string()))?;

        if template.faction.is_some_and(|side| side != owner) {
            return Err(BattleError::OwnerMismatch {
                identifier: identifier.to_string(),
                owner,
            });
        }

        Ok(Card::new(template.clone(), owner, slot_index))
    }

    /// Get a template by identifier.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&CardTemplate> {
        self.templates.get(identifier)
    }

    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.templates.contains_key(identifier)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterate over all templates.
    pub fn iter(&self) -> impl Iterator<Item = &CardTemplate> {
        self.templates.values()
    }

    /// Find templates carrying a tag.
    pub fn find_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a CardTemplate> {
        self.templates.values().filter(move |t| t.has_tag(tag))
    }

    /// Find templates matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &CardTemplate>
    where
        F: Fn(&CardTemplate) -> bool,
    {
        self.templates.values().filter(move |t| predicate(t))
    }
}
