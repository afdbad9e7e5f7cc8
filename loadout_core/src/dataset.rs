//! Dataset - The compiled entity collections

use crate::config::{self, ConfigError};
use crate::entity::{AddOn, Entity, Item, RuleSource};
use crate::loadout::Loadout;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Five entity collections in dataset order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub characters: Vec<Entity>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub addons: Vec<AddOn>,
    #[serde(default)]
    pub perks: Vec<Entity>,
    #[serde(default)]
    pub offerings: Vec<Entity>,
}

/// Version stamp published next to a compiled dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMeta {
    pub version: String,
    /// ISO-8601 timestamp
    #[serde(alias = "lastUpdated")]
    pub last_updated: String,
}

impl Dataset {
    /// Load a compiled dataset from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let dataset: Dataset = config::load_json(path)?;
        dataset.validate()?;
        tracing::debug!(
            "loaded dataset {} ({} characters, {} items, {} add-ons, {} perks, {} offerings)",
            dataset.version,
            dataset.characters.len(),
            dataset.items.len(),
            dataset.addons.len(),
            dataset.perks.len(),
            dataset.offerings.len()
        );
        Ok(dataset)
    }

    /// Parse a compiled dataset from a JSON string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let dataset: Dataset = config::parse_json(content)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Reject empty identifiers and duplicate ids within a collection
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_collection("characters", self.characters.iter())?;
        check_collection("items", self.items.iter().map(|i| &i.entity))?;
        check_collection("addons", self.addons.iter().map(|a| &a.entity))?;
        check_collection("perks", self.perks.iter())?;
        check_collection("offerings", self.offerings.iter())?;
        Ok(())
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.entity.id == id)
    }

    /// The loadout's selected item, if it exists in this dataset
    pub fn selected_item(&self, loadout: &Loadout) -> Option<&Item> {
        loadout.item_id.as_deref().and_then(|id| self.item(id))
    }

    /// Every entity the loadout selects
    ///
    /// Order is perks, add-ons, item, offering, character; within a
    /// collection the dataset order is kept. Unknown ids are skipped.
    pub fn selected_entities<'a>(&'a self, loadout: &Loadout) -> Vec<&'a Entity> {
        let mut entities: Vec<&'a Entity> = Vec::new();

        entities.extend(self.perks.iter().filter(|p| loadout.perk_ids.contains(&p.id)));
        entities.extend(
            self.addons
                .iter()
                .filter(|a| loadout.addon_ids.contains(&a.entity.id))
                .map(|a| &a.entity),
        );
        if let Some(item) = self.selected_item(loadout) {
            entities.push(&item.entity);
        }
        if let Some(offering) = selected(&self.offerings, loadout.offering_id.as_deref()) {
            entities.push(offering);
        }
        if let Some(character) = selected(&self.characters, loadout.character_id.as_deref()) {
            entities.push(character);
        }

        entities
    }

    /// Selected entities as rule sources, in [`Dataset::selected_entities`] order
    pub fn selected_sources<'a>(&'a self, loadout: &Loadout) -> Vec<&'a dyn RuleSource> {
        self.selected_entities(loadout)
            .into_iter()
            .map(|e| e as &dyn RuleSource)
            .collect()
    }

    /// Ids of selected entities that belong to the other role
    pub fn role_conflicts<'a>(&'a self, loadout: &Loadout) -> Vec<&'a str> {
        self.selected_entities(loadout)
            .into_iter()
            .filter(|e| !e.usable_by(loadout.role))
            .map(|e| e.id.as_str())
            .collect()
    }
}

fn selected<'a>(entities: &'a [Entity], id: Option<&str>) -> Option<&'a Entity> {
    let id = id?;
    entities.iter().find(|e| e.id == id)
}

fn check_collection<'a, I>(name: &str, entities: I) -> Result<(), ConfigError>
where
    I: Iterator<Item = &'a Entity>,
{
    let mut seen = HashSet::new();
    for entity in entities {
        if entity.id.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{}: entity with empty id",
                name
            )));
        }
        if entity.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{}: entity {} has an empty name",
                name, entity.id
            )));
        }
        if !seen.insert(entity.id.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "{}: duplicate id {}",
                name, entity.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    const DATASET: &str = r#"{
        "version": "1.2.0",
        "characters": [ { "type": "character", "id": "meg", "name": "Meg Thomas", "role": "survivor" } ],
        "items": [ { "type": "item", "id": "medkit", "name": "Medkit", "charges": 24 } ],
        "addons": [ { "type": "addon", "id": "gauze", "name": "Gauze Roll", "ownerItemType": "medkit" } ],
        "perks": [
            { "type": "perk", "id": "hyperfocus", "name": "Hyperfocus" },
            { "type": "perk", "id": "stake_out", "name": "Stake Out" }
        ],
        "offerings": []
    }"#;

    #[test]
    fn test_parse_dataset() {
        let dataset = Dataset::parse(DATASET).unwrap();
        assert_eq!(dataset.version, "1.2.0");
        assert_eq!(dataset.perks.len(), 2);
        assert_eq!(dataset.item("medkit").and_then(|i| i.charges), Some(24.0));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut dataset = Dataset::parse(DATASET).unwrap();
        dataset.perks.push(Entity::new("hyperfocus", "Hyperfocus again"));
        assert!(matches!(dataset.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut dataset = Dataset::default();
        dataset.offerings.push(Entity::new("x", " "));
        assert!(dataset.validate().is_err());
    }

    #[test]
    fn test_selected_sources_order_and_unknown_ids() {
        let dataset = Dataset::parse(DATASET).unwrap();
        let loadout = Loadout::new()
            .with_character("meg")
            .with_item("medkit")
            .with_addon("gauze")
            .with_perk("stake_out")
            .with_perk("hyperfocus")
            .with_perk("does_not_exist");

        let ids: Vec<&str> = dataset.selected_sources(&loadout).iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["hyperfocus", "stake_out", "gauze", "medkit", "meg"]);
    }

    #[test]
    fn test_empty_loadout_selects_nothing() {
        let dataset = Dataset::parse(DATASET).unwrap();
        assert!(dataset.selected_sources(&Loadout::new()).is_empty());
    }

    #[test]
    fn test_role_conflicts() {
        let mut dataset = Dataset::parse(DATASET).unwrap();
        dataset.characters.push(Entity::new("trapper", "The Trapper").with_role(Role::Killer));

        let survivor = Loadout::new().with_character("trapper").with_perk("hyperfocus");
        assert_eq!(dataset.role_conflicts(&survivor), vec!["trapper"]);

        let mut killer = Loadout::new().with_character("trapper");
        killer.role = Role::Killer;
        assert!(dataset.role_conflicts(&killer).is_empty());

        let meg = Loadout::new().with_character("meg").with_perk("stake_out");
        assert!(dataset.role_conflicts(&meg).is_empty());
    }

    #[test]
    fn test_parse_meta() {
        let meta: DatasetMeta =
            serde_json::from_str(r#"{ "version": "1.2.0", "lastUpdated": "2024-05-01T00:00:00Z" }"#).unwrap();
        assert_eq!(meta.last_updated, "2024-05-01T00:00:00Z");
    }
}
