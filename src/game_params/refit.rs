//! Refit (retrofit) tree nodes and research-ship strengthening nodes.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::warn;

use crate::data::Record;
use crate::error::{ErrorKind, IResult, failure_from_kind};
use crate::game_types::Stat;

use super::attributes::AttributeRegistry;
use super::keys;
use super::record::RecordView;

/// Effects of one refit stage.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StageBonus {
    stats: BTreeMap<Stat, f64>,
    /// Equipment proficiency gained per 1-based slot.
    proficiency: BTreeMap<usize, f64>,
}

impl StageBonus {
    fn parse(node_id: i64, effects: &Record, registry: &AttributeRegistry) -> Self {
        let mut bonus = StageBonus::default();
        for (name, value) in effects {
            let Some(value) = value.as_f64() else {
                warn!("refit node {node_id}: effect {name} has non-numeric value {value}");
                continue;
            };
            if let Some(stat) = registry.stat(name) {
                *bonus.stats.entry(stat).or_default() += value;
            } else if let Some(slot) = name
                .strip_prefix(keys::EQUIPMENT_PROFICIENCY_PREFIX)
                .and_then(|slot| slot.parse::<usize>().ok())
            {
                *bonus.proficiency.entry(slot).or_default() += value;
            } else {
                warn!("refit node {node_id}: unknown effect attribute {name}");
            }
        }
        bonus
    }

    pub fn stat(&self, stat: Stat) -> f64 {
        self.stats.get(&stat).copied().unwrap_or_default()
    }

    pub fn proficiency(&self, slot: usize) -> f64 {
        self.proficiency.get(&slot).copied().unwrap_or_default()
    }

    pub fn stats(&self) -> &BTreeMap<Stat, f64> {
        &self.stats
    }
}

/// One node of a ship's refit tree.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RefitNode {
    id: i64,
    name: String,
    icon: String,
    gold_needed: i64,
    level_limit: u32,
    star_limit: u32,
    max_level: usize,
    /// Whether completing the node consumes a duplicate ship.
    use_ship: bool,
    stages: Vec<StageBonus>,
    item_consumption: Vec<Vec<(i64, i64)>>,
    gear_score: Vec<i64>,
    /// Nodes that must be completed first.
    parents: Vec<i64>,
    /// `(before, after)` ship id swaps performed by hull-changing nodes.
    ship_swaps: Vec<(i64, i64)>,
}

impl RefitNode {
    pub fn from_record(view: RecordView<'_>, registry: &AttributeRegistry) -> IResult<Self> {
        let effects: Vec<Record> = view.get(keys::EFFECT)?;
        let stages = effects
            .iter()
            .map(|effects| StageBonus::parse(view.id(), effects, registry))
            .collect();

        Ok(RefitNode {
            id: view.id(),
            name: view.get(keys::NAME)?,
            icon: view.get(keys::ICON)?,
            gold_needed: view.get(keys::USE_GOLD)?,
            level_limit: view.get(keys::LEVEL_LIMIT)?,
            star_limit: view.get(keys::STAR_LIMIT)?,
            max_level: view.get(keys::MAX_LEVEL)?,
            use_ship: view.opt(keys::USE_SHIP)?.unwrap_or_default(),
            stages,
            item_consumption: view.opt(keys::USE_ITEM)?.unwrap_or_default(),
            gear_score: view.opt(keys::GEAR_SCORE)?.unwrap_or_default(),
            parents: view.opt(keys::CONDITION_ID)?.unwrap_or_default(),
            ship_swaps: view.opt(keys::SHIP_ID)?.unwrap_or_default(),
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn gold_needed(&self) -> i64 {
        self.gold_needed
    }

    pub fn level_limit(&self) -> u32 {
        self.level_limit
    }

    pub fn star_limit(&self) -> u32 {
        self.star_limit
    }

    pub fn max_level(&self) -> usize {
        self.max_level
    }

    pub fn use_ship(&self) -> bool {
        self.use_ship
    }

    pub fn parents(&self) -> &[i64] {
        &self.parents
    }

    pub fn gear_score(&self) -> &[i64] {
        &self.gear_score
    }

    pub fn ship_swaps(&self) -> &[(i64, i64)] {
        &self.ship_swaps
    }

    /// Whether completing this node replaces the ship with its refit hull.
    pub fn changes_hull(&self) -> bool {
        !self.ship_swaps.is_empty()
    }

    pub fn stages(&self) -> &[StageBonus] {
        &self.stages
    }

    fn stage(&self, stage: usize) -> IResult<&StageBonus> {
        ErrorKind::check_range("refit stage", stage as i64, 1, self.max_level as i64)?;
        self.stages.get(stage - 1).ok_or_else(|| {
            failure_from_kind(ErrorKind::Range {
                what: "refit stage",
                value: stage as i64,
                min: 1,
                max: self.stages.len() as i64,
            })
        })
    }

    /// Bonus to `stat` granted by a 1-based stage, 0 when the stage grants none.
    pub fn stat_bonus(&self, stage: usize, stat: Stat) -> IResult<f64> {
        self.stage(stage).map(|bonus| bonus.stat(stat))
    }

    /// Bonus to `stat` from completing every stage.
    pub fn stat_bonus_sum(&self, stat: Stat) -> f64 {
        self.completed_stages().map(|bonus| bonus.stat(stat)).sum()
    }

    /// Equipment proficiency for a 1-based slot from completing every stage.
    pub fn proficiency_bonus_sum(&self, slot: usize) -> f64 {
        self.completed_stages()
            .map(|bonus| bonus.proficiency(slot))
            .sum()
    }

    fn completed_stages(&self) -> impl Iterator<Item = &StageBonus> {
        self.stages.iter().take(self.max_level)
    }

    /// Items consumed by a 1-based stage as `(item id, count)` pairs.
    pub fn item_consumption(&self, stage: usize) -> IResult<&[(i64, i64)]> {
        ErrorKind::check_range("refit stage", stage as i64, 1, self.max_level as i64)?;
        Ok(self
            .item_consumption
            .get(stage - 1)
            .map(Vec::as_slice)
            .unwrap_or_default())
    }
}

/// One level of a research ship's strengthening track.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResearchStrengthenNode {
    id: i64,
    dev_level: u32,
    required_level: u32,
    exp_needed: i64,
    description: String,
    dialog: Option<Value>,
    preload: Option<Value>,
    /// `(slot, amount)` when this level raises an equipment slot's proficiency.
    proficiency_bonus: Option<(usize, f64)>,
    stat_bonus: BTreeMap<Stat, f64>,
}

impl ResearchStrengthenNode {
    pub fn from_record(view: RecordView<'_>, registry: &AttributeRegistry) -> IResult<Self> {
        let proficiency: Vec<f64> = view
            .opt(keys::EFFECT_EQUIPMENT_PROFICIENCY)?
            .unwrap_or_default();
        let proficiency_bonus = match proficiency.as_slice() {
            [] => None,
            [slot, amount, ..] => Some((*slot as usize, *amount)),
            [_] => {
                return Err(view.invalid(format!(
                    "`{}` must be empty or a [slot, amount] pair",
                    keys::EFFECT_EQUIPMENT_PROFICIENCY
                )));
            }
        };

        let attrs: Vec<(String, f64)> = view.opt(keys::EFFECT_ATTR)?.unwrap_or_default();
        let mut stat_bonus = BTreeMap::new();
        for (name, value) in attrs {
            match registry.stat(&name) {
                Some(stat) => *stat_bonus.entry(stat).or_default() += value,
                None => warn!("research node {}: unknown attribute {name}", view.id()),
            }
        }

        Ok(ResearchStrengthenNode {
            id: view.id(),
            dev_level: view.get(keys::LV)?,
            required_level: view.get(keys::NEED_LV)?,
            exp_needed: view.get(keys::NEED_EXP)?,
            description: view.opt(keys::EFFECT_DESC)?.unwrap_or_default(),
            dialog: view.opt(keys::EFFECT_DIALOG)?,
            preload: view.opt(keys::EFFECT_PRELOAD)?,
            proficiency_bonus,
            stat_bonus,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn dev_level(&self) -> u32 {
        self.dev_level
    }

    /// Ship level required to unlock this node.
    pub fn required_level(&self) -> u32 {
        self.required_level
    }

    pub fn exp_needed(&self) -> i64 {
        self.exp_needed
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn dialog(&self) -> Option<&Value> {
        self.dialog.as_ref()
    }

    pub fn preload(&self) -> Option<&Value> {
        self.preload.as_ref()
    }

    pub fn stat_bonus(&self, stat: Stat) -> f64 {
        self.stat_bonus.get(&stat).copied().unwrap_or_default()
    }

    pub fn proficiency_bonus(&self, slot: usize) -> f64 {
        match self.proficiency_bonus {
            Some((bonus_slot, amount)) if bonus_slot == slot => amount,
            _ => 0.0,
        }
    }
}
