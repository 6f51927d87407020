//! The player-facing ship: every limit-break variant of a hull plus its
//! progression systems (refit tree, fleet tech, research strengthening).

use itertools::Itertools;
use serde_json::Value;
use tracing::{debug, warn};
use variantly::Variantly;

use crate::Rc;
use crate::data::Table;
use crate::error::{ErrorKind, IResult, failure_from_kind};
use crate::game_types::{
    MAX_LIMIT_BREAK, Nation, Stat, check_affinity, check_level, check_limit_break,
    is_collab_group, is_research_group, limit_break_stage,
};
use crate::recognized::Recognized;

use super::keys;
use super::record::RecordView;
use super::refit::{RefitNode, ResearchStrengthenNode};
use super::resolver::{RefitGate, Resolver};
use super::unit::{HuntingGrid, Unit};

const VARIANT_COUNT: usize = MAX_LIMIT_BREAK as usize + 1;
const FLEET_TECH_POINT_STAGES: usize = 3;
const FLEET_TECH_BONUS_STAGES: usize = 2;

/// How a ship's refit relates to its hull type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Variantly)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RefitKind {
    None,
    SameHull,
    /// The refit turns the ship into this hull type.
    HullChange(u32),
}

/// Position of a refit node in the refit screen, with a 1-based column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GridCoordinate {
    pub row: i64,
    pub column: usize,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PlacedRefitNode {
    pub node: Rc<RefitNode>,
    pub coordinate: GridCoordinate,
}

/// A fleet tech stat bonus and the hull types it applies to.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FleetTechBonus {
    pub stat: Stat,
    pub value: f64,
    pub hull_types: Vec<u32>,
}

/// Fleet tech rewards: points for obtaining, limit breaking and leveling
/// the ship, and stat bonuses for obtaining and leveling it.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FleetTech {
    points: [Option<i64>; FLEET_TECH_POINT_STAGES],
    bonuses: [Option<FleetTechBonus>; FLEET_TECH_BONUS_STAGES],
}

impl FleetTech {
    fn from_record(view: RecordView<'_>) -> IResult<Self> {
        let bonus = |attr: &'static str,
                     value: &'static str,
                     hulls: &'static str|
         -> IResult<Option<FleetTechBonus>> {
            let Some(stat_id) = view.opt::<i64>(attr)? else {
                return Ok(None);
            };
            let stat = Stat::from_id(stat_id)
                .ok_or_else(|| view.invalid(format!("`{attr}` names unknown stat {stat_id}")))?;
            Ok(Some(FleetTechBonus {
                stat,
                value: view.get(value)?,
                hull_types: view.opt(hulls)?.unwrap_or_default(),
            }))
        };

        Ok(FleetTech {
            points: [
                view.opt(keys::PT_GET)?,
                view.opt(keys::PT_UPGRADE)?,
                view.opt(keys::PT_LEVEL)?,
            ],
            bonuses: [
                bonus(keys::ADD_GET_ATTR, keys::ADD_GET_VALUE, keys::ADD_GET_SHIPTYPE)?,
                bonus(keys::ADD_LEVEL_ATTR, keys::ADD_LEVEL_VALUE, keys::ADD_LEVEL_SHIPTYPE)?,
            ],
        })
    }
}

/// Research ship strengthening: the main development track and the fate
/// simulation track.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResearchTracks {
    pub main: Vec<Rc<ResearchStrengthenNode>>,
    pub fate: Vec<Rc<ResearchStrengthenNode>>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MetaUnit {
    id: i64,
    hull_type: u32,
    refit_kind: RefitKind,
    refit_skills: Vec<i64>,
    nationality: Recognized<Nation, u32>,
    variants: [Option<Rc<Unit>>; VARIANT_COUNT],
    refit_target: Option<Rc<Unit>>,
    fleet_tech: Option<FleetTech>,
    refit_nodes: Vec<PlacedRefitNode>,
    research: Option<ResearchTracks>,
    refit_gate: RefitGate,
}

/// `trans_skill` is a bare id, a list of ids, or 0 for none.
fn skill_ids(value: Option<Value>) -> Vec<i64> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_i64).collect(),
        Some(Value::Number(n)) => n.as_i64().filter(|id| *id != 0).into_iter().collect(),
        _ => Vec::new(),
    }
}

impl MetaUnit {
    /// Resolves a ship group record and everything keyed by its group id.
    pub fn resolve(group: RecordView<'_>, resolver: &Resolver<'_>) -> IResult<MetaUnit> {
        let group_id = group.id();
        let source = resolver.source();
        let hull_type: u32 = group.get(keys::TYPE)?;

        let mut variants: [Option<Rc<Unit>>; VARIANT_COUNT] = Default::default();
        let mut refit_target = None;
        for ship_id in resolver.group_members(group_id)? {
            let unit = resolver.unit(ship_id)?;
            match limit_break_stage(ship_id, group_id) {
                Some(stage) => variants[stage as usize] = Some(unit),
                None if refit_target.is_none() => refit_target = Some(unit),
                None => warn!("group {group_id}: ignoring extra refit target {ship_id}"),
            }
        }
        if variants[0].is_none() {
            return Err(failure_from_kind(ErrorKind::NotFound {
                table: Table::ShipTemplate,
                id: group_id * 10 + 1,
            }));
        }

        let fleet_tech = source
            .record(Table::FleetTech, group_id)
            .map(|record| FleetTech::from_record(RecordView::new(Table::FleetTech, group_id, record)))
            .transpose()?;

        let refit_record = source.record(Table::RefitTransform, group_id);
        let refit_nodes = match refit_record {
            Some(record) => {
                Self::resolve_refit_nodes(RecordView::new(Table::RefitTransform, group_id, record), resolver)?
            }
            None => Vec::new(),
        };

        let refit_hull: u32 = group.opt(keys::TRANS_TYPE)?.unwrap_or_default();
        let refit_kind = match (refit_record, refit_target.is_some()) {
            (None, false) => RefitKind::None,
            _ if refit_hull != 0 && refit_hull != hull_type => RefitKind::HullChange(refit_hull),
            _ => RefitKind::SameHull,
        };

        let research = match source.record(Table::ResearchGroup, group_id) {
            Some(record) if is_research_group(group_id) => {
                let view = RecordView::new(Table::ResearchGroup, group_id, record);
                let track = |field: &'static str| -> IResult<Vec<Rc<ResearchStrengthenNode>>> {
                    view.opt::<Vec<i64>>(field)?
                        .unwrap_or_default()
                        .into_iter()
                        .map(|id| resolver.research_node(id))
                        .collect()
                };
                Some(ResearchTracks {
                    main: track(keys::STRENGTHEN_EFFECT)?,
                    fate: track(keys::FATE_STRENGTHEN)?,
                })
            }
            _ => None,
        };

        debug!(
            "resolved meta unit {group_id}: {} variants, refit {refit_kind:?}, {} refit nodes",
            variants.iter().flatten().count(),
            refit_nodes.len()
        );

        Ok(MetaUnit {
            id: group_id,
            hull_type,
            refit_kind,
            refit_skills: skill_ids(group.opt(keys::TRANS_SKILL)?),
            nationality: Nation::from_id(group.get(keys::NATIONALITY)?),
            variants,
            refit_target,
            fleet_tech,
            refit_nodes,
            research,
            refit_gate: resolver.options().refit_gate(),
        })
    }

    /// Walks the refit screen columns, each a list of `(row, node id)` pairs.
    fn resolve_refit_nodes(view: RecordView<'_>, resolver: &Resolver<'_>) -> IResult<Vec<PlacedRefitNode>> {
        let columns: Vec<Vec<(i64, i64)>> = view.get(keys::TRANSFORM_LIST)?;
        if columns.len() > keys::TRANSFORM_COLUMNS {
            warn!(
                "refit tree {} has {} columns, expected at most {}",
                view.id(),
                columns.len(),
                keys::TRANSFORM_COLUMNS
            );
        }

        columns
            .iter()
            .enumerate()
            .flat_map(|(column, cells)| {
                cells.iter().map(move |&(row, node_id)| {
                    (node_id, GridCoordinate { row, column: column + 1 })
                })
            })
            .sorted_by_key(|(node_id, _)| *node_id)
            .map(|(node_id, coordinate)| -> IResult<PlacedRefitNode> {
                Ok(PlacedRefitNode {
                    node: resolver.refit_node(node_id)?,
                    coordinate,
                })
            })
            .collect()
    }

    /// Group id; concrete ship ids are this with the stage digit appended.
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn hull_type(&self) -> u32 {
        self.hull_type
    }

    /// Hull type after refit, the plain hull type when refit keeps it.
    pub fn refit_hull_type(&self) -> u32 {
        match self.refit_kind {
            RefitKind::HullChange(hull) => hull,
            _ => self.hull_type,
        }
    }

    pub fn refit_kind(&self) -> RefitKind {
        self.refit_kind
    }

    pub fn has_refit(&self) -> bool {
        !self.refit_kind.is_none()
    }

    pub fn refit_changes_hull(&self) -> bool {
        self.refit_kind.is_hull_change()
    }

    /// Skills gained by completing the refit.
    pub fn refit_skills(&self) -> &[i64] {
        &self.refit_skills
    }

    pub fn nationality(&self) -> &Recognized<Nation, u32> {
        &self.nationality
    }

    pub fn is_research(&self) -> bool {
        is_research_group(self.id)
    }

    pub fn is_collab(&self) -> bool {
        is_collab_group(self.id)
    }

    pub fn is_submarine(&self) -> bool {
        self.variants[0]
            .as_ref()
            .is_some_and(|unit| unit.is_submarine())
    }

    pub fn refit_target(&self) -> Option<&Unit> {
        self.refit_target.as_deref()
    }

    pub fn refit_nodes(&self) -> &[PlacedRefitNode] {
        &self.refit_nodes
    }

    pub fn research(&self) -> Option<&ResearchTracks> {
        self.research.as_ref()
    }

    pub fn fleet_tech(&self) -> Option<&FleetTech> {
        self.fleet_tech.as_ref()
    }

    /// The Unit of a limit-break stage.
    pub fn variant(&self, lb_level: u8) -> IResult<&Unit> {
        check_limit_break(lb_level)?;
        self.variants[lb_level as usize].as_deref().ok_or_else(|| {
            failure_from_kind(ErrorKind::NotFound {
                table: Table::ShipTemplate,
                id: self.id * 10 + lb_level as i64 + 1,
            })
        })
    }

    fn refit_applies(&self) -> bool {
        match self.refit_gate {
            RefitGate::TargetExists => self.refit_target.is_some(),
            RefitGate::HullChange => self.refit_changes_hull() && self.refit_target.is_some(),
        }
    }

    fn base_unit(&self, lb_level: u8, refit: bool) -> IResult<&Unit> {
        match &self.refit_target {
            Some(target) if refit && self.refit_applies() => Ok(target.as_ref()),
            _ => self.variant(lb_level),
        }
    }

    /// Level-scaled stat with every requested bonus, floored.
    ///
    /// Research ships take their strengthening from the main research track
    /// instead of the regular strengthening table.
    pub fn stat(
        &self,
        stat: Stat,
        level: u32,
        lb_level: u8,
        affinity_bonus_percent: u8,
        apply_refit_bonus: bool,
        apply_strengthen_bonus: bool,
    ) -> IResult<i64> {
        check_level(level)?;
        check_limit_break(lb_level)?;
        check_affinity(affinity_bonus_percent)?;

        let research = self.is_research();
        let unit = self.base_unit(lb_level, apply_refit_bonus)?;
        let mut value = unit.stat(stat, level, apply_strengthen_bonus && !research)?;

        if research && apply_strengthen_bonus {
            value += self.research_stat_bonus(stat);
        }
        value *= 1.0 + affinity_bonus_percent as f64 / 100.0;
        if apply_refit_bonus {
            value += self.refit_stat_bonus(stat);
        }

        Ok(value.floor() as i64)
    }

    /// [`Self::stat`] addressed by raw stat id.
    pub fn stat_by_id(
        &self,
        stat_id: u32,
        level: u32,
        lb_level: u8,
        affinity_bonus_percent: u8,
        apply_refit_bonus: bool,
        apply_strengthen_bonus: bool,
    ) -> IResult<i64> {
        self.stat(
            Stat::try_from(stat_id)?,
            level,
            lb_level,
            affinity_bonus_percent,
            apply_refit_bonus,
            apply_strengthen_bonus,
        )
    }

    /// Sum of every refit node's fully completed bonus to `stat`.
    pub fn refit_stat_bonus(&self, stat: Stat) -> f64 {
        self.refit_nodes
            .iter()
            .map(|placed| placed.node.stat_bonus_sum(stat))
            .sum()
    }

    /// Bonus to `stat` from the whole main research track.
    pub fn research_stat_bonus(&self, stat: Stat) -> f64 {
        self.research
            .iter()
            .flat_map(|tracks| &tracks.main)
            .map(|node| node.stat_bonus(stat))
            .sum()
    }

    /// Equipment proficiency a 1-based slot gains from the main research track.
    pub fn research_proficiency_bonus(&self, slot: usize) -> f64 {
        self.research
            .iter()
            .flat_map(|tracks| &tracks.main)
            .map(|node| node.proficiency_bonus(slot))
            .sum()
    }

    fn equipment_unit(&self, lb_level: u8, refit_bonus: bool) -> IResult<&Unit> {
        check_limit_break(lb_level)?;
        if refit_bonus && lb_level != MAX_LIMIT_BREAK {
            return Err(failure_from_kind(ErrorKind::InvalidState(
                "cannot apply modernization bonus without full limit break".to_owned(),
            )));
        }
        self.base_unit(lb_level, refit_bonus)
    }

    pub fn equip_proficiency(&self, slot: usize, lb_level: u8, refit_bonus: bool) -> IResult<f64> {
        let mut proficiency = self.equipment_unit(lb_level, refit_bonus)?.equipment_proficiency(slot)?;
        if refit_bonus {
            proficiency += self
                .refit_nodes
                .iter()
                .map(|placed| placed.node.proficiency_bonus_sum(slot))
                .sum::<f64>();
        }
        Ok(proficiency)
    }

    pub fn equip_base_count(&self, slot: usize, lb_level: u8, refit_bonus: bool) -> IResult<i64> {
        self.equipment_unit(lb_level, refit_bonus)?.equip_base(slot)
    }

    pub fn equip_types(&self, slot: usize, lb_level: u8, refit_bonus: bool) -> IResult<&[i64]> {
        self.equipment_unit(lb_level, refit_bonus)?.equip_types(slot)
    }

    /// Fleet tech points for obtaining (0), limit breaking (1) or leveling (2).
    pub fn fleet_tech_point(&self, stage: usize) -> IResult<Option<i64>> {
        ErrorKind::check_range("fleet tech point stage", stage as i64, 0, FLEET_TECH_POINT_STAGES as i64 - 1)?;
        Ok(self.fleet_tech.as_ref().and_then(|tech| tech.points[stage]))
    }

    /// Fleet tech stat bonus for obtaining (0) or leveling (1).
    pub fn fleet_stat_bonus(&self, stage: usize) -> IResult<Option<&FleetTechBonus>> {
        ErrorKind::check_range("fleet tech bonus stage", stage as i64, 0, FLEET_TECH_BONUS_STAGES as i64 - 1)?;
        Ok(self.fleet_tech.as_ref().and_then(|tech| tech.bonuses[stage].as_ref()))
    }

    pub fn ammo(&self, lb_level: u8) -> IResult<i64> {
        self.variant(lb_level)?.ammo()
    }

    pub fn oxygen(&self, lb_level: u8) -> IResult<i64> {
        self.variant(lb_level)?.oxygen()
    }

    pub fn hunting_range(&self, lb_level: u8) -> IResult<HuntingGrid> {
        self.variant(lb_level)?.hunting_range()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::game_params::resolver::ResolveOptions;
    use crate::game_params::unit::HuntingCell;
    use crate::test_support::*;

    #[test]
    fn collects_variants_and_refit_target() {
        let store = fixture_store();
        let resolver = Resolver::new(&store).unwrap();
        let cleveland = resolver.meta_unit(CLEVELAND_GROUP).unwrap();

        assert_eq!(cleveland.variant(0).unwrap().id(), CLEVELAND_LB0);
        assert_eq!(cleveland.variant(3).unwrap().id(), CLEVELAND_LB3);
        assert!(cleveland.variant(1).is_err());
        assert_eq!(cleveland.refit_target().map(Unit::id), Some(CLEVELAND_REFIT));
        assert_eq!(cleveland.refit_kind(), RefitKind::SameHull);
        assert!(cleveland.has_refit());
        assert_eq!(cleveland.refit_hull_type(), cleveland.hull_type());
        assert_eq!(cleveland.refit_skills(), &[2031]);
        assert!(cleveland.nationality().is(&Nation::EagleUnion));
        assert!(!cleveland.is_research() && !cleveland.is_collab());
    }

    #[test]
    fn refit_nodes_are_sorted_with_coordinates() {
        let store = fixture_store();
        let resolver = Resolver::new(&store).unwrap();
        let cleveland = resolver.meta_unit(CLEVELAND_GROUP).unwrap();

        let placed: Vec<_> = cleveland
            .refit_nodes()
            .iter()
            .map(|placed| (placed.node.id(), placed.coordinate))
            .collect();
        assert_eq!(
            placed,
            vec![
                (REFIT_NODE_FIREPOWER, GridCoordinate { row: 1, column: 2 }),
                (REFIT_NODE_PROFICIENCY, GridCoordinate { row: 2, column: 1 }),
            ]
        );
        assert_eq!(cleveland.refit_stat_bonus(Stat::Firepower), 10.0);
    }

    #[test]
    fn stat_combines_bonus_sources() {
        let store = fixture_store();
        let resolver = Resolver::new(&store).unwrap();
        let cleveland = resolver.meta_unit(CLEVELAND_GROUP).unwrap();

        // LB3 firepower at 100: 40 + 99 * 2
        assert_eq!(cleveland.stat(Stat::Firepower, 100, 3, 0, false, false).unwrap(), 238);
        // strengthening adds 40
        assert_eq!(cleveland.stat(Stat::Firepower, 100, 3, 0, false, true).unwrap(), 278);
        // affinity multiplies before refit: 278 * 1.06 = 294.68
        assert_eq!(cleveland.stat(Stat::Firepower, 100, 3, 6, false, true).unwrap(), 294);
        // refit target 50 + 99 * 2 + 40, then + 10 from the refit nodes
        assert_eq!(cleveland.stat(Stat::Firepower, 100, 3, 0, true, true).unwrap(), 298);
    }

    #[test]
    fn hull_change_gate_keeps_variant_base() {
        let store = fixture_store();
        let options = ResolveOptions::builder().refit_gate(RefitGate::HullChange).build();
        let resolver = Resolver::with_options(&store, options).unwrap();
        let cleveland = resolver.meta_unit(CLEVELAND_GROUP).unwrap();

        // same hull: base stays at LB3 (238 + 40), refit nodes still add 10
        assert_eq!(cleveland.stat(Stat::Firepower, 100, 3, 0, true, true).unwrap(), 288);
    }

    #[test]
    fn affinity_never_lowers_stats() {
        let store = fixture_store();
        let resolver = Resolver::new(&store).unwrap();
        let cleveland = resolver.meta_unit(CLEVELAND_GROUP).unwrap();

        for stat in Stat::ALL {
            let mut previous = i64::MIN;
            for affinity in 0..=12 {
                let value = cleveland.stat(stat, 80, 3, affinity, true, true).unwrap();
                assert!(value >= previous, "{stat} dropped at affinity {affinity}");
                previous = value;
            }
        }
    }

    #[test]
    fn out_of_range_arguments() {
        let store = fixture_store();
        let resolver = Resolver::new(&store).unwrap();
        let cleveland = resolver.meta_unit(CLEVELAND_GROUP).unwrap();

        let range = |result: IResult<i64>| matches!(result.unwrap_err().kind, ErrorKind::Range { .. });
        assert!(range(cleveland.stat_by_id(0, 50, 0, 0, false, false)));
        assert!(range(cleveland.stat_by_id(13, 50, 0, 0, false, false)));
        assert!(range(cleveland.stat(Stat::Luck, 0, 0, 0, false, false)));
        assert!(range(cleveland.stat(Stat::Luck, 121, 0, 0, false, false)));
        assert!(range(cleveland.stat(Stat::Luck, 50, 4, 0, false, false)));
        assert!(range(cleveland.stat(Stat::Luck, 50, 0, 13, false, false)));
        assert!(cleveland.fleet_tech_point(3).is_err());
        assert!(cleveland.fleet_stat_bonus(2).is_err());
    }

    #[test]
    fn equipment_with_refit_bonus() {
        let store = fixture_store();
        let resolver = Resolver::new(&store).unwrap();
        let cleveland = resolver.meta_unit(CLEVELAND_GROUP).unwrap();

        let err = cleveland.equip_proficiency(1, 2, true).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidState(_)));

        assert_eq!(cleveland.equip_proficiency(1, 3, false).unwrap(), 1.1);
        // refit target proficiency 1.15 plus 0.05 from the refit tree
        assert!((cleveland.equip_proficiency(1, 3, true).unwrap() - 1.2).abs() < 1e-9);
        assert_eq!(cleveland.equip_base_count(1, 0, false).unwrap(), 1);
        assert_eq!(cleveland.equip_types(1, 3, true).unwrap(), &[2]);
    }

    #[test]
    fn fleet_tech_lookup() {
        let store = fixture_store();
        let resolver = Resolver::new(&store).unwrap();
        let cleveland = resolver.meta_unit(CLEVELAND_GROUP).unwrap();

        assert_eq!(cleveland.fleet_tech_point(0).unwrap(), Some(8));
        assert_eq!(cleveland.fleet_tech_point(2).unwrap(), Some(17));
        let bonus = cleveland.fleet_stat_bonus(1).unwrap().unwrap();
        assert_eq!(bonus.stat, Stat::Firepower);
        assert_eq!(bonus.value, 1.0);
        assert_eq!(bonus.hull_types, vec![2, 3]);
        assert!(cleveland.fleet_stat_bonus(0).unwrap().is_none());
    }

    #[test]
    fn surface_ships_reject_submarine_accessors() {
        let store = fixture_store();
        let resolver = Resolver::new(&store).unwrap();
        let cleveland = resolver.meta_unit(CLEVELAND_GROUP).unwrap();

        assert!(!cleveland.is_submarine());
        assert!(matches!(cleveland.ammo(0).unwrap_err().kind, ErrorKind::Unsupported(_)));
        assert!(matches!(cleveland.oxygen(3).unwrap_err().kind, ErrorKind::Unsupported(_)));
    }

    #[test]
    fn research_submarine() {
        let store = fixture_store();
        let resolver = Resolver::new(&store).unwrap();
        let sub = resolver.meta_unit(RESEARCH_SUB_GROUP).unwrap();

        assert!(sub.is_research());
        assert!(sub.is_submarine());
        assert!(!sub.has_refit());
        assert!(sub.fleet_tech().is_none());
        assert_eq!(sub.fleet_tech_point(0).unwrap(), None);
        assert_eq!(sub.ammo(0).unwrap(), 3);
        assert_eq!(sub.oxygen(0).unwrap(), 180);
        assert_eq!(sub.hunting_range(0).unwrap()[3][4], HuntingCell::Level(1));

        let tracks = sub.research().unwrap();
        assert_eq!(tracks.main.len(), 2);
        assert_eq!(tracks.fate.len(), 1);
        assert_eq!(sub.research_proficiency_bonus(2), 0.05);

        // torpedo at level 1: 100, research track +5 +3, unit strengthening ignored
        assert_eq!(sub.stat(Stat::Torpedo, 1, 0, 0, false, true).unwrap(), 108);
        assert_eq!(sub.stat(Stat::Torpedo, 1, 0, 0, false, false).unwrap(), 100);
    }

    #[test]
    fn missing_stage_zero_is_not_found() {
        let store = fixture_store();
        let resolver = Resolver::new(&store).unwrap();
        let err = resolver.meta_unit(ORPHAN_GROUP).unwrap_err();

        assert!(matches!(err.kind, ErrorKind::NotFound { table: Table::ShipTemplate, .. }));
    }
}
