use std::cell::RefCell;
use std::collections::HashMap;

use bon::Builder;
use tracing::{debug, trace};

use crate::Rc;
use crate::data::{ConfigSource, Table};
use crate::error::{ErrorKind, IResult, failure_from_kind};
use crate::game_types::is_filtered_ship_id;

use super::attributes::AttributeRegistry;
use super::barrage::Barrage;
use super::bullet::Bullet;
use super::effect::{RootBuff, Triggerable};
use super::keys;
use super::meta_unit::MetaUnit;
use super::record::RecordView;
use super::refit::{RefitNode, ResearchStrengthenNode};
use super::unit::Unit;
use super::weapon::{Aircraft, Weapon};

/// Which refit state replaces the limit-break variant as the base of a
/// modernized stat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RefitGate {
    /// Any refit target unit replaces the variant.
    #[default]
    TargetExists,
    /// Only a refit target with a different hull type replaces the variant.
    HullChange,
}

#[derive(Clone, Debug, Default, Builder)]
pub struct ResolveOptions {
    /// Memoize resolved entities by kind, id and level.
    #[builder(default)]
    cache: bool,
    #[builder(default)]
    refit_gate: RefitGate,
}

impl ResolveOptions {
    pub fn cache(&self) -> bool {
        self.cache
    }

    pub fn refit_gate(&self) -> RefitGate {
        self.refit_gate
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum EntityKind {
    Weapon,
    Bullet,
    Barrage,
    Aircraft,
    Skill,
    Buff,
    Unit,
    MetaUnit,
    RefitNode,
    ResearchNode,
}

impl EntityKind {
    const fn name(self) -> &'static str {
        match self {
            Self::Weapon => "weapon",
            Self::Bullet => "bullet",
            Self::Barrage => "barrage",
            Self::Aircraft => "aircraft",
            Self::Skill => "skill",
            Self::Buff => "buff",
            Self::Unit => "unit",
            Self::MetaUnit => "meta unit",
            Self::RefitNode => "refit node",
            Self::ResearchNode => "research node",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct EntityKey {
    kind: EntityKind,
    id: i64,
    /// Skill and buff level, 0 for level-independent entities.
    level: u32,
}

impl EntityKey {
    fn new(kind: EntityKind, id: i64) -> Self {
        Self { kind, id, level: 0 }
    }

    fn leveled(kind: EntityKind, id: i64, level: u32) -> Self {
        Self { kind, id, level }
    }
}

type Memo<T> = RefCell<HashMap<EntityKey, Rc<T>>>;

/// Pops the resolution path entry pushed by [`Resolver::enter`].
struct PathGuard<'r> {
    path: &'r RefCell<Vec<EntityKey>>,
}

impl Drop for PathGuard<'_> {
    fn drop(&mut self) {
        self.path.borrow_mut().pop();
    }
}

/// Resolves typed entities from the raw records of a [`ConfigSource`].
///
/// Every entity reachable from a requested one is resolved eagerly. Base
/// chains and effect trees that lead back to an entity still being resolved
/// fail with [`ErrorKind::CyclicReference`]; shared subtrees are fine.
pub struct Resolver<'a> {
    source: &'a dyn ConfigSource,
    options: ResolveOptions,
    attributes: AttributeRegistry,
    path: RefCell<Vec<EntityKey>>,
    group_index: RefCell<Option<HashMap<i64, Vec<i64>>>>,
    weapons: Memo<Weapon>,
    bullets: Memo<Bullet>,
    barrages: Memo<Barrage>,
    aircraft: Memo<Aircraft>,
    triggerables: Memo<Triggerable>,
    units: Memo<Unit>,
    meta_units: Memo<MetaUnit>,
    refit_nodes: Memo<RefitNode>,
    research_nodes: Memo<ResearchStrengthenNode>,
}

impl<'a> Resolver<'a> {
    pub fn new(source: &'a dyn ConfigSource) -> IResult<Self> {
        Self::with_options(source, ResolveOptions::default())
    }

    /// Builds a resolver, reading attribute names from the attribute table
    /// when the source has one.
    pub fn with_options(source: &'a dyn ConfigSource, options: ResolveOptions) -> IResult<Self> {
        let attributes = if source.ids(Table::AttributeInfo).is_empty() {
            debug!("no attribute table, using the standard stat names");
            AttributeRegistry::standard()
        } else {
            AttributeRegistry::from_source(source)?
        };

        Ok(Resolver {
            source,
            options,
            attributes,
            path: RefCell::default(),
            group_index: RefCell::default(),
            weapons: Memo::default(),
            bullets: Memo::default(),
            barrages: Memo::default(),
            aircraft: Memo::default(),
            triggerables: Memo::default(),
            units: Memo::default(),
            meta_units: Memo::default(),
            refit_nodes: Memo::default(),
            research_nodes: Memo::default(),
        })
    }

    pub fn source(&self) -> &'a dyn ConfigSource {
        self.source
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    pub fn attributes(&self) -> &AttributeRegistry {
        &self.attributes
    }

    fn enter(&self, key: EntityKey) -> IResult<PathGuard<'_>> {
        let mut path = self.path.borrow_mut();
        if path.contains(&key) {
            return Err(failure_from_kind(ErrorKind::CyclicReference {
                kind: key.kind.name(),
                id: key.id,
                level: key.level,
            }));
        }
        path.push(key);

        Ok(PathGuard { path: &self.path })
    }

    fn memoized<T>(
        &self,
        memo: &Memo<T>,
        key: EntityKey,
        build: impl FnOnce() -> IResult<T>,
    ) -> IResult<Rc<T>> {
        if self.options.cache {
            if let Some(hit) = memo.borrow().get(&key) {
                trace!("cache hit for {} {}", key.kind.name(), key.id);
                return Ok(Rc::clone(hit));
            }
        }

        let _guard = self.enter(key)?;
        let value = Rc::new(build()?);
        if self.options.cache {
            memo.borrow_mut().insert(key, Rc::clone(&value));
        }

        Ok(value)
    }

    fn view(&self, table: Table, id: i64) -> IResult<RecordView<'a>> {
        let record = self.source.get_record(table, id)?;
        Ok(RecordView::new(table, id, record))
    }

    /// Ship template ids belonging to a group, ascending. The group index
    /// covers every template and is built on first use.
    pub fn group_members(&self, group_id: i64) -> IResult<Vec<i64>> {
        if self.group_index.borrow().is_none() {
            let index = self.build_group_index()?;
            *self.group_index.borrow_mut() = Some(index);
        }

        Ok(self
            .group_index
            .borrow()
            .as_ref()
            .and_then(|index| index.get(&group_id))
            .cloned()
            .unwrap_or_default())
    }

    fn build_group_index(&self) -> IResult<HashMap<i64, Vec<i64>>> {
        let mut index: HashMap<i64, Vec<i64>> = HashMap::new();
        for ship_id in self.source.ids(Table::ShipTemplate) {
            if is_filtered_ship_id(ship_id) {
                continue;
            }
            let template = self.view(Table::ShipTemplate, ship_id)?;
            if let Some(group) = template.opt::<i64>(keys::GROUP_TYPE)? {
                index.entry(group).or_default().push(ship_id);
            }
        }
        debug!("indexed ship templates into {} groups", index.len());

        Ok(index)
    }

    pub fn barrage(&self, id: i64) -> IResult<Rc<Barrage>> {
        self.memoized(&self.barrages, EntityKey::new(EntityKind::Barrage, id), || {
            Barrage::from_record(self.view(Table::Barrage, id)?)
        })
    }

    pub fn bullet(&self, id: i64) -> IResult<Rc<Bullet>> {
        self.memoized(&self.bullets, EntityKey::new(EntityKind::Bullet, id), || {
            Bullet::from_record(self.view(Table::Bullet, id)?)
        })
    }

    pub fn weapon(&self, id: i64) -> IResult<Rc<Weapon>> {
        self.memoized(&self.weapons, EntityKey::new(EntityKind::Weapon, id), || {
            debug!("resolving weapon {id}");
            Weapon::resolve(self.view(Table::Weapon, id)?, self)
        })
    }

    pub fn aircraft(&self, id: i64) -> IResult<Rc<Aircraft>> {
        self.memoized(&self.aircraft, EntityKey::new(EntityKind::Aircraft, id), || {
            debug!("resolving aircraft {id}");
            Aircraft::resolve(self.view(Table::Aircraft, id)?, self)
        })
    }

    pub fn skill(&self, id: i64, level: u32) -> IResult<Rc<Triggerable>> {
        let key = EntityKey::leveled(EntityKind::Skill, id, level);
        self.memoized(&self.triggerables, key, || {
            Triggerable::resolve(self.view(Table::Skill, id)?, level, self)
        })
    }

    pub fn buff(&self, id: i64, level: u32) -> IResult<Rc<Triggerable>> {
        let key = EntityKey::leveled(EntityKind::Buff, id, level);
        self.memoized(&self.triggerables, key, || {
            Triggerable::resolve(self.view(Table::Buff, id)?, level, self)
        })
    }

    /// The skill shown in game for `skill_id`, rooted at the buff of the
    /// same id and resolved at the skill's maximum level.
    pub fn root_buff(&self, skill_id: i64) -> IResult<RootBuff> {
        debug!("resolving skill {skill_id}");
        RootBuff::resolve(self.view(Table::SkillDisplay, skill_id)?, self)
    }

    /// Resolves one concrete ship id with its template and strengthening.
    pub fn unit(&self, ship_id: i64) -> IResult<Rc<Unit>> {
        self.memoized(&self.units, EntityKey::new(EntityKind::Unit, ship_id), || {
            let stats = self.source.get_record(Table::ShipStatistics, ship_id)?;
            let template = self.view(Table::ShipTemplate, ship_id)?;
            let strengthen_id: i64 = template.get(keys::STRENGTHEN_ID)?;
            let strengthen = self.source.get_record(Table::ShipStrengthen, strengthen_id)?;

            Unit::from_records(stats, template.record(), strengthen)
        })
    }

    pub fn meta_unit(&self, group_id: i64) -> IResult<Rc<MetaUnit>> {
        self.memoized(&self.meta_units, EntityKey::new(EntityKind::MetaUnit, group_id), || {
            debug!("resolving meta unit {group_id}");
            MetaUnit::resolve(self.view(Table::ShipGroup, group_id)?, self)
        })
    }

    pub fn refit_node(&self, id: i64) -> IResult<Rc<RefitNode>> {
        self.memoized(&self.refit_nodes, EntityKey::new(EntityKind::RefitNode, id), || {
            RefitNode::from_record(self.view(Table::RefitEffect, id)?, &self.attributes)
        })
    }

    pub fn research_node(&self, id: i64) -> IResult<Rc<ResearchStrengthenNode>> {
        self.memoized(&self.research_nodes, EntityKey::new(EntityKind::ResearchNode, id), || {
            ResearchStrengthenNode::from_record(
                self.view(Table::ResearchStrengthen, id)?,
                &self.attributes,
            )
        })
    }
}
