//! Skill and buff effect trees.
//!
//! Skills and buffs reference each other through their effect lists: a skill
//! adds buffs and fires weapons, a buff adds further buffs, casts skills, and
//! applies damage over time. Resolution flattens the weapons and DOT effects
//! of a whole subtree onto its root.

use serde_json::Value;
use tracing::debug;
use variantly::Variantly;

use crate::Rc;
use crate::data::{Record, Table};
use crate::error::IResult;
use crate::game_types::SkillType;
use crate::recognized::Recognized;

use super::keys;
use super::record::{RecordView, display_value};
use super::resolver::Resolver;
use super::weapon::Weapon;

/// Highest `$n` placeholder substituted in skill descriptions.
const MAX_DESCRIPTION_PARAMS: usize = 9;

#[derive(Clone, Debug, PartialEq, Variantly)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TriggerableKind {
    Skill,
    /// A buff and its icon id.
    Buff(Option<i64>),
}

/// An entry of an effect list this crate follows.
#[derive(Clone, Debug, PartialEq, Variantly)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Effect {
    AddBuff(i64),
    CastSkill(i64),
    /// Casts one skill picked at random from the list.
    CastRandomSkill(Vec<i64>),
    Fire(i64),
    Dot(Value),
}

impl Effect {
    /// Parses one effect list entry, `None` for effects without a child
    /// reference (stat buffs, shields, triggers and so on).
    fn parse(owner: &RecordView<'_>, is_skill: bool, entry: &Record) -> IResult<Option<Effect>> {
        let entry = RecordView::new(owner.table(), owner.id(), entry);
        let tag: String = entry.get(keys::TYPE)?;
        let args = || entry.nested(keys::ARG_LIST).ok_or_else(|| entry.missing(keys::ARG_LIST));

        let effect = match (is_skill, tag.as_str()) {
            (true, "BattleSkillAddBuff") | (false, "BattleBuffAddBuff") => {
                Effect::AddBuff(args()?.get(keys::BUFF_ID)?)
            }
            (true, "BattleSkillFire") => Effect::Fire(args()?.get(keys::FIRE_WEAPON_ID)?),
            (false, "BattleBuffCastSkill") => Effect::CastSkill(args()?.get(keys::SKILL_ID)?),
            (false, "BattleBuffCastSkillRandom") => {
                Effect::CastRandomSkill(args()?.get(keys::SKILL_ID_LIST)?)
            }
            (false, "BattleBuffDOT") => {
                Effect::Dot(entry.raw(keys::ARG_LIST).cloned().unwrap_or(Value::Null))
            }
            (_, other) => {
                debug!("{} {}: ignoring effect {other}", owner.table(), owner.id());
                return Ok(None);
            }
        };

        Ok(Some(effect))
    }
}

/// A resolved skill or buff at one level, with its subtree flattened.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Triggerable {
    id: i64,
    name: String,
    description: String,
    level: u32,
    kind: TriggerableKind,
    effects: Vec<Effect>,
    child_buffs: Vec<Rc<Triggerable>>,
    child_skills: Vec<Rc<Triggerable>>,
    /// Weapons fired by this node and everything beneath it.
    weapons: Vec<Rc<Weapon>>,
    dot_effects: Vec<Value>,
}

impl Triggerable {
    /// Resolves a skill (`skill_template`) or buff (`buff_template`) record.
    ///
    /// A `"<level>"` sub-record with its own effect list overrides the
    /// top-level list.
    pub fn resolve(view: RecordView<'_>, level: u32, resolver: &Resolver<'_>) -> IResult<Triggerable> {
        let is_skill = view.table() == Table::Skill;
        let kind = if is_skill {
            TriggerableKind::Skill
        } else {
            TriggerableKind::Buff(view.opt(keys::ICON)?)
        };

        let entries: Vec<Record> = match view.nested(&level.to_string()) {
            Some(leveled) if leveled.has(keys::EFFECT_LIST) => leveled.get(keys::EFFECT_LIST)?,
            _ => view.opt(keys::EFFECT_LIST)?.unwrap_or_default(),
        };

        let mut effects = Vec::new();
        for entry in &entries {
            if let Some(effect) = Effect::parse(&view, is_skill, entry)? {
                effects.push(effect);
            }
        }

        let mut child_buffs = Vec::new();
        let mut child_skills = Vec::new();
        let mut weapons = Vec::new();
        let mut dot_effects = Vec::new();
        for effect in &effects {
            match effect {
                Effect::AddBuff(id) => child_buffs.push(resolver.buff(*id, level)?),
                Effect::CastSkill(id) => child_skills.push(resolver.skill(*id, level)?),
                Effect::CastRandomSkill(ids) => {
                    for id in ids {
                        child_skills.push(resolver.skill(*id, level)?);
                    }
                }
                Effect::Fire(id) => weapons.push(resolver.weapon(*id)?),
                Effect::Dot(args) => dot_effects.push(args.clone()),
            }
        }

        for child in child_buffs.iter().chain(&child_skills) {
            weapons.extend(child.weapons.iter().cloned());
            dot_effects.extend(child.dot_effects.iter().cloned());
        }

        debug!(
            "resolved {} {} at level {level}: {} buffs, {} skills, {} weapons",
            view.table(),
            view.id(),
            child_buffs.len(),
            child_skills.len(),
            weapons.len()
        );

        Ok(Triggerable {
            id: view.id(),
            name: view.opt(keys::NAME)?.unwrap_or_default(),
            description: view.opt(keys::DESC)?.unwrap_or_default(),
            level,
            kind,
            effects,
            child_buffs,
            child_skills,
            weapons,
            dot_effects,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn kind(&self) -> &TriggerableKind {
        &self.kind
    }

    pub fn icon(&self) -> Option<i64> {
        match self.kind {
            TriggerableKind::Buff(icon) => icon,
            TriggerableKind::Skill => None,
        }
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn child_buffs(&self) -> &[Rc<Triggerable>] {
        &self.child_buffs
    }

    pub fn child_skills(&self) -> &[Rc<Triggerable>] {
        &self.child_skills
    }

    pub fn weapons(&self) -> &[Rc<Weapon>] {
        &self.weapons
    }

    pub fn contains_weapons(&self) -> bool {
        !self.weapons.is_empty()
    }

    /// Raw argument lists of every DOT effect in the subtree.
    pub fn dot_effects(&self) -> &[Value] {
        &self.dot_effects
    }

    pub fn is_leaf(&self) -> bool {
        self.child_buffs.is_empty() && self.child_skills.is_empty()
    }
}

/// A ship skill as shown in game: the display record plus the buff tree it
/// roots, resolved at the skill's maximum level.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RootBuff {
    id: i64,
    name: String,
    description: String,
    unlock_description: String,
    skill_type: Recognized<SkillType>,
    max_level: u32,
    buff: Rc<Triggerable>,
}

impl RootBuff {
    pub fn resolve(display: RecordView<'_>, resolver: &Resolver<'_>) -> IResult<RootBuff> {
        let max_level: u32 = display.get(keys::MAX_LEVEL)?;
        let buff = resolver.buff(display.id(), max_level)?;

        let template: String = display.get(keys::DESC)?;
        let params: Vec<Value> = display.opt(keys::DESC_ADD)?.unwrap_or_default();

        Ok(RootBuff {
            id: display.id(),
            name: display.get(keys::NAME)?,
            description: fill_description(&template, &params, max_level),
            unlock_description: display.opt(keys::DESC_GET)?.unwrap_or_default(),
            skill_type: Recognized::from_code(display.get(keys::TYPE)?),
            max_level,
            buff,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description with each `$n` replaced by "<level 1 value> (<max level value>)".
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Text shown when the skill is first unlocked.
    pub fn unlock_description(&self) -> &str {
        &self.unlock_description
    }

    pub fn skill_type(&self) -> &Recognized<SkillType> {
        &self.skill_type
    }

    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    pub fn buff(&self) -> &Triggerable {
        &self.buff
    }

    pub fn weapons(&self) -> &[Rc<Weapon>] {
        self.buff.weapons()
    }

    pub fn dot_effects(&self) -> &[Value] {
        self.buff.dot_effects()
    }

    pub fn is_leaf(&self) -> bool {
        self.buff.is_leaf()
    }
}

/// Substitutes `$1` through `$9` with the first and max-level values of the
/// matching `desc_add` entry.
fn fill_description(template: &str, params: &[Value], max_level: u32) -> String {
    let mut description = template.to_owned();
    for (index, per_level) in params.iter().enumerate().take(MAX_DESCRIPTION_PARAMS) {
        let value_at = |level: usize| per_level.get(level).and_then(|values| values.get(0));
        let (Some(first), Some(last)) = (value_at(0), value_at((max_level as usize).saturating_sub(1))) else {
            debug!("description parameter ${} has no value for level 1 or {max_level}", index + 1);
            continue;
        };
        description = description.replace(
            &format!("${}", index + 1),
            &format!("{} ({})", display_value(first), display_value(last)),
        );
    }
    description
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;
    use crate::game_params::resolver::ResolveOptions;
    use crate::test_support::*;

    #[test]
    fn fills_description_parameters() {
        let params = vec![
            json!([["5.0%"], ["7.5%"], ["10.0%"]]),
            json!([[10], [15], [20]]),
        ];
        let filled = fill_description("Every $2s: +$1 firepower ($1)", &params, 3);
        assert_eq!(filled, "Every 10 (20)s: +5.0% (10.0%) firepower (5.0% (10.0%))");
    }

    #[test]
    fn incomplete_parameters_are_left_in_place() {
        let params = vec![json!([["1%"]])];
        assert_eq!(fill_description("+$1", &params, 10), "+$1");
    }

    #[test]
    fn skill_tree_flattens_weapons_and_dots() {
        let store = fixture_store();
        let resolver = Resolver::new(&store).unwrap();
        let root = resolver.root_buff(ROOT_SKILL_ID).unwrap();

        assert_eq!(root.max_level(), 10);
        assert!(root.skill_type().is(&SkillType::Offense));
        assert_eq!(root.description(), "Fires a special barrage: 20% (40%) damage.");
        assert_eq!(root.unlock_description(), "Unlocked!");
        assert!(!root.is_leaf());

        let buff = root.buff();
        assert_eq!(buff.level(), 10);
        assert_eq!(buff.icon(), Some(ROOT_SKILL_ID));
        // the skill fires GUN_ID, the buff it adds fires GUN_ID again
        let weapon_ids: Vec<_> = root.weapons().iter().map(|w| w.id()).collect();
        assert_eq!(weapon_ids, vec![GUN_ID, GUN_ID]);
        assert_eq!(root.dot_effects(), &[json!({"number": 30, "time": 6})]);
    }

    #[test]
    fn level_specific_effect_lists_win() {
        let store = fixture_store();
        let resolver = Resolver::new(&store).unwrap();

        let low = resolver.skill(FIRE_SKILL_ID, 1).unwrap();
        let high = resolver.skill(FIRE_SKILL_ID, 10).unwrap();
        assert_eq!(low.effects(), &[Effect::Fire(GUN_ID), Effect::AddBuff(DOT_BUFF_ID)]);
        assert_eq!(high.effects(), &[Effect::Fire(GUN_ID), Effect::AddBuff(WEAPON_BUFF_ID)]);
        assert!(high.kind().is_skill());
    }

    #[test]
    fn leaves_have_no_children() {
        let store = fixture_store();
        let resolver = Resolver::new(&store).unwrap();
        let dot = resolver.buff(DOT_BUFF_ID, 1).unwrap();

        assert!(dot.is_leaf());
        assert!(!dot.contains_weapons());
        assert_eq!(dot.dot_effects().len(), 1);
    }

    #[test]
    fn repeated_children_each_contribute() {
        let store = fixture_store();
        for cache in [false, true] {
            let options = ResolveOptions::builder().cache(cache).build();
            let resolver = Resolver::with_options(&store, options).unwrap();

            for buff_id in [TWIN_CAST_BUFF_ID, RANDOM_CAST_BUFF_ID] {
                let buff = resolver.buff(buff_id, 1).unwrap();
                assert_eq!(buff.child_skills().len(), 2);
                assert!(buff.child_skills().iter().all(|s| s.id() == SECOND_FIRE_SKILL_ID));
                let weapon_ids: Vec<_> = buff.weapons().iter().map(|w| w.id()).collect();
                assert_eq!(weapon_ids, vec![GUN_ID, GUN_ID]);
            }

            let random = resolver.buff(RANDOM_CAST_BUFF_ID, 1).unwrap();
            assert_eq!(
                random.effects(),
                &[Effect::CastRandomSkill(vec![SECOND_FIRE_SKILL_ID, SECOND_FIRE_SKILL_ID])]
            );
        }
    }
}
