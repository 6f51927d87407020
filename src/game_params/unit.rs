use std::collections::BTreeMap;

use bon::Builder;
use tracing::warn;
use variantly::Variantly;

use crate::data::{Record, Table};
use crate::error::{ErrorKind, IResult, failure_from_kind};
use crate::game_types::{GROWTH_CAP_LEVEL, Nation, Stat, check_level};
use crate::recognized::Recognized;

use super::keys;
use super::record::RecordView;

pub type StatVector = [f64; 12];

/// Per-stat values of a ship's strengthening (enhancement) track.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Strengthening {
    bonus: BTreeMap<Stat, f64>,
    exp_needed: BTreeMap<Stat, i64>,
    exp_granted: BTreeMap<Stat, i64>,
}

impl Strengthening {
    /// Zips the three parallel sequences of a strengthening record against
    /// [`Stat::STRENGTHENABLE`].
    pub fn from_record(view: RecordView<'_>) -> IResult<Self> {
        let durability: Vec<f64> = view.get(keys::DURABILITY)?;
        let level_exp: Vec<i64> = view.get(keys::LEVEL_EXP)?;
        let attr_exp: Vec<i64> = view.get(keys::ATTR_EXP)?;

        Ok(Self {
            bonus: Stat::STRENGTHENABLE.into_iter().zip(durability).collect(),
            exp_needed: Stat::STRENGTHENABLE.into_iter().zip(level_exp).collect(),
            exp_granted: Stat::STRENGTHENABLE.into_iter().zip(attr_exp).collect(),
        })
    }

    /// Maximum strengthening bonus for `stat`, 0 for stats without one.
    pub fn bonus(&self, stat: Stat) -> f64 {
        self.bonus.get(&stat).copied().unwrap_or_default()
    }

    pub fn exp_needed(&self, stat: Stat) -> Option<i64> {
        self.exp_needed.get(&stat).copied()
    }

    /// Exp this ship grants to `stat` when used as strengthening fodder.
    pub fn exp_granted(&self, stat: Stat) -> Option<i64> {
        self.exp_granted.get(&stat).copied()
    }
}

/// One cell of a submarine's 7x7 hunting grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum HuntingCell {
    OutOfRange,
    /// Reachable from this hunting level onwards.
    Level(u8),
    /// The submarine's own position.
    Ship,
}

pub const HUNTING_GRID_SIZE: usize = 7;
/// Hunting range coordinates are stored with the grid's top-left cell at (4, 4).
const HUNTING_GRID_ORIGIN: i64 = 4;

pub type HuntingGrid = [[HuntingCell; HUNTING_GRID_SIZE]; HUNTING_GRID_SIZE];

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SubmarineStats {
    oxygen: i64,
    oxy_cost: i64,
    oxy_recovery: i64,
    ammo: i64,
    surface_duration: f64,
    hunting_range_level: i64,
    /// Cells unlocked at each hunting level, starting at level 1.
    hunting_range: Vec<Vec<(i64, i64)>>,
}

impl SubmarineStats {
    fn from_record(view: RecordView<'_>) -> IResult<Self> {
        Ok(Self {
            oxygen: view.get(keys::OXY_MAX)?,
            oxy_cost: view.get(keys::OXY_COST)?,
            oxy_recovery: view.get(keys::OXY_RECOVERY)?,
            ammo: view.get(keys::AMMO)?,
            surface_duration: view.get(keys::ATTACK_DURATION)?,
            hunting_range_level: view.get(keys::HUNTING_RANGE_LEVEL)?,
            hunting_range: view.get(keys::HUNTING_RANGE)?,
        })
    }

    pub fn oxygen(&self) -> i64 {
        self.oxygen
    }

    /// Oxygen consumed per second while submerged.
    pub fn oxy_cost(&self) -> i64 {
        self.oxy_cost
    }

    pub fn oxy_recovery(&self) -> i64 {
        self.oxy_recovery
    }

    pub fn ammo(&self) -> i64 {
        self.ammo
    }

    pub fn surface_duration(&self) -> f64 {
        self.surface_duration
    }

    pub fn hunting_range_level(&self) -> i64 {
        self.hunting_range_level
    }

    pub fn hunting_range(&self) -> &[Vec<(i64, i64)>] {
        &self.hunting_range
    }

    /// Renders the hunting range as a grid where each cell holds the hunting
    /// level that lists it. A cell listed twice keeps the later level. Levels
    /// past 255 are not rendered.
    pub fn hunting_range_grid(&self) -> HuntingGrid {
        let mut grid = [[HuntingCell::OutOfRange; HUNTING_GRID_SIZE]; HUNTING_GRID_SIZE];
        for (index, cells) in self.hunting_range.iter().enumerate() {
            let Ok(level) = u8::try_from(index + 1) else {
                let levels = self.hunting_range.len();
                warn!("hunting range has {levels} levels, rendering the first 255");
                break;
            };
            for &(x, y) in cells {
                let (row, col) = (x - HUNTING_GRID_ORIGIN, y - HUNTING_GRID_ORIGIN);
                let in_grid = |v: i64| (0..HUNTING_GRID_SIZE as i64).contains(&v);
                if !in_grid(row) || !in_grid(col) {
                    warn!("hunting range cell ({x}, {y}) lies outside the grid");
                    continue;
                }
                grid[row as usize][col as usize] = HuntingCell::Level(level);
            }
        }
        let center = HUNTING_GRID_SIZE / 2;
        grid[center][center] = HuntingCell::Ship;
        grid
    }
}

#[derive(Clone, Debug, PartialEq, Variantly)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum UnitKind {
    Surface,
    Submarine(SubmarineStats),
}

/// One concrete hull: a single limit-break stage or a refit target.
#[derive(Clone, Debug, PartialEq, Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Unit {
    id: i64,
    name: String,
    english_name: String,
    hull_type: u32,
    rarity: u32,
    star: u32,
    nationality: Recognized<Nation, u32>,
    attrs: StatVector,
    growth: StatVector,
    extra_growth: StatVector,
    equipment_proficiency: Vec<f64>,
    equip_base: Vec<i64>,
    preload_count: Vec<i64>,
    equip_types: [Vec<i64>; keys::EQUIP_SLOT_COUNT],
    default_equips: Vec<i64>,
    fixed_equips: Vec<i64>,
    depth_charges: Vec<i64>,
    skills: Vec<i64>,
    strengthen_id: i64,
    strengthening: Strengthening,
    kind: UnitKind,
}

fn stat_vector(view: &RecordView<'_>, field: &'static str) -> IResult<StatVector> {
    let values: Vec<f64> = view.get(field)?;
    let len = values.len();
    values
        .into_iter()
        .take(12)
        .collect::<Vec<_>>()
        .try_into()
        .map_err(|_| view.invalid(format!("`{field}` has {len} entries, expected 12")))
}

impl Unit {
    /// Resolves a ship from its statistics record, its template record, and
    /// the strengthening record its template points at.
    pub fn from_records(stats: &Record, template: &Record, strengthen: &Record) -> IResult<Unit> {
        let stats = RecordView::identify(Table::ShipStatistics, stats)?;
        let template = RecordView::new(Table::ShipTemplate, stats.id(), template);
        let strengthen_id: i64 = template.get(keys::STRENGTHEN_ID)?;
        let strengthen = RecordView::new(Table::ShipStrengthen, strengthen_id, strengthen);

        let equip_types = [1, 2, 3, 4, 5].map(|slot| {
            template.opt_dynamic::<Vec<i64>>(&format!("{}{slot}", keys::EQUIP_SLOT_PREFIX))
        });
        let [e1, e2, e3, e4, e5] = equip_types;
        let equip_types = [
            e1?.unwrap_or_default(),
            e2?.unwrap_or_default(),
            e3?.unwrap_or_default(),
            e4?.unwrap_or_default(),
            e5?.unwrap_or_default(),
        ];

        let oxygen: i64 = stats.opt(keys::OXY_MAX)?.unwrap_or_default();
        let kind = if oxygen != 0 {
            UnitKind::Submarine(SubmarineStats::from_record(stats)?)
        } else {
            UnitKind::Surface
        };

        Ok(Unit::builder()
            .id(stats.id())
            .name(stats.get(keys::NAME)?)
            .english_name(stats.get(keys::ENGLISH_NAME)?)
            .hull_type(stats.get(keys::TYPE)?)
            .rarity(stats.get(keys::RARITY)?)
            .star(stats.get(keys::STAR)?)
            .nationality(Nation::from_id(stats.get(keys::NATIONALITY)?))
            .attrs(stat_vector(&stats, keys::ATTRS)?)
            .growth(stat_vector(&stats, keys::ATTRS_GROWTH)?)
            .extra_growth(stat_vector(&stats, keys::ATTRS_GROWTH_EXTRA)?)
            .equipment_proficiency(stats.get(keys::EQUIPMENT_PROFICIENCY)?)
            .equip_base(stats.get(keys::BASE_LIST)?)
            .preload_count(stats.get(keys::PRELOAD_COUNT)?)
            .equip_types(equip_types)
            .default_equips(stats.get(keys::DEFAULT_EQUIP_LIST)?)
            .fixed_equips(stats.get(keys::FIX_EQUIP_LIST)?)
            .depth_charges(stats.opt(keys::DEPTH_CHARGE_LIST)?.unwrap_or_default())
            .skills(template.get(keys::BUFF_LIST_DISPLAY)?)
            .strengthen_id(strengthen_id)
            .strengthening(Strengthening::from_record(strengthen)?)
            .kind(kind)
            .build())
    }

    /// The stat at `level`, optionally including the maximum strengthening bonus.
    ///
    /// Base growth applies from level 1; above level 100 the extra growth
    /// vector adds on top of it.
    pub fn stat(&self, stat: Stat, level: u32, include_strengthen: bool) -> IResult<f64> {
        check_level(level)?;
        let i = stat.index();
        let mut value = self.attrs[i] + (level - 1) as f64 * self.growth[i] / 1000.0;
        if level > GROWTH_CAP_LEVEL {
            value += (level - GROWTH_CAP_LEVEL) as f64 * self.extra_growth[i] / 1000.0;
        }
        if include_strengthen {
            value += self.strengthening.bonus(stat);
        }

        Ok(value)
    }

    /// [`Self::stat`] addressed by raw stat id.
    pub fn stat_by_id(&self, stat_id: u32, level: u32, include_strengthen: bool) -> IResult<f64> {
        self.stat(Stat::try_from(stat_id)?, level, include_strengthen)
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name with the nation prefix, e.g. "USS Cleveland".
    pub fn english_name(&self) -> &str {
        &self.english_name
    }

    pub fn hull_type(&self) -> u32 {
        self.hull_type
    }

    /// 1 (common) through 6 (decisive).
    pub fn rarity(&self) -> u32 {
        self.rarity
    }

    pub fn star(&self) -> u32 {
        self.star
    }

    pub fn nationality(&self) -> &Recognized<Nation, u32> {
        &self.nationality
    }

    pub fn base_stats(&self) -> &StatVector {
        &self.attrs
    }

    pub fn growth(&self) -> &StatVector {
        &self.growth
    }

    pub fn extra_growth(&self) -> &StatVector {
        &self.extra_growth
    }

    /// Proficiency of a 1-based equipment slot.
    pub fn equipment_proficiency(&self, slot: usize) -> IResult<f64> {
        slot_entry(&self.equipment_proficiency, slot, "equipment proficiency slot").copied()
    }

    /// Mount count of a 1-based equipment slot.
    pub fn equip_base(&self, slot: usize) -> IResult<i64> {
        slot_entry(&self.equip_base, slot, "equipment base slot").copied()
    }

    /// Equipment types allowed in a 1-based slot (1..=5).
    pub fn equip_types(&self, slot: usize) -> IResult<&[i64]> {
        slot_entry(&self.equip_types, slot, "equipment type slot").map(Vec::as_slice)
    }

    pub fn preload_count(&self) -> &[i64] {
        &self.preload_count
    }

    /// Equipment used when a slot is left empty.
    pub fn default_equips(&self) -> &[i64] {
        &self.default_equips
    }

    pub fn fixed_equips(&self) -> &[i64] {
        &self.fixed_equips
    }

    pub fn depth_charges(&self) -> &[i64] {
        &self.depth_charges
    }

    pub fn skills(&self) -> &[i64] {
        &self.skills
    }

    pub fn strengthen_id(&self) -> i64 {
        self.strengthen_id
    }

    pub fn strengthening(&self) -> &Strengthening {
        &self.strengthening
    }

    pub fn kind(&self) -> &UnitKind {
        &self.kind
    }

    pub fn is_submarine(&self) -> bool {
        self.kind.is_submarine()
    }

    pub fn submarine(&self) -> IResult<&SubmarineStats> {
        match &self.kind {
            UnitKind::Submarine(stats) => Ok(stats),
            UnitKind::Surface => Err(failure_from_kind(ErrorKind::Unsupported(format!(
                "ship {} is not a submarine",
                self.id
            )))),
        }
    }

    pub fn oxygen(&self) -> IResult<i64> {
        self.submarine().map(SubmarineStats::oxygen)
    }

    pub fn ammo(&self) -> IResult<i64> {
        self.submarine().map(SubmarineStats::ammo)
    }

    pub fn hunting_range(&self) -> IResult<HuntingGrid> {
        self.submarine().map(SubmarineStats::hunting_range_grid)
    }
}

pub(crate) fn slot_entry<'a, T>(entries: &'a [T], slot: usize, what: &'static str) -> IResult<&'a T> {
    slot.checked_sub(1)
        .and_then(|index| entries.get(index))
        .ok_or_else(|| {
            failure_from_kind(ErrorKind::Range {
                what,
                value: slot as i64,
                min: 1,
                max: entries.len() as i64,
            })
        })
}
