/// In-memory [`ConfigSource`] implementation
pub mod store;

use std::fmt;

use crate::error::{ErrorKind, IResult, failure_from_kind};

pub use store::TableStore;

/// A raw table record: field name to scalar, array, or nested mapping.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// The configuration tables consumed by the resolvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Table {
    ShipStatistics,
    ShipTemplate,
    AttributeInfo,
    FleetTech,
    ShipGroup,
    RefitTransform,
    RefitEffect,
    ShipStrengthen,
    Weapon,
    Bullet,
    Barrage,
    Aircraft,
    Buff,
    Skill,
    SkillDisplay,
    ResearchGroup,
    ResearchStrengthen,
}

impl Table {
    pub const ALL: &[Table] = &[
        Self::ShipStatistics,
        Self::ShipTemplate,
        Self::AttributeInfo,
        Self::FleetTech,
        Self::ShipGroup,
        Self::RefitTransform,
        Self::RefitEffect,
        Self::ShipStrengthen,
        Self::Weapon,
        Self::Bullet,
        Self::Barrage,
        Self::Aircraft,
        Self::Buff,
        Self::Skill,
        Self::SkillDisplay,
        Self::ResearchGroup,
        Self::ResearchStrengthen,
    ];

    /// The table's file stem in the game's sharecfg dump.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ShipStatistics => "ship_data_statistics",
            Self::ShipTemplate => "ship_data_template",
            Self::AttributeInfo => "attribute_info_by_type",
            Self::FleetTech => "fleet_tech_ship_template",
            Self::ShipGroup => "ship_data_group",
            Self::RefitTransform => "ship_data_trans",
            Self::RefitEffect => "transform_data_template",
            Self::ShipStrengthen => "ship_data_strengthen",
            Self::Weapon => "weapon_property",
            Self::Bullet => "bullet_template",
            Self::Barrage => "barrage_template",
            Self::Aircraft => "aircraft_template",
            Self::Buff => "buff_template",
            Self::Skill => "skill_template",
            Self::SkillDisplay => "skill_data_template",
            Self::ResearchGroup => "ship_data_blueprint",
            Self::ResearchStrengthen => "ship_strengthen_blueprint",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|table| table.name() == name)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Keyed, read-only access to raw configuration records.
///
/// Loading the tables from disk is the implementor's concern; resolution only
/// ever reads through this trait.
pub trait ConfigSource {
    fn record(&self, table: Table, id: i64) -> Option<&Record>;

    /// All ids present in `table`, in ascending order.
    fn ids(&self, table: Table) -> Vec<i64>;

    fn get_record(&self, table: Table, id: i64) -> IResult<&Record> {
        self.record(table, id)
            .ok_or_else(|| failure_from_kind(ErrorKind::NotFound { table, id }))
    }

    fn contains(&self, table: Table, id: i64) -> bool {
        self.record(table, id).is_some()
    }
}
