//! Game concept types shared by every resolver: stat ids, projectile
//! categories, nations, and the id conventions the tables rely on.

use std::fmt;

use crate::error::{ErrorKind, IResult, failure_from_kind};
use crate::recognized::{FromCode, Recognized};

// =============================================================================
// Progression bounds
// =============================================================================

pub const MIN_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 120;
/// Last level covered by the base growth curve; extra growth applies above it.
pub const GROWTH_CAP_LEVEL: u32 = 100;
pub const MAX_LIMIT_BREAK: u8 = 3;
pub const MAX_AFFINITY_BONUS: u8 = 12;

pub fn check_level(level: u32) -> IResult<()> {
    ErrorKind::check_range("level", level as i64, MIN_LEVEL as i64, MAX_LEVEL as i64)
}

pub fn check_limit_break(lb_level: u8) -> IResult<()> {
    ErrorKind::check_range("limit break level", lb_level as i64, 0, MAX_LIMIT_BREAK as i64)
}

pub fn check_affinity(affinity_bonus_percent: u8) -> IResult<()> {
    ErrorKind::check_range(
        "affinity bonus percent",
        affinity_bonus_percent as i64,
        0,
        MAX_AFFINITY_BONUS as i64,
    )
}

// =============================================================================
// Stats
// =============================================================================

/// One of the twelve stat slots. The discriminant is the table's stat id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Stat {
    Durability = 1,
    Firepower = 2,
    Torpedo = 3,
    AntiAir = 4,
    Aviation = 5,
    Reload = 6,
    Armor = 7,
    Accuracy = 8,
    Evasion = 9,
    Speed = 10,
    Luck = 11,
    AntiSubmarine = 12,
}

impl Stat {
    pub const ALL: [Stat; 12] = [
        Self::Durability,
        Self::Firepower,
        Self::Torpedo,
        Self::AntiAir,
        Self::Aviation,
        Self::Reload,
        Self::Armor,
        Self::Accuracy,
        Self::Evasion,
        Self::Speed,
        Self::Luck,
        Self::AntiSubmarine,
    ];

    /// Stats raised by the strengthening (enhancement) system, in table order.
    pub const STRENGTHENABLE: [Stat; 5] = [
        Self::Firepower,
        Self::Torpedo,
        Self::AntiAir,
        Self::Aviation,
        Self::Reload,
    ];

    pub const fn id(self) -> u32 {
        self as u32
    }

    /// Zero-based position in the per-ship stat vectors.
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    pub fn from_id(id: i64) -> Option<Self> {
        Self::ALL.iter().copied().find(|stat| stat.id() as i64 == id)
    }

    /// The attribute key used by the attribute registry.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Durability => "durability",
            Self::Firepower => "cannon",
            Self::Torpedo => "torpedo",
            Self::AntiAir => "antiaircraft",
            Self::Aviation => "air",
            Self::Reload => "reload",
            Self::Armor => "armor",
            Self::Accuracy => "hit",
            Self::Evasion => "dodge",
            Self::Speed => "speed",
            Self::Luck => "luck",
            Self::AntiSubmarine => "antisub",
        }
    }
}

impl TryFrom<u32> for Stat {
    type Error = crate::error::Error;

    fn try_from(id: u32) -> IResult<Self> {
        Self::from_id(id as i64).ok_or_else(|| {
            failure_from_kind(ErrorKind::Range {
                what: "stat id",
                value: id as i64,
                min: 1,
                max: 12,
            })
        })
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// =============================================================================
// Armament categories
// =============================================================================

/// Target armor class. Numbered from 1 in every public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ArmorType {
    Light = 1,
    Medium = 2,
    Heavy = 3,
}

impl ArmorType {
    pub const ALL: [ArmorType; 3] = [Self::Light, Self::Medium, Self::Heavy];

    /// Position in a bullet's zero-based modifier array.
    pub const fn index(self) -> usize {
        self as usize - 1
    }
}

impl TryFrom<u32> for ArmorType {
    type Error = crate::error::Error;

    fn try_from(value: u32) -> IResult<Self> {
        match value {
            1 => Ok(Self::Light),
            2 => Ok(Self::Medium),
            3 => Ok(Self::Heavy),
            other => Err(failure_from_kind(ErrorKind::Range {
                what: "armor type",
                value: other as i64,
                min: 1,
                max: 3,
            })),
        }
    }
}

/// How a bullet travels and is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BulletType {
    Normal,
    Parabolic,
    Torpedo,
}

impl FromCode for BulletType {
    fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Normal),
            2 => Some(Self::Parabolic),
            3 => Some(Self::Torpedo),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AmmoType {
    Normal,
    ArmorPiercing,
    HighExplosive,
    Torpedo,
}

impl FromCode for AmmoType {
    fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Normal),
            2 => Some(Self::ArmorPiercing),
            3 => Some(Self::HighExplosive),
            4 => Some(Self::Torpedo),
            _ => None,
        }
    }
}

/// What a weapon spawns when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SpawnType {
    Cannon,
    AntiAircraft,
    Torpedo,
    Plane,
}

impl SpawnType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "cannon" => Some(Self::Cannon),
            "antiaircraft" => Some(Self::AntiAircraft),
            "torpedo" => Some(Self::Torpedo),
            "plane" => Some(Self::Plane),
            _ => None,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Cannon => "cannon",
            Self::AntiAircraft => "antiaircraft",
            Self::Torpedo => "torpedo",
            Self::Plane => "plane",
        }
    }

    /// Whether the weapon's raw damage is counted per projectile.
    pub const fn deals_direct_damage(&self) -> bool {
        matches!(self, Self::Cannon | Self::Torpedo)
    }
}

/// Display category of a ship skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SkillType {
    Offense,
    Defense,
    Support,
}

impl FromCode for SkillType {
    fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Offense),
            2 => Some(Self::Defense),
            3 => Some(Self::Support),
            _ => None,
        }
    }
}

// =============================================================================
// Nations
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Nation {
    Universal,
    EagleUnion,
    RoyalNavy,
    SakuraEmpire,
    IronBlood,
    DragonEmpery,
    SardegnaEmpire,
    NorthernParliament,
    IrisLibre,
    VichyaDominion,
    IrisOrthodoxy,
    KingdomOfTulipa,
    Tempesta,
    Meta,
    Bulin,
    CollabNeptunia,
    CollabBilibili,
    CollabUtawarerumono,
    CollabKizunaAi,
    CollabHololive,
    CollabVenusVacation,
    CollabIdolmaster,
    CollabSsss,
    CollabAtelierRyza,
    CollabSenranKagura,
}

/// Nation id to nation, in table order.
static NATIONS: &[(u32, Nation)] = &[
    (0, Nation::Universal),
    (1, Nation::EagleUnion),
    (2, Nation::RoyalNavy),
    (3, Nation::SakuraEmpire),
    (4, Nation::IronBlood),
    (5, Nation::DragonEmpery),
    (6, Nation::SardegnaEmpire),
    (7, Nation::NorthernParliament),
    (8, Nation::IrisLibre),
    (9, Nation::VichyaDominion),
    (10, Nation::IrisOrthodoxy),
    (11, Nation::KingdomOfTulipa),
    (96, Nation::Tempesta),
    (97, Nation::Meta),
    (98, Nation::Bulin),
    (101, Nation::CollabNeptunia),
    (102, Nation::CollabBilibili),
    (103, Nation::CollabUtawarerumono),
    (104, Nation::CollabKizunaAi),
    (105, Nation::CollabHololive),
    (106, Nation::CollabVenusVacation),
    (107, Nation::CollabIdolmaster),
    (108, Nation::CollabSsss),
    (109, Nation::CollabAtelierRyza),
    (110, Nation::CollabSenranKagura),
];

impl Nation {
    pub fn from_id(id: u32) -> Recognized<Self, u32> {
        NATIONS
            .iter()
            .find(|(nation_id, _)| *nation_id == id)
            .map(|(_, nation)| Recognized::Known(*nation))
            .unwrap_or(Recognized::Unknown(id))
    }

    pub fn id(&self) -> u32 {
        NATIONS
            .iter()
            .find(|(_, nation)| nation == self)
            .map(|(id, _)| *id)
            .unwrap_or_default()
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Universal => "Universal",
            Self::EagleUnion => "Eagle Union",
            Self::RoyalNavy => "Royal Navy",
            Self::SakuraEmpire => "Sakura Empire",
            Self::IronBlood => "Iron Blood",
            Self::DragonEmpery => "Dragon Empery",
            Self::SardegnaEmpire => "Sardegna Empire",
            Self::NorthernParliament => "Northern Parliament",
            Self::IrisLibre => "Iris Libre",
            Self::VichyaDominion => "Vichya Dominion",
            Self::IrisOrthodoxy => "Iris Orthodoxy",
            Self::KingdomOfTulipa => "Kingdom of Tulipa",
            Self::Tempesta => "Tempesta",
            Self::Meta => "META",
            Self::Bulin => "Bulin",
            Self::CollabNeptunia => "Neptunia",
            Self::CollabBilibili => "Bilibili",
            Self::CollabUtawarerumono => "Utawarerumono",
            Self::CollabKizunaAi => "Kizuna AI",
            Self::CollabHololive => "Hololive",
            Self::CollabVenusVacation => "Venus Vacation",
            Self::CollabIdolmaster => "Idolm@ster",
            Self::CollabSsss => "SSSS",
            Self::CollabAtelierRyza => "Atelier Ryza",
            Self::CollabSenranKagura => "Senran Kagura",
        }
    }
}

impl fmt::Display for Nation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Display name for a nation id, `None` for ids missing from the table.
pub fn nation_name(id: u32) -> Option<&'static str> {
    Nation::from_id(id).into_known().map(|nation| nation.name())
}

// =============================================================================
// Id conventions
// =============================================================================

/// Group (meta ship) id of a concrete ship id: the ship id without its last digit.
pub fn meta_id(ship_id: i64) -> i64 {
    ship_id / 10
}

/// Limit-break stage encoded in a ship id's last digit, if it follows the
/// `<group><1..=4>` pattern of `group_id`.
pub fn limit_break_stage(ship_id: i64, group_id: i64) -> Option<u8> {
    if meta_id(ship_id) != group_id {
        return None;
    }
    match ship_id % 10 {
        digit @ 1..=4 => Some(digit as u8 - 1),
        _ => None,
    }
}

/// Ids reserved for enemy-only and event placeholder ships.
pub fn is_filtered_ship_id(ship_id: i64) -> bool {
    (900_000..=901_000).contains(&ship_id)
}

pub fn is_research_group(group_id: i64) -> bool {
    group_id > 20_000
}

pub fn is_collab_group(group_id: i64) -> bool {
    group_id > 10_000 && group_id < 20_000
}
