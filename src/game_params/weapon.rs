use itertools::Itertools;
use tracing::debug;
use variantly::Variantly;

use crate::Rc;
use crate::data::Table;
use crate::error::IResult;
use crate::game_types::{AmmoType, ArmorType, BulletType, SpawnType};
use crate::recognized::Recognized;

use super::barrage::Barrage;
use super::bullet::Bullet;
use super::keys;
use super::record::RecordView;
use super::resolver::Resolver;

/// Divisor turning `reload_max` into seconds between volleys.
fn reload_divisor() -> f64 {
    12.0 * 157f64.sqrt()
}

/// What a weapon launches: a bullet, or for carrier weapons an aircraft.
#[derive(Clone, Debug, PartialEq, Variantly)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Projectile {
    Bullet(Rc<Bullet>),
    Aircraft(Rc<Aircraft>),
}

impl Projectile {
    pub fn id(&self) -> i64 {
        match self {
            Projectile::Bullet(bullet) => bullet.id(),
            Projectile::Aircraft(aircraft) => aircraft.id(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Weapon {
    id: i64,
    name: String,
    spawn_type: SpawnType,
    base: Option<Rc<Weapon>>,
    barrages: Vec<Rc<Barrage>>,
    barrage_ids: Vec<i64>,
    projectiles: Vec<Projectile>,
    bullet_ids: Vec<i64>,
    same_bullet: bool,
    weapon_type: i64,
    damage: f64,
    /// Id of the attribute that scales this weapon's damage.
    modifier_stat: i64,
    /// Fraction of `modifier_stat` applied.
    modifier_ratio: f64,
    reload_max: f64,
    range: f64,
    angle: f64,
    coefficient: f64,
}

/// An own id list if non-empty, else the base's, else empty when the field
/// is present, else missing.
fn inherited_ids<B>(
    view: &RecordView<'_>,
    field: &'static str,
    base: Option<&B>,
    inherit: impl FnOnce(&B) -> Vec<i64>,
) -> IResult<Vec<i64>> {
    let own: Option<Vec<i64>> = view.opt(field)?;
    match (own, base) {
        (Some(ids), _) if !ids.is_empty() => Ok(ids),
        (_, Some(base)) => Ok(inherit(base)),
        (Some(ids), None) => Ok(ids),
        (None, None) => Err(view.missing(field)),
    }
}

impl Weapon {
    /// Resolves a weapon record, its base chain, and every barrage and
    /// projectile it fires.
    pub fn resolve(view: RecordView<'_>, resolver: &Resolver<'_>) -> IResult<Weapon> {
        let base_weapon = view
            .opt::<i64>(keys::BASE)?
            .map(|base_id| resolver.weapon(base_id))
            .transpose()?;
        let base = base_weapon.as_deref();

        let spawn_type = match view.opt::<String>(keys::SPAWN_BOUND)? {
            Some(name) => SpawnType::from_name(&name)
                .ok_or_else(|| view.invalid(format!("unknown spawn type {name:?}")))?,
            None => base
                .map(|base| base.spawn_type)
                .ok_or_else(|| view.missing(keys::SPAWN_BOUND))?,
        };

        let barrage_ids = inherited_ids(&view, keys::BARRAGE_ID, base, |b| b.barrage_ids.clone())?;
        let bullet_ids = inherited_ids(&view, keys::BULLET_ID, base, |b| b.bullet_ids.clone())?;

        let own_barrages: Vec<i64> = view.opt(keys::BARRAGE_ID)?.unwrap_or_default();
        let barrages = match base {
            Some(base) if own_barrages.is_empty() => base.barrages.clone(),
            _ => own_barrages
                .iter()
                .map(|&id| resolver.barrage(id))
                .collect::<IResult<Vec<_>>>()?,
        };

        let own_bullets: Vec<i64> = view.opt(keys::BULLET_ID)?.unwrap_or_default();
        let projectiles = match spawn_type {
            SpawnType::Plane => Self::resolve_aircraft(view, resolver, &own_bullets, base)?,
            _ => match base {
                Some(base) if own_bullets.is_empty() => base.projectiles.clone(),
                _ => own_bullets
                    .iter()
                    .map(|&id| resolver.bullet(id).map(Projectile::Bullet))
                    .collect::<IResult<Vec<_>>>()?,
            },
        };

        let same_bullet = bullet_ids.iter().all_equal();

        let modifier_ratio = match view.opt::<f64>(keys::ATTACK_ATTRIBUTE_RATIO)? {
            Some(percent) => percent / 100.0,
            None => base
                .map(|base| base.modifier_ratio)
                .ok_or_else(|| view.missing(keys::ATTACK_ATTRIBUTE_RATIO))?,
        };

        Ok(Weapon {
            id: view.id(),
            name: view.get_or_inherit(keys::NAME, base, |b| b.name.clone())?,
            spawn_type,
            barrages,
            barrage_ids,
            projectiles,
            bullet_ids,
            same_bullet,
            weapon_type: view.get_or_inherit(keys::TYPE, base, |b| b.weapon_type)?,
            damage: view.get_or_inherit(keys::DAMAGE, base, |b| b.damage)?,
            modifier_stat: view.get_or_inherit(keys::ATTACK_ATTRIBUTE, base, |b| b.modifier_stat)?,
            modifier_ratio,
            reload_max: view.get_or_inherit(keys::RELOAD_MAX, base, |b| b.reload_max)?,
            range: view.get_or_inherit(keys::RANGE, base, |b| b.range)?,
            angle: view.get_or_inherit(keys::ANGLE, base, |b| b.angle)?,
            coefficient: view.get_or_inherit(keys::CORRECTED, base, |b| b.coefficient)?,
            base: base_weapon.clone(),
        })
    }

    /// Carrier weapons list aircraft ids in `bullet_ID`. An empty own list
    /// takes the base's aircraft. Some records list aircraft that do not exist
    /// and instead share their own id with the aircraft they launch.
    fn resolve_aircraft(
        view: RecordView<'_>,
        resolver: &Resolver<'_>,
        own_ids: &[i64],
        base: Option<&Weapon>,
    ) -> IResult<Vec<Projectile>> {
        if own_ids.is_empty() {
            return Ok(base.map(|base| base.projectiles.clone()).unwrap_or_default());
        }

        let source = resolver.source();
        let aircraft = |id: i64| resolver.aircraft(id).map(Projectile::Aircraft);
        if own_ids.iter().all(|&id| source.contains(Table::Aircraft, id)) {
            return own_ids.iter().map(|&id| aircraft(id)).collect();
        }

        debug!("weapon {}: listed aircraft {own_ids:?} missing", view.id());
        if source.contains(Table::Aircraft, view.id()) {
            return Ok(vec![aircraft(view.id())?]);
        }

        base.map(|base| base.projectiles.clone())
            .ok_or_else(|| view.missing(keys::BULLET_ID))
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn spawn_type(&self) -> SpawnType {
        self.spawn_type
    }

    pub fn base(&self) -> Option<&Weapon> {
        self.base.as_deref()
    }

    pub fn barrages(&self) -> &[Rc<Barrage>] {
        &self.barrages
    }

    pub fn barrage_ids(&self) -> &[i64] {
        &self.barrage_ids
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn bullet_ids(&self) -> &[i64] {
        &self.bullet_ids
    }

    /// Barrages paired with the projectile each one fires.
    pub fn barrages_with_projectiles(&self) -> impl Iterator<Item = (&Barrage, &Projectile)> {
        self.barrages
            .iter()
            .map(|barrage| barrage.as_ref())
            .zip(&self.projectiles)
    }

    /// Whether every entry of the bullet id list is the same bullet.
    pub fn same_bullet(&self) -> bool {
        self.same_bullet
    }

    pub fn weapon_type(&self) -> i64 {
        self.weapon_type
    }

    /// Raw damage of a single projectile.
    pub fn damage(&self) -> f64 {
        self.damage
    }

    pub fn modifier_stat(&self) -> i64 {
        self.modifier_stat
    }

    pub fn modifier_ratio(&self) -> f64 {
        self.modifier_ratio
    }

    pub fn reload_max(&self) -> f64 {
        self.reload_max
    }

    /// Seconds between volleys before the ship's reload stat applies.
    pub fn reload_period(&self) -> f64 {
        self.reload_max / reload_divisor()
    }

    pub fn range(&self) -> f64 {
        self.range
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    fn aircraft_weapons(projectile: &Projectile) -> &[Rc<Weapon>] {
        projectile
            .aircraft_ref()
            .map(|aircraft| aircraft.weapons())
            .unwrap_or_default()
    }

    /// Damage of every projectile in one firing, ignoring armor and stats.
    pub fn raw_damage_sum(&self) -> f64 {
        match self.spawn_type {
            SpawnType::Cannon | SpawnType::Torpedo => self
                .barrages
                .iter()
                .map(|barrage| barrage.projectile_count() as f64 * self.damage)
                .sum(),
            SpawnType::Plane => self
                .barrages_with_projectiles()
                .map(|(barrage, projectile)| {
                    let payload: f64 = Self::aircraft_weapons(projectile)
                        .iter()
                        .map(|weapon| weapon.raw_damage_sum())
                        .sum();
                    barrage.projectile_count() as f64 * payload
                })
                .sum(),
            SpawnType::AntiAircraft => 0.0,
        }
    }

    /// Damage of one firing against `armor`, including armor modifiers and
    /// the weapon coefficient but not the scaling stat.
    pub fn damage_sum_by_armor_type(&self, armor: ArmorType) -> f64 {
        let sum: f64 = match self.spawn_type {
            SpawnType::Cannon | SpawnType::Torpedo => self
                .barrages_with_projectiles()
                .filter_map(|(barrage, projectile)| {
                    let bullet = projectile.bullet_ref()?;
                    Some(
                        barrage.projectile_count() as f64
                            * bullet.armor_modifier(armor)
                            * self.damage,
                    )
                })
                .sum(),
            SpawnType::Plane => self
                .barrages_with_projectiles()
                .map(|(barrage, projectile)| {
                    let payload: f64 = Self::aircraft_weapons(projectile)
                        .iter()
                        .map(|weapon| weapon.damage_sum_by_armor_type(armor))
                        .sum();
                    barrage.projectile_count() as f64 * payload
                })
                .sum(),
            SpawnType::AntiAircraft => return 0.0,
        };

        sum * self.coefficient
    }

    pub fn projectiles_by_ammo_type(&self, ammo: AmmoType) -> u32 {
        self.barrages_with_projectiles()
            .filter(|(_, projectile)| {
                projectile
                    .bullet_ref()
                    .is_some_and(|bullet| bullet.ammo_type().is(&ammo))
            })
            .map(|(barrage, _)| barrage.projectile_count())
            .sum()
    }

    fn uniform_bullet(&self) -> Option<&Bullet> {
        if !self.same_bullet {
            return None;
        }
        self.projectiles.first()?.bullet_ref().map(|bullet| bullet.as_ref())
    }

    /// Travel type shared by all bullets, `None` if they differ.
    pub fn bullet_type(&self) -> Option<Recognized<BulletType>> {
        self.uniform_bullet().map(|bullet| *bullet.bullet_type())
    }

    /// Ammo type shared by all projectiles, `None` if they differ.
    ///
    /// For carrier weapons this is the ammo of the first aircraft's armament,
    /// provided every armament with a uniform ammo type agrees on it.
    pub fn ammo_type(&self) -> Option<Recognized<AmmoType>> {
        if !self.same_bullet {
            return None;
        }
        match self.spawn_type {
            SpawnType::Plane => {
                let weapons = Self::aircraft_weapons(self.projectiles.first()?);
                let ammo = weapons.first()?.ammo_type();
                weapons
                    .iter()
                    .filter_map(|weapon| weapon.ammo_type())
                    .all(|other| Some(other) == ammo)
                    .then_some(ammo)
                    .flatten()
            }
            _ => self.uniform_bullet().map(|bullet| *bullet.ammo_type()),
        }
    }

    /// Armor modifier shared by all bullets, `None` if they differ.
    pub fn armor_modifier(&self, armor: ArmorType) -> Option<f64> {
        self.uniform_bullet().map(|bullet| bullet.armor_modifier(armor))
    }
}

/// A carrier-launched plane and the weapons it carries.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Aircraft {
    id: i64,
    name: String,
    base: Option<Rc<Aircraft>>,
    aircraft_type: i64,
    max_hp: f64,
    hp_growth: f64,
    crash_damage: f64,
    dodge: f64,
    speed: f64,
    weapons: Vec<Rc<Weapon>>,
}

impl Aircraft {
    pub fn resolve(view: RecordView<'_>, resolver: &Resolver<'_>) -> IResult<Aircraft> {
        let base = view
            .opt::<i64>(keys::BASE)?
            .map(|base_id| resolver.aircraft(base_id))
            .transpose()?;

        let own_weapons: Vec<i64> = view.opt(keys::WEAPON_ID)?.unwrap_or_default();
        let weapons = match base.as_deref() {
            Some(base) if own_weapons.is_empty() => base.weapons.clone(),
            _ => own_weapons
                .iter()
                .map(|&id| resolver.weapon(id))
                .collect::<IResult<Vec<_>>>()?,
        };

        let inherited = base.as_deref();
        Ok(Aircraft {
            id: view.id(),
            name: view.get_or_inherit(keys::NAME, inherited, |b| b.name.clone())?,
            aircraft_type: view.get_or_inherit(keys::TYPE, inherited, |b| b.aircraft_type)?,
            max_hp: view.get_or_inherit(keys::MAX_HP, inherited, |b| b.max_hp)?,
            hp_growth: view.get_or_inherit(keys::HP_GROWTH, inherited, |b| b.hp_growth)?,
            crash_damage: view.get_or_inherit(keys::CRASH_DMG, inherited, |b| b.crash_damage)?,
            dodge: view.get_or_inherit(keys::DODGE, inherited, |b| b.dodge)?,
            speed: view.get_or_inherit(keys::SPEED, inherited, |b| b.speed)?,
            weapons,
            base,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base(&self) -> Option<&Aircraft> {
        self.base.as_deref()
    }

    pub fn aircraft_type(&self) -> i64 {
        self.aircraft_type
    }

    pub fn max_hp(&self) -> f64 {
        self.max_hp
    }

    pub fn hp_growth(&self) -> f64 {
        self.hp_growth
    }

    pub fn hp_at_level(&self, level: u32) -> f64 {
        self.max_hp + level.saturating_sub(1) as f64 * self.hp_growth / 1000.0
    }

    pub fn crash_damage(&self) -> f64 {
        self.crash_damage
    }

    pub fn dodge(&self) -> f64 {
        self.dodge
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn weapons(&self) -> &[Rc<Weapon>] {
        &self.weapons
    }
}
