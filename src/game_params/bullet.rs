use bon::Builder;
use serde_json::Value;

use crate::error::IResult;
use crate::game_types::{AmmoType, ArmorType, BulletType};
use crate::recognized::Recognized;

use super::keys;
use super::record::RecordView;

/// A single projectile definition.
#[derive(Clone, Debug, PartialEq, Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Bullet {
    id: i64,
    bullet_type: Recognized<BulletType>,
    velocity: f64,
    ammo_type: Recognized<AmmoType>,
    /// Damage multiplier against light, medium and heavy armor.
    armor_modifiers: [f64; 3],
    range: f64,
    #[builder(default)]
    range_offset: f64,
    #[builder(default)]
    pierce_count: u32,
    extra_param: Option<Value>,
}

impl Bullet {
    pub fn from_record(view: RecordView<'_>) -> IResult<Self> {
        let modifiers: Vec<f64> = view.get(keys::DAMAGE_TYPE)?;
        let armor_modifiers: [f64; 3] = match modifiers.as_slice() {
            [light, medium, heavy, ..] => [*light, *medium, *heavy],
            _ => {
                return Err(view.invalid(format!(
                    "`{}` has {} armor modifiers, expected 3",
                    keys::DAMAGE_TYPE,
                    modifiers.len()
                )));
            }
        };

        Ok(Bullet::builder()
            .id(view.id())
            .bullet_type(Recognized::from_code(view.get(keys::TYPE)?))
            .velocity(view.get(keys::VELOCITY)?)
            .ammo_type(Recognized::from_code(view.get(keys::AMMO_TYPE)?))
            .armor_modifiers(armor_modifiers)
            .range(view.get(keys::RANGE)?)
            .range_offset(view.opt(keys::RANGE_OFFSET)?.unwrap_or_default())
            .pierce_count(view.opt(keys::PIERCE_COUNT)?.unwrap_or_default())
            .maybe_extra_param(view.opt(keys::EXTRA_PARAM)?)
            .build())
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn bullet_type(&self) -> &Recognized<BulletType> {
        &self.bullet_type
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn ammo_type(&self) -> &Recognized<AmmoType> {
        &self.ammo_type
    }

    pub fn armor_modifier(&self, armor: ArmorType) -> f64 {
        self.armor_modifiers[armor.index()]
    }

    pub fn armor_modifiers(&self) -> &[f64; 3] {
        &self.armor_modifiers
    }

    pub fn range(&self) -> f64 {
        self.range
    }

    pub fn range_offset(&self) -> f64 {
        self.range_offset
    }

    /// Number of targets this bullet passes through.
    pub fn pierce_count(&self) -> u32 {
        self.pierce_count
    }

    pub fn can_pierce(&self) -> bool {
        self.pierce_count != 0
    }

    pub fn extra_param(&self) -> Option<&Value> {
        self.extra_param.as_ref()
    }
}
