/// Attribute name registry (`attribute_info_by_type`)
pub mod attributes;
/// Barrage firing patterns
pub mod barrage;
/// Bullet templates
pub mod bullet;
/// Skills, buffs, and the effects that link them
pub mod effect;
/// Field names used across the tables
pub mod keys;
/// Ship groups: limit break variants, refits, fleet tech, research
pub mod meta_unit;
/// Typed access to raw records
pub mod record;
/// Refit and research strengthening nodes
pub mod refit;
/// Memoizing resolver over a [`crate::data::ConfigSource`]
pub mod resolver;
/// Individual ship statistics
pub mod unit;
/// Weapons and aircraft
pub mod weapon;

pub use attributes::AttributeRegistry;
pub use barrage::Barrage;
pub use bullet::Bullet;
pub use effect::{Effect, RootBuff, Triggerable, TriggerableKind};
pub use meta_unit::{FleetTech, MetaUnit, RefitKind};
pub use record::RecordView;
pub use refit::{RefitNode, ResearchStrengthenNode};
pub use resolver::{RefitGate, ResolveOptions, Resolver};
pub use unit::{Unit, UnitKind};
pub use weapon::{Aircraft, Projectile, Weapon};
