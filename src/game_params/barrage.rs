use bon::Builder;

use crate::error::IResult;

use super::keys;
use super::record::RecordView;

/// Spatial and temporal firing pattern of one weapon discharge.
///
/// Projectiles are fired in a nested loop: the primal (inner) loop fires
/// `primal_repeat + 1` shots, and the senior (outer) loop repeats that
/// `senior_repeat + 1` times.
#[derive(Clone, Debug, PartialEq, Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Barrage {
    id: i64,
    #[builder(default)]
    offset_z: f64,
    #[builder(default)]
    delta_offset_z: f64,
    #[builder(default)]
    offset_x: f64,
    #[builder(default)]
    delta_offset_x: f64,
    #[builder(default)]
    angle: f64,
    #[builder(default)]
    delta_angle: f64,
    /// Delay before the first shot.
    #[builder(default)]
    first_delay: f64,
    /// Delay between primal shots.
    #[builder(default)]
    delay: f64,
    /// Per-shot growth of `delay`.
    #[builder(default)]
    delta_delay: f64,
    #[builder(default)]
    primal_repeat: u32,
    #[builder(default)]
    senior_delay: f64,
    #[builder(default)]
    senior_repeat: u32,
    #[builder(default)]
    random_angle: bool,
    #[builder(default)]
    offset_prioritise: bool,
}

impl Barrage {
    pub fn from_record(view: RecordView<'_>) -> IResult<Self> {
        let num = |field: &'static str| -> IResult<f64> { Ok(view.opt(field)?.unwrap_or_default()) };
        let count = |field: &'static str| -> IResult<u32> { Ok(view.opt(field)?.unwrap_or_default()) };
        let flag = |field: &'static str| -> IResult<bool> { Ok(view.opt(field)?.unwrap_or_default()) };

        Ok(Barrage::builder()
            .id(view.id())
            .offset_z(num(keys::OFFSET_Z)?)
            .delta_offset_z(num(keys::DELTA_OFFSET_Z)?)
            .offset_x(num(keys::OFFSET_X)?)
            .delta_offset_x(num(keys::DELTA_OFFSET_X)?)
            .angle(num(keys::ANGLE)?)
            .delta_angle(num(keys::DELTA_ANGLE)?)
            .first_delay(num(keys::FIRST_DELAY)?)
            .delay(num(keys::DELAY)?)
            .delta_delay(num(keys::DELTA_DELAY)?)
            .primal_repeat(count(keys::PRIMAL_REPEAT)?)
            .senior_delay(num(keys::SENIOR_DELAY)?)
            .senior_repeat(count(keys::SENIOR_REPEAT)?)
            .random_angle(flag(keys::RANDOM_ANGLE)?)
            .offset_prioritise(flag(keys::OFFSET_PRIORITISE)?)
            .build())
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn projectile_count(&self) -> u32 {
        (self.senior_repeat + 1) * (self.primal_repeat + 1)
    }

    /// Seconds from cast until the last projectile leaves.
    pub fn animation_time(&self) -> f64 {
        let primal = self.primal_repeat as f64;
        let senior = self.senior_repeat as f64;
        let delay_growth = (0.5 * (primal - 1.0) * (primal - 2.0) * self.delta_delay).max(0.0);

        self.first_delay
            + (self.delay * primal + delay_growth) * (senior + 1.0)
            + self.senior_delay * senior
    }

    pub fn offset_z(&self) -> f64 {
        self.offset_z
    }

    pub fn delta_offset_z(&self) -> f64 {
        self.delta_offset_z
    }

    pub fn offset_x(&self) -> f64 {
        self.offset_x
    }

    pub fn delta_offset_x(&self) -> f64 {
        self.delta_offset_x
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn delta_angle(&self) -> f64 {
        self.delta_angle
    }

    pub fn first_delay(&self) -> f64 {
        self.first_delay
    }

    pub fn delay(&self) -> f64 {
        self.delay
    }

    pub fn delta_delay(&self) -> f64 {
        self.delta_delay
    }

    pub fn primal_repeat(&self) -> u32 {
        self.primal_repeat
    }

    pub fn senior_delay(&self) -> f64 {
        self.senior_delay
    }

    pub fn senior_repeat(&self) -> u32 {
        self.senior_repeat
    }

    pub fn random_angle(&self) -> bool {
        self.random_angle
    }

    pub fn offset_prioritise(&self) -> bool {
        self.offset_prioritise
    }
}
