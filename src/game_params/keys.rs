//! Constants for table record field names.

// Shared identity keys
pub const ID: &str = "id";
pub const NAME: &str = "name";
pub const DESC: &str = "desc";
pub const ICON: &str = "icon";
pub const TYPE: &str = "type";
pub const BASE: &str = "base";

// ship_data_statistics
pub const ENGLISH_NAME: &str = "english_name";
pub const NATIONALITY: &str = "nationality";
pub const RARITY: &str = "rarity";
pub const STAR: &str = "star";
pub const ATTRS: &str = "attrs";
pub const ATTRS_GROWTH: &str = "attrs_growth";
pub const ATTRS_GROWTH_EXTRA: &str = "attrs_growth_extra";
pub const EQUIPMENT_PROFICIENCY: &str = "equipment_proficiency";
pub const BASE_LIST: &str = "base_list";
pub const PRELOAD_COUNT: &str = "preload_count";
pub const DEFAULT_EQUIP_LIST: &str = "default_equip_list";
pub const FIX_EQUIP_LIST: &str = "fix_equip_list";
pub const DEPTH_CHARGE_LIST: &str = "depth_charge_list";
pub const OXY_MAX: &str = "oxy_max";
pub const OXY_COST: &str = "oxy_cost";
pub const OXY_RECOVERY: &str = "oxy_recovery";
pub const AMMO: &str = "ammo";
pub const ATTACK_DURATION: &str = "attack_duration";
pub const HUNTING_RANGE_LEVEL: &str = "huntingrange_level";
pub const HUNTING_RANGE: &str = "hunting_range";

// ship_data_template
pub const GROUP_TYPE: &str = "group_type";
pub const STRENGTHEN_ID: &str = "strengthen_id";
pub const BUFF_LIST_DISPLAY: &str = "buff_list_display";
/// Allowed equipment types are stored as `equip_1` .. `equip_5`.
pub const EQUIP_SLOT_PREFIX: &str = "equip_";
pub const EQUIP_SLOT_COUNT: usize = 5;

// ship_data_strengthen
pub const DURABILITY: &str = "durability";
pub const LEVEL_EXP: &str = "level_exp";
pub const ATTR_EXP: &str = "attr_exp";

// ship_data_group
pub const TRANS_TYPE: &str = "trans_type";
pub const TRANS_SKILL: &str = "trans_skill";

// fleet_tech_ship_template
pub const PT_GET: &str = "pt_get";
/// Misspelled in the game data.
pub const PT_UPGRADE: &str = "pt_upgrage";
pub const PT_LEVEL: &str = "pt_level";
pub const ADD_GET_ATTR: &str = "add_get_attr";
pub const ADD_GET_VALUE: &str = "add_get_value";
pub const ADD_GET_SHIPTYPE: &str = "add_get_shiptype";
pub const ADD_LEVEL_ATTR: &str = "add_level_attr";
pub const ADD_LEVEL_VALUE: &str = "add_level_value";
pub const ADD_LEVEL_SHIPTYPE: &str = "add_level_shiptype";

// ship_data_trans / transform_data_template
pub const TRANSFORM_LIST: &str = "transform_list";
pub const TRANSFORM_COLUMNS: usize = 6;
pub const USE_GOLD: &str = "use_gold";
pub const USE_ITEM: &str = "use_item";
pub const USE_SHIP: &str = "use_ship";
pub const LEVEL_LIMIT: &str = "level_limit";
pub const STAR_LIMIT: &str = "star_limit";
pub const MAX_LEVEL: &str = "max_level";
pub const EFFECT: &str = "effect";
pub const GEAR_SCORE: &str = "gear_score";
pub const CONDITION_ID: &str = "condition_id";
pub const SHIP_ID: &str = "ship_id";
/// Refit effect keys of the form `equipment_proficiency_<slot>`.
pub const EQUIPMENT_PROFICIENCY_PREFIX: &str = "equipment_proficiency_";

// ship_data_blueprint / ship_strengthen_blueprint
pub const STRENGTHEN_EFFECT: &str = "strengthen_effect";
pub const FATE_STRENGTHEN: &str = "fate_strengthen";
pub const LV: &str = "lv";
pub const NEED_LV: &str = "need_lv";
pub const NEED_EXP: &str = "need_exp";
pub const EFFECT_DESC: &str = "effect_desc";
pub const EFFECT_DIALOG: &str = "effect_dialog";
pub const EFFECT_PRELOAD: &str = "effect_preload";
pub const EFFECT_ATTR: &str = "effect_attr";
pub const EFFECT_EQUIPMENT_PROFICIENCY: &str = "effect_equipment_proficiency";

// weapon_property
pub const SPAWN_BOUND: &str = "spawn_bound";
pub const BARRAGE_ID: &str = "barrage_ID";
pub const BULLET_ID: &str = "bullet_ID";
pub const DAMAGE: &str = "damage";
pub const ATTACK_ATTRIBUTE: &str = "attack_attribute";
pub const ATTACK_ATTRIBUTE_RATIO: &str = "attack_attribute_ratio";
pub const RELOAD_MAX: &str = "reload_max";
pub const RANGE: &str = "range";
pub const ANGLE: &str = "angle";
pub const CORRECTED: &str = "corrected";

// bullet_template
pub const VELOCITY: &str = "velocity";
pub const AMMO_TYPE: &str = "ammo_type";
pub const DAMAGE_TYPE: &str = "damage_type";
pub const RANGE_OFFSET: &str = "range_offset";
pub const PIERCE_COUNT: &str = "pierce_count";
pub const EXTRA_PARAM: &str = "extra_param";

// aircraft_template
pub const MAX_HP: &str = "max_hp";
pub const HP_GROWTH: &str = "hp_growth";
pub const CRASH_DMG: &str = "crash_DMG";
pub const DODGE: &str = "dodge";
pub const SPEED: &str = "speed";
pub const WEAPON_ID: &str = "weapon_ID";

// barrage_template
pub const OFFSET_Z: &str = "offset_z";
pub const DELTA_OFFSET_Z: &str = "delta_offset_z";
pub const OFFSET_X: &str = "offset_x";
pub const DELTA_OFFSET_X: &str = "delta_offset_x";
pub const DELTA_ANGLE: &str = "delta_angle";
pub const FIRST_DELAY: &str = "first_delay";
pub const DELAY: &str = "delay";
pub const DELTA_DELAY: &str = "delta_delay";
pub const PRIMAL_REPEAT: &str = "primal_repeat";
pub const SENIOR_DELAY: &str = "senior_delay";
pub const SENIOR_REPEAT: &str = "senior_repeat";
pub const RANDOM_ANGLE: &str = "random_angle";
pub const OFFSET_PRIORITISE: &str = "offset_prioritise";

// skill / buff templates
pub const EFFECT_LIST: &str = "effect_list";
pub const ARG_LIST: &str = "arg_list";
pub const BUFF_ID: &str = "buff_id";
pub const SKILL_ID: &str = "skill_id";
pub const SKILL_ID_LIST: &str = "skill_id_list";
pub const FIRE_WEAPON_ID: &str = "weapon_id";

// skill_data_template
pub const DESC_GET: &str = "desc_get";
pub const DESC_ADD: &str = "desc_add";
