//! Shared fixture tables for unit tests.

use serde_json::{Value, json};

use crate::data::{ConfigSource, Table, TableStore};
use crate::game_params::unit::Unit;

pub const CLEVELAND_GROUP: i64 = 2051;
pub const CLEVELAND_LB0: i64 = 20511;
pub const CLEVELAND_LB3: i64 = 20514;
pub const CLEVELAND_REFIT: i64 = 20519;
pub const RESEARCH_SUB_GROUP: i64 = 29901;
pub const ORPHAN_GROUP: i64 = 10999;

pub const REFIT_NODE_FIREPOWER: i64 = 3020;
pub const REFIT_NODE_PROFICIENCY: i64 = 3021;

pub const GUN_ID: i64 = 10000;
pub const GUN_CHILD_ID: i64 = 10001;
pub const TORPEDO_ID: i64 = 20000;
pub const PLANE_WEAPON_ID: i64 = 30000;
pub const PLANE_SELF_ID_WEAPON: i64 = 30010;
pub const BROKEN_WEAPON_ID: i64 = 99000;

pub const ROOT_SKILL_ID: i64 = 11720;
pub const FIRE_SKILL_ID: i64 = 11721;
pub const WEAPON_BUFF_ID: i64 = 11723;
pub const DOT_BUFF_ID: i64 = 11724;
pub const SECOND_FIRE_SKILL_ID: i64 = 11722;
pub const TWIN_CAST_BUFF_ID: i64 = 11725;
pub const RANDOM_CAST_BUFF_ID: i64 = 11726;

fn stats(id: i64, name: &str, firepower: (f64, f64), proficiency: [f64; 3]) -> Value {
    let (attr, growth) = firepower;
    json!({
        "id": id,
        "name": name,
        "english_name": format!("USS {name}"),
        "nationality": 1,
        "type": 2,
        "rarity": 4,
        "star": 2,
        "attrs": [1000, attr, 0, 60, 0, 40, 0, 70, 30, 28, 30, 0],
        "attrs_growth": [50000, growth, 0, 3000, 0, 2000, 0, 1000, 1500, 0, 0, 0],
        "attrs_growth_extra": [500, 500, 0, 500, 0, 500, 0, 500, 500, 0, 0, 0],
        "equipment_proficiency": proficiency,
        "base_list": [1, 1, 1],
        "preload_count": [0, 0, 0],
        "default_equip_list": [2100, 4100, 7100],
        "fix_equip_list": [],
        "oxy_max": 0,
    })
}

fn template(id: i64, group: i64, strengthen: i64, skills: Value) -> Value {
    json!({
        "id": id,
        "group_type": group,
        "strengthen_id": strengthen,
        "buff_list_display": skills,
        "equip_1": [2],
        "equip_2": [4],
        "equip_3": [6, 7],
        "equip_4": [10],
        "equip_5": [10],
    })
}

fn effect(tag: &str, args: Value) -> Value {
    json!({"type": tag, "arg_list": args})
}

fn ship_tables(store: TableStore) -> TableStore {
    let mut submarine = stats(299011, "Sub", (0.0, 0.0), [1.0, 1.0, 1.0]);
    submarine["type"] = json!(8);
    submarine["attrs"][2] = json!(100);
    for (key, value) in [
        ("oxy_max", json!(180)),
        ("oxy_cost", json!(10)),
        ("oxy_recovery", json!(2)),
        ("ammo", json!(3)),
        ("attack_duration", json!(15)),
        ("huntingrange_level", json!(1)),
        ("hunting_range", json!([[[7, 8], [7, 6]], [[6, 7]]])),
    ] {
        submarine[key] = value;
    }

    store
        .with_table(
            Table::ShipStatistics,
            json!({
                "20511": stats(CLEVELAND_LB0, "Cleveland", (30.0, 1500.0), [1.0, 1.0, 1.0]),
                "20514": stats(CLEVELAND_LB3, "Cleveland", (40.0, 2000.0), [1.1, 1.1, 1.1]),
                "20519": stats(CLEVELAND_REFIT, "Cleveland", (50.0, 2000.0), [1.15, 1.15, 1.1]),
                "299011": submarine,
            }),
        )
        .and_then(|store| {
            store.with_table(
                Table::ShipTemplate,
                json!({
                    "all": [20511, 20514, 20519, 299011],
                    "20511": template(CLEVELAND_LB0, CLEVELAND_GROUP, 10205, json!([2011, 2021])),
                    "20514": template(CLEVELAND_LB3, CLEVELAND_GROUP, 10205, json!([2011, 2021])),
                    "20519": template(CLEVELAND_REFIT, CLEVELAND_GROUP, 10205, json!([2011, 2021, 2031])),
                    "299011": template(299011, RESEARCH_SUB_GROUP, 29901, json!([])),
                }),
            )
        })
        .and_then(|store| {
            store.with_table(
                Table::ShipStrengthen,
                json!({
                    "10205": {
                        "id": 10205,
                        "durability": [40, 0, 55, 0, 45],
                        "level_exp": [300, 300, 300, 300, 500],
                        "attr_exp": [12, 0, 14, 0, 10],
                    },
                    "29901": {
                        "id": 29901,
                        "durability": [0, 50, 0, 0, 0],
                        "level_exp": [0, 0, 0, 0, 0],
                        "attr_exp": [0, 0, 0, 0, 0],
                    },
                }),
            )
        })
        .and_then(|store| {
            store.with_table(
                Table::ShipGroup,
                json!({
                    "2051": {"id": 2051, "type": 2, "trans_type": 2, "trans_skill": [2031], "nationality": 1},
                    "29901": {"id": 29901, "type": 8, "trans_type": 0, "trans_skill": 0, "nationality": 1},
                    "10999": {"id": 10999, "type": 1, "nationality": 1},
                }),
            )
        })
        .and_then(|store| {
            store.with_table(
                Table::FleetTech,
                json!({
                    "2051": {
                        "id": 2051,
                        "pt_get": 8,
                        "pt_upgrage": 6,
                        "pt_level": 17,
                        "add_level_attr": 2,
                        "add_level_value": 1,
                        "add_level_shiptype": [2, 3],
                    },
                }),
            )
        })
        .and_then(|store| {
            store.with_table(
                Table::RefitTransform,
                json!({
                    "2051": {
                        "id": 2051,
                        "transform_list": [[[2, 3021]], [[1, 3020]], [], [], [], []],
                    },
                }),
            )
        })
        .and_then(|store| {
            store.with_table(
                Table::RefitEffect,
                json!({
                    "3020": {
                        "id": 3020,
                        "name": "Firepower Enhancement",
                        "icon": "tw_cannon",
                        "use_gold": 300,
                        "level_limit": 1,
                        "star_limit": 2,
                        "max_level": 3,
                        "use_ship": 0,
                        "effect": [{"cannon": 5}, {"cannon": 5}, {}],
                        "use_item": [[[17003, 1]], [[17003, 2]], [[17003, 3]]],
                        "gear_score": [5, 5, 5],
                        "condition_id": [],
                    },
                    "3021": {
                        "id": 3021,
                        "name": "Main Gun Improvement",
                        "icon": "tw_proficiency",
                        "use_gold": 1000,
                        "level_limit": 70,
                        "star_limit": 4,
                        "max_level": 1,
                        "use_ship": 0,
                        "effect": [{"equipment_proficiency_1": 0.05}],
                        "condition_id": [3020],
                    },
                }),
            )
        })
        .and_then(|store| {
            store.with_table(
                Table::ResearchGroup,
                json!({
                    "29901": {
                        "id": 29901,
                        "strengthen_effect": [2990101, 2990102],
                        "fate_strengthen": [2990151],
                    },
                }),
            )
        })
        .and_then(|store| {
            store.with_table(
                Table::ResearchStrengthen,
                json!({
                    "2990101": {
                        "id": 2990101, "lv": 1, "need_lv": 1, "need_exp": 0,
                        "effect_attr": [["torpedo", 5]],
                        "effect_equipment_proficiency": [2, 0.05],
                    },
                    "2990102": {
                        "id": 2990102, "lv": 2, "need_lv": 10, "need_exp": 300,
                        "effect_attr": [["torpedo", 3]],
                        "effect_equipment_proficiency": [],
                    },
                    "2990151": {
                        "id": 2990151, "lv": 31, "need_lv": 120, "need_exp": 0,
                        "effect_attr": [["torpedo", 1]],
                        "effect_equipment_proficiency": [],
                    },
                }),
            )
        })
        .unwrap()
}

fn armament_tables(store: TableStore) -> TableStore {
    store
        .with_table(
            Table::Barrage,
            json!({
                "1000": {"id": 1000, "primal_repeat": 2, "senior_repeat": 1, "delay": 0.1},
                "1001": {"id": 1001, "primal_repeat": 3, "delay": 0.1},
                "1002": {"id": 1002, "primal_repeat": 3, "angle": 30, "delta_angle": 10},
                "1003": {"id": 1003, "primal_repeat": 1, "first_delay": 0.5},
            }),
        )
        .and_then(|store| {
            store.with_table(
                Table::Bullet,
                json!({
                    "1400": {"id": 1400, "type": 1, "velocity": 18, "ammo_type": 3,
                             "damage_type": [1.2, 1.1, 1.0], "range": 60, "pierce_count": 0},
                    "1401": {"id": 1401, "type": 1, "velocity": 20, "ammo_type": 2,
                             "damage_type": [0.9, 1.0, 0.5], "range": 60, "pierce_count": 1},
                    "1402": {"id": 1402, "type": 3, "velocity": 4, "ammo_type": 4,
                             "damage_type": [1.0, 1.0, 1.0], "range": 50, "pierce_count": 0},
                }),
            )
        })
        .and_then(|store| {
            store.with_table(
                Table::Weapon,
                json!({
                    "10000": {
                        "id": 10000, "name": "Twin 152mm", "spawn_bound": "cannon",
                        "barrage_ID": [1000, 1001], "bullet_ID": [1400, 1401],
                        "type": 2, "damage": 100, "attack_attribute": 1,
                        "attack_attribute_ratio": 100, "reload_max": 800,
                        "range": 60, "angle": 180, "corrected": 1.2,
                    },
                    "10001": {"id": 10001, "base": 10000, "damage": 120, "angle": 0},
                    "20000": {
                        "id": 20000, "name": "Aerial Torpedo", "spawn_bound": "torpedo",
                        "barrage_ID": [1002], "bullet_ID": [1402],
                        "type": 3, "damage": 50, "attack_attribute": 2,
                        "attack_attribute_ratio": 80, "reload_max": 1200,
                        "range": 50, "angle": 60, "corrected": 1.0,
                    },
                    "30000": {
                        "id": 30000, "name": "Torpedo Bomber", "spawn_bound": "plane",
                        "barrage_ID": [1003], "bullet_ID": [40000],
                        "type": 10, "damage": 0, "attack_attribute": 4,
                        "attack_attribute_ratio": 100, "reload_max": 1000,
                        "range": 100, "angle": 180, "corrected": 1.0,
                    },
                    "30010": {
                        "id": 30010, "name": "Seaplane", "spawn_bound": "plane",
                        "barrage_ID": [1003], "bullet_ID": [49999],
                        "type": 10, "damage": 0, "attack_attribute": 4,
                        "attack_attribute_ratio": 100, "reload_max": 1000,
                        "range": 100, "angle": 180, "corrected": 1.0,
                    },
                    "99000": {
                        "id": 99000, "name": "Broken", "spawn_bound": "laser",
                        "barrage_ID": [1000], "bullet_ID": [1400],
                    },
                }),
            )
        })
        .and_then(|store| {
            store.with_table(
                Table::Aircraft,
                json!({
                    "40000": {
                        "id": 40000, "name": "TBD Devastator", "type": 2,
                        "max_hp": 500, "hp_growth": 2000, "crash_DMG": 40,
                        "dodge": 0, "speed": 40, "weapon_ID": [20000],
                    },
                    "30010": {
                        "id": 30010, "name": "Seaplane", "type": 1,
                        "max_hp": 200, "hp_growth": 0, "crash_DMG": 10,
                        "dodge": 5, "speed": 30, "weapon_ID": [],
                    },
                }),
            )
        })
        .unwrap()
}

fn skill_tables(store: TableStore) -> TableStore {
    let desc_add: Vec<Value> = ["20%", "22%", "24%", "26%", "28%", "30%", "32%", "34%", "37%", "40%"]
        .into_iter()
        .map(|value| json!([value]))
        .collect();

    store
        .with_table(
            Table::SkillDisplay,
            json!({
                "11720": {
                    "id": 11720,
                    "name": "Barrage Specialist",
                    "desc": "Fires a special barrage: $1 damage.",
                    "desc_get": "Unlocked!",
                    "desc_add": [desc_add],
                    "type": 1,
                    "max_level": 10,
                },
            }),
        )
        .and_then(|store| {
            store.with_table(
                Table::Buff,
                json!({
                    "11720": {
                        "id": 11720, "name": "Barrage Specialist", "icon": 11720,
                        "effect_list": [
                            effect("BattleBuffCastSkill", json!({"skill_id": 11721})),
                            effect("BattleBuffDOT", json!({"number": 30, "time": 6})),
                            effect("BattleBuffAddAttr", json!({"attr": "cannon", "number": 10})),
                        ],
                    },
                    "11723": {
                        "id": 11723, "name": "Follow-up Volley",
                        "effect_list": [effect("BattleBuffCastSkill", json!({"skill_id": 11722}))],
                    },
                    "11724": {
                        "id": 11724, "name": "Burning",
                        "effect_list": [effect("BattleBuffDOT", json!({"number": 10, "time": 3}))],
                    },
                    "11725": {
                        "id": 11725, "name": "Double Tap",
                        "effect_list": [
                            effect("BattleBuffCastSkill", json!({"skill_id": 11722})),
                            effect("BattleBuffCastSkill", json!({"skill_id": 11722})),
                        ],
                    },
                    "11726": {
                        "id": 11726, "name": "Lucky Volley",
                        "effect_list": [
                            effect("BattleBuffCastSkillRandom", json!({"skill_id_list": [11722, 11722]})),
                        ],
                    },
                }),
            )
        })
        .and_then(|store| {
            store.with_table(
                Table::Skill,
                json!({
                    "11721": {
                        "id": 11721, "name": "Special Barrage", "desc": "",
                        "effect_list": [
                            effect("BattleSkillFire", json!({"weapon_id": 10000})),
                            effect("BattleSkillAddBuff", json!({"buff_id": 11724})),
                        ],
                        "10": {
                            "effect_list": [
                                effect("BattleSkillFire", json!({"weapon_id": 10000})),
                                effect("BattleSkillAddBuff", json!({"buff_id": 11723})),
                            ],
                        },
                    },
                    "11722": {
                        "id": 11722, "name": "Follow-up Fire", "desc": "",
                        "effect_list": [effect("BattleSkillFire", json!({"weapon_id": 10000}))],
                    },
                }),
            )
        })
        .unwrap()
}

/// One consistent world: a light cruiser with a refit, a research
/// submarine, a small armament set and a skill tree.
pub fn fixture_store() -> TableStore {
    skill_tables(armament_tables(ship_tables(TableStore::new())))
}

pub fn unit_from_store(store: &TableStore, ship_id: i64) -> Unit {
    let stats = store.get_record(Table::ShipStatistics, ship_id).unwrap();
    let template = store.get_record(Table::ShipTemplate, ship_id).unwrap();
    let strengthen_id = template["strengthen_id"].as_i64().unwrap();
    let strengthen = store.get_record(Table::ShipStrengthen, strengthen_id).unwrap();
    Unit::from_records(stats, template, strengthen).unwrap()
}
