use std::collections::HashMap;

use crate::data::{ConfigSource, Table};
use crate::error::IResult;
use crate::game_types::Stat;

use super::keys;
use super::record::RecordView;

/// Bidirectional attribute name <-> id lookup over the attribute table.
///
/// Refit and research effects name the stat they raise; everything else in
/// this crate addresses stats by id.
#[derive(Debug, Clone, Default)]
pub struct AttributeRegistry {
    by_id: HashMap<i64, String>,
    by_name: HashMap<String, i64>,
}

impl AttributeRegistry {
    pub fn from_source(source: &dyn ConfigSource) -> IResult<Self> {
        let mut registry = Self::default();
        for id in source.ids(Table::AttributeInfo) {
            let record = source.get_record(Table::AttributeInfo, id)?;
            let name: String = RecordView::new(Table::AttributeInfo, id, record).get(keys::NAME)?;
            registry.insert(id, name);
        }

        Ok(registry)
    }

    /// The registry implied by the twelve fixed stat slots.
    pub fn standard() -> Self {
        Stat::ALL
            .iter()
            .map(|stat| (stat.id() as i64, stat.key().to_owned()))
            .collect()
    }

    pub fn insert(&mut self, id: i64, name: String) {
        self.by_name.insert(name.clone(), id);
        self.by_id.insert(id, name);
    }

    pub fn id(&self, name: &str) -> Option<i64> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, id: i64) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    /// The stat slot an attribute name refers to, if it is one of the twelve.
    pub fn stat(&self, name: &str) -> Option<Stat> {
        self.id(name).and_then(Stat::from_id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl FromIterator<(i64, String)> for AttributeRegistry {
    fn from_iter<I: IntoIterator<Item = (i64, String)>>(iter: I) -> Self {
        let mut registry = Self::default();
        for (id, name) in iter {
            registry.insert(id, name);
        }
        registry
    }
}
