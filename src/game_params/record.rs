//! Typed field access over raw table records.

use serde_json::Value;

use crate::data::{Record, Table};
use crate::error::{ErrorKind, IResult, failure_from_kind};

use super::keys;

/// Conversion from a raw record value.
///
/// The dumps come from Lua tables, so integers occasionally arrive as
/// integral floats, booleans as `0`/`1`, and empty arrays as `{}`.
pub trait FromValue: Sized {
    const EXPECTED: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "an integer";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64().or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0)
                .map(|f| f as i64)
        })
    }
}

macro_rules! narrowed_integer {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                const EXPECTED: &'static str = concat!("a ", stringify!($ty));

                fn from_value(value: &Value) -> Option<Self> {
                    i64::from_value(value).and_then(|v| <$ty>::try_from(v).ok())
                }
            }
        )*
    };
}

narrowed_integer!(u8, u32, u64, usize, i32);

impl FromValue for f64 {
    const EXPECTED: &'static str = "a number";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "a boolean";

    fn from_value(value: &Value) -> Option<Self> {
        value
            .as_bool()
            .or_else(|| i64::from_value(value).map(|v| v != 0))
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "a string";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FromValue for Value {
    const EXPECTED: &'static str = "a value";

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for Record {
    const EXPECTED: &'static str = "a mapping";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_object().cloned()
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    const EXPECTED: &'static str = "a list";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => items.iter().map(T::from_value).collect(),
            Value::Object(map) if map.is_empty() => Some(Vec::new()),
            _ => None,
        }
    }
}

impl<A: FromValue, B: FromValue> FromValue for (A, B) {
    const EXPECTED: &'static str = "a pair";

    fn from_value(value: &Value) -> Option<Self> {
        match value.as_array()?.as_slice() {
            [a, b, ..] => Some((A::from_value(a)?, B::from_value(b)?)),
            _ => None,
        }
    }
}

/// A record together with the table and id it came from, for error context.
#[derive(Debug, Clone, Copy)]
pub struct RecordView<'a> {
    table: Table,
    id: i64,
    record: &'a Record,
}

impl<'a> RecordView<'a> {
    pub fn new(table: Table, id: i64, record: &'a Record) -> Self {
        Self { table, id, record }
    }

    /// Builds a view whose id is read from the record's own `id` field.
    pub fn identify(table: Table, record: &'a Record) -> IResult<Self> {
        let mut view = Self::new(table, 0, record);
        view.id = view.get(keys::ID)?;
        Ok(view)
    }

    pub fn table(&self) -> Table {
        self.table
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn record(&self) -> &'a Record {
        self.record
    }

    /// The raw value of `field`, treating `null` as absent.
    pub fn raw(&self, field: &str) -> Option<&'a Value> {
        self.record.get(field).filter(|value| !value.is_null())
    }

    pub fn has(&self, field: &str) -> bool {
        self.raw(field).is_some()
    }

    pub fn get<T: FromValue>(&self, field: &'static str) -> IResult<T> {
        match self.raw(field) {
            Some(value) => self.convert(field, value),
            None => Err(self.missing(field)),
        }
    }

    pub fn opt<T: FromValue>(&self, field: &'static str) -> IResult<Option<T>> {
        self.raw(field)
            .map(|value| self.convert(field, value))
            .transpose()
    }

    /// Reads `field`, falling back to the value `inherit` takes from `base`
    /// when the field is absent. Without a base an absent field is missing.
    pub fn get_or_inherit<T: FromValue, B>(
        &self,
        field: &'static str,
        base: Option<&B>,
        inherit: impl FnOnce(&B) -> T,
    ) -> IResult<T> {
        match self.opt(field)? {
            Some(value) => Ok(value),
            None => base.map(inherit).ok_or_else(|| self.missing(field)),
        }
    }

    /// Like [`Self::opt`], for field names built at runtime.
    pub fn opt_dynamic<T: FromValue>(&self, field: &str) -> IResult<Option<T>> {
        self.raw(field)
            .map(|value| {
                T::from_value(value).ok_or_else(|| self.wrong_type(field, T::EXPECTED))
            })
            .transpose()
    }

    /// A nested mapping viewed with the same table and id.
    pub fn nested(&self, field: &str) -> Option<RecordView<'a>> {
        self.raw(field)
            .and_then(Value::as_object)
            .map(|record| Self::new(self.table, self.id, record))
    }

    pub fn missing(&self, field: &'static str) -> crate::error::Error {
        failure_from_kind(ErrorKind::MissingField {
            table: self.table,
            id: self.id,
            field,
        })
    }

    pub fn invalid(&self, detail: impl Into<String>) -> crate::error::Error {
        failure_from_kind(ErrorKind::Configuration {
            table: self.table,
            id: self.id,
            detail: detail.into(),
        })
    }

    fn wrong_type(&self, field: &str, expected: &str) -> crate::error::Error {
        self.invalid(format!("field `{field}` is not {expected}"))
    }

    fn convert<T: FromValue>(&self, field: &str, value: &Value) -> IResult<T> {
        T::from_value(value).ok_or_else(|| self.wrong_type(field, T::EXPECTED))
    }
}

/// Renders a scalar the way the game's description templates show it.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn lua_shaped_values() {
        let rec = record(json!({
            "id": 7,
            "float_int": 3.0,
            "flag": 1,
            "empty": {},
            "pairs": [[1, 2], [3, 4]],
            "nothing": null,
        }));
        let view = RecordView::identify(Table::Bullet, &rec).unwrap();

        assert_eq!(view.id(), 7);
        assert_eq!(view.get::<i64>("float_int").unwrap(), 3);
        assert!(view.get::<bool>("flag").unwrap());
        assert!(view.get::<Vec<i64>>("empty").unwrap().is_empty());
        assert_eq!(
            view.get::<Vec<(i64, i64)>>("pairs").unwrap(),
            vec![(1, 2), (3, 4)]
        );
        assert_eq!(view.opt::<i64>("nothing").unwrap(), None);
    }

    #[test]
    fn missing_and_mistyped_fields() {
        let rec = record(json!({"id": 1, "name": 5}));
        let view = RecordView::identify(Table::Weapon, &rec).unwrap();

        let err = view.get::<f64>("damage").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::MissingField {
                table: Table::Weapon,
                id: 1,
                field: "damage"
            }
        );

        let err = view.get::<String>("name").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Configuration { .. }));
    }

    #[test]
    fn inherits_absent_fields_only() {
        let rec = record(json!({"id": 2, "damage": 0, "range": null}));
        let view = RecordView::identify(Table::Weapon, &rec).unwrap();
        let base = (35_i64, 60_i64);

        // A present zero is not replaced by the base value.
        assert_eq!(view.get_or_inherit("damage", Some(&base), |b| b.0).unwrap(), 0);
        assert_eq!(view.get_or_inherit("range", Some(&base), |b| b.1).unwrap(), 60);
        assert!(
            view.get_or_inherit::<i64, (i64, i64)>("range", None, |b| b.1)
                .is_err()
        );
    }

    #[test]
    fn display_values() {
        assert_eq!(display_value(&json!("5.0%")), "5.0%");
        assert_eq!(display_value(&json!(12)), "12");
    }
}
