/// Builds a [`Value`](crate::Value) from JSON-like literal syntax.
///
/// Any other expression is converted with [`to_value`](crate::to_value), so
/// numbers, strings and serializable structs can appear as leaves.
///
/// ```rust
/// use chartjs_schema::{value, Value};
///
/// let point = value!({ "x": "2025-08-11", "y": 2 });
/// assert_eq!(point.get("y").and_then(Value::as_i64), Some(2));
///
/// let series = value!([0, 1, 2, 3]);
/// assert_eq!(series.as_array().map(Vec::len), Some(4));
/// ```
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::value!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.insert($key.to_string(), $crate::value!($value));
        )*
        $crate::Value::Object(object)
    }};

    ($s:expr) => {
        $crate::to_value(&$s).unwrap_or($crate::Value::Null)
    };
}

/// Getter and `with_*` setter pairs for model fields.
///
/// Setters consume the model, assign the field and record it as explicitly
/// set. Kinds:
///
/// - `copy`: `Copy` values, returned by value
/// - `text`: `String` fields, set from anything `Into<String>`
/// - `owned`: other owned values, returned by reference
/// - `optional`: `Option<T>` fields, returned as `Option<&T>`
/// - `optional_copy`: `Option<T>` fields of `Copy` types
macro_rules! field_accessors {
    ($( $(#[$meta:meta])* $kind:ident $field:ident, $setter:ident: $ty:ty; )*) => {
        $( field_accessors!(@one $(#[$meta])* $kind $field, $setter: $ty); )*
    };

    (@one $(#[$meta:meta])* copy $field:ident, $setter:ident: $ty:ty) => {
        $(#[$meta])*
        #[must_use]
        pub fn $field(&self) -> $ty {
            self.$field
        }

        #[must_use]
        pub fn $setter(mut self, value: $ty) -> Self {
            self.$field = value;
            self.fields_set.mark(stringify!($field));
            self
        }
    };

    (@one $(#[$meta:meta])* text $field:ident, $setter:ident: $ty:ty) => {
        $(#[$meta])*
        #[must_use]
        pub fn $field(&self) -> &str {
            &self.$field
        }

        #[must_use]
        pub fn $setter(mut self, value: impl Into<$ty>) -> Self {
            self.$field = value.into();
            self.fields_set.mark(stringify!($field));
            self
        }
    };

    (@one $(#[$meta:meta])* owned $field:ident, $setter:ident: $ty:ty) => {
        $(#[$meta])*
        #[must_use]
        pub fn $field(&self) -> &$ty {
            &self.$field
        }

        #[must_use]
        pub fn $setter(mut self, value: impl Into<$ty>) -> Self {
            self.$field = value.into();
            self.fields_set.mark(stringify!($field));
            self
        }
    };

    (@one $(#[$meta:meta])* optional $field:ident, $setter:ident: $ty:ty) => {
        $(#[$meta])*
        #[must_use]
        pub fn $field(&self) -> Option<&$ty> {
            self.$field.as_ref()
        }

        #[must_use]
        pub fn $setter(mut self, value: impl Into<$ty>) -> Self {
            self.$field = Some(value.into());
            self.fields_set.mark(stringify!($field));
            self
        }
    };

    (@one $(#[$meta:meta])* optional_copy $field:ident, $setter:ident: $ty:ty) => {
        $(#[$meta])*
        #[must_use]
        pub fn $field(&self) -> Option<$ty> {
            self.$field
        }

        #[must_use]
        pub fn $setter(mut self, value: $ty) -> Self {
            self.$field = Some(value);
            self.fields_set.mark(stringify!($field));
            self
        }
    };
}

/// Wires a [`Model`](crate::model::Model) into the value traits and serde.
///
/// `Serialize` emits the default-pruned form; `Deserialize` accepts either
/// key spelling, exactly like `from_value`.
macro_rules! impl_model_serde {
    ($($model:ty),+ $(,)?) => {
        $(
            impl $crate::model::ToValue for $model {
                fn to_value(&self, options: &$crate::SerializeOptions) -> $crate::Result<$crate::Value> {
                    $crate::ser::dump(self, options)
                }
            }

            impl $crate::model::FromValue for $model {
                fn from_value(value: &$crate::Value) -> $crate::Result<Self> {
                    $crate::model::construct::<$model>(value)
                }
            }

            impl ::serde::Serialize for $model {
                fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
                where
                    S: ::serde::Serializer,
                {
                    let value = $crate::ser::dump(self, &$crate::SerializeOptions::default())
                        .map_err(<S::Error as ::serde::ser::Error>::custom)?;
                    ::serde::Serialize::serialize(&value, serializer)
                }
            }

            impl<'de> ::serde::Deserialize<'de> for $model {
                fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
                where
                    D: ::serde::Deserializer<'de>,
                {
                    let value = <$crate::Value as ::serde::Deserialize>::deserialize(deserializer)?;
                    $crate::model::construct::<$model>(&value)
                        .map_err(<D::Error as ::serde::de::Error>::custom)
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use crate::{Map, Number, Value};

    #[test]
    fn test_value_macro_primitives() {
        assert_eq!(value!(null), Value::Null);
        assert_eq!(value!(true), Value::Bool(true));
        assert_eq!(value!(42), Value::Number(Number::Integer(42)));
        assert_eq!(value!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(value!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_value_macro_nested() {
        assert_eq!(value!({}), Value::Object(Map::new()));

        let obj = value!({
            "datasets": [{ "data": [1, 2] }],
            "labels": null
        });
        let datasets = obj.get("datasets").and_then(Value::as_array).unwrap();
        assert_eq!(datasets.len(), 1);
        assert_eq!(
            datasets[0].get("data"),
            Some(&Value::Array(vec![Value::from(1), Value::from(2)]))
        );
        assert_eq!(obj.get("labels"), Some(&Value::Null));
    }
}
