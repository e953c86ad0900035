/// Declares a strongly-typed wrapper around [`Record`](crate::Record) for a model
/// with serialized attributes.
///
/// ```
/// use serialized_attributes::{ModelType, serialized_model};
///
/// serialized_model! {
///     pub struct Sprocket {
///         in_motion: bool,
///         #[accessible]
///         size: i64 = 1,
///         label: String = "new",
///     }
/// }
///
/// let model = ModelType::builder("Sprocket").serialized_attributes().build();
/// Sprocket::declare(&model).unwrap();
/// assert_eq!(model.serialized_attribute_names().unwrap(), vec!["in_motion", "size", "label"]);
/// ```
///
/// For every field the macro generates a getter `field()`, a setter `set_field(value)`
/// and, for `bool` fields, a predicate `is_field()`. The Rust type selects the
/// coercion through [`AttributeType`](crate::AttributeType).
#[macro_export]
macro_rules! serialized_model {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($fields:tt)*
        }
    ) => {
        $crate::serialized_model!(@parse [$(#[$meta])* $vis $name] [] [] $($fields)*);
    };
    (@parse $head:tt [$($acc:tt)*] [$($flag:ident)*]
        $(#[$attr:ident])* $field:ident : bool $(= $default:expr)? $(, $($rest:tt)*)?
    ) => {
        $crate::serialized_model!(
            @parse
            $head
            [$($acc)* ([$($attr)*] $field : bool [$($default)?])]
            [$($flag)* $field]
            $($($rest)*)?
        );
    };
    (@parse $head:tt [$($acc:tt)*] [$($flag:ident)*]
        $(#[$attr:ident])* $field:ident : $ty:ty $(= $default:expr)? $(, $($rest:tt)*)?
    ) => {
        $crate::serialized_model!(
            @parse
            $head
            [$($acc)* ([$($attr)*] $field : $ty [$($default)?])]
            [$($flag)*]
            $($($rest)*)?
        );
    };
    (@parse
        [$(#[$meta:meta])* $vis:vis $name:ident]
        [$(([$($attr:ident)*] $field:ident : $ty:ty [$($default:expr)?]))*]
        [$($flag:ident)*]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            record: $crate::Record,
        }

        impl $name {
            /// Registers every field as a serialized attribute of `model`.
            pub fn declare(model: &$crate::ModelType) -> $crate::Result<()> {
                $(
                    model.attribute(
                        stringify!($field),
                        <$ty as $crate::AttributeType>::sql_type(),
                        $crate::AttributeOptions::new()
                            .default_value($crate::__serialized_default!($ty; $($default)?))
                            .accessible($crate::__serialized_is_accessible!($($attr)*)),
                    )?;
                )*
                Ok(())
            }

            pub fn field_names() -> &'static [&'static str] {
                &[$(stringify!($field)),*]
            }

            pub fn from_record(record: $crate::Record) -> Self {
                Self { record }
            }

            pub fn record(&self) -> &$crate::Record {
                &self.record
            }

            pub fn record_mut(&mut self) -> &mut $crate::Record {
                &mut self.record
            }

            pub fn into_record(self) -> $crate::Record {
                self.record
            }

            $crate::paste::paste! {
                $(
                    pub fn $field(&self) -> $crate::Result<Option<$ty>> {
                        self.record.get_typed::<$ty>(stringify!($field))
                    }

                    pub fn [<set_ $field>](&mut self, value: $ty) -> $crate::Result<()> {
                        self.record.set(
                            stringify!($field),
                            <$ty as $crate::AttributeType>::into_value(value),
                        )
                    }
                )*

                $(
                    pub fn [<is_ $flag>](&self) -> $crate::Result<bool> {
                        self.record.predicate(stringify!($flag))
                    }
                )*
            }
        }

        impl From<$name> for $crate::Record {
            fn from(model: $name) -> Self {
                model.record
            }
        }
    };
}
