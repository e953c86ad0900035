#[macro_export]
#[doc(hidden)]
macro_rules! __serialized_is_accessible {
    () => {
        false
    };
    (accessible $($rest:ident)*) => {
        true
    };
    ($_head:ident $($rest:ident)*) => {
        $crate::__serialized_is_accessible!($($rest)*)
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! __serialized_default {
    ($ty:ty;) => {
        $crate::Value::Null
    };
    ($ty:ty; $default:expr) => {
        <$ty as $crate::AttributeType>::into_value(::std::convert::Into::<$ty>::into($default))
    };
}
