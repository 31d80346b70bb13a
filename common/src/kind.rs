//! Macros for defining kind enums.

/// Macro for defining a kind enum, stringified in `snake_case` both for
/// display and (de)serialization, the way the catalog API spells its
/// enumerated fields.
///
/// Requires the `serde` Cargo feature to be enabled.
///
/// # Example
///
/// ```rust
/// # use crate::common::define_kind;
///
/// define_kind! {
///     #[doc = "Shape kind."]
///     enum Kind {
///         #[doc = "A cube"]
///         Cube,
///
///         #[doc = "A sphere"]
///         Sphere,
///     }
/// }
/// ```
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            $crate::private::serde::Deserialize,
            $crate::private::serde::Serialize,
            Eq,
            Hash,
            PartialEq,
        )]
        #[doc = $doc]
        #[serde(rename_all = "snake_case")]
        #[strum(serialize_all = "snake_case")]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $variant,
            )*
        }
    };
}
