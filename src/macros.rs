// ============================================================================
// spark-spyglass - Ergonomic Macros
// ============================================================================

/// Build an [`OptionsPatch`](crate::OptionsPatch) from `field: value` pairs.
///
/// Each value goes through `Into`, so string literals work for
/// `border_color`. Fields not listed stay `None`.
///
/// # Usage
///
/// ```rust
/// use spark_spyglass::{patch, Shape};
///
/// let p = patch!(size: 400.0, border_width: 10.0, shape: Shape::Square);
/// assert_eq!(p.size, Some(400.0));
/// assert_eq!(p.opacity, None);
/// ```
#[macro_export]
macro_rules! patch {
    ($($field:ident : $value:expr),* $(,)?) => {
        $crate::OptionsPatch {
            $( $field: ::std::option::Option::Some(::std::convert::Into::into($value)), )*
            ..::std::default::Default::default()
        }
    };
}
