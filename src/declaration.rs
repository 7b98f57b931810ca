//! Style declarations over a closed set of typed properties.
//!
//! A [`Declaration`] is a "fat enum": the variant names the property and
//! carries its strongly typed value. [`PropertyId`] is the fieldless twin used
//! as the declaration's name when merging and when looking up appliers.
//! The marker types in [`property`] connect the two at compile time so that
//! appliers receive `&Color`, `&f32`, ... instead of an untyped payload.

use std::fmt;

use crate::error::{Error, Result};
use crate::value::ToCss;

/// A property known at compile time.
///
/// Implemented by the unit structs in [`property`].
pub trait Property: 'static {
    /// Name of the property.
    const ID: PropertyId;
    /// Payload type of declarations of this property.
    type Value;

    /// Borrow the payload if `decl` declares this property.
    fn value(decl: &Declaration) -> Option<&Self::Value>;

    /// Wrap a payload into a declaration.
    fn declare(value: Self::Value) -> Declaration;
}

/// Defines [`Declaration`], [`PropertyId`] and the [`property`] markers from a
/// single property list.
///
/// Value types must be written as absolute paths because the markers live in
/// a nested module.
macro_rules! declare_properties {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident($value:ty) => $name:literal
        ),* $(,)?
    ) => {
        /// A style declaration: one property with its value.
        #[derive(Debug, Clone, PartialEq)]
        #[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
        pub enum Declaration {
            $(
                $(#[$meta])*
                $variant($value),
            )*
        }

        /// Property name of a declaration.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
        pub enum PropertyId {
            $(
                $(#[$meta])*
                $variant,
            )*
        }

        impl PropertyId {
            /// Every property, in declaration order.
            pub const ALL: &'static [PropertyId] = &[$(PropertyId::$variant,)*];

            /// The property name as used in style sheets.
            #[inline]
            pub fn name(&self) -> &'static str {
                match self {
                    $(PropertyId::$variant => $name,)*
                }
            }

            /// Look a property up by name.
            #[inline]
            pub fn from_name(s: &str) -> Option<Self> {
                match s {
                    $($name => Some(PropertyId::$variant),)*
                    _ => None,
                }
            }
        }

        impl Declaration {
            /// The property this declaration sets.
            #[inline]
            pub fn property(&self) -> PropertyId {
                match self {
                    $(Declaration::$variant(_) => PropertyId::$variant,)*
                }
            }

            fn value_to_css(&self, buf: &mut String) {
                match self {
                    $(Declaration::$variant(v) => v.to_css(buf),)*
                }
            }
        }

        /// Compile-time property markers, one per [`Declaration`] variant.
        pub mod property {
            $(
                $(#[$meta])*
                #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
                pub struct $variant;

                impl super::Property for $variant {
                    const ID: super::PropertyId = super::PropertyId::$variant;
                    type Value = $value;

                    #[inline]
                    fn value(decl: &super::Declaration) -> Option<&$value> {
                        match decl {
                            super::Declaration::$variant(v) => Some(v),
                            _ => None,
                        }
                    }

                    #[inline]
                    fn declare(value: $value) -> super::Declaration {
                        super::Declaration::$variant(value)
                    }
                }
            )*
        }
    };
}

declare_properties! {
    /// Foreground color: label text, button title, text field text.
    Color(crate::value::Color) => "Color",
    /// Background fill of the view.
    BackgroundColor(crate::value::Color) => "BackgroundColor",
    /// Corner radius in points.
    CornerRadius(f32) => "CornerRadius",
    ShadowColor(crate::value::Color) => "ShadowColor",
    ShadowRadius(f32) => "ShadowRadius",
    ShadowOffset(crate::value::Size) => "ShadowOffset",
    /// Shadow opacity, 0.0 to 1.0.
    ShadowOpacity(f32) => "ShadowOpacity",
    Font(crate::value::Font) => "Font",
    BorderWidth(f32) => "BorderWidth",
    BorderColor(crate::value::Color) => "BorderColor",
}

impl PropertyId {
    /// Like [`PropertyId::from_name`], but reports unknown names as errors.
    pub fn parse(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| Error::UnknownProperty(s.to_string()))
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Declaration {
    /// The property name of this declaration.
    pub fn name(&self) -> &'static str {
        self.property().name()
    }
}

impl ToCss for Declaration {
    fn to_css(&self, buf: &mut String) {
        buf.push_str(self.name());
        buf.push_str(": ");
        self.value_to_css(buf);
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Color, Size};

    #[test]
    fn test_property_names_round_trip() {
        for &id in PropertyId::ALL {
            assert_eq!(PropertyId::from_name(id.name()), Some(id));
        }
        assert_eq!(PropertyId::ALL.len(), 10);
    }

    #[test]
    fn test_parse_unknown_property() {
        assert_eq!(PropertyId::parse("CornerRadius").unwrap(), PropertyId::CornerRadius);
        let err = PropertyId::parse("Nonexistent").unwrap_err();
        assert!(matches!(err, Error::UnknownProperty(ref name) if name == "Nonexistent"));
    }

    #[test]
    fn test_declaration_property() {
        let decl = Declaration::ShadowOffset(Size::new(4.0, 10.0));
        assert_eq!(decl.property(), PropertyId::ShadowOffset);
        assert_eq!(decl.name(), "ShadowOffset");
    }

    #[test]
    fn test_typed_markers() {
        let decl = property::Color::declare(Color::GREEN);
        assert_eq!(decl, Declaration::Color(Color::GREEN));
        assert_eq!(property::Color::value(&decl), Some(&Color::GREEN));
        assert_eq!(property::BackgroundColor::value(&decl), None);
        assert_eq!(<property::CornerRadius as Property>::ID, PropertyId::CornerRadius);
    }

    #[test]
    fn test_display() {
        assert_eq!(Declaration::Color(Color::MAGENTA).to_string(), "Color: #ff00ff");
        assert_eq!(Declaration::CornerRadius(10.0).to_string(), "CornerRadius: 10");
    }
}
