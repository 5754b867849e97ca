//! Declarative helpers shared by the coded enumerations.

/// Wire form accepted for a coded enumeration: its variant name or its code.
#[derive(serde::Deserialize)]
#[serde(untagged)]
pub(crate) enum EnumRepr {
    Code(i64),
    Name(String),
}

/// Declares a fieldless enum whose variants carry a fixed numeric code.
///
/// The generated type serializes as the variant name and deserializes from
/// either the name (case-insensitive) or the code. Anything else is a
/// [`DomainError::InvalidValue`](crate::error::DomainError::InvalidValue).
macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($kind:literal) {
            $($(#[$vmeta:meta])* $variant:ident = $code:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
        #[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Numeric code of the variant
            pub const fn code(self) -> i32 {
                match self {
                    $($name::$variant => $code),+
                }
            }

            /// Variant name as it appears on the wire
            pub const fn name(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl TryFrom<i64> for $name {
            type Error = $crate::error::DomainError;

            fn try_from(code: i64) -> Result<Self, Self::Error> {
                match code {
                    $($code => Ok($name::$variant),)+
                    other => Err($crate::error::DomainError::invalid_value($kind, other)),
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|variant| variant.name().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| $crate::error::DomainError::invalid_value($kind, s))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let repr =
                    <$crate::macros::EnumRepr as serde::Deserialize>::deserialize(deserializer)?;
                let parsed = match repr {
                    $crate::macros::EnumRepr::Code(code) => $name::try_from(code),
                    $crate::macros::EnumRepr::Name(name) => name.parse(),
                };
                parsed.map_err(serde::de::Error::custom)
            }
        }
    };
}
