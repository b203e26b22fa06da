/// Defines a closed identifier enum with a stable slug, a display name and
/// optional parse aliases.
///
/// Generated items: `slug()`, `name()`, `from_name()`, `all_variants()`,
/// `Serialize`/`Deserialize` through the slug, `Display` (display name) and
/// `FromStr` (slug, display name or alias, case-insensitive).
#[macro_export]
macro_rules! define_id_enum {
    (
        $(#[$enum_meta:meta])*
        $enum_name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $slug:literal : $display_name:literal
                $( | $alias:literal )*
            ),* $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $enum_name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl serde::Serialize for $enum_name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.slug())
            }
        }

        impl<'de> serde::Deserialize<'de> for $enum_name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                Self::from_name(&s).ok_or_else(|| {
                    <D::Error as serde::de::Error>::custom(format!(
                        "unknown {}: {}",
                        stringify!($enum_name),
                        s
                    ))
                })
            }
        }

        impl $enum_name {
            pub fn slug(&self) -> &'static str {
                match self {
                    $(
                        Self::$variant => $slug,
                    )*
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $(
                        Self::$variant => $display_name,
                    )*
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                let lowered = name.to_ascii_lowercase();
                $(
                    if lowered == $slug
                        || name.eq_ignore_ascii_case($display_name)
                        $( || lowered == $alias )*
                    {
                        return Some(Self::$variant);
                    }
                )*
                None
            }

            pub fn all_variants() -> &'static [Self] {
                &[
                    $(
                        Self::$variant,
                    )*
                ]
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_name(s).ok_or_else(|| {
                    let valid: Vec<&str> = Self::all_variants().iter().map(|v| v.slug()).collect();
                    format!("Invalid {}: {}. Valid options: {}", stringify!($enum_name), s, valid.join(", "))
                })
            }
        }
    };
}
