//! Small bit set newtypes with named constants and `a|b` text parsing.

macro_rules! flag_set {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident: $repr:ty {
            $( $(#[$cmeta:meta])* const $flag:ident = $bit:expr, $text:literal; )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        $vis struct $name($repr);

        impl $name {
            pub const NONE: Self = Self(0);
            $( $(#[$cmeta])* pub const $flag: Self = Self(1 << $bit); )*

            const FLAG_TABLE: &'static [(&'static str, $name)] = &[ $( ($text, $name::$flag), )* ];

            pub const fn bits(self) -> $repr {
                self.0
            }

            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }

            pub const fn contains(self, other: Self) -> bool {
                other.0 != 0 && (self.0 & other.0) == other.0
            }

            pub const fn intersects(self, other: Self) -> bool {
                (self.0 & other.0) != 0
            }

            /// Parses `"a|b|c"`, ignoring whitespace and empty segments.
            pub fn parse(text: &str) -> Option<Self> {
                let mut value = Self::NONE;
                for part in text.split('|').map(str::trim).filter(|p| !p.is_empty()) {
                    let (_, flag) = Self::FLAG_TABLE
                        .iter()
                        .find(|(name, _)| name.eq_ignore_ascii_case(part))?;
                    value |= *flag;
                }
                Some(value)
            }

            pub fn names(self) -> impl Iterator<Item = &'static str> {
                Self::FLAG_TABLE
                    .iter()
                    .filter(move |(_, flag)| self.contains(*flag))
                    .map(|(name, _)| *name)
            }
        }

        impl std::ops::BitOr for $name {
            type Output = Self;
            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl std::ops::BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }

        impl std::ops::BitAnd for $name {
            type Output = Self;
            fn bitand(self, rhs: Self) -> Self {
                Self(self.0 & rhs.0)
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let names: Vec<_> = self.names().collect();
                if names.is_empty() {
                    write!(f, "{}(none)", stringify!($name))
                } else {
                    write!(f, "{}({})", stringify!($name), names.join("|"))
                }
            }
        }
    };
}
