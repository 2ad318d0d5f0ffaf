// Rust Elements Library
// Written in 2018 by
//   Andrew Poelstra <apoelstra@blockstream.com>
//
// To the extent possible under law, the author(s) have dedicated all
// copyright and related and neighboring rights to this software to
// the public domain worldwide. This software is distributed without
// any warranty.
//
// You should have received a copy of the CC0 Public Domain Dedication
// along with this software.
// If not, see <http://creativecommons.org/publicdomain/zero/1.0/>.
//

/// Implements `Display`, `Debug` and `FromStr` for a 32-byte newtype, using
/// the byte-reversed hex encoding of Elements Core.
///
/// `$to_bytes` maps `&Self` to `[u8; 32]`, `$from_bytes` maps `[u8; 32]` to
/// `Result<Self, $err>` where `$err: From<HexToArrayError>`.
macro_rules! display_from_str_reversed_hex {
    ($name:ident, $err:ty, $to_bytes:expr, $from_bytes:expr) => {
        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                let bytes: [u8; 32] = $to_bytes(self);
                for b in bytes.iter().rev() {
                    write!(f, "{:02x}", b)?;
                }
                Ok(())
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(self, f)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $err;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                use $crate::bitcoin::hex::FromHex;

                let mut bytes = <[u8; 32]>::from_hex(s)?;
                bytes.reverse();
                $from_bytes(bytes)
            }
        }
    };
}

/// Implements `serde` (de)serialization of a type through its string form.
macro_rules! serde_string_impl {
    ($name:ident, $expecting:expr) => {
        #[cfg(feature = "serde")]
        impl actual_serde::Serialize for $name {
            fn serialize<S: actual_serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.collect_str(self)
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> actual_serde::Deserialize<'de> for $name {
            fn deserialize<D: actual_serde::Deserializer<'de>>(d: D) -> Result<$name, D::Error> {
                struct Visitor;

                impl<'de> actual_serde::de::Visitor<'de> for Visitor {
                    type Value = $name;

                    fn expecting(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                        f.write_str($expecting)
                    }

                    fn visit_str<E: actual_serde::de::Error>(self, v: &str) -> Result<$name, E> {
                        v.parse().map_err(E::custom)
                    }
                }

                d.deserialize_str(Visitor)
            }
        }
    };
}
