// Rust Bitcoin Library
// Written by
//   The Rust Bitcoin developers
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

/// Fill in `$slf.$thing` from `$other.$thing` when only the latter is set.
macro_rules! merge {
    ($thing:ident, $slf:ident, $other:ident) => {
        if let (&None, Some($thing)) = (&$slf.$thing, $other.$thing) {
            $slf.$thing = Some($thing);
        }
    };
}

/// Like `merge!`, but both sides being set to different values is a
/// conflict. Used for fields that commit to blinding data, where silently
/// keeping one side would break the balance of the transaction.
macro_rules! merge_strict {
    ($thing:ident, $slf:ident, $other:ident) => {
        match (&$slf.$thing, $other.$thing) {
            (&None, Some($thing)) => $slf.$thing = Some($thing),
            (&Some(ref a), Some(ref b)) if a != b => {
                return Err($crate::pset::Error::MergeConflict(format!(
                    "{} differs",
                    stringify!($thing)
                )));
            }
            _ => {}
        }
    };
}
