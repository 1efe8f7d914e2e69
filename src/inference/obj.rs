use indexmap::IndexMap;

use crate::ir::RuntimeValue;

/// A mapping whose keys are exactly `"0", "1", .., "n-1"` in that order is a
/// sequence in disguise; yield its values. `None` for a real object.
///
/// An empty mapping counts as an empty sequence.
pub(super) fn as_sequence(
    map: &IndexMap<String, RuntimeValue>,
) -> Option<impl Iterator<Item = &RuntimeValue>> {
    let index_keyed = map.keys()
        .enumerate()
        .all(|(i, k)| *k == i.to_string());
    index_keyed.then(|| map.values())
}
