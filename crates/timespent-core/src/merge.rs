//! Past-event color merging.
//!
//! The calendar draws past and declined events with the category color at 30%
//! opacity over white, so a single category shows up under two colors. This
//! module folds the faded group back into the group of its original color.

use crate::color::{ColorKey, Rgb};

/// Events of one pass sharing a background color, in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorGroup<T> {
    pub key: ColorKey,
    pub events: Vec<T>,
}

/// Groups `items` by the key `key_of` returns, keeping first-seen key order
/// and the original order of items inside each group.
pub fn group_by_color<T>(items: impl IntoIterator<Item = T>, key_of: impl Fn(&T) -> ColorKey) -> Vec<ColorGroup<T>> {
    let mut groups: Vec<ColorGroup<T>> = Vec::new();
    for item in items {
        let key = key_of(&item);
        match groups.iter_mut().find(|group| group.key == key) {
            Some(group) => group.events.push(item),
            None => groups.push(ColorGroup {
                key,
                events: vec![item],
            }),
        }
    }
    groups
}

/// Merges every faded group into the group of its original color.
///
/// Each group is compared against every other group by index, so a group is
/// never its own faded version even when two keys parse to the same RGB. When
/// several faded candidates match, the first one in group order wins. The
/// not-accepted sentinel never takes part on either side, and neither does a
/// key that does not parse as `rgb(..)`. Chains (A fades to B, B fades to C)
/// end up in the group holding A. A faded group is absorbed at most once, so a
/// second original matching the same shade keeps its own events.
pub fn merge_past_event_colors<T>(groups: Vec<ColorGroup<T>>) -> Vec<ColorGroup<T>> {
    let parsed: Vec<Option<Rgb>> = groups.iter().map(|group| group.key.parse()).collect();
    let sentinel: Vec<bool> = groups
        .iter()
        .map(|group| group.key.is_not_accepted_yet())
        .collect();

    // owner[i] is the index of the group currently holding group i's events
    let mut owner: Vec<usize> = (0..groups.len()).collect();
    let mut slots: Vec<Option<ColorGroup<T>>> = groups.into_iter().map(Some).collect();

    for original in 0..slots.len() {
        let Some(original_rgb) = parsed[original] else {
            continue;
        };
        let Some(faded) = find_faded_index(original, original_rgb, &parsed) else {
            continue;
        };
        if sentinel[original] || sentinel[faded] {
            continue;
        }

        // a faded group already absorbed by another original stays there
        if slots[faded].is_none() {
            continue;
        }
        let target = resolve_owner(&owner, original);
        if target == faded {
            continue;
        }

        let Some(absorbed) = slots[faded].take() else {
            continue;
        };
        if let Some(group) = slots[target].as_mut() {
            log::debug!(
                "merging past-event color {} into {}",
                absorbed.key,
                group.key
            );
            group.events.extend(absorbed.events);
        }
        owner[faded] = target;
    }

    slots.into_iter().flatten().collect()
}

fn find_faded_index(original: usize, original_rgb: Rgb, parsed: &[Option<Rgb>]) -> Option<usize> {
    parsed.iter().enumerate().find_map(|(index, candidate)| {
        let candidate = (*candidate)?;
        (index != original && candidate.is_faded_version_of(original_rgb)).then_some(index)
    })
}

fn resolve_owner(owner: &[usize], mut index: usize) -> usize {
    while owner[index] != index {
        index = owner[index];
    }
    index
}
