use std::collections::BTreeSet;

pub fn prop_intersection_correct<S>(result: &[u16], sets: &[S]) -> bool
where
    S: AsRef<[u16]>,
{
    prop_strictly_increasing(result) &&
    prop_result_items_all_common(result, sets) &&
    prop_all_common_items_in_result(result, sets)
}

pub fn prop_strictly_increasing(result: &[u16]) -> bool {
    result.windows(2).all(|w| w[0] < w[1])
}

// If an item is in the result, then it is a common item.
pub fn prop_result_items_all_common<S>(result: &[u16], sets: &[S]) -> bool
where
    S: AsRef<[u16]>,
{
    result.iter().all(|result_item| {
        sets.iter().all(|input_set| {
            input_set.as_ref().binary_search(result_item).is_ok()
        })
    })
}

// If an item is common, then it is in the result.
pub fn prop_all_common_items_in_result<S>(result: &[u16], sets: &[S]) -> bool
where
    S: AsRef<[u16]>,
{
    let Some(first) = sets.first() else {
        return result.is_empty();
    };
    for item in first.as_ref() {
        if sets.iter().skip(1).all(|set| set.as_ref().binary_search(item).is_ok())
            && result.binary_search(item).is_err()
        {
            return false;
        }
    }
    true
}

pub fn set_union(a: &[u16], b: &[u16]) -> Vec<u16> {
    let set: BTreeSet<u16> = a.iter().chain(b).copied().collect();
    set.into_iter().collect()
}

pub fn set_difference(a: &[u16], b: &[u16]) -> Vec<u16> {
    let other: BTreeSet<u16> = b.iter().copied().collect();
    a.iter().copied().filter(|value| !other.contains(value)).collect()
}
