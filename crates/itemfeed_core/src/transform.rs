use crate::Record;

/// Filters out records without a usable name and sorts the rest by
/// `group_id`, then by the number embedded in the name.
///
/// Both keys ascend; records with equal keys keep their relative input order.
pub fn clean(records: Vec<Record>) -> Vec<Record> {
    let mut keyed: Vec<((i64, u64), Record)> = records
        .into_iter()
        .filter(Record::has_valid_name)
        .map(|record| ((record.group_id, name_suffix(record.name_str())), record))
        .collect();

    // `sort_by_key` is stable: same as a suffix pass followed by a group pass.
    keyed.sort_by_key(|(key, _)| *key);
    keyed.into_iter().map(|(_, record)| record).collect()
}

/// A name is usable unless it is blank or the literal text `null`.
pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty() && name != "null"
}

/// Concatenates every ASCII digit in `name` and reads the result as a number.
///
/// Names without digits yield `0`. Overlong digit runs saturate at `u64::MAX`.
pub fn name_suffix(name: &str) -> u64 {
    name.bytes()
        .filter(u8::is_ascii_digit)
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10)
                .saturating_add(u64::from(digit - b'0'))
        })
}
