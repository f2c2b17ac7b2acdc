use crate::model::Record;

/// Derives the active view: records whose name, email or role contains the
/// token, compared case-insensitively. An empty token keeps everything.
///
/// Never cached, so store mutations show up on the next call.
pub fn apply<'a>(records: &'a [Record], token: &str) -> Vec<&'a Record> {
    if token.is_empty() {
        return records.iter().collect();
    }
    let needle = token.to_lowercase();
    records.iter().filter(|r| matches(r, &needle)).collect()
}

fn matches(record: &Record, needle: &str) -> bool {
    record.name.to_lowercase().contains(needle)
        || record.email.to_lowercase().contains(needle)
        || record.role.to_lowercase().contains(needle)
}
