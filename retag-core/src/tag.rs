//! Tag composition helpers and the per-batch prefix transform.
//!
//! Tags are dot-segmented routing keys. New segments are joined with a `.`
//! separator, except onto an empty tag, where the segment becomes the whole
//! tag. The separator is decided once per rule application, before any of
//! that rule's segments are appended.

/// Returns the separator to use for segments appended by one rule
/// application, given the tag as it stood at rule entry.
pub fn segment_prefix(tag: &str) -> &'static str {
    if tag.is_empty() {
        ""
    } else {
        "."
    }
}

/// Appends one segment to `tag` using a previously computed separator.
pub fn append_segment(tag: &mut String, prefix: &str, segment: &str) {
    tag.push_str(prefix);
    tag.push_str(segment);
}

/// Strips a configured prefix from, and adds a configured prefix to, the
/// batch's original tag. Applied once per incoming batch; every record in
/// the batch starts rule evaluation from the same transformed base tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagTransform {
    remove_prefix: Option<String>,
    add_prefix: Option<String>,
}

impl TagTransform {
    pub fn new(remove_prefix: Option<String>, add_prefix: Option<String>) -> Self {
        Self {
            remove_prefix,
            add_prefix,
        }
    }

    /// Computes the transformed base tag for a batch.
    ///
    /// The prefix is stripped when the tag starts with `"<prefix>."` and
    /// extends past it, or equals the prefix exactly (leaving the empty
    /// string). The added prefix is joined with a `.` unless the stripped
    /// tag is empty, in which case the prefix alone is the result.
    pub fn apply(&self, tag: &str) -> String {
        let mut tag = tag.to_string();

        if let Some(remove) = &self.remove_prefix {
            let dotted = format!("{remove}.");
            if (tag.starts_with(&dotted) && tag.len() > dotted.len()) || tag == *remove {
                tag = tag.get(dotted.len()..).unwrap_or("").to_string();
            }
        }

        if let Some(add) = &self.add_prefix {
            tag = if tag.is_empty() {
                add.clone()
            } else {
                format!("{add}.{tag}")
            };
        }

        tag
    }
}
