/// A dotted attribute-key namespace built up segment by segment.
///
/// Appending always copies: paths are shared as prefixes across many call
/// sites, so no returned path may alias another's buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrPath {
    segments: Vec<String>,
}

impl AttrPath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AttrPath {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// A new path equal to this one with `parts` appended.
    pub fn with<I, S>(&self, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut segments = self.segments.clone();
        segments.extend(parts.into_iter().map(Into::into));
        AttrPath { segments }
    }

    /// The flat key form: segments joined with `.`.
    pub fn encode(&self) -> String {
        self.segments.join(".")
    }
}
