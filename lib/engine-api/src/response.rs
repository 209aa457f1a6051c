use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::GraphQLError;

/// One segment of a response path: a field name or a list index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

impl Serialize for PathSegment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PathSegment::Field(name) => serializer.serialize_str(name),
            PathSegment::Index(idx) => serializer.serialize_u64(*idx as u64),
        }
    }
}

/// Ordered path from the response root down to one field occurrence.
///
/// Renders as `user.friends[0].name`: fields joined with dots, list indices
/// in brackets.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ResponsePath(Vec<PathSegment>);

impl ResponsePath {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        ResponsePath(segments)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// A new path with a field segment appended.
    pub fn child_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Field(name.into()));
        ResponsePath(segments)
    }

    /// A new path with an index segment appended.
    pub fn child_index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        ResponsePath(segments)
    }
}

impl fmt::Display for ResponsePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}

impl FromIterator<PathSegment> for ResponsePath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        ResponsePath(iter.into_iter().collect())
    }
}

/// The complete result of one operation, as produced by the next handler
/// and passed through interceptors unmodified.
#[derive(Debug, Default)]
pub struct Response {
    pub data: Option<serde_json::Value>,
    pub errors: Vec<GraphQLError>,
}

/// The result of resolving one field: the value plus any errors the engine
/// recorded for this exact field context.
#[derive(Debug, Default)]
pub struct ResolvedField {
    pub value: Option<serde_json::Value>,
    pub errors: Vec<GraphQLError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_renders_fields_and_indices() {
        let path = ResponsePath::default()
            .child_field("user")
            .child_field("friends")
            .child_index(0)
            .child_field("name");
        assert_eq!(path.to_string(), "user.friends[0].name");
    }

    #[test]
    fn path_segments_serialize_as_string_or_number() {
        let path = ResponsePath::default().child_field("user").child_index(2);
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, r#"["user",2]"#);
    }
}
