/// One normalized entry of the remote collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    pub id: i64,
    /// Primary sort key, `listId` on the wire.
    pub group_id: i64,
    pub name: Option<String>,
}

impl Record {
    pub fn new(id: i64, group_id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            group_id,
            name: Some(name.into()),
        }
    }

    /// A record whose `name` was `null` in the feed.
    pub fn unnamed(id: i64, group_id: i64) -> Self {
        Self {
            id,
            group_id,
            name: None,
        }
    }

    /// The display label, or an empty string when the name is absent.
    pub fn name_str(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn has_valid_name(&self) -> bool {
        self.name.as_deref().is_some_and(crate::is_valid_name)
    }
}
