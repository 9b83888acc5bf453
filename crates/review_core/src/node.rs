use std::fmt;

/// Identifier assigned by the host bookmark store. Unique across one result tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookmarkId(String);

impl BookmarkId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BookmarkId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for BookmarkId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Classification handed over by the validation engine. Only meaningful on leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkStatus {
    Ok,
    Redirect,
    NotFound,
    FetchError,
    Timeout,
    UnknownError,
}

impl BookmarkStatus {
    pub fn tags(self) -> CategorySet {
        match self {
            BookmarkStatus::Redirect => {
                CategorySet::from_tags(&[CategoryTag::Warning, CategoryTag::Redirect])
            }
            BookmarkStatus::NotFound | BookmarkStatus::FetchError => {
                CategorySet::from_tags(&[CategoryTag::Error])
            }
            BookmarkStatus::Timeout | BookmarkStatus::UnknownError => {
                CategorySet::from_tags(&[CategoryTag::Unknown])
            }
            BookmarkStatus::Ok => CategorySet::EMPTY,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BookmarkStatus::Ok => "ok",
            BookmarkStatus::Redirect => "redirect",
            BookmarkStatus::NotFound | BookmarkStatus::FetchError => "not found",
            BookmarkStatus::Timeout | BookmarkStatus::UnknownError => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CategoryTag {
    Error,
    Warning,
    Unknown,
    Redirect,
}

impl CategoryTag {
    pub const ALL: [CategoryTag; 4] = [
        CategoryTag::Error,
        CategoryTag::Warning,
        CategoryTag::Unknown,
        CategoryTag::Redirect,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CategoryTag::Error => "error",
            CategoryTag::Warning => "warning",
            CategoryTag::Unknown => "unknown",
            CategoryTag::Redirect => "redirect",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        CategoryTag::ALL
            .into_iter()
            .find(|tag| tag.name().eq_ignore_ascii_case(name))
    }

    fn bit(self) -> u8 {
        match self {
            CategoryTag::Error => 1,
            CategoryTag::Warning => 1 << 1,
            CategoryTag::Unknown => 1 << 2,
            CategoryTag::Redirect => 1 << 3,
        }
    }
}

impl fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Small set of category tags, stored as bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CategorySet(u8);

impl CategorySet {
    pub const EMPTY: CategorySet = CategorySet(0);

    pub fn all() -> Self {
        Self::from_tags(&CategoryTag::ALL)
    }

    pub fn from_tags(tags: &[CategoryTag]) -> Self {
        let mut set = Self::EMPTY;
        for tag in tags {
            set.insert(*tag);
        }
        set
    }

    pub fn insert(&mut self, tag: CategoryTag) {
        self.0 |= tag.bit();
    }

    pub fn remove(&mut self, tag: CategoryTag) {
        self.0 &= !tag.bit();
    }

    pub fn contains(self, tag: CategoryTag) -> bool {
        self.0 & tag.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn is_subset_of(self, other: CategorySet) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = CategoryTag> {
        CategoryTag::ALL
            .into_iter()
            .filter(move |tag| self.contains(*tag))
    }
}

/// One node of the validation result as received from the engine.
///
/// A node with a non-empty `url` is a bookmark leaf, anything else is a folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultNode {
    pub id: BookmarkId,
    pub title: Option<String>,
    pub url: Option<String>,
    pub status: Option<BookmarkStatus>,
    pub new_url: Option<String>,
    pub children: Vec<ResultNode>,
}

impl ResultNode {
    pub fn leaf(
        id: impl Into<BookmarkId>,
        title: impl Into<String>,
        url: impl Into<String>,
        status: Option<BookmarkStatus>,
    ) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            url: Some(url.into()),
            status,
            new_url: None,
            children: Vec::new(),
        }
    }

    pub fn folder(
        id: impl Into<BookmarkId>,
        title: impl Into<String>,
        children: Vec<ResultNode>,
    ) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            url: None,
            status: None,
            new_url: None,
            children,
        }
    }

    pub fn with_new_url(mut self, new_url: impl Into<String>) -> Self {
        self.new_url = Some(new_url.into());
        self
    }

    /// The bookmark URL, treating an empty string as absent.
    pub fn bookmark_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }

    pub fn is_leaf(&self) -> bool {
        self.bookmark_url().is_some()
    }

    pub fn tags(&self) -> CategorySet {
        self.status.map(BookmarkStatus::tags).unwrap_or_default()
    }
}
