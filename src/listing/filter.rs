//! Filter predicates over an in-memory collection.

/// An item the list filters can inspect.
///
/// `category_keys` returns `None` when the item's category mapping is absent
/// or malformed; such items never match an active category filter.
pub trait Filterable {
    fn id(&self) -> &str;
    fn flag(&self) -> bool;
    fn category_keys(&self) -> Option<Vec<&str>>;
}

/// Value of the category dimension that disables it.
pub const ALL: &str = "all";

/// The two independent filter dimensions.
///
/// `category: None` is the `"all"` value: no filtering on that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub flag: bool,
    pub category: Option<String>,
}

impl FilterState {
    /// Build a filter state, normalizing `""` and `"all"` to no category.
    pub fn new(flag: bool, category: Option<&str>) -> Self {
        Self {
            flag,
            category: normalize_category(category),
        }
    }

    /// The category as it is shown to users: the selected code or `"all"`.
    pub fn category_value(&self) -> &str {
        self.category.as_deref().unwrap_or(ALL)
    }

    /// The same state with the category normalized as in [`FilterState::new`].
    pub fn normalized(self) -> Self {
        Self {
            flag: self.flag,
            category: normalize_category(self.category.as_deref()),
        }
    }

    /// True when no dimension filters anything.
    pub fn is_default(&self) -> bool {
        !self.flag && self.category.is_none()
    }

    /// Whether `item` passes every active dimension.
    pub fn matches<T: Filterable + ?Sized>(&self, item: &T) -> bool {
        if self.flag && !item.flag() {
            return false;
        }
        if let Some(wanted) = &self.category {
            let Some(keys) = item.category_keys() else {
                return false;
            };
            if !keys
                .iter()
                .any(|k| !k.is_empty() && k.eq_ignore_ascii_case(wanted))
            {
                return false;
            }
        }
        true
    }

    /// Apply a single-dimension edit, returning whether anything changed.
    pub fn apply(&mut self, update: FilterUpdate) -> bool {
        let next = match update {
            FilterUpdate::Flag(flag) => Self {
                flag,
                category: self.category.clone(),
            },
            FilterUpdate::Category(value) => Self {
                flag: self.flag,
                category: normalize_category(Some(&value)),
            },
        };
        let changed = next != *self;
        *self = next;
        changed
    }
}

/// One edit to one filter dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterUpdate {
    Flag(bool),
    /// A category code, or `"all"` / `""` to clear the dimension.
    Category(String),
}

pub(crate) fn normalize_category(value: Option<&str>) -> Option<String> {
    match value.map(str::trim) {
        None | Some("") | Some(ALL) => None,
        Some(v) => Some(v.to_string()),
    }
}

/// Keep the items of `items` that pass `filters`, in their original order.
pub fn apply_filters<'a, T: Filterable>(items: &'a [T], filters: &FilterState) -> Vec<&'a T> {
    items.iter().filter(|item| filters.matches(*item)).collect()
}
