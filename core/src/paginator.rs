use std::fmt;
use std::ops::Deref;

/// A contiguous run of items from a paginated slice.
#[derive(Debug, PartialEq)]
pub struct Page<'a, T>(&'a [T]);

impl<T> Clone for Page<'_, T> {
    fn clone(&self) -> Self { *self }
}

impl<T> Copy for Page<'_, T> {}

impl<T> Deref for Page<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] { self.0 }
}

impl<T: fmt::Display> fmt::Display for Page<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in self.0 {
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

/// Splits a slice into pages of `page_size` items; the last page may be shorter.
#[derive(Debug, Clone)]
pub struct Paginator<'a, T> {
    pages: Vec<Page<'a, T>>,
    page_size: usize,
}

impl<'a, T> Paginator<'a, T> {
    /// A page size of zero is treated as one.
    pub fn new(items: &'a [T], page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self { pages: items.chunks(page_size).map(Page).collect(), page_size }
    }

    /// Number of pages.
    pub fn len(&self) -> usize { self.pages.len() }

    pub fn is_empty(&self) -> bool { self.pages.is_empty() }

    pub fn page_size(&self) -> usize { self.page_size }

    pub fn get(&self, index: usize) -> Option<Page<'a, T>> { self.pages.get(index).copied() }

    pub fn iter(&self) -> impl Iterator<Item = Page<'a, T>> + '_ { self.pages.iter().copied() }
}

impl<'a, T> IntoIterator for Paginator<'a, T> {
    type Item = Page<'a, T>;
    type IntoIter = std::vec::IntoIter<Page<'a, T>>;

    fn into_iter(self) -> Self::IntoIter { self.pages.into_iter() }
}

pub fn paginate<T>(items: &[T], page_size: usize) -> Paginator<'_, T> { Paginator::new(items, page_size) }
