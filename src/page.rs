//! Fixed-size pagination over ordered collections.
//!
//! Display-layer utility with no knowledge of document semantics: any slice
//! can be cut into consecutive windows, the last of which may be shorter.

/// One window of an ordered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    items: &'a [T],
}

impl<'a, T> Page<'a, T> {
    pub fn items(&self) -> &'a [T] {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &Page<'a, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Slices `items` into consecutive pages of at most `page_size` elements.
///
/// The last page holds whatever remains and may be shorter. A `page_size`
/// of zero yields no pages.
pub fn paginate<T>(items: &[T], page_size: usize) -> Vec<Page<'_, T>> {
    if page_size == 0 {
        return Vec::new();
    }
    items.chunks(page_size).map(|chunk| Page { items: chunk }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case(7, 3, &[3, 3, 1])]
    #[case(6, 3, &[3, 3])]
    #[case(2, 5, &[2])]
    #[case(0, 3, &[])]
    fn page_sizes(#[case] items: usize, #[case] page_size: usize, #[case] expected: &[usize]) {
        let items: Vec<usize> = (0..items).collect();
        let pages = paginate(&items, page_size);
        let lengths: Vec<usize> = pages.iter().map(Page::len).collect();
        check!(lengths == expected);
    }

    #[test]
    fn page_size_zero_yields_no_pages() {
        let items = [1, 2, 3];
        check!(paginate(&items, 0).is_empty());
    }

    #[test]
    fn pages_preserve_order() {
        let items = ["a", "b", "c", "d", "e"];
        let pages = paginate(&items, 2);
        check!(pages[0].items() == ["a", "b"]);
        check!(pages[1].items() == ["c", "d"]);
        check!(pages[2].items() == ["e"]);

        let flattened: Vec<&str> = pages.iter().flat_map(Page::iter).copied().collect();
        check!(flattened == items);
    }
}
