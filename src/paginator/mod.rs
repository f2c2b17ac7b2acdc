pub const PAGE_SIZE: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub total_pages: usize,
}

pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

// stateless: page numbers are 1-indexed and never clamped here, an
// out-of-range page simply yields no rows
pub fn slice<T: Clone>(view: &[T], page_number: usize, page_size: usize) -> Page<T> {
    let total_pages = total_pages(view.len(), page_size);
    let start = page_number.saturating_sub(1).saturating_mul(page_size);
    let rows = if page_number == 0 || start >= view.len() {
        Vec::new()
    } else {
        let end = start.saturating_add(page_size).min(view.len());
        view[start..end].to_vec()
    };
    Page { rows, total_pages }
}

/// Steps back one page at a time while the page is empty and not the first.
pub fn back_off(view_len: usize, mut page_number: usize, page_size: usize) -> usize {
    while page_number > 1 && page_is_empty(view_len, page_number, page_size) {
        page_number -= 1;
    }
    page_number.max(1)
}

fn page_is_empty(view_len: usize, page_number: usize, page_size: usize) -> bool {
    page_number.saturating_sub(1).saturating_mul(page_size) >= view_len
}
