/// Rows returned per listing page
pub const PAGE_SIZE: i64 = 10;

/// A 1-based offset page over rows ordered by id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(i64);

impl Page {
    /// `None` when `number` is below 1.
    pub fn new(number: i64) -> Option<Self> {
        (number >= 1).then_some(Self(number))
    }

    pub fn number(&self) -> i64 {
        self.0
    }

    pub fn limit(&self) -> i64 {
        PAGE_SIZE
    }

    pub fn offset(&self) -> i64 {
        (self.0 - 1).saturating_mul(PAGE_SIZE)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self(1)
    }
}
