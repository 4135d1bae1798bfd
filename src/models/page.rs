// src/models/page.rs - paging primitives shared by repositories and services

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("Page index must not be less than zero")]
    NegativePage,
    #[error("Page size must not be less than one")]
    EmptyPageSize,
    #[error("No property '{0}' found for type 'Post'")]
    UnknownProperty(String),
}

/// Columns a page of posts can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Title,
    Description,
    Content,
}

impl SortField {
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Title => "title",
            SortField::Description => "description",
            SortField::Content => "content",
        }
    }
}

impl FromStr for SortField {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "id" => Ok(SortField::Id),
            "title" => Ok(SortField::Title),
            "description" => Ok(SortField::Description),
            "content" => Ok(SortField::Content),
            other => Err(PageError::UnknownProperty(other.to_string())),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// A request for one page, ordered ascending by `sort`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: SortField,
}

impl PageRequest {
    pub fn of(page_no: i32, page_size: i32, sort_by: &str) -> Result<Self, PageError> {
        if page_no < 0 {
            return Err(PageError::NegativePage);
        }
        if page_size < 1 {
            return Err(PageError::EmptyPageSize);
        }
        let sort = sort_by.parse::<SortField>()?;

        Ok(Self {
            page: page_no.unsigned_abs(),
            size: page_size.unsigned_abs(),
            sort,
        })
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// One slice of an ordered result set plus the size of the whole set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            number: request.page,
            size: request.size,
            total_elements,
        }
    }

    pub fn total_pages(&self) -> u32 {
        if self.size == 0 {
            return 1;
        }
        let pages = self.total_elements.div_ceil(u64::from(self.size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn is_last(&self) -> bool {
        u64::from(self.number) + 1 >= u64::from(self.total_pages())
    }
}
