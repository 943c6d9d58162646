pub mod comment;
pub mod report;
pub mod tag;
pub mod task;
pub mod user;

pub use comment::{Comment, CommentInput, CommentUpdate};
pub use report::{Report, ReportInput};
pub use tag::{Tag, TagInput, TagUpdate};
pub use task::{SortOrder, Task, TaskInput, TaskPriority, TaskSort, TaskStatus, TaskUpdate};
pub use user::{User, UserCreate, UserUpdate};

use serde::Deserialize;

/// Page/limit query parameters shared by every listing endpoint.
/// Pages are 1-indexed; the row offset is (page - 1) * limit.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageQuery {
    pub fn resolve(&self, default_limit: u32) -> (u32, u32) {
        (self.page.unwrap_or(1).max(1), self.limit.unwrap_or(default_limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_defaults() {
        let query = PageQuery::default();
        assert_eq!(query.resolve(10), (1, 10));

        let query = PageQuery {
            page: Some(0),
            limit: Some(25),
        };
        // Page 0 is clamped back to the first page.
        assert_eq!(query.resolve(10), (1, 25));
    }
}
