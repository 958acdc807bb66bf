//! Request and response bodies for the post endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PostId, Timestamp, UserId};
use crate::domain::post::Post;
use crate::ports::{PageRequest, PostView};

/// `?limit=&offset=` paging parameters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl From<PageQuery> for PageRequest {
    fn from(query: PageQuery) -> Self {
        PageRequest::new(query.limit, query.offset)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePostRequest {
    pub content: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateCommentRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: PostId,
    pub author_id: UserId,
    pub content: Option<String>,
    pub image: Option<String>,
    pub created_at: Timestamp,
}

impl From<&Post> for PostResponse {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id(),
            author_id: post.author_id(),
            content: post.content().map(str::to_string),
            image: post.image().map(|i| i.as_str().to_string()),
            created_at: post.created_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    pub posts: Vec<PostView>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{DEFAULT_FEED_LIMIT, MAX_FEED_LIMIT};

    #[test]
    fn page_query_is_clamped() {
        let page: PageRequest = PageQuery {
            limit: Some(10_000),
            offset: Some(5),
        }
        .into();
        assert_eq!(page.limit, MAX_FEED_LIMIT);
        assert_eq!(page.offset, 5);

        let page: PageRequest = PageQuery::default().into();
        assert_eq!(page.limit, DEFAULT_FEED_LIMIT);
        assert_eq!(page.offset, 0);
    }
}
