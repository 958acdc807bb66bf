//! Posts, likes, comments and feed views.

use async_trait::async_trait;

use super::{InMemoryStore, State};
use crate::domain::foundation::{DomainError, ErrorCode, PostId, UserId};
use crate::domain::post::{Comment, Like, Post};
use crate::ports::{CommentView, LikeToggle, PageRequest, PostReader, PostRepository, PostView};

fn post_view(state: &State, post: &Post) -> Option<PostView> {
    let author = state.summary(&post.author_id())?;

    let comments: Vec<CommentView> = state
        .comments
        .iter()
        .filter(|c| c.post_id() == post.id())
        .filter_map(|c| {
            Some(CommentView {
                id: c.id(),
                author: state.summary(&c.author_id())?,
                content: c.content().to_string(),
                created_at: c.created_at(),
            })
        })
        .collect();

    let liker_ids: Vec<UserId> = state
        .likes
        .iter()
        .filter(|l| l.post_id == post.id())
        .map(|l| l.user_id)
        .collect();

    Some(PostView {
        id: post.id(),
        author,
        content: post.content().map(str::to_string),
        image: post.image().map(|i| i.as_str().to_string()),
        created_at: post.created_at(),
        like_count: liker_ids.len() as u64,
        comment_count: comments.len() as u64,
        comments,
        liker_ids,
    })
}

fn page(state: &State, filter: impl Fn(&Post) -> bool, page: &PageRequest) -> Vec<PostView> {
    state
        .posts
        .iter()
        .rev()
        .filter(|p| filter(*p))
        .skip(page.offset as usize)
        .take(page.limit as usize)
        .filter_map(|p| post_view(state, p))
        .collect()
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn insert(&self, post: &Post) -> Result<(), DomainError> {
        self.write().posts.push(post.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, DomainError> {
        Ok(self.read().post(id).cloned())
    }

    async fn delete(&self, id: &PostId) -> Result<(), DomainError> {
        let mut state = self.write();
        let before = state.posts.len();
        state.posts.retain(|p| &p.id() != id);
        if state.posts.len() == before {
            return Err(DomainError::new(
                ErrorCode::PostNotFound,
                format!("Post not found: {}", id),
            ));
        }
        state.likes.retain(|l| &l.post_id != id);
        state.comments.retain(|c| &c.post_id() != id);
        state.notifications.retain(|n| n.post_id.as_ref() != Some(id));
        Ok(())
    }

    async fn toggle_like(&self, like: &Like) -> Result<LikeToggle, DomainError> {
        let mut state = self.write();
        let existing = state
            .likes
            .iter()
            .position(|l| l.user_id == like.user_id && l.post_id == like.post_id);

        let liked = match existing {
            Some(index) => {
                state.likes.remove(index);
                false
            }
            None => {
                state.likes.push(*like);
                true
            }
        };

        let like_count = state.likes.iter().filter(|l| l.post_id == like.post_id).count() as u64;
        Ok(LikeToggle { liked, like_count })
    }

    async fn insert_comment(&self, comment: &Comment) -> Result<(), DomainError> {
        self.write().comments.push(comment.clone());
        Ok(())
    }
}

#[async_trait]
impl PostReader for InMemoryStore {
    async fn get(&self, id: &PostId) -> Result<Option<PostView>, DomainError> {
        let state = self.read();
        Ok(state.post(id).and_then(|p| post_view(&state, p)))
    }

    async fn feed(&self, request: &PageRequest) -> Result<Vec<PostView>, DomainError> {
        let state = self.read();
        Ok(page(&state, |_| true, request))
    }

    async fn by_author(
        &self,
        author_id: &UserId,
        request: &PageRequest,
    ) -> Result<Vec<PostView>, DomainError> {
        let state = self.read();
        let author_id = *author_id;
        Ok(page(&state, move |p| p.author_id() == author_id, request))
    }

    async fn liked_by(
        &self,
        user_id: &UserId,
        request: &PageRequest,
    ) -> Result<Vec<PostView>, DomainError> {
        let state = self.read();
        let liked: Vec<PostId> = state
            .likes
            .iter()
            .filter(|l| &l.user_id == user_id)
            .map(|l| l.post_id)
            .collect();
        Ok(page(&state, move |p| liked.contains(&p.id()), request))
    }
}
